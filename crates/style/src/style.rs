//! The read-only style input of a layout pass, with the resolved accessors
//! the solver routes every edge and flex-factor read through.

use log::trace;

use crate::axis::{axis_dimension, leading_edge, trailing_edge};
use crate::edges::EdgeValues;
use crate::types::{
    Align, Dimension, Direction, Edge, FlexDirection, Justify, Overflow, PositionType, Wrap,
};

/// Styling inputs of one node. Plain data: the engine reads it, never
/// writes it, and mutation outside a layout pass is the host's business.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Style {
    pub direction: Direction,
    pub flex_direction: FlexDirection,
    pub justify_content: Justify,
    pub align_content: Align,
    pub align_items: Align,
    pub align_self: Align,
    pub position_type: PositionType,
    pub flex_wrap: Wrap,
    pub overflow: Overflow,

    /// Shorthand flex factor, kept for compatibility with hosts that never
    /// migrated to the split factors. See [`Style::resolved_flex_grow`] and
    /// friends for how it expands.
    pub flex: Option<f32>,
    pub flex_grow: Option<f32>,
    pub flex_shrink: Option<f32>,
    pub flex_basis: Option<f32>,

    /// Width / height ratio. Not part of the CSS flexbox specification.
    pub aspect_ratio: Option<f32>,

    pub margin: EdgeValues,
    pub position: EdgeValues,
    /// Negative padding rules are skipped when resolving, never surfaced.
    pub padding: EdgeValues,
    pub border: EdgeValues,

    pub dimensions: [Option<f32>; 2],
    pub min_dimensions: [Option<f32>; 2],
    pub max_dimensions: [Option<f32>; 2],
}

impl Default for Style {
    fn default() -> Self {
        Self {
            direction: Direction::Inherit,
            flex_direction: FlexDirection::Column,
            justify_content: Justify::FlexStart,
            align_content: Align::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            position_type: PositionType::Relative,
            flex_wrap: Wrap::NoWrap,
            overflow: Overflow::Visible,
            flex: None,
            flex_grow: None,
            flex_shrink: None,
            flex_basis: None,
            aspect_ratio: None,
            margin: EdgeValues::new(),
            position: EdgeValues::new(),
            padding: EdgeValues::new(),
            border: EdgeValues::new(),
            dimensions: [None; 2],
            min_dimensions: [None; 2],
            max_dimensions: [None; 2],
        }
    }
}

impl Style {
    /// `Inherit` takes the parent's direction; an inheriting root is LTR.
    #[inline]
    pub fn resolve_direction(&self, parent_direction: Direction) -> Direction {
        if self.direction == Direction::Inherit {
            if parent_direction == Direction::Inherit {
                Direction::Ltr
            } else {
                parent_direction
            }
        } else {
            self.direction
        }
    }

    #[inline]
    pub fn dimension(&self, dimension: Dimension) -> Option<f32> {
        self.dimensions[dimension.index()]
    }

    #[inline]
    pub fn set_width(&mut self, width: Option<f32>) {
        self.dimensions[Dimension::Width.index()] = width;
    }

    #[inline]
    pub fn set_height(&mut self, height: Option<f32>) {
        self.dimensions[Dimension::Height.index()] = height;
    }

    #[inline]
    pub fn set_min_width(&mut self, min_width: Option<f32>) {
        self.min_dimensions[Dimension::Width.index()] = min_width;
    }

    #[inline]
    pub fn set_min_height(&mut self, min_height: Option<f32>) {
        self.min_dimensions[Dimension::Height.index()] = min_height;
    }

    #[inline]
    pub fn set_max_width(&mut self, max_width: Option<f32>) {
        self.max_dimensions[Dimension::Width.index()] = max_width;
    }

    #[inline]
    pub fn set_max_height(&mut self, max_height: Option<f32>) {
        self.max_dimensions[Dimension::Height.index()] = max_height;
    }

    #[inline]
    pub fn min_dimension(&self, dimension: Dimension) -> Option<f32> {
        self.min_dimensions[dimension.index()]
    }

    #[inline]
    pub fn max_dimension(&self, dimension: Dimension) -> Option<f32> {
        self.max_dimensions[dimension.index()]
    }

    /// A style dimension is definite when set and non-negative.
    #[inline]
    pub fn is_dimension_defined(&self, axis: FlexDirection) -> bool {
        self.dimension(axis_dimension(axis))
            .is_some_and(|value| value >= 0.0)
    }

    // Host-facing per-edge reads through the shorthand chain. Margin,
    // padding and border default to zero on physical edges; position
    // insets have no default so definedness stays observable.

    #[inline]
    pub fn resolved_margin(&self, edge: Edge) -> Option<f32> {
        self.margin.computed(edge, Some(0.0))
    }

    #[inline]
    pub fn resolved_padding(&self, edge: Edge) -> Option<f32> {
        self.padding.computed(edge, Some(0.0))
    }

    #[inline]
    pub fn resolved_border(&self, edge: Edge) -> Option<f32> {
        self.border.computed(edge, Some(0.0))
    }

    #[inline]
    pub fn resolved_position(&self, edge: Edge) -> Option<f32> {
        self.position.computed(edge, None)
    }

    // Margins. On row axes the logical start/end slots win over the
    // physical edges.

    pub fn leading_margin(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(start) = self.margin.get(Edge::Start)
        {
            return start;
        }
        self.margin
            .computed(leading_edge(axis), Some(0.0))
            .unwrap_or(0.0)
    }

    pub fn trailing_margin(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(end) = self.margin.get(Edge::End)
        {
            return end;
        }
        self.margin
            .computed(trailing_edge(axis), Some(0.0))
            .unwrap_or(0.0)
    }

    // Padding and borders resolve the same way as margins but clamp to
    // zero: a negative rule is skipped rather than applied.

    pub fn leading_padding(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(start) = self.padding.get(Edge::Start)
        {
            if start >= 0.0 {
                return start;
            }
            trace!(target: "flex::style", "skipping negative padding-start {start}");
        }
        self.padding
            .computed(leading_edge(axis), Some(0.0))
            .unwrap_or(0.0)
            .max(0.0)
    }

    pub fn trailing_padding(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(end) = self.padding.get(Edge::End)
        {
            if end >= 0.0 {
                return end;
            }
            trace!(target: "flex::style", "skipping negative padding-end {end}");
        }
        self.padding
            .computed(trailing_edge(axis), Some(0.0))
            .unwrap_or(0.0)
            .max(0.0)
    }

    pub fn leading_border(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(start) = self.border.get(Edge::Start)
            && start >= 0.0
        {
            return start;
        }
        self.border
            .computed(leading_edge(axis), Some(0.0))
            .unwrap_or(0.0)
            .max(0.0)
    }

    pub fn trailing_border(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(end) = self.border.get(Edge::End)
            && end >= 0.0
        {
            return end;
        }
        self.border
            .computed(trailing_edge(axis), Some(0.0))
            .unwrap_or(0.0)
            .max(0.0)
    }

    #[inline]
    pub fn leading_padding_and_border(&self, axis: FlexDirection) -> f32 {
        self.leading_padding(axis) + self.leading_border(axis)
    }

    #[inline]
    pub fn trailing_padding_and_border(&self, axis: FlexDirection) -> f32 {
        self.trailing_padding(axis) + self.trailing_border(axis)
    }

    #[inline]
    pub fn margin_axis(&self, axis: FlexDirection) -> f32 {
        self.leading_margin(axis) + self.trailing_margin(axis)
    }

    #[inline]
    pub fn padding_and_border_axis(&self, axis: FlexDirection) -> f32 {
        self.leading_padding_and_border(axis) + self.trailing_padding_and_border(axis)
    }

    // Position insets. Start/end win on row axes; there is no default, so
    // definedness is observable.

    pub fn is_leading_position_defined(&self, axis: FlexDirection) -> bool {
        (axis.is_row() && self.position.computed(Edge::Start, None).is_some())
            || self.position.computed(leading_edge(axis), None).is_some()
    }

    pub fn is_trailing_position_defined(&self, axis: FlexDirection) -> bool {
        (axis.is_row() && self.position.computed(Edge::End, None).is_some())
            || self.position.computed(trailing_edge(axis), None).is_some()
    }

    pub fn leading_position(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(start) = self.position.computed(Edge::Start, None)
        {
            return start;
        }
        self.position
            .computed(leading_edge(axis), None)
            .unwrap_or(0.0)
    }

    pub fn trailing_position(&self, axis: FlexDirection) -> f32 {
        if axis.is_row()
            && let Some(end) = self.position.computed(Edge::End, None)
        {
            return end;
        }
        self.position
            .computed(trailing_edge(axis), None)
            .unwrap_or(0.0)
    }

    /// Offset a relatively positioned box applies to both edges of an
    /// axis: the leading inset when defined, otherwise the negated
    /// trailing inset.
    #[inline]
    pub fn relative_position(&self, axis: FlexDirection) -> f32 {
        if self.is_leading_position_defined(axis) {
            self.leading_position(axis)
        } else {
            -self.trailing_position(axis)
        }
    }

    // Flex factor resolution, including the legacy shorthand expansion:
    // `flex: n` with n > 0 means grow n, shrink 0, basis 0; a negative n
    // means grow 0, shrink -n, basis auto.

    pub fn resolved_flex_grow(&self) -> f32 {
        if let Some(grow) = self.flex_grow {
            return grow;
        }
        match self.flex {
            Some(flex) if flex > 0.0 => flex,
            _ => 0.0,
        }
    }

    pub fn resolved_flex_shrink(&self) -> f32 {
        if let Some(shrink) = self.flex_shrink {
            return shrink;
        }
        match self.flex {
            Some(flex) if flex < 0.0 => -flex,
            _ => 0.0,
        }
    }

    /// Positive `flex` without an explicit basis resolves to basis 0, not
    /// auto: the content is never measured for such items.
    pub fn resolved_flex_basis(&self) -> Option<f32> {
        if self.flex_basis.is_some() {
            return self.flex_basis;
        }
        match self.flex {
            Some(flex) if flex > 0.0 => Some(0.0),
            _ => None,
        }
    }

    /// Whether the node participates in flexible sizing at all.
    pub fn is_flex(&self) -> bool {
        self.position_type == PositionType::Relative
            && (self.flex_grow.is_some_and(|grow| grow != 0.0)
                || self.flex_shrink.is_some_and(|shrink| shrink != 0.0)
                || self.flex.is_some_and(|flex| flex != 0.0))
    }
}

/// The alignment that applies to a child: its own `align-self` unless that
/// is `Auto`, in which case the container's `align-items`.
#[inline]
pub fn align_item(container: &Style, child: &Style) -> Align {
    if child.align_self == Align::Auto {
        container.align_items
    } else {
        child.align_self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_wins_over_left_for_row_margins() {
        let mut style = Style::default();
        style.margin.set(Edge::Left, Some(5.0));
        style.margin.set(Edge::Start, Some(11.0));

        assert!((style.leading_margin(FlexDirection::Row) - 11.0).abs() < 1e-6);
        // Columns ignore start/end.
        assert!((style.leading_margin(FlexDirection::Column)).abs() < 1e-6);
    }

    #[test]
    fn row_reverse_leads_from_the_right() {
        let mut style = Style::default();
        style.margin.set(Edge::Left, Some(3.0));
        style.margin.set(Edge::Right, Some(7.0));

        assert!((style.leading_margin(FlexDirection::RowReverse) - 7.0).abs() < 1e-6);
        assert!((style.trailing_margin(FlexDirection::RowReverse) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn negative_padding_rules_are_skipped() {
        let mut style = Style::default();
        style.padding.set(Edge::All, Some(10.0));
        style.padding.set(Edge::Start, Some(-5.0));

        assert!((style.leading_padding(FlexDirection::Row) - 10.0).abs() < 1e-6);

        let mut clamped = Style::default();
        clamped.padding.set(Edge::Left, Some(-4.0));
        assert!(clamped.leading_padding(FlexDirection::Row).abs() < 1e-6);
    }

    #[test]
    fn flex_shorthand_expansion() {
        let mut style = Style::default();
        style.flex = Some(2.0);
        assert!((style.resolved_flex_grow() - 2.0).abs() < 1e-6);
        assert!(style.resolved_flex_shrink().abs() < 1e-6);
        assert_eq!(style.resolved_flex_basis(), Some(0.0));

        style.flex = Some(-1.0);
        assert!(style.resolved_flex_grow().abs() < 1e-6);
        assert!((style.resolved_flex_shrink() - 1.0).abs() < 1e-6);
        assert_eq!(style.resolved_flex_basis(), None);
    }

    #[test]
    fn explicit_factors_win_over_the_shorthand() {
        let mut style = Style::default();
        style.flex = Some(3.0);
        style.flex_grow = Some(0.0);
        style.flex_basis = Some(40.0);

        assert!(style.resolved_flex_grow().abs() < 1e-6);
        assert_eq!(style.resolved_flex_basis(), Some(40.0));
    }

    #[test]
    fn default_style_is_not_flexible() {
        let style = Style::default();
        assert!(!style.is_flex());

        let mut flexible = Style::default();
        flexible.flex = Some(1.0);
        assert!(flexible.is_flex());

        let mut absolute = Style::default();
        absolute.flex = Some(1.0);
        absolute.position_type = PositionType::Absolute;
        assert!(!absolute.is_flex());
    }

    #[test]
    fn resolved_edge_reads_expand_shorthands() {
        let mut style = Style::default();
        style.margin.set(Edge::All, Some(6.0));
        style.padding.set(Edge::Horizontal, Some(9.0));

        assert_eq!(style.resolved_margin(Edge::Top), Some(6.0));
        assert_eq!(style.resolved_padding(Edge::Left), Some(9.0));
        assert_eq!(style.resolved_padding(Edge::Top), Some(0.0));
        // Position insets stay undefined when unset.
        assert_eq!(style.resolved_position(Edge::Left), None);
    }

    #[test]
    fn relative_position_prefers_the_leading_inset() {
        let mut style = Style::default();
        style.position.set(Edge::Top, Some(12.0));
        style.position.set(Edge::Bottom, Some(30.0));
        assert!((style.relative_position(FlexDirection::Column) - 12.0).abs() < 1e-6);

        let mut trailing_only = Style::default();
        trailing_only.position.set(Edge::Bottom, Some(30.0));
        assert!((trailing_only.relative_position(FlexDirection::Column) + 30.0).abs() < 1e-6);
    }
}
