//! Size clamping against min/max constraints and the padding+border floor.

use crate::axis::axis_dimension;
use crate::style::Style;
use crate::types::{FlexDirection, MeasureMode};

/// Clamp a main- or cross-axis size to the node's min/max dimensions along
/// that axis. Constraints only apply when set and non-negative. The max
/// bound is applied before the min bound, so an inverted pair resolves in
/// favor of the minimum.
pub fn bound_axis_within_min_and_max(style: &Style, axis: FlexDirection, value: f32) -> f32 {
    let dimension = axis_dimension(axis);
    let min = style.min_dimension(dimension);
    let max = style.max_dimension(dimension);

    let mut bound = value;
    if let Some(max) = max
        && max >= 0.0
        && bound > max
    {
        bound = max;
    }
    if let Some(min) = min
        && min >= 0.0
        && bound < min
    {
        bound = min;
    }
    bound
}

/// Like [`bound_axis_within_min_and_max`], but never below the node's own
/// padding plus border along the axis.
#[inline]
pub fn bound_axis(style: &Style, axis: FlexDirection, value: f32) -> f32 {
    bound_axis_within_min_and_max(style, axis, value).max(style.padding_and_border_axis(axis))
}

/// Fold a max-dimension constraint into a measurement request. An exact or
/// at-most request is capped at the max; an unconstrained request becomes
/// an at-most request at the max.
pub fn constrain_max_size_for_mode(
    max_size: Option<f32>,
    mode: &mut MeasureMode,
    size: &mut Option<f32>,
) {
    match *mode {
        MeasureMode::Exactly | MeasureMode::AtMost => {
            if let Some(max) = max_size
                && let Some(current) = *size
                && current >= max
            {
                *size = Some(max);
            }
        }
        MeasureMode::Undefined => {
            if let Some(max) = max_size {
                *mode = MeasureMode::AtMost;
                *size = Some(max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dimension, Edge};

    #[test]
    fn min_and_max_clamp_when_defined() {
        let mut style = Style::default();
        style.min_dimensions[Dimension::Width.index()] = Some(50.0);
        style.max_dimensions[Dimension::Width.index()] = Some(120.0);

        assert!((bound_axis_within_min_and_max(&style, FlexDirection::Row, 10.0) - 50.0).abs() < 1e-6);
        assert!((bound_axis_within_min_and_max(&style, FlexDirection::Row, 80.0) - 80.0).abs() < 1e-6);
        assert!(
            (bound_axis_within_min_and_max(&style, FlexDirection::Row, 400.0) - 120.0).abs() < 1e-6
        );
        // Height is unconstrained.
        assert!(
            (bound_axis_within_min_and_max(&style, FlexDirection::Column, 400.0) - 400.0).abs()
                < 1e-6
        );
    }

    #[test]
    fn negative_constraints_are_ignored() {
        let mut style = Style::default();
        style.min_dimensions[Dimension::Width.index()] = Some(-3.0);
        assert!(bound_axis_within_min_and_max(&style, FlexDirection::Row, 0.0).abs() < 1e-6);
    }

    #[test]
    fn bound_axis_floors_at_padding_and_border() {
        let mut style = Style::default();
        style.padding.set(Edge::All, Some(8.0));
        style.border.set(Edge::All, Some(1.0));

        // Padding + border on one axis is 2 * (8 + 1).
        assert!((bound_axis(&style, FlexDirection::Row, 0.0) - 18.0).abs() < 1e-6);
        assert!((bound_axis(&style, FlexDirection::Column, 40.0) - 40.0).abs() < 1e-6);
    }

    #[test]
    fn undefined_mode_promotes_to_at_most() {
        let mut mode = MeasureMode::Undefined;
        let mut size = None;
        constrain_max_size_for_mode(Some(90.0), &mut mode, &mut size);
        assert_eq!(mode, MeasureMode::AtMost);
        assert_eq!(size, Some(90.0));

        // Without a max, nothing changes.
        let mut mode = MeasureMode::Undefined;
        let mut size = None;
        constrain_max_size_for_mode(None, &mut mode, &mut size);
        assert_eq!(mode, MeasureMode::Undefined);
        assert_eq!(size, None);
    }

    #[test]
    fn exact_mode_caps_the_size_in_place() {
        let mut mode = MeasureMode::Exactly;
        let mut size = Some(150.0);
        constrain_max_size_for_mode(Some(100.0), &mut mode, &mut size);
        assert_eq!(mode, MeasureMode::Exactly);
        assert_eq!(size, Some(100.0));

        let mut size = Some(80.0);
        constrain_max_size_for_mode(Some(100.0), &mut mode, &mut size);
        assert_eq!(size, Some(80.0));
    }
}
