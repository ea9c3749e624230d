//! Memoized entry into the solver.
//!
//! [`layout_node_internal`] wraps the layout algorithm with the per-node
//! cache: a layout request touches a node's subtree at most once per
//! generation, and measurement requests are answered from the ring cache
//! whenever the compatibility oracle allows it. [`LayoutTree::calculate_layout`]
//! is the host-facing entry that normalizes available sizes into measure
//! modes and kicks off the recursion.

mod absolute;
mod compute;
mod flex_basis;
mod measured;

use log::{debug, trace};

use flex_style::{
    Dimension, Direction, Edge, FlexDirection, MeasureMode, cross_axis, leading_edge,
    resolve_axis, trailing_edge,
};

use crate::cache::{CachedMeasurement, MAX_CACHED_MEASUREMENTS, can_use_cached_measurement};
use crate::config::ExperimentalFeatures;
use crate::tree::{LayoutTree, NodeId};

fn mode_name(mode: MeasureMode, perform_layout: bool) -> &'static str {
    match (mode, perform_layout) {
        (MeasureMode::Undefined, false) => "UNDEFINED",
        (MeasureMode::Exactly, false) => "EXACTLY",
        (MeasureMode::AtMost, false) => "AT_MOST",
        (MeasureMode::Undefined, true) => "LAY_UNDEFINED",
        (MeasureMode::Exactly, true) => "LAY_EXACTLY",
        (MeasureMode::AtMost, true) => "LAY_AT_MOST",
    }
}

/// Decide whether the request can be served from cache, and run the
/// algorithm when it cannot. Returns true when the node was actually
/// visited (dirty or cache miss), false when the cache answered.
#[allow(clippy::too_many_arguments)]
pub(crate) fn layout_node_internal(
    tree: &mut LayoutTree,
    node: NodeId,
    available_width: Option<f32>,
    available_height: Option<f32>,
    parent_direction: Direction,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    perform_layout: bool,
    reason: &str,
    depth: usize,
) -> bool {
    let current_generation = tree.generation;

    let need_to_visit_node = {
        let node_ref = tree.node(node);
        (node_ref.is_dirty && node_ref.layout.generation != current_generation)
            || node_ref.layout.last_parent_direction != Some(parent_direction)
    };

    if need_to_visit_node {
        // Invalidate the cached results.
        let layout = &mut tree.node_mut(node).layout;
        layout.next_cached_measurement_index = 0;
        layout.cached_layout = None;
    }

    // Layout results and measurements are cached separately: a layout
    // writes positions throughout the subtree and happens at most once
    // per pass, while several measurements may be needed to resolve flex
    // sizes. Measure-function nodes get the full oracle because their
    // callbacks are the most expensive thing the engine invokes.
    let mut cached_results: Option<CachedMeasurement> = None;

    if tree.node(node).measure.is_some() {
        let margin_row = tree.style(node).margin_axis(FlexDirection::Row);
        let margin_column = tree.style(node).margin_axis(FlexDirection::Column);
        let layout = &tree.node(node).layout;

        let layout_slot_usable = layout.cached_layout.as_ref().is_some_and(|entry| {
            can_use_cached_measurement(
                width_mode,
                available_width,
                height_mode,
                available_height,
                entry,
                margin_row,
                margin_column,
            )
        });
        if layout_slot_usable {
            cached_results = layout.cached_layout;
        } else {
            for entry in layout
                .cached_measurements
                .iter()
                .take(layout.next_cached_measurement_index)
                .flatten()
            {
                if can_use_cached_measurement(
                    width_mode,
                    available_width,
                    height_mode,
                    available_height,
                    entry,
                    margin_row,
                    margin_column,
                ) {
                    cached_results = Some(*entry);
                    break;
                }
            }
        }
    } else if perform_layout {
        let layout = &tree.node(node).layout;
        if let Some(entry) = layout.cached_layout.as_ref()
            && entry.matches_request(available_width, available_height, width_mode, height_mode)
        {
            cached_results = Some(*entry);
        }
    } else {
        let layout = &tree.node(node).layout;
        for entry in layout
            .cached_measurements
            .iter()
            .take(layout.next_cached_measurement_index)
            .flatten()
        {
            if entry.matches_request(available_width, available_height, width_mode, height_mode) {
                cached_results = Some(*entry);
                break;
            }
        }
    }

    if !need_to_visit_node && let Some(cached) = cached_results {
        tree.node_mut(node).layout.measured_dimensions =
            [cached.computed_width, cached.computed_height];
        trace!(
            target: "flex::layout",
            "{:indent$}{depth}. [skipped] wm: {wm}, hm: {hm}, aw: {aw:?} ah: {ah:?} => d: ({w}, {h}) {reason}",
            "",
            indent = depth * 2,
            wm = mode_name(width_mode, perform_layout),
            hm = mode_name(height_mode, perform_layout),
            aw = available_width,
            ah = available_height,
            w = cached.computed_width,
            h = cached.computed_height,
        );
    } else {
        trace!(
            target: "flex::layout",
            "{:indent$}{depth}. {star}wm: {wm}, hm: {hm}, aw: {aw:?} ah: {ah:?} {reason}",
            "",
            indent = depth * 2,
            star = if need_to_visit_node { "*" } else { "" },
            wm = mode_name(width_mode, perform_layout),
            hm = mode_name(height_mode, perform_layout),
            aw = available_width,
            ah = available_height,
        );

        compute::layout_impl(
            tree,
            node,
            available_width,
            available_height,
            parent_direction,
            width_mode,
            height_mode,
            perform_layout,
            depth,
        );

        {
            let layout = &tree.node(node).layout;
            trace!(
                target: "flex::layout",
                "{:indent$}{depth}. {star}d: ({w}, {h}) {reason}",
                "",
                indent = depth * 2,
                star = if need_to_visit_node { "*" } else { "" },
                w = layout.measured_dimensions[Dimension::Width.index()],
                h = layout.measured_dimensions[Dimension::Height.index()],
            );
        }

        tree.node_mut(node).layout.last_parent_direction = Some(parent_direction);

        if cached_results.is_none() {
            let measured = tree.node(node).layout.measured_dimensions;
            let new_entry = CachedMeasurement {
                available_width,
                available_height,
                width_mode,
                height_mode,
                computed_width: measured[Dimension::Width.index()],
                computed_height: measured[Dimension::Height.index()],
            };

            let layout = &mut tree.node_mut(node).layout;
            if perform_layout {
                layout.cached_layout = Some(new_entry);
            } else {
                if layout.next_cached_measurement_index == MAX_CACHED_MEASUREMENTS {
                    debug!(target: "flex::cache", "out of cache entries, recycling the ring");
                    layout.next_cached_measurement_index = 0;
                }
                let slot = layout.next_cached_measurement_index;
                layout.cached_measurements[slot] = Some(new_entry);
                layout.next_cached_measurement_index += 1;
            }
        }
    }

    if perform_layout {
        let node_mut = tree.node_mut(node);
        node_mut.layout.dimensions = node_mut.layout.measured_dimensions;
        node_mut.has_new_layout = true;
        node_mut.is_dirty = false;
    }
    tree.node_mut(node).layout.generation = current_generation;

    need_to_visit_node || cached_results.is_none()
}

/// Seed a node's four position slots from its margins and relative
/// offsets under the given direction.
pub(crate) fn set_position(tree: &mut LayoutTree, node: NodeId, direction: Direction) {
    let style = *tree.style(node);
    let main_axis = resolve_axis(style.flex_direction, direction);
    let cross = cross_axis(main_axis, direction);
    let relative_position_main = style.relative_position(main_axis);
    let relative_position_cross = style.relative_position(cross);

    let layout = &mut tree.node_mut(node).layout;
    layout.position[leading_edge(main_axis).index()] =
        style.leading_margin(main_axis) + relative_position_main;
    layout.position[trailing_edge(main_axis).index()] =
        style.trailing_margin(main_axis) + relative_position_main;
    layout.position[leading_edge(cross).index()] =
        style.leading_margin(cross) + relative_position_cross;
    layout.position[trailing_edge(cross).index()] =
        style.trailing_margin(cross) + relative_position_cross;
}

/// Snap positions and dimensions to whole pixels, keeping each box's
/// extent consistent with its fractional offset so adjacent edges stay
/// adjacent after rounding.
fn round_to_pixel_grid(tree: &mut LayoutTree, node: NodeId) {
    {
        let layout = &mut tree.node_mut(node).layout;
        let left = layout.position[Edge::Left.index()];
        let top = layout.position[Edge::Top.index()];
        let fractional_left = left - left.floor();
        let fractional_top = top - top.floor();

        layout.dimensions[Dimension::Width.index()] = (fractional_left
            + layout.dimensions[Dimension::Width.index()])
        .round()
            - fractional_left.round();
        layout.dimensions[Dimension::Height.index()] = (fractional_top
            + layout.dimensions[Dimension::Height.index()])
        .round()
            - fractional_top.round();

        layout.position[Edge::Left.index()] = left.round();
        layout.position[Edge::Top.index()] = top.round();
    }

    let children = tree.node(node).children.clone();
    for child in children {
        round_to_pixel_grid(tree, child);
    }
}

impl LayoutTree {
    /// Lay out the tree rooted at `root` into the given available space.
    ///
    /// Undefined available sizes fall back to the root's own style
    /// dimension when definite, then to its max dimension as an upper
    /// bound, and finally to content sizing. Geometry is read back
    /// through [`LayoutTree::layout`].
    pub fn calculate_layout(
        &mut self,
        root: NodeId,
        available_width: Option<f32>,
        available_height: Option<f32>,
        parent_direction: Direction,
    ) {
        // A new generation forces one visit of every dirty node; clean
        // subtrees keep answering from their caches.
        self.generation = self.generation.wrapping_add(1);

        let style = *self.style(root);

        let (width, width_mode) = if let Some(width) = available_width {
            (Some(width), MeasureMode::Exactly)
        } else if style.is_dimension_defined(FlexDirection::Row) {
            (
                style
                    .dimension(Dimension::Width)
                    .map(|value| value + style.margin_axis(FlexDirection::Row)),
                MeasureMode::Exactly,
            )
        } else if style
            .max_dimension(Dimension::Width)
            .is_some_and(|max| max >= 0.0)
        {
            (style.max_dimension(Dimension::Width), MeasureMode::AtMost)
        } else {
            (None, MeasureMode::Undefined)
        };

        let (height, height_mode) = if let Some(height) = available_height {
            (Some(height), MeasureMode::Exactly)
        } else if style.is_dimension_defined(FlexDirection::Column) {
            (
                style
                    .dimension(Dimension::Height)
                    .map(|value| value + style.margin_axis(FlexDirection::Column)),
                MeasureMode::Exactly,
            )
        } else if style
            .max_dimension(Dimension::Height)
            .is_some_and(|max| max >= 0.0)
        {
            (style.max_dimension(Dimension::Height), MeasureMode::AtMost)
        } else {
            (None, MeasureMode::Undefined)
        };

        let visited = layout_node_internal(
            self,
            root,
            width,
            height,
            parent_direction,
            width_mode,
            height_mode,
            true,
            "initial",
            0,
        );

        if visited {
            let direction = self.node(root).layout.direction;
            set_position(self, root, direction);

            if self.is_experimental_feature_enabled(ExperimentalFeatures::ROUNDING) {
                round_to_pixel_grid(self, root);
            }
        }
    }
}
