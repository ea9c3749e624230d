//! Sizing and positioning of absolutely positioned children, run after
//! the container's own size is known.

use flex_style::{
    Dimension, Direction, FlexDirection, MeasureMode, axis_dimension, bound_axis, cross_axis,
    leading_edge, resolve_axis,
};

use crate::layout::layout_node_internal;
use crate::tree::{LayoutTree, NodeId};

/// Lay out one absolute child against its container. Sizes come from
/// definite style dimensions, from opposing insets, from the aspect
/// ratio, or from a content measurement, in that order; the final call
/// commits the layout with both axes exact.
pub(crate) fn absolute_layout_child(
    tree: &mut LayoutTree,
    node: NodeId,
    child: NodeId,
    width: Option<f32>,
    width_mode: MeasureMode,
    direction: Direction,
    depth: usize,
) {
    let parent_style = *tree.style(node);
    let child_style = *tree.style(child);
    let main_axis = resolve_axis(parent_style.flex_direction, direction);
    let cross = cross_axis(main_axis, direction);
    let is_main_axis_row = main_axis.is_row();

    let mut child_width: Option<f32> = None;
    let mut child_height: Option<f32> = None;

    if child_style.is_dimension_defined(FlexDirection::Row) {
        child_width = child_style
            .dimension(Dimension::Width)
            .map(|value| value + child_style.margin_axis(FlexDirection::Row));
    } else if child_style.is_leading_position_defined(FlexDirection::Row)
        && child_style.is_trailing_position_defined(FlexDirection::Row)
    {
        // Both horizontal insets pin the width against the container.
        let container_width =
            tree.node(node).layout.measured_dimensions[Dimension::Width.index()];
        let derived = container_width
            - (parent_style.leading_border(FlexDirection::Row)
                + parent_style.trailing_border(FlexDirection::Row))
            - (child_style.leading_position(FlexDirection::Row)
                + child_style.trailing_position(FlexDirection::Row));
        child_width = Some(bound_axis(&child_style, FlexDirection::Row, derived));
    }

    if child_style.is_dimension_defined(FlexDirection::Column) {
        child_height = child_style
            .dimension(Dimension::Height)
            .map(|value| value + child_style.margin_axis(FlexDirection::Column));
    } else if child_style.is_leading_position_defined(FlexDirection::Column)
        && child_style.is_trailing_position_defined(FlexDirection::Column)
    {
        let container_height =
            tree.node(node).layout.measured_dimensions[Dimension::Height.index()];
        let derived = container_height
            - (parent_style.leading_border(FlexDirection::Column)
                + parent_style.trailing_border(FlexDirection::Column))
            - (child_style.leading_position(FlexDirection::Column)
                + child_style.trailing_position(FlexDirection::Column));
        child_height = Some(bound_axis(&child_style, FlexDirection::Column, derived));
    }

    // Exactly one defined dimension anchors an aspect-ratio derivation.
    if child_width.is_some() != child_height.is_some()
        && let Some(ratio) = child_style.aspect_ratio
    {
        if child_width.is_none() {
            child_width = Some(
                (child_height.unwrap_or(0.0) * ratio)
                    .max(child_style.padding_and_border_axis(FlexDirection::Column)),
            );
        } else {
            child_height = Some(
                (child_width.unwrap_or(0.0) * ratio)
                    .max(child_style.padding_and_border_axis(FlexDirection::Row)),
            );
        }
    }

    // A dimension that is still open is resolved by measuring content.
    if child_width.is_none() || child_height.is_none() {
        let mut child_width_mode = if child_width.is_none() {
            MeasureMode::Undefined
        } else {
            MeasureMode::Exactly
        };
        let child_height_mode = if child_height.is_none() {
            MeasureMode::Undefined
        } else {
            MeasureMode::Exactly
        };

        // Column containers cap an open width to the container's
        // available width instead of measuring max-content.
        if !is_main_axis_row && child_width.is_none() && width_mode != MeasureMode::Undefined {
            child_width = width;
            child_width_mode = MeasureMode::AtMost;
        }

        layout_node_internal(
            tree,
            child,
            child_width,
            child_height,
            direction,
            child_width_mode,
            child_height_mode,
            false,
            "abs-measure",
            depth + 1,
        );
        let measured = tree.node(child).layout.measured_dimensions;
        child_width = Some(
            measured[Dimension::Width.index()] + child_style.margin_axis(FlexDirection::Row),
        );
        child_height = Some(
            measured[Dimension::Height.index()] + child_style.margin_axis(FlexDirection::Column),
        );
    }

    layout_node_internal(
        tree,
        child,
        child_width,
        child_height,
        direction,
        MeasureMode::Exactly,
        MeasureMode::Exactly,
        true,
        "abs-layout",
        depth + 1,
    );

    // Trailing-only insets place the leading edge from the far side.
    for axis in [main_axis, cross] {
        if child_style.is_trailing_position_defined(axis)
            && !child_style.is_leading_position_defined(axis)
        {
            let dimension = axis_dimension(axis).index();
            let container_size = tree.node(node).layout.measured_dimensions[dimension];
            let child_size = tree.node(child).layout.measured_dimensions[dimension];
            tree.node_mut(child).layout.position[leading_edge(axis).index()] = container_size
                - child_size
                - parent_style.trailing_border(axis)
                - child_style.trailing_position(axis);
        }
    }
}
