//! The flex layout algorithm for a single node.
//!
//! This implements a subset of CSS flexbox
//! (<https://www.w3.org/TR/css-flexbox-1/#layout-algorithm>) with the
//! following limitations: no `order` or z-ordering (children stack in
//! document order), no `wrap-reverse`, no auto margins, no baseline
//! alignment, no percentage sizes, and a default minimum main size of 0
//! instead of min-content. Min/max sizes are resolved with a fixed
//! two-pass freeze instead of the iterative loop the specification
//! describes.
//!
//! The routine reads `style` as immutable input and writes the node's
//! resolved direction and measured dimensions plus each child's position
//! and line index; children are laid out through recursive calls into the
//! memoized dispatcher.

use smallvec::SmallVec;

use flex_style::{
    Align, Dimension, Direction, FlexDirection, Justify, MeasureMode, PositionType, Wrap,
    align_item, axis_dimension, bound_axis, bound_axis_within_min_and_max, cross_axis,
    constrain_max_size_for_mode, position_edge, resolve_axis, trailing_edge,
};

use crate::layout::{layout_node_internal, set_position};
use crate::layout::absolute::absolute_layout_child;
use crate::layout::flex_basis::compute_child_flex_basis;
use crate::layout::measured::{
    set_measured_dimensions_for_empty_container, set_measured_dimensions_for_measure_leaf,
    set_measured_dimensions_if_empty_or_fixed_size,
};
use crate::tree::{LayoutTree, NodeId, contract};

/// A child's measured size along an axis plus its margins on that axis.
fn dim_with_margin(tree: &LayoutTree, child: NodeId, axis: FlexDirection) -> f32 {
    let node = tree.node(child);
    node.layout.measured_dimensions[axis_dimension(axis).index()]
        + node.style.leading_margin(axis)
        + node.style.trailing_margin(axis)
}

fn is_layout_dim_defined(tree: &LayoutTree, child: NodeId, axis: FlexDirection) -> bool {
    tree.node(child).layout.measured_dimensions[axis_dimension(axis).index()] >= 0.0
}

/// Mirror a child's position to the trailing edge of a reversed axis.
fn set_trailing_position(tree: &mut LayoutTree, node: NodeId, child: NodeId, axis: FlexDirection) {
    let dimension = axis_dimension(axis).index();
    let container_size = tree.node(node).layout.measured_dimensions[dimension];
    let child_node = tree.node_mut(child);
    let child_size = child_node.layout.measured_dimensions[dimension];
    child_node.layout.position[trailing_edge(axis).index()] =
        container_size - child_size - child_node.layout.position[position_edge(axis).index()];
}

/// Lay out one node under the given constraints. `perform_layout = false`
/// requests only measured dimensions; positions are left untouched.
#[allow(clippy::too_many_arguments, clippy::too_many_lines)]
pub(crate) fn layout_impl(
    tree: &mut LayoutTree,
    node: NodeId,
    available_width: Option<f32>,
    available_height: Option<f32>,
    parent_direction: Direction,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    perform_layout: bool,
    depth: usize,
) {
    contract(
        available_width.is_some() || width_mode == MeasureMode::Undefined,
        "available width is indefinite so the width measure mode must be undefined",
    );
    contract(
        available_height.is_some() || height_mode == MeasureMode::Undefined,
        "available height is indefinite so the height measure mode must be undefined",
    );

    let direction = tree.style(node).resolve_direction(parent_direction);
    tree.node_mut(node).layout.direction = direction;

    if tree.node(node).measure.is_some() {
        set_measured_dimensions_for_measure_leaf(
            tree,
            node,
            available_width,
            available_height,
            width_mode,
            height_mode,
        );
        return;
    }

    let child_count = tree.child_count(node);
    if child_count == 0 {
        set_measured_dimensions_for_empty_container(
            tree,
            node,
            available_width,
            available_height,
            width_mode,
            height_mode,
        );
        return;
    }

    // Measurement-only requests that are already fully determined skip
    // the algorithm.
    if !perform_layout
        && set_measured_dimensions_if_empty_or_fixed_size(
            tree,
            node,
            available_width,
            available_height,
            width_mode,
            height_mode,
        )
    {
        return;
    }

    // STEP 1: values used by the remainder of the algorithm
    let style = *tree.style(node);
    let main_axis = resolve_axis(style.flex_direction, direction);
    let cross = cross_axis(main_axis, direction);
    let is_main_axis_row = main_axis.is_row();
    let justify_content = style.justify_content;
    let is_node_flex_wrap = style.flex_wrap == Wrap::Wrap;

    let leading_padding_and_border_main = style.leading_padding_and_border(main_axis);
    let trailing_padding_and_border_main = style.trailing_padding_and_border(main_axis);
    let leading_padding_and_border_cross = style.leading_padding_and_border(cross);
    let padding_and_border_axis_main = style.padding_and_border_axis(main_axis);
    let padding_and_border_axis_cross = style.padding_and_border_axis(cross);

    let measure_mode_main_dim = if is_main_axis_row { width_mode } else { height_mode };
    let measure_mode_cross_dim = if is_main_axis_row { height_mode } else { width_mode };

    let padding_and_border_axis_row = style.padding_and_border_axis(FlexDirection::Row);
    let padding_and_border_axis_column = style.padding_and_border_axis(FlexDirection::Column);
    let margin_axis_row = style.margin_axis(FlexDirection::Row);
    let margin_axis_column = style.margin_axis(FlexDirection::Column);

    // STEP 2: available size inside margin, border and padding
    let available_inner_width =
        available_width.map(|width| width - margin_axis_row - padding_and_border_axis_row);
    let available_inner_height =
        available_height.map(|height| height - margin_axis_column - padding_and_border_axis_column);
    let available_inner_main_dim = if is_main_axis_row {
        available_inner_width
    } else {
        available_inner_height
    };
    let available_inner_cross_dim = if is_main_axis_row {
        available_inner_height
    } else {
        available_inner_width
    };

    let children: SmallVec<[NodeId; 16]> = SmallVec::from_slice(tree.children(node));

    // A single growing and shrinking child among rigid siblings can take
    // basis 0 directly: flexing will size it to the leftover space anyway,
    // saving its measurement.
    let mut single_flex_child: Option<NodeId> = None;
    if measure_mode_main_dim == MeasureMode::Exactly {
        for &child in &children {
            if single_flex_child.is_some() {
                if tree.style(child).is_flex() {
                    // There is already a flexible child, abort.
                    single_flex_child = None;
                    break;
                }
            } else if tree.style(child).resolved_flex_grow() > 0.0
                && tree.style(child).resolved_flex_shrink() > 0.0
            {
                single_flex_child = Some(child);
            }
        }
    }

    // STEP 3: flex basis for each child; absolute children are collected
    // for the post pass.
    let mut absolute_children: SmallVec<[NodeId; 4]> = SmallVec::new();
    for &child in &children {
        if perform_layout {
            // Initial position from margins and relative offsets.
            let child_direction = tree.style(child).resolve_direction(direction);
            set_position(tree, child, child_direction);
        }

        if tree.style(child).position_type == PositionType::Absolute {
            absolute_children.push(child);
        } else if single_flex_child == Some(child) {
            let generation = tree.generation;
            let child_layout = &mut tree.node_mut(child).layout;
            child_layout.computed_flex_basis_generation = generation;
            child_layout.computed_flex_basis = Some(0.0);
        } else {
            compute_child_flex_basis(
                tree,
                node,
                child,
                available_inner_width,
                width_mode,
                available_inner_height,
                height_mode,
                direction,
                depth,
            );
        }
    }

    // STEP 4 onwards runs once per flex line.
    let mut start_of_line_index = 0usize;
    let mut end_of_line_index = 0usize;
    let mut line_count = 0usize;
    let mut total_line_cross_dim = 0.0f32;
    let mut max_line_main_dim = 0.0f32;

    while end_of_line_index < child_count {
        // STEP 4: collect children into the current line until it is full
        let mut items_on_line = 0usize;
        let mut size_consumed_on_current_line = 0.0f32;
        let mut total_flex_grow_factors = 0.0f32;
        let mut total_flex_shrink_scaled_factors = 0.0f32;
        let mut relative_children: SmallVec<[NodeId; 16]> = SmallVec::new();

        let mut index = start_of_line_index;
        while index < child_count {
            let child = children[index];
            tree.node_mut(child).line_index = line_count;
            let child_style = *tree.style(child);

            if child_style.position_type != PositionType::Absolute {
                let child_flex_basis =
                    tree.node(child).layout.computed_flex_basis.unwrap_or(0.0);
                let outer_flex_basis = child_flex_basis + child_style.margin_axis(main_axis);

                // Wrapping: close the line when this item would not fit
                // and the line already holds something.
                if is_node_flex_wrap
                    && items_on_line > 0
                    && available_inner_main_dim.is_some_and(|available| {
                        size_consumed_on_current_line + outer_flex_basis > available
                    })
                {
                    break;
                }

                size_consumed_on_current_line += outer_flex_basis;
                items_on_line += 1;

                if child_style.is_flex() {
                    total_flex_grow_factors += child_style.resolved_flex_grow();
                    // Unlike the grow factor, the shrink factor is scaled
                    // relative to the child dimension.
                    total_flex_shrink_scaled_factors +=
                        -child_style.resolved_flex_shrink() * child_flex_basis;
                }

                relative_children.push(child);
            }

            index += 1;
        }
        end_of_line_index = index;

        // If the cross size is imposed and no layout is requested, the
        // flex step cannot influence the result.
        let can_skip_flex = !perform_layout && measure_mode_cross_dim == MeasureMode::Exactly;

        // STEP 5: resolve flexible lengths on the main axis.
        // With an indefinite main size the node is sized by its content
        // and there is no free space to distribute.
        let mut remaining_free_space = 0.0f32;
        if let Some(available) = available_inner_main_dim {
            remaining_free_space = available - size_consumed_on_current_line;
        } else if size_consumed_on_current_line < 0.0 {
            remaining_free_space = -size_consumed_on_current_line;
        }

        let original_remaining_free_space = remaining_free_space;
        let mut delta_free_space = 0.0f32;

        if !can_skip_flex {
            // Two passes resolve min/max constraints in constant depth:
            // the first detects items whose bounds trigger under the naive
            // distribution and removes their share from the totals, the
            // second distributes the adjusted remainder. Items frozen in
            // pass one re-trigger their bounds in pass two and land on
            // identical sizes.
            let mut delta_flex_shrink_scaled_factors = 0.0f32;
            let mut delta_flex_grow_factors = 0.0f32;

            for &child in &relative_children {
                let child_style = *tree.style(child);
                let child_flex_basis =
                    tree.node(child).layout.computed_flex_basis.unwrap_or(0.0);

                if remaining_free_space < 0.0 {
                    let flex_shrink_scaled_factor =
                        -child_style.resolved_flex_shrink() * child_flex_basis;
                    if flex_shrink_scaled_factor != 0.0 {
                        let base_main_size = child_flex_basis
                            + remaining_free_space / total_flex_shrink_scaled_factors
                                * flex_shrink_scaled_factor;
                        let bound_main_size = bound_axis(&child_style, main_axis, base_main_size);
                        if base_main_size != bound_main_size {
                            delta_free_space -= bound_main_size - child_flex_basis;
                            delta_flex_shrink_scaled_factors -= flex_shrink_scaled_factor;
                        }
                    }
                } else if remaining_free_space > 0.0 {
                    let flex_grow_factor = child_style.resolved_flex_grow();
                    if flex_grow_factor != 0.0 {
                        let base_main_size = child_flex_basis
                            + remaining_free_space / total_flex_grow_factors * flex_grow_factor;
                        let bound_main_size = bound_axis(&child_style, main_axis, base_main_size);
                        if base_main_size != bound_main_size {
                            delta_free_space -= bound_main_size - child_flex_basis;
                            delta_flex_grow_factors -= flex_grow_factor;
                        }
                    }
                }
            }

            total_flex_shrink_scaled_factors += delta_flex_shrink_scaled_factors;
            total_flex_grow_factors += delta_flex_grow_factors;
            remaining_free_space += delta_free_space;

            // Second pass: fix the main size of every flexible item and
            // lay it out (or measure it) under that size.
            delta_free_space = 0.0;
            for &child in &relative_children {
                let child_style = *tree.style(child);
                let child_flex_basis =
                    tree.node(child).layout.computed_flex_basis.unwrap_or(0.0);
                let mut updated_main_size = child_flex_basis;

                if remaining_free_space < 0.0 {
                    let flex_shrink_scaled_factor =
                        -child_style.resolved_flex_shrink() * child_flex_basis;
                    if flex_shrink_scaled_factor != 0.0 {
                        let child_size = if total_flex_shrink_scaled_factors == 0.0 {
                            child_flex_basis + flex_shrink_scaled_factor
                        } else {
                            child_flex_basis
                                + remaining_free_space / total_flex_shrink_scaled_factors
                                    * flex_shrink_scaled_factor
                        };
                        updated_main_size = bound_axis(&child_style, main_axis, child_size);
                    }
                } else if remaining_free_space > 0.0 {
                    let flex_grow_factor = child_style.resolved_flex_grow();
                    if flex_grow_factor != 0.0 {
                        updated_main_size = bound_axis(
                            &child_style,
                            main_axis,
                            child_flex_basis
                                + remaining_free_space / total_flex_grow_factors
                                    * flex_grow_factor,
                        );
                    }
                }

                delta_free_space -= updated_main_size - child_flex_basis;

                let margin_row = child_style.margin_axis(FlexDirection::Row);
                let margin_column = child_style.margin_axis(FlexDirection::Column);

                let mut child_width: Option<f32>;
                let mut child_height: Option<f32>;
                let mut child_width_mode: MeasureMode;
                let mut child_height_mode: MeasureMode;

                if is_main_axis_row {
                    child_width = Some(updated_main_size + margin_row);
                    child_width_mode = MeasureMode::Exactly;

                    if available_inner_cross_dim.is_some()
                        && !child_style.is_dimension_defined(FlexDirection::Column)
                        && height_mode == MeasureMode::Exactly
                        && align_item(&style, &child_style) == Align::Stretch
                    {
                        child_height = available_inner_cross_dim;
                        child_height_mode = MeasureMode::Exactly;
                    } else if !child_style.is_dimension_defined(FlexDirection::Column) {
                        child_height = available_inner_cross_dim;
                        child_height_mode = if child_height.is_none() {
                            MeasureMode::Undefined
                        } else {
                            MeasureMode::AtMost
                        };
                    } else {
                        child_height = child_style
                            .dimension(Dimension::Height)
                            .map(|value| value + margin_column);
                        child_height_mode = MeasureMode::Exactly;
                    }
                } else {
                    child_height = Some(updated_main_size + margin_column);
                    child_height_mode = MeasureMode::Exactly;

                    if available_inner_cross_dim.is_some()
                        && !child_style.is_dimension_defined(FlexDirection::Row)
                        && width_mode == MeasureMode::Exactly
                        && align_item(&style, &child_style) == Align::Stretch
                    {
                        child_width = available_inner_cross_dim;
                        child_width_mode = MeasureMode::Exactly;
                    } else if !child_style.is_dimension_defined(FlexDirection::Row) {
                        child_width = available_inner_cross_dim;
                        child_width_mode = if child_width.is_none() {
                            MeasureMode::Undefined
                        } else {
                            MeasureMode::AtMost
                        };
                    } else {
                        child_width = child_style
                            .dimension(Dimension::Width)
                            .map(|value| value + margin_row);
                        child_width_mode = MeasureMode::Exactly;
                    }
                }

                if let Some(ratio) = child_style.aspect_ratio {
                    if is_main_axis_row && child_height_mode != MeasureMode::Exactly {
                        child_height = Some((child_width.unwrap_or(0.0) * ratio).max(
                            child_style.padding_and_border_axis(FlexDirection::Column),
                        ));
                        child_height_mode = MeasureMode::Exactly;
                    } else if !is_main_axis_row && child_width_mode != MeasureMode::Exactly {
                        child_width = Some((child_height.unwrap_or(0.0) * ratio).max(
                            child_style.padding_and_border_axis(FlexDirection::Row),
                        ));
                        child_width_mode = MeasureMode::Exactly;
                    }
                }

                constrain_max_size_for_mode(
                    child_style.max_dimension(Dimension::Width),
                    &mut child_width_mode,
                    &mut child_width,
                );
                constrain_max_size_for_mode(
                    child_style.max_dimension(Dimension::Height),
                    &mut child_height_mode,
                    &mut child_height,
                );

                // Stretch-aligned children without a definite cross size
                // are finalized by the stretch pass; their layout here
                // would be thrown away.
                let requires_stretch_layout = !child_style.is_dimension_defined(cross)
                    && align_item(&style, &child_style) == Align::Stretch;

                layout_node_internal(
                    tree,
                    child,
                    child_width,
                    child_height,
                    direction,
                    child_width_mode,
                    child_height_mode,
                    perform_layout && !requires_stretch_layout,
                    "flex",
                    depth + 1,
                );
            }
        }

        remaining_free_space = original_remaining_free_space + delta_free_space;

        // STEP 6: main axis justification and cross size determination.
        // Under an at-most main size, leftover space only exists down to
        // the container's own minimum.
        if measure_mode_main_dim == MeasureMode::AtMost && remaining_free_space > 0.0 {
            let min_main = style.min_dimension(axis_dimension(main_axis));
            remaining_free_space = match min_main {
                Some(min) if min >= 0.0 => {
                    (min - (available_inner_main_dim.unwrap_or(0.0) - remaining_free_space))
                        .max(0.0)
                }
                _ => 0.0,
            };
        }

        let mut leading_main_dim = 0.0f32;
        let mut between_main_dim = 0.0f32;
        match justify_content {
            Justify::Center => leading_main_dim = remaining_free_space / 2.0,
            Justify::FlexEnd => leading_main_dim = remaining_free_space,
            Justify::SpaceBetween => {
                if items_on_line > 1 {
                    between_main_dim =
                        remaining_free_space.max(0.0) / (items_on_line - 1) as f32;
                }
            }
            Justify::SpaceAround => {
                // Space on the edges is half of the space between items.
                between_main_dim = remaining_free_space / items_on_line as f32;
                leading_main_dim = between_main_dim / 2.0;
            }
            Justify::FlexStart => {}
        }

        let mut main_dim = leading_padding_and_border_main + leading_main_dim;
        let mut cross_dim = 0.0f32;

        for i in start_of_line_index..end_of_line_index {
            let child = children[i];
            let child_style = *tree.style(child);

            if child_style.position_type == PositionType::Absolute
                && child_style.is_leading_position_defined(main_axis)
            {
                if perform_layout {
                    // An absolute child with a leading inset sits exactly
                    // where the inset says, inside the border.
                    tree.node_mut(child).layout.position[position_edge(main_axis).index()] =
                        child_style.leading_position(main_axis)
                            + style.leading_border(main_axis)
                            + child_style.leading_margin(main_axis);
                }
            } else if child_style.position_type == PositionType::Relative {
                if perform_layout {
                    tree.node_mut(child).layout.position[position_edge(main_axis).index()] +=
                        main_dim;
                }

                if can_skip_flex {
                    // The flex step was skipped, so measured dimensions
                    // are stale; advance by the flex basis instead.
                    main_dim += between_main_dim
                        + child_style.margin_axis(main_axis)
                        + tree.node(child).layout.computed_flex_basis.unwrap_or(0.0);
                    cross_dim = available_inner_cross_dim.unwrap_or(0.0);
                } else {
                    main_dim += between_main_dim + dim_with_margin(tree, child, main_axis);
                    // There is only one element per cross slot; the line's
                    // cross size is the biggest outer child.
                    cross_dim = cross_dim.max(dim_with_margin(tree, child, cross));
                }
            } else if perform_layout {
                tree.node_mut(child).layout.position[position_edge(main_axis).index()] +=
                    style.leading_border(main_axis) + leading_main_dim;
            }
        }

        main_dim += trailing_padding_and_border_main;

        let mut container_cross_axis = available_inner_cross_dim.unwrap_or(0.0);
        if measure_mode_cross_dim == MeasureMode::Undefined
            || measure_mode_cross_dim == MeasureMode::AtMost
        {
            // Derive the container cross size from the children.
            container_cross_axis =
                bound_axis(&style, cross, cross_dim + padding_and_border_axis_cross)
                    - padding_and_border_axis_cross;
            if measure_mode_cross_dim == MeasureMode::AtMost {
                container_cross_axis =
                    container_cross_axis.min(available_inner_cross_dim.unwrap_or(0.0));
            }
        }

        // Without wrapping, an imposed cross size defines the line.
        if !is_node_flex_wrap && measure_mode_cross_dim == MeasureMode::Exactly {
            cross_dim = available_inner_cross_dim.unwrap_or(0.0);
        }

        cross_dim = bound_axis(&style, cross, cross_dim + padding_and_border_axis_cross)
            - padding_and_border_axis_cross;

        // STEP 7: cross axis alignment within the line. Pure measurement
        // passes skip it.
        if perform_layout {
            for i in start_of_line_index..end_of_line_index {
                let child = children[i];
                let child_style = *tree.style(child);

                if child_style.position_type == PositionType::Absolute {
                    let value = if child_style.is_leading_position_defined(cross) {
                        child_style.leading_position(cross)
                            + style.leading_border(cross)
                            + child_style.leading_margin(cross)
                    } else {
                        style.leading_border(cross) + child_style.leading_margin(cross)
                    };
                    tree.node_mut(child).layout.position[position_edge(cross).index()] = value;
                } else {
                    let mut leading_cross_dim = leading_padding_and_border_cross;
                    let align = align_item(&style, &child_style);

                    if align == Align::Stretch {
                        // Stretched children get one more layout with the
                        // line's cross size imposed.
                        let is_cross_size_definite = if is_main_axis_row {
                            child_style.is_dimension_defined(FlexDirection::Column)
                        } else {
                            child_style.is_dimension_defined(FlexDirection::Row)
                        };

                        let mut child_width: Option<f32>;
                        let mut child_height: Option<f32>;
                        let mut child_width_mode = MeasureMode::Exactly;
                        let mut child_height_mode = MeasureMode::Exactly;

                        if is_main_axis_row {
                            child_height = Some(cross_dim);
                            child_width = Some(
                                tree.node(child).layout.measured_dimensions
                                    [Dimension::Width.index()]
                                    + child_style.margin_axis(FlexDirection::Row),
                            );
                        } else {
                            child_width = Some(cross_dim);
                            child_height = Some(
                                tree.node(child).layout.measured_dimensions
                                    [Dimension::Height.index()]
                                    + child_style.margin_axis(FlexDirection::Column),
                            );
                        }

                        constrain_max_size_for_mode(
                            child_style.max_dimension(Dimension::Width),
                            &mut child_width_mode,
                            &mut child_width,
                        );
                        constrain_max_size_for_mode(
                            child_style.max_dimension(Dimension::Height),
                            &mut child_height_mode,
                            &mut child_height,
                        );

                        if !is_cross_size_definite {
                            child_width_mode = if child_width.is_none() {
                                MeasureMode::Undefined
                            } else {
                                MeasureMode::Exactly
                            };
                            child_height_mode = if child_height.is_none() {
                                MeasureMode::Undefined
                            } else {
                                MeasureMode::Exactly
                            };

                            layout_node_internal(
                                tree,
                                child,
                                child_width,
                                child_height,
                                direction,
                                child_width_mode,
                                child_height_mode,
                                true,
                                "stretch",
                                depth + 1,
                            );
                        }
                    } else if align != Align::FlexStart {
                        let remaining_cross_dim =
                            container_cross_axis - dim_with_margin(tree, child, cross);
                        if align == Align::Center {
                            leading_cross_dim += remaining_cross_dim / 2.0;
                        } else {
                            leading_cross_dim += remaining_cross_dim;
                        }
                    }

                    tree.node_mut(child).layout.position[position_edge(cross).index()] +=
                        total_line_cross_dim + leading_cross_dim;
                }
            }
        }

        total_line_cross_dim += cross_dim;
        max_line_main_dim = max_line_main_dim.max(main_dim);

        line_count += 1;
        start_of_line_index = end_of_line_index;
    }

    // STEP 8: multi-line content alignment
    if line_count > 1
        && perform_layout
        && let Some(available_inner_cross) = available_inner_cross_dim
    {
        let remaining_align_content_dim = available_inner_cross - total_line_cross_dim;

        let mut cross_dim_lead = 0.0f32;
        let mut current_lead = leading_padding_and_border_cross;

        match style.align_content {
            Align::FlexEnd => current_lead += remaining_align_content_dim,
            Align::Center => current_lead += remaining_align_content_dim / 2.0,
            Align::Stretch => {
                if available_inner_cross > total_line_cross_dim {
                    cross_dim_lead = remaining_align_content_dim / line_count as f32;
                }
            }
            Align::Auto | Align::FlexStart => {}
        }

        let mut end_index = 0usize;
        for line in 0..line_count {
            let start_index = end_index;

            // The line's height is the tallest outer child on it.
            let mut line_height = 0.0f32;
            let mut ii = start_index;
            while ii < child_count {
                let child = children[ii];
                if tree.style(child).position_type == PositionType::Relative {
                    if tree.node(child).line_index != line {
                        break;
                    }
                    if is_layout_dim_defined(tree, child, cross) {
                        line_height = line_height.max(dim_with_margin(tree, child, cross));
                    }
                }
                ii += 1;
            }
            end_index = ii;
            line_height += cross_dim_lead;

            for ii in start_index..end_index {
                let child = children[ii];
                let child_style = *tree.style(child);
                if child_style.position_type != PositionType::Relative {
                    continue;
                }
                let measured_cross =
                    tree.node(child).layout.measured_dimensions[axis_dimension(cross).index()];
                let position = match align_item(&style, &child_style) {
                    Align::FlexStart => current_lead + child_style.leading_margin(cross),
                    Align::Stretch => {
                        // TODO: also finalize the cross size of items
                        // whose cross dimension is indefinite.
                        current_lead + child_style.leading_margin(cross)
                    }
                    Align::FlexEnd => {
                        current_lead + line_height
                            - child_style.trailing_margin(cross)
                            - measured_cross
                    }
                    Align::Center => current_lead + (line_height - measured_cross) / 2.0,
                    Align::Auto => continue,
                };
                tree.node_mut(child).layout.position[position_edge(cross).index()] = position;
            }

            current_lead += line_height;
        }
    }

    // STEP 9: final dimensions
    let measured_width = match available_width {
        Some(width) => bound_axis(&style, FlexDirection::Row, width - margin_axis_row),
        None => padding_and_border_axis_row,
    };
    let measured_height = match available_height {
        Some(height) => bound_axis(&style, FlexDirection::Column, height - margin_axis_column),
        None => padding_and_border_axis_column,
    };
    let mut measured = [measured_width, measured_height];

    // An unconstrained or at-most main size is derived from the content.
    match measure_mode_main_dim {
        MeasureMode::Undefined => {
            measured[axis_dimension(main_axis).index()] =
                bound_axis(&style, main_axis, max_line_main_dim);
        }
        MeasureMode::AtMost => {
            measured[axis_dimension(main_axis).index()] =
                (available_inner_main_dim.unwrap_or(0.0) + padding_and_border_axis_main)
                    .min(bound_axis_within_min_and_max(
                        &style,
                        main_axis,
                        max_line_main_dim,
                    ))
                    .max(padding_and_border_axis_main);
        }
        MeasureMode::Exactly => {}
    }

    match measure_mode_cross_dim {
        MeasureMode::Undefined => {
            measured[axis_dimension(cross).index()] = bound_axis(
                &style,
                cross,
                total_line_cross_dim + padding_and_border_axis_cross,
            );
        }
        MeasureMode::AtMost => {
            measured[axis_dimension(cross).index()] =
                (available_inner_cross_dim.unwrap_or(0.0) + padding_and_border_axis_cross)
                    .min(bound_axis_within_min_and_max(
                        &style,
                        cross,
                        total_line_cross_dim + padding_and_border_axis_cross,
                    ))
                    .max(padding_and_border_axis_cross);
        }
        MeasureMode::Exactly => {}
    }

    tree.node_mut(node).layout.measured_dimensions = measured;

    if perform_layout {
        // STEP 10: absolutely positioned children
        for &child in &absolute_children {
            absolute_layout_child(
                tree,
                node,
                child,
                available_inner_width,
                width_mode,
                direction,
                depth,
            );
        }

        // STEP 11: trailing positions for reversed axes
        let needs_main_trailing_pos = main_axis.is_reverse();
        let needs_cross_trailing_pos = cross.is_reverse();

        if needs_main_trailing_pos || needs_cross_trailing_pos {
            for &child in &children {
                if needs_main_trailing_pos {
                    set_trailing_position(tree, node, child, main_axis);
                }
                if needs_cross_trailing_pos {
                    set_trailing_position(tree, node, child, cross);
                }
            }
        }
    }
}
