//! Pre-measurement of flex items: every relative child gets a computed
//! flex basis before lines are formed and free space is distributed.

use flex_style::{
    Align, Dimension, Direction, FlexDirection, MeasureMode, Overflow, align_item, axis_dimension,
    constrain_max_size_for_mode, resolve_axis,
};

use crate::config::ExperimentalFeatures;
use crate::layout::layout_node_internal;
use crate::tree::{LayoutTree, NodeId};

/// Resolve `child.computed_flex_basis` under the parent's available inner
/// size, measuring the child when nothing cheaper applies. Stamps the
/// basis with the current generation.
#[allow(clippy::too_many_arguments)]
pub(crate) fn compute_child_flex_basis(
    tree: &mut LayoutTree,
    node: NodeId,
    child: NodeId,
    width: Option<f32>,
    width_mode: MeasureMode,
    height: Option<f32>,
    height_mode: MeasureMode,
    direction: Direction,
    depth: usize,
) {
    let parent_style = *tree.style(node);
    let child_style = *tree.style(child);
    let main_axis = resolve_axis(parent_style.flex_direction, direction);
    let is_main_axis_row = main_axis.is_row();

    let is_row_dim_defined = child_style.is_dimension_defined(FlexDirection::Row);
    let is_column_dim_defined = child_style.is_dimension_defined(FlexDirection::Column);

    let resolved_basis = child_style.resolved_flex_basis();
    let main_axis_size = if is_main_axis_row { width } else { height };

    if let Some(basis) = resolved_basis
        && main_axis_size.is_some()
    {
        let stale = tree.node(child).layout.computed_flex_basis.is_none()
            || (tree
                .features()
                .contains(ExperimentalFeatures::WEB_FLEX_BASIS)
                && tree.node(child).layout.computed_flex_basis_generation != tree.generation);
        if stale {
            tree.node_mut(child).layout.computed_flex_basis =
                Some(basis.max(child_style.padding_and_border_axis(main_axis)));
        }
    } else if is_main_axis_row && is_row_dim_defined {
        // The width is definite, so use that as the flex basis.
        let width_dim = child_style.dimension(Dimension::Width).unwrap_or(0.0);
        tree.node_mut(child).layout.computed_flex_basis =
            Some(width_dim.max(child_style.padding_and_border_axis(FlexDirection::Row)));
    } else if !is_main_axis_row && is_column_dim_defined {
        // The height is definite, so use that as the flex basis.
        let height_dim = child_style.dimension(Dimension::Height).unwrap_or(0.0);
        tree.node_mut(child).layout.computed_flex_basis =
            Some(height_dim.max(child_style.padding_and_border_axis(FlexDirection::Column)));
    } else {
        // Measure the child to get the hypothetical main size.
        let mut child_width: Option<f32> = None;
        let mut child_height: Option<f32> = None;
        let mut child_width_mode = MeasureMode::Undefined;
        let mut child_height_mode = MeasureMode::Undefined;

        if is_row_dim_defined {
            child_width = child_style
                .dimension(Dimension::Width)
                .map(|value| value + child_style.margin_axis(FlexDirection::Row));
            child_width_mode = MeasureMode::Exactly;
        }
        if is_column_dim_defined {
            child_height = child_style
                .dimension(Dimension::Height)
                .map(|value| value + child_style.margin_axis(FlexDirection::Column));
            child_height_mode = MeasureMode::Exactly;
        }

        // Cap undefined child sizes to the available inner size, unless
        // the container scrolls along that axis. Browsers agree on this
        // even though the CSS specification is silent about overflow here.
        if (!is_main_axis_row && parent_style.overflow == Overflow::Scroll)
            || parent_style.overflow != Overflow::Scroll
        {
            if child_width.is_none() && width.is_some() {
                child_width = width;
                child_width_mode = MeasureMode::AtMost;
            }
        }
        if (is_main_axis_row && parent_style.overflow == Overflow::Scroll)
            || parent_style.overflow != Overflow::Scroll
        {
            if child_height.is_none() && height.is_some() {
                child_height = height;
                child_height_mode = MeasureMode::AtMost;
            }
        }

        // A stretch-aligned child with an exact parent cross size gets its
        // cross axis pinned before measuring.
        if !is_main_axis_row
            && width.is_some()
            && !is_row_dim_defined
            && width_mode == MeasureMode::Exactly
            && align_item(&parent_style, &child_style) == Align::Stretch
        {
            child_width = width;
            child_width_mode = MeasureMode::Exactly;
        }
        if is_main_axis_row
            && height.is_some()
            && !is_column_dim_defined
            && height_mode == MeasureMode::Exactly
            && align_item(&parent_style, &child_style) == Align::Stretch
        {
            child_height = height;
            child_height_mode = MeasureMode::Exactly;
        }

        // With an aspect ratio and one exact axis the basis follows
        // without a measurement call. The generation deliberately stays
        // unstamped on this path.
        if let Some(ratio) = child_style.aspect_ratio {
            if !is_main_axis_row && child_width_mode == MeasureMode::Exactly {
                tree.node_mut(child).layout.computed_flex_basis =
                    Some((child_width.unwrap_or(0.0) * ratio).max(
                        child_style.padding_and_border_axis(FlexDirection::Column),
                    ));
                return;
            } else if is_main_axis_row && child_height_mode == MeasureMode::Exactly {
                tree.node_mut(child).layout.computed_flex_basis =
                    Some((child_height.unwrap_or(0.0) * ratio).max(
                        child_style.padding_and_border_axis(FlexDirection::Row),
                    ));
                return;
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

        layout_node_internal(
            tree,
            child,
            child_width,
            child_height,
            direction,
            child_width_mode,
            child_height_mode,
            false,
            "measure",
            depth + 1,
        );

        let measured_main =
            tree.node(child).layout.measured_dimensions[axis_dimension(main_axis).index()];
        tree.node_mut(child).layout.computed_flex_basis =
            Some(measured_main.max(child_style.padding_and_border_axis(main_axis)));
    }

    let generation = tree.generation;
    tree.node_mut(child).layout.computed_flex_basis_generation = generation;
}
