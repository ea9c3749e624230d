//! Fast paths that resolve a node's measured size without running the
//! flex algorithm: measure-function leaves, childless containers, and
//! measurement-only requests that are already fully constrained.

use flex_style::{FlexDirection, MeasureMode, bound_axis};

use crate::tree::{LayoutTree, NodeId, Size, contract};

/// Size a leaf through its measure callback. Fully constrained requests
/// and degenerate inner sizes skip the callback entirely.
pub(crate) fn set_measured_dimensions_for_measure_leaf(
    tree: &mut LayoutTree,
    node: NodeId,
    available_width: Option<f32>,
    available_height: Option<f32>,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
) {
    contract(
        tree.node(node).measure.is_some(),
        "expected node to have a custom measure function",
    );
    let style = *tree.style(node);

    let padding_and_border_row = style.padding_and_border_axis(FlexDirection::Row);
    let padding_and_border_column = style.padding_and_border_axis(FlexDirection::Column);
    let margin_row = style.margin_axis(FlexDirection::Row);
    let margin_column = style.margin_axis(FlexDirection::Column);

    let inner_width = available_width.map(|width| width - margin_row - padding_and_border_row);
    let inner_height =
        available_height.map(|height| height - margin_column - padding_and_border_column);

    let measured = if width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly {
        // Both sizes are imposed; the content measurement cannot change them.
        [
            bound_axis(
                &style,
                FlexDirection::Row,
                available_width.unwrap_or(0.0) - margin_row,
            ),
            bound_axis(
                &style,
                FlexDirection::Column,
                available_height.unwrap_or(0.0) - margin_column,
            ),
        ]
    } else if inner_width.is_some_and(|width| width <= 0.0)
        || inner_height.is_some_and(|height| height <= 0.0)
    {
        // No space to lay content into.
        [
            bound_axis(&style, FlexDirection::Row, 0.0),
            bound_axis(&style, FlexDirection::Column, 0.0),
        ]
    } else {
        let content: Size = tree
            .node(node)
            .measure
            .as_ref()
            .map(|measure| measure(inner_width, width_mode, inner_height, height_mode))
            .unwrap_or_default();

        let width = match width_mode {
            MeasureMode::Undefined | MeasureMode::AtMost => {
                content.width + padding_and_border_row
            }
            MeasureMode::Exactly => available_width.unwrap_or(0.0) - margin_row,
        };
        let height = match height_mode {
            MeasureMode::Undefined | MeasureMode::AtMost => {
                content.height + padding_and_border_column
            }
            MeasureMode::Exactly => available_height.unwrap_or(0.0) - margin_column,
        };
        [
            bound_axis(&style, FlexDirection::Row, width),
            bound_axis(&style, FlexDirection::Column, height),
        ]
    };

    tree.node_mut(node).layout.measured_dimensions = measured;
}

/// Size a container with no children: the available size when imposed,
/// otherwise the padding and border floor.
pub(crate) fn set_measured_dimensions_for_empty_container(
    tree: &mut LayoutTree,
    node: NodeId,
    available_width: Option<f32>,
    available_height: Option<f32>,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
) {
    let style = *tree.style(node);
    let width = match width_mode {
        MeasureMode::Undefined | MeasureMode::AtMost => {
            style.padding_and_border_axis(FlexDirection::Row)
        }
        MeasureMode::Exactly => {
            available_width.unwrap_or(0.0) - style.margin_axis(FlexDirection::Row)
        }
    };
    let height = match height_mode {
        MeasureMode::Undefined | MeasureMode::AtMost => {
            style.padding_and_border_axis(FlexDirection::Column)
        }
        MeasureMode::Exactly => {
            available_height.unwrap_or(0.0) - style.margin_axis(FlexDirection::Column)
        }
    };

    tree.node_mut(node).layout.measured_dimensions = [
        bound_axis(&style, FlexDirection::Row, width),
        bound_axis(&style, FlexDirection::Column, height),
    ];
}

/// Measurement-only short circuit: with both axes exact, or an at-most
/// axis with no space, the answer does not depend on the children.
/// Returns false when the full algorithm is needed.
pub(crate) fn set_measured_dimensions_if_empty_or_fixed_size(
    tree: &mut LayoutTree,
    node: NodeId,
    available_width: Option<f32>,
    available_height: Option<f32>,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
) -> bool {
    let exhausted_width =
        width_mode == MeasureMode::AtMost && available_width.is_some_and(|width| width <= 0.0);
    let exhausted_height =
        height_mode == MeasureMode::AtMost && available_height.is_some_and(|height| height <= 0.0);
    let fully_constrained =
        width_mode == MeasureMode::Exactly && height_mode == MeasureMode::Exactly;

    if !(exhausted_width || exhausted_height || fully_constrained) {
        return false;
    }

    let style = *tree.style(node);
    let width = match available_width {
        Some(width) if !(width_mode == MeasureMode::AtMost && width < 0.0) => {
            width - style.margin_axis(FlexDirection::Row)
        }
        _ => 0.0,
    };
    let height = match available_height {
        Some(height) if !(height_mode == MeasureMode::AtMost && height < 0.0) => {
            height - style.margin_axis(FlexDirection::Column)
        }
        _ => 0.0,
    };

    tree.node_mut(node).layout.measured_dimensions = [
        bound_axis(&style, FlexDirection::Row, width),
        bound_axis(&style, FlexDirection::Column, height),
    ];
    true
}
