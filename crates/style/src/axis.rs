//! Axis resolution: mapping logical main/cross axes and leading/trailing
//! edges onto physical edges under a flex direction and an inline direction.
//!
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>

use crate::types::{Dimension, Direction, Edge, FlexDirection};

/// Resolve a styled flex direction against the inline direction. RTL flips
/// the two row directions and leaves columns untouched.
#[inline]
pub const fn resolve_axis(flex_direction: FlexDirection, direction: Direction) -> FlexDirection {
    if matches!(direction, Direction::Rtl) {
        match flex_direction {
            FlexDirection::Row => return FlexDirection::RowReverse,
            FlexDirection::RowReverse => return FlexDirection::Row,
            FlexDirection::Column | FlexDirection::ColumnReverse => {}
        }
    }
    flex_direction
}

/// The axis perpendicular to a resolved main axis. The cross axis of a
/// column is a row and therefore direction-sensitive.
#[inline]
pub const fn cross_axis(main_axis: FlexDirection, direction: Direction) -> FlexDirection {
    if main_axis.is_column() {
        resolve_axis(FlexDirection::Row, direction)
    } else {
        FlexDirection::Column
    }
}

/// The physical edge where an axis starts laying out content.
#[inline]
pub const fn leading_edge(axis: FlexDirection) -> Edge {
    match axis {
        FlexDirection::Column => Edge::Top,
        FlexDirection::ColumnReverse => Edge::Bottom,
        FlexDirection::Row => Edge::Left,
        FlexDirection::RowReverse => Edge::Right,
    }
}

/// The physical edge opposite [`leading_edge`].
#[inline]
pub const fn trailing_edge(axis: FlexDirection) -> Edge {
    match axis {
        FlexDirection::Column => Edge::Bottom,
        FlexDirection::ColumnReverse => Edge::Top,
        FlexDirection::Row => Edge::Right,
        FlexDirection::RowReverse => Edge::Left,
    }
}

/// The physical edge a layout position along this axis is written to.
#[inline]
pub const fn position_edge(axis: FlexDirection) -> Edge {
    match axis {
        FlexDirection::Column => Edge::Top,
        FlexDirection::ColumnReverse => Edge::Bottom,
        FlexDirection::Row => Edge::Left,
        FlexDirection::RowReverse => Edge::Right,
    }
}

/// The dimension measured along an axis.
#[inline]
pub const fn axis_dimension(axis: FlexDirection) -> Dimension {
    if axis.is_row() {
        Dimension::Width
    } else {
        Dimension::Height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtl_flips_rows_only() {
        assert_eq!(
            resolve_axis(FlexDirection::Row, Direction::Rtl),
            FlexDirection::RowReverse
        );
        assert_eq!(
            resolve_axis(FlexDirection::RowReverse, Direction::Rtl),
            FlexDirection::Row
        );
        assert_eq!(
            resolve_axis(FlexDirection::Column, Direction::Rtl),
            FlexDirection::Column
        );
        assert_eq!(
            resolve_axis(FlexDirection::Row, Direction::Ltr),
            FlexDirection::Row
        );
    }

    #[test]
    fn cross_of_a_column_is_a_direction_sensitive_row() {
        assert_eq!(
            cross_axis(FlexDirection::Column, Direction::Ltr),
            FlexDirection::Row
        );
        assert_eq!(
            cross_axis(FlexDirection::Column, Direction::Rtl),
            FlexDirection::RowReverse
        );
        assert_eq!(
            cross_axis(FlexDirection::Row, Direction::Rtl),
            FlexDirection::Column
        );
    }

    #[test]
    fn edge_tables_are_opposites() {
        for axis in [
            FlexDirection::Column,
            FlexDirection::ColumnReverse,
            FlexDirection::Row,
            FlexDirection::RowReverse,
        ] {
            assert_ne!(leading_edge(axis), trailing_edge(axis));
            assert_eq!(leading_edge(axis), position_edge(axis));
        }
        assert_eq!(axis_dimension(FlexDirection::RowReverse), Dimension::Width);
        assert_eq!(axis_dimension(FlexDirection::Column), Dimension::Height);
    }
}
