//! Style-side value domain of the flexbox engine: the enum vocabulary,
//! optional-scalar helpers, per-edge tables with shorthand expansion, the
//! resolved style accessors and the size-clamping helpers. Everything here
//! is a pure function over plain data; tree state and caching live in the
//! engine crate.

mod axis;
mod bounds;
mod edges;
mod style;
mod types;
mod value;

pub use axis::{
    axis_dimension, cross_axis, leading_edge, position_edge, resolve_axis, trailing_edge,
};
pub use bounds::{bound_axis, bound_axis_within_min_and_max, constrain_max_size_for_mode};
pub use edges::EdgeValues;
pub use style::{Style, align_item};
pub use types::{
    Align, Dimension, Direction, Edge, FlexDirection, Justify, MeasureMode, Overflow,
    PositionType, Wrap,
};
pub use value::{EPSILON, all_four_equal, approx_eq, approx_eq_f32};
