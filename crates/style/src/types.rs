//! Enum vocabulary shared by the style layer and the layout engine.
//! Spec: <https://www.w3.org/TR/css-flexbox-1/#box-model>

/// Inline (text) direction used to resolve row axes and start/end edges.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Take the direction from the parent; the root defaults to LTR.
    Inherit,
    Ltr,
    Rtl,
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-direction-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FlexDirection {
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

impl FlexDirection {
    /// True for `Row` and `RowReverse`.
    #[inline]
    pub const fn is_row(self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// True for `Column` and `ColumnReverse`.
    #[inline]
    pub const fn is_column(self) -> bool {
        matches!(self, Self::Column | Self::ColumnReverse)
    }

    /// True when the axis runs against the physical left/top order.
    #[inline]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::ColumnReverse | Self::RowReverse)
    }
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#justify-content-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Justify {
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
}

/// Alignment values for `align-items`, `align-self` and `align-content`.
/// `Auto` is only meaningful on `align-self`, where it defers to the
/// container's `align-items`.
///
/// Spec: <https://www.w3.org/TR/css-flexbox-1/#align-items-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Align {
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    Stretch,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PositionType {
    Relative,
    Absolute,
}

/// Spec: <https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property>
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Wrap {
    NoWrap,
    Wrap,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Overflow {
    Visible,
    Hidden,
    Scroll,
}

/// Sizing constraint attached to one axis of a measurement request.
///
/// These map onto the CSS sizing terms
/// (<https://www.w3.org/TR/css3-sizing/#terms>): `Undefined` is max-content,
/// `Exactly` is fill-available and `AtMost` is fit-content.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MeasureMode {
    Undefined,
    Exactly,
    AtMost,
}

/// Physical and logical box edges. Only the first six can hold a resolved
/// value; `Horizontal`, `Vertical` and `All` are write-only shorthands
/// expanded by [`crate::EdgeValues::computed`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
    Start,
    End,
    Horizontal,
    Vertical,
    All,
}

impl Edge {
    pub(crate) const COUNT: usize = 9;

    /// Slot index for edge-indexed tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    /// Slot index for dimension-indexed tables.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
