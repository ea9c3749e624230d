//! Engine-level feature toggles.

use bitflags::bitflags;

bitflags! {
    /// Experimental behaviors a host can opt into per tree. These gate
    /// changes that alter observable geometry, so they default to off.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
    pub struct ExperimentalFeatures: u8 {
        /// Snap computed positions and sizes to the integer pixel grid
        /// after layout, preserving sub-pixel extents.
        const ROUNDING = 1 << 0;
        /// Re-resolve a definite flex basis on every generation instead of
        /// only when the cached basis is missing.
        const WEB_FLEX_BASIS = 1 << 1;
    }
}
