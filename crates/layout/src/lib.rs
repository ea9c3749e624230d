//! A flexbox layout engine.
//!
//! Hosts build a tree of styled nodes in a [`LayoutTree`], call
//! [`LayoutTree::calculate_layout`] and read back per-node geometry. The
//! engine is a pure library: no I/O, no threads, no global state. Style
//! vocabulary (directions, alignment, measure modes) comes from the
//! `flex_style` crate.
//!
//! Re-layouts of unchanged subtrees are served from per-node measurement
//! caches; hosts only need to call [`LayoutTree::mark_dirty`] for
//! measure-function leaves whose intrinsic content changed, everything
//! else is tracked through style mutation.

mod cache;
mod config;
mod layout;
mod tree;

pub use config::ExperimentalFeatures;
pub use tree::{Layout, LayoutTree, MeasureFunc, NodeId, Size};
