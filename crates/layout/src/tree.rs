//! The node arena and tree operations.
//!
//! Nodes live in a slab owned by [`LayoutTree`] and are addressed by
//! copyable [`NodeId`] handles; the parent link is a non-owning back
//! reference used for dirty propagation. All mutation goes through the
//! tree so the engine can uphold its two structural invariants: a node
//! with a measure function has no children, and any style change dirties
//! the node and its ancestor chain.

use log::error;
use smallvec::SmallVec;

use flex_style::{Dimension, Direction, Edge, MeasureMode, Style};

use crate::cache::{CachedMeasurement, MAX_CACHED_MEASUREMENTS};
use crate::config::ExperimentalFeatures;

/// Width/height pair returned by measure callbacks.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Intrinsic measurement callback for leaf content (text, images, ...).
/// Receives the inner available size per axis together with the sizing
/// mode for that axis; per-node state travels in the closure's captures.
pub type MeasureFunc = Box<dyn Fn(Option<f32>, MeasureMode, Option<f32>, MeasureMode) -> Size>;

/// Handle to a node inside a [`LayoutTree`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Computed output of a layout pass, plus the per-node cache state that
/// lets later passes skip work.
#[derive(Debug)]
pub struct Layout {
    pub(crate) position: [f32; 4],
    pub(crate) dimensions: [f32; 2],
    pub(crate) measured_dimensions: [f32; 2],
    pub(crate) direction: Direction,

    pub(crate) computed_flex_basis: Option<f32>,
    pub(crate) computed_flex_basis_generation: u64,

    pub(crate) generation: u64,
    pub(crate) last_parent_direction: Option<Direction>,

    pub(crate) cached_layout: Option<CachedMeasurement>,
    pub(crate) cached_measurements: [Option<CachedMeasurement>; MAX_CACHED_MEASUREMENTS],
    pub(crate) next_cached_measurement_index: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            position: [0.0; 4],
            dimensions: [0.0; 2],
            measured_dimensions: [0.0; 2],
            direction: Direction::Inherit,
            computed_flex_basis: None,
            computed_flex_basis_generation: 0,
            generation: 0,
            last_parent_direction: None,
            cached_layout: None,
            cached_measurements: [None; MAX_CACHED_MEASUREMENTS],
            next_cached_measurement_index: 0,
        }
    }
}

impl Layout {
    #[inline]
    pub fn left(&self) -> f32 {
        self.position[Edge::Left.index()]
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position[Edge::Top.index()]
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position[Edge::Right.index()]
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position[Edge::Bottom.index()]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.dimensions[Dimension::Width.index()]
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.dimensions[Dimension::Height.index()]
    }

    /// The direction the node resolved to during its last layout.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn measured_width(&self) -> f32 {
        self.measured_dimensions[Dimension::Width.index()]
    }

    #[inline]
    pub fn measured_height(&self) -> f32 {
        self.measured_dimensions[Dimension::Height.index()]
    }
}

pub(crate) struct Node {
    pub(crate) style: Style,
    pub(crate) layout: Layout,
    pub(crate) line_index: usize,
    pub(crate) has_new_layout: bool,
    pub(crate) is_dirty: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) measure: Option<MeasureFunc>,
}

impl Node {
    fn new() -> Self {
        Self {
            style: Style::default(),
            layout: Layout::default(),
            line_index: 0,
            has_new_layout: true,
            is_dirty: false,
            parent: None,
            children: SmallVec::new(),
            measure: None,
        }
    }
}

/// Abort on a broken caller contract. These are programmer errors, not
/// runtime conditions, so there is no error-return channel: the message
/// goes to the error log and the process unwinds.
#[inline]
pub(crate) fn contract(condition: bool, message: &str) {
    if !condition {
        error!(target: "flex", "{message}");
    }
    assert!(condition, "{message}");
}

/// Owner of all nodes plus the per-tree state the layout pass needs: the
/// generation counter that ages cache entries and the experimental
/// feature set. Trees are independent; two trees never share state.
#[derive(Default)]
pub struct LayoutTree {
    slots: Vec<Option<Node>>,
    free: Vec<u32>,
    live: usize,
    pub(crate) generation: u64,
    features: ExperimentalFeatures,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes. Useful for leak hunting in hosts that manage
    /// node lifetimes manually.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.live
    }

    pub fn set_experimental_feature(&mut self, feature: ExperimentalFeatures, enabled: bool) {
        self.features.set(feature, enabled);
    }

    #[inline]
    pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeatures) -> bool {
        self.features.contains(feature)
    }

    #[inline]
    pub(crate) fn features(&self) -> ExperimentalFeatures {
        self.features
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.slots[id.index()]
            .as_ref()
            .expect("node handle does not refer to a live node")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.slots[id.index()]
            .as_mut()
            .expect("node handle does not refer to a live node")
    }

    /// Create a node with default style.
    pub fn new_node(&mut self) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            self.slots[index as usize] = Some(Node::new());
            return NodeId(index);
        }
        let index = self.slots.len() as u32;
        self.slots.push(Some(Node::new()));
        NodeId(index)
    }

    /// Reset a node back to its freshly created state. The node must be
    /// detached: no parent and no children.
    pub fn reset_node(&mut self, id: NodeId) {
        {
            let node = self.node(id);
            contract(
                node.children.is_empty(),
                "cannot reset a node which still has children attached",
            );
            contract(
                node.parent.is_none(),
                "cannot reset a node still attached to a parent",
            );
        }
        *self.node_mut(id) = Node::new();
    }

    /// Remove a node from the tree. The node is detached from its parent;
    /// its children are orphaned, not removed.
    pub fn remove_node(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            let parent_node = self.node_mut(parent);
            parent_node.children.retain(|child| *child != id);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.node_mut(child).parent = None;
        }
        self.slots[id.index()] = None;
        self.free.push(id.0);
        self.live -= 1;
    }

    /// Remove a node and its whole subtree.
    pub fn remove_subtree(&mut self, id: NodeId) {
        while let Some(&child) = self.node(id).children.first() {
            self.remove_child(id, child);
            self.remove_subtree(child);
        }
        self.remove_node(id);
    }

    /// Attach `child` under `parent` at `index`. The child must be
    /// detached and the parent must not carry a measure function.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        contract(
            self.node(child).parent.is_none(),
            "child already has a parent, it must be removed first",
        );
        contract(
            self.node(parent).measure.is_none(),
            "cannot add child: nodes with measure functions cannot have children",
        );
        {
            let parent_node = self.node_mut(parent);
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, child);
        }
        self.node_mut(child).parent = Some(parent);
        self.mark_dirty_internal(parent);
    }

    /// Detach `child` from `parent`. A no-op if the child is not attached
    /// there.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let removed = {
            let parent_node = self.node_mut(parent);
            let before = parent_node.children.len();
            parent_node.children.retain(|entry| *entry != child);
            parent_node.children.len() != before
        };
        if removed {
            self.node_mut(child).parent = None;
            self.mark_dirty_internal(parent);
        }
    }

    #[inline]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.node(id).children.len()
    }

    #[inline]
    pub fn child_at(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node(parent).children.get(index).copied()
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    #[inline]
    pub fn style(&self, id: NodeId) -> &Style {
        &self.node(id).style
    }

    /// Mutate a node's style through a closure. The node is marked dirty
    /// only when the closure actually changed something.
    pub fn update_style(&mut self, id: NodeId, mutate: impl FnOnce(&mut Style)) {
        let before = self.node(id).style;
        mutate(&mut self.node_mut(id).style);
        if self.node(id).style != before {
            self.mark_dirty_internal(id);
        }
    }

    /// Copy the whole style of `source` onto `target`, dirtying the target
    /// only when the styles differ.
    pub fn copy_style(&mut self, target: NodeId, source: NodeId) {
        let source_style = *self.style(source);
        if *self.style(target) != source_style {
            self.node_mut(target).style = source_style;
            self.mark_dirty_internal(target);
        }
    }

    /// Install or clear the measure callback. Only childless nodes can
    /// carry one.
    pub fn set_measure_func(&mut self, id: NodeId, measure: Option<MeasureFunc>) {
        if measure.is_some() {
            contract(
                self.node(id).children.is_empty(),
                "cannot set measure function: nodes with measure functions cannot have children",
            );
        }
        self.node_mut(id).measure = measure;
    }

    #[inline]
    pub fn has_measure_func(&self, id: NodeId) -> bool {
        self.node(id).measure.is_some()
    }

    /// Dirty a measure-bearing leaf whose intrinsic content changed. All
    /// other nodes are dirtied automatically by style mutation.
    pub fn mark_dirty(&mut self, id: NodeId) {
        contract(
            self.node(id).measure.is_some(),
            "only leaf nodes with custom measure functions should manually mark themselves dirty",
        );
        self.mark_dirty_internal(id);
    }

    /// Walk up the parent chain setting dirty bits, stopping at the first
    /// already-dirty ancestor. Dirtying invalidates the remembered flex
    /// basis.
    pub(crate) fn mark_dirty_internal(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_mut(node_id);
            if node.is_dirty {
                break;
            }
            node.is_dirty = true;
            node.layout.computed_flex_basis = None;
            current = node.parent;
        }
    }

    #[inline]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.node(id).is_dirty
    }

    #[inline]
    pub fn has_new_layout(&self, id: NodeId) -> bool {
        self.node(id).has_new_layout
    }

    /// Hosts clear this after consuming a node's geometry.
    pub fn set_has_new_layout(&mut self, id: NodeId, has_new_layout: bool) {
        self.node_mut(id).has_new_layout = has_new_layout;
    }

    #[inline]
    pub fn layout(&self, id: NodeId) -> &Layout {
        &self.node(id).layout
    }

    /// Index of the flex line the node was placed on during the last
    /// layout of its parent.
    #[inline]
    pub fn line_index(&self, id: NodeId) -> usize {
        self.node(id).line_index
    }
}
