//! Hierarchical default-fields cache
//!
//! A tree of nodes, each owning a set of fields. A node's effective field
//! set is the deep merge of its whole ancestor chain with itself, with the
//! node's own values winning over anything inherited. The merged result is
//! precomputed eagerly on every mutation and cascaded depth-first through
//! the affected subtree, so `fields()` on the hot logging path is a plain
//! cache read.
//!
//! Nodes are arena-indexed: parent and child links are ids into the tree's
//! slot vector, not owning references, which keeps the bidirectional
//! relationship free of reference cycles.

use super::error::{LogError, Result};
use super::fields::Fields;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle to one node in a [`FieldTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

struct Node {
    own: Fields,
    inherited: Fields,
    precomputed: Fields,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    live: bool,
}

impl Node {
    fn empty() -> Self {
        Self {
            own: Fields::new(),
            inherited: Fields::new(),
            precomputed: Fields::new(),
            parent: None,
            children: Vec::new(),
            live: true,
        }
    }
}

#[derive(Default)]
struct TreeInner {
    nodes: Vec<Node>,
    free: Vec<usize>,
}

/// The shared default-fields hierarchy.
///
/// Cloning the handle shares the same tree; mutation and the recompute
/// cascade run under one write lock, so the cascade is atomic with respect
/// to concurrent readers.
///
/// # Example
///
/// ```
/// use scopelog::core::{FieldTree, Fields};
///
/// let tree = FieldTree::new();
/// let parent = tree.create_node();
/// let child = tree.create_child(parent);
///
/// tree.add_fields(parent, Fields::new().with("service", "api"));
/// tree.add_fields(child, Fields::new().with("shard", 3));
///
/// let fields = tree.fields(child);
/// assert_eq!(fields.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct FieldTree {
    inner: Arc<RwLock<TreeInner>>,
}

impl FieldTree {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TreeInner::default())),
        }
    }

    /// Allocate a new orphan node with no fields.
    pub fn create_node(&self) -> NodeId {
        let mut tree = self.inner.write();
        tree.alloc()
    }

    /// Allocate a new node already linked under `parent`.
    pub fn create_child(&self, parent: NodeId) -> NodeId {
        let mut tree = self.inner.write();
        let id = tree.alloc();
        if tree.is_live(parent) {
            tree.nodes[id.0].parent = Some(parent);
            tree.nodes[parent.0].children.push(id);
            tree.nodes[id.0].inherited = tree.nodes[parent.0].precomputed.clone();
            tree.recompute(id);
        }
        id
    }

    /// Merge `fields` into the node's own fields; the new values win over
    /// previously-set own fields with the same name. Recomputes the merged
    /// cache for the node and every transitive descendant before returning.
    ///
    /// Returns the previous own-fields snapshot.
    pub fn add_fields(&self, id: NodeId, fields: Fields) -> Fields {
        let mut tree = self.inner.write();
        if !tree.is_live(id) {
            return Fields::new();
        }
        let previous = tree.nodes[id.0].own.clone();
        tree.nodes[id.0].own.merge(&fields);
        tree.refresh_inherited(id);
        tree.recompute(id);
        previous
    }

    /// Remove the named fields from the node's own fields, then recompute
    /// as [`add_fields`](Self::add_fields) does.
    ///
    /// Returns the previous own-fields snapshot.
    pub fn remove_fields<S: AsRef<str>>(&self, id: NodeId, names: &[S]) -> Fields {
        let mut tree = self.inner.write();
        if !tree.is_live(id) {
            return Fields::new();
        }
        let previous = tree.nodes[id.0].own.clone();
        for name in names {
            tree.nodes[id.0].own.remove(name.as_ref());
        }
        tree.refresh_inherited(id);
        tree.recompute(id);
        previous
    }

    /// Clear the node's own fields entirely, keeping inherited ones, then
    /// recompute. Returns the fields that were cleared.
    pub fn reset_fields(&self, id: NodeId) -> Fields {
        let mut tree = self.inner.write();
        if !tree.is_live(id) {
            return Fields::new();
        }
        let cleared = std::mem::take(&mut tree.nodes[id.0].own);
        tree.refresh_inherited(id);
        tree.recompute(id);
        cleared
    }

    /// Change the node's parent.
    ///
    /// Unlinks from the current parent's child set, links under `parent`
    /// (or leaves the node orphaned when `None`), pulls the new parent's
    /// merged fields into the inherited cache, and recomputes the node and
    /// all its descendants. Setting the current parent again is a no-op.
    ///
    /// Linking a node under its own descendant (or itself) is rejected with
    /// `ParentCycle` and nothing is mutated.
    ///
    /// Returns the previous parent.
    pub fn set_parent(&self, id: NodeId, parent: Option<NodeId>) -> Result<Option<NodeId>> {
        let mut tree = self.inner.write();
        if !tree.is_live(id) {
            return Ok(None);
        }
        let old_parent = tree.nodes[id.0].parent;
        if parent == old_parent {
            return Ok(old_parent);
        }
        if let Some(new_parent) = parent {
            // Walk the proposed parent's ancestor chain; finding `id` there
            // (or the parent being `id` itself) would close a cycle.
            let mut cursor = Some(new_parent);
            while let Some(ancestor) = cursor {
                if ancestor == id {
                    return Err(LogError::ParentCycle);
                }
                cursor = tree.nodes[ancestor.0].parent;
            }
        }
        if let Some(old) = old_parent {
            tree.nodes[old.0].children.retain(|child| *child != id);
        }
        tree.nodes[id.0].parent = parent;
        match parent {
            Some(new_parent) => {
                tree.nodes[new_parent.0].children.push(id);
                tree.nodes[id.0].inherited = tree.nodes[new_parent.0].precomputed.clone();
            }
            None => {
                tree.nodes[id.0].inherited = Fields::new();
            }
        }
        tree.recompute(id);
        Ok(old_parent)
    }

    /// The node's merged field set: its entire ancestor chain folded in,
    /// own values winning. Returns a defensive copy; mutating it cannot
    /// corrupt the cache.
    #[must_use]
    pub fn fields(&self, id: NodeId) -> Fields {
        let tree = self.inner.read();
        if !tree.is_live(id) {
            return Fields::new();
        }
        tree.nodes[id.0].precomputed.clone()
    }

    /// The node's own fields only (no inheritance).
    #[must_use]
    pub fn own_fields(&self, id: NodeId) -> Fields {
        let tree = self.inner.read();
        if !tree.is_live(id) {
            return Fields::new();
        }
        tree.nodes[id.0].own.clone()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let tree = self.inner.read();
        if !tree.is_live(id) {
            return None;
        }
        tree.nodes[id.0].parent
    }

    /// Destroy a node, severing both directions of its parent and child
    /// links. Orphaned children keep their cached field values untouched
    /// until they are next mutated; the slot is recycled for future nodes.
    pub fn release(&self, id: NodeId) {
        let mut tree = self.inner.write();
        if !tree.is_live(id) {
            return;
        }
        if let Some(parent) = tree.nodes[id.0].parent {
            tree.nodes[parent.0].children.retain(|child| *child != id);
        }
        let children = std::mem::take(&mut tree.nodes[id.0].children);
        for child in children {
            tree.nodes[child.0].parent = None;
        }
        tree.nodes[id.0] = Node::empty();
        tree.nodes[id.0].live = false;
        tree.free.push(id.0);
    }
}

impl TreeInner {
    fn alloc(&mut self) -> NodeId {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Node::empty();
                NodeId(slot)
            }
            None => {
                self.nodes.push(Node::empty());
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn is_live(&self, id: NodeId) -> bool {
        self.nodes.get(id.0).map_or(false, |node| node.live)
    }

    /// Re-pull the inherited cache from the current parent. A node whose
    /// parent was released keeps stale inherited values until its next
    /// mutation lands here.
    fn refresh_inherited(&mut self, id: NodeId) {
        let inherited = match self.nodes[id.0].parent {
            Some(parent) => self.nodes[parent.0].precomputed.clone(),
            None => Fields::new(),
        };
        self.nodes[id.0].inherited = inherited;
    }

    /// Eager push-based recompute: merge inherited and own for this node,
    /// then cascade depth-first through every child.
    fn recompute(&mut self, id: NodeId) {
        let mut merged = self.nodes[id.0].inherited.clone();
        merged.merge(&self.nodes[id.0].own);
        self.nodes[id.0].precomputed = merged;

        let children = self.nodes[id.0].children.clone();
        for child in children {
            self.nodes[child.0].inherited = self.nodes[id.0].precomputed.clone();
            self.recompute(child);
        }
    }
}
