//! Node arena and hierarchy updater

use super::{Node, NodeId};
use crate::error::{Result, SceneError};
use kestrel_core::{Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use tracing::{debug, warn};

/// Owns every node of a scene and the parent/child links between them
///
/// Nodes are addressed by [`NodeId`] keys. Parent links are plain keys and
/// never own anything; a stale key simply resolves to `None`.
#[derive(Clone, Debug, Default)]
pub struct SceneTree {
    nodes: SlotMap<NodeId, Node>,
    names: FxHashMap<String, NodeId>,
}

impl SceneTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            names: FxHashMap::default(),
        }
    }

    /// Insert a detached node and return its key
    ///
    /// Any parent/child links carried by `node` are discarded. Names are
    /// unique: when a live node already holds the name, `find` keeps
    /// returning that node.
    pub fn insert(&mut self, mut node: Node) -> NodeId {
        node.parent = None;
        node.children.clear();
        let name = node.name().map(str::to_owned);
        let id = self.nodes.insert(node);
        if let Some(name) = name {
            match self.find(&name) {
                Some(existing) => warn!(%name, ?existing, ?id, "duplicate node name ignored"),
                None => {
                    self.names.insert(name, id);
                }
            }
        }
        id
    }

    /// Insert an identity node
    pub fn spawn(&mut self) -> NodeId {
        self.insert(Node::new())
    }

    /// Insert `node` and attach it under `parent`
    pub fn insert_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        let id = self.insert(node);
        self.add_child(parent, id)?;
        Ok(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names
            .get(name)
            .copied()
            .filter(|id| self.nodes.contains_key(*id))
    }

    /// Parent of `id`
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Children of `id` in insertion order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|n| n.children()).unwrap_or(&[])
    }

    /// Nodes without a parent
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, _)| id)
    }

    /// Check whether `ancestor` is `id` or lies on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Replace a node's local transform without recomputing matrices
    pub fn set_local_transform(
        &mut self,
        id: NodeId,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> Result<()> {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or(SceneError::NodeNotFound(id))?;
        node.set_local_transform(position, rotation, scale);
        Ok(())
    }

    /// Attach `child` under `parent`, appending it to the parent's children
    ///
    /// A child that already has a parent is detached from it first. Attaching
    /// a node under itself or one of its descendants is rejected.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::NodeNotFound(parent));
        }
        if !self.nodes.contains_key(child) {
            return Err(SceneError::NodeNotFound(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            warn!(?parent, ?child, "rejected attach that would create a cycle");
            return Err(SceneError::Cycle { parent, child });
        }

        if let Some(old_parent) = self.parent(child) {
            self.unlink(old_parent, child);
        }

        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Detach `child` from `parent`
    ///
    /// Returns `false` and changes nothing if `child` is not currently a child
    /// of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent(child) != Some(parent) {
            return false;
        }
        self.unlink(parent, child)
    }

    fn unlink(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(pos) = parent_node.children.iter().position(|c| *c == child) else {
            return false;
        };
        parent_node.children.remove(pos);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
        true
    }

    /// Remove a single node, detaching it from its parent
    ///
    /// Its children become roots.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if let Some(parent) = self.parent(id) {
            self.unlink(parent, id);
        }
        let mut node = self.nodes.remove(id)?;
        for child in node.children.drain(..) {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parent = None;
            }
        }
        if let Some(name) = node.name() {
            if self.names.get(name) == Some(&id) {
                self.names.remove(name);
            }
        }
        Some(node)
    }

    /// Remove a node and its whole subtree; returns the number removed
    pub fn remove_recursive(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(next) = stack.pop() {
            stack.extend_from_slice(self.children(next));
            if self.remove(next).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Recompute local and world matrices of `root` and its whole subtree
    ///
    /// Nodes are visited parent before child. This must be called on the true
    /// root of the subtree being refreshed: when `root` has a parent, that
    /// parent's world matrix is used as it stands, which is stale until the
    /// parent itself is updated.
    pub fn update_hierarchy(&mut self, root: NodeId) -> Result<()> {
        if !self.nodes.contains_key(root) {
            return Err(SceneError::NodeNotFound(root));
        }

        let mut stack: Vec<NodeId> = vec![root];
        let mut visited = 0usize;

        while let Some(id) = stack.pop() {
            let parent = self.nodes[id].parent;
            let parent_matrices = parent
                .and_then(|p| self.nodes.get(p))
                .map(|p| (*p.world_matrix(), *p.world_inverse_matrix()));

            let node = &mut self.nodes[id];
            node.update_local();
            node.update_world(parent_matrices);

            // Reverse so the first child is processed first
            stack.extend(node.children.iter().rev().copied());
            visited += 1;
        }

        debug!(?root, visited, "hierarchy updated");
        Ok(())
    }

    /// Update every root in the tree
    pub fn update_all(&mut self) {
        let roots: Vec<NodeId> = self.roots().collect();
        for root in roots {
            if let Err(err) = self.update_hierarchy(root) {
                warn!(?err, ?root, "skipping root");
            }
        }
    }

    /// World matrix of `id` from the last update
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.nodes.get(id).map(|n| *n.world_matrix())
    }

    /// World position of `id` from the last update
    pub fn world_position(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.get(id).map(|n| n.world_position())
    }
}
