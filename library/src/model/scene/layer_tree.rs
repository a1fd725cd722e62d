//! Per view layer visibility tree.
//!
//! Every view layer owns a private mirror of the collection hierarchy. Nodes live in a
//! flat arena and are addressed by [`LayerNodeId`], so the same collection name recurring
//! in several view layers never aliases.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct LayerNodeId(usize);

impl LayerNodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct LayerNode {
    pub collection_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub children: Vec<LayerNodeId>,
    #[serde(default)]
    pub exclude: bool,
    #[serde(default)]
    pub holdout: bool,
    #[serde(default)]
    pub hide_viewport: bool,
    #[serde(default)]
    pub indirect_only: bool,
}

impl LayerNode {
    fn new(collection_id: Uuid, name: &str) -> Self {
        Self {
            collection_id,
            name: name.to_string(),
            children: Vec::new(),
            exclude: false,
            holdout: false,
            hide_viewport: false,
            indirect_only: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct LayerTree {
    nodes: Vec<LayerNode>,
    root: LayerNodeId,
}

impl LayerTree {
    pub fn new(root_collection_id: Uuid, root_name: &str) -> Self {
        Self {
            nodes: vec![LayerNode::new(root_collection_id, root_name)],
            root: LayerNodeId(0),
        }
    }

    pub fn root(&self) -> LayerNodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: LayerNodeId) -> Option<&LayerNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: LayerNodeId) -> Option<&mut LayerNode> {
        self.nodes.get_mut(id.0)
    }

    /// Append a node under `parent`. Returns `None` if the parent does not exist.
    pub fn add_child(
        &mut self,
        parent: LayerNodeId,
        collection_id: Uuid,
        name: &str,
    ) -> Option<LayerNodeId> {
        if parent.0 >= self.nodes.len() {
            return None;
        }
        let id = LayerNodeId(self.nodes.len());
        self.nodes.push(LayerNode::new(collection_id, name));
        self.nodes[parent.0].children.push(id);
        Some(id)
    }

    pub fn children(&self, id: LayerNodeId) -> &[LayerNodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Depth-first search for a node by name, starting at the root.
    pub fn find_by_name(&self, name: &str) -> Option<LayerNodeId> {
        self.iter_depth_first()
            .find(|id| self.get(*id).is_some_and(|node| node.name == name))
    }

    pub fn find_by_collection(&self, collection_id: Uuid) -> Option<LayerNodeId> {
        self.iter_depth_first()
            .find(|id| self.get(*id).is_some_and(|node| node.collection_id == collection_id))
    }

    /// Find a direct child of `parent` by name.
    pub fn child_by_name(&self, parent: LayerNodeId, name: &str) -> Option<LayerNodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|node| node.name == name))
    }

    /// Node ids in depth-first pre-order, root first.
    pub fn iter_depth_first(&self) -> impl Iterator<Item = LayerNodeId> + '_ {
        let mut stack = vec![self.root];
        std::iter::from_fn(move || {
            let id = stack.pop()?;
            stack.extend(self.children(id).iter().rev().copied());
            Some(id)
        })
    }

    /// Check that the arena forms a tree: the root exists, every child id is in range and
    /// every node is reachable from the root exactly once.
    pub fn validate(&self) -> Result<(), String> {
        if self.get(self.root).is_none() {
            return Err(format!("root node {} is out of range", self.root.0));
        }
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let (Some(visited), Some(node)) = (seen.get_mut(id.0), self.nodes.get(id.0)) else {
                return Err(format!("node {} is out of range", id.0));
            };
            if *visited {
                return Err(format!("node '{}' is reachable more than once", node.name));
            }
            *visited = true;
            stack.extend(node.children.iter().copied());
        }
        match seen.iter().position(|visited| !visited) {
            Some(index) => Err(format!("node {} is not reachable from the root", index)),
            None => Ok(()),
        }
    }
}
