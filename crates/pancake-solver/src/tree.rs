//! Arena of generated states with a predecessor table.
//!
//! Strategies push [`NodeId`]s onto their frontiers and walk the parent
//! links back to the root once a goal is popped.

use crate::state::State;

/// Index of a state inside a [`SearchTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct Node {
    state: State,
    parent: Option<NodeId>,
    depth: u32,
}

/// Owns every state generated during one solve call
#[derive(Debug, Default)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl SearchTree {
    /// Start a tree whose only node is `root`
    pub fn with_root(root: State) -> (Self, NodeId) {
        let mut tree = Self::default();
        let id = tree.push(root, None, 0);
        (tree, id)
    }

    /// Record `state` as generated from `parent`
    pub fn insert_child(&mut self, parent: NodeId, state: State) -> NodeId {
        let depth = self.nodes[parent.index()].depth + 1;
        self.push(state, Some(parent), depth)
    }

    fn push(&mut self, state: State, parent: Option<NodeId>, depth: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            state,
            parent,
            depth,
        });
        id
    }

    pub fn state(&self, id: NodeId) -> &State {
        &self.nodes[id.index()].state
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    /// Number of moves between the root and `id`
    pub fn depth(&self, id: NodeId) -> usize {
        self.nodes[id.index()].depth as usize
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// States from the root to `id`, inclusive
    pub fn path_to(&self, id: NodeId) -> Vec<State> {
        let mut path = Vec::with_capacity(self.depth(id) + 1);
        let mut current = Some(id);
        while let Some(node) = current {
            path.push(self.state(node).clone());
            current = self.parent(node);
        }
        path.reverse();
        path
    }

    /// Take the state at `id` out of the tree, consuming it
    pub fn into_state(mut self, id: NodeId) -> State {
        self.nodes.swap_remove(id.index()).state
    }
}
