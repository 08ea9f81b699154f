//! Arena-based search tree.
//!
//! Uses a flat `Vec<SearchNode>` with index-based references. The arena
//! owns every node, each node lists its children by id, and parent links
//! are ids too, so there is no ownership cycle. The whole tree is dropped
//! at once when a search returns.

use super::node::{NodeId, SearchNode};
use crate::core::PlayerMap;
use crate::rules::GameState;

/// Arena-based search tree.
#[derive(Clone, Debug)]
pub struct SearchTree<S: GameState> {
    /// All nodes in the tree.
    nodes: Vec<SearchNode<S>>,

    /// The root node ID (always 0).
    root: NodeId,

    /// Number of players in the game.
    player_count: usize,
}

impl<S: GameState> SearchTree<S> {
    /// Create a new tree whose root holds `root_state`.
    pub fn new(root_state: S) -> Self {
        Self::with_capacity(root_state, 1024)
    }

    /// Create a tree with custom initial capacity.
    pub fn with_capacity(root_state: S, capacity: usize) -> Self {
        let player_count = root_state.player_count();
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(SearchNode::root(root_state));

        Self {
            nodes,
            root: NodeId::new(0),
            player_count,
        }
    }

    /// Get the root node ID.
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a node by ID.
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<S> {
        &mut self.nodes[id.index()]
    }

    /// Attach a new child under `parent`, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, state: S, action: S::Action) -> NodeId {
        let depth = self.get(parent).depth + 1;
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new(state, parent, Some(action), depth));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Record one visit and its rewards on `leaf` and every ancestor.
    pub fn backpropagate(&mut self, leaf: NodeId, rewards: &PlayerMap<f64>) {
        let mut current = leaf;
        while !current.is_none() {
            let node = self.get_mut(current);
            node.visits += 1;
            node.value.accumulate(rewards);
            current = node.parent;
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Player count for this tree.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Get the root node.
    #[must_use]
    pub fn root_node(&self) -> &SearchNode<S> {
        self.get(self.root)
    }

    /// Get statistics about the tree.
    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let max_depth = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let terminal_count = self.nodes.iter().filter(|n| n.state.is_terminal()).count();
        let leaf_count = self.nodes.iter().filter(|n| n.is_leaf()).count();

        TreeStats {
            node_count: self.nodes.len(),
            max_depth,
            terminal_count,
            leaf_count,
        }
    }

    /// Iterate over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode<S>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId::new(i as u32), n))
    }
}

/// Statistics about the search tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes.
    pub node_count: usize,

    /// Maximum depth reached.
    pub max_depth: u16,

    /// Number of nodes holding a finished game.
    pub terminal_count: usize,

    /// Number of nodes without children.
    pub leaf_count: usize,
}

impl TreeStats {
    /// Average children per expanded node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        let expanded = self.node_count - self.leaf_count;
        if expanded == 0 {
            0.0
        } else {
            (self.node_count - 1) as f64 / expanded as f64
        }
    }
}
