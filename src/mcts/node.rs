//! Search tree nodes.
//!
//! Nodes live in an arena and refer to each other by `NodeId`. Children are
//! owned through the arena; the parent link is a plain index used only to
//! walk back up during backpropagation.

use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap};
use crate::rules::GameState;

/// Index into the SearchTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Arena slot for this node.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A node in the search tree.
///
/// Owns a snapshot of the game at this point. Values are accumulated for
/// every player; they are projected onto one player only when a parent
/// compares its children.
#[derive(Clone, Debug)]
pub struct SearchNode<S: GameState> {
    /// Game state at this node.
    pub state: S,

    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Action that led here from the parent (None for root).
    pub action: Option<S::Action>,

    /// Children in legal-action order.
    /// SmallVec: No Thanks! never branches more than twice.
    pub children: SmallVec<[NodeId; 8]>,

    /// Sum of rollout rewards seen through this node, per player.
    pub value: PlayerMap<f64>,

    /// Total visits to this node.
    pub visits: u32,

    /// Depth in tree (root = 0).
    pub depth: u16,
}

impl<S: GameState> SearchNode<S> {
    /// Create a new node.
    pub fn new(state: S, parent: NodeId, action: Option<S::Action>, depth: u16) -> Self {
        let player_count = state.player_count();
        Self {
            state,
            parent,
            action,
            children: SmallVec::new(),
            value: PlayerMap::with_value(player_count, 0.0),
            visits: 0,
            depth,
        }
    }

    /// Create a root node.
    pub fn root(state: S) -> Self {
        Self::new(state, NodeId::NONE, None, 0)
    }

    /// No children yet (fresh, or terminal).
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Average reward for `player` over all visits.
    #[must_use]
    pub fn mean_value(&self, player: PlayerId) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value[player] / self.visits as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::no_thanks::{NoThanksAction, NoThanksBuilder};

    #[test]
    fn test_node_id() {
        let id = NodeId::new(5);
        assert_eq!(id.index(), 5);
        assert!(!id.is_none());
        assert_eq!(format!("{}", id), "NodeId(5)");

        assert!(NodeId::NONE.is_none());
        assert_eq!(format!("{}", NodeId::NONE), "NodeId(NONE)");
    }

    #[test]
    fn test_node_root() {
        let state = NoThanksBuilder::new().build(1).unwrap();
        let node = SearchNode::root(state);

        assert!(node.is_root());
        assert!(node.is_leaf());
        assert_eq!(node.action, None);
        assert_eq!(node.depth, 0);
        assert_eq!(node.visits, 0);
        assert_eq!(node.value.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mean_value() {
        let state = NoThanksBuilder::new().player_count(2).build(1).unwrap();
        let mut node = SearchNode::new(state, NodeId::new(0), Some(NoThanksAction::Pass), 1);

        // No visits = 0 value
        assert_eq!(node.mean_value(PlayerId::new(0)), 0.0);

        node.visits = 4;
        node.value[PlayerId::new(0)] = 2.0;
        node.value[PlayerId::new(1)] = -2.0;

        assert_eq!(node.mean_value(PlayerId::new(0)), 0.5);
        assert_eq!(node.mean_value(PlayerId::new(1)), -0.5);
        assert!(!node.is_root());
    }
}
