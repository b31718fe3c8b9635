//! Layered game tree of move sequences, built breadth first to a fixed depth

use log::trace;

use crate::board::Board;
use crate::WIDTH;

/// Index of a node in its `SearchTree`
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NodeId(usize);

#[derive(Clone, Debug)]
pub struct Node {
    // columns played from the root to reach this node
    moves: Vec<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.moves.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Every move sequence from a position up to a fixed number of plies
///
/// Nodes live in one arena and refer to each other by `NodeId`. A node whose
/// position is already decided is never expanded, so its subtree is empty
/// even when the depth limit has not been reached.
#[derive(Clone, Debug)]
pub struct SearchTree {
    root_board: Board,
    nodes: Vec<Node>,
}

impl SearchTree {
    const ROOT: NodeId = NodeId(0);

    /// Builds the tree of all move sequences of at most `depth` plies from `board`
    pub fn build(depth: usize, board: &Board) -> Self {
        let mut tree = Self {
            root_board: board.clone(),
            nodes: vec![Node {
                moves: Vec::new(),
                parent: None,
                children: Vec::new(),
            }],
        };

        let mut frontier = vec![Self::ROOT];
        for layer in 1..=depth {
            let mut next_frontier = Vec::with_capacity(frontier.len() * WIDTH);
            for id in frontier {
                let derived = tree.derive_board(id);
                if derived.is_game_over() {
                    continue;
                }
                for column in derived.valid_moves() {
                    next_frontier.push(tree.add_child(id, column));
                }
            }
            trace!("layer {}: {} nodes", layer, next_frontier.len());

            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }
        tree
    }

    fn add_child(&mut self, parent: NodeId, column: usize) -> NodeId {
        let id = NodeId(self.nodes.len());

        let parent_moves = &self.nodes[parent.0].moves;
        let mut moves = Vec::with_capacity(parent_moves.len() + 1);
        moves.extend_from_slice(parent_moves);
        moves.push(column);

        self.nodes.push(Node {
            moves,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    /// The position the tree was built from
    pub fn root_board(&self) -> &Board {
        &self.root_board
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.nodes[id.0].is_leaf()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_leaf())
            .map(|(index, _)| NodeId(index))
    }

    /// Replays the node's moves onto a copy of the root position
    pub fn derive_board(&self, id: NodeId) -> Board {
        let mut board = self.root_board.clone();
        for &column in self.nodes[id.0].moves.iter() {
            board.play(column);
        }
        board
    }
}
