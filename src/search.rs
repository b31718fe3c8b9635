//! Move choice by backward induction over a [`SearchTree`]

use anyhow::{anyhow, Result};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    board::{Board, Token},
    evaluator::{Evaluator, ScoreTable},
    tree::{NodeId, SearchTree},
};

/// Plies searched when no depth is given
pub const DEFAULT_DEPTH: usize = 3;

/// Discount applied at the first ply, squared at every ply below it
pub const DEFAULT_DECAY: f64 = 0.95;

#[derive(Copy, Clone, Debug)]
pub struct SearchConfig {
    pub depth: usize,
    pub decay: f64,
    /// Seed for tie-breaking, drawn from the OS when absent
    pub seed: Option<u64>,
    pub scores: ScoreTable,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            decay: DEFAULT_DECAY,
            seed: None,
            scores: ScoreTable::default(),
        }
    }
}

impl SearchConfig {
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_scores(mut self, scores: ScoreTable) -> Self {
        self.scores = scores;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.depth == 0 {
            return Err(anyhow!("search depth must be at least 1"));
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(anyhow!("decay must be in (0, 1], got {}", self.decay));
        }
        self.scores.validate()
    }
}

/// A depth-limited exhaustive search
///
/// # Move choice
/// The tree of every move sequence up to `depth` plies is built from the
/// position. Leaves are scored by the evaluator for the player who made the
/// last move and scaled by the decay reached at that ply. Each inner node
/// takes the best child value for the player moving there and negates it for
/// its parent. Exact ties are settled at random, each tied child equally
/// likely, so equal moves are not always resolved the same way.
///
/// The decay is squared at each ply, so deeper results lose influence
/// doubly-exponentially and a nearer win always beats a later one.
pub struct Search {
    config: SearchConfig,
    evaluator: Evaluator,
    rng: StdRng,
}

impl Search {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            evaluator: Evaluator::new(config.scores),
            rng,
        })
    }

    /// Finds the column to play for the side to move
    ///
    /// # Panics
    /// If the game on `board` is already over
    pub fn best_move(&mut self, board: &Board) -> usize {
        assert!(!board.is_game_over(), "cannot search a finished game");

        let tree = SearchTree::build(self.config.depth, board);
        let (value, moves) =
            self.backward_induct(&tree, tree.root(), board.to_move(), self.config.decay);

        debug!(
            "{} plays column {} (line {:?}, value {}, {} nodes)",
            board.to_move(),
            moves[0] + 1,
            moves,
            -value,
            tree.len()
        );
        moves[0]
    }

    /// Backs leaf values up to `node` for `acting`, the player to move there
    ///
    /// Returns the node's value from the point of view of the player who moved
    /// into it, and the move sequence of the leaf that value came from.
    pub fn backward_induct<'t>(
        &mut self,
        tree: &'t SearchTree,
        node: NodeId,
        acting: Token,
        decay: f64,
    ) -> (i32, &'t [usize]) {
        let (&first, rest) = match tree.children(node).split_first() {
            Some(split) => split,
            None => {
                let derived = tree.derive_board(node);
                let value = self.evaluator.evaluate(&derived, acting.other());
                // float to int casts saturate, the scaled value stays in range
                return ((value as f64 * decay) as i32, tree.node(node).moves());
            }
        };

        let next = acting.other();
        let mut best = self.backward_induct(tree, first, next, decay * decay);
        // children seen so far with the best value, the k-th replaces with odds 1/k
        let mut ties = 1;
        for &child in rest {
            let candidate = self.backward_induct(tree, child, next, decay * decay);
            if candidate.0 > best.0 {
                best = candidate;
                ties = 1;
            } else if candidate.0 == best.0 {
                ties += 1;
                if self.rng.gen_ratio(1, ties) {
                    best = candidate;
                }
            }
        }
        (-best.0, best.1)
    }
}
