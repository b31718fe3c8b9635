//! Positional evaluation by scanning every line of the board for runs of tokens

use anyhow::{anyhow, Result};

use crate::board::{Board, Cell, Token};
use crate::{CONNECT, HEIGHT, NUM_DIAGONALS, WIDTH};

/// The score of a completed line, no sum of ordinary run scores reaches it
pub const WIN_SCORE: i32 = i32::MAX;

// upper bound on the number of runs on a board: every line split by gaps
const MAX_RUNS: i32 = ((WIDTH + HEIGHT + 2 * NUM_DIAGONALS) * (WIDTH + 1) / 2) as i32;

/// Scores for runs of a single token, indexed by run length - 1
///
/// A run is open on a side when it is bordered by an empty cell there. Runs
/// closed on both sides can never grow into a win and always score 0.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ScoreTable {
    pub open_one_side: [i32; CONNECT - 1],
    pub open_both_sides: [i32; CONNECT - 1],
    pub win: i32,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            open_one_side: [1, 3, 5],
            open_both_sides: [2, 4, 6],
            win: WIN_SCORE,
        }
    }
}

impl ScoreTable {
    /// Score of a run of `length` tokens with `open_sides` empty neighbours
    pub fn run_score(&self, length: usize, open_sides: usize) -> i32 {
        if length >= CONNECT {
            return self.win;
        }
        match open_sides {
            0 => 0,
            1 => self.open_one_side[length - 1],
            _ => self.open_both_sides[length - 1],
        }
    }

    /// Checks that no sum of run scores can reach the win score
    pub fn validate(&self) -> Result<()> {
        if self.win <= 0 {
            return Err(anyhow!("win score must be positive, got {}", self.win));
        }
        for &score in self.open_one_side.iter().chain(self.open_both_sides.iter()) {
            let fits = score
                .checked_mul(MAX_RUNS)
                .map_or(false, |total| total < self.win);
            if score < 0 || !fits {
                return Err(anyhow!(
                    "run score {} must be between 0 and {}",
                    score,
                    (self.win - 1) / MAX_RUNS
                ));
            }
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Evaluator {
    scores: ScoreTable,
}

impl Evaluator {
    pub fn new(scores: ScoreTable) -> Self {
        Self { scores }
    }

    /// Sums the score of every line from `token`'s point of view
    ///
    /// Returns plus or minus the win score as soon as any line holds a win.
    pub fn evaluate(&self, board: &Board, token: Token) -> i32 {
        let mut value = 0;
        for line in board.lines() {
            let score = self.score_line(line.cells(), token);
            if score == self.scores.win || score == -self.scores.win {
                return score;
            }
            value += score;
        }
        value
    }

    /// Scores one line, runs of `token` count for and the opponent's against
    pub fn score_line(&self, cells: &[Cell], token: Token) -> i32 {
        let mut score = 0;
        let mut i = 0;
        while i < cells.len() {
            let owner = match cells[i].token() {
                Some(owner) => owner,
                None => {
                    i += 1;
                    continue;
                }
            };

            let start = i;
            while i < cells.len() && cells[i] == Cell::Filled(owner) {
                i += 1;
            }
            let sign = if owner == token { 1 } else { -1 };
            let length = i - start;
            if length >= CONNECT {
                return sign * self.scores.win;
            }

            let open_before = start > 0 && cells[start - 1].is_empty();
            let open_after = i < cells.len() && cells[i].is_empty();
            score += sign * self.scores.run_score(length, open_before as usize + open_after as usize);
        }
        score
    }
}
