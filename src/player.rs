//! Sources of moves: random, human and search-backed players

use anyhow::{anyhow, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};

use std::io::{stdin, stdout, BufRead, BufReader, Stdin, Stdout, Write};

use crate::{
    board::Board,
    search::{Search, SearchConfig},
    WIDTH,
};

/// Anything that can take a turn
pub trait Player {
    /// Chooses a column for the side to move, plays it on `board` and
    /// returns it (0-indexed)
    fn make_move(&mut self, board: &mut Board) -> Result<usize>;

    fn name(&self) -> &str;
}

fn ensure_playing(board: &Board) -> Result<()> {
    if board.is_game_over() {
        return Err(anyhow!("no move can be made, the game is already over"));
    }
    Ok(())
}

/// Plays uniformly random open columns
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn make_move(&mut self, board: &mut Board) -> Result<usize> {
        ensure_playing(board)?;

        let mut column = self.rng.gen_range(0..WIDTH);
        while !board.is_valid_move(column) {
            column = self.rng.gen_range(0..WIDTH);
        }
        board.play(column);
        Ok(column)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// Asks a person for a 1-indexed column until a playable one is given
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    /// A player at the terminal
    pub fn stdio() -> Self {
        Self::new(BufReader::new(stdin()), stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn make_move(&mut self, board: &mut Board) -> Result<usize> {
        ensure_playing(board)?;

        loop {
            write!(self.output, "Enter column (1-{}): ", WIDTH)?;
            self.output.flush()?;

            let mut buffer = String::new();
            if self.input.read_line(&mut buffer)? == 0 {
                return Err(anyhow!("input closed before a move was entered"));
            }

            match buffer.trim().parse::<usize>() {
                Err(_) => writeln!(self.output, "Invalid number: {}", buffer.trim())?,
                Ok(column) => match board.play_checked(column) {
                    Ok(_) => return Ok(column - 1),
                    // try the move again
                    Err(err) => writeln!(self.output, "{}", err)?,
                },
            }
        }
    }

    fn name(&self) -> &str {
        "Human"
    }
}

/// Plays the move chosen by a fixed-depth [`Search`]
pub struct SmartPlayer {
    search: Search,
    name: String,
}

impl SmartPlayer {
    pub fn new(config: SearchConfig) -> Result<Self> {
        Ok(Self {
            search: Search::new(config)?,
            name: format!("Smart (depth {})", config.depth),
        })
    }
}

impl Player for SmartPlayer {
    fn make_move(&mut self, board: &mut Board) -> Result<usize> {
        ensure_playing(board)?;

        let column = self.search.best_move(board);
        board.play(column);
        Ok(column)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
