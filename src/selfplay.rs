//! Runs many independent games in parallel and tallies the results

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use std::fmt;

use crate::{
    board::{Board, Token, TOKENS},
    player::{Player, RandomPlayer, SmartPlayer},
    search::SearchConfig,
};

#[derive(Copy, Clone, Eq, PartialEq, Debug, clap::ValueEnum)]
pub enum PlayerKind {
    Smart,
    Random,
}

/// How one side of every game is played
#[derive(Copy, Clone, Debug)]
pub struct Seat {
    pub kind: PlayerKind,
    /// Used by smart players, the seed is replaced per game
    pub search: SearchConfig,
}

impl Seat {
    pub fn smart(depth: usize) -> Self {
        Self {
            kind: PlayerKind::Smart,
            search: SearchConfig::default().with_depth(depth),
        }
    }

    pub fn random() -> Self {
        Self {
            kind: PlayerKind::Random,
            search: SearchConfig::default(),
        }
    }

    fn create(&self, seed: Option<u64>) -> Result<Box<dyn Player>> {
        Ok(match self.kind {
            PlayerKind::Smart => {
                let mut config = self.search;
                config.seed = seed;
                Box::new(SmartPlayer::new(config)?)
            }
            PlayerKind::Random => match seed {
                Some(seed) => Box::new(RandomPlayer::with_seed(seed)),
                None => Box::new(RandomPlayer::new()),
            },
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct MatchConfig {
    pub x: Seat,
    pub o: Seat,
    /// Base seed, each player of each game derives its own from it
    pub seed: Option<u64>,
    pub show_progress: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            x: Seat::smart(3),
            o: Seat::smart(1),
            seed: None,
            show_progress: true,
        }
    }
}

impl MatchConfig {
    pub fn validate(&self) -> Result<()> {
        for seat in [self.x, self.o].iter() {
            if seat.kind == PlayerKind::Smart {
                seat.search.validate()?;
            }
        }
        Ok(())
    }

    fn seed_for(&self, game: usize, token: Token) -> Option<u64> {
        self.seed
            .map(|seed| seed.wrapping_add((game * TOKENS.len() + token.seat()) as u64))
    }
}

/// Wins per token and ties over a set of games
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
}

impl Tally {
    pub fn from_results(results: &[Option<Token>]) -> Self {
        let mut tally = Self::default();
        for winner in results {
            match winner {
                Some(Token::X) => tally.x_wins += 1,
                Some(Token::O) => tally.o_wins += 1,
                None => tally.ties += 1,
            }
        }
        tally
    }

    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.ties
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "X won {} times; O won {} times; There were {} ties.",
            self.x_wins, self.o_wins, self.ties
        )
    }
}

/// Alternates turns between `players`, indexed by seat, until the game ends
///
/// Returns the winner, or `None` for a draw.
pub fn play_game(board: &mut Board, players: &mut [Box<dyn Player>; 2]) -> Result<Option<Token>> {
    while !board.is_game_over() {
        players[board.turn()].make_move(board)?;
    }
    Ok(board.winner())
}

/// Plays `count` games in parallel, the first move alternating between X and O
///
/// The winner of game `i` is at index `i` of the result.
pub fn run_games(count: usize, config: &MatchConfig) -> Result<Vec<Option<Token>>> {
    config.validate()?;
    info!(
        "playing {} games, X: {:?}, O: {:?}",
        count, config.x.kind, config.o.kind
    );

    let progress = if config.show_progress {
        ProgressBar::new(count as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let results = (0..count)
        .into_par_iter()
        .map(|game| -> Result<Option<Token>> {
            let mut board = Board::with_first_player(TOKENS[game % 2]);
            let mut players = [
                config.x.create(config.seed_for(game, Token::X))?,
                config.o.create(config.seed_for(game, Token::O))?,
            ];

            let winner = play_game(&mut board, &mut players)?;
            debug!(
                "game {} over after {} moves, winner: {:?}",
                game,
                board.num_moves(),
                winner
            );
            progress.inc(1);
            Ok(winner)
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish();
    info!("finished {} games", results.len());
    Ok(results)
}
