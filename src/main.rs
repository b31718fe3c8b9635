use anyhow::Result;
use clap::Parser;

use std::time::Instant;

use connect4_ai::{
    board::{Board, Token},
    player::{HumanPlayer, Player, SmartPlayer},
    search::{SearchConfig, DEFAULT_DECAY},
    selfplay::{run_games, MatchConfig, PlayerKind, Seat, Tally},
};

/// Connect 4 between look-ahead players, or against one
#[derive(Parser)]
#[command(name = "connect4", version)]
struct Cli {
    /// Number of self-play games, anything that isn't a number plays one
    games: Option<String>,

    /// Player for X
    #[arg(long, value_enum, default_value_t = PlayerKind::Smart)]
    x: PlayerKind,

    /// Player for O
    #[arg(long, value_enum, default_value_t = PlayerKind::Smart)]
    o: PlayerKind,

    /// Search depth of a smart X player
    #[arg(long, default_value_t = 3)]
    x_depth: usize,

    /// Search depth of a smart O player
    #[arg(long, default_value_t = 1)]
    o_depth: usize,

    /// Discount of the first ply of look-ahead, squared at every further ply
    #[arg(long, default_value_t = DEFAULT_DECAY)]
    decay: f64,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Play X against the computer instead of running self-play
    #[arg(long)]
    human: bool,

    /// Search depth of the computer in a human game
    #[arg(long, default_value_t = 5)]
    depth: usize,
}

impl Cli {
    fn seat(&self, kind: PlayerKind, depth: usize) -> Seat {
        Seat {
            kind,
            search: SearchConfig::default()
                .with_depth(depth)
                .with_decay(self.decay),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.human {
        return play_human(&cli);
    }

    let games = cli
        .games
        .as_deref()
        .and_then(|games| games.trim().parse::<usize>().ok())
        .unwrap_or(1);

    let config = MatchConfig {
        x: cli.seat(cli.x, cli.x_depth),
        o: cli.seat(cli.o, cli.o_depth),
        seed: cli.seed,
        show_progress: true,
    };

    let start = Instant::now();
    let results = run_games(games, &config)?;
    println!("{:.3?}", start.elapsed());

    println!("{}", Tally::from_results(&results));
    println!("Simulation complete.");
    Ok(())
}

fn play_human(cli: &Cli) -> Result<()> {
    let mut board = Board::new();
    let mut human = HumanPlayer::stdio();

    let mut search = SearchConfig::default()
        .with_depth(cli.depth)
        .with_decay(cli.decay);
    search.seed = cli.seed;
    let mut computer = SmartPlayer::new(search)?;

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        board.display()?;
        if board.is_game_over() {
            break;
        }

        match board.to_move() {
            Token::X => {
                human.make_move(&mut board)?;
            }
            Token::O => {
                println!("AI is thinking...");
                let column = computer.make_move(&mut board)?;
                println!("{} plays column {}", computer.name(), column + 1);
            }
        }
    }

    match board.winner() {
        Some(token) => println!("\nPlayer {} is the winner!\n", token),
        None => println!("\nTie game!\n"),
    }
    Ok(())
}
