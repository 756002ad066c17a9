//! Dots and Boxes engine command line
//!
//! `dots play` joins a referee-run game through the shared directory;
//! `dots selfplay` pits the engine against itself on one board.
//! Set `RUST_LOG=debug` to follow the search.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use dots::board::Player;
use dots::rules::claim_edge;
use dots::{Board, Config, Engine, Outcome, Session};

#[derive(Parser, Debug)]
#[command(name = "dots", version, about = "Dots and Boxes decision engine")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum search depth
    #[arg(long, global = true)]
    depth: Option<u8>,

    /// Time budget per move in milliseconds
    #[arg(long, global = true)]
    budget_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play one game against the referee
    Play {
        /// Team name used for signal files and move lines
        #[arg(long)]
        team: Option<String>,

        /// Directory shared with the referee
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Signal polling interval in milliseconds
        #[arg(long)]
        poll_ms: Option<u64>,
    },
    /// Engine against engine, logging the board after every move
    Selfplay,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(depth) = cli.depth {
        config.engine.max_depth = depth;
    }
    if let Some(budget_ms) = cli.budget_ms {
        config.engine.time_budget_ms = budget_ms;
    }

    match cli.command {
        Command::Play { team, dir, poll_ms } => {
            if let Some(team) = team {
                config.session.team = team;
            }
            if let Some(dir) = dir {
                config.session.dir = dir;
            }
            if let Some(poll_ms) = poll_ms {
                config.session.poll_interval_ms = poll_ms;
            }
            play(config)
        }
        Command::Selfplay => selfplay(&config),
    }
}

fn play(config: Config) -> Result<()> {
    if !config.session.dir.is_dir() {
        bail!("referee directory {} does not exist", config.session.dir.display());
    }

    let engine = Engine::with_config(config.engine);
    let mut session = Session::new(engine, config.session);
    match session.run().context("game session failed")? {
        Outcome::Finished { ours, theirs } => println!("GAME END {} - {}", ours, theirs),
        Outcome::ForfeitWin(kind) => println!("Opponent made an error ({:?}). I win!", kind),
    }
    Ok(())
}

/// Closing a box earns another move, as the referee rules it.
fn selfplay(config: &Config) -> Result<()> {
    let mut engines = [
        Engine::with_config(config.engine.clone()),
        Engine::with_config(config.engine.clone()),
    ];
    let mut board = Board::with_policy(config.session.claim_policy);
    let mut player = Player::A;
    let mut moves = 0usize;

    while !board.is_complete() {
        let engine = match player {
            Player::A => &mut engines[0],
            Player::B => &mut engines[1],
        };
        let result = engine.choose_move(&board, player);
        let Some(edge) = result.best_move else {
            bail!("no move found with {} edges claimed", board.claimed_edges());
        };

        let record = claim_edge(&mut board, edge.id, player);
        moves += 1;
        info!(
            "move {}: {} plays {} {} (score {}, depth {}, {}ms)\n{}",
            moves,
            player,
            edge.v1,
            edge.v2,
            result.score,
            result.depth,
            result.time_ms,
            board
        );

        if record.completed_count() == 0 {
            player = player.opponent();
        }
    }

    println!(
        "A {} - B {} after {} moves",
        board.boxes_owned(Player::A),
        board.boxes_owned(Player::B),
        moves
    );
    Ok(())
}
