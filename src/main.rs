use anyhow::{bail, Context};
use clap::Parser;
use log::warn;
use rand::{rngs::StdRng, SeedableRng};
use tilt_2048::{Direction, Session, SessionConfig};

/// Play a scripted 2048 session on a seeded board and print every position.
#[derive(Parser, Debug)]
#[command(name = "tilt-2048")]
struct Args {
    /// Side length of the board.
    #[arg(long, default_value_t = 4)]
    size: usize,
    /// Tile value that wins the game.
    #[arg(long, default_value_t = tilt_2048::engine::WINNING_VALUE)]
    target: u32,
    /// RNG seed for tile spawns (random if omitted).
    #[arg(long)]
    seed: Option<u64>,
    /// Merge columns on the rayon pool.
    #[arg(long)]
    parallel: bool,
    /// Cycle the move list until the game ends or --max-steps is hit.
    #[arg(long)]
    repeat: bool,
    /// Stop after this many moves, counting ones that change nothing.
    #[arg(long, default_value_t = 10_000)]
    max_steps: u64,
    /// Only print the final summary.
    #[arg(long)]
    quiet: bool,
    /// Moves: words (north, up, left, ...) or runs of letters such as NNEW.
    #[arg(required = true)]
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let moves = parse_moves(&args.moves)?;

    let config = SessionConfig { size: args.size, winning_value: args.target, parallel_columns: args.parallel };
    let mut session = Session::with_config(config).context("invalid board configuration")?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    session.add_random_tile(&mut rng);
    session.add_random_tile(&mut rng);
    if !args.quiet {
        println!("{session}");
    }

    let script: Box<dyn Iterator<Item = &Direction> + '_> =
        if args.repeat { Box::new(moves.iter().cycle()) } else { Box::new(moves.iter()) };
    let mut steps = 0u64;
    let mut idle = 0usize;
    for &dir in script {
        if session.is_game_over() || steps >= args.max_steps {
            break;
        }
        steps += 1;
        if session.tilt(dir) {
            idle = 0;
            session.add_random_tile(&mut rng);
        } else {
            idle += 1;
            if idle >= moves.len() {
                warn!("no move in the script changes the board, stopping after {steps} steps");
                break;
            }
        }
        if !args.quiet {
            println!("{dir}:{session}");
        }
    }

    println!(
        "Moves: {} | score: {} | best: {} | highest tile: {} | game over: {}",
        steps,
        session.score(),
        session.best_score(),
        session.highest_tile().unwrap_or(0),
        session.is_game_over()
    );
    Ok(())
}

/// Each argument is either one direction word or a run of one-letter moves.
fn parse_moves(args: &[String]) -> anyhow::Result<Vec<Direction>> {
    let mut moves = Vec::new();
    for arg in args {
        if let Ok(dir) = arg.parse::<Direction>() {
            moves.push(dir);
            continue;
        }
        for ch in arg.chars().filter(|c| !c.is_whitespace() && *c != ',') {
            let dir = ch
                .to_string()
                .parse::<Direction>()
                .with_context(|| format!("bad move {ch:?} in {arg:?}"))?;
            moves.push(dir);
        }
    }
    if moves.is_empty() {
        bail!("no moves given");
    }
    Ok(moves)
}
