use std::io;
use std::path::PathBuf;
use std::time::Duration;

use broadside::{
    cli::{Console, ConsoleOptions},
    init_logging, Difficulty, GameConfig, GameSession, TurnPolicy, DEFAULT_PLACEMENT_FILE,
    DEFAULT_STATS_FILE,
};
use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Console Battleship against the computer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,
    #[arg(long, value_enum, default_value_t = TurnPolicy::Alternate)]
    turn_policy: TurnPolicy,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value = DEFAULT_PLACEMENT_FILE)]
    placement_file: PathBuf,
    #[arg(long, default_value = DEFAULT_STATS_FILE)]
    stats_file: PathBuf,
    #[arg(long, help = "Do not read or write the placement and stats files")]
    no_persist: bool,
    #[arg(long, default_value_t = 500, help = "Pause before the computer fires, in milliseconds")]
    delay_ms: u64,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let rng = match cli.seed {
        Some(s) => {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        }
        None => SmallRng::from_rng(&mut rand::rng()),
    };
    let config = GameConfig {
        difficulty: cli.difficulty,
        turn_policy: cli.turn_policy,
    };
    log::info!("difficulty {}, turn policy {:?}", config.difficulty, config.turn_policy);

    let options = ConsoleOptions {
        placement_file: (!cli.no_persist).then_some(cli.placement_file),
        stats_file: (!cli.no_persist).then_some(cli.stats_file),
        computer_delay: Duration::from_millis(cli.delay_ms),
    };
    let mut session = GameSession::new(config, rng);
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), options);
    if console.run(&mut session)?.is_none() {
        log::info!("input closed, leaving the game");
    }
    Ok(())
}
