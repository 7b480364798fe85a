//! Headless benchmark: the targeting engine against a random fleet.
//!
//! Usage: `sim <seed> [easy|medium|hard]`. Prints one JSON object.

use broadside::{
    generate_random_placement, init_logging_with_default, AiPlayer, Board, Difficulty,
};
use clap::ValueEnum;
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging_with_default(log::LevelFilter::Warn);
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [easy|medium|hard]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let difficulty = match args.get(2) {
        Some(name) => Difficulty::from_str(name, true).map_err(|e| anyhow::anyhow!(e))?,
        None => Difficulty::default(),
    };

    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    generate_random_placement(&mut rng, &mut board)?;
    let mut ai = AiPlayer::new(difficulty, &mut rng);

    let mut shots = 0u32;
    let mut hits = 0u32;
    while !board.all_ships_sunk() {
        let target = ai
            .select_target(&mut rng, &board)
            .ok_or_else(|| anyhow::anyhow!("ran out of targets"))?;
        let result = board.attack(target);
        ai.handle_guess_result(&board, target, result);
        if result.is_resolved() {
            shots += 1;
        }
        if result.is_hit() {
            hits += 1;
        }
    }

    let result = json!({
        "seed": seed,
        "difficulty": difficulty,
        "shots": shots,
        "hits": hits,
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
