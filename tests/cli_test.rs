#[cfg(feature = "std")]
#[cfg(test)]
mod cli_tests {
    use std::fs;
    use std::io::Cursor;
    use std::time::Duration;

    use broadside::cli::{describe_turn, Console, ConsoleOptions};
    use broadside::persist::load_stats;
    use broadside::{
        AttackResult, Coordinate, GameConfig, GamePhase, GameSession, Side, TurnPolicy,
        TurnReport,
    };
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> GameSession<SmallRng> {
        GameSession::new(GameConfig::default(), SmallRng::seed_from_u64(seed))
    }

    /// Random placement for every ship, then every cell in row-major order.
    fn full_script() -> String {
        let mut script = "\n".repeat(5);
        for coord in Coordinate::all() {
            script.push_str(&coord.to_string());
            script.push('\n');
        }
        script
    }

    fn play(input: &str, seed: u64, options: ConsoleOptions) -> (Option<broadside::GameSummary>, String) {
        let mut game = session(seed);
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), options);
        let summary = console.run(&mut game).unwrap();
        let output = String::from_utf8(console.into_output()).unwrap();
        (summary, output)
    }

    #[test]
    fn test_scripted_game_runs_to_completion() {
        let (summary, output) = play(&full_script(), 12345, ConsoleOptions::default());
        let summary = summary.expect("game should finish before the script ends");
        assert!(output.contains("=== Broadside ==="));
        assert!(output.contains("Battle commencing!"));
        assert!(output.contains("You fire at A1"));
        match summary.winner {
            Side::Player => assert!(output.contains("You secured the seas")),
            Side::Computer => assert!(output.contains("Mission failed")),
        }
    }

    #[test]
    fn test_same_seed_same_transcript() {
        let (_, a) = play(&full_script(), 7, ConsoleOptions::default());
        let (_, b) = play(&full_script(), 7, ConsoleOptions::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_input_is_reprompted() {
        let mut script = String::from("Z9 H\nA1\nA1 H\n");
        script.push_str(&"\n".repeat(4));
        script.push_str("K4\nB2\n");
        let (summary, output) = play(&script, 3, ConsoleOptions::default());
        assert!(summary.is_none());
        assert!(output.contains("Invalid coordinate"));
        assert!(output.contains("Please enter H or V"));
        assert!(output.contains("Aircraft Carrier positioned at A1."));
        assert!(output.contains("Use rows A-J and columns 1-10."));
        assert!(output.contains("You fire at B2"));
    }

    #[test]
    fn test_overlapping_placement_is_rejected() {
        let script = "A1 H\nA1 V\n";
        let (summary, output) = play(script, 4, ConsoleOptions::default());
        assert!(summary.is_none());
        assert!(output.contains("Invalid placement"));
        assert!(output.contains("Place Battleship (length 4)"));
    }

    #[test]
    fn test_end_of_input_leaves_quietly() {
        let (summary, output) = play("", 5, ConsoleOptions::default());
        assert!(summary.is_none());
        assert!(output.contains("Place Aircraft Carrier (length 5)"));
    }

    #[test]
    fn test_finished_game_updates_stats_and_placement() {
        let dir = std::env::temp_dir();
        let stats_file = dir.join(format!("broadside-cli-{}-stats.txt", std::process::id()));
        let placement_file = dir.join(format!("broadside-cli-{}-placement.txt", std::process::id()));
        let _ = fs::remove_file(&stats_file);
        let _ = fs::remove_file(&placement_file);

        let options = ConsoleOptions {
            placement_file: Some(placement_file.clone()),
            stats_file: Some(stats_file.clone()),
            computer_delay: Duration::ZERO,
        };
        let (summary, output) = play(&full_script(), 99, options);
        let summary = summary.unwrap();

        let stats = load_stats(&stats_file);
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.games_won, u64::from(summary.winner == Side::Player));
        assert_eq!(stats.total_shots_fired, u64::from(summary.player_shots));
        assert_eq!(stats.total_hits, u64::from(summary.player_hits));
        assert!(output.contains("Career: 1 games"));
        assert_eq!(fs::read_to_string(&placement_file).unwrap().lines().count(), 5);

        let _ = fs::remove_file(&stats_file);
        let _ = fs::remove_file(&placement_file);
    }

    #[test]
    fn test_describe_turn_sentences() {
        let report = TurnReport {
            shooter: Side::Computer,
            target: Coordinate::new(1, 6),
            result: AttackResult::Sunk("Submarine"),
            phase: GamePhase::PlayerTurn,
        };
        assert_eq!(describe_turn(&report), "Enemy sinks the Submarine at B7!");
        let report = TurnReport {
            shooter: Side::Player,
            result: AttackResult::Miss,
            ..report
        };
        assert_eq!(describe_turn(&report), "You fire at B7 and miss.");
    }

    #[test]
    fn test_continue_on_hit_config_is_honoured() {
        let config = GameConfig {
            turn_policy: TurnPolicy::ContinueOnHit,
            ..GameConfig::default()
        };
        let mut game = GameSession::new(config, SmallRng::seed_from_u64(21));
        let mut console = Console::new(
            Cursor::new(full_script().into_bytes()),
            Vec::new(),
            ConsoleOptions::default(),
        );
        assert!(console.run(&mut game).unwrap().is_some());
        assert!(matches!(game.phase(), GamePhase::GameOver { .. }));
    }
}
