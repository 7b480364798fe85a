use broadside::{
    AttackResult, BoardError, Coordinate, Deployment, Difficulty, GameConfig, GameError,
    GamePhase, GameSession, Orientation, Side, TurnPolicy,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const COMPUTER_LAYOUT: &str = "AircraftCarrier A1 H\n\
                               Battleship C5 V\n\
                               Cruiser E2 H\n\
                               Submarine G7 V\n\
                               Destroyer J1 H\n";

const COMPUTER_CELLS: [&str; 17] = [
    "A1", "A2", "A3", "A4", "A5", "C5", "D5", "E5", "F5", "E2", "E3", "E4", "G7", "H7", "I7",
    "J1", "J2",
];

fn c(s: &str) -> Coordinate {
    s.parse().unwrap()
}

fn session(turn_policy: TurnPolicy, seed: u64) -> GameSession<SmallRng> {
    let config = GameConfig {
        difficulty: Difficulty::Medium,
        turn_policy,
    };
    GameSession::new(config, SmallRng::seed_from_u64(seed))
}

/// Player fleet on rows A-E from column 1, computer fleet from the fixed layout.
fn battle(turn_policy: TurnPolicy, seed: u64) -> GameSession<SmallRng> {
    let mut game = session(turn_policy, seed);
    for (i, row) in ["A1", "B1", "C1", "D1", "E1"].iter().enumerate() {
        game.place_player_ship(i, c(row), Orientation::Horizontal)
            .unwrap();
    }
    assert_eq!(
        game.start_battle(Some(COMPUTER_LAYOUT)).unwrap(),
        Deployment::Loaded
    );
    game
}

#[test]
fn test_new_session_waits_for_placement() {
    let mut game = session(TurnPolicy::Alternate, 1);
    assert_eq!(game.phase(), GamePhase::PlacingShips);
    assert_eq!(game.next_unplaced_ship(), Some(0));
    assert_eq!(
        game.player_attack(c("A1")),
        Err(GameError::WrongPhase(GamePhase::PlacingShips))
    );
    assert_eq!(
        game.computer_turn(),
        Err(GameError::WrongPhase(GamePhase::PlacingShips))
    );
    assert!(game.summary().is_none());
}

#[test]
fn test_battle_requires_full_fleet() {
    let mut game = session(TurnPolicy::Alternate, 2);
    game.place_player_ship(0, c("A1"), Orientation::Horizontal)
        .unwrap();
    assert_eq!(game.start_battle(None), Err(GameError::FleetIncomplete));
    assert_eq!(game.phase(), GamePhase::PlacingShips);
    assert!(!game.computer_board().is_deployed());
}

#[test]
fn test_placement_errors_surface_board_errors() {
    let mut game = session(TurnPolicy::Alternate, 3);
    game.place_player_ship(0, c("A1"), Orientation::Horizontal)
        .unwrap();
    assert_eq!(
        game.place_player_ship(1, c("A2"), Orientation::Vertical),
        Err(GameError::Board(BoardError::ShipOverlaps))
    );
    assert_eq!(
        game.place_player_ship(1, c("H1"), Orientation::Vertical),
        Err(GameError::Board(BoardError::ShipOutOfBounds))
    );
    assert_eq!(game.next_unplaced_ship(), Some(1));
}

#[test]
fn test_random_player_placement_and_generated_computer_fleet() {
    let mut game = session(TurnPolicy::Alternate, 4);
    while let Some(index) = game.next_unplaced_ship() {
        game.place_player_ship_randomly(index).unwrap();
    }
    assert!(game.player_board().is_deployed());
    let deployment = game.start_battle(Some("not a layout")).unwrap();
    assert!(matches!(deployment, Deployment::Generated(_)));
    assert!(game.computer_board().is_deployed());
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
    assert_eq!(
        game.place_player_ship_randomly(0),
        Err(GameError::WrongPhase(GamePhase::PlayerTurn))
    );
}

#[test]
fn test_invalid_and_repeat_shots_keep_the_turn() {
    let mut game = battle(TurnPolicy::Alternate, 5);

    let report = game.player_attack(Coordinate::new(10, 3)).unwrap();
    assert_eq!(report.result, AttackResult::Invalid);
    assert_eq!(report.phase, GamePhase::PlayerTurn);

    let report = game.player_attack(c("A1")).unwrap();
    assert_eq!(report.result, AttackResult::Hit("Aircraft Carrier"));
    assert_eq!(report.phase, GamePhase::ComputerTurn);
    assert_eq!(
        game.player_attack(c("B1")),
        Err(GameError::WrongPhase(GamePhase::ComputerTurn))
    );

    let report = game.computer_turn().unwrap();
    assert_eq!(report.shooter, Side::Computer);
    assert!(report.result.is_resolved());
    assert_eq!(game.phase(), GamePhase::PlayerTurn);

    let report = game.player_attack(c("A1")).unwrap();
    assert_eq!(report.result, AttackResult::AlreadyTried);
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
}

#[test]
fn test_alternate_passes_turn_after_hit_and_miss() {
    let mut game = battle(TurnPolicy::Alternate, 6);
    assert_eq!(game.player_attack(c("J10")).unwrap().result, AttackResult::Miss);
    assert_eq!(game.phase(), GamePhase::ComputerTurn);
    game.computer_turn().unwrap();
    assert!(game.player_attack(c("C5")).unwrap().result.is_hit());
    assert_eq!(game.phase(), GamePhase::ComputerTurn);
}

#[test]
fn test_continue_on_hit_keeps_shooter() {
    let mut game = battle(TurnPolicy::ContinueOnHit, 7);
    assert!(game.player_attack(c("E2")).unwrap().result.is_hit());
    assert_eq!(game.phase(), GamePhase::PlayerTurn);
    assert_eq!(game.player_attack(c("J10")).unwrap().result, AttackResult::Miss);
    assert_eq!(game.phase(), GamePhase::ComputerTurn);

    // the computer keeps firing while it hits
    loop {
        let report = game.computer_turn().unwrap();
        if report.result.is_hit() {
            assert_eq!(report.phase, GamePhase::ComputerTurn);
        } else {
            assert_eq!(report.phase, GamePhase::PlayerTurn);
            break;
        }
    }
}

#[test]
fn test_player_wins_by_sinking_every_ship() {
    let mut game = battle(TurnPolicy::ContinueOnHit, 8);
    let (last, rest) = COMPUTER_CELLS.split_last().unwrap();
    for cell in rest {
        let report = game.player_attack(c(cell)).unwrap();
        assert!(report.result.is_hit());
        assert_eq!(report.phase, GamePhase::PlayerTurn);
    }
    let report = game.player_attack(c(last)).unwrap();
    assert_eq!(report.result, AttackResult::Sunk("Destroyer"));
    assert_eq!(
        report.phase,
        GamePhase::GameOver {
            winner: Side::Player
        }
    );

    let summary = game.summary().unwrap();
    assert_eq!(summary.winner, Side::Player);
    assert_eq!(summary.difficulty, Difficulty::Medium);
    assert_eq!(summary.player_shots, 17);
    assert_eq!(summary.player_hits, 17);

    let over = GamePhase::GameOver {
        winner: Side::Player,
    };
    assert_eq!(game.player_attack(c("J10")), Err(GameError::WrongPhase(over)));
    assert_eq!(game.computer_turn(), Err(GameError::WrongPhase(over)));
}

#[test]
fn test_full_game_reaches_game_over() {
    let mut game = battle(TurnPolicy::Alternate, 9);
    let mut targets = Coordinate::all();
    let mut misses = 0u32;
    while game.summary().is_none() {
        match game.phase() {
            GamePhase::PlayerTurn => {
                let target = targets.next().unwrap();
                let report = game.player_attack(target).unwrap();
                if report.result == AttackResult::Miss {
                    misses += 1;
                }
            }
            GamePhase::ComputerTurn => {
                game.computer_turn().unwrap();
            }
            phase => panic!("unexpected phase {}", phase),
        }
    }
    let summary = game.summary().unwrap();
    assert_eq!(summary.player_shots, summary.player_hits + misses);
    match summary.winner {
        Side::Player => {
            assert!(game.computer_board().all_ships_sunk());
            assert_eq!(summary.player_hits, 17);
        }
        Side::Computer => assert!(game.player_board().all_ships_sunk()),
    }
}

#[test]
fn test_restart_clears_everything() {
    let mut game = battle(TurnPolicy::Alternate, 10);
    game.player_attack(c("A1")).unwrap();
    game.computer_turn().unwrap();

    game.restart();
    assert_eq!(game.phase(), GamePhase::PlacingShips);
    assert_eq!(game.player_board().shots_taken(), 0);
    assert_eq!(game.computer_board().shots_taken(), 0);
    assert!(!game.computer_board().is_deployed());
    assert_eq!(game.next_unplaced_ship(), Some(0));
    assert_eq!(game.targeting().shots_remaining(), 100);
    assert!(game.targeting().hit_queue().is_empty());
    assert!(game.summary().is_none());
}
