//! Game session controller: turn order, win detection and per-game counters.

use core::fmt;

use rand::Rng;
use thiserror::Error;

use crate::ai::{AiPlayer, Difficulty, TargetingState};
use crate::board::Board;
use crate::common::{AttackResult, BoardError, Coordinate};
use crate::placement::{deploy_fleet, place_ship_randomly, Deployment};
use crate::ship::Orientation;

/// Whether a shooter keeps the turn after striking a ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize, clap::ValueEnum)
)]
#[cfg_attr(feature = "std", serde(rename_all = "kebab-case"))]
pub enum TurnPolicy {
    /// Turns always pass after a resolved shot.
    #[default]
    Alternate,
    /// A Hit or Sunk lets the same side fire again.
    ContinueOnHit,
}

/// Runtime settings for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub difficulty: Difficulty,
    pub turn_policy: TurnPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

/// Current phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GamePhase {
    PlacingShips,
    PlayerTurn,
    ComputerTurn,
    GameOver { winner: Side },
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GamePhase::PlacingShips => f.pad("placing ships"),
            GamePhase::PlayerTurn => f.pad("player turn"),
            GamePhase::ComputerTurn => f.pad("computer turn"),
            GamePhase::GameOver { winner } => write!(f, "game over ({:?} won)", winner),
        }
    }
}

/// Errors from calling a controller operation at the wrong time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("operation not allowed during {0}")]
    WrongPhase(GamePhase),
    #[error("all ships must be placed before the battle starts")]
    FleetIncomplete,
    #[error("no cell left to attack")]
    NoTargets,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Outcome of one shot, for the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct TurnReport {
    pub shooter: Side,
    pub target: Coordinate,
    pub result: AttackResult,
    /// Phase after the shot.
    pub phase: GamePhase,
}

/// Final tally handed out once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameSummary {
    pub winner: Side,
    pub difficulty: Difficulty,
    /// Resolved shots fired by the human player.
    pub player_shots: u32,
    pub player_hits: u32,
}

/// One human-vs-computer game. Owns both boards, the targeting engine and
/// the random source.
pub struct GameSession<R: Rng> {
    config: GameConfig,
    rng: R,
    player_board: Board,
    computer_board: Board,
    ai: AiPlayer,
    phase: GamePhase,
    player_shots: u32,
    player_hits: u32,
}

impl<R: Rng> GameSession<R> {
    pub fn new(config: GameConfig, mut rng: R) -> Self {
        let ai = AiPlayer::new(config.difficulty, &mut rng);
        Self {
            config,
            rng,
            player_board: Board::new(),
            computer_board: Board::new(),
            ai,
            phase: GamePhase::PlacingShips,
            player_shots: 0,
            player_hits: 0,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn computer_board(&self) -> &Board {
        &self.computer_board
    }

    pub fn targeting(&self) -> &TargetingState {
        self.ai.state()
    }

    /// Place the human's ship `index` during setup.
    pub fn place_player_ship(
        &mut self,
        index: usize,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        self.expect_phase(GamePhase::PlacingShips)?;
        self.player_board.place_ship(index, start, orientation)?;
        Ok(())
    }

    /// Place the human's ship `index` at a random legal spot.
    pub fn place_player_ship_randomly(&mut self, index: usize) -> Result<(), GameError> {
        self.expect_phase(GamePhase::PlacingShips)?;
        place_ship_randomly(&mut self.rng, &mut self.player_board, index)?;
        Ok(())
    }

    /// Next human ship still waiting for a position.
    pub fn next_unplaced_ship(&self) -> Option<usize> {
        self.player_board.fleet().next_unplaced()
    }

    /// Deploy the computer fleet from `saved` placement text, or at random if
    /// that fails, and hand the first turn to the player.
    pub fn start_battle(&mut self, saved: Option<&str>) -> Result<Deployment, GameError> {
        self.expect_phase(GamePhase::PlacingShips)?;
        if !self.player_board.is_deployed() {
            return Err(GameError::FleetIncomplete);
        }
        let deployment = deploy_fleet(&mut self.rng, &mut self.computer_board, saved)?;
        self.set_phase(GamePhase::PlayerTurn);
        Ok(deployment)
    }

    /// Fire the human's shot at the computer board. Invalid and repeated
    /// targets are reported but keep the turn.
    pub fn player_attack(&mut self, target: Coordinate) -> Result<TurnReport, GameError> {
        self.expect_phase(GamePhase::PlayerTurn)?;
        let result = self.computer_board.attack(target);
        if result.is_resolved() {
            self.player_shots += 1;
            if result.is_hit() {
                self.player_hits += 1;
            }
            self.advance(Side::Player, result);
        }
        Ok(TurnReport {
            shooter: Side::Player,
            target,
            result,
            phase: self.phase,
        })
    }

    /// Let the computer choose and fire its shot.
    pub fn computer_turn(&mut self) -> Result<TurnReport, GameError> {
        self.expect_phase(GamePhase::ComputerTurn)?;
        let target = self
            .ai
            .select_target(&mut self.rng, &self.player_board)
            .ok_or(GameError::NoTargets)?;
        let result = self.player_board.attack(target);
        self.ai.handle_guess_result(&self.player_board, target, result);
        if result.is_resolved() {
            self.advance(Side::Computer, result);
        }
        Ok(TurnReport {
            shooter: Side::Computer,
            target,
            result,
            phase: self.phase,
        })
    }

    /// Winner and counters once the game is over.
    pub fn summary(&self) -> Option<GameSummary> {
        match self.phase {
            GamePhase::GameOver { winner } => Some(GameSummary {
                winner,
                difficulty: self.config.difficulty,
                player_shots: self.player_shots,
                player_hits: self.player_hits,
            }),
            _ => None,
        }
    }

    /// Clear both boards and go back to ship placement.
    pub fn restart(&mut self) {
        self.player_board.clear();
        self.computer_board.clear();
        self.ai.reset(&mut self.rng);
        self.player_shots = 0;
        self.player_hits = 0;
        self.set_phase(GamePhase::PlacingShips);
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::WrongPhase(self.phase))
        }
    }

    /// Win check after a resolved shot, then hand over (or keep) the turn.
    fn advance(&mut self, shooter: Side, result: AttackResult) {
        if let Some(winner) = self.winner() {
            self.set_phase(GamePhase::GameOver { winner });
            return;
        }
        let keep_turn = self.config.turn_policy == TurnPolicy::ContinueOnHit && result.is_hit();
        let next = if keep_turn { shooter } else { shooter.opponent() };
        self.set_phase(match next {
            Side::Player => GamePhase::PlayerTurn,
            Side::Computer => GamePhase::ComputerTurn,
        });
    }

    fn winner(&self) -> Option<Side> {
        let sunk = |b: &Board| b.is_deployed() && b.all_ships_sunk();
        if sunk(&self.player_board) {
            Some(Side::Computer)
        } else if sunk(&self.computer_board) {
            Some(Side::Player)
        } else {
            None
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("{} -> {}", self.phase, phase);
        }
        self.phase = phase;
    }
}
