//! Hunt/target shot selection for the computer player.
//!
//! Shots come from three sources, in priority order:
//!
//! 1. the hit queue (Medium and Hard): neighbours of earlier hits, newest first;
//! 2. a hunt around the last hit (Hard only), in shuffled order;
//! 3. a shuffled pool of every cell, refilled once exhausted.
//!
//! The state lives in [`TargetingState`] and is threaded through
//! [`select_target`] and [`record_result`] explicitly.

use alloc::vec::Vec;
use core::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::common::{AttackResult, BoardError, Coordinate};
use crate::placement::generate_random_placement;

/// Computer skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize, clap::ValueEnum)
)]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    /// Random shots only.
    Easy,
    /// Follows up hits through the hit queue.
    #[default]
    Medium,
    /// Hit queue plus a hunt around the last hit.
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// Per-game memory of the targeting engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetingState {
    /// Candidate cells next to unresolved hits; popped from the back.
    hit_queue: Vec<Coordinate>,
    last_hit: Option<Coordinate>,
    hunting: bool,
    /// Shuffled random-search pool; drawn from the back.
    shots: Vec<Coordinate>,
}

impl TargetingState {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut state = Self {
            hit_queue: Vec::new(),
            last_hit: None,
            hunting: false,
            shots: Vec::new(),
        };
        state.refill_shots(rng);
        state
    }

    /// Forget hits and refill the random pool, ready for a new game.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.clear_target();
        self.refill_shots(rng);
    }

    /// Restock the pool with all 100 cells in random order.
    pub fn refill_shots<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shots.clear();
        self.shots.extend(Coordinate::all());
        self.shots.shuffle(rng);
    }

    pub fn hit_queue(&self) -> &[Coordinate] {
        &self.hit_queue
    }

    pub fn last_hit(&self) -> Option<Coordinate> {
        self.last_hit
    }

    pub fn is_hunting(&self) -> bool {
        self.hunting
    }

    pub fn shots_remaining(&self) -> usize {
        self.shots.len()
    }

    fn clear_target(&mut self) {
        self.hit_queue.clear();
        self.hunting = false;
        self.last_hit = None;
    }

    fn pop_queued(&mut self, board: &Board) -> Option<Coordinate> {
        // Entries can go stale when a neighbour is shot through another route.
        while let Some(c) = self.hit_queue.pop() {
            if !board.is_attacked(c) {
                return Some(c);
            }
        }
        None
    }

    fn hunt_adjacent<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<Coordinate> {
        let last = self.last_hit?;
        let mut adjacent: Vec<Coordinate> = last.neighbors().collect();
        adjacent.shuffle(rng);
        adjacent.into_iter().find(|c| !board.is_attacked(*c))
    }

    fn draw_random(&mut self, board: &Board) -> Option<Coordinate> {
        while let Some(c) = self.shots.pop() {
            if !board.is_attacked(c) {
                return Some(c);
            }
        }
        None
    }
}

/// Pick the next cell to fire at on `board`. Returns `None` only when every
/// cell has already been attacked.
pub fn select_target<R: Rng + ?Sized>(
    difficulty: Difficulty,
    state: &mut TargetingState,
    board: &Board,
    rng: &mut R,
) -> Option<Coordinate> {
    if difficulty != Difficulty::Easy {
        if let Some(c) = state.pop_queued(board) {
            log::debug!("targeting queued cell {}", c);
            return Some(c);
        }
    }
    if difficulty == Difficulty::Hard && state.hunting {
        if let Some(c) = state.hunt_adjacent(board, rng) {
            log::debug!("hunting next to {:?}: {}", state.last_hit, c);
            return Some(c);
        }
    }
    if let Some(c) = state.draw_random(board) {
        return Some(c);
    }
    state.refill_shots(rng);
    state.draw_random(board)
}

/// Update the targeting memory with the outcome of a shot at `target`.
/// `board` must already reflect the shot.
pub fn record_result(
    difficulty: Difficulty,
    state: &mut TargetingState,
    board: &Board,
    target: Coordinate,
    result: AttackResult,
) {
    match result {
        AttackResult::Miss => state.hunting = false,
        AttackResult::Hit(_) if difficulty != Difficulty::Easy => {
            state.last_hit = Some(target);
            state.hunting = true;
            state
                .hit_queue
                .extend(target.neighbors().filter(|c| !board.is_attacked(*c)));
        }
        AttackResult::Sunk(_) => state.clear_target(),
        _ => {}
    }
}

/// Computer opponent: a difficulty plus its targeting memory.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    difficulty: Difficulty,
    state: TargetingState,
}

impl AiPlayer {
    pub fn new<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> Self {
        Self {
            difficulty,
            state: TargetingState::new(rng),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn state(&self) -> &TargetingState {
        &self.state
    }

    /// Lay out the computer's own fleet at random.
    pub fn place_ships<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &mut Board,
    ) -> Result<(), BoardError> {
        generate_random_placement(rng, board)
    }

    /// Next cell to attack on the opponent's `board`.
    pub fn select_target<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        board: &Board,
    ) -> Option<Coordinate> {
        select_target(self.difficulty, &mut self.state, board, rng)
    }

    /// Feed back the result of the shot chosen by [`AiPlayer::select_target`].
    pub fn handle_guess_result(&mut self, board: &Board, target: Coordinate, result: AttackResult) {
        record_result(self.difficulty, &mut self.state, board, target, result);
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.state.reset(rng);
    }
}
