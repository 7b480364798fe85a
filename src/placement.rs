//! Random fleet layout and the one-line-per-ship placement text format:
//!
//! ```text
//! AircraftCarrier A1 H
//! Battleship C5 V
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt::{self, Write};
use core::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::board::Board;
use crate::common::{BoardError, Coordinate, CoordinateError};
use crate::config::{BOARD_SIZE, MAX_FLEET_ATTEMPTS, MAX_SHIP_ATTEMPTS};
use crate::fleet::Fleet;
use crate::ship::{sanitize_name, Orientation};

const GRID: usize = BOARD_SIZE as usize;

/// Why a placement text was rejected. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("line {line}: expected `<name> <coordinate> <H|V>`")]
    MalformedLine { line: usize },
    #[error("line {line}: unknown or repeated ship '{name}'")]
    UnknownShip { line: usize, name: String },
    #[error("line {line}: bad coordinate")]
    BadCoordinate {
        line: usize,
        #[source]
        source: CoordinateError,
    },
    #[error("line {line}: orientation '{found}' is not H or V")]
    BadOrientation { line: usize, found: String },
    #[error("line {line}: cannot place ship")]
    Collision {
        line: usize,
        #[source]
        source: BoardError,
    },
    #[error("expected {expected} ships, found {found}")]
    WrongCount { expected: usize, found: usize },
}

/// One line of the placement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementEntry {
    /// Sanitized ship name.
    pub name: String,
    pub anchor: Coordinate,
    pub orientation: Orientation,
}

impl fmt::Display for PlacementEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.anchor, self.orientation.as_char())
    }
}

impl PlacementEntry {
    fn parse(line_no: usize, line: &str) -> Result<Self, PlacementError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [name, coord, orient] = tokens.as_slice() else {
            return Err(PlacementError::MalformedLine { line: line_no });
        };
        let anchor = Coordinate::from_str(coord).map_err(|source| {
            PlacementError::BadCoordinate {
                line: line_no,
                source,
            }
        })?;
        let mut chars = orient.chars();
        let orientation = match (chars.next(), chars.next()) {
            (Some(c), None) => Orientation::from_char(c),
            _ => None,
        }
        .ok_or_else(|| PlacementError::BadOrientation {
            line: line_no,
            found: orient.to_string(),
        })?;
        Ok(PlacementEntry {
            name: name.to_string(),
            anchor,
            orientation,
        })
    }
}

/// Place every fleet ship at random without overlap.
///
/// Each ship gets up to [`MAX_SHIP_ATTEMPTS`] random anchors; if one runs out
/// the board is cleared and the whole fleet starts over, at most
/// [`MAX_FLEET_ATTEMPTS`] times.
pub fn generate_random_placement<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
) -> Result<(), BoardError> {
    for attempt in 1..=MAX_FLEET_ATTEMPTS {
        board.clear();
        if place_fleet_once(rng, board) {
            log::debug!("fleet placed after {} attempt(s)", attempt);
            return Ok(());
        }
    }
    board.clear();
    log::warn!("gave up placing fleet after {} attempts", MAX_FLEET_ATTEMPTS);
    Err(BoardError::UnableToPlaceShip)
}

fn place_fleet_once<R: Rng + ?Sized>(rng: &mut R, board: &mut Board) -> bool {
    (0..board.fleet().len()).all(|index| place_ship_randomly(rng, board, index).is_ok())
}

/// Try up to [`MAX_SHIP_ATTEMPTS`] random anchors for fleet ship `index`.
pub fn place_ship_randomly<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    index: usize,
) -> Result<(), BoardError> {
    let size = board.ship(index).ok_or(BoardError::InvalidIndex)?.size();
    for _ in 0..MAX_SHIP_ATTEMPTS {
        let (start, orientation) = random_anchor(rng, size);
        if board.place_ship(index, start, orientation).is_ok() {
            return Ok(());
        }
    }
    Err(BoardError::UnableToPlaceShip)
}

/// Random orientation and an anchor that keeps a ship of `size` on the grid.
fn random_anchor<R: Rng + ?Sized>(rng: &mut R, size: usize) -> (Coordinate, Orientation) {
    let orientation = if rng.random_bool(0.5) {
        Orientation::Horizontal
    } else {
        Orientation::Vertical
    };
    let (max_row, max_col) = match orientation {
        Orientation::Horizontal => (GRID - 1, GRID - size),
        Orientation::Vertical => (GRID - size, GRID - 1),
    };
    let start = Coordinate::new(rng.random_range(0..=max_row), rng.random_range(0..=max_col));
    (start, orientation)
}

/// One line per placed ship: sanitized name, anchor and orientation.
/// Unplaced ships are skipped.
pub fn encode_placement(fleet: &Fleet) -> String {
    let mut out = String::new();
    for ship in fleet.iter() {
        let (Some(anchor), Some(orientation)) = (ship.anchor(), ship.orientation()) else {
            continue;
        };
        let entry = PlacementEntry {
            name: ship.kind().sanitized_name(),
            anchor,
            orientation,
        };
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", entry);
    }
    out
}

/// Rebuild `board`'s layout from placement text.
///
/// Every fleet ship must appear exactly once. On any error `board` is left
/// as it was and the caller is expected to regenerate.
pub fn decode_placement(text: &str, board: &mut Board) -> Result<(), PlacementError> {
    let mut staged = Board::with_fleet(board.fleet().clone());
    let mut unused: Vec<(usize, String)> = staged
        .fleet()
        .iter()
        .enumerate()
        .map(|(i, s)| (i, sanitize_name(s.name())))
        .collect();
    let mut placed = 0usize;

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }
        let entry = PlacementEntry::parse(line_no, line)?;
        let slot = unused
            .iter()
            .position(|(_, name)| *name == entry.name)
            .ok_or_else(|| PlacementError::UnknownShip {
                line: line_no,
                name: entry.name.clone(),
            })?;
        let (index, _) = unused.remove(slot);
        staged
            .place_ship(index, entry.anchor, entry.orientation)
            .map_err(|source| PlacementError::Collision {
                line: line_no,
                source,
            })?;
        placed += 1;
    }

    let expected = staged.fleet().len();
    if placed != expected {
        return Err(PlacementError::WrongCount {
            expected,
            found: placed,
        });
    }
    *board = staged;
    Ok(())
}

/// How a side's fleet was laid out by [`deploy_fleet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deployment {
    /// Restored from the saved placement text.
    Loaded,
    /// Freshly generated; carries the encoding to save for next time.
    Generated(String),
}

/// Load the saved layout if it decodes cleanly, otherwise generate a new one.
pub fn deploy_fleet<R: Rng + ?Sized>(
    rng: &mut R,
    board: &mut Board,
    saved: Option<&str>,
) -> Result<Deployment, BoardError> {
    if let Some(text) = saved {
        match decode_placement(text, board) {
            Ok(()) => {
                log::info!("fleet restored from saved placement");
                return Ok(Deployment::Loaded);
            }
            Err(e) => log::warn!("saved placement rejected ({}), regenerating", e),
        }
    }
    generate_random_placement(rng, board)?;
    Ok(Deployment::Generated(encode_placement(board.fleet())))
}
