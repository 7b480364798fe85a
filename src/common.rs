//! Common types for Broadside: coordinates, attack results and board errors.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::config::BOARD_SIZE;

const GRID: usize = BOARD_SIZE as usize;

/// A cell on the board. `row` maps to the letters A-J and `col` to the
/// displayed columns 1-10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the coordinate lies on the 10×10 grid.
    pub const fn in_bounds(&self) -> bool {
        self.row < GRID && self.col < GRID
    }

    /// Coordinate shifted by one step along `row`/`col`, or `None` when the
    /// step would leave the grid.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Coordinate> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let c = Coordinate::new(row, col);
        c.in_bounds().then_some(c)
    }

    /// In-bounds orthogonal neighbours in the order up, down, left, right.
    pub fn neighbors(&self) -> impl Iterator<Item = Coordinate> {
        let origin = *self;
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| origin.offset(dr, dc))
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..GRID).flat_map(|row| (0..GRID).map(move |col| Coordinate::new(row, col)))
    }
}

impl fmt::Display for Coordinate {
    /// Off-grid coordinates render as `?`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return f.write_str("?");
        }
        let letter = char::from(b'A' + self.row as u8);
        write!(f, "{}{}", letter, self.col + 1)
    }
}

/// Reasons a coordinate string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("coordinate is too short, expected a letter and a number (e.g. A5)")]
    TooShort,
    #[error("row '{0}' is out of range, must be a letter A-J")]
    BadRow(char),
    #[error("column must be a number 1-10")]
    BadColumn,
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Case-insensitive, whitespace is ignored anywhere in the input.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut chars = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase());
        let row_ch = chars.next().ok_or(CoordinateError::TooShort)?;
        if !('A'..='J').contains(&row_ch) {
            return Err(CoordinateError::BadRow(row_ch));
        }

        let mut col = 0usize;
        let mut digits = 0usize;
        for ch in chars {
            let d = ch.to_digit(10).ok_or(CoordinateError::BadColumn)?;
            digits += 1;
            if digits > 2 {
                return Err(CoordinateError::BadColumn);
            }
            col = col * 10 + d as usize;
        }
        if digits == 0 {
            return Err(CoordinateError::TooShort);
        }
        if !(1..=GRID).contains(&col) {
            return Err(CoordinateError::BadColumn);
        }
        Ok(Coordinate::new((row_ch as u8 - b'A') as usize, col - 1))
    }
}

/// Result of an attack against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum AttackResult {
    /// Target is off the grid; nothing changed.
    Invalid,
    /// Target was attacked before; nothing changed.
    AlreadyTried,
    /// Shot landed in open water.
    Miss,
    /// Shot struck a ship that is still afloat, carrying its name.
    Hit(&'static str),
    /// Shot sank a ship, carrying its name.
    Sunk(&'static str),
}

impl AttackResult {
    /// Miss, Hit and Sunk consume a turn; Invalid and AlreadyTried do not.
    pub fn is_resolved(&self) -> bool {
        matches!(self, AttackResult::Miss | AttackResult::Hit(_) | AttackResult::Sunk(_))
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AttackResult::Hit(_) | AttackResult::Sunk(_))
    }

    /// Name of the struck ship for Hit and Sunk.
    pub fn ship_name(&self) -> Option<&'static str> {
        match self {
            AttackResult::Hit(name) | AttackResult::Sunk(name) => Some(name),
            _ => None,
        }
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Specified ship index is out of range.
    #[error("ship index is out of range")]
    InvalidIndex,
    /// Ship would extend past the edge of the grid.
    #[error("ship placement is out of bounds")]
    ShipOutOfBounds,
    /// Ship placement overlaps another ship.
    #[error("ship placement overlaps with another ship")]
    ShipOverlaps,
    /// Random placement gave up.
    #[error("unable to place ship")]
    UnableToPlaceShip,
}
