//! Ship definitions and per-ship hit tracking.

use alloc::vec::Vec;
use core::fmt;

use crate::common::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along the columns of its anchor row.
    Horizontal,
    /// Extends along the rows of its anchor column.
    Vertical,
}

impl Orientation {
    /// Single-letter tag used by the placement file and console input.
    pub fn as_char(self) -> char {
        match self {
            Orientation::Horizontal => 'H',
            Orientation::Vertical => 'V',
        }
    }

    /// Accepts `H`, `h`, `V` and `v`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'H' | 'h' => Some(Orientation::Horizontal),
            'V' | 'v' => Some(Orientation::Vertical),
            _ => None,
        }
    }

    /// Row/column step between consecutive segments.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// The five ship classes of the standard fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Aircraft Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    /// Number of cells the ship occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser => 3,
            ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Display name with whitespace removed, a single token for the
    /// placement file.
    pub fn sanitized_name(self) -> alloc::string::String {
        sanitize_name(self.name())
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Strip every whitespace character from `name`.
pub fn sanitize_name(name: &str) -> alloc::string::String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Cells covered by a ship of `size` anchored at `start`. Cells past the grid
/// edge are still produced so callers can reject them.
pub fn span(start: Coordinate, size: usize, orientation: Orientation) -> Vec<Coordinate> {
    let (dr, dc) = orientation.step();
    (0..size)
        .map(|i| {
            Coordinate::new(
                start.row.saturating_add(dr * i),
                start.col.saturating_add(dc * i),
            )
        })
        .collect()
}

/// A ship of the fleet. Unplaced ships have no positions; placed ships have
/// exactly `size` positions with a parallel hit flag for each.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    positions: Vec<Coordinate>,
    hits: Vec<bool>,
}

impl Ship {
    /// A new, unplaced ship.
    pub fn new(kind: ShipKind) -> Self {
        Self {
            kind,
            positions: Vec::new(),
            hits: Vec::new(),
        }
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn size(&self) -> usize {
        self.kind.size()
    }

    pub fn positions(&self) -> &[Coordinate] {
        &self.positions
    }

    /// Replace the ship's positions and clear its hits.
    pub fn set_positions(&mut self, coords: Vec<Coordinate>) {
        self.hits = alloc::vec![false; coords.len()];
        self.positions = coords;
    }

    pub fn is_placed(&self) -> bool {
        self.positions.len() == self.size()
    }

    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.positions.contains(&coord)
    }

    /// Record a hit at `coord`. Returns `false` without effect when the ship
    /// does not occupy it.
    pub fn register_hit(&mut self, coord: Coordinate) -> bool {
        match self.positions.iter().position(|p| *p == coord) {
            Some(i) => {
                self.hits[i] = true;
                true
            }
            None => false,
        }
    }

    /// An unplaced ship is never sunk.
    pub fn is_sunk(&self) -> bool {
        !self.hits.is_empty() && self.hits.iter().all(|h| *h)
    }

    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|h| **h).count()
    }

    /// First (lowest-index) cell of a placed ship.
    pub fn anchor(&self) -> Option<Coordinate> {
        self.positions.first().copied()
    }

    /// Inferred from the first two positions: equal rows means horizontal.
    pub fn orientation(&self) -> Option<Orientation> {
        match self.positions.as_slice() {
            [] => None,
            [_] => Some(Orientation::Horizontal),
            [a, b, ..] if a.row == b.row => Some(Orientation::Horizontal),
            _ => Some(Orientation::Vertical),
        }
    }

    /// Return the ship to the unplaced state.
    pub fn reset(&mut self) {
        self.positions.clear();
        self.hits.clear();
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ name: \"{}\", anchor: {:?}, orientation: {:?}, hits: {}/{} }}",
            self.name(),
            self.anchor(),
            self.orientation(),
            self.hit_count(),
            self.size(),
        )
    }
}
