//! Game board state: cell occupancy, attacks and the fleet placed on it.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{AttackResult, BoardError, Coordinate};
use crate::config::BOARD_SIZE;
use crate::fleet::{create_fleet, Fleet};
use crate::ship::{span, Orientation, Ship};

const GRID: usize = BOARD_SIZE as usize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cell {
    /// Index into the board's fleet.
    ship: Option<usize>,
    attacked: bool,
}

/// What a front end should draw for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum CellView {
    Water,
    Ship,
    Miss,
    Hit,
    Sunk,
}

impl CellView {
    /// Console symbol: `~` water, `S` ship, `O` miss, `X` hit or sunk.
    pub fn symbol(self) -> char {
        match self {
            CellView::Water => '~',
            CellView::Ship => 'S',
            CellView::Miss => 'O',
            CellView::Hit | CellView::Sunk => 'X',
        }
    }
}

/// A 10×10 grid plus the fleet it holds. Cells refer to ships by fleet index.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    fleet: Fleet,
    grid: [[Cell; GRID]; GRID],
    /// Fleet indices of ships placed on this board, in placement order.
    placed: Vec<usize>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board carrying the canonical, unplaced fleet.
    pub fn new() -> Self {
        Self::with_fleet(create_fleet())
    }

    pub fn with_fleet(mut fleet: Fleet) -> Self {
        fleet.reset();
        Board {
            fleet,
            grid: [[Cell::default(); GRID]; GRID],
            placed: Vec::new(),
        }
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn ship(&self, index: usize) -> Option<&Ship> {
        self.fleet.get(index)
    }

    /// Reset every cell, forget placed ships and unplace the fleet.
    pub fn clear(&mut self) {
        self.grid = [[Cell::default(); GRID]; GRID];
        self.placed.clear();
        self.fleet.reset();
    }

    /// Place fleet ship `index` with its first cell at `start`.
    ///
    /// All cells are validated before anything is mutated, so a failed call
    /// leaves both the board and the ship untouched. Placing an already placed
    /// ship moves it.
    pub fn place_ship(
        &mut self,
        index: usize,
        start: Coordinate,
        orientation: Orientation,
    ) -> Result<(), BoardError> {
        let size = self.fleet.get(index).ok_or(BoardError::InvalidIndex)?.size();
        let cells = span(start, size, orientation);
        for c in &cells {
            if !c.in_bounds() {
                return Err(BoardError::ShipOutOfBounds);
            }
            if matches!(self.grid[c.row][c.col].ship, Some(other) if other != index) {
                return Err(BoardError::ShipOverlaps);
            }
        }

        for old in self.fleet[index].positions() {
            self.grid[old.row][old.col].ship = None;
        }
        for c in &cells {
            self.grid[c.row][c.col].ship = Some(index);
        }
        self.fleet[index].set_positions(cells);
        if !self.placed.contains(&index) {
            self.placed.push(index);
        }
        Ok(())
    }

    /// Fire at `target`. Each in-bounds cell resolves exactly once; later
    /// shots at it report `AlreadyTried`.
    pub fn attack(&mut self, target: Coordinate) -> AttackResult {
        if !target.in_bounds() {
            return AttackResult::Invalid;
        }
        let cell = &mut self.grid[target.row][target.col];
        if cell.attacked {
            return AttackResult::AlreadyTried;
        }
        cell.attacked = true;

        let Some(index) = cell.ship else {
            return AttackResult::Miss;
        };
        let ship = &mut self.fleet[index];
        ship.register_hit(target);
        if ship.is_sunk() {
            AttackResult::Sunk(ship.name())
        } else {
            AttackResult::Hit(ship.name())
        }
    }

    /// Every placed ship is sunk. Vacuously true before anything is placed,
    /// so callers check [`Board::is_deployed`] first.
    pub fn all_ships_sunk(&self) -> bool {
        self.placed.iter().all(|&i| self.fleet[i].is_sunk())
    }

    /// Whole fleet is on the board.
    pub fn is_deployed(&self) -> bool {
        self.fleet.all_placed()
    }

    /// Placed ships with their fleet index.
    pub fn placed_ships(&self) -> impl Iterator<Item = (usize, &Ship)> {
        self.placed.iter().map(move |&i| (i, &self.fleet[i]))
    }

    /// Placed ships still afloat.
    pub fn ships_remaining(&self) -> usize {
        self.placed_ships().filter(|(_, s)| !s.is_sunk()).count()
    }

    /// A ship covers `coord`. False off the grid.
    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        coord.in_bounds() && self.grid[coord.row][coord.col].ship.is_some()
    }

    pub fn is_attacked(&self, coord: Coordinate) -> bool {
        coord.in_bounds() && self.grid[coord.row][coord.col].attacked
    }

    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        if !coord.in_bounds() {
            return None;
        }
        self.grid[coord.row][coord.col].ship.map(|i| &self.fleet[i])
    }

    /// Cell as a front end should draw it. Unattacked ships are only shown
    /// when `reveal` is set. Out-of-bounds cells read as water.
    pub fn cell_view(&self, coord: Coordinate, reveal: bool) -> CellView {
        if !coord.in_bounds() {
            return CellView::Water;
        }
        let cell = self.grid[coord.row][coord.col];
        match (cell.attacked, cell.ship) {
            (true, None) => CellView::Miss,
            (true, Some(i)) if self.fleet[i].is_sunk() => CellView::Sunk,
            (true, Some(_)) => CellView::Hit,
            (false, Some(_)) if reveal => CellView::Ship,
            _ => CellView::Water,
        }
    }

    pub fn cell_symbol(&self, coord: Coordinate, reveal: bool) -> char {
        self.cell_view(coord, reveal).symbol()
    }

    /// Number of attacked cells.
    pub fn shots_taken(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.attacked).count()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for row in 0..GRID {
            write!(f, "  ")?;
            for col in 0..GRID {
                write!(f, "{}", self.cell_symbol(Coordinate::new(row, col), true))?;
            }
            writeln!(f)?;
        }
        write!(f, "  ships: {:?}\n}}", self.fleet)
    }
}
