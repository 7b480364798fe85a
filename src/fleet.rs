//! The five-ship fleet owned by one side.

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::config::SHIPS;
use crate::ship::Ship;

/// Ordered arena of ships. Boards refer to ships by their index here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

/// The canonical fleet: Aircraft Carrier(5), Battleship(4), Cruiser(3),
/// Submarine(3), Destroyer(2), all unplaced.
pub fn create_fleet() -> Fleet {
    Fleet {
        ships: SHIPS.iter().map(|kind| Ship::new(*kind)).collect(),
    }
}

impl Default for Fleet {
    fn default() -> Self {
        create_fleet()
    }
}

impl Fleet {
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Ship> {
        self.ships.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Ship> {
        self.ships.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Index of the first ship that has not been placed yet.
    pub fn next_unplaced(&self) -> Option<usize> {
        self.ships.iter().position(|s| !s.is_placed())
    }

    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// Unplace every ship.
    pub fn reset(&mut self) {
        self.ships.iter_mut().for_each(Ship::reset);
    }
}

impl Index<usize> for Fleet {
    type Output = Ship;

    fn index(&self, index: usize) -> &Ship {
        &self.ships[index]
    }
}

impl IndexMut<usize> for Fleet {
    fn index_mut(&mut self, index: usize) -> &mut Ship {
        &mut self.ships[index]
    }
}
