use crate::ship::ShipKind;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Canonical fleet order. Placement prompts walk this order, so it is part of
/// the user-facing contract.
pub const SHIPS: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random anchors tried for a single ship before the whole fleet attempt is
/// abandoned.
pub const MAX_SHIP_ATTEMPTS: usize = 500;

/// Upper bound on whole-fleet attempts during random placement.
pub const MAX_FLEET_ATTEMPTS: usize = 10_000;

pub const DEFAULT_PLACEMENT_FILE: &str = "placement.txt";
pub const DEFAULT_STATS_FILE: &str = "stats.txt";

