use broadside::{create_fleet, sanitize_name, Coordinate, Orientation, Ship, ShipKind, SHIPS};

fn placed(kind: ShipKind, start: Coordinate, orientation: Orientation) -> Ship {
    let mut ship = Ship::new(kind);
    ship.set_positions(broadside::span(start, kind.size(), orientation));
    ship
}

#[test]
fn test_fleet_order_and_sizes() {
    let fleet = create_fleet();
    let layout: Vec<(&str, usize)> = fleet.iter().map(|s| (s.name(), s.size())).collect();
    assert_eq!(
        layout,
        vec![
            ("Aircraft Carrier", 5),
            ("Battleship", 4),
            ("Cruiser", 3),
            ("Submarine", 3),
            ("Destroyer", 2),
        ]
    );
    assert_eq!(fleet.len(), SHIPS.len());
    assert!(fleet.iter().all(|s| !s.is_placed()));
    assert_eq!(fleet.next_unplaced(), Some(0));
}

#[test]
fn test_unplaced_ship_is_never_sunk() {
    let ship = Ship::new(ShipKind::Destroyer);
    assert!(!ship.is_placed());
    assert!(!ship.is_sunk());
    assert_eq!(ship.anchor(), None);
    assert_eq!(ship.orientation(), None);
}

#[test]
fn test_register_hit_and_sunk() {
    let mut ship = placed(ShipKind::Destroyer, Coordinate::new(1, 1), Orientation::Horizontal);
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(Coordinate::new(1, 1)));
    assert!(!ship.is_sunk());
    // miss is a no-op
    assert!(!ship.register_hit(Coordinate::new(0, 0)));
    assert_eq!(ship.hit_count(), 1);
    // same cell twice does not count twice
    assert!(ship.register_hit(Coordinate::new(1, 1)));
    assert!(!ship.is_sunk());
    assert!(ship.register_hit(Coordinate::new(1, 2)));
    assert!(ship.is_sunk());
}

#[test]
fn test_set_positions_resets_hits() {
    let mut ship = placed(ShipKind::Destroyer, Coordinate::new(0, 0), Orientation::Vertical);
    ship.register_hit(Coordinate::new(0, 0));
    ship.register_hit(Coordinate::new(1, 0));
    assert!(ship.is_sunk());
    ship.set_positions(vec![Coordinate::new(5, 5), Coordinate::new(5, 6)]);
    assert_eq!(ship.hit_count(), 0);
    assert!(!ship.is_sunk());
    ship.reset();
    assert!(ship.positions().is_empty());
}

#[test]
fn test_orientation_inferred_from_positions() {
    let h = placed(ShipKind::Cruiser, Coordinate::new(4, 2), Orientation::Horizontal);
    let v = placed(ShipKind::Cruiser, Coordinate::new(4, 2), Orientation::Vertical);
    assert_eq!(h.orientation(), Some(Orientation::Horizontal));
    assert_eq!(v.orientation(), Some(Orientation::Vertical));
    assert_eq!(v.anchor(), Some(Coordinate::new(4, 2)));
    assert!(v.occupies(Coordinate::new(6, 2)));
    assert!(!v.occupies(Coordinate::new(4, 3)));
}

#[test]
fn test_sanitized_names() {
    assert_eq!(ShipKind::Carrier.sanitized_name(), "AircraftCarrier");
    assert_eq!(ShipKind::Submarine.sanitized_name(), "Submarine");
    assert_eq!(sanitize_name(" Patrol\tBoat \n"), "PatrolBoat");
}

#[test]
fn test_orientation_chars() {
    assert_eq!(Orientation::from_char('h'), Some(Orientation::Horizontal));
    assert_eq!(Orientation::from_char('V'), Some(Orientation::Vertical));
    assert_eq!(Orientation::from_char('x'), None);
    assert_eq!(Orientation::Vertical.as_char(), 'V');
}
