//! Board tests - topology, occupancy and swap primitives

use crystal_grid::core::{Board, SwapRejected};
use crystal_grid::types::{Coord, CrystalKind, Direction};

fn board(rows: &[&str]) -> Board {
    Board::from_rows(rows, Direction::Down).unwrap()
}

/// Every crystal is held by exactly one cell and points back at it.
fn assert_occupancy(board: &Board) {
    let mut ids: Vec<_> = board.crystals().map(|c| c.id()).collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total, "a crystal id appears in two cells");

    for cell in board.cells() {
        if let Some(crystal) = cell.crystal() {
            assert_eq!(crystal.cell(), cell.id());
            assert_eq!(board.locate(crystal), cell.coord());
        }
    }
}

#[test]
fn test_board_new_empty() {
    let b = Board::new(5, 3, Direction::Down).unwrap();
    assert_eq!(b.width(), 5);
    assert_eq!(b.height(), 3);
    assert_eq!(b.occupied_count(), 0);
    assert!(b.cells().iter().all(|c| c.is_empty()));
}

#[test]
fn test_board_rejects_empty_dimensions() {
    assert!(Board::new(0, 4, Direction::Down).is_err());
    assert!(Board::new(4, 0, Direction::Down).is_err());
}

#[test]
fn test_edge_cells_have_fewer_neighbors() {
    let b = Board::new(3, 3, Direction::Down).unwrap();
    let corner = b.id_of(Coord::new(0, 0)).unwrap();
    let edge = b.id_of(Coord::new(1, 0)).unwrap();
    let center = b.id_of(Coord::new(1, 1)).unwrap();

    assert_eq!(b.topology().neighbors(corner).len(), 2);
    assert_eq!(b.topology().neighbors(edge).len(), 3);
    assert_eq!(b.topology().neighbors(center).len(), 4);
    assert_eq!(b.neighbor(corner, Direction::Up), None);
    assert_eq!(b.neighbor(corner, Direction::Left), None);
}

#[test]
fn test_neighbor_links_are_symmetric() {
    let b = Board::new(4, 5, Direction::Down).unwrap();
    for id in b.topology().ids() {
        for direction in Direction::ALL {
            if let Some(n) = b.neighbor(id, direction) {
                assert_eq!(b.neighbor(n, direction.opposite()), Some(id));
            }
        }
    }
}

#[test]
fn test_swap_into_empty_neighbor_is_rejected() {
    let mut b = board(&["RB", ".G"]);
    let before = b.to_rows();

    let err = b.attempt_swap(Coord::new(0, 0), Direction::Down).unwrap_err();
    assert_eq!(
        err,
        SwapRejected::NeighborEmpty {
            at: Coord::new(0, 0),
            direction: Direction::Down
        }
    );
    assert_eq!(b.to_rows(), before);
}

#[test]
fn test_swap_off_the_edge_is_rejected() {
    let mut b = board(&["RB"]);
    assert_eq!(
        b.attempt_swap(Coord::new(1, 0), Direction::Right),
        Err(SwapRejected::NoNeighbor {
            at: Coord::new(1, 0),
            direction: Direction::Right
        })
    );
    assert_eq!(
        b.attempt_swap(Coord::new(7, 0), Direction::Left),
        Err(SwapRejected::OutOfBounds(Coord::new(7, 0)))
    );
}

#[test]
fn test_swap_twice_restores_occupancy() {
    let mut b = board(&["RGB", "YPO"]);
    let before: Vec<_> = b.crystals().map(|c| (c.id(), c.kind())).collect();

    b.attempt_swap(Coord::new(1, 0), Direction::Down).unwrap();
    assert_eq!(b.kind_at(Coord::new(1, 0)), Some(CrystalKind::Purple));
    assert_occupancy(&b);

    b.attempt_swap(Coord::new(1, 0), Direction::Down).unwrap();
    let after: Vec<_> = b.crystals().map(|c| (c.id(), c.kind())).collect();
    assert_eq!(before, after);
    assert_occupancy(&b);
}

#[test]
fn test_undo_swap_restores_both_cells() {
    let mut b = board(&["RG"]);
    let record = b.attempt_swap(Coord::new(0, 0), Direction::Right).unwrap();
    assert_eq!(b.to_rows(), vec!["GR"]);

    b.undo_swap(&record).unwrap();
    assert_eq!(b.to_rows(), vec!["RG"]);
    assert_occupancy(&b);
}

#[test]
fn test_place_into_occupied_cell_is_a_fault() {
    let mut b = board(&["R"]);
    let id = b.id_of(Coord::new(0, 0)).unwrap();
    assert!(b.place_crystal(id, CrystalKind::Blue).is_err());
    assert_eq!(b.kind_at(Coord::new(0, 0)), Some(CrystalKind::Red));
}
