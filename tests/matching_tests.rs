//! Match resolution tests

use crystal_grid::core::rng::SimpleRng;
use crystal_grid::core::{matching, Board};
use crystal_grid::types::{Coord, CrystalKind, Direction};

fn board(rows: &[&str]) -> Board {
    Board::from_rows(rows, Direction::Down).unwrap()
}

fn marked(b: &Board) -> Vec<Coord> {
    b.cells()
        .iter()
        .filter(|c| c.crystal().is_some_and(|x| x.is_marked()))
        .map(|c| c.coord())
        .collect()
}

/// Length of the same-kind run through `at` along the axis of `forward`.
fn run_length(b: &Board, at: Coord, forward: Direction) -> usize {
    let Some(kind) = b.kind_at(at) else {
        return 0;
    };
    let mut len = 1;
    for direction in [forward, forward.opposite()] {
        let mut cursor = at.step(direction);
        while let Some(c) = cursor {
            if b.kind_at(c) != Some(kind) {
                break;
            }
            len += 1;
            cursor = c.step(direction);
        }
    }
    len
}

#[test]
fn test_row_of_three_in_a_row_of_four() {
    let mut b = board(&["RRRB"]);
    let report = matching::resolve(&mut b);
    assert_eq!(report.len(), 3);
    assert_eq!(
        marked(&b),
        vec![Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0)]
    );
}

#[test]
fn test_pairs_never_mark() {
    let mut b = board(&["RRGG", "BBYY", "RRGG"]);
    assert!(matching::resolve(&mut b).is_empty());
    assert_eq!(b.marked_count(), 0);
}

#[test]
fn test_cross_marks_both_arms() {
    let mut b = board(&[".G.", "GGG", ".G."]);
    assert_eq!(matching::resolve(&mut b).len(), 5);
}

#[test]
fn test_empty_cell_breaks_a_run() {
    let mut b = board(&["RR.RR"]);
    assert!(matching::resolve(&mut b).is_empty());
}

#[test]
fn test_every_mark_belongs_to_a_run_of_three() {
    let kinds = [CrystalKind::Red, CrystalKind::Green, CrystalKind::Blue];
    let mut rng = SimpleRng::new(2024);

    for _ in 0..40 {
        let mut b = Board::new(7, 7, Direction::Down).unwrap();
        for id in b.topology().ids().collect::<Vec<_>>() {
            // Leave some holes so runs get broken by empty cells too.
            if rng.next_range(6) == 0 {
                continue;
            }
            let kind = rng.pick(&kinds).unwrap();
            b.place_crystal(id, kind).unwrap();
        }

        matching::resolve(&mut b);
        for cell in b.cells() {
            let Some(crystal) = cell.crystal() else {
                continue;
            };
            let at = cell.coord();
            let longest = run_length(&b, at, Direction::Right)
                .max(run_length(&b, at, Direction::Down));
            assert_eq!(
                crystal.is_marked(),
                longest >= 3,
                "cell {} with run {} in {:?}",
                at,
                longest,
                b.to_rows()
            );
        }
    }
}
