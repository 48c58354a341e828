use criterion::{black_box, criterion_group, criterion_main, Criterion};
use crystal_grid::core::gravity::compact;
use crystal_grid::core::rng::{fill_random, SimpleRng};
use crystal_grid::core::{matching, Board, TurnController};
use crystal_grid::types::{Coord, CrystalKind, Direction};

fn seeded_board(seed: u32) -> Board {
    let mut board = Board::new(8, 8, Direction::Down).unwrap();
    fill_random(&mut board, &CrystalKind::ALL, &mut SimpleRng::new(seed)).unwrap();
    board
}

fn bench_resolve(c: &mut Criterion) {
    let mut board = seeded_board(12345);

    c.bench_function("resolve_8x8", |b| {
        b.iter(|| {
            black_box(matching::resolve(black_box(&mut board)));
        })
    });
}

fn bench_compact(c: &mut Criterion) {
    c.bench_function("compact_striped_8x8", |b| {
        b.iter(|| {
            // Every other row empty
            let rows: Vec<String> = (0..8)
                .map(|y| (if y % 2 == 0 { "........" } else { "RGBYPORG" }).to_string())
                .collect();
            let mut board = Board::from_rows(&rows, Direction::Down).unwrap();
            black_box(compact(&mut board).unwrap());
        })
    });
}

fn bench_fill(c: &mut Criterion) {
    c.bench_function("fill_random_8x8", |b| {
        b.iter(|| {
            black_box(seeded_board(black_box(7)));
        })
    });
}

fn bench_turn(c: &mut Criterion) {
    c.bench_function("turn_match_and_settle", |b| {
        b.iter(|| {
            let board = Board::from_rows(&["GYPO", "YPOG", "RRBR"], Direction::Down).unwrap();
            let mut turn = TurnController::new(board);
            black_box(turn.request_swap(Coord::new(2, 2), Direction::Right).unwrap());
        })
    });

    c.bench_function("turn_rollback", |b| {
        let board = seeded_board(99);
        let mut turn = TurnController::new(board);
        b.iter(|| {
            let _ = black_box(turn.request_swap(Coord::new(0, 0), Direction::Right));
        })
    });
}

criterion_group!(benches, bench_resolve, bench_compact, bench_fill, bench_turn);
criterion_main!(benches);
