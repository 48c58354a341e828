//! RNG module - deterministic crystal placement
//!
//! Provides a simple LCG for reproducible boards and the random initial fill.
//! The same seed and kind set always produce the same board.

use crate::board::Board;
use crate::error::LogicFault;
use crate::topology::CellId;
use crate::types::{CrystalKind, Direction, MIN_RUN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max
    }

    /// Pick one element of a non-empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.next_range(items.len() as u32) as usize])
    }

    /// Current state (feeds a follow-up generator deterministically)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Fill every empty cell with a random kind from `kinds`.
///
/// A draw that would complete a run of three with the two cells before it
/// (to the left, or above) is re-rolled among the remaining kinds, so a
/// fresh board normally starts without matches. With fewer than two kinds
/// available that is not always possible and the draw is kept.
pub fn fill_random(
    board: &mut Board,
    kinds: &[CrystalKind],
    rng: &mut SimpleRng,
) -> Result<usize, LogicFault> {
    let mut placed = 0;
    for index in 0..board.topology().len() {
        let id = CellId(index as u16);
        if !board.cell(id).is_empty() {
            continue;
        }

        let blocked = [
            completes_run(board, id, Direction::Left),
            completes_run(board, id, Direction::Up),
        ];
        let allowed: Vec<CrystalKind> = kinds
            .iter()
            .copied()
            .filter(|k| !blocked.contains(&Some(*k)))
            .collect();

        let pool = if allowed.is_empty() { kinds } else { &allowed };
        let Some(kind) = rng.pick(pool) else {
            return Ok(placed);
        };
        board.place_crystal(id, kind)?;
        placed += 1;
    }
    Ok(placed)
}

/// Kind that would complete a run ending at `id` when placed there, looking
/// back along `direction`.
fn completes_run(board: &Board, id: CellId, direction: Direction) -> Option<CrystalKind> {
    let mut cursor = board.neighbor(id, direction);
    let mut kind = None;
    for _ in 1..MIN_RUN {
        let here = cursor?;
        let k = board.cell(here).crystal()?.kind();
        if kind.is_some_and(|prev| prev != k) {
            return None;
        }
        kind = Some(k);
        cursor = board.neighbor(here, direction);
    }
    kind
}
