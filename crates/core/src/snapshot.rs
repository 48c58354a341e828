use serde::Serialize;

use crate::board::Board;
use crate::types::{CrystalKind, Direction, TurnPhase};

/// Serializable copy of a board, for hosts and tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub width: u8,
    pub height: u8,
    pub gravity: Direction,
    pub phase: TurnPhase,
    /// Row-major, `y * width + x`
    pub cells: Vec<Option<CrystalKind>>,
    pub board_hash: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, phase: TurnPhase) -> Self {
        let cells = board
            .cells()
            .iter()
            .map(|cell| cell.crystal().map(|c| c.kind()))
            .collect();
        Self {
            width: board.width(),
            height: board.height(),
            gravity: board.gravity(),
            phase,
            cells,
            board_hash: board_hash(board),
        }
    }

    pub fn kind_at(&self, x: u8, y: u8) -> Option<CrystalKind> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }
}

/// FNV-1a 64 over the row-major kind codes, 0 for an empty cell.
pub fn board_hash(board: &Board) -> u64 {
    let mut codes = Vec::with_capacity(board.topology().len());
    board.write_codes(&mut codes);
    fnv1a64(&codes)
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    let mut h = OFFSET_BASIS;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(PRIME);
    }
    h
}
