//! Gravity module - compacts crystals toward the board's gravity direction
//!
//! Each lane (a column for vertical gravity, a row for horizontal gravity) is
//! swept starting at its sink, the cell on the gravity-side boundary. Every
//! crystal met on the way drops through the run of empty cells below it in a
//! single move, so one pass leaves no gaps and keeps lane order.

use serde::Serialize;

use crate::board::Board;
use crate::crystal::CrystalId;
use crate::error::LogicFault;
use crate::topology::CellId;
use crate::types::{Coord, CrystalKind, Direction};

/// One crystal relocation produced by compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fall {
    pub crystal: CrystalId,
    pub kind: CrystalKind,
    pub from: Coord,
    pub to: Coord,
}

/// Compact the whole board once.
///
/// Returns the moves in sweep order. Crystals are never created, destroyed
/// or retyped here.
pub fn compact(board: &mut Board) -> Result<Vec<Fall>, LogicFault> {
    let gravity = board.gravity();
    let rise = gravity.opposite();
    let mut falls = Vec::new();

    for sink in board.topology().boundary(gravity) {
        let mut cursor = Some(sink);
        while let Some(id) = cursor {
            if let Some(fall) = settle(board, id, gravity)? {
                falls.push(fall);
            }
            cursor = board.neighbor(id, rise);
        }
    }

    Ok(falls)
}

/// Move the crystal at `start` as far along `gravity` as empty cells allow.
fn settle(
    board: &mut Board,
    start: CellId,
    gravity: Direction,
) -> Result<Option<Fall>, LogicFault> {
    if board.cell(start).is_empty() {
        return Ok(None);
    }

    let mut target = start;
    while let Some(next) = board.neighbor(target, gravity) {
        if !board.cell(next).is_empty() {
            break;
        }
        target = next;
    }
    if target == start {
        return Ok(None);
    }

    let Some(crystal) = board.cell_mut(start).take() else {
        return Ok(None);
    };
    let fall = Fall {
        crystal: crystal.id(),
        kind: crystal.kind(),
        from: board.topology().coord_of(start),
        to: board.topology().coord_of(target),
    };
    board.cell_mut(target).place(crystal)?;
    Ok(Some(fall))
}

/// True when no crystal has an empty cell directly in the gravity direction.
pub fn is_settled(board: &Board) -> bool {
    let gravity = board.gravity();
    board.cells().iter().all(|cell| {
        cell.is_empty()
            || board
                .neighbor(cell.id(), gravity)
                .map_or(true, |n| !board.cell(n).is_empty())
    })
}
