//! Match resolution - marks every crystal in a same-kind run of three or more
//!
//! The test is local: a cell confirms a run on an axis when both of its
//! opposite neighbours on that axis hold a crystal of its own kind. The run
//! is then walked outward in both directions, marking every same-kind cell
//! until the first mismatch, gap or edge. Longer runs are covered because
//! each interior cell confirms on its own, and L/T clusters are covered
//! because each arm confirms on its own axis.
//!
//! Marks only ever go from unset to set during a pass, so scan order does not
//! change the resulting mark set.

use crate::board::Board;
use crate::topology::CellId;
use crate::types::{Axis, CrystalKind, Direction};

/// Cells whose crystals were newly marked by a pass, in marking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchReport {
    pub marked: Vec<CellId>,
}

impl MatchReport {
    pub fn is_empty(&self) -> bool {
        self.marked.is_empty()
    }

    pub fn len(&self) -> usize {
        self.marked.len()
    }
}

/// Run a full resolution pass: clear old marks, then mark every run.
pub fn resolve(board: &mut Board) -> MatchReport {
    board.clear_marks();
    mark_runs(board)
}

/// Mark runs without clearing existing marks first.
pub fn mark_runs(board: &mut Board) -> MatchReport {
    let mut report = MatchReport::default();

    for index in 0..board.topology().len() {
        let seed = CellId(index as u16);
        for axis in Axis::ALL {
            let Some(kind) = kind_of(board, Some(seed)) else {
                break;
            };
            let (forward, backward) = axis.directions();
            if kind_of(board, board.neighbor(seed, forward)) != Some(kind)
                || kind_of(board, board.neighbor(seed, backward)) != Some(kind)
            {
                continue;
            }

            mark(board, seed, &mut report);
            walk(board, seed, forward, kind, &mut report);
            walk(board, seed, backward, kind, &mut report);
        }
    }

    report
}

/// Mark same-kind cells outward from `seed`, stopping before the first
/// mismatch. Each step moves one cell toward the edge, so the walk is
/// bounded by the board dimension.
fn walk(
    board: &mut Board,
    seed: CellId,
    direction: Direction,
    kind: CrystalKind,
    report: &mut MatchReport,
) {
    let mut cursor = board.neighbor(seed, direction);
    while let Some(id) = cursor {
        if kind_of(board, Some(id)) != Some(kind) {
            break;
        }
        mark(board, id, report);
        cursor = board.neighbor(id, direction);
    }
}

fn mark(board: &mut Board, id: CellId, report: &mut MatchReport) {
    if let Some(crystal) = board.cell_mut(id).crystal_mut() {
        if crystal.mark() {
            report.marked.push(id);
        }
    }
}

#[inline]
fn kind_of(board: &Board, id: Option<CellId>) -> Option<CrystalKind> {
    id.and_then(|id| board.cell(id).crystal()).map(|c| c.kind())
}
