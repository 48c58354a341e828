//! Board module - the cell arena plus its fixed topology
//!
//! The board owns every cell in a flat `Vec` (row-major, `y * width + x`) and
//! the immutable [`Topology`] wiring them together. Crystals are owned by
//! cells and only ever move with take-then-place, so a crystal is never held
//! by two cells or by none.
//!
//! Coordinates: `(x, y)` with `y = 0` the top row. Layout strings use the
//! crystal letters (`R G B Y P O`) and `.` for an empty cell.

use crate::cell::Cell;
use crate::crystal::{Crystal, CrystalId};
use crate::error::{ConfigError, LogicFault, SwapRejected};
use crate::topology::{CellId, Topology};
use crate::types::{Coord, CrystalKind, Direction};

/// The most recent swap, enough to undo it once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SwapRecord {
    pub from: Coord,
    pub to: Coord,
    pub direction: Direction,
}

/// A grid of cells with a board-wide gravity direction
#[derive(Debug, Clone)]
pub struct Board {
    topology: Topology,
    cells: Vec<Cell>,
    gravity: Direction,
    next_crystal: u32,
}

impl Board {
    /// Build an empty board. Topology is fixed from here on.
    pub fn new(width: u8, height: u8, gravity: Direction) -> Result<Self, ConfigError> {
        let topology = Topology::build(width, height)?;
        let cells = topology
            .ids()
            .map(|id| Cell::new(id, topology.coord_of(id)))
            .collect();
        Ok(Self {
            topology,
            cells,
            gravity,
            next_crystal: 0,
        })
    }

    /// Build a board from layout rows, top row first.
    ///
    /// # Examples
    ///
    /// ```
    /// use crystal_grid_core::Board;
    /// use crystal_grid_core::types::Direction;
    ///
    /// let board = Board::from_rows(&["RRB", ".GB"], Direction::Down).unwrap();
    /// assert_eq!(board.width(), 3);
    /// assert_eq!(board.to_rows(), vec!["RRB", ".GB"]);
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S], gravity: Direction) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if width > u8::MAX as usize || height > u8::MAX as usize {
            return Err(ConfigError::TooLarge(u8::MAX));
        }

        let mut board = Self::new(width as u8, height as u8, gravity)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let len = row.chars().count();
            if len != width {
                return Err(ConfigError::LayoutShape {
                    width: width as u8,
                    height: height as u8,
                    detail: format!("row {} has {} cells", y, len),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                if ch == '.' || ch == '_' {
                    continue;
                }
                let kind = CrystalKind::from_char(ch)
                    .ok_or_else(|| ConfigError::UnknownKind(ch.to_string()))?;
                board.place_crystal(CellId((y * width + x) as u16), kind)?;
            }
        }
        Ok(board)
    }

    pub fn width(&self) -> u8 {
        self.topology.width()
    }

    pub fn height(&self) -> u8 {
        self.topology.height()
    }

    pub fn gravity(&self) -> Direction {
        self.gravity
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.index()]
    }

    /// Cell id at `coord`, `None` when off the board
    pub fn id_of(&self, coord: Coord) -> Option<CellId> {
        self.topology.id_of(coord)
    }

    pub fn cell_at(&self, coord: Coord) -> Option<&Cell> {
        self.id_of(coord).map(|id| self.cell(id))
    }

    /// Kind of the crystal at `coord`; `None` when empty or off the board
    pub fn kind_at(&self, coord: Coord) -> Option<CrystalKind> {
        self.cell_at(coord)
            .and_then(|c| c.crystal())
            .map(|c| c.kind())
    }

    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.topology.neighbor(id, direction)
    }

    /// Where a crystal currently sits, through its back-reference
    pub fn locate(&self, crystal: &Crystal) -> Coord {
        self.topology.coord_of(crystal.cell())
    }

    /// Create a crystal of `kind` in an empty cell.
    pub fn place_crystal(&mut self, id: CellId, kind: CrystalKind) -> Result<CrystalId, LogicFault> {
        if !self.cell(id).is_empty() {
            return Err(LogicFault::CellOccupied(self.topology.coord_of(id)));
        }
        let crystal_id = CrystalId(self.next_crystal);
        self.next_crystal += 1;
        self.cell_mut(id).place(Crystal::new(crystal_id, kind, id))?;
        Ok(crystal_id)
    }

    /// A swap needs an occupied neighbour in `direction`.
    pub fn can_swap(&self, id: CellId, direction: Direction) -> bool {
        self.neighbor(id, direction)
            .is_some_and(|n| !self.cell(n).is_empty())
    }

    /// Exchange the contents of two cells. No match evaluation.
    pub fn swap_with(&mut self, a: CellId, b: CellId) -> Result<(), LogicFault> {
        if a == b {
            return Ok(());
        }
        let from_a = self.cell_mut(a).take();
        let from_b = self.cell_mut(b).take();
        if let Some(crystal) = from_b {
            self.cell_mut(a).place(crystal)?;
        }
        if let Some(crystal) = from_a {
            self.cell_mut(b).place(crystal)?;
        }
        Ok(())
    }

    /// Validate a player swap without touching the board.
    ///
    /// Returns the two cells that would be exchanged.
    pub fn check_swap(
        &self,
        at: Coord,
        direction: Direction,
    ) -> Result<(CellId, CellId), SwapRejected> {
        let id = self.id_of(at).ok_or(SwapRejected::OutOfBounds(at))?;
        if self.cell(id).is_empty() {
            return Err(SwapRejected::SourceEmpty(at));
        }
        let neighbor = self
            .neighbor(id, direction)
            .ok_or(SwapRejected::NoNeighbor { at, direction })?;
        if self.cell(neighbor).is_empty() {
            return Err(SwapRejected::NeighborEmpty { at, direction });
        }
        Ok((id, neighbor))
    }

    /// Validate and perform a player swap.
    pub fn attempt_swap(
        &mut self,
        at: Coord,
        direction: Direction,
    ) -> Result<SwapRecord, SwapRejected> {
        let (id, neighbor) = self.check_swap(at, direction)?;
        // Both cells are occupied and distinct, the exchange cannot fault.
        let _ = self.swap_with(id, neighbor);
        Ok(SwapRecord {
            from: at,
            to: self.topology.coord_of(neighbor),
            direction,
        })
    }

    /// Reverse a recorded swap.
    pub fn undo_swap(&mut self, record: &SwapRecord) -> Result<(), LogicFault> {
        let missing = LogicFault::MissingNeighbor {
            at: record.from,
            direction: record.direction,
        };
        let from = self.id_of(record.from).ok_or(missing)?;
        let to = self.neighbor(from, record.direction).ok_or(missing)?;
        if self.topology.coord_of(to) != record.to {
            return Err(missing);
        }
        self.swap_with(to, from)
    }

    /// Reset every destruction mark
    pub fn clear_marks(&mut self) {
        for cell in &mut self.cells {
            if let Some(crystal) = cell.crystal_mut() {
                crystal.unmark();
            }
        }
    }

    pub fn marked_count(&self) -> usize {
        self.crystals().filter(|c| c.is_marked()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    /// Every crystal in row-major cell order
    pub fn crystals(&self) -> impl Iterator<Item = &Crystal> {
        self.cells.iter().filter_map(|c| c.crystal())
    }

    /// Render as layout rows, `.` for empty cells
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width() as usize)
            .map(|row| {
                row.iter()
                    .map(|c| c.crystal().map(|x| x.kind().as_char()).unwrap_or('.'))
                    .collect()
            })
            .collect()
    }

    /// Write per-cell kind codes (0 = empty) in row-major order
    pub fn write_codes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(
            self.cells
                .iter()
                .map(|c| c.crystal().map(|x| x.kind().code()).unwrap_or(0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows, Direction::Down).unwrap()
    }

    #[test]
    fn test_from_rows_rejects_ragged_layout() {
        let err = Board::from_rows(&["RR", "R"], Direction::Down).unwrap_err();
        assert!(matches!(err, ConfigError::LayoutShape { .. }));
    }

    #[test]
    fn test_from_rows_rejects_unknown_letter() {
        let err = Board::from_rows(&["RX"], Direction::Down).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKind(ref s) if s == "X"));
    }

    #[test]
    fn test_place_crystal_assigns_increasing_ids() {
        let mut b = Board::new(2, 1, Direction::Down).unwrap();
        let a = b.place_crystal(CellId(0), CrystalKind::Red).unwrap();
        let c = b.place_crystal(CellId(1), CrystalKind::Red).unwrap();
        assert!(c > a);
        assert_eq!(
            b.place_crystal(CellId(0), CrystalKind::Blue),
            Err(LogicFault::CellOccupied(Coord::new(0, 0)))
        );
    }

    #[test]
    fn test_can_swap_requires_occupied_neighbor() {
        let b = board(&["RB."]);
        let left = b.id_of(Coord::new(0, 0)).unwrap();
        let mid = b.id_of(Coord::new(1, 0)).unwrap();

        assert!(b.can_swap(left, Direction::Right));
        assert!(!b.can_swap(left, Direction::Left));
        assert!(!b.can_swap(mid, Direction::Right));
        assert!(!b.can_swap(mid, Direction::Up));
    }

    #[test]
    fn test_attempt_swap_exchanges_and_records() {
        let mut b = board(&["RB"]);
        let record = b.attempt_swap(Coord::new(0, 0), Direction::Right).unwrap();

        assert_eq!(b.to_rows(), vec!["BR"]);
        assert_eq!(record.from, Coord::new(0, 0));
        assert_eq!(record.to, Coord::new(1, 0));

        // Back-references follow the crystals
        for cell in b.cells() {
            assert_eq!(cell.crystal().unwrap().cell(), cell.id());
        }
    }

    #[test]
    fn test_attempt_swap_rejections_leave_board_unchanged() {
        let mut b = board(&["R.", "B."]);
        let before = b.to_rows();

        assert_eq!(
            b.attempt_swap(Coord::new(0, 0), Direction::Right),
            Err(SwapRejected::NeighborEmpty {
                at: Coord::new(0, 0),
                direction: Direction::Right
            })
        );
        assert_eq!(
            b.attempt_swap(Coord::new(0, 0), Direction::Up),
            Err(SwapRejected::NoNeighbor {
                at: Coord::new(0, 0),
                direction: Direction::Up
            })
        );
        assert_eq!(
            b.attempt_swap(Coord::new(1, 0), Direction::Left),
            Err(SwapRejected::SourceEmpty(Coord::new(1, 0)))
        );
        assert_eq!(
            b.attempt_swap(Coord::new(9, 9), Direction::Left),
            Err(SwapRejected::OutOfBounds(Coord::new(9, 9)))
        );
        assert_eq!(b.to_rows(), before);
    }

    #[test]
    fn test_undo_swap_restores_occupancy() {
        let mut b = board(&["RG", "BY"]);
        let before = b.to_rows();
        let record = b.attempt_swap(Coord::new(1, 1), Direction::Up).unwrap();
        assert_ne!(b.to_rows(), before);

        b.undo_swap(&record).unwrap();
        assert_eq!(b.to_rows(), before);
    }

    #[test]
    fn test_undo_swap_with_bad_record_is_a_fault() {
        let mut b = board(&["RG"]);
        let bogus = SwapRecord {
            from: Coord::new(1, 0),
            to: Coord::new(2, 0),
            direction: Direction::Right,
        };
        assert!(matches!(
            b.undo_swap(&bogus),
            Err(LogicFault::MissingNeighbor { .. })
        ));
    }
}
