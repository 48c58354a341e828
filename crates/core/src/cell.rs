//! Cell module - a fixed grid position owning at most one crystal
//!
//! Operations that only touch the cell's own contents live here. Anything
//! involving a neighbour (swaps, the match scan, falling) goes through
//! [`Board`](crate::board::Board), which owns the topology.

use crate::crystal::Crystal;
use crate::error::LogicFault;
use crate::topology::CellId;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    id: CellId,
    coord: Coord,
    crystal: Option<Crystal>,
}

impl Cell {
    pub(crate) fn new(id: CellId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            crystal: None,
        }
    }

    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    pub fn crystal(&self) -> Option<&Crystal> {
        self.crystal.as_ref()
    }

    pub(crate) fn crystal_mut(&mut self) -> Option<&mut Crystal> {
        self.crystal.as_mut()
    }

    /// Derived from occupancy, never stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.crystal.is_none()
    }

    /// Put a crystal into this cell and point it back here.
    ///
    /// Placing into an occupied cell is a logic fault.
    pub(crate) fn place(&mut self, mut crystal: Crystal) -> Result<(), LogicFault> {
        if self.crystal.is_some() {
            return Err(LogicFault::CellOccupied(self.coord));
        }
        crystal.relocate(self.id);
        self.crystal = Some(crystal);
        Ok(())
    }

    /// Remove the crystal unconditionally
    pub(crate) fn take(&mut self) -> Option<Crystal> {
        self.crystal.take()
    }

    /// Remove the crystal if it is marked for destruction.
    ///
    /// Returns the removed crystal so the caller can hand it to the
    /// destruction collaborator. Unmarked or empty cells are left alone.
    pub fn clear_if_marked(&mut self) -> Option<Crystal> {
        match &self.crystal {
            Some(c) if c.is_marked() => self.crystal.take(),
            _ => None,
        }
    }
}
