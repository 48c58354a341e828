//! Crystal module - the typed token held by a cell

use serde::Serialize;

use crate::topology::CellId;
use crate::types::CrystalKind;

/// Board-unique crystal identity, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CrystalId(pub u32);

impl std::fmt::Display for CrystalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A crystal owned by exactly one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crystal {
    id: CrystalId,
    kind: CrystalKind,
    /// Set by the matcher, cleared at the start of every resolution pass.
    marked: bool,
    /// Owning cell. Refreshed on placement and only used for event routing.
    cell: CellId,
}

impl Crystal {
    pub(crate) fn new(id: CrystalId, kind: CrystalKind, cell: CellId) -> Self {
        Self {
            id,
            kind,
            marked: false,
            cell,
        }
    }

    pub fn id(&self) -> CrystalId {
        self.id
    }

    pub fn kind(&self) -> CrystalKind {
        self.kind
    }

    pub fn is_marked(&self) -> bool {
        self.marked
    }

    /// Cell currently owning this crystal
    pub fn cell(&self) -> CellId {
        self.cell
    }

    /// Returns true when the mark flipped from unset to set
    pub(crate) fn mark(&mut self) -> bool {
        let newly = !self.marked;
        self.marked = true;
        newly
    }

    pub(crate) fn unmark(&mut self) {
        self.marked = false;
    }

    pub(crate) fn relocate(&mut self, cell: CellId) {
        self.cell = cell;
    }
}
