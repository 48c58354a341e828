//! Error types for the board core.
//!
//! Rejections are expected outcomes of player input and leave the board
//! untouched. Faults mean an invariant was violated by the caller or by the
//! core itself and must never be ignored.

use thiserror::Error;

use crate::crystal::CrystalId;
use crate::types::{Coord, Direction, TurnPhase};

/// Why a swap request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SwapRejected {
    #[error("cell {0} is outside the board")]
    OutOfBounds(Coord),
    #[error("cell {0} holds no crystal")]
    SourceEmpty(Coord),
    #[error("no neighbour {direction:?} of {at}")]
    NoNeighbor { at: Coord, direction: Direction },
    #[error("neighbour {direction:?} of {at} is empty")]
    NeighborEmpty { at: Coord, direction: Direction },
}

/// Invariant violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LogicFault {
    #[error("cell {0} is already occupied")]
    CellOccupied(Coord),
    #[error("rollback requested without a swap record")]
    NoSwapRecord,
    #[error("missing neighbour {direction:?} of {at}")]
    MissingNeighbor { at: Coord, direction: Direction },
    #[error("destruction signalled while {0:?}")]
    NotAwaitingDestruction(TurnPhase),
    #[error("crystal {0} has no pending destruction")]
    UnknownDestruction(CrystalId),
    #[error("cascade did not settle within {0} passes")]
    CascadeOverflow(usize),
}

/// Errors returned by the turn controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("swap rejected: {0}")]
    Rejected(#[from] SwapRejected),
    #[error("board is busy ({0:?})")]
    Busy(TurnPhase),
    #[error("logic fault: {0}")]
    Fault(#[from] LogicFault),
}

/// Board construction and configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board must be at least 1x1 (got {width}x{height})")]
    EmptyGrid { width: u8, height: u8 },
    #[error("board side {0} exceeds the maximum of {max}", max = crate::types::MAX_BOARD_DIM)]
    TooLarge(u8),
    #[error("at least one crystal kind is required")]
    NoKinds,
    #[error("layout must be {width}x{height}: {detail}")]
    LayoutShape {
        width: u8,
        height: u8,
        detail: String,
    },
    #[error("unknown crystal kind '{0}'")]
    UnknownKind(String),
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
    #[error("board construction fault: {0}")]
    Fault(#[from] LogicFault),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
}
