//! Core board logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the crystal grid: topology, crystal
//! placement, swap validation, match resolution, gravity compaction and the
//! turn cycle that sequences them. It has **no dependencies** on rendering,
//! animation, audio or an event loop:
//!
//! - **Deterministic**: the same seed and the same swaps give the same board
//! - **Synchronous**: every operation returns before the next begins
//! - **Observable**: presentation hooks in through [`BoardObserver`]
//!
//! # Module Structure
//!
//! - [`topology`]: fixed neighbour links between cells
//! - [`cell`] / [`crystal`]: the occupancy model
//! - [`board`]: the cell arena, swaps and layouts
//! - [`matching`]: marks runs of three or more
//! - [`gravity`]: compacts crystals toward the gravity direction
//! - [`turn`]: the turn controller state machine
//! - [`observer`]: hooks and the typed [`BoardEvent`]
//! - [`spawn`]: refill contract
//! - [`config`], [`rng`], [`snapshot`]: construction and inspection
//!
//! # Rules
//!
//! - A swap exchanges two orthogonally adjacent crystals.
//! - A swap that produces no run of three is rolled back.
//! - Marked crystals are destroyed, the rest fall, and matching repeats until
//!   a pass marks nothing.
//! - Only an idle board accepts a swap.
//!
//! # Example
//!
//! ```
//! use crystal_grid_core::{Board, TurnController, TurnOutcome};
//! use crystal_grid_types::{Coord, Direction};
//!
//! let board = Board::from_rows(&["RRBR", "GBGG"], Direction::Down).unwrap();
//! let mut turn = TurnController::new(board);
//!
//! let outcome = turn.request_swap(Coord::new(2, 0), Direction::Right).unwrap();
//! assert_eq!(outcome, TurnOutcome::Settled { passes: 1, destroyed: 3 });
//! assert_eq!(turn.board().to_rows(), vec!["...B", "GBGG"]);
//! ```

pub mod board;
pub mod cell;
pub mod config;
pub mod crystal;
pub mod error;
pub mod gravity;
pub mod matching;
pub mod observer;
pub mod rng;
pub mod snapshot;
pub mod spawn;
pub mod topology;
pub mod turn;

pub use crystal_grid_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, SwapRecord};
pub use cell::Cell;
pub use config::BoardConfig;
pub use crystal::{Crystal, CrystalId};
pub use error::{ConfigError, LogicFault, SwapRejected, TurnError};
pub use gravity::Fall;
pub use matching::MatchReport;
pub use observer::{BoardEvent, BoardObserver, Destruction, NoopObserver, RecordingObserver};
pub use rng::SimpleRng;
pub use snapshot::BoardSnapshot;
pub use spawn::{CrystalSpawner, QueueSpawner, RandomSpawner};
pub use topology::{CellId, Topology};
pub use turn::{TurnController, TurnOutcome};
