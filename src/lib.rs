//! Crystal grid (workspace facade crate).
//!
//! Re-exports the member crates as `crystal_grid::{core, engine, types}` so
//! hosts and the integration tests depend on one package. The command-line
//! front end lives in [`cli`].

pub mod cli;

pub use crystal_grid_core as core;
pub use crystal_grid_engine as engine;
pub use crystal_grid_types as types;
