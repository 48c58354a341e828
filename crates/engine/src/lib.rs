//! Async host integration for the crystal grid.
//!
//! Bridges the synchronous turn controller with hosts that run destruction
//! effects concurrently. The core stays free of any runtime; this crate adds
//! the tokio channels and timeouts.

pub mod driver;
pub mod trace;

pub use driver::{
    ChannelObserver, DestructionTicket, DriverError, DriverLink, DriverSettings, TurnDriver,
};
pub use trace::TraceObserver;
