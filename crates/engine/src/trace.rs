//! Console trace of the turn cycle
//!
//! Off by default. Enabled with `CRYSTAL_GRID_TRACE=1` or by the host calling
//! [`enable_trace`]. Lines go to stderr with a `[Board]` prefix so they never
//! mix with machine-readable output on stdout.

use std::sync::atomic::{AtomicBool, Ordering};

use crystal_grid_core::board::SwapRecord;
use crystal_grid_core::crystal::Crystal;
use crystal_grid_core::gravity::Fall;
use crystal_grid_core::observer::{BoardObserver, Destruction, NoopObserver};
use crystal_grid_types::{Coord, TurnPhase};

static TRACE_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn enable_trace() {
    TRACE_ENABLED.store(true, Ordering::Relaxed);
}

pub fn disable_trace() {
    TRACE_ENABLED.store(false, Ordering::Relaxed);
}

pub fn is_tracing() -> bool {
    TRACE_ENABLED.load(Ordering::Relaxed)
}

/// Turn tracing on when `CRYSTAL_GRID_TRACE` is `1` or `true`.
pub fn init_from_env() -> bool {
    let on = std::env::var("CRYSTAL_GRID_TRACE")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if on {
        enable_trace();
    }
    on
}

/// Print a `[Board]` line to stderr when tracing is enabled.
#[macro_export]
macro_rules! trace_board {
    ($($arg:tt)*) => {
        if $crate::trace::is_tracing() {
            eprintln!("[Board] {}", format!($($arg)*));
        }
    };
}

/// Observer decorator that traces every hook, then forwards to `inner`.
#[derive(Debug, Clone, Default)]
pub struct TraceObserver<O = NoopObserver> {
    inner: O,
}

impl<O: BoardObserver> TraceObserver<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut O {
        &mut self.inner
    }

    pub fn into_inner(self) -> O {
        self.inner
    }
}

impl<O: BoardObserver> BoardObserver for TraceObserver<O> {
    fn on_phase_changed(&mut self, phase: TurnPhase) {
        trace_board!("phase -> {}", phase.as_str());
        self.inner.on_phase_changed(phase);
    }

    fn on_swap_started(&mut self, at: Coord) {
        trace_board!("swap started at {}", at);
        self.inner.on_swap_started(at);
    }

    fn on_swap_ended(&mut self, record: &SwapRecord) {
        trace_board!("swapped {} <-> {}", record.from, record.to);
        self.inner.on_swap_ended(record);
    }

    fn on_match_check_ended(&mut self, marked: usize) {
        trace_board!("match check: {} marked", marked);
        self.inner.on_match_check_ended(marked);
    }

    fn on_crystal_marked(&mut self, crystal: &Crystal, at: Coord) {
        trace_board!("marked {} {} at {}", crystal.id(), crystal.kind().as_str(), at);
        self.inner.on_crystal_marked(crystal, at);
    }

    fn on_crystal_destroyed(&mut self, crystal: &Crystal, at: Coord) -> Destruction {
        let answer = self.inner.on_crystal_destroyed(crystal, at);
        trace_board!(
            "destroyed {} {} at {} ({:?})",
            crystal.id(),
            crystal.kind().as_str(),
            at,
            answer
        );
        answer
    }

    fn on_crystal_fell(&mut self, fall: &Fall) {
        trace_board!("{} fell {} -> {}", fall.crystal, fall.from, fall.to);
        self.inner.on_crystal_fell(fall);
    }

    fn on_rolled_back(&mut self, record: &SwapRecord) {
        trace_board!("rolled back {} <-> {}", record.from, record.to);
        self.inner.on_rolled_back(record);
    }

    fn on_crystal_spawned(&mut self, crystal: &Crystal, at: Coord) {
        trace_board!("spawned {} {} at {}", crystal.id(), crystal.kind().as_str(), at);
        self.inner.on_crystal_spawned(crystal, at);
    }
}
