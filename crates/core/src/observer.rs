//! Observer module - the seams where presentation attaches to the turn cycle
//!
//! The turn controller calls these hooks; it never depends on rendering,
//! animation or audio. Every hook has a no-op default so collaborators only
//! implement what they care about.
//!
//! Destruction is the one hook with a return value. Answering
//! [`Destruction::Deferred`] tells the controller to hold the board in
//! `Destroying` until [`TurnController::destruction_complete`] is called for
//! that crystal.
//!
//! [`TurnController::destruction_complete`]: crate::turn::TurnController::destruction_complete

use serde::Serialize;

use crate::board::SwapRecord;
use crate::crystal::{Crystal, CrystalId};
use crate::gravity::Fall;
use crate::types::{Coord, CrystalKind, TurnPhase};

/// How the destruction collaborator handled a removed crystal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Destruction {
    /// Side effects are finished; the controller may move on.
    #[default]
    Immediate,
    /// Side effects are still running; completion will be signalled.
    Deferred,
}

pub trait BoardObserver {
    fn on_phase_changed(&mut self, _phase: TurnPhase) {}

    fn on_swap_started(&mut self, _at: Coord) {}

    fn on_swap_ended(&mut self, _record: &SwapRecord) {}

    fn on_match_check_ended(&mut self, _marked: usize) {}

    fn on_crystal_marked(&mut self, _crystal: &Crystal, _at: Coord) {}

    fn on_crystal_destroyed(&mut self, _crystal: &Crystal, _at: Coord) -> Destruction {
        Destruction::Immediate
    }

    fn on_crystal_fell(&mut self, _fall: &Fall) {}

    fn on_rolled_back(&mut self, _record: &SwapRecord) {}

    fn on_crystal_spawned(&mut self, _crystal: &Crystal, _at: Coord) {}
}

impl<O: BoardObserver + ?Sized> BoardObserver for Box<O> {
    fn on_phase_changed(&mut self, phase: TurnPhase) {
        (**self).on_phase_changed(phase)
    }

    fn on_swap_started(&mut self, at: Coord) {
        (**self).on_swap_started(at)
    }

    fn on_swap_ended(&mut self, record: &SwapRecord) {
        (**self).on_swap_ended(record)
    }

    fn on_match_check_ended(&mut self, marked: usize) {
        (**self).on_match_check_ended(marked)
    }

    fn on_crystal_marked(&mut self, crystal: &Crystal, at: Coord) {
        (**self).on_crystal_marked(crystal, at)
    }

    fn on_crystal_destroyed(&mut self, crystal: &Crystal, at: Coord) -> Destruction {
        (**self).on_crystal_destroyed(crystal, at)
    }

    fn on_crystal_fell(&mut self, fall: &Fall) {
        (**self).on_crystal_fell(fall)
    }

    fn on_rolled_back(&mut self, record: &SwapRecord) {
        (**self).on_rolled_back(record)
    }

    fn on_crystal_spawned(&mut self, crystal: &Crystal, at: Coord) {
        (**self).on_crystal_spawned(crystal, at)
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BoardObserver for NoopObserver {}

/// Typed event mirroring each observer hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    PhaseChanged {
        phase: TurnPhase,
    },
    SwapStarted {
        at: Coord,
    },
    SwapEnded {
        record: SwapRecord,
    },
    MatchCheckEnded {
        marked: usize,
    },
    CrystalMarked {
        crystal: CrystalId,
        kind: CrystalKind,
        at: Coord,
    },
    CrystalDestroyed {
        crystal: CrystalId,
        kind: CrystalKind,
        at: Coord,
    },
    CrystalFell {
        fall: Fall,
    },
    RolledBack {
        record: SwapRecord,
    },
    CrystalSpawned {
        crystal: CrystalId,
        kind: CrystalKind,
        at: Coord,
    },
}

impl BoardEvent {
    pub fn marked(crystal: &Crystal, at: Coord) -> Self {
        Self::CrystalMarked {
            crystal: crystal.id(),
            kind: crystal.kind(),
            at,
        }
    }

    pub fn destroyed(crystal: &Crystal, at: Coord) -> Self {
        Self::CrystalDestroyed {
            crystal: crystal.id(),
            kind: crystal.kind(),
            at,
        }
    }

    pub fn spawned(crystal: &Crystal, at: Coord) -> Self {
        Self::CrystalSpawned {
            crystal: crystal.id(),
            kind: crystal.kind(),
            at,
        }
    }
}

/// Collects every hook as a [`BoardEvent`].
///
/// With `defer_destruction` set it answers [`Destruction::Deferred`], which
/// lets tests drive the destruction barrier by hand.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<BoardEvent>,
    pub defer_destruction: bool,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deferring() -> Self {
        Self {
            events: Vec::new(),
            defer_destruction: true,
        }
    }

    /// Drain the recorded events
    pub fn take(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Phases visited, in order
    pub fn phases(&self) -> Vec<TurnPhase> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::PhaseChanged { phase } => Some(*phase),
                _ => None,
            })
            .collect()
    }

    /// Ids of destroyed crystals, in order
    pub fn destroyed(&self) -> Vec<CrystalId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BoardEvent::CrystalDestroyed { crystal, .. } => Some(*crystal),
                _ => None,
            })
            .collect()
    }
}

impl BoardObserver for RecordingObserver {
    fn on_phase_changed(&mut self, phase: TurnPhase) {
        self.events.push(BoardEvent::PhaseChanged { phase });
    }

    fn on_swap_started(&mut self, at: Coord) {
        self.events.push(BoardEvent::SwapStarted { at });
    }

    fn on_swap_ended(&mut self, record: &SwapRecord) {
        self.events.push(BoardEvent::SwapEnded { record: *record });
    }

    fn on_match_check_ended(&mut self, marked: usize) {
        self.events.push(BoardEvent::MatchCheckEnded { marked });
    }

    fn on_crystal_marked(&mut self, crystal: &Crystal, at: Coord) {
        self.events.push(BoardEvent::marked(crystal, at));
    }

    fn on_crystal_destroyed(&mut self, crystal: &Crystal, at: Coord) -> Destruction {
        self.events.push(BoardEvent::destroyed(crystal, at));
        if self.defer_destruction {
            Destruction::Deferred
        } else {
            Destruction::Immediate
        }
    }

    fn on_crystal_fell(&mut self, fall: &Fall) {
        self.events.push(BoardEvent::CrystalFell { fall: *fall });
    }

    fn on_rolled_back(&mut self, record: &SwapRecord) {
        self.events.push(BoardEvent::RolledBack { record: *record });
    }

    fn on_crystal_spawned(&mut self, crystal: &Crystal, at: Coord) {
        self.events.push(BoardEvent::spawned(crystal, at));
    }
}
