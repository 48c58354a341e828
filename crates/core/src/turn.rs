//! Turn controller - sequences one player swap through to a settled board
//!
//! ```text
//! Idle -> Swapping -> Validating -> RollingBack -> Idle          (no match)
//! Idle -> Swapping -> Validating -> Destroying -> Compacting
//!      -> Matching -> (Destroying -> Compacting -> Matching)* -> Idle
//! ```
//!
//! Every phase runs to completion before the next begins. The only place the
//! controller stops mid-turn is `Destroying`, when the observer deferred one
//! or more destructions; the host resumes it with
//! [`TurnController::destruction_complete`]. Only `Idle` accepts a swap.

use crate::board::{Board, SwapRecord};
use crate::crystal::CrystalId;
use crate::error::{LogicFault, TurnError};
use crate::gravity;
use crate::matching::{self, MatchReport};
use crate::observer::{BoardObserver, Destruction, NoopObserver};
use crate::snapshot::BoardSnapshot;
use crate::spawn::CrystalSpawner;
use crate::topology::CellId;
use crate::types::{Coord, Direction, TurnPhase};

/// Result of driving the turn as far as it can go without outside help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The swap produced no match and was reversed.
    RolledBack(SwapRecord),
    /// Waiting for deferred destructions to be confirmed.
    AwaitingDestruction { pending: usize },
    /// Cascade finished and the board is idle again.
    Settled {
        /// Destroy passes run, 1 for a swap without chain reaction
        passes: usize,
        /// Crystals removed over the whole turn
        destroyed: usize,
    },
}

/// Owns the board and is its only writer.
pub struct TurnController<O: BoardObserver = NoopObserver> {
    board: Board,
    observer: O,
    phase: TurnPhase,
    last_swap: Option<SwapRecord>,
    pending: Vec<CrystalId>,
    spawner: Option<Box<dyn CrystalSpawner + Send>>,
    passes: usize,
    destroyed: usize,
    max_passes: usize,
}

impl TurnController<NoopObserver> {
    pub fn new(board: Board) -> Self {
        Self::with_observer(board, NoopObserver)
    }
}

impl<O: BoardObserver> TurnController<O> {
    pub fn with_observer(board: Board, observer: O) -> Self {
        // Each pass removes at least three crystals, so a cascade without
        // refill can never exceed the cell count.
        let max_passes = board.topology().len().max(1);
        Self {
            board,
            observer,
            phase: TurnPhase::Idle,
            last_swap: None,
            pending: Vec::new(),
            spawner: None,
            passes: 0,
            destroyed: 0,
            max_passes,
        }
    }

    /// Install a refill collaborator
    pub fn with_spawner(mut self, spawner: impl CrystalSpawner + Send + 'static) -> Self {
        self.spawner = Some(Box::new(spawner));
        self
    }

    /// Override the cascade guard (destroy passes per turn)
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == TurnPhase::Idle
    }

    /// Swap that can still be rolled back, if any
    pub fn last_swap(&self) -> Option<&SwapRecord> {
        self.last_swap.as_ref()
    }

    /// Destructions the controller is waiting on
    pub fn pending_destructions(&self) -> &[CrystalId] {
        &self.pending
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, self.phase)
    }

    pub fn into_parts(self) -> (Board, O) {
        (self.board, self.observer)
    }

    /// Start a turn by swapping the crystal at `at` with its neighbour.
    ///
    /// Rejected requests leave the board and phase untouched.
    pub fn request_swap(
        &mut self,
        at: Coord,
        direction: Direction,
    ) -> Result<TurnOutcome, TurnError> {
        if self.phase != TurnPhase::Idle {
            return Err(TurnError::Busy(self.phase));
        }
        let (from, to) = self.board.check_swap(at, direction)?;

        self.passes = 0;
        self.destroyed = 0;

        self.enter(TurnPhase::Swapping);
        self.observer.on_swap_started(at);
        self.board.swap_with(from, to)?;
        let record = SwapRecord {
            from: at,
            to: self.board.topology().coord_of(to),
            direction,
        };
        self.last_swap = Some(record);
        self.observer.on_swap_ended(&record);

        self.enter(TurnPhase::Validating);
        if self.resolve_matches().is_empty() {
            self.enter(TurnPhase::RollingBack);
            let record = self.roll_back()?;
            self.enter(TurnPhase::Idle);
            return Ok(TurnOutcome::RolledBack(record));
        }

        // A match makes the swap permanent.
        self.last_swap = None;
        Ok(self.run_cascade()?)
    }

    /// Confirm that the destruction of `crystal` has finished.
    ///
    /// Once the last pending destruction is confirmed the cascade resumes.
    pub fn destruction_complete(&mut self, crystal: CrystalId) -> Result<TurnOutcome, LogicFault> {
        if self.phase != TurnPhase::Destroying || self.pending.is_empty() {
            return Err(LogicFault::NotAwaitingDestruction(self.phase));
        }
        let index = self
            .pending
            .iter()
            .position(|&id| id == crystal)
            .ok_or(LogicFault::UnknownDestruction(crystal))?;
        self.pending.swap_remove(index);

        if !self.pending.is_empty() {
            return Ok(TurnOutcome::AwaitingDestruction {
                pending: self.pending.len(),
            });
        }

        match self.compact_and_rematch()? {
            Some(outcome) => Ok(outcome),
            None => self.run_cascade(),
        }
    }

    /// Reverse the recorded swap and clear the record.
    fn roll_back(&mut self) -> Result<SwapRecord, LogicFault> {
        let record = self.last_swap.take().ok_or(LogicFault::NoSwapRecord)?;
        self.board.undo_swap(&record)?;
        self.observer.on_rolled_back(&record);
        Ok(record)
    }

    /// Destroy, compact, re-match until the board settles or a destruction
    /// is deferred. Expects marks to be present on entry.
    fn run_cascade(&mut self) -> Result<TurnOutcome, LogicFault> {
        loop {
            self.destroy_marked()?;
            if !self.pending.is_empty() {
                return Ok(TurnOutcome::AwaitingDestruction {
                    pending: self.pending.len(),
                });
            }
            if let Some(outcome) = self.compact_and_rematch()? {
                return Ok(outcome);
            }
        }
    }

    fn destroy_marked(&mut self) -> Result<(), LogicFault> {
        self.passes += 1;
        if self.passes > self.max_passes {
            return Err(LogicFault::CascadeOverflow(self.max_passes));
        }
        self.enter(TurnPhase::Destroying);

        for index in 0..self.board.topology().len() {
            let id = CellId(index as u16);
            let Some(crystal) = self.board.cell_mut(id).clear_if_marked() else {
                continue;
            };
            self.destroyed += 1;
            let at = self.board.topology().coord_of(id);
            if self.observer.on_crystal_destroyed(&crystal, at) == Destruction::Deferred {
                self.pending.push(crystal.id());
            }
        }
        Ok(())
    }

    /// Returns the final outcome when no new marks appear, `None` when the
    /// cascade continues.
    fn compact_and_rematch(&mut self) -> Result<Option<TurnOutcome>, LogicFault> {
        self.enter(TurnPhase::Compacting);
        for fall in gravity::compact(&mut self.board)? {
            self.observer.on_crystal_fell(&fall);
        }
        self.refill()?;

        self.enter(TurnPhase::Matching);
        if !self.resolve_matches().is_empty() {
            return Ok(None);
        }

        self.enter(TurnPhase::Idle);
        Ok(Some(TurnOutcome::Settled {
            passes: self.passes,
            destroyed: self.destroyed,
        }))
    }

    /// Offer empty cells to the spawner, lane by lane from the sink outward.
    /// A lane stops at the first refusal so refill never leaves a gap.
    fn refill(&mut self) -> Result<(), LogicFault> {
        let Some(spawner) = self.spawner.as_mut() else {
            return Ok(());
        };
        let gravity = self.board.gravity();

        for sink in self.board.topology().boundary(gravity) {
            let mut cursor = Some(sink);
            while let Some(id) = cursor {
                cursor = self.board.neighbor(id, gravity.opposite());
                if !self.board.cell(id).is_empty() {
                    continue;
                }
                let at = self.board.topology().coord_of(id);
                let Some(kind) = spawner.spawn_crystal(at) else {
                    break;
                };
                self.board.place_crystal(id, kind)?;
                if let Some(crystal) = self.board.cell(id).crystal() {
                    self.observer.on_crystal_spawned(crystal, at);
                }
            }
        }
        Ok(())
    }

    fn resolve_matches(&mut self) -> MatchReport {
        let report = matching::resolve(&mut self.board);
        for &id in &report.marked {
            if let Some(crystal) = self.board.cell(id).crystal() {
                let at = self.board.topology().coord_of(id);
                self.observer.on_crystal_marked(crystal, at);
            }
        }
        self.observer.on_match_check_ended(report.len());
        report
    }

    fn enter(&mut self, phase: TurnPhase) {
        self.phase = phase;
        self.observer.on_phase_changed(phase);
    }
}

impl<O: BoardObserver + std::fmt::Debug> std::fmt::Debug for TurnController<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnController")
            .field("phase", &self.phase)
            .field("last_swap", &self.last_swap)
            .field("pending", &self.pending)
            .field("has_spawner", &self.spawner.is_some())
            .field("observer", &self.observer)
            .finish()
    }
}
