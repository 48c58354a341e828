//! Async turn driver
//!
//! Wraps a [`TurnController`] for hosts that animate destruction. Every
//! observer hook is published on an event bus as a [`BoardEvent`]. When the
//! driver runs in deferred mode the host answers each `crystal_destroyed`
//! event through a [`DestructionTicket`] once its effect has finished, and
//! [`TurnDriver::swap`] only returns after the cascade has settled.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crystal_grid_core::board::SwapRecord;
use crystal_grid_core::config::BoardConfig;
use crystal_grid_core::crystal::{Crystal, CrystalId};
use crystal_grid_core::error::{ConfigError, LogicFault, TurnError};
use crystal_grid_core::gravity::Fall;
use crystal_grid_core::observer::{BoardEvent, BoardObserver, Destruction};
use crystal_grid_core::snapshot::BoardSnapshot;
use crystal_grid_core::turn::{TurnController, TurnOutcome};
use crystal_grid_core::Board;
use crystal_grid_types::{Coord, Direction, TurnPhase};

use crate::trace::TraceObserver;
use crate::trace_board;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error("timed out after {timeout:?} with {pending} destruction(s) pending")]
    DestructionTimedOut { timeout: Duration, pending: usize },
    #[error("every destruction ticket was dropped")]
    ChannelClosed,
}

/// Sender side of the completion channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct DestructionTicket {
    tx: mpsc::UnboundedSender<CrystalId>,
}

impl DestructionTicket {
    /// Signal that the destruction of `crystal` has finished.
    ///
    /// Returns false when the driver is gone.
    pub fn complete(&self, crystal: CrystalId) -> bool {
        self.tx.send(crystal).is_ok()
    }
}

/// Publishes every hook on the event bus.
///
/// A closed bus is not an error; the turn still runs.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<BoardEvent>,
    deferred: bool,
}

impl ChannelObserver {
    pub fn new(tx: mpsc::UnboundedSender<BoardEvent>, deferred: bool) -> Self {
        Self { tx, deferred }
    }

    fn publish(&self, event: BoardEvent) {
        let _ = self.tx.send(event);
    }
}

impl BoardObserver for ChannelObserver {
    fn on_phase_changed(&mut self, phase: TurnPhase) {
        self.publish(BoardEvent::PhaseChanged { phase });
    }

    fn on_swap_started(&mut self, at: Coord) {
        self.publish(BoardEvent::SwapStarted { at });
    }

    fn on_swap_ended(&mut self, record: &SwapRecord) {
        self.publish(BoardEvent::SwapEnded { record: *record });
    }

    fn on_match_check_ended(&mut self, marked: usize) {
        self.publish(BoardEvent::MatchCheckEnded { marked });
    }

    fn on_crystal_marked(&mut self, crystal: &Crystal, at: Coord) {
        self.publish(BoardEvent::marked(crystal, at));
    }

    fn on_crystal_destroyed(&mut self, crystal: &Crystal, at: Coord) -> Destruction {
        self.publish(BoardEvent::destroyed(crystal, at));
        if self.deferred {
            Destruction::Deferred
        } else {
            Destruction::Immediate
        }
    }

    fn on_crystal_fell(&mut self, fall: &Fall) {
        self.publish(BoardEvent::CrystalFell { fall: *fall });
    }

    fn on_rolled_back(&mut self, record: &SwapRecord) {
        self.publish(BoardEvent::RolledBack { record: *record });
    }

    fn on_crystal_spawned(&mut self, crystal: &Crystal, at: Coord) {
        self.publish(BoardEvent::spawned(crystal, at));
    }
}

/// Channels handed to the host when a driver is created.
#[derive(Debug)]
pub struct DriverLink {
    pub events: mpsc::UnboundedReceiver<BoardEvent>,
    pub ticket: DestructionTicket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverSettings {
    /// Wait for host confirmation of every destruction
    pub deferred: bool,
    /// Upper bound on the wait for one confirmation
    pub destroy_timeout: Duration,
}

impl Default for DriverSettings {
    fn default() -> Self {
        Self {
            deferred: false,
            destroy_timeout: Duration::from_millis(
                crystal_grid_types::DEFAULT_DESTROY_TIMEOUT_MS,
            ),
        }
    }
}

type DriverObserver = TraceObserver<ChannelObserver>;

pub struct TurnDriver {
    controller: TurnController<DriverObserver>,
    completions: mpsc::UnboundedReceiver<CrystalId>,
    destroy_timeout: Duration,
}

impl TurnDriver {
    /// Drive an existing board without refill.
    pub fn new(board: Board, settings: DriverSettings) -> (Self, DriverLink) {
        let (observer, link, completions) = Self::channels(settings);
        let controller = TurnController::with_observer(board, observer);
        (Self::assemble(controller, completions, settings), link)
    }

    /// Build board and controller from `config`, refill included.
    pub fn from_config(
        config: &BoardConfig,
        deferred: bool,
    ) -> Result<(Self, DriverLink), ConfigError> {
        let settings = DriverSettings {
            deferred,
            destroy_timeout: Duration::from_millis(config.destroy_timeout_ms),
        };
        let (observer, link, completions) = Self::channels(settings);
        let controller = config.build_controller(observer)?;
        Ok((Self::assemble(controller, completions, settings), link))
    }

    fn channels(
        settings: DriverSettings,
    ) -> (DriverObserver, DriverLink, mpsc::UnboundedReceiver<CrystalId>) {
        let (event_tx, events) = mpsc::unbounded_channel();
        let (done_tx, completions) = mpsc::unbounded_channel();
        let observer = TraceObserver::new(ChannelObserver::new(event_tx, settings.deferred));
        let link = DriverLink {
            events,
            ticket: DestructionTicket { tx: done_tx },
        };
        (observer, link, completions)
    }

    fn assemble(
        controller: TurnController<DriverObserver>,
        completions: mpsc::UnboundedReceiver<CrystalId>,
        settings: DriverSettings,
    ) -> Self {
        Self {
            controller,
            completions,
            destroy_timeout: settings.destroy_timeout,
        }
    }

    pub fn board(&self) -> &Board {
        self.controller.board()
    }

    pub fn phase(&self) -> TurnPhase {
        self.controller.phase()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.controller.snapshot()
    }

    /// Run one turn to completion.
    ///
    /// In deferred mode this waits for a completion per destroyed crystal,
    /// each wait bounded by the destroy timeout.
    pub async fn swap(
        &mut self,
        at: Coord,
        direction: Direction,
    ) -> Result<TurnOutcome, DriverError> {
        let outcome = self.controller.request_swap(at, direction)?;
        self.settle(outcome).await
    }

    /// Resume a turn left waiting on destructions, e.g. after a timeout.
    pub async fn resume(&mut self) -> Result<TurnOutcome, DriverError> {
        let pending = self.controller.pending_destructions().len();
        if pending == 0 {
            let fault = LogicFault::NotAwaitingDestruction(self.controller.phase());
            return Err(TurnError::Fault(fault).into());
        }
        self.settle(TurnOutcome::AwaitingDestruction { pending }).await
    }

    async fn settle(&mut self, mut outcome: TurnOutcome) -> Result<TurnOutcome, DriverError> {
        while let TurnOutcome::AwaitingDestruction { pending } = outcome {
            trace_board!("waiting on {} destruction(s)", pending);
            let crystal = match timeout(self.destroy_timeout, self.completions.recv()).await {
                Ok(Some(crystal)) => crystal,
                Ok(None) => return Err(DriverError::ChannelClosed),
                Err(_) => {
                    return Err(DriverError::DestructionTimedOut {
                        timeout: self.destroy_timeout,
                        pending,
                    })
                }
            };
            outcome = self
                .controller
                .destruction_complete(crystal)
                .map_err(TurnError::Fault)?;
        }
        Ok(outcome)
    }
}
