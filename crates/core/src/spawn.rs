//! Refill contract - who puts new crystals into vacated cells
//!
//! The core never invents crystals on its own. A host that wants refill
//! installs a [`CrystalSpawner`]; after each compaction the turn controller
//! offers it every empty cell, lane by lane from the sink outward.

use std::collections::VecDeque;

use crate::rng::SimpleRng;
use crate::types::{Coord, CrystalKind};

pub trait CrystalSpawner {
    /// Kind for the empty cell at `at`, or `None` to leave it empty.
    fn spawn_crystal(&mut self, at: Coord) -> Option<CrystalKind>;
}

impl<F> CrystalSpawner for F
where
    F: FnMut(Coord) -> Option<CrystalKind>,
{
    fn spawn_crystal(&mut self, at: Coord) -> Option<CrystalKind> {
        self(at)
    }
}

/// Uniform random refill from a fixed kind set
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    kinds: Vec<CrystalKind>,
    rng: SimpleRng,
}

impl RandomSpawner {
    pub fn new(kinds: &[CrystalKind], seed: u32) -> Self {
        Self {
            kinds: kinds.to_vec(),
            rng: SimpleRng::new(seed),
        }
    }
}

impl CrystalSpawner for RandomSpawner {
    fn spawn_crystal(&mut self, _at: Coord) -> Option<CrystalKind> {
        self.rng.pick(&self.kinds)
    }
}

/// Hands out a predetermined sequence, then stops refilling.
#[derive(Debug, Clone, Default)]
pub struct QueueSpawner {
    queue: VecDeque<CrystalKind>,
}

impl QueueSpawner {
    pub fn new(kinds: impl IntoIterator<Item = CrystalKind>) -> Self {
        Self {
            queue: kinds.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl CrystalSpawner for QueueSpawner {
    fn spawn_crystal(&mut self, _at: Coord) -> Option<CrystalKind> {
        self.queue.pop_front()
    }
}
