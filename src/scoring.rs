//! Scoring module - running session total
//!
//! Matches only ever add score, so the tracker exposes no decrement. The
//! total is a plain value the host polls after each accepted swap.

use crate::cascade::CascadeOutcome;

/// Accumulated score and session statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    total: u32,
    cells_removed: u32,
    longest_chain: u32,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a tracker from previously captured values
    pub(crate) fn from_parts(total: u32, cells_removed: u32, longest_chain: u32) -> Self {
        Self {
            total,
            cells_removed,
            longest_chain,
        }
    }

    /// Add points from a resolved cascade
    pub fn add(&mut self, outcome: &CascadeOutcome) {
        self.total = self.total.saturating_add(outcome.score_delta);
        self.cells_removed = self
            .cells_removed
            .saturating_add(outcome.removed() as u32);
        self.longest_chain = self.longest_chain.max(outcome.passes.len() as u32);
    }

    /// Running score total
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Total cells removed this session
    pub fn cells_removed(&self) -> u32 {
        self.cells_removed
    }

    /// Longest chain reaction (in passes) seen this session
    pub fn longest_chain(&self) -> u32 {
        self.longest_chain
    }
}
