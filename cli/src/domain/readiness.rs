//! Workload readiness: status snapshots, retry budget, and poll states.
//!
//! Pure functions only; the polling loop itself lives in
//! `application::services::readiness`.

use std::time::Duration;

/// States of the readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Still polling.
    Waiting,
    /// Every listed workload carries the healthy marker.
    AllReady,
    /// The background apply failed; the run must abort.
    AbortedByBackgroundFailure,
    /// The retry budget ran out. Degraded, not fatal.
    TimedOut,
}

impl PollState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Waiting)
    }
}

/// Polling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    /// Status queries allowed before giving up.
    pub max_attempts: u32,
    /// Pause between queries.
    pub interval: Duration,
    /// Emit a progress line every this many attempts.
    pub progress_every: u32,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            interval: Duration::from_secs(3),
            progress_every: 5,
        }
    }
}

/// One `get` of the workload list. The first line is a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadSnapshot {
    lines: Vec<String>,
    not_ready: usize,
}

impl WorkloadSnapshot {
    /// Classify `lines` against the healthy-state marker.
    #[must_use]
    pub fn new(lines: Vec<String>, ready_marker: &str) -> Self {
        let not_ready = lines
            .iter()
            .skip(1)
            .filter(|line| !line.contains(ready_marker))
            .count();
        Self { lines, not_ready }
    }

    /// Number of workload lines (header excluded).
    #[must_use]
    pub fn workloads(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    #[must_use]
    pub fn not_ready(&self) -> usize {
        self.not_ready
    }

    /// At least one workload listed and none of them not ready.
    #[must_use]
    pub fn is_all_ready(&self) -> bool {
        self.workloads() > 0 && self.not_ready == 0
    }
}

/// Attempts made so far against a fixed maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    attempts: u32,
    max: u32,
}

impl RetryBudget {
    #[must_use]
    pub fn new(max: u32) -> Self {
        Self { attempts: 0, max }
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max
    }

    /// Evaluate a snapshot: ready, or spend one attempt.
    ///
    /// An exhausted budget is never overspent: `attempts` stays `<= max`,
    /// including for a budget of zero.
    pub fn evaluate(&mut self, snapshot: &WorkloadSnapshot) -> PollState {
        if snapshot.is_all_ready() {
            return PollState::AllReady;
        }
        if self.is_exhausted() {
            return PollState::TimedOut;
        }
        self.attempts += 1;
        if self.is_exhausted() {
            PollState::TimedOut
        } else {
            PollState::Waiting
        }
    }
}
