//! Pipeline observer — hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at phase boundaries without coupling to
//! the handlers themselves. [`NoopObserver`] is what
//! [`EventBus::run`](super::bus::EventBus::run) uses; pass a
//! [`PhaseTimingObserver`] to [`EventBus::run_observed`](super::bus::EventBus::run_observed)
//! to collect per-phase timings.

use std::time::{Duration, Instant};

use super::bus::Phase;

/// Measurements for one completed phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    elapsed: Duration,
    handlers: usize,
    words: Option<usize>,
}

impl PhaseReport {
    pub fn new(elapsed: Duration, handlers: usize) -> Self {
        Self {
            elapsed,
            handlers,
            words: None,
        }
    }

    /// Attach the number of words published on the word channel.
    pub fn with_words(mut self, words: usize) -> Self {
        self.words = Some(words);
        self
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of handlers invoked during the phase.
    pub fn handlers(&self) -> usize {
        self.handlers
    }

    /// Words published during the phase. Only reported for `work`.
    pub fn words(&self) -> Option<usize> {
        self.words
    }
}

/// Wall-clock timer for a single phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseClock(Instant);

impl PhaseClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// Callbacks fired by the bus around each phase.
///
/// Both methods default to no-ops so implementors only override what they
/// care about. `on_phase_end` is not called for a phase that failed.
pub trait PipelineObserver {
    fn on_phase_start(&mut self, _phase: Phase) {}

    fn on_phase_end(&mut self, _phase: Phase, _report: &PhaseReport) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that records the report of every completed phase, in order.
#[derive(Debug, Clone, Default)]
pub struct PhaseTimingObserver {
    reports: Vec<(Phase, PhaseReport)>,
}

impl PhaseTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(Phase, PhaseReport)] {
        &self.reports
    }

    /// Report for `phase`, if it completed.
    pub fn report(&self, phase: Phase) -> Option<&PhaseReport> {
        self.reports
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, r)| r)
    }

    /// Sum of all recorded phase durations.
    pub fn total(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for PhaseTimingObserver {
    fn on_phase_end(&mut self, phase: Phase, report: &PhaseReport) {
        self.reports.push((phase, report.clone()));
    }
}
