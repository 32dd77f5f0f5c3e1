//! Event bus — drives the `load` → `work` → `end` lifecycle.
//!
//! The [`EventBus`] holds one ordered handler list per [`Phase`] plus the
//! [`WordChannel`], a secondary publish/subscribe path that carries single
//! words from producers to consumers while `work` runs. Calling
//! [`EventBus::run`] fires the three phases in order; every handler of a
//! phase completes before the next phase starts.
//!
//! # Failure
//!
//! The first handler that returns `Err` aborts its phase and the run. The bus
//! moves to [`PipelineState::Aborted`] and the error is returned unchanged.
//!
//! # Ownership
//!
//! Handlers are [`Shared`] (`Rc<RefCell<_>>`) so a component can subscribe to
//! several phases while keeping a single owner of its state. A handler that
//! is re-entered while already running yields [`Error::HandlerBusy`] rather
//! than a panic.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::path::Path;
use std::rc::Rc;

use tracing::{debug, info_span};

use super::observer::{NoopObserver, PhaseClock, PhaseReport, PipelineObserver};
use super::traits::{OnEnd, OnLoad, OnWord, OnWork};
use super::Shared;
use crate::errors::{Error, Result};

// ============================================================================
// Phase / PipelineState
// ============================================================================

/// One of the three lifecycle stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Load,
    Work,
    End,
}

impl Phase {
    /// All phases in firing order.
    pub const ALL: [Phase; 3] = [Phase::Load, Phase::Work, Phase::End];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Work => "work",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a bus is in its lifecycle.
///
/// `Uninitialized → Loaded → Worked → Ended`, strictly linear. A failed
/// phase moves the bus to `Aborted`. Neither `Ended` nor `Aborted` can run
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Uninitialized,
    Loaded,
    Worked,
    Ended,
    Aborted,
}

impl PipelineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Loaded => "loaded",
            Self::Worked => "worked",
            Self::Ended => "ended",
            Self::Aborted => "aborted",
        }
    }

    fn after(phase: Phase) -> Self {
        match phase {
            Phase::Load => Self::Loaded,
            Phase::Work => Self::Worked,
            Phase::End => Self::Ended,
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// WordChannel
// ============================================================================

/// Synchronous fan-out of single words.
///
/// Cloning yields another handle to the same subscriber list, which is how
/// a producer gets to publish without holding the bus. Subscribers added
/// while a publish is in flight are not invoked for that word.
#[derive(Clone, Default)]
pub struct WordChannel {
    inner: Rc<WordChannelInner>,
}

#[derive(Default)]
struct WordChannelInner {
    subscribers: RefCell<Vec<Shared<dyn OnWord>>>,
    published: Cell<usize>,
}

impl WordChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: Shared<dyn OnWord>) {
        self.inner.subscribers.borrow_mut().push(handler);
    }

    /// Deliver `word` to every subscriber, in registration order, before
    /// returning. Stops at the first subscriber error.
    pub fn publish(&self, word: &str) -> Result<()> {
        self.inner.published.set(self.inner.published.get() + 1);

        let count = self.inner.subscribers.borrow().len();
        for idx in 0..count {
            // Release the list borrow before calling out so handlers may subscribe.
            let handler = Rc::clone(&self.inner.subscribers.borrow()[idx]);
            let mut handler = handler
                .try_borrow_mut()
                .map_err(|_| Error::HandlerBusy { phase: Phase::Work })?;
            handler.on_word(word)?;
        }
        Ok(())
    }

    /// Number of subscribers currently registered.
    pub fn len(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of `publish` calls made through any handle.
    pub fn published(&self) -> usize {
        self.inner.published.get()
    }
}

impl fmt::Debug for WordChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordChannel")
            .field("subscribers", &self.len())
            .field("published", &self.published())
            .finish()
    }
}

// ============================================================================
// EventBus
// ============================================================================

/// Orchestrator for the three-phase lifecycle.
pub struct EventBus {
    load: Vec<Shared<dyn OnLoad>>,
    work: Vec<Shared<dyn OnWork>>,
    end: Vec<Shared<dyn OnEnd>>,
    words: WordChannel,
    state: PipelineState,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            load: Vec::new(),
            work: Vec::new(),
            end: Vec::new(),
            words: WordChannel::new(),
            state: PipelineState::Uninitialized,
        }
    }

    pub fn subscribe_load(&mut self, handler: Shared<dyn OnLoad>) {
        self.load.push(handler);
    }

    pub fn subscribe_work(&mut self, handler: Shared<dyn OnWork>) {
        self.work.push(handler);
    }

    pub fn subscribe_end(&mut self, handler: Shared<dyn OnEnd>) {
        self.end.push(handler);
    }

    pub fn subscribe_word(&self, handler: Shared<dyn OnWord>) {
        self.words.subscribe(handler);
    }

    pub fn publish_word(&self, word: &str) -> Result<()> {
        self.words.publish(word)
    }

    /// A handle to the word channel for components that publish during `work`.
    pub fn word_channel(&self) -> WordChannel {
        self.words.clone()
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Number of handlers registered for `phase`.
    pub fn handler_count(&self, phase: Phase) -> usize {
        match phase {
            Phase::Load => self.load.len(),
            Phase::Work => self.work.len(),
            Phase::End => self.end.len(),
        }
    }

    /// Fire `load` with `path`, then `work`, then `end`.
    pub fn run(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.run_observed(path, &mut NoopObserver)
    }

    /// [`run`](Self::run), notifying `observer` at every phase boundary.
    pub fn run_observed(
        &mut self,
        path: impl AsRef<Path>,
        observer: &mut impl PipelineObserver,
    ) -> Result<()> {
        if self.state != PipelineState::Uninitialized {
            return Err(Error::AlreadyRun { state: self.state });
        }
        let path = path.as_ref();

        for phase in Phase::ALL {
            let _span = info_span!("pipeline_phase", phase = phase.as_str()).entered();
            observer.on_phase_start(phase);

            let clock = PhaseClock::start();
            let published_before = self.words.published();
            if let Err(err) = self.fire(phase, path) {
                debug!(%phase, error = %err, "phase aborted");
                self.state = PipelineState::Aborted;
                return Err(err);
            }

            let mut report = PhaseReport::new(clock.elapsed(), self.handler_count(phase));
            if phase == Phase::Work {
                report = report.with_words(self.words.published() - published_before);
            }
            debug!(
                %phase,
                handlers = report.handlers(),
                elapsed_us = report.elapsed().as_micros() as u64,
                "phase complete"
            );
            observer.on_phase_end(phase, &report);
            self.state = PipelineState::after(phase);
        }
        Ok(())
    }

    fn fire(&self, phase: Phase, path: &Path) -> Result<()> {
        let busy = || Error::HandlerBusy { phase };
        match phase {
            Phase::Load => {
                for handler in &self.load {
                    handler.try_borrow_mut().map_err(|_| busy())?.on_load(path)?;
                }
            }
            Phase::Work => {
                for handler in &self.work {
                    handler.try_borrow_mut().map_err(|_| busy())?.on_work()?;
                }
            }
            Phase::End => {
                for handler in &self.end {
                    handler.try_borrow_mut().map_err(|_| busy())?.on_end()?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("load", &self.load.len())
            .field("work", &self.work.len())
            .field("end", &self.end.len())
            .field("words", &self.words)
            .field("state", &self.state)
            .finish()
    }
}
