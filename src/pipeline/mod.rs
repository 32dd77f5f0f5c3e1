//! Event-driven pipeline
//!
//! - [`bus`]: the three-phase [`EventBus`] and the [`WordChannel`]
//! - [`traits`]: per-phase capability traits and closure adapters
//! - [`observer`]: phase-boundary hooks for timing and diagnostics
//! - [`runner`]: wiring of the concrete components into a runnable app

pub mod bus;
pub mod observer;
pub mod runner;
pub mod traits;

use std::cell::RefCell;
use std::rc::Rc;

pub use bus::{EventBus, Phase, PipelineState, WordChannel};
pub use observer::{NoopObserver, PhaseReport, PhaseTimingObserver, PipelineObserver};
pub use runner::{AppBuilder, WordFrequencyApp};

/// Single-threaded shared ownership of a handler.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap `value` for subscription on the bus.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
