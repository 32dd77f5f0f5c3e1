//! Phase capability traits.
//!
//! Each trait is one subscription point on the [`EventBus`](super::bus::EventBus).
//! Components implement only the capabilities they need: the stop-word
//! filter is an [`OnLoad`], the text source is [`OnLoad`] + [`OnWork`], the
//! counter is [`OnWord`] + [`OnEnd`].
//!
//! # Contract
//!
//! - Handlers are invoked synchronously, in registration order.
//! - Returning `Err` aborts the current phase and the whole run; later
//!   handlers of that phase are not called.
//!
//! Ordinary closures subscribe through the `*_fn` adapters:
//!
//! ```
//! # use word_freq::pipeline::{shared, EventBus, traits::word_fn};
//! let bus = EventBus::new();
//! bus.subscribe_word(shared(word_fn(|word: &str| {
//!     println!("{word}");
//!     Ok(())
//! })));
//! ```

use std::path::Path;

use crate::errors::Result;

/// Receives the input path when the `load` phase fires.
pub trait OnLoad {
    fn on_load(&mut self, path: &Path) -> Result<()>;
}

/// Runs once when the `work` phase fires.
pub trait OnWork {
    fn on_work(&mut self) -> Result<()>;
}

/// Runs once when the `end` phase fires.
pub trait OnEnd {
    fn on_end(&mut self) -> Result<()>;
}

/// Receives every word published on the word channel.
pub trait OnWord {
    fn on_word(&mut self, word: &str) -> Result<()>;
}

// ============================================================================
// Closure adapters
// ============================================================================

/// [`OnLoad`] backed by a closure. Build with [`load_fn`].
pub struct LoadFn<F>(F);

impl<F> OnLoad for LoadFn<F>
where
    F: FnMut(&Path) -> Result<()>,
{
    #[inline]
    fn on_load(&mut self, path: &Path) -> Result<()> {
        (self.0)(path)
    }
}

/// [`OnWork`] backed by a closure. Build with [`work_fn`].
pub struct WorkFn<F>(F);

impl<F> OnWork for WorkFn<F>
where
    F: FnMut() -> Result<()>,
{
    #[inline]
    fn on_work(&mut self) -> Result<()> {
        (self.0)()
    }
}

/// [`OnEnd`] backed by a closure. Build with [`end_fn`].
pub struct EndFn<F>(F);

impl<F> OnEnd for EndFn<F>
where
    F: FnMut() -> Result<()>,
{
    #[inline]
    fn on_end(&mut self) -> Result<()> {
        (self.0)()
    }
}

/// [`OnWord`] backed by a closure. Build with [`word_fn`].
pub struct WordFn<F>(F);

impl<F> OnWord for WordFn<F>
where
    F: FnMut(&str) -> Result<()>,
{
    #[inline]
    fn on_word(&mut self, word: &str) -> Result<()> {
        (self.0)(word)
    }
}

#[inline]
pub fn load_fn<F>(f: F) -> LoadFn<F>
where
    F: FnMut(&Path) -> Result<()>,
{
    LoadFn(f)
}

#[inline]
pub fn work_fn<F>(f: F) -> WorkFn<F>
where
    F: FnMut() -> Result<()>,
{
    WorkFn(f)
}

#[inline]
pub fn end_fn<F>(f: F) -> EndFn<F>
where
    F: FnMut() -> Result<()>,
{
    EndFn(f)
}

#[inline]
pub fn word_fn<F>(f: F) -> WordFn<F>
where
    F: FnMut(&str) -> Result<()>,
{
    WordFn(f)
}
