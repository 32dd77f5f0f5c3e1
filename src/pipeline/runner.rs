//! Application wiring — assembles the four components around one bus.
//!
//! [`WordFrequencyApp`] is the ready-to-run orchestrator: it owns the
//! [`EventBus`] and keeps handles to the components it subscribed so callers
//! can inspect them after a run. Nothing is global; two apps built from the
//! same inputs are fully independent.
//!
//! Subscription order, which is also invocation order:
//!
//! | Phase  | Handlers |
//! |--------|----------|
//! | `load` | [`StopWordFilter`], [`TextSource`] |
//! | `work` | [`TextSource`] |
//! | word   | [`FrequencyCounter`] |
//! | `end`  | [`FrequencyCounter`] |
//!
//! ```no_run
//! # use word_freq::pipeline::runner::WordFrequencyApp;
//! let mut app = WordFrequencyApp::builder().build()?;
//! app.run("pride-and-prejudice.txt")?;
//! # Ok::<(), word_freq::Error>(())
//! ```

use std::io::{self, Stdout, Write};
use std::path::Path;

use tracing::info;

use super::bus::{EventBus, PipelineState};
use super::observer::{NoopObserver, PipelineObserver};
use super::{shared, Shared};
use crate::counter::FrequencyCounter;
use crate::errors::Result;
use crate::nlp::stopwords::{StopWordFilter, StopWordSource};
use crate::text::TextSource;
use crate::types::FrequencyConfig;

// ============================================================================
// WordFrequencyApp
// ============================================================================

pub struct WordFrequencyApp<W: Write = Stdout> {
    bus: EventBus,
    stop_words: Shared<StopWordFilter>,
    source: Shared<TextSource>,
    counter: Shared<FrequencyCounter<W>>,
}

impl WordFrequencyApp<Stdout> {
    pub fn builder() -> AppBuilder {
        AppBuilder::new()
    }
}

impl<W: Write + 'static> WordFrequencyApp<W> {
    /// Run the whole lifecycle over the file at `path`.
    pub fn run(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.run_observed(path, &mut NoopObserver)
    }

    pub fn run_observed(
        &mut self,
        path: impl AsRef<Path>,
        observer: &mut impl PipelineObserver,
    ) -> Result<()> {
        let path = path.as_ref();
        info!(path = %path.display(), "word frequency run started");
        self.bus.run_observed(path, observer)?;
        info!(
            distinct = self.counter.borrow().distinct(),
            "word frequency run finished"
        );
        Ok(())
    }

    pub fn state(&self) -> PipelineState {
        self.bus.state()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn stop_words(&self) -> &Shared<StopWordFilter> {
        &self.stop_words
    }

    pub fn source(&self) -> &Shared<TextSource> {
        &self.source
    }

    pub fn counter(&self) -> &Shared<FrequencyCounter<W>> {
        &self.counter
    }
}

// ============================================================================
// AppBuilder
// ============================================================================

/// Fluent builder for a [`WordFrequencyApp`].
///
/// Starts from [`FrequencyConfig::default`], reads stop words from the
/// configured path and prints to standard output.
pub struct AppBuilder<W = Stdout> {
    config: FrequencyConfig,
    stop_words: Option<StopWordSource>,
    out: W,
}

impl AppBuilder {
    pub fn new() -> Self {
        AppBuilder {
            config: FrequencyConfig::default(),
            stop_words: None,
            out: io::stdout(),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + 'static> AppBuilder<W> {
    pub fn config(mut self, config: FrequencyConfig) -> Self {
        self.config = config;
        self
    }

    /// Override where stop words come from. Without this the filter reads
    /// `config.stop_words_path`.
    pub fn stop_words(mut self, source: StopWordSource) -> Self {
        self.stop_words = Some(source);
        self
    }

    /// Send the report somewhere other than standard output.
    pub fn output<O: Write + 'static>(self, out: O) -> AppBuilder<O> {
        AppBuilder {
            config: self.config,
            stop_words: self.stop_words,
            out,
        }
    }

    /// Validate the config and wire every component to a fresh bus.
    pub fn build(self) -> Result<WordFrequencyApp<W>> {
        self.config.validate()?;
        let source = self
            .stop_words
            .unwrap_or_else(|| StopWordSource::File(self.config.stop_words_path.clone()));

        let mut bus = EventBus::new();
        let stop_words = shared(StopWordFilter::with_source(source));
        let text = shared(TextSource::new(stop_words.clone(), bus.word_channel()));
        let counter = shared(FrequencyCounter::new(
            self.config.top_n,
            self.config.format,
            self.out,
        ));

        bus.subscribe_load(stop_words.clone());
        bus.subscribe_load(text.clone());
        bus.subscribe_work(text.clone());
        bus.subscribe_word(counter.clone());
        bus.subscribe_end(counter.clone());

        Ok(WordFrequencyApp {
            bus,
            stop_words,
            source: text,
            counter,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
