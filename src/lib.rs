//! # word-freq
//!
//! Term-frequency counting built on a small publish/subscribe pipeline.
//!
//! Four components never call each other directly; they meet on an
//! [`EventBus`] that fires three phases in order:
//!
//! 1. **load**: the [`StopWordFilter`] reads its list and the
//!    [`TextSource`] reads and normalizes the input file
//! 2. **work**: the text source publishes every non-stop word on the word
//!    channel, where the [`FrequencyCounter`] counts it
//! 3. **end**: the counter writes the top entries as `<word> - <count>`
//!
//! ## Quick start
//!
//! ```no_run
//! use word_freq::{FrequencyConfig, WordFrequencyApp};
//!
//! let config = FrequencyConfig::default().with_top_n(10);
//! let mut app = WordFrequencyApp::builder().config(config).build()?;
//! app.run("input.txt")?;
//! # Ok::<(), word_freq::Error>(())
//! ```
//!
//! Custom handlers subscribe alongside the built-in components; see
//! [`pipeline::traits`].

pub mod counter;
pub mod errors;
pub mod nlp;
pub mod pipeline;
pub mod text;
pub mod types;

pub use counter::{FrequencyCounter, Report, WordCount};
pub use errors::{Error, Result};
pub use nlp::{StopWordFilter, StopWordSource};
pub use pipeline::{EventBus, Phase, PipelineState, WordFrequencyApp};
pub use text::TextSource;
pub use types::{FrequencyConfig, ReportFormat};
