//! Error types shared by every pipeline component.
//!
//! The pipeline is fail-fast: the first handler that returns an [`Error`]
//! aborts its phase and the whole run, and the error surfaces unchanged from
//! [`EventBus::run`](crate::pipeline::bus::EventBus::run).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::bus::{Phase, PipelineState};

/// Errors produced while assembling or running the word-frequency pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text or the stop-word list could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A component was asked to work before its `load` phase completed.
    #[error("{component} used before the load phase completed")]
    NotLoaded { component: &'static str },

    /// `run` was called on a bus that is no longer uninitialized.
    #[error("pipeline cannot run again from state `{state}`")]
    AlreadyRun { state: PipelineState },

    /// A handler was invoked while it was already executing.
    #[error("handler re-entered during the `{phase}` phase")]
    HandlerBusy { phase: Phase },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file is not valid JSON for [`FrequencyConfig`](crate::types::FrequencyConfig).
    #[error("malformed configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The report could not be written to its sink.
    #[error("failed to write report: {0}")]
    Output(#[source] io::Error),
}

impl Error {
    /// Wrap an I/O failure together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
