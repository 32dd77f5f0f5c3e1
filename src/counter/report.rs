//! Frequency report — the public output of a run.
//!
//! A [`Report`] is an ordered list of [`WordCount`]s, highest count first.
//! It renders either as `<word> - <count>` lines or as a JSON array.

use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::errors::{Error, Result};
use crate::types::ReportFormat;

/// One report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.word, self.count)
    }
}

/// Top entries by count, descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    entries: Vec<WordCount>,
}

impl Report {
    /// Wrap entries that are already sorted by count, descending.
    pub fn new(entries: Vec<WordCount>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].count >= w[1].count));
        Self { entries }
    }

    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the report to `out` in the requested format.
    pub fn render(&self, format: ReportFormat, out: &mut impl Write) -> Result<()> {
        match format {
            ReportFormat::Text => {
                for entry in &self.entries {
                    writeln!(out, "{entry}").map_err(Error::Output)?;
                }
            }
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)
                    .map_err(|e| Error::Output(e.into()))?;
                writeln!(out).map_err(Error::Output)?;
            }
        }
        out.flush().map_err(Error::Output)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
