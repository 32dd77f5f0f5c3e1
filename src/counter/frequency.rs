//! Word frequency counter
//!
//! Counts every word received on the word channel and, when `end` fires,
//! writes the top entries to its output sink. Counts live in a dense vector
//! indexed through an `FxHashMap`, so entries keep first-seen order and the
//! stable sort in [`FrequencyCounter::top`] breaks ties by that order.

use std::io::{self, Stdout, Write};

use rustc_hash::FxHashMap;
use tracing::debug;

use super::report::{Report, WordCount};
use crate::errors::Result;
use crate::pipeline::traits::{OnEnd, OnWord};
use crate::types::{ReportFormat, DEFAULT_TOP_N};

#[derive(Debug)]
pub struct FrequencyCounter<W: Write = Stdout> {
    /// Maps word -> index into `counts`
    word_to_id: FxHashMap<String, usize>,
    /// (word, count) in first-seen order
    counts: Vec<(String, u64)>,
    top_n: usize,
    format: ReportFormat,
    out: W,
    report: Option<Report>,
}

impl FrequencyCounter<Stdout> {
    /// Counter printing the default top 25 as text to standard output.
    pub fn stdout() -> Self {
        Self::new(DEFAULT_TOP_N, ReportFormat::Text, io::stdout())
    }
}

impl<W: Write> FrequencyCounter<W> {
    pub fn new(top_n: usize, format: ReportFormat, out: W) -> Self {
        Self {
            word_to_id: FxHashMap::default(),
            counts: Vec::new(),
            top_n,
            format,
            out,
            report: None,
        }
    }

    /// Add one occurrence of `word`.
    pub fn increment(&mut self, word: &str) {
        if let Some(&id) = self.word_to_id.get(word) {
            self.counts[id].1 += 1;
            return;
        }

        let id = self.counts.len();
        self.word_to_id.insert(word.to_string(), id);
        self.counts.push((word.to_string(), 1));
    }

    /// Occurrences of `word` seen so far.
    pub fn count(&self, word: &str) -> u64 {
        self.word_to_id
            .get(word)
            .map(|&id| self.counts[id].1)
            .unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts, i.e. the number of words received.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// The `n` most frequent words, highest count first. Equal counts keep
    /// first-seen order.
    pub fn top(&self, n: usize) -> Report {
        let mut ids: Vec<usize> = (0..self.counts.len()).collect();
        ids.sort_by(|&a, &b| self.counts[b].1.cmp(&self.counts[a].1));
        ids.truncate(n);

        Report::new(
            ids.into_iter()
                .map(|id| {
                    let (word, count) = &self.counts[id];
                    WordCount::new(word.as_str(), *count)
                })
                .collect(),
        )
    }

    /// The report rendered by the last `end` phase.
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Build the top-N report and write it to the output sink.
    pub fn print(&mut self) -> Result<()> {
        let report = self.top(self.top_n);
        debug!(
            distinct = self.distinct(),
            total = self.total(),
            reported = report.len(),
            "rendering report"
        );
        report.render(self.format, &mut self.out)?;
        self.report = Some(report);
        Ok(())
    }
}

impl<W: Write> OnWord for FrequencyCounter<W> {
    fn on_word(&mut self, word: &str) -> Result<()> {
        self.increment(word);
        Ok(())
    }
}

impl<W: Write> OnEnd for FrequencyCounter<W> {
    fn on_end(&mut self) -> Result<()> {
        self.print()
    }
}
