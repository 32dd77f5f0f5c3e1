//! Stopword filtering
//!
//! The [`StopWordFilter`] is populated during the `load` phase from a
//! comma-separated word list and then only queried. The 26 single ASCII
//! letters are always stop words, whatever the list says.

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::errors::{Error, Result};
use crate::pipeline::traits::OnLoad;

/// Where the filter reads its words from during `load`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopWordSource {
    /// A comma-separated list on disk, resolved against the working directory.
    File(PathBuf),
    /// An in-memory list.
    Words(Vec<String>),
}

/// A filter for removing stopwords from the word stream
#[derive(Debug, Clone)]
pub struct StopWordFilter {
    source: StopWordSource,
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
    loaded: bool,
}

impl StopWordFilter {
    /// Create a filter that reads `path` when the `load` phase fires
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_source(StopWordSource::File(path.into()))
    }

    /// Create a filter over an in-memory list, still populated on `load`
    pub fn from_list(words: &[&str]) -> Self {
        Self::with_source(StopWordSource::Words(
            words.iter().map(|w| w.to_string()).collect(),
        ))
    }

    pub fn with_source(source: StopWordSource) -> Self {
        Self {
            source,
            stopwords: FxHashSet::default(),
            loaded: false,
        }
    }

    /// Check if a word is a stopword.
    ///
    /// Only meaningful once `load` has completed: an unloaded filter holds
    /// no words and answers `false` for everything.
    pub fn is_stop_word(&self, word: &str) -> bool {
        let word = if word.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(word.to_ascii_lowercase())
        } else {
            Cow::Borrowed(word)
        };
        self.stopwords.contains(word.as_ref())
    }

    /// Whether the `load` phase has populated this filter.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn source(&self) -> &StopWordSource {
        &self.source
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }

    /// Populate the set from the configured source. Subsequent calls are
    /// no-ops: the set is built once.
    pub fn load(&mut self) -> Result<()> {
        if self.loaded {
            return Ok(());
        }

        let mut stopwords: FxHashSet<String> = match &self.source {
            StopWordSource::File(path) => {
                let raw = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                let words = parse_list(&raw);
                if words.is_empty() {
                    warn!(path = %path.display(), "stop-word list is empty");
                }
                words
            }
            StopWordSource::Words(words) => words
                .iter()
                .map(|w| w.trim().to_ascii_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        };
        let listed = stopwords.len();
        stopwords.extend(single_letters());

        debug!(listed, total = stopwords.len(), "stop words loaded");
        self.stopwords = stopwords;
        self.loaded = true;
        Ok(())
    }
}

impl OnLoad for StopWordFilter {
    fn on_load(&mut self, _path: &Path) -> Result<()> {
        self.load()
    }
}

/// Split a comma-separated list into lowercase words. Surrounding whitespace
/// (including a trailing newline) is dropped, as are empty entries.
fn parse_list(raw: &str) -> FxHashSet<String> {
    raw.split(',')
        .map(|w| w.trim().to_ascii_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn single_letters() -> impl Iterator<Item = String> {
    (b'a'..=b'z').map(|b| char::from(b).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(words: &[&str]) -> StopWordFilter {
        let mut filter = StopWordFilter::from_list(words);
        filter.load().unwrap();
        filter
    }

    #[test]
    fn test_custom_stopwords() {
        let filter = loaded(&["on", "sat", "ran"]);

        assert!(filter.is_stop_word("on"));
        assert!(filter.is_stop_word("sat"));
        assert!(filter.is_stop_word("ran"));
        assert!(!filter.is_stop_word("cat"));
        assert!(!filter.is_stop_word("the"));
    }

    #[test]
    fn test_single_letters_always_included() {
        let filter = loaded(&[]);

        for letter in 'a'..='z' {
            assert!(filter.is_stop_word(&letter.to_string()), "{letter}");
        }
        assert_eq!(filter.len(), 26);
        assert!(!filter.is_stop_word("ab"));
        assert!(!filter.is_stop_word("1"));
    }

    #[test]
    fn test_case_normalized_membership() {
        let filter = loaded(&["The"]);

        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("THE"));
        assert!(filter.is_stop_word("X"));
    }

    #[test]
    fn test_unloaded_filter_is_empty() {
        let filter = StopWordFilter::from_list(&["the"]);

        assert!(!filter.is_loaded());
        assert!(filter.is_empty());
        assert!(!filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("a"));
    }

    #[test]
    fn test_parse_list_trims_and_skips_empty() {
        let words = parse_list("the, and ,of,,to\n");
        let mut sorted: Vec<_> = words.into_iter().collect();
        sorted.sort();
        assert_eq!(sorted, vec!["and", "of", "the", "to"]);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopwords.txt");
        fs::write(&path, "about,above,after\n").unwrap();

        let mut filter = StopWordFilter::new(&path);
        filter.on_load(Path::new("ignored.txt")).unwrap();

        assert!(filter.is_loaded());
        assert!(filter.is_stop_word("after"));
        assert!(filter.is_stop_word("z"));
        assert_eq!(filter.len(), 3 + 26);
    }

    #[test]
    fn test_empty_file_still_has_letters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stopwords.txt");
        fs::write(&path, "").unwrap();

        let mut filter = StopWordFilter::new(&path);
        filter.load().unwrap();

        assert_eq!(filter.len(), 26);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut filter = StopWordFilter::new("/no/such/stopwords.txt");
        let err = filter.load().unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(!filter.is_loaded());
    }

    #[test]
    fn test_load_is_idempotent() {
        let mut filter = loaded(&["the"]);
        let before = filter.len();
        filter.load().unwrap();
        assert_eq!(filter.len(), before);
    }
}
