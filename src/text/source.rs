//! Text source — loads the input file and produces the word stream.
//!
//! During `load` the whole file is read into memory and normalized (see
//! [`normalize`]). During `work` the normalized buffer is split into tokens
//! and every token that is not a stop word is published on the
//! [`WordChannel`], left to right, once per occurrence.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::errors::{Error, Result};
use crate::nlp::stopwords::StopWordFilter;
use crate::nlp::tokenizer::{normalize, tokens};
use crate::pipeline::bus::{Phase, WordChannel};
use crate::pipeline::traits::{OnLoad, OnWork};
use crate::pipeline::Shared;

pub struct TextSource {
    /// Normalized text; `None` until `load` has run.
    text: Option<String>,
    filter: Shared<StopWordFilter>,
    words: WordChannel,
}

impl TextSource {
    pub fn new(filter: Shared<StopWordFilter>, words: WordChannel) -> Self {
        Self {
            text: None,
            filter,
            words,
        }
    }

    /// The normalized buffer, once loaded.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.text.is_some()
    }

    /// Read and normalize `path`. The buffer is populated once; later calls
    /// keep the first result.
    ///
    /// Invalid UTF-8 sequences are replaced before normalization, which turns
    /// them into separators like any other non-word character.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        if self.text.is_some() {
            return Ok(());
        }
        let raw = fs::read(path).map_err(|e| Error::io(path, e))?;
        let normalized = normalize(&String::from_utf8_lossy(&raw));
        debug!(
            path = %path.display(),
            bytes = raw.len(),
            normalized = normalized.len(),
            "text loaded"
        );
        self.text = Some(normalized);
        Ok(())
    }

    /// Publish every non-stop-word token. Returns how many were published.
    pub fn produce_words(&self) -> Result<usize> {
        let text = self.text.as_deref().ok_or(Error::NotLoaded {
            component: "text source",
        })?;
        let filter = self
            .filter
            .try_borrow()
            .map_err(|_| Error::HandlerBusy { phase: Phase::Work })?;
        if !filter.is_loaded() {
            return Err(Error::NotLoaded {
                component: "stop-word filter",
            });
        }

        let mut published = 0;
        let mut skipped = 0;
        for token in tokens(text) {
            if filter.is_stop_word(token) {
                skipped += 1;
                continue;
            }
            self.words.publish(token)?;
            published += 1;
        }
        debug!(published, skipped, "words produced");
        Ok(published)
    }
}

impl OnLoad for TextSource {
    fn on_load(&mut self, path: &Path) -> Result<()> {
        self.load(path)
    }
}

impl OnWork for TextSource {
    fn on_work(&mut self) -> Result<()> {
        self.produce_words().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tokenizer::is_normalized_token;
    use crate::pipeline::shared;
    use crate::pipeline::traits::word_fn;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SAMPLE: &str = "The cat sat on the mat. The cat ran.";

    fn write_input(dir: &tempfile::TempDir, text: &str) -> std::path::PathBuf {
        let path = dir.path().join("input.txt");
        fs::write(&path, text).unwrap();
        path
    }

    fn loaded_filter(words: &[&str]) -> Shared<StopWordFilter> {
        let mut filter = StopWordFilter::from_list(words);
        filter.load().unwrap();
        shared(filter)
    }

    fn collecting_channel() -> (WordChannel, Rc<RefCell<Vec<String>>>) {
        let channel = WordChannel::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        channel.subscribe(shared(word_fn(move |word: &str| {
            sink.borrow_mut().push(word.to_string());
            Ok(())
        })));
        (channel, seen)
    }

    #[test]
    fn test_load_normalizes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, SAMPLE);
        let mut source = TextSource::new(loaded_filter(&[]), WordChannel::new());

        source.load(&path).unwrap();

        assert_eq!(source.text(), Some("the cat sat on the mat the cat ran "));
    }

    #[test]
    fn test_publishes_non_stop_words_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, SAMPLE);
        let (channel, seen) = collecting_channel();
        let mut source = TextSource::new(loaded_filter(&["on", "sat", "ran"]), channel);

        source.on_load(&path).unwrap();
        source.on_work().unwrap();

        assert_eq!(*seen.borrow(), vec!["the", "cat", "the", "mat", "the", "cat"]);
    }

    #[test]
    fn test_single_letters_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "a b see I x-ray");
        let (channel, seen) = collecting_channel();
        let mut source = TextSource::new(loaded_filter(&[]), channel);

        source.load(&path).unwrap();
        let published = source.produce_words().unwrap();

        assert_eq!(published, 2);
        assert_eq!(*seen.borrow(), vec!["see", "ray"]);
    }

    #[test]
    fn test_digits_are_ordinary_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "route 66, route 66!");
        let (channel, seen) = collecting_channel();
        let mut source = TextSource::new(loaded_filter(&[]), channel);

        source.load(&path).unwrap();
        source.produce_words().unwrap();

        assert_eq!(*seen.borrow(), vec!["route", "66", "route", "66"]);
    }

    #[test]
    fn test_empty_file_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, "");
        let (channel, seen) = collecting_channel();
        let mut source = TextSource::new(loaded_filter(&[]), channel);

        source.load(&path).unwrap();

        assert_eq!(source.produce_words().unwrap(), 0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_published_words_use_normalized_alphabet() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(
            &dir,
            "Ça va? SHOUTING, snake_case & tabs\tand\r\nnewlines -- 3.14 é",
        );
        let (channel, seen) = collecting_channel();
        let mut source = TextSource::new(loaded_filter(&[]), channel);

        source.load(&path).unwrap();
        source.produce_words().unwrap();

        assert!(!seen.borrow().is_empty());
        for word in seen.borrow().iter() {
            assert!(is_normalized_token(word), "bad word: {word:?}");
        }
    }

    #[test]
    fn test_invalid_utf8_becomes_separator() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, b"good\xFFwords").unwrap();
        let mut source = TextSource::new(loaded_filter(&[]), WordChannel::new());

        source.load(&path).unwrap();

        assert_eq!(source.text(), Some("good words"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut source = TextSource::new(loaded_filter(&[]), WordChannel::new());

        let err = source.load(Path::new("/no/such/input.txt")).unwrap_err();

        assert!(matches!(err, Error::Io { .. }));
        assert!(!source.is_loaded());
    }

    #[test]
    fn test_work_before_load_fails_fast() {
        let source = TextSource::new(loaded_filter(&[]), WordChannel::new());

        let err = source.produce_words().unwrap_err();

        assert!(matches!(
            err,
            Error::NotLoaded {
                component: "text source"
            }
        ));
    }

    #[test]
    fn test_work_with_unloaded_filter_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_input(&dir, SAMPLE);
        let filter = shared(StopWordFilter::from_list(&["the"]));
        let mut source = TextSource::new(filter, WordChannel::new());

        source.load(&path).unwrap();
        let err = source.produce_words().unwrap_err();

        assert!(matches!(
            err,
            Error::NotLoaded {
                component: "stop-word filter"
            }
        ));
    }
}
