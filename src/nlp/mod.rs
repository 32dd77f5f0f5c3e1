//! Text handling for the word stream
//!
//! [`tokenizer`] normalizes raw text and splits it into words;
//! [`stopwords`] decides which of those words are dropped before counting.

pub mod stopwords;
pub mod tokenizer;

pub use stopwords::{StopWordFilter, StopWordSource};
