//! Frequency aggregation and reporting
//!
//! - [`frequency`]: the word-channel consumer that owns the counts
//! - [`report`]: the ordered top-N result and its renderings

pub mod frequency;
pub mod report;

pub use frequency::FrequencyCounter;
pub use report::{Report, WordCount};
