//! Input text loading and word production

pub mod source;

pub use source::TextSource;
