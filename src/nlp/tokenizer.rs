//! Text normalization and tokenization
//!
//! Normalization maps every maximal run of characters outside
//! `[A-Za-z0-9_]` to a single space and lowercases the rest, so the
//! normalized alphabet is `[a-z0-9_ ]`. Tokens are the whitespace-separated
//! pieces of a normalized buffer.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static NON_WORD_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("non-word pattern is valid"));

/// Collapse non-word runs to single spaces and lowercase the result.
pub fn normalize(text: &str) -> String {
    match NON_WORD_RUN.replace_all(text, " ") {
        Cow::Borrowed(unchanged) => unchanged.to_ascii_lowercase(),
        Cow::Owned(mut replaced) => {
            replaced.make_ascii_lowercase();
            replaced
        }
    }
}

/// Split a normalized buffer into tokens, left to right. Empty pieces are
/// never yielded.
pub fn tokens(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}

/// Whether `token` only uses the normalized alphabet.
pub fn is_normalized_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_collapses_to_single_space() {
        assert_eq!(
            normalize("The cat sat on the mat. The cat ran."),
            "the cat sat on the mat the cat ran "
        );
    }

    #[test]
    fn test_runs_of_mixed_separators() {
        assert_eq!(normalize("hello,\n\t--world!!"), "hello world ");
    }

    #[test]
    fn test_underscore_and_digits_are_word_chars() {
        assert_eq!(normalize("snake_case 42nd"), "snake_case 42nd");
    }

    #[test]
    fn test_non_ascii_letters_are_separators() {
        assert_eq!(normalize("café naïve"), "caf na ve");
    }

    #[test]
    fn test_tokens_skip_empty_pieces() {
        let normalized = normalize("  ...leading and trailing...  ");
        let toks: Vec<&str> = tokens(&normalized).collect();
        assert_eq!(toks, vec!["leading", "and", "trailing"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(normalize(""), "");
        assert_eq!(tokens("").count(), 0);
    }

    #[test]
    fn test_only_punctuation() {
        let normalized = normalize("?!.,;");
        assert_eq!(normalized, " ");
        assert_eq!(tokens(&normalized).count(), 0);
    }

    #[test]
    fn test_every_token_uses_normalized_alphabet() {
        let text = "Ünïcödé, CAPS & snake_case; 1,000 items -- O'Brien's \"quote\"\r\n";
        let normalized = normalize(text);
        for token in tokens(&normalized) {
            assert!(is_normalized_token(token), "bad token: {token:?}");
        }
    }

    #[test]
    fn test_is_normalized_token() {
        assert!(is_normalized_token("abc_123"));
        assert!(!is_normalized_token(""));
        assert!(!is_normalized_token("Abc"));
        assert!(!is_normalized_token("a-b"));
    }
}
