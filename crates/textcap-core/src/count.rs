//! Document size counting.
//!
//! Counts are always taken over the whole document. Character counts are
//! Unicode scalar values; word counts are whitespace-delimited tokens.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Unit a document budget is measured in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LimitType {
    /// Count characters.
    #[default]
    Characters,
    /// Count whitespace-delimited words.
    Words,
}

impl LimitType {
    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Words => "words",
        }
    }

    /// Label used after a count in indicators and notices.
    pub const fn unit_label(&self) -> &'static str {
        self.as_str()
    }

    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Characters => Self::Words,
            Self::Words => Self::Characters,
        }
    }
}

impl std::fmt::Display for LimitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count `content` in the given mode.
pub fn count(content: &str, mode: LimitType) -> usize {
    match mode {
        LimitType::Characters => content.chars().count(),
        LimitType::Words => content.split_whitespace().count(),
    }
}

/// Number of characters to delete before `cursor` so that `words` word
/// tokens ending at the cursor are removed.
///
/// Walks backwards the way backward-kill-word does: whitespace directly
/// before the cursor goes with the word in front of it. Stops at the start
/// of the document, so the result never exceeds `cursor`.
pub fn word_span_before(content: &str, cursor: usize, words: usize) -> usize {
    let before: Vec<char> = content.chars().take(cursor).collect();
    let cursor = before.len();
    let mut i = cursor;

    for _ in 0..words {
        while i > 0 && before[i - 1].is_whitespace() {
            i -= 1;
        }
        if i == 0 {
            break;
        }
        while i > 0 && !before[i - 1].is_whitespace() {
            i -= 1;
        }
    }

    cursor - i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_counts_zero() {
        assert_eq!(count("", LimitType::Characters), 0);
        assert_eq!(count("", LimitType::Words), 0);
    }

    #[test]
    fn characters_are_scalar_values_not_bytes() {
        assert_eq!(count("héllo", LimitType::Characters), 5);
        assert_eq!(count("日本語", LimitType::Characters), 3);
    }

    #[test]
    fn words_ignore_surrounding_whitespace() {
        assert_eq!(count("  one two\n\tthree  ", LimitType::Words), 3);
        assert_eq!(count("   \n ", LimitType::Words), 0);
    }

    #[test]
    fn toggled_flips_mode() {
        assert_eq!(LimitType::Characters.toggled(), LimitType::Words);
        assert_eq!(LimitType::Words.toggled(), LimitType::Characters);
    }

    #[test]
    fn unit_label_matches_mode() {
        assert_eq!(LimitType::Characters.unit_label(), "characters");
        assert_eq!(LimitType::Words.to_string(), "words");
    }

    #[test]
    fn word_span_takes_trailing_word() {
        // "one two three" -> drop "three"
        assert_eq!(word_span_before("one two three", 13, 1), 5);
        assert_eq!(word_span_before("one two three", 13, 2), 9);
    }

    #[test]
    fn word_span_includes_whitespace_before_cursor() {
        // cursor after "two  " -> removing one word takes "two  "
        assert_eq!(word_span_before("one two  rest", 9, 1), 5);
    }

    #[test]
    fn word_span_clamps_at_document_start() {
        assert_eq!(word_span_before("one two", 7, 10), 7);
        assert_eq!(word_span_before("", 0, 3), 0);
    }

    #[test]
    fn word_span_ignores_out_of_range_cursor() {
        assert_eq!(word_span_before("ab", 99, 1), 2);
    }
}
