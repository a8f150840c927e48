//! Word and sentence counting.

use lexis_types::TokenMode;
use memchr::memchr3_iter;
use serde::Serialize;

use crate::analyzer::tokenizer::Tokenizer;

/// Word and sentence totals for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TextCounts {
    /// Number of word-character tokens.
    pub words: usize,
    /// Number of terminal punctuation runs.
    pub sentences: usize,
}

impl TextCounts {
    /// Counts words and sentences in `text`.
    pub fn of(text: &str) -> Self {
        Self {
            words: count_words(text),
            sentences: count_sentences(text),
        }
    }
}

impl core::fmt::Display for TextCounts {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} words, {} sentences", self.words, self.sentences)
    }
}

/// Counts maximal runs of word characters.
#[inline]
pub fn count_words(text: &str) -> usize {
    Tokenizer::new(TokenMode::WordChars).count(text)
}

/// Counts sentence boundaries as maximal runs of `.`, `!` and `?`.
///
/// A run counts once regardless of its length, so `"Wait... what?!"` has two.
/// Text without terminal punctuation has zero sentences.
pub fn count_sentences(text: &str) -> usize {
    let mut runs = 0usize;
    let mut next_in_run = usize::MAX;

    // ASCII punctuation never appears inside a multi-byte UTF-8 sequence,
    // so a byte scan sees exactly the characters a char scan would.
    for i in memchr3_iter(b'.', b'!', b'?', text.as_bytes()) {
        if i != next_in_run {
            runs += 1;
        }
        next_in_run = i + 1;
    }

    runs
}
