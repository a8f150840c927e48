//! Streaming Tokenizer Module
//!
//! Splits raw text into lowercase word tokens. This is the first stage of the
//! analysis pipeline: whatever it emits is what the stopword filter and the
//! frequency aggregator see.
//!
//! ## Modes
//!
//! Two named token shapes, chosen explicitly by the caller:
//!
//! - [`TokenMode::WordChars`]: maximal runs of Unicode word characters
//!   (letters, digits, underscore). `"It's 9am_now"` gives `it`, `s`, `9am_now`.
//! - [`TokenMode::AlphabeticWithApostrophe`]: runs of letters, optionally joined
//!   by a single internal apostrophe. `"It's 9am"` gives `it's`, `am`.
//!   Typographic apostrophes (`’`) are accepted and emitted as `'`.
//!
//! ## Usage
//!
//! ```rust
//! use lexis_core::analyzer::tokenizer::Tokenizer;
//! use lexis_types::TokenMode;
//!
//! let tokenizer = Tokenizer::new(TokenMode::WordChars);
//! let mut seen = Vec::new();
//!
//! // Tokens are emitted via callback from a reused buffer
//! tokenizer.tokenize("The cat sat.", |token| seen.push(token.to_owned()));
//!
//! assert_eq!(seen, ["the", "cat", "sat"]);
//! ```
//!
//! ## Guarantees
//!
//! - Tokens come out in source order, one per match
//! - Empty input emits nothing
//! - There are no error conditions; any `&str` is valid input

use lexis_types::{Token, TokenMode};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyzer::normalizer::TextNormalizer;

static WORD_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("word pattern is valid"));

static ALPHABETIC_WITH_APOSTROPHE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{M}]+(?:['’][\p{L}\p{M}]+)?").expect("alphabetic pattern is valid")
});

/// Streaming tokenizer - splits raw text into normalized tokens.
///
/// Cheap to copy and reusable across inputs; the compiled patterns are
/// shared process-wide.
///
/// ## Example
///
/// ```
/// use lexis_core::analyzer::tokenizer::Tokenizer;
/// use lexis_types::TokenMode;
///
/// let tokenizer = Tokenizer::new(TokenMode::AlphabeticWithApostrophe);
/// let mut count = 0;
///
/// tokenizer.tokenize("Don't panic, it's fine", |_| count += 1);
///
/// assert_eq!(count, 4);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct Tokenizer {
    mode: TokenMode,
}

impl Tokenizer {
    /// Creates a new tokenizer for the specified mode.
    #[inline]
    pub const fn new(mode: TokenMode) -> Self {
        Self { mode }
    }

    /// Returns the mode this tokenizer was built with.
    #[inline(always)]
    pub const fn mode(&self) -> TokenMode {
        self.mode
    }

    #[inline(always)]
    fn pattern(&self) -> &'static Regex {
        match self.mode {
            TokenMode::WordChars => &WORD_CHARS,
            TokenMode::AlphabeticWithApostrophe => &ALPHABETIC_WITH_APOSTROPHE,
        }
    }

    /// Tokenizes `text` and emits each lowercase token in source order.
    ///
    /// The `&str` handed to `emit` borrows an internal buffer and is only
    /// valid for the duration of the call.
    pub fn tokenize<F>(&self, text: &str, mut emit: F)
    where
        F: FnMut(&str),
    {
        let normalizer = TextNormalizer::new();
        let mut buf = String::with_capacity(32);
        let mut scratch = String::new();

        for m in self.pattern().find_iter(text) {
            normalizer.fold_case_into(m.as_str(), &mut buf);
            if self.mode == TokenMode::AlphabeticWithApostrophe && buf.contains('’') {
                scratch.clear();
                scratch.extend(buf.chars().map(|c| if c == '’' { '\'' } else { c }));
                core::mem::swap(&mut buf, &mut scratch);
            }
            emit(&buf);
        }
    }

    /// Tokenizes `text` into an owned, order-preserving token sequence.
    pub fn tokenize_to_vec(&self, text: &str) -> Vec<Token> {
        let mut out = Vec::new();
        self.tokenize(text, |t| out.push(Token::from(t)));
        out
    }

    /// Counts tokens without normalizing them.
    #[inline]
    pub fn count(&self, text: &str) -> usize {
        self.pattern().find_iter(text).count()
    }
}

/// Converts raw text into a sequence of normalized tokens.
///
/// Shorthand for `Tokenizer::new(mode).tokenize_to_vec(text)`.
#[tracing::instrument(level = "trace", skip(text), fields(len = text.len()))]
pub fn tokenize(text: &str, mode: TokenMode) -> Vec<Token> {
    Tokenizer::new(mode).tokenize_to_vec(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(input: &str) -> Vec<String> {
        collect(input, TokenMode::WordChars)
    }

    fn alpha(input: &str) -> Vec<String> {
        collect(input, TokenMode::AlphabeticWithApostrophe)
    }

    fn collect(input: &str, mode: TokenMode) -> Vec<String> {
        let mut out = Vec::new();
        Tokenizer::new(mode).tokenize(input, |t| out.push(t.to_owned()));
        out
    }

    #[test]
    fn tokenizer_size_is_1_byte() {
        assert_eq!(size_of::<Tokenizer>(), 1);
    }

    #[test]
    fn word_chars_basic() {
        assert_eq!(
            words("The cat sat. The cat ran!"),
            ["the", "cat", "sat", "the", "cat", "ran"]
        );
    }

    #[test]
    fn word_chars_keeps_digits_and_underscore() {
        assert_eq!(words("snake_case 42 x1"), ["snake_case", "42", "x1"]);
    }

    #[test]
    fn word_chars_splits_contractions() {
        assert_eq!(words("Don't"), ["don", "t"]);
    }

    #[test]
    fn word_chars_unicode_letters() {
        assert_eq!(words("Café naïve 한국어"), ["café", "naïve", "한국어"]);
    }

    #[test]
    fn alpha_keeps_contractions_whole() {
        assert_eq!(
            alpha("Don't touch the teacher's desk"),
            ["don't", "touch", "the", "teacher's", "desk"]
        );
    }

    #[test]
    fn alpha_drops_digits_and_underscore() {
        assert_eq!(alpha("abc123def snake_case"), ["abc", "def", "snake", "case"]);
    }

    #[test]
    fn alpha_single_internal_apostrophe_only() {
        assert_eq!(alpha("rock'n'roll"), ["rock'n", "roll"]);
        assert_eq!(alpha("'quoted'"), ["quoted"]);
        assert_eq!(alpha("students' work"), ["students", "work"]);
    }

    #[test]
    fn alpha_typographic_apostrophe_normalized() {
        assert_eq!(alpha("It’s fine"), ["it's", "fine"]);
        assert_eq!(
            alpha("Don’t, won’t, can't"),
            ["don't", "won't", "can't"]
        );
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(words("").is_empty());
        assert!(alpha("").is_empty());
        assert!(words("... !!! ???").is_empty());
    }

    #[test]
    fn output_is_lowercase() {
        for t in words("HELLO World ÜBER") {
            assert_eq!(t, t.to_lowercase());
        }
    }

    #[test]
    fn count_matches_emitted() {
        let t = Tokenizer::new(TokenMode::WordChars);
        let text = "one two, three. Four!";
        let mut n = 0usize;
        t.tokenize(text, |_| n += 1);
        assert_eq!(t.count(text), n);
        assert_eq!(n, 4);
    }

    #[test]
    fn tokenize_fn_matches_streaming() {
        let text = "It's a test of the test";
        let owned = tokenize(text, TokenMode::AlphabeticWithApostrophe);
        assert_eq!(owned.len(), alpha(text).len());
        assert_eq!(owned[0], "it's");
    }

    #[test]
    fn tokenizer_is_reusable() {
        let t = Tokenizer::new(TokenMode::WordChars);

        let mut n = 0usize;
        t.tokenize("hello world", |_| n += 1);
        assert_eq!(n, 2);

        n = 0;
        t.tokenize("one two three", |_| n += 1);
        assert_eq!(n, 3);
    }
}
