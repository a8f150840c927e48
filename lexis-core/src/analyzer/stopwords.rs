//! Stopword filtering.
//!
//! Stopwords are supplied by the caller as a comma-separated string, the way
//! a user types them into a form: `"the, a, An ,of"`.

use lexis_types::Token;
use rustc_hash::FxHashSet;

/// A set of lowercase words to exclude from analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: FxHashSet<Box<str>>,
}

impl StopwordSet {
    /// Creates an empty set (no filtering).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list.
    ///
    /// Each piece is trimmed and lowercased; empty pieces are dropped.
    /// Duplicates and ordering do not matter.
    ///
    /// ```
    /// use lexis_core::analyzer::stopwords::StopwordSet;
    ///
    /// let set = StopwordSet::parse(" The, a,,AN ");
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains("an"));
    /// ```
    pub fn parse(list: &str) -> Self {
        Self::from_words(list.split(','))
    }

    /// Builds a set from individual words, with the same normalization as [`StopwordSet::parse`].
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| {
                let w = w.as_ref().trim();
                (!w.is_empty()).then(|| w.to_lowercase().into_boxed_str())
            })
            .collect();
        Self { words }
    }

    /// Adds more words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(Self::from_words(words).words);
    }

    /// Returns `true` if `token` is a stopword.
    ///
    /// Expects an already-normalized token; no case folding happens here.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of distinct stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if nothing will be filtered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Removes stopwords from `tokens`, preserving the order of survivors.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(tokens = tokens.len(), stopwords = self.len())
    )]
    pub fn retain(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        if !self.is_empty() {
            tokens.retain(|t| !self.contains(t));
        }
        tokens
    }
}

/// Removes every token present in `stopwords`.
///
/// The result may be empty; that is a valid "no tokens remain" state.
#[inline]
pub fn filter(tokens: Vec<Token>, stopwords: &StopwordSet) -> Vec<Token> {
    stopwords.retain(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<Token> {
        words.iter().map(|w| Token::from(*w)).collect()
    }

    #[test]
    fn parse_trims_lowercases_and_dedups() {
        let set = StopwordSet::parse("The, the ,THE, a");
        assert_eq!(set.len(), 2);
        assert!(set.contains("the"));
        assert!(set.contains("a"));
        assert!(!set.contains("The"));
    }

    #[test]
    fn parse_blank_input_is_empty() {
        assert!(StopwordSet::parse("").is_empty());
        assert!(StopwordSet::parse("  ").is_empty());
        assert!(StopwordSet::parse(" , ,, ").is_empty());
    }

    #[test]
    fn parse_unicode() {
        let set = StopwordSet::parse("Über, 그리고");
        assert!(set.contains("über"));
        assert!(set.contains("그리고"));
    }

    #[test]
    fn filter_preserves_order() {
        let set = StopwordSet::parse("the");
        let out = filter(toks(&["the", "cat", "sat", "the", "cat", "ran"]), &set);
        assert_eq!(out, toks(&["cat", "sat", "cat", "ran"]));
    }

    #[test]
    fn filter_can_remove_everything() {
        let set = StopwordSet::parse("a, b");
        let out = filter(toks(&["a", "b", "a"]), &set);
        assert!(out.is_empty());
    }

    #[test]
    fn filter_is_idempotent() {
        let set = StopwordSet::parse("of, to");
        let once = filter(toks(&["way", "to", "go", "of", "it"]), &set);
        let twice = filter(once.clone(), &set);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_set_keeps_everything() {
        let input = toks(&["x", "y"]);
        assert_eq!(filter(input.clone(), &StopwordSet::empty()), input);
    }

    #[test]
    fn extend_adds_words() {
        let mut set = StopwordSet::parse("a");
        set.extend(["B", " c "]);
        assert_eq!(set.len(), 3);
        assert!(set.contains("b"));
        assert!(set.contains("c"));
    }
}
