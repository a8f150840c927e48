//! Core types for the Lexis text analysis pipeline.
//!
//! This crate provides the value types that are shared between
//! `lexis-core` and the command-line front end. Keeping them separate ensures:
//!
//! - **Plain values**: Every type here is produced fresh per analysis and never shared mutably
//! - **Cross-crate compatibility**: Core and CLI agree on one configuration and error vocabulary
//! - **Clean boundaries**: No circular dependencies between crates

#![warn(missing_docs)]

use core::borrow::Borrow;
use core::fmt;
use core::ops::Deref;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Occurrence count of a single token.
///
/// Classroom texts never get near `u32::MAX` occurrences of one word,
/// and the narrower type keeps frequency rows compact.
pub type Count = u32;

/// A normalized word unit extracted from text.
///
/// Tokens are immutable and carry no position information; only their
/// identity matters downstream. The tokenizer guarantees they are lowercase,
/// this type does not re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(Box<str>);

impl Token {
    /// Wraps an already-normalized string.
    #[inline]
    pub fn new(text: impl Into<Box<str>>) -> Self {
        Self(text.into())
    }

    /// Returns the token text.
    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Token {
    type Target = str;

    #[inline(always)]
    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Token {
    #[inline(always)]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which characters make up a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenMode {
    /// Maximal runs of Unicode word characters (letters, digits, underscore).
    ///
    /// Used for word counts and the general frequency tool.
    #[default]
    WordChars,
    /// Runs of letters, optionally joined by one internal apostrophe
    /// (`don't`, `teacher's`).
    ///
    /// Used for lexical diversity, where contractions count as one token.
    AlphabeticWithApostrophe,
}

impl TokenMode {
    /// Short name used on the command line and in config files.
    pub const fn name(self) -> &'static str {
        match self {
            TokenMode::WordChars => "word_chars",
            TokenMode::AlphabeticWithApostrophe => "alphabetic_with_apostrophe",
        }
    }
}

impl fmt::Display for TokenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "word" | "words" | "word_chars" => Ok(TokenMode::WordChars),
            "alpha" | "alphabetic" | "alphabetic_with_apostrophe" => {
                Ok(TokenMode::AlphabeticWithApostrophe)
            }
            _ => Err(ConfigError::UnknownMode(s.to_owned())),
        }
    }
}

/// One row of a frequency table.
///
/// Entries are ordered the way a frequency table lists them: the entry that
/// comes first in the table compares as `Less`. That is count descending,
/// then word ascending, which makes the order total and independent of
/// hash iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// The token.
    pub word: Token,
    /// How many times it occurred. Always positive.
    pub count: Count,
}

impl FrequencyEntry {
    /// Creates a new entry.
    #[inline]
    pub fn new(word: impl Into<Token>, count: Count) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl PartialOrd for FrequencyEntry {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrequencyEntry {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Primary: count, reversed so that higher counts sort first
        // Secondary: word, alphabetical
        match other.count.cmp(&self.count) {
            core::cmp::Ordering::Equal => self.word.cmp(&other.word),
            ord => ord,
        }
    }
}

impl fmt::Display for FrequencyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.word, self.count)
    }
}

/// Order in which the two post-aggregation filters run.
///
/// Both orders are in use: the word frequency tab truncates to the top N
/// rows and then drops rare words, while diversity tooling drops rare words
/// before truncating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOrder {
    /// Drop rows below `min_count`, then keep the first `top_n` survivors.
    #[default]
    MinCountFirst,
    /// Keep the first `top_n` rows, then drop those below `min_count`.
    TopNFirst,
}

impl FilterOrder {
    /// Short name used on the command line and in config files.
    pub const fn name(self) -> &'static str {
        match self {
            FilterOrder::MinCountFirst => "min_count_first",
            FilterOrder::TopNFirst => "top_n_first",
        }
    }
}

impl fmt::Display for FilterOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "min_count_first" | "min_count" => Ok(FilterOrder::MinCountFirst),
            "top_n_first" | "top_n" => Ok(FilterOrder::TopNFirst),
            _ => Err(ConfigError::UnknownFilterOrder(s.to_owned())),
        }
    }
}

/// Post-aggregation row filters for a frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilter {
    /// Keep at most this many rows. `0` means unlimited.
    pub top_n: usize,
    /// Drop rows whose count is below this. `0` and `1` keep everything.
    pub min_count: Count,
    /// Which filter runs first.
    pub order: FilterOrder,
}

impl Default for TableFilter {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl TableFilter {
    /// A filter that keeps every row.
    pub const fn unlimited() -> Self {
        Self {
            top_n: 0,
            min_count: 1,
            order: FilterOrder::MinCountFirst,
        }
    }

    /// Returns `true` if applying this filter can never remove a row.
    pub const fn is_noop(&self) -> bool {
        self.top_n == 0 && self.min_count <= 1
    }
}

/// Analysis configuration, passed explicitly to every pipeline call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Tokenizer mode.
    pub mode: TokenMode,
    /// Keep at most this many table rows. `0` means unlimited.
    pub top_n: usize,
    /// Minimum count for a row to be kept.
    pub min_count: Count,
    /// Order in which `top_n` and `min_count` are applied.
    pub order: FilterOrder,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: TokenMode::WordChars,
            top_n: 0,
            min_count: 1,
            order: FilterOrder::MinCountFirst,
        }
    }
}

impl AnalysisConfig {
    /// Largest `top_n` the word frequency tool accepts.
    pub const MAX_TOP_N: usize = 5000;

    /// Defaults of the word frequency tool: top 200 rows, truncated before
    /// the minimum-count filter.
    pub const fn word_frequency() -> Self {
        Self {
            mode: TokenMode::WordChars,
            top_n: 200,
            min_count: 1,
            order: FilterOrder::TopNFirst,
        }
    }

    /// Defaults for lexical diversity: contraction-aware tokens, no truncation.
    pub const fn lexical_diversity() -> Self {
        Self {
            mode: TokenMode::AlphabeticWithApostrophe,
            top_n: 0,
            min_count: 1,
            order: FilterOrder::MinCountFirst,
        }
    }

    /// Returns the table filter part of this configuration.
    #[inline]
    pub const fn table_filter(&self) -> TableFilter {
        TableFilter {
            top_n: self.top_n,
            min_count: self.min_count,
            order: self.order,
        }
    }

    /// Checks the numeric bounds of the word frequency tool.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::OutOfRange` if `top_n` exceeds
    /// [`AnalysisConfig::MAX_TOP_N`] or `min_count` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n > Self::MAX_TOP_N {
            return Err(ConfigError::OutOfRange {
                field: "top_n",
                value: self.top_n as u64,
                min: 0,
                max: Self::MAX_TOP_N as u64,
            });
        }
        if self.min_count == 0 {
            return Err(ConfigError::OutOfRange {
                field: "min_count",
                value: 0,
                min: 1,
                max: Count::MAX as u64,
            });
        }
        Ok(())
    }
}

/// Errors raised while interpreting caller-supplied configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Tokenizer mode name not recognised.
    #[error("unknown tokenizer mode `{0}` (expected `word_chars` or `alphabetic_with_apostrophe`)")]
    UnknownMode(String),
    /// Filter order name not recognised.
    #[error("unknown filter order `{0}` (expected `min_count_first` or `top_n_first`)")]
    UnknownFilterOrder(String),
    /// A group request such as `3x4` could not be parsed.
    #[error("invalid group spec `{0}` (expected SIZExCOUNT, e.g. `3x2`)")]
    InvalidGroupSpec(String),
    /// A numeric parameter is outside its accepted range.
    #[error("{field} = {value} is out of range ({min}..={max})")]
    OutOfRange {
        /// Parameter name.
        field: &'static str,
        /// Rejected value.
        value: u64,
        /// Smallest accepted value.
        min: u64,
        /// Largest accepted value.
        max: u64,
    },
}

/// Errors raised while reading a roster or forming groups from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Required header columns are absent and positional fallback was refused.
    #[error("roster is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),
    /// The requested course has no members in the roster.
    #[error("course `{0}` not found in roster")]
    UnknownCourse(String),
    /// The group plan needs more members than the course has.
    #[error("not enough members: requested {requested}, available {available}")]
    NotEnoughMembers {
        /// Members needed by the plan.
        requested: usize,
        /// Members available.
        available: usize,
    },
    /// The roster source could not be parsed.
    #[error("malformed roster: {0}")]
    Malformed(String),
}
