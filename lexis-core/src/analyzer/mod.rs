//! Text analysis front half.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Case folding and line-break removal
//! - **Tokenizer**: Splits raw text into lowercase word tokens
//! - **Counts**: Word and sentence totals
//! - **Stopwords**: Caller-supplied exclusion sets

pub mod counts;
pub mod normalizer;
pub mod stopwords;
pub mod tokenizer;

pub use counts::{count_sentences, count_words, TextCounts};
pub use normalizer::{remove_line_breaks, TextNormalizer};
pub use stopwords::{filter, StopwordSet};
pub use tokenizer::{tokenize, Tokenizer};
