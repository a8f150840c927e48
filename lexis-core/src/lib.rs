//! Word frequency and lexical diversity analysis for classroom texts.
//!
//! The pipeline has three composable stages, each a pure function over text:
//!
//! ```text
//! raw text ─► Tokenizer ─► StopwordSet ─► FrequencyTable ─► LexicalSummary
//! ```
//!
//! Each stage is usable on its own ([`analyzer::tokenize`], [`analyzer::filter`],
//! [`frequency::aggregate`], [`diversity::lexical_summary`]), and
//! [`pipeline::Analyzer`] runs them end to end without materializing the
//! token sequence.
//!
//! Alongside the pipeline sit the small text tools it grew out of: word and
//! sentence counting, line-break removal, and roster grouping.
//!
//! # Example
//!
//! ```
//! use lexis_core::prelude::*;
//!
//! let tokens = tokenize("The cat sat. The cat ran!", TokenMode::WordChars);
//! let tokens = filter(tokens, &StopwordSet::parse("the"));
//! let table = aggregate(&tokens);
//!
//! let rows: Vec<_> = table.iter().map(|e| (e.word.as_str(), e.count)).collect();
//! assert_eq!(rows, [("cat", 2), ("ran", 1), ("sat", 1)]);
//!
//! let summary = lexical_summary(&table).unwrap();
//! assert_eq!((summary.tokens, summary.types), (4, 3));
//! ```

pub mod analyzer;
pub mod diversity;
pub mod export;
pub mod frequency;
pub mod pipeline;
pub mod roster;

pub use lexis_types as types;

/// Commonly used items.
pub mod prelude {
    pub use crate::analyzer::{
        count_sentences, count_words, filter, remove_line_breaks, tokenize, StopwordSet,
        TextCounts, Tokenizer,
    };
    pub use crate::diversity::{lexical_summary, LexicalSummary};
    pub use crate::frequency::{aggregate, FrequencyTable};
    pub use crate::pipeline::{Analysis, AnalysisReport, Analyzer, EmptyStage};
    pub use lexis_types::{
        AnalysisConfig, Count, FilterOrder, FrequencyEntry, TableFilter, Token, TokenMode,
    };
}
