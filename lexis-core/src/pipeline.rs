//! End-to-end analysis: tokenize, drop stopwords, count, filter rows, summarize.
//!
//! Every call takes its configuration and stopwords explicitly and keeps
//! no state between calls, so identical input always yields an identical
//! [`Analysis`].

use lexis_types::AnalysisConfig;
use serde::Serialize;
use tracing::debug;

use crate::analyzer::stopwords::StopwordSet;
use crate::analyzer::tokenizer::Tokenizer;
use crate::diversity::LexicalSummary;
use crate::frequency::{FrequencyCounter, FrequencyTable};

/// The stage at which an analysis ran out of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyStage {
    /// The text contained no tokens at all.
    Tokenizer,
    /// Every token was a stopword.
    Stopwords,
    /// `top_n`/`min_count` removed every row.
    TableFilter,
}

impl EmptyStage {
    /// Message suitable for showing to the user.
    pub const fn message(self) -> &'static str {
        match self {
            EmptyStage::Tokenizer => "No tokens found.",
            EmptyStage::Stopwords => "No tokens left after applying stop words.",
            EmptyStage::TableFilter => "No words meet the frequency filters.",
        }
    }
}

impl core::fmt::Display for EmptyStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Frequency table after stopword removal and row filters.
    pub table: FrequencyTable,
    /// Summary of `table`.
    pub summary: LexicalSummary,
    /// Tokens produced by the tokenizer.
    pub raw_tokens: usize,
    /// Tokens left after stopword removal.
    pub filtered_tokens: usize,
}

/// Outcome of [`Analyzer::analyze`].
///
/// Running out of tokens is a normal, reportable state rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Analysis {
    /// Nothing left to analyze.
    NoTokens(EmptyStage),
    /// Table and summary are available.
    Report(AnalysisReport),
}

impl Analysis {
    /// Returns the report, if any.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Analysis::Report(r) => Some(r),
            Analysis::NoTokens(_) => None,
        }
    }

    /// Consumes the outcome and returns the report, if any.
    pub fn into_report(self) -> Option<AnalysisReport> {
        match self {
            Analysis::Report(r) => Some(r),
            Analysis::NoTokens(_) => None,
        }
    }

    /// Returns `true` if there is no report.
    pub fn is_empty(&self) -> bool {
        matches!(self, Analysis::NoTokens(_))
    }
}

/// Runs the full pipeline with one configuration.
///
/// # Examples
///
/// ```
/// use lexis_core::analyzer::stopwords::StopwordSet;
/// use lexis_core::pipeline::Analyzer;
/// use lexis_types::AnalysisConfig;
///
/// let analyzer = Analyzer::new(AnalysisConfig::default());
/// let analysis = analyzer.analyze("The cat sat. The cat ran!", &StopwordSet::parse("the"));
///
/// let report = analysis.report().unwrap();
/// assert_eq!(report.table.len(), 3);
/// assert_eq!(report.summary.tokens, 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Analyzer {
    config: AnalysisConfig,
    tokenizer: Tokenizer,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    /// Creates an analyzer for `config`.
    pub const fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            tokenizer: Tokenizer::new(config.mode),
        }
    }

    /// Returns the configuration.
    #[inline(always)]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Builds the frequency table of `text` minus `stopwords`, before row filters.
    ///
    /// Returns the table together with the raw token count.
    pub fn count(&self, text: &str, stopwords: &StopwordSet) -> (FrequencyTable, usize) {
        let mut counter = FrequencyCounter::new();
        let mut raw = 0usize;

        self.tokenizer.tokenize(text, |token| {
            raw += 1;
            if !stopwords.contains(token) {
                counter.add(token);
            }
        });

        (counter.finish(), raw)
    }

    /// Analyzes `text`.
    #[tracing::instrument(skip_all, fields(len = text.len(), mode = %self.config.mode))]
    pub fn analyze(&self, text: &str, stopwords: &StopwordSet) -> Analysis {
        let (mut table, raw_tokens) = self.count(text, stopwords);

        if raw_tokens == 0 {
            debug!("no tokens in input");
            return Analysis::NoTokens(EmptyStage::Tokenizer);
        }

        let filtered_tokens = table.total();
        if filtered_tokens == 0 {
            debug!(raw_tokens, "stopwords removed every token");
            return Analysis::NoTokens(EmptyStage::Stopwords);
        }

        table.apply(&self.config.table_filter());

        let Some(summary) = LexicalSummary::from_table(&table) else {
            debug!(filtered_tokens, "row filters removed every word");
            return Analysis::NoTokens(EmptyStage::TableFilter);
        };

        debug!(
            raw_tokens,
            filtered_tokens,
            types = summary.types,
            "analysis complete"
        );

        Analysis::Report(AnalysisReport {
            table,
            summary,
            raw_tokens,
            filtered_tokens,
        })
    }
}
