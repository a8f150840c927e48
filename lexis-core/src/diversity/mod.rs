//! Lexical diversity statistics.
//!
//! All ratios are derived from one frequency table, using its token count
//! N (sum of counts) and type count V (number of rows):
//!
//! | Metric              | Formula          |
//! |---------------------|------------------|
//! | TTR                 | V / N            |
//! | Root TTR (Guiraud)  | V / √N           |
//! | CTTR                | V / √(2N)        |
//! | Log TTR             | log V / log N    |
//!
//! The table passed in is whatever the caller filtered; N and V are never
//! mixed with pre-filter counts.

use serde::Serialize;

use crate::frequency::FrequencyTable;

/// Display labels, in row order.
pub const LABELS: [&str; 6] = [
    "Tokens (N)",
    "Types (V)",
    "TTR = V/N",
    "Root TTR (Guiraud) = V/√N",
    "CTTR = V/√(2N)",
    "Log TTR = log(V)/log(N)",
];

/// Summary statistics for one frequency table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LexicalSummary {
    /// Token count N.
    pub tokens: usize,
    /// Type count V.
    pub types: usize,
    /// V / N.
    pub ttr: f64,
    /// V / √N.
    pub root_ttr: f64,
    /// V / √(2N).
    pub cttr: f64,
    /// log V / log N; `None` unless both V > 1 and N > 1.
    pub log_ttr: Option<f64>,
}

impl LexicalSummary {
    /// Computes the summary of `table`.
    ///
    /// Returns `None` when the table is empty (N = 0): there is nothing to
    /// divide by, and the caller should show a "no data" state instead.
    pub fn from_table(table: &FrequencyTable) -> Option<Self> {
        Self::from_counts(table.total(), table.distinct())
    }

    /// Computes the summary from raw N and V.
    ///
    /// Returns `None` when `tokens` is zero.
    pub fn from_counts(tokens: usize, types: usize) -> Option<Self> {
        if tokens == 0 {
            return None;
        }
        debug_assert!(types <= tokens, "more types than tokens: V={types} N={tokens}");

        let n = tokens as f64;
        let v = types as f64;

        let log_ttr = (types > 1 && tokens > 1).then(|| v.ln() / n.ln());

        Some(Self {
            tokens,
            types,
            ttr: v / n,
            root_ttr: v / n.sqrt(),
            cttr: v / (2.0 * n).sqrt(),
            log_ttr,
        })
    }

    /// Returns the six metrics as label/value rows for display or export.
    ///
    /// Counts are shown as integers, ratios rounded to four decimals, and an
    /// undefined Log TTR as an empty string.
    pub fn rows(&self) -> [SummaryRow; 6] {
        let values = [
            self.tokens.to_string(),
            self.types.to_string(),
            format_ratio(Some(self.ttr)),
            format_ratio(Some(self.root_ttr)),
            format_ratio(Some(self.cttr)),
            format_ratio(self.log_ttr),
        ];

        let mut i = 0;
        values.map(|value| {
            let row = SummaryRow {
                label: LABELS[i],
                value,
            };
            i += 1;
            row
        })
    }
}

impl core::fmt::Display for LexicalSummary {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for row in self.rows() {
            writeln!(f, "{:<26}{}", row.label, row.value)?;
        }
        Ok(())
    }
}

/// One label/value pair of a [`LexicalSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// Metric label, e.g. `"TTR = V/N"`.
    pub label: &'static str,
    /// Display value; empty when undefined.
    pub value: String,
}

fn format_ratio(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.4}"),
        _ => String::new(),
    }
}

/// Computes the lexical summary of a frequency table, or `None` if it is empty.
#[inline]
pub fn lexical_summary(table: &FrequencyTable) -> Option<LexicalSummary> {
    LexicalSummary::from_table(table)
}
