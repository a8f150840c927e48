//! Frequency aggregation.
//!
//! Counts token occurrences and materializes them as a [`FrequencyTable`]:
//! rows sorted by count descending, ties broken alphabetically. The order is
//! total, so identical input always yields an identical table regardless of
//! hash iteration order.
//!
//! Post-aggregation filters (`top_n`, `min_count`) live in [`filter`].

mod filter;

use lexis_types::{Count, FrequencyEntry};
use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::warn;

/// Incremental token counter.
///
/// Feed tokens one at a time with [`FrequencyCounter::add`], then call
/// [`FrequencyCounter::finish`] to get the sorted table. Lets the pipeline
/// count straight out of the streaming tokenizer without materializing tokens.
#[derive(Debug, Default, Clone)]
pub struct FrequencyCounter {
    counts: FxHashMap<Box<str>, Count>,
    total: usize,
}

impl FrequencyCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `token`.
    ///
    /// An occurrence that would overflow its [`Count`] is dropped with a
    /// warning, so `total` always equals the sum of the counts.
    #[inline]
    pub fn add(&mut self, token: &str) {
        // Look up first so repeated tokens never allocate.
        if let Some(count) = self.counts.get_mut(token) {
            let Some(next) = count.checked_add(1) else {
                warn!(token, "frequency count overflow; occurrence dropped");
                return;
            };
            *count = next;
        } else {
            self.counts.insert(token.into(), 1);
        }
        self.total += 1;
    }

    /// Number of tokens recorded so far.
    #[inline(always)]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens recorded so far.
    #[inline(always)]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Consumes the counter and returns the sorted table.
    pub fn finish(self) -> FrequencyTable {
        let mut entries: Vec<FrequencyEntry> = self
            .counts
            .into_iter()
            .map(|(word, count)| FrequencyEntry::new(word.into_string(), count))
            .collect();

        // Words are unique, so the order is total and an unstable sort is deterministic.
        entries.sort_unstable();

        FrequencyTable { entries }
    }
}

/// Token frequencies, sorted by count descending then word ascending.
///
/// Invariants: every word appears once, every count is positive, and
/// the counts sum to the number of tokens aggregated (before any row filter).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
}

impl FrequencyTable {
    /// Counts `tokens` and returns the sorted table.
    ///
    /// ```
    /// use lexis_core::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::from_tokens(["the", "cat", "sat", "the", "cat", "ran"]);
    /// let rows: Vec<_> = table.iter().map(|e| (e.word.as_str(), e.count)).collect();
    /// assert_eq!(rows, [("cat", 2), ("the", 2), ("ran", 1), ("sat", 1)]);
    /// ```
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counter = FrequencyCounter::new();
        for t in tokens {
            counter.add(t.as_ref());
        }
        counter.finish()
    }

    /// Returns the rows in table order.
    #[inline(always)]
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// Iterates over the rows in table order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, FrequencyEntry> {
        self.entries.iter()
    }

    /// Consumes the table and returns its rows.
    pub fn into_entries(self) -> Vec<FrequencyEntry> {
        self.entries
    }

    /// Number of distinct words (V).
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no rows.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct words (V). Alias of [`FrequencyTable::len`].
    #[inline(always)]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all counts (N).
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count as usize).sum()
    }

    /// The first `k` rows, as consumed by a bar chart. `k = 0` means all rows.
    pub fn top(&self, k: usize) -> &[FrequencyEntry] {
        if k == 0 {
            &self.entries
        } else {
            &self.entries[..k.min(self.entries.len())]
        }
    }

    /// Looks up the count of `word`.
    pub fn get(&self, word: &str) -> Option<Count> {
        self.entries
            .iter()
            .find(|e| e.word.as_str() == word)
            .map(|e| e.count)
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a FrequencyEntry;
    type IntoIter = core::slice::Iter<'a, FrequencyEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl core::fmt::Display for FrequencyTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|e| e.word.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        writeln!(f, "{:<width$}  count", "word")?;
        for e in &self.entries {
            writeln!(f, "{:<width$}  {}", e.word.as_str(), e.count)?;
        }
        Ok(())
    }
}

/// Counts occurrences per distinct token and sorts them into a table.
#[tracing::instrument(level = "trace", skip_all, fields(tokens = tokens.len()))]
pub fn aggregate<S: AsRef<str>>(tokens: &[S]) -> FrequencyTable {
    FrequencyTable::from_tokens(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(table: &FrequencyTable) -> Vec<(&str, Count)> {
        table.iter().map(|e| (e.word.as_str(), e.count)).collect()
    }

    #[test]
    fn ties_broken_alphabetically() {
        let table = aggregate(&["the", "cat", "sat", "the", "cat", "ran"]);
        assert_eq!(rows(&table), [("cat", 2), ("the", 2), ("ran", 1), ("sat", 1)]);
    }

    #[test]
    fn overflowing_occurrence_is_dropped() {
        let mut counter = FrequencyCounter::new();
        counter.add("x");
        counter.counts.insert("x".into(), Count::MAX);
        counter.total = Count::MAX as usize;

        counter.add("x");
        counter.add("y");
        assert_eq!(counter.total(), Count::MAX as usize + 1);

        let table = counter.finish();
        assert_eq!(table.get("x"), Some(Count::MAX));
        assert_eq!(table.get("y"), Some(1));
        assert_eq!(table.total(), Count::MAX as usize + 1);
    }

    #[test]
    fn counts_sum_to_token_count() {
        let tokens = ["a", "b", "a", "c", "a", "b"];
        let table = aggregate(&tokens);
        assert_eq!(table.total(), tokens.len());
        assert_eq!(table.distinct(), 3);
    }

    #[test]
    fn adjacent_rows_respect_order() {
        let tokens: Vec<String> = "z y x z y z w w w w v"
            .split(' ')
            .map(str::to_owned)
            .collect();
        let table = aggregate(&tokens);

        for pair in table.entries().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.count > b.count || (a.count == b.count && a.word <= b.word));
        }
    }

    #[test]
    fn empty_tokens_give_empty_table() {
        let table = aggregate::<&str>(&[]);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn counter_tracks_totals() {
        let mut c = FrequencyCounter::new();
        for t in ["x", "y", "x"] {
            c.add(t);
        }
        assert_eq!(c.total(), 3);
        assert_eq!(c.distinct(), 2);

        let table = c.finish();
        assert_eq!(table.get("x"), Some(2));
        assert_eq!(table.get("missing"), None);
    }

    #[test]
    fn deterministic_across_runs() {
        let tokens: Vec<String> = (0..500).map(|i| format!("w{}", i % 37)).collect();
        let first = aggregate(&tokens);
        for _ in 0..5 {
            assert_eq!(aggregate(&tokens), first);
        }
    }

    #[test]
    fn top_slices() {
        let table = aggregate(&["a", "a", "b", "c"]);
        assert_eq!(table.top(1).len(), 1);
        assert_eq!(table.top(0).len(), 3);
        assert_eq!(table.top(10).len(), 3);
        assert_eq!(table.top(1)[0].word, "a");
    }

    #[test]
    fn display_lists_rows() {
        let table = aggregate(&["b", "a", "a"]);
        let text = table.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines, ["word  count", "a     2", "b     1"]);
    }
}
