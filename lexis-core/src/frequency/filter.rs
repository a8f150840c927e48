//! Row filters applied after aggregation.

use lexis_types::{Count, FilterOrder, TableFilter};

use super::FrequencyTable;

impl FrequencyTable {
    /// Keeps only the first `n` rows. `n = 0` keeps everything.
    pub fn truncate_top(&mut self, n: usize) {
        if n != 0 {
            self.entries.truncate(n);
        }
    }

    /// Drops rows whose count is below `min_count`.
    pub fn retain_min_count(&mut self, min_count: Count) {
        if min_count > 1 {
            self.entries.retain(|e| e.count >= min_count);
        }
    }

    /// Applies both filters in the order `filter.order` names.
    pub fn apply(&mut self, filter: &TableFilter) {
        match filter.order {
            FilterOrder::MinCountFirst => {
                self.retain_min_count(filter.min_count);
                self.truncate_top(filter.top_n);
            }
            FilterOrder::TopNFirst => {
                self.truncate_top(filter.top_n);
                self.retain_min_count(filter.min_count);
            }
        }
    }

    /// Returns a filtered copy of this table.
    ///
    /// ```
    /// use lexis_core::frequency::FrequencyTable;
    /// use lexis_types::{FilterOrder, TableFilter};
    ///
    /// let table = FrequencyTable::from_tokens("a a a a a b b b c c d".split(' '));
    /// let kept = table.filtered(&TableFilter {
    ///     top_n: 2,
    ///     min_count: 2,
    ///     order: FilterOrder::MinCountFirst,
    /// });
    /// assert_eq!(kept.len(), 2);
    /// assert_eq!(kept.entries()[1].word, "b");
    /// ```
    #[must_use]
    pub fn filtered(&self, filter: &TableFilter) -> FrequencyTable {
        let mut out = self.clone();
        out.apply(filter);
        out
    }
}
