//! Count aggregates.
//!
//! Every analysis reduces partitions into one of three shapes built here:
//! a flat key count, a per-anchor collocate count, or a tag transition
//! matrix. All three merge pointwise, so partial results from workers can be
//! folded in any completion order without changing the outcome.
use std::collections::HashMap;

use crate::tag::{vocab_tag, POS_TAGS};

/// Pseudo-key tracking raw anchor occurrences in a collocate table.
/// Uppercase on purpose: normalized corpus text is lowercased, so no real
/// phrase can collide with it.
pub const TOTAL_KEY: &str = "TOTAL";

/// Occurrence counts keyed by phrase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: HashMap<String, u64>,
}

impl CountTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum over every key, the denominator for relative frequencies.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Pointwise addition. Commutative and associative, with the empty
    /// table as identity.
    pub fn merge(mut self, other: CountTable) -> CountTable {
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
        self
    }

    /// Drops every key whose count is at or below `threshold`.
    pub fn retain_above(&mut self, threshold: u64) {
        self.counts.retain(|_, count| *count > threshold);
    }

    /// Keys by descending count. Ties break on the key itself so the
    /// ordering is stable across runs.
    pub fn most_common(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Like [`most_common`](Self::most_common) but skipping one key, used to
    /// keep [`TOTAL_KEY`] out of collocate rankings.
    pub fn most_common_excluding(&self, excluded: &str, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .filter(|(key, _)| key.as_str() != excluded)
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(key, count)| (key.as_str(), *count))
    }
}

impl FromIterator<(String, u64)> for CountTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        CountTable {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Per-anchor phrase counts. Anchors are seeded up front so an anchor that
/// never occurs still yields a (zero) report row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollocateTable {
    tables: HashMap<String, CountTable>,
}

impl CollocateTable {
    pub fn with_anchors<'a, I>(anchors: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        CollocateTable {
            tables: anchors
                .into_iter()
                .map(|anchor| (anchor.to_string(), CountTable::new()))
                .collect(),
        }
    }

    pub fn increment(&mut self, anchor: &str, phrase: &str) {
        match self.tables.get_mut(anchor) {
            Some(table) => table.increment(phrase),
            None => {
                let mut table = CountTable::new();
                table.increment(phrase);
                self.tables.insert(anchor.to_string(), table);
            }
        }
    }

    pub fn get(&self, anchor: &str) -> Option<&CountTable> {
        self.tables.get(anchor)
    }

    pub fn merge(mut self, other: CollocateTable) -> CollocateTable {
        for (anchor, table) in other.tables {
            let merged = match self.tables.remove(&anchor) {
                Some(existing) => existing.merge(table),
                None => table,
            };
            self.tables.insert(anchor, merged);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Square tag transition counts over the fixed vocabulary.
///
/// Pairs where either side falls outside the vocabulary are dropped, so row
/// totals only ever cover real columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionMatrix {
    rows: HashMap<&'static str, CountTable>,
}

impl Default for TransitionMatrix {
    fn default() -> Self {
        TransitionMatrix {
            rows: POS_TAGS
                .iter()
                .map(|tag| (*tag, CountTable::new()))
                .collect(),
        }
    }
}

impl TransitionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, first: &str, second: &str) {
        let first = match vocab_tag(first) {
            Some(tag) => tag,
            None => return,
        };
        let second = match vocab_tag(second) {
            Some(tag) => tag,
            None => return,
        };
        if let Some(row) = self.rows.get_mut(first) {
            row.increment(second);
        }
    }

    pub fn row(&self, tag: &str) -> Option<&CountTable> {
        self.rows.get(tag)
    }

    pub fn merge(mut self, other: TransitionMatrix) -> TransitionMatrix {
        for (tag, row) in other.rows {
            let merged = match self.rows.remove(tag) {
                Some(existing) => existing.merge(row),
                None => row,
            };
            self.rows.insert(tag, merged);
        }
        self
    }

    /// One row of transition probabilities in [`POS_TAGS`] column order.
    /// The denominator is clamped to 1 so unseen rows come out as zeros.
    pub fn probabilities(&self, tag: &str) -> Vec<f64> {
        let row = match self.rows.get(tag) {
            Some(row) => row,
            None => return vec![0.0; POS_TAGS.len()],
        };
        let total = row.total().max(1) as f64;
        POS_TAGS
            .iter()
            .map(|second| row.get(second) as f64 / total)
            .collect()
    }
}
