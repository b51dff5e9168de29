//! Ranked views over a MatchLibrary.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::matcher::MatchLibrary;
use crate::error::{FuzzyMatchError, Result};
use crate::record::MatchRecord;

/// A path split around its matched span, for highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSegments<'a> {
    pub before: &'a str,
    pub matched: &'a str,
    pub after: &'a str,
}

/// Heap entry. Higher score wins; on equal scores the earlier slot wins.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    score: f64,
    slot: usize,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

/// Query operations.
impl MatchLibrary {
    /// Number of live records.
    pub fn n_matches(&self) -> usize {
        self.store
            .iter()
            .filter(|(_, _, record)| record.is_live())
            .count()
    }

    /// Number of tracked paths.
    pub fn n_files(&self) -> usize {
        self.store.len()
    }

    pub fn record(&self, path: &str) -> Result<&MatchRecord> {
        self.store
            .get(path)
            .ok_or_else(|| FuzzyMatchError::NotFound(path.to_string()))
    }

    pub fn score(&self, path: &str) -> Result<f64> {
        self.record(path).map(|record| record.score)
    }

    pub fn start(&self, path: &str) -> Result<usize> {
        self.record(path).map(|record| record.start)
    }

    pub fn end(&self, path: &str) -> Result<usize> {
        self.record(path).map(|record| record.end)
    }

    /// Up to `depth` paths ordered by descending score.
    ///
    /// With a search active only live records with a positive score qualify.
    /// With no search every live record qualifies and scores are ignored, so
    /// the result is first-seen order. Equal scores keep first-seen order.
    ///
    /// Selection keeps a min-heap of at most `depth` entries: O(n log depth).
    pub fn top_matches(&self, depth: usize) -> Vec<&str> {
        if depth == 0 {
            return Vec::new();
        }

        let searching = !self.search.is_empty();
        let mut heap: BinaryHeap<Reverse<Ranked>> = BinaryHeap::with_capacity(depth + 1);
        for (slot, _, record) in self.store.iter() {
            if !record.is_live() || (searching && record.score <= 0.0) {
                continue;
            }
            let ranked = Ranked {
                score: if searching { record.score } else { 0.0 },
                slot,
            };
            if heap.len() < depth {
                heap.push(Reverse(ranked));
            } else if heap.peek().is_some_and(|Reverse(lowest)| ranked > *lowest) {
                heap.pop();
                heap.push(Reverse(ranked));
            }
        }

        let mut ranked: Vec<Ranked> = heap.into_iter().map(|Reverse(entry)| entry).collect();
        ranked.sort_unstable_by(|a, b| b.cmp(a));
        ranked
            .into_iter()
            .map(|entry| self.store.path(entry.slot))
            .collect()
    }

    /// Splits `path` around its current match span.
    ///
    /// Paths that are not currently matching a non-empty search come back
    /// whole in `before`.
    pub fn highlight<'a>(&self, path: &'a str) -> Result<MatchSegments<'a>> {
        let record = self.record(path)?;
        let unmatched = MatchSegments {
            before: path,
            matched: "",
            after: "",
        };
        if self.search.is_empty() || !record.is_live() || record.score <= 0.0 {
            return Ok(unmatched);
        }

        let mut offsets = path.char_indices().map(|(offset, _)| offset);
        let Some(begin) = offsets.nth(record.start) else {
            return Ok(unmatched);
        };
        let finish = offsets
            .nth(record.end.saturating_sub(record.start))
            .unwrap_or(path.len());

        Ok(MatchSegments {
            before: &path[..begin],
            matched: &path[begin..finish],
            after: &path[finish..],
        })
    }
}
