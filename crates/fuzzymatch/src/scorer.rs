//! Subsequence scoring of a single path against a search pattern.
//!
//! A search of two or more characters matches a path when its characters
//! appear in order, case-insensitively, with arbitrary gaps. Among all such
//! occurrences the one starting latest in the path wins, scored as
//! `1 / (len(path) - start)`, which favours matches near the basename.
//!
//! The scan is an explicit two-pass greedy walk rather than a regex, so the
//! search text is always literal and the cost is linear in the path length.

use crate::record::RecordUpdate;

/// A compiled search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    folded: Vec<char>,
}

impl SearchPattern {
    pub fn new(search: &str) -> Self {
        Self {
            folded: search.chars().map(fold_char).collect(),
        }
    }

    /// The round this pattern belongs to: its length in chars.
    #[inline]
    pub fn round(&self) -> usize {
        self.folded.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.folded.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.folded
    }

    /// Length of the shared prefix of two patterns, in chars.
    pub fn common_prefix_len(&self, other: &SearchPattern) -> usize {
        self.folded
            .iter()
            .zip(other.folded.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

/// Scores one path for one round.
///
/// Implementations must be pure: the same path and pattern always produce the
/// same update. They run on pool workers and never see the library.
pub trait PathScorer: Send + Sync {
    fn score(&self, path: &str, pattern: &SearchPattern) -> RecordUpdate;
}

/// Default scorer: latest-starting ordered subsequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubsequenceScorer;

impl PathScorer for SubsequenceScorer {
    fn score(&self, path: &str, pattern: &SearchPattern) -> RecordUpdate {
        match best_occurrence(path, pattern.chars()) {
            Some(occurrence) => {
                RecordUpdate::matched(occurrence.start, occurrence.end, occurrence.score)
            }
            None => RecordUpdate::ejected(pattern.round()),
        }
    }
}

/// Single-character fast path: plain substring lookup.
///
/// A hit sets the span to the first occurrence with score 1.0; a miss only
/// marks the record ejected at round one.
pub fn score_single_char(path: &str, needle: char) -> RecordUpdate {
    match path.chars().position(|c| fold_char(c) == needle) {
        Some(index) => RecordUpdate::span(index, index, 1.0),
        None => RecordUpdate::eject_only(1),
    }
}

/// The chosen occurrence of a pattern inside a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
    pub score: f64,
}

/// Finds the best occurrence of `pattern` (already folded) in `path`.
///
/// The latest feasible start is found by matching the pattern backwards from
/// the end of the path. From that start, a forward greedy walk yields the
/// earliest end, so the span is the tightest one for that start.
pub fn best_occurrence(path: &str, pattern: &[char]) -> Option<Occurrence> {
    let (&first, _) = pattern.split_first()?;
    let len = path.chars().count();
    if pattern.len() > len {
        return None;
    }

    let mut remaining = pattern.len();
    let mut start = None;
    for (index, c) in path.chars().rev().enumerate() {
        if fold_char(c) == pattern[remaining - 1] {
            remaining -= 1;
            if remaining == 0 {
                start = Some(len - 1 - index);
                break;
            }
        }
    }
    let start = start?;
    debug_assert_eq!(path.chars().nth(start).map(fold_char), Some(first));

    let mut matched = 0;
    let mut end = start;
    for (offset, c) in path.chars().skip(start).enumerate() {
        if fold_char(c) == pattern[matched] {
            matched += 1;
            if matched == pattern.len() {
                end = start + offset;
                break;
            }
        }
    }

    Some(Occurrence {
        start,
        end,
        score: 1.0 / (len - start) as f64,
    })
}

/// Case folding used for every comparison. Multi-char lowercase expansions
/// keep only their first char, so offsets stay aligned with the original path.
#[inline]
pub fn fold_char(c: char) -> char {
    if c.is_ascii() {
        c.to_ascii_lowercase()
    } else {
        c.to_lowercase().next().unwrap_or(c)
    }
}
