//! Per-path match state.

/// Match state for one candidate path.
///
/// `start` and `end` are char offsets of the first and last matched character
/// of the best occurrence (`end` is inclusive). `round_ejected` is zero while
/// the path is live, otherwise the search length at which it last failed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchRecord {
    pub start: usize,
    pub end: usize,
    pub score: f64,
    pub round_ejected: usize,
}

impl MatchRecord {
    #[inline]
    pub fn is_live(&self) -> bool {
        self.round_ejected == 0
    }

    /// Applies a partial update. Fields left as `None` keep their value.
    pub fn apply(&mut self, update: RecordUpdate) {
        if let Some(start) = update.start {
            self.start = start;
        }
        if let Some(end) = update.end {
            self.end = end;
        }
        if let Some(score) = update.score {
            self.score = score;
        }
        if let Some(round) = update.round_ejected {
            self.round_ejected = round;
        }
    }
}

/// A partial update to a [`MatchRecord`], produced by scorers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordUpdate {
    pub start: Option<usize>,
    pub end: Option<usize>,
    pub score: Option<f64>,
    pub round_ejected: Option<usize>,
}

impl RecordUpdate {
    /// A full match result: span, score, and live status.
    pub fn matched(start: usize, end: usize, score: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            score: Some(score),
            round_ejected: Some(0),
        }
    }

    /// A full no-match result for the given round.
    pub fn ejected(round: usize) -> Self {
        Self {
            start: Some(0),
            end: Some(0),
            score: Some(0.0),
            round_ejected: Some(round),
        }
    }

    /// Updates the span and score, leaving the ejection marker alone.
    pub fn span(start: usize, end: usize, score: f64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            score: Some(score),
            round_ejected: None,
        }
    }

    /// Only marks the record as ejected at `round`.
    pub fn eject_only(round: usize) -> Self {
        Self {
            round_ejected: Some(round),
            ..Self::default()
        }
    }

    /// Returns whether applying this update leaves the record ejected.
    pub fn ejects(&self) -> bool {
        matches!(self.round_ejected, Some(round) if round > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_record_is_live_with_zero_score() {
        let record = MatchRecord::default();
        assert!(record.is_live());
        assert_eq!(record.score, 0.0);
        assert_eq!((record.start, record.end), (0, 0));
    }

    #[test]
    fn partial_update_keeps_unspecified_fields() {
        let mut record = MatchRecord {
            start: 4,
            end: 9,
            score: 0.25,
            round_ejected: 0,
        };
        record.apply(RecordUpdate::eject_only(3));
        assert_eq!(record.round_ejected, 3);
        assert_eq!((record.start, record.end), (4, 9));
        assert_eq!(record.score, 0.25);
    }

    #[test]
    fn span_update_does_not_touch_ejection() {
        let mut record = MatchRecord {
            round_ejected: 2,
            ..MatchRecord::default()
        };
        record.apply(RecordUpdate::span(1, 1, 1.0));
        assert_eq!(record.round_ejected, 2);
        assert_eq!(record.score, 1.0);
    }

    #[test]
    fn ejected_update_resets_span_and_score() {
        let mut record = MatchRecord {
            start: 2,
            end: 5,
            score: 0.5,
            round_ejected: 0,
        };
        let update = RecordUpdate::ejected(4);
        assert!(update.ejects());
        record.apply(update);
        assert_eq!(
            record,
            MatchRecord {
                start: 0,
                end: 0,
                score: 0.0,
                round_ejected: 4
            }
        );
    }

    #[test]
    fn matched_update_revives_record() {
        let mut record = MatchRecord {
            round_ejected: 5,
            ..MatchRecord::default()
        };
        let update = RecordUpdate::matched(0, 2, 0.1);
        assert!(!update.ejects());
        record.apply(update);
        assert!(record.is_live());
    }
}
