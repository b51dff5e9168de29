//! Tuning knobs for the match library.

use serde::{Deserialize, Serialize};

/// Candidate count at which scoring moves onto the worker pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Live candidate count at or above which a round is scored on the pool.
    pub parallel_threshold: usize,
    /// Worker count. `None` uses the available hardware parallelism.
    pub worker_threads: Option<usize>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            worker_threads: None,
        }
    }
}

impl MatchConfig {
    /// Resolves the worker count, never returning less than one.
    pub fn resolved_worker_threads(&self) -> usize {
        self.worker_threads
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|count| count.get())
                    .unwrap_or(1)
            })
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_worker_count_is_kept() {
        let config = MatchConfig {
            worker_threads: Some(3),
            ..MatchConfig::default()
        };
        assert_eq!(config.resolved_worker_threads(), 3);
    }

    #[test]
    fn zero_workers_clamps_to_one() {
        let config = MatchConfig {
            worker_threads: Some(0),
            ..MatchConfig::default()
        };
        assert_eq!(config.resolved_worker_threads(), 1);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: MatchConfig = serde_json::from_str(r#"{"worker_threads": 2}"#).unwrap();
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
        assert_eq!(config.worker_threads, Some(2));
    }
}
