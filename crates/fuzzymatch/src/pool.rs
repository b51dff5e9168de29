//! Worker pool for scoring large candidate sets.
//!
//! The pool is an explicitly owned resource: [`ScorePool::start`] spawns the
//! workers once and [`ScorePool::shutdown`] (or drop) releases them. Libraries
//! may share one pool through an `Arc`.
//!
//! Workers only compute [`RecordUpdate`] values for the candidates they are
//! handed; they never touch library records and never observe cancellation.
//! Merging happens on the calling thread after the whole batch has joined.

use std::time::Instant;

use parking_lot::Mutex;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{FuzzyMatchError, Result};
use crate::record::RecordUpdate;
use crate::scorer::{PathScorer, SearchPattern};

/// A scoring job: the slot the candidate came from and its path.
pub type ScoreJob<'a> = (usize, &'a str);

/// Fixed-size scoring pool.
pub struct ScorePool {
    pool: Mutex<Option<ThreadPool>>,
    threads: usize,
}

impl std::fmt::Debug for ScorePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorePool")
            .field("threads", &self.threads)
            .field("running", &self.is_running())
            .finish()
    }
}

impl ScorePool {
    /// Spawns a pool with `threads` workers (at least one).
    pub fn start(threads: usize) -> Result<Self> {
        let threads = threads.max(1);
        let started = Instant::now();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("fuzzymatch-score-{index}"))
            .build()
            .map_err(|error| FuzzyMatchError::WorkerPool(error.to_string()))?;

        log::info!(
            "fuzzymatch pool started threads={} elapsed_ms={}",
            threads,
            started.elapsed().as_millis(),
        );

        Ok(Self {
            pool: Mutex::new(Some(pool)),
            threads,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn is_running(&self) -> bool {
        self.pool.lock().is_some()
    }

    /// Scores every job on the pool and returns one update per job.
    ///
    /// Blocks until all jobs have finished. The output keeps the input order.
    /// Returns `None` when the pool has already been shut down.
    pub fn score_batch(
        &self,
        scorer: &dyn PathScorer,
        pattern: &SearchPattern,
        jobs: &[ScoreJob<'_>],
    ) -> Option<Vec<(usize, RecordUpdate)>> {
        let guard = self.pool.lock();
        let pool = (*guard).as_ref()?;
        let updates: Vec<(usize, RecordUpdate)> = pool.install(|| {
            jobs.par_iter()
                .map(|&(slot, path)| (slot, scorer.score(path, pattern)))
                .collect()
        });
        Some(updates)
    }

    /// Tears the workers down. Later batches report the pool as gone.
    ///
    /// Waits for an in-flight batch to finish first.
    pub fn shutdown(&self) {
        if self.pool.lock().take().is_some() {
            log::info!("fuzzymatch pool shut down threads={}", self.threads);
        }
    }
}

impl Drop for ScorePool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
