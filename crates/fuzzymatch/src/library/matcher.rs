//! MatchLibrary: candidate ownership and incremental, round-based rescoring.

use std::sync::Arc;
use std::time::Instant;

use super::store::CandidateStore;
use crate::config::MatchConfig;
use crate::error::Result;
use crate::pool::{ScoreJob, ScorePool};
use crate::record::RecordUpdate;
use crate::scorer::{score_single_char, PathScorer, SearchPattern, SubsequenceScorer};

/// What a single `update_scores` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    /// Length of the new search, in chars.
    pub round: usize,
    /// Records handed to the scorer this round.
    pub scored: usize,
    /// Records that failed to match this round.
    pub ejected: usize,
    /// Records made live again because the search shrank or was edited.
    pub resurrected: usize,
    /// Whether scoring ran on the worker pool.
    pub parallel: bool,
}

/// Path -> match state mapping plus the active search.
///
/// Calls must be serialized by the caller; `update_scores` takes `&mut self`
/// and returns only after every dispatched candidate has been merged.
pub struct MatchLibrary {
    pub(super) store: CandidateStore,
    pub(super) search: SearchPattern,
    pub(super) search_text: String,
    scorer: Box<dyn PathScorer>,
    pool: Arc<ScorePool>,
    config: MatchConfig,
}

impl std::fmt::Debug for MatchLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchLibrary")
            .field("n_files", &self.store.len())
            .field("search", &self.search_text)
            .field("pool", &self.pool)
            .field("config", &self.config)
            .finish()
    }
}

/// Create operations.
impl MatchLibrary {
    /// Creates an empty library that owns a fresh worker pool.
    pub fn new(config: MatchConfig) -> Result<Self> {
        let pool = ScorePool::start(config.resolved_worker_threads())?;
        Ok(Self::with_pool(Arc::new(pool), config))
    }

    /// Creates an empty library on a shared worker pool.
    pub fn with_pool(pool: Arc<ScorePool>, config: MatchConfig) -> Self {
        Self {
            store: CandidateStore::default(),
            search: SearchPattern::new(""),
            search_text: String::new(),
            scorer: Box::new(SubsequenceScorer),
            pool,
            config,
        }
    }

    /// Creates a library seeded with `paths`.
    pub fn with_candidates<I, S>(paths: I, config: MatchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut library = Self::new(config)?;
        library.add_candidates(paths);
        Ok(library)
    }

    /// Replaces the scorer used for searches of two or more chars.
    pub fn with_scorer(mut self, scorer: impl PathScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn pool(&self) -> &Arc<ScorePool> {
        &self.pool
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The active search string.
    pub fn search(&self) -> &str {
        &self.search_text
    }
}

/// Mutation operations.
impl MatchLibrary {
    /// Replaces every candidate with fresh records and clears the search.
    pub fn reset_candidates<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.store = CandidateStore::from_paths(paths);
        self.search = SearchPattern::new("");
        self.search_text.clear();
        log::debug!("fuzzymatch reset candidates n_files={}", self.store.len());
    }

    /// Adds paths not yet tracked. Existing records and the search are kept.
    ///
    /// Returns how many paths were new.
    pub fn add_candidates<I, S>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.store.extend(paths);
        log::debug!(
            "fuzzymatch add candidates added={} n_files={}",
            added,
            self.store.len()
        );
        added
    }

    /// Makes `search` the active search and rescores what needs rescoring.
    ///
    /// Records ejected at a round past the prefix shared with the previous
    /// search are made live first. An empty search scores nothing; a single
    /// char runs the substring fast path over every record; longer searches
    /// only score live records.
    pub fn update_scores(&mut self, search: &str) -> UpdateSummary {
        let started = Instant::now();
        let pattern = SearchPattern::new(search);
        let mut summary = UpdateSummary {
            round: pattern.round(),
            ..UpdateSummary::default()
        };

        let kept = self.search.common_prefix_len(&pattern);
        if kept < self.search.round() {
            for record in self.store.records_mut() {
                if record.round_ejected > kept {
                    record.round_ejected = 0;
                    summary.resurrected += 1;
                }
            }
        }

        self.search = pattern;
        self.search_text.clear();
        self.search_text.push_str(search);

        match self.search.round() {
            0 => {}
            1 => self.score_single_round(&mut summary),
            _ => self.score_live_round(&mut summary),
        }

        log::debug!(
            "fuzzymatch update round={} scored={} ejected={} resurrected={} parallel={} elapsed_ms={}",
            summary.round,
            summary.scored,
            summary.ejected,
            summary.resurrected,
            summary.parallel,
            started.elapsed().as_millis(),
        );

        summary
    }

    /// Shuts down the worker pool. Later rounds score on the calling thread.
    pub fn shutdown(&self) {
        self.pool.shutdown();
    }

    fn score_single_round(&mut self, summary: &mut UpdateSummary) {
        let Some(&needle) = self.search.chars().first() else {
            return;
        };
        let (paths, records) = self.store.paths_and_records_mut();
        for (path, record) in paths.iter().zip(records.iter_mut()) {
            let update = score_single_char(path, needle);
            if update.ejects() {
                summary.ejected += 1;
            }
            record.apply(update);
        }
        summary.scored = paths.len();
    }

    fn score_live_round(&mut self, summary: &mut UpdateSummary) {
        let (updates, parallel) = self.collect_live_updates();
        summary.scored = updates.len();
        summary.parallel = parallel;
        for (slot, update) in updates {
            if update.ejects() {
                summary.ejected += 1;
            }
            self.store.record_mut(slot).apply(update);
        }
    }

    /// Scores every live record without touching any of them.
    fn collect_live_updates(&self) -> (Vec<(usize, RecordUpdate)>, bool) {
        let jobs: Vec<ScoreJob<'_>> = self
            .store
            .iter()
            .filter(|(_, _, record)| record.is_live())
            .map(|(slot, path, _)| (slot, path))
            .collect();

        if jobs.len() >= self.config.parallel_threshold {
            if let Some(updates) = self
                .pool
                .score_batch(self.scorer.as_ref(), &self.search, &jobs)
            {
                return (updates, true);
            }
            log::warn!(
                "fuzzymatch pool unavailable, scoring inline candidates={}",
                jobs.len()
            );
        }

        let updates = jobs
            .iter()
            .map(|&(slot, path)| (slot, self.scorer.score(path, &self.search)))
            .collect();
        (updates, false)
    }
}
