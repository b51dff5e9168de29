//! Incremental fuzzy matching of path lists.
//!
//! This crate ranks a large, mostly static set of paths against a search
//! string that changes one keystroke at a time:
//! - Per-path match records with round-based ejection and resurrection
//! - Case-insensitive ordered-subsequence scoring that favours late matches
//! - A reusable worker pool for scoring large candidate sets
//! - Bounded top-K ranking and match highlighting
//! - Scanners that discover candidate paths on disk

pub mod config;
pub mod error;
pub mod library;
pub mod pool;
pub mod record;
pub mod scan;
pub mod scorer;

// Re-export main types
pub use config::MatchConfig;
pub use error::{FuzzyMatchError, Result};
pub use library::{MatchLibrary, MatchSegments, UpdateSummary};
pub use pool::ScorePool;
pub use record::{MatchRecord, RecordUpdate};
pub use scan::{GitScanner, Scanner, ScannerRegistry, WalkOptions, WalkScanner};
pub use scorer::{PathScorer, SearchPattern, SubsequenceScorer};
