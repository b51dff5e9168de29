//! The match library.
//!
//! - `store` - Candidate slots in first-seen order with a path index
//! - `matcher` - `MatchLibrary` and its incremental `update_scores`
//! - `rank` - Top-K selection, counts, record lookups, highlighting
//!
//! ## Rounds
//!
//! A round is the length of the active search. When a record fails to match
//! it is marked with the round it failed at and skipped by every longer
//! search that extends the one that ejected it. Deleting back below that
//! round makes it live again, so backspace never rescans the whole set.

mod matcher;
mod rank;
mod store;

pub use matcher::{MatchLibrary, UpdateSummary};
pub use rank::MatchSegments;
pub use store::CandidateStore;
