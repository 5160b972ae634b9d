//! `Skillscope` Matcher
//!
//! Multi-signal confidence scoring over an immutable catalog.
//!
//! ## Pipeline
//!
//! 1. Extract: keyword, file-pattern and content-pattern hits per item
//! 2. Score: weighted per-category percentages, weights redistributed over
//!    the categories that apply, rounded and clamped to 0..=100
//! 3. Rank: stable descending sort, agent threshold, no truncation
//!
//! Scoring is synchronous and allocation-local; a [`Recommender`] can be
//! shared across threads because the catalog is read-only.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod config;
pub mod extract;
pub mod rank;
pub mod recommender;
pub mod resource;
pub mod score;
pub mod weights;

pub use config::{AgentScoring, ResourceScoring, ScoringConfig, SkillScoring};
pub use extract::{AgentSignals, SignalHitSet, SkillSignals};
pub use recommender::Recommender;
pub use weights::{CategoryWeights, NormalizedWeights};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Recommender, ScoringConfig};
    pub use skillscope_types::{MatchContext, MatchError};
}
