//! Scoring constants, overridable from configuration
//!
//! Every section has a `Default` matching the stock behavior, so an empty
//! `[scoring]` table yields the standard 40/30/30 weighting.

use serde::Deserialize;

use crate::weights::CategoryWeights;

/// All scoring knobs
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    /// Skill scoring
    pub skills: SkillScoring,
    /// Agent scoring
    pub agents: AgentScoring,
    /// Resource relevance
    pub resources: ResourceScoring,
}

/// Weighted, redistributive skill scoring
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SkillScoring {
    /// Nominal category weights
    pub weights: CategoryWeights,
    /// Hits needed to saturate a category (or all declared signals, if fewer)
    pub saturation_hits: usize,
}

impl Default for SkillScoring {
    fn default() -> Self {
        Self {
            weights: CategoryWeights::default(),
            saturation_hits: 3,
        }
    }
}

/// Signal-count agent scoring
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AgentScoring {
    /// Confidence for the first matched signal
    pub base: u32,
    /// Added per additional distinct signal
    pub step: u32,
    /// Upper bound on agent confidence
    pub cap: u32,
    /// Minimum confidence for an agent to be returned
    pub threshold: u32,
}

impl Default for AgentScoring {
    fn default() -> Self {
        Self {
            base: 60,
            step: 10,
            cap: 95,
            threshold: 50,
        }
    }
}

/// Resource relevance scoring
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ResourceScoring {
    /// Score every existing resource starts with
    pub base: u32,
    /// Added when the query topic is contained in the resource topic
    pub topic_bonus: u32,
    /// Added per matched keyword
    pub keyword_bonus: u32,
    /// Resources must score strictly above this to be returned
    pub min_relevance: u32,
}

impl Default for ResourceScoring {
    fn default() -> Self {
        Self {
            base: 50,
            topic_bonus: 40,
            keyword_bonus: 10,
            min_relevance: 40,
        }
    }
}
