//! Skillscope Types - Core types shared by the catalog, matcher and gateway
//!
//! This module defines the request context, the result records handed back
//! to callers, and the input validation error.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod context;
pub mod error;
pub mod results;

pub use context::{MatchContext, MAX_PROMPT_LENGTH};
pub use error::MatchError;
pub use results::{
    AgentMatch, AgentRecommendations, Category, CategoryScores, ResourceMatch, ResourceQuery,
    SkillMatch, SkillRecommendations,
};
