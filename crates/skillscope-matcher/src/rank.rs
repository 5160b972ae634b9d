//! Ordering and inclusion rules
//!
//! Stable sort by descending confidence; ties keep catalog order. The agent
//! inclusion threshold lives here and only here.

use skillscope_types::{AgentMatch, AgentRecommendations, SkillMatch, SkillRecommendations};

/// Order scored skills. No cap on the number returned.
#[must_use]
pub fn rank_skills(mut matches: Vec<SkillMatch>, total_scanned: usize) -> SkillRecommendations {
    matches.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    SkillRecommendations {
        matches,
        total_scanned,
    }
}

/// Drop agents below `threshold`, then order the rest
#[must_use]
pub fn rank_agents(
    matches: Vec<AgentMatch>,
    threshold: u32,
    total_scanned: usize,
) -> AgentRecommendations {
    let mut matches: Vec<_> = matches
        .into_iter()
        .filter(|m| u32::from(m.confidence) >= threshold)
        .collect();
    matches.sort_by(|a, b| b.confidence.cmp(&a.confidence));
    AgentRecommendations {
        matches,
        total_scanned,
    }
}
