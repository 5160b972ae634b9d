//! Request-level facade over extraction, scoring and ranking

use std::sync::Arc;
use tracing::debug;

use skillscope_catalog::Catalog;
use skillscope_types::{
    AgentRecommendations, MatchContext, ResourceMatch, ResourceQuery, SkillRecommendations,
};

use crate::config::ScoringConfig;
use crate::extract::{extract_agent, extract_skill};
use crate::rank::{rank_agents, rank_skills};
use crate::resource::discover_resources;
use crate::score::{score_agent, score_skill};

/// Scores a shared, immutable catalog. Every call is independent.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    config: ScoringConfig,
}

impl Recommender {
    /// Create a recommender over a catalog snapshot
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, config: ScoringConfig) -> Self {
        Self { catalog, config }
    }

    /// The catalog being scored
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Scoring configuration in use
    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Rank every skill with non-zero confidence
    #[must_use]
    pub fn recommend_skills(&self, ctx: &MatchContext) -> SkillRecommendations {
        let skills = self.catalog.skills();
        let scored = skills
            .iter()
            .filter_map(|skill| score_skill(skill, &extract_skill(ctx, skill), &self.config.skills))
            .collect();

        let ranked = rank_skills(scored, skills.len());
        debug!(
            matched = ranked.matches.len(),
            scanned = ranked.total_scanned,
            files = ctx.open_files().len(),
            "Scored skills"
        );
        ranked
    }

    /// Rank agents that clear the inclusion threshold
    #[must_use]
    pub fn recommend_agents(&self, ctx: &MatchContext) -> AgentRecommendations {
        let agents = self.catalog.agents();
        let scored = agents
            .iter()
            .filter_map(|agent| score_agent(agent, &extract_agent(ctx, agent), &self.config.agents))
            .collect();

        let ranked = rank_agents(scored, self.config.agents.threshold, agents.len());
        debug!(
            matched = ranked.matches.len(),
            scanned = ranked.total_scanned,
            "Scored agents"
        );
        ranked
    }

    /// Resources relevant to a topic and keywords
    #[must_use]
    pub fn discover_resources(&self, query: &ResourceQuery) -> Vec<ResourceMatch> {
        let matches = discover_resources(self.catalog.resources(), query, &self.config.resources);
        debug!(
            matched = matches.len(),
            scanned = self.catalog.resources().len(),
            "Scored resources"
        );
        matches
    }
}
