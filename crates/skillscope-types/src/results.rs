//! Result records handed back by scoring calls

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signal categories used by skill scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Plain keywords found in the prompt
    Keywords,
    /// Glob patterns matched against open files
    Files,
    /// Broader content phrases found in the prompt
    Content,
}

impl Category {
    /// All categories in their canonical order
    pub const ALL: [Category; 3] = [Category::Keywords, Category::Files, Category::Content];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Keywords => "keywords",
            Category::Files => "files",
            Category::Content => "content",
        };
        f.write_str(name)
    }
}

/// Per-category percentages (0..=100). A category that did not apply is 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    /// Keyword percentage
    pub keywords: u8,
    /// File-pattern percentage
    pub files: u8,
    /// Content-pattern percentage
    pub content: u8,
}

impl CategoryScores {
    /// Overwrite the percentage for one category
    pub fn set(&mut self, category: Category, value: u8) {
        match category {
            Category::Keywords => self.keywords = value,
            Category::Files => self.files = value,
            Category::Content => self.content = value,
        }
    }
}

/// A scored skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    /// Skill name
    pub name: String,
    /// Skill description
    pub description: String,
    /// Weighted confidence, 1..=100
    pub confidence: u8,
    /// Percentage reached in each category
    pub category_scores: CategoryScores,
    /// Matched signals, keywords first, then file patterns, then content patterns
    pub matched_signals: Vec<String>,
}

/// Ranked skills plus how many were looked at, for "N/M" rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecommendations {
    /// Matches, highest confidence first
    pub matches: Vec<SkillMatch>,
    /// Number of skills scored
    pub total_scanned: usize,
}

/// A scored agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMatch {
    /// Agent name
    pub name: String,
    /// Agent description
    pub description: String,
    /// Confidence from the number of distinct matched signals
    pub confidence: u8,
    /// Distinct matched signals, complexity first
    pub matched_signals: Vec<String>,
    /// Matched complexity signals
    pub complexity_matches: Vec<String>,
    /// Matched domain signals
    pub domain_matches: Vec<String>,
    /// Human-readable explanation
    pub reasoning: String,
}

/// Ranked agents that cleared the inclusion threshold
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecommendations {
    /// Matches, highest confidence first
    pub matches: Vec<AgentMatch>,
    /// Number of agents scored
    pub total_scanned: usize,
}

/// Resource discovery request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    /// Topic to look for in resource topics
    #[serde(default)]
    pub topic: Option<String>,
    /// Extra keywords, each adding to relevance
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A resource with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMatch {
    /// Resource file name
    pub name: String,
    /// Resource location
    pub uri: String,
    /// Topic derived from the name
    pub topic: String,
    /// Relevance, 41..=100
    pub relevance: u8,
}
