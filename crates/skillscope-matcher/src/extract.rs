//! Signal extractors
//!
//! Pure functions from a [`MatchContext`] to raw evidence. No weighting or
//! capping happens here: extractors report every distinct hit and whether
//! the category had anything to check against.
//!
//! Matching is case-insensitive substring containment. Empty signals never
//! match.

use skillscope_catalog::{Agent, FilePattern, Skill};
use skillscope_types::{Category, MatchContext};
use std::collections::HashSet;

/// Evidence for one item in one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalHitSet {
    /// Which category this is
    pub category: Category,
    /// False when there was no input to check (distinct from zero hits)
    pub applicable: bool,
    /// Most evidence the category can collect: distinct valid signals, or
    /// for files the smaller of pattern count and open-file count
    pub declared: usize,
    /// Units of evidence found: distinct matched signals, or matched open files
    pub matched: usize,
    /// Distinct matched signals for display
    pub hits: Vec<String>,
}

impl SignalHitSet {
    fn from_hits(category: Category, declared: usize, hits: Vec<String>) -> Self {
        Self {
            category,
            applicable: declared > 0,
            declared,
            matched: hits.len(),
            hits,
        }
    }

    /// Number of units of evidence found
    #[must_use]
    pub fn hit_count(&self) -> usize {
        self.matched
    }
}

/// Evidence for one skill across all categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSignals {
    /// Keyword evidence
    pub keywords: SignalHitSet,
    /// File-pattern evidence
    pub files: SignalHitSet,
    /// Content-pattern evidence
    pub content: SignalHitSet,
}

impl SkillSignals {
    /// Hit sets in canonical category order
    #[must_use]
    pub fn sets(&self) -> [&SignalHitSet; 3] {
        [&self.keywords, &self.files, &self.content]
    }

    /// Categories that apply for this item and call
    #[must_use]
    pub fn applicable(&self) -> Vec<Category> {
        self.sets()
            .into_iter()
            .filter(|set| set.applicable)
            .map(|set| set.category)
            .collect()
    }
}

/// Evidence for one agent, kept split by sub-category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentSignals {
    /// Matched complexity signals
    pub complexity: Vec<String>,
    /// Matched domain signals
    pub domain: Vec<String>,
}

impl AgentSignals {
    /// Distinct signals across both sub-categories, complexity first
    #[must_use]
    pub fn distinct(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.complexity
            .iter()
            .chain(self.domain.iter())
            .filter(|signal| seen.insert(signal.as_str()))
            .cloned()
            .collect()
    }

    /// Whether nothing matched
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.complexity.is_empty() && self.domain.is_empty()
    }
}

/// Distinct signals from `signals` that occur in the normalized prompt.
///
/// Returns the number of valid declared signals alongside the hits.
fn prompt_hits(prompt: &str, signals: &[String]) -> (usize, Vec<String>) {
    let declared = distinct_signals(signals);
    let count = declared.len();
    let hits = declared
        .into_iter()
        .filter(|signal| prompt.contains(signal))
        .map(str::to_string)
        .collect();
    (count, hits)
}

/// Non-blank signals in first-seen order, without repeats
fn distinct_signals(signals: &[String]) -> Vec<&str> {
    let mut seen = HashSet::new();
    signals
        .iter()
        .map(String::as_str)
        .filter(|signal| !signal.trim().is_empty() && seen.insert(*signal))
        .collect()
}

/// Keyword hits for one item
#[must_use]
pub fn extract_keywords(ctx: &MatchContext, keywords: &[String]) -> SignalHitSet {
    let (declared, hits) = prompt_hits(ctx.prompt(), keywords);
    SignalHitSet::from_hits(Category::Keywords, declared, hits)
}

/// Content-pattern hits for one item
#[must_use]
pub fn extract_content(ctx: &MatchContext, patterns: &[String]) -> SignalHitSet {
    let (declared, hits) = prompt_hits(ctx.prompt(), patterns);
    SignalHitSet::from_hits(Category::Content, declared, hits)
}

/// File-pattern hits for one item.
///
/// Not applicable when the context has no open files. Each open file is one
/// unit of evidence: it counts when any pattern matches its full path, its
/// path relative to the working directory, or its file name. The first
/// pattern that matched each file is reported, without repeats.
#[must_use]
pub fn extract_files(ctx: &MatchContext, patterns: &[FilePattern]) -> SignalHitSet {
    if !ctx.has_files() || patterns.is_empty() {
        return SignalHitSet {
            category: Category::Files,
            applicable: false,
            declared: patterns.len(),
            matched: 0,
            hits: Vec::new(),
        };
    }

    let mut matched = 0;
    let mut hits: Vec<String> = Vec::new();
    for path in ctx.open_files() {
        let candidates = path_candidates(path, ctx.working_directory());
        let pattern = patterns
            .iter()
            .find(|pattern| candidates.iter().any(|candidate| pattern.is_match(candidate)));

        if let Some(pattern) = pattern {
            matched += 1;
            if !hits.iter().any(|hit| hit == pattern.as_str()) {
                hits.push(pattern.as_str().to_string());
            }
        }
    }

    SignalHitSet {
        category: Category::Files,
        applicable: true,
        declared: patterns.len().min(ctx.open_files().len()),
        matched,
        hits,
    }
}

/// All evidence for one skill
#[must_use]
pub fn extract_skill(ctx: &MatchContext, skill: &Skill) -> SkillSignals {
    SkillSignals {
        keywords: extract_keywords(ctx, skill.keywords()),
        files: extract_files(ctx, skill.file_patterns()),
        content: extract_content(ctx, skill.content_patterns()),
    }
}

/// All evidence for one agent
#[must_use]
pub fn extract_agent(ctx: &MatchContext, agent: &Agent) -> AgentSignals {
    AgentSignals {
        complexity: prompt_hits(ctx.prompt(), agent.complexity_signals()).1,
        domain: prompt_hits(ctx.prompt(), agent.domain_signals()).1,
    }
}

fn path_candidates(path: &str, working_directory: Option<&str>) -> Vec<String> {
    let path = path.replace('\\', "/");
    let mut candidates = Vec::with_capacity(3);

    if let Some(dir) = working_directory {
        let dir = dir.replace('\\', "/");
        let dir = dir.trim_end_matches('/');
        if !dir.is_empty() {
            if let Some(relative) = path.strip_prefix(dir).filter(|r| r.starts_with('/')) {
                let relative = relative.trim_start_matches('/');
                if !relative.is_empty() {
                    candidates.push(relative.to_string());
                }
            }
        }
    }

    if let Some(name) = path.rsplit('/').next() {
        if !name.is_empty() && name != path {
            candidates.push(name.to_string());
        }
    }

    candidates.insert(0, path);
    candidates
}
