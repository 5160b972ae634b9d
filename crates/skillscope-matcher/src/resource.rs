//! Resource relevance for discovery requests
//!
//! Every resource starts at `base`. A query topic contained in the resource
//! topic adds `topic_bonus`; each distinct query keyword found in the topic
//! or description adds `keyword_bonus`. The sum is clamped to 100 and only
//! resources strictly above `min_relevance` are returned.

use skillscope_catalog::{derive_topic, Resource};
use skillscope_types::{ResourceMatch, ResourceQuery};
use std::collections::HashSet;

use crate::config::ResourceScoring;

/// Relevance of one resource for a query (0..=100)
#[must_use]
pub fn resource_relevance(
    resource: &Resource,
    query: &ResourceQuery,
    config: &ResourceScoring,
) -> u8 {
    let mut score = config.base;

    if let Some(topic) = query.topic.as_deref().map(derive_topic) {
        if !topic.is_empty() && resource.topic().contains(&topic) {
            score = score.saturating_add(config.topic_bonus);
        }
    }

    let haystack = format!("{} {}", resource.topic(), resource.description().to_lowercase());
    for keyword in query_keywords(&query.keywords) {
        if haystack.contains(&keyword) {
            score = score.saturating_add(config.keyword_bonus);
        }
    }

    u8::try_from(score.min(100)).unwrap_or(100)
}

/// Caller keywords trimmed and lower-cased, blanks and repeats dropped
fn query_keywords(keywords: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty() && seen.insert(keyword.clone()))
        .collect()
}

/// Score, filter and order resources. Ties keep catalog order.
#[must_use]
pub fn discover_resources(
    resources: &[Resource],
    query: &ResourceQuery,
    config: &ResourceScoring,
) -> Vec<ResourceMatch> {
    let mut matches: Vec<_> = resources
        .iter()
        .filter_map(|resource| {
            let relevance = resource_relevance(resource, query, config);
            (u32::from(relevance) > config.min_relevance).then(|| ResourceMatch {
                name: resource.name().to_string(),
                uri: resource.uri().to_string(),
                topic: resource.topic().to_string(),
                relevance,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    matches
}
