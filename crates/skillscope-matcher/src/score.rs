//! Confidence scoring
//!
//! Skills: per-category percentage `min(1, hits / min(declared, saturation_hits))`,
//! combined with weights normalized over the applicable categories, rounded
//! and clamped to 0..=100. Zero confidence means the skill is dropped.
//!
//! Agents: 0 for no hits, otherwise `base + step * (distinct - 1)` capped at `cap`.

use skillscope_catalog::{Agent, Skill};
use skillscope_types::{AgentMatch, CategoryScores, SkillMatch};

use crate::config::{AgentScoring, SkillScoring};
use crate::extract::{AgentSignals, SkillSignals};

/// Fraction (0.0..=1.0) of a category achieved.
///
/// Monotonic in `hits`; reaches 1.0 once `hits` covers every declared signal
/// or `saturation_hits`, whichever is smaller.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn category_fraction(hits: usize, declared: usize, saturation_hits: usize) -> f64 {
    if hits == 0 || declared == 0 {
        return 0.0;
    }
    let target = declared.min(saturation_hits.max(1));
    (hits as f64 / target as f64).min(1.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Score one skill from its extracted signals. `None` when confidence is 0.
#[must_use]
pub fn score_skill(
    skill: &Skill,
    signals: &SkillSignals,
    config: &SkillScoring,
) -> Option<SkillMatch> {
    let weights = config.weights.normalized(&signals.applicable());
    if weights.total() <= 0.0 {
        return None;
    }

    let mut category_scores = CategoryScores::default();
    let mut total = 0.0;
    for set in signals.sets() {
        if !set.applicable {
            continue;
        }
        let fraction = category_fraction(set.hit_count(), set.declared, config.saturation_hits);
        category_scores.set(set.category, to_percent(fraction * 100.0));
        total += weights.get(set.category) * fraction * 100.0;
    }

    let confidence = to_percent(total);
    if confidence == 0 {
        return None;
    }

    let matched_signals = signals
        .sets()
        .into_iter()
        .flat_map(|set| set.hits.iter().cloned())
        .collect();

    Some(SkillMatch {
        name: skill.name().to_string(),
        description: skill.description().to_string(),
        confidence,
        category_scores,
        matched_signals,
    })
}

/// Agent confidence for a number of distinct matched signals
#[must_use]
pub fn agent_confidence(distinct_hits: usize, config: &AgentScoring) -> u8 {
    if distinct_hits == 0 {
        return 0;
    }
    let extra = u32::try_from(distinct_hits - 1).unwrap_or(u32::MAX);
    let raw = config
        .base
        .saturating_add(config.step.saturating_mul(extra))
        .min(config.cap)
        .min(100);
    u8::try_from(raw).unwrap_or(100)
}

/// Score one agent. `None` when nothing matched; the threshold is applied when ranking.
#[must_use]
pub fn score_agent(
    agent: &Agent,
    signals: &AgentSignals,
    config: &AgentScoring,
) -> Option<AgentMatch> {
    if signals.is_empty() {
        return None;
    }

    let matched_signals = signals.distinct();
    let confidence = agent_confidence(matched_signals.len(), config);

    Some(AgentMatch {
        name: agent.name().to_string(),
        description: agent.description().to_string(),
        confidence,
        matched_signals,
        complexity_matches: signals.complexity.clone(),
        domain_matches: signals.domain.clone(),
        reasoning: reasoning(signals),
    })
}

/// One-line explanation of which signal groups matched
#[must_use]
pub fn reasoning(signals: &AgentSignals) -> String {
    let complexity = (!signals.complexity.is_empty())
        .then(|| format!("complexity signals ({})", signals.complexity.join(", ")));
    let domain = (!signals.domain.is_empty())
        .then(|| format!("domain signals ({})", signals.domain.join(", ")));

    match (complexity, domain) {
        (Some(c), Some(d)) => format!("Matches {} and {}", c, d),
        (Some(only), None) | (None, Some(only)) => format!("Matches {}", only),
        (None, None) => "No matching signals".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{extract_agent, extract_skill};
    use crate::weights::CategoryWeights;
    use skillscope_types::MatchContext;

    fn skill_result(skill: &Skill, ctx: &MatchContext) -> Option<SkillMatch> {
        score_skill(skill, &extract_skill(ctx, skill), &SkillScoring::default())
    }

    #[test]
    fn test_category_fraction() {
        assert!((category_fraction(0, 5, 3) - 0.0).abs() < 1e-9);
        assert!((category_fraction(1, 5, 3) - 1.0 / 3.0).abs() < 1e-9);
        assert!((category_fraction(3, 5, 3) - 1.0).abs() < 1e-9);
        assert!((category_fraction(5, 5, 3) - 1.0).abs() < 1e-9);
        assert!((category_fraction(2, 2, 3) - 1.0).abs() < 1e-9);
        assert!((category_fraction(1, 2, 3) - 0.5).abs() < 1e-9);
        assert!((category_fraction(1, 1, 0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_full_keyword_match_without_other_signals() {
        let skill = Skill::new("convex", "Convex").with_keywords(["convex", "mutation"]);
        let ctx = MatchContext::prompt_only("create a convex mutation").unwrap();

        let result = skill_result(&skill, &ctx).unwrap();
        assert_eq!(result.confidence, 100);
        assert_eq!(result.category_scores.keywords, 100);
        assert_eq!(result.category_scores.files, 0);
        assert_eq!(result.matched_signals, vec!["convex", "mutation"]);
    }

    #[test]
    fn test_unrelated_prompt_excluded() {
        let skill = Skill::new("convex", "Convex").with_keywords(["convex", "mutation"]);
        let ctx = MatchContext::prompt_only("unrelated text about cooking").unwrap();
        assert!(skill_result(&skill, &ctx).is_none());
    }

    #[test]
    fn test_prompt_only_redistribution_reaches_100() {
        let skill = Skill::new("web", "Web")
            .with_keywords(["react"])
            .with_file_patterns(["*.tsx"])
            .with_content_patterns(["hook"]);
        let ctx = MatchContext::prompt_only("react hook please").unwrap();

        let result = skill_result(&skill, &ctx).unwrap();
        assert_eq!(result.confidence, 100);
        assert_eq!(result.category_scores.files, 0);
    }

    #[test]
    fn test_files_weighted_when_supplied() {
        let skill = Skill::new("web", "Web")
            .with_keywords(["react"])
            .with_file_patterns(["*.tsx"])
            .with_content_patterns(["hook"]);

        let ctx = MatchContext::new("react hook please", vec!["README.md"], None).unwrap();
        let result = skill_result(&skill, &ctx).unwrap();
        assert_eq!(result.confidence, 70);

        let ctx = MatchContext::new("react hook please", vec!["src/App.tsx"], None).unwrap();
        let result = skill_result(&skill, &ctx).unwrap();
        assert_eq!(result.confidence, 100);
        assert_eq!(result.matched_signals, vec!["react", "*.tsx", "hook"]);
    }

    #[test]
    fn test_more_matching_files_never_score_lower() {
        let skill = Skill::new("convex", "Convex")
            .with_keywords(["convex"])
            .with_file_patterns(["convex/**/*.ts", "**/convex.json", "convex/schema.ts"]);

        let ctx = MatchContext::new("convex", vec!["convex/schema.ts"], None).unwrap();
        let one = skill_result(&skill, &ctx).unwrap();

        let ctx = MatchContext::new("convex", vec!["convex/a.ts", "convex/b.ts"], None).unwrap();
        let two = skill_result(&skill, &ctx).unwrap();

        assert_eq!(one.category_scores.files, 100);
        assert_eq!(two.category_scores.files, 100);
        assert!(two.confidence >= one.confidence);
        assert_eq!(two.matched_signals, vec!["convex", "convex/**/*.ts"]);
    }

    #[test]
    fn test_zero_weights_drop_skill() {
        let skill = Skill::new("k", "K").with_keywords(["alpha"]);
        let ctx = MatchContext::prompt_only("alpha").unwrap();
        let config = SkillScoring {
            weights: CategoryWeights {
                keywords: 0,
                files: 0,
                content: 0,
            },
            ..SkillScoring::default()
        };
        assert!(score_skill(&skill, &extract_skill(&ctx, &skill), &config).is_none());
    }

    #[test]
    fn test_partial_keyword_match() {
        let skill = Skill::new("k", "K").with_keywords(["alpha", "beta", "gamma", "delta"]);
        let ctx = MatchContext::prompt_only("alpha only").unwrap();
        // 1 of 3 saturating hits, keywords carry all weight
        assert_eq!(skill_result(&skill, &ctx).unwrap().confidence, 33);
    }

    #[test]
    fn test_same_signal_in_two_categories_reported_twice() {
        let skill = Skill::new("c", "C")
            .with_keywords(["convex"])
            .with_content_patterns(["convex"]);
        let ctx = MatchContext::prompt_only("convex").unwrap();
        let result = skill_result(&skill, &ctx).unwrap();
        assert_eq!(result.matched_signals, vec!["convex", "convex"]);
    }

    #[test]
    fn test_agent_confidence_table() {
        let config = AgentScoring::default();
        assert_eq!(agent_confidence(0, &config), 0);
        assert_eq!(agent_confidence(1, &config), 60);
        assert_eq!(agent_confidence(3, &config), 80);
        assert_eq!(agent_confidence(4, &config), 90);
        assert_eq!(agent_confidence(5, &config), 95);
        assert_eq!(agent_confidence(50, &config), 95);
    }

    #[test]
    fn test_agent_three_signals() {
        let agent = Agent::new("security-reviewer", "Reviews")
            .with_complexity_signals(["review"])
            .with_domain_signals(["security", "auth"]);
        let ctx =
            MatchContext::prompt_only("please review this for security and auth issues").unwrap();

        let signals = extract_agent(&ctx, &agent);
        let result = score_agent(&agent, &signals, &AgentScoring::default()).unwrap();
        assert_eq!(result.confidence, 80);
        assert_eq!(result.complexity_matches, vec!["review"]);
        assert_eq!(result.domain_matches, vec!["security", "auth"]);
        assert_eq!(
            result.reasoning,
            "Matches complexity signals (review) and domain signals (security, auth)"
        );
    }

    #[test]
    fn test_agent_single_signal() {
        let agent = Agent::new("auditor", "Audits").with_domain_signals(["audit"]);
        let ctx = MatchContext::prompt_only("audit this").unwrap();

        let signals = extract_agent(&ctx, &agent);
        let result = score_agent(&agent, &signals, &AgentScoring::default()).unwrap();
        assert_eq!(result.confidence, 60);
        assert_eq!(result.reasoning, "Matches domain signals (audit)");
    }

    #[test]
    fn test_agent_without_hits() {
        let agent = Agent::new("auditor", "Audits").with_domain_signals(["audit"]);
        let ctx = MatchContext::prompt_only("write a poem").unwrap();
        let signals = extract_agent(&ctx, &agent);
        assert!(score_agent(&agent, &signals, &AgentScoring::default()).is_none());
    }
}
