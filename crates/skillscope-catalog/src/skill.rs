//! Skill definition and parsing
//!
//! Each skill is a folder containing SKILL.md with YAML frontmatter. Besides
//! name and description the frontmatter carries the trigger signals used for
//! scoring: `keywords`, `file_patterns` and `content_patterns`.

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::frontmatter;
use crate::signals::{normalize_signals, FilePattern};

/// Maximum name length before a warning is logged
const MAX_NAME_LENGTH: usize = 64;
/// Maximum description length before a warning is logged
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Skill metadata extracted from YAML frontmatter
#[derive(Debug, Clone, Deserialize)]
pub struct SkillMetadata {
    /// Skill name (lowercase letters/numbers/hyphens only)
    pub name: String,
    /// Skill description (describes WHAT and WHEN)
    pub description: String,
    /// Plain trigger keywords
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Globs matched against open files
    #[serde(default, alias = "filePatterns")]
    pub file_patterns: Vec<String>,
    /// Intent phrases matched against the prompt
    #[serde(default, alias = "contentPatterns")]
    pub content_patterns: Vec<String>,
}

/// A loaded skill. Immutable once built.
#[derive(Debug, Clone)]
pub struct Skill {
    name: String,
    description: String,
    keywords: Vec<String>,
    file_patterns: Vec<FilePattern>,
    content_patterns: Vec<String>,
    path: Option<PathBuf>,
}

impl Skill {
    /// Create a skill with no signals
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: Vec::new(),
            file_patterns: Vec::new(),
            content_patterns: Vec::new(),
            path: None,
        }
    }

    /// Set trigger keywords (normalized)
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords = normalize_signals(keywords);
        self
    }

    /// Set file globs (invalid ones are skipped)
    pub fn with_file_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.file_patterns = FilePattern::compile_all(patterns);
        self
    }

    /// Set content patterns (normalized)
    pub fn with_content_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.content_patterns = normalize_signals(patterns);
        self
    }

    /// Build a skill from validated frontmatter
    pub fn from_metadata(metadata: SkillMetadata, path: Option<PathBuf>) -> Result<Self> {
        validate_metadata(&metadata)?;

        let mut skill = Self::new(metadata.name, metadata.description)
            .with_keywords(&metadata.keywords)
            .with_file_patterns(&metadata.file_patterns)
            .with_content_patterns(&metadata.content_patterns);
        skill.path = path;
        Ok(skill)
    }

    /// Load skill from a directory containing SKILL.md
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let skill_file = dir.join("SKILL.md");

        if !skill_file.exists() {
            return Err(anyhow!("SKILL.md not found in {:?}", dir));
        }

        let content = fs::read_to_string(&skill_file)
            .with_context(|| format!("Failed to read {:?}", skill_file))?;

        let (metadata, _) = frontmatter::parse::<SkillMetadata>(&content)
            .with_context(|| format!("Failed to parse skill from {:?}", skill_file))?;

        Self::from_metadata(metadata, Some(dir.to_path_buf()))
    }

    /// Skill name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Skill description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Normalized keywords
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Compiled file globs
    pub fn file_patterns(&self) -> &[FilePattern] {
        &self.file_patterns
    }

    /// Normalized content patterns
    pub fn content_patterns(&self) -> &[String] {
        &self.content_patterns
    }

    /// Directory the skill was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Format: "- {name}: {description}"
    pub fn to_summary(&self) -> String {
        format!("- {}: {}", self.name, self.description)
    }
}

static NAME_RE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$"));

/// Validate a catalog entry name: non-empty, lowercase letters, numbers and hyphens
pub(crate) fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(anyhow!("{} name cannot be empty", kind));
    }

    if name.len() > MAX_NAME_LENGTH {
        warn!(
            "{} name '{}' exceeds {} characters (was {})",
            kind,
            name,
            MAX_NAME_LENGTH,
            name.len()
        );
    }

    let name_re = NAME_RE
        .as_ref()
        .map_err(|e| anyhow!("Failed to compile name validation regex: {}", e))?;

    if !name_re.is_match(name) {
        return Err(anyhow!(
            "{} name '{}' must contain only lowercase letters, numbers, and hyphens",
            kind,
            name
        ));
    }

    Ok(())
}

/// Validate a catalog entry description: non-empty, warn when long
pub(crate) fn validate_description(kind: &str, name: &str, description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(anyhow!("{} '{}' description cannot be empty", kind, name));
    }

    if description.len() > MAX_DESCRIPTION_LENGTH {
        warn!(
            "{} '{}' description exceeds {} characters (was {})",
            kind,
            name,
            MAX_DESCRIPTION_LENGTH,
            description.len()
        );
    }

    Ok(())
}

fn validate_metadata(metadata: &SkillMetadata) -> Result<()> {
    validate_name("Skill", &metadata.name)?;
    validate_description("Skill", &metadata.name, &metadata.description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skill_frontmatter() {
        let content = r#"---
name: convex-backend
description: Convex functions and schema. Use when writing queries or mutations.
keywords: [Convex, mutation, "", query]
file_patterns:
  - "convex/**/*.ts"
  - "convex/[broken"
content_patterns: [webhook, "http action"]
---

# Convex
"#;

        let (metadata, body) = frontmatter::parse::<SkillMetadata>(content).unwrap();
        assert!(body.contains("# Convex"));

        let skill = Skill::from_metadata(metadata, None).unwrap();
        assert_eq!(skill.name(), "convex-backend");
        assert_eq!(skill.keywords(), &["convex", "mutation", "query"]);
        assert_eq!(skill.file_patterns().len(), 1);
        assert_eq!(skill.content_patterns(), &["webhook", "http action"]);
    }

    #[test]
    fn test_camel_case_aliases() {
        let yaml = concat!(
            "name: web\ndescription: Web\n",
            "filePatterns: ['*.tsx']\ncontentPatterns: [component]",
        );
        let metadata: SkillMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.file_patterns, vec!["*.tsx"]);
        assert_eq!(metadata.content_patterns, vec!["component"]);
    }

    #[test]
    fn test_validate_metadata() {
        let valid = SkillMetadata {
            name: "valid-skill-name".to_string(),
            description: "A valid description".to_string(),
            keywords: vec![],
            file_patterns: vec![],
            content_patterns: vec![],
        };
        assert!(validate_metadata(&valid).is_ok());

        let invalid_name = SkillMetadata {
            name: "Invalid_Name".to_string(),
            ..valid.clone()
        };
        assert!(validate_metadata(&invalid_name).is_err());

        let empty_description = SkillMetadata {
            description: "  ".to_string(),
            ..valid
        };
        assert!(validate_metadata(&empty_description).is_err());
    }

    #[test]
    fn test_validate_name_reuses_pattern() {
        for _ in 0..3 {
            assert!(validate_name("Skill", "rust-crate-2").is_ok());
            assert!(validate_name("Skill", "Rust Crate").is_err());
        }
        assert!(NAME_RE.as_ref().is_ok());
        assert!(validate_name("Agent", "").is_err());
    }

    #[test]
    fn test_summary() {
        let skill = Skill::new("pdf", "Read PDFs");
        assert_eq!(skill.to_summary(), "- pdf: Read PDFs");
        assert!(skill.path().is_none());
    }
}
