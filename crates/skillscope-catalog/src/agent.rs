//! Agent definitions
//!
//! An agent is a single markdown file with frontmatter listing the
//! complexity and domain signals that suggest delegating to it.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::frontmatter;
use crate::signals::normalize_signals;
use crate::skill::{validate_description, validate_name};

/// Agent metadata extracted from YAML frontmatter
#[derive(Debug, Clone, Deserialize)]
pub struct AgentMetadata {
    /// Agent name
    pub name: String,
    /// What the agent is for
    pub description: String,
    /// Phrases that indicate the task needs this agent's depth
    #[serde(default, alias = "complexitySignals")]
    pub complexity_signals: Vec<String>,
    /// Phrases naming the agent's subject area
    #[serde(default, alias = "domainSignals")]
    pub domain_signals: Vec<String>,
}

/// A loaded agent. Immutable once built.
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    description: String,
    complexity_signals: Vec<String>,
    domain_signals: Vec<String>,
    path: Option<PathBuf>,
}

impl Agent {
    /// Create an agent with no signals
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            complexity_signals: Vec::new(),
            domain_signals: Vec::new(),
            path: None,
        }
    }

    /// Set complexity signals (normalized)
    pub fn with_complexity_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.complexity_signals = normalize_signals(signals);
        self
    }

    /// Set domain signals (normalized)
    pub fn with_domain_signals<I, S>(mut self, signals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domain_signals = normalize_signals(signals);
        self
    }

    /// Build an agent from validated frontmatter
    pub fn from_metadata(metadata: AgentMetadata, path: Option<PathBuf>) -> Result<Self> {
        validate_name("Agent", &metadata.name)?;
        validate_description("Agent", &metadata.name, &metadata.description)?;

        let mut agent = Self::new(metadata.name, metadata.description)
            .with_complexity_signals(&metadata.complexity_signals)
            .with_domain_signals(&metadata.domain_signals);
        agent.path = path;
        Ok(agent)
    }

    /// Load an agent from a markdown file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(anyhow!("Agent file not found: {:?}", path));
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        let (metadata, _) = frontmatter::parse::<AgentMetadata>(&content)
            .with_context(|| format!("Failed to parse agent from {:?}", path))?;

        Self::from_metadata(metadata, Some(path.to_path_buf()))
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Agent description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Normalized complexity signals
    pub fn complexity_signals(&self) -> &[String] {
        &self.complexity_signals
    }

    /// Normalized domain signals
    pub fn domain_signals(&self) -> &[String] {
        &self.domain_signals
    }

    /// File the agent was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
