//! Reference documents offered for resource discovery

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;

use crate::frontmatter;

/// File extensions treated as resource documents
pub const RESOURCE_EXTENSIONS: &[&str] = &["md", "mdx", "markdown", "txt"];

const MAX_DESCRIPTION_CHARS: usize = 200;

/// A discoverable resource with a topic derived from its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    uri: String,
    topic: String,
    description: String,
}

impl Resource {
    /// Create a resource; the topic is derived from `name`
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let topic = derive_topic(&name);
        Self {
            name,
            uri: uri.into(),
            topic,
            description: description.into(),
        }
    }

    /// Load a resource from a document on disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow!("Resource path has no file name: {:?}", path))?;

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

        let body = match frontmatter::split(&content)? {
            Some((_, body)) => body,
            None => content,
        };

        Ok(Self::new(
            name,
            format!("file://{}", path.display()),
            first_paragraph_line(&body),
        ))
    }

    /// File name as loaded
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the resource
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Lower-cased, space-separated topic derived from the name
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Short description, possibly empty
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Derive a topic from a resource name.
///
/// Known document extensions are dropped, then `-`, `_` and `.` become spaces
/// and whitespace is collapsed: `react-19.2-features.md` → `react 19 2 features`.
pub fn derive_topic(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stem = match lowered.rsplit_once('.') {
        Some((stem, ext)) if RESOURCE_EXTENSIONS.contains(&ext) => stem,
        _ => lowered.as_str(),
    };

    stem.replace(['-', '_', '.'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_paragraph_line(body: &str) -> String {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("---"))
        .map(|line| line.chars().take(MAX_DESCRIPTION_CHARS).collect())
        .unwrap_or_default()
}
