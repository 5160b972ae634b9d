//! YAML frontmatter parsing shared by skill, agent and resource files

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

static FRONTMATTER_RE: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r"^---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n([\s\S]*))?$")
});

/// Split a markdown document into its frontmatter block and body.
///
/// Returns `None` when the document does not open with a `---` fence.
pub(crate) fn split(content: &str) -> Result<Option<(String, String)>> {
    let frontmatter_re = FRONTMATTER_RE
        .as_ref()
        .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

    let Some(captures) = frontmatter_re.captures(content) else {
        return Ok(None);
    };

    let yaml = captures
        .get(1)
        .ok_or_else(|| anyhow!("Failed to extract frontmatter"))?
        .as_str()
        .to_string();
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or("").to_string();

    Ok(Some((yaml, body)))
}

/// Parse the frontmatter of `content` into `T`, returning it with the body
pub(crate) fn parse<T: DeserializeOwned>(content: &str) -> Result<(T, String)> {
    let (yaml, body) = split(content)?.ok_or_else(|| anyhow!("No valid YAML frontmatter found"))?;

    let metadata: T =
        serde_yaml::from_str(&yaml).with_context(|| "Failed to parse YAML frontmatter")?;

    Ok((metadata, body))
}
