//! Per-call match context

use crate::error::{MatchError, Result};
use serde::Serialize;

/// Default upper bound on prompt length, in characters
pub const MAX_PROMPT_LENGTH: usize = 10_000;

/// Everything one scoring call knows about the request.
///
/// Built fresh for every call and never shared. The prompt is stored
/// trimmed and lower-cased so extractors can do plain substring checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchContext {
    prompt: String,
    open_files: Vec<String>,
    working_directory: Option<String>,
}

impl MatchContext {
    /// Validate and normalize a request using the default length limit
    pub fn new(
        prompt: &str,
        open_files: impl IntoIterator<Item = impl Into<String>>,
        working_directory: Option<String>,
    ) -> Result<Self> {
        Self::with_max_length(prompt, open_files, working_directory, MAX_PROMPT_LENGTH)
    }

    /// Validate and normalize a request against an explicit length limit
    pub fn with_max_length(
        prompt: &str,
        open_files: impl IntoIterator<Item = impl Into<String>>,
        working_directory: Option<String>,
        max_length: usize,
    ) -> Result<Self> {
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(MatchError::InvalidInput(
                "prompt must not be empty".to_string(),
            ));
        }

        let length = trimmed.chars().count();
        if length > max_length {
            return Err(MatchError::InvalidInput(format!(
                "prompt is {} characters, maximum is {}",
                length, max_length
            )));
        }

        let open_files = open_files
            .into_iter()
            .filter_map(|path| {
                let path: String = path.into();
                let path = path.trim();
                (!path.is_empty()).then(|| path.to_string())
            })
            .collect();

        let working_directory = working_directory
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty());

        Ok(Self {
            prompt: trimmed.to_lowercase(),
            open_files,
            working_directory,
        })
    }

    /// Convenience constructor for prompt-only requests
    pub fn prompt_only(prompt: &str) -> Result<Self> {
        Self::new(prompt, Vec::<String>::new(), None)
    }

    /// Normalized (trimmed, lower-cased) prompt
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Open file paths in caller order
    pub fn open_files(&self) -> &[String] {
        &self.open_files
    }

    /// Working directory, if one was supplied
    pub fn working_directory(&self) -> Option<&str> {
        self.working_directory.as_deref()
    }

    /// Whether the file category has anything to check against
    pub fn has_files(&self) -> bool {
        !self.open_files.is_empty()
    }
}
