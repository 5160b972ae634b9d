//! Signal normalization and compiled file patterns

use globset::{GlobBuilder, GlobMatcher};
use std::collections::HashSet;
use tracing::warn;

/// Trim, lower-case and deduplicate signal strings, keeping first occurrence order.
///
/// Empty strings are dropped: a zero-length signal would match every prompt.
pub fn normalize_signals<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut signals = Vec::new();

    for signal in raw {
        let normalized = signal.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            warn!("Dropping empty signal string from catalog entry");
            continue;
        }
        if seen.insert(normalized.clone()) {
            signals.push(normalized);
        }
    }

    signals
}

/// A file glob with its compiled matcher
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    matcher: GlobMatcher,
}

impl FilePattern {
    /// Compile a glob, or `None` if it is empty or invalid.
    ///
    /// Matching is case-insensitive and `*` may cross `/`.
    pub fn compile(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            warn!("Dropping empty file pattern from catalog entry");
            return None;
        }

        match GlobBuilder::new(raw)
            .case_insensitive(true)
            .literal_separator(false)
            .build()
        {
            Ok(glob) => Some(Self {
                raw: raw.to_string(),
                matcher: glob.compile_matcher(),
            }),
            Err(e) => {
                warn!("Skipping invalid file pattern '{}': {}", raw, e);
                None
            }
        }
    }

    /// Compile many globs, skipping bad ones and duplicates
    pub fn compile_all<I, S>(raw: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        raw.into_iter()
            .filter_map(|p| Self::compile(p.as_ref()))
            .filter(|p| seen.insert(p.raw.to_lowercase()))
            .collect()
    }

    /// The glob as written in the catalog
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `path` matches this glob
    pub fn is_match(&self, path: &str) -> bool {
        self.matcher.is_match(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_signals() {
        let signals = normalize_signals(["Convex", " mutation ", "", "  ", "CONVEX"]);
        assert_eq!(signals, vec!["convex", "mutation"]);
    }

    #[test]
    fn test_file_pattern_matching() {
        let pattern = FilePattern::compile("convex/**/*.ts").unwrap();
        assert!(pattern.is_match("convex/functions/messages.ts"));
        assert!(pattern.is_match("Convex/Schema.TS"));
        assert!(!pattern.is_match("src/app.tsx"));
        assert_eq!(pattern.as_str(), "convex/**/*.ts");
    }

    #[test]
    fn test_star_crosses_directories() {
        let pattern = FilePattern::compile("*.tsx").unwrap();
        assert!(pattern.is_match("src/components/App.tsx"));
    }

    #[test]
    fn test_invalid_patterns_skipped() {
        assert!(FilePattern::compile("").is_none());
        assert!(FilePattern::compile("src/[unclosed").is_none());

        let patterns = FilePattern::compile_all(["*.rs", "src/[bad", "*.RS", "Cargo.toml"]);
        let raw: Vec<_> = patterns.iter().map(FilePattern::as_str).collect();
        assert_eq!(raw, vec!["*.rs", "Cargo.toml"]);
    }
}
