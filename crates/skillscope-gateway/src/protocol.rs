//! JSON-lines request and response shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;
use skillscope_types::ResourceQuery;

/// One request line
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Request {
    /// Rank skills for a prompt
    #[serde(rename_all = "camelCase")]
    Skills {
        prompt: String,
        #[serde(default)]
        open_files: Vec<String>,
        #[serde(default)]
        working_directory: Option<String>,
    },
    /// Rank agents for a prompt
    Agents { prompt: String },
    /// Find resources for a topic
    Resources(ResourceQuery),
    /// Drop the cached catalog
    Reload,
}

/// Error detail returned to the caller
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorBody {
    pub kind: String,
    pub message: String,
}

/// One response line
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Response {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl Response {
    pub fn success(result: Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(ErrorBody {
                kind: kind.to_string(),
                message: message.into(),
            }),
        }
    }
}
