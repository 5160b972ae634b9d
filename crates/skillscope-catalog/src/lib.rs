//! `Skillscope` Catalog
//!
//! The immutable set of things the matcher can recommend.
//!
//! ## Features
//!
//! - Built-in catalog compiled into the crate
//! - Skills from `<dir>/<skill>/SKILL.md` with YAML frontmatter
//! - Agents from `<dir>/*.md` with YAML frontmatter
//! - Resources from any markdown/text document, topic derived from the file name
//! - Signal normalization: lower-cased, trimmed, deduplicated, empties dropped
//! - Write-once [`CatalogCache`] with explicit `reset()`

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod agent;
pub mod cache;
pub mod catalog;
mod frontmatter;
pub mod resource;
pub mod signals;
pub mod skill;

pub use agent::Agent;
pub use cache::CatalogCache;
pub use catalog::{Catalog, CatalogLoader};
pub use resource::{derive_topic, Resource};
pub use signals::{normalize_signals, FilePattern};
pub use skill::Skill;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Agent, Catalog, CatalogCache, CatalogLoader, Resource, Skill};
}
