//! Catalog of scoreable items and the loader that assembles it
//!
//! Load order is the iteration order callers see: the built-in catalog
//! first, then each configured directory in order, entries within a
//! directory sorted by file name.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::agent::{Agent, AgentMetadata};
use crate::resource::{Resource, RESOURCE_EXTENSIONS};
use crate::skill::{Skill, SkillMetadata};

const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.yaml");

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    skills: Vec<SkillMetadata>,
    #[serde(default)]
    agents: Vec<AgentMetadata>,
}

/// Immutable set of skills, agents and resources
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    skills: Vec<Skill>,
    agents: Vec<Agent>,
    resources: Vec<Resource>,
}

impl Catalog {
    /// Build a catalog; later entries whose name is already taken are dropped
    pub fn new(skills: Vec<Skill>, agents: Vec<Agent>, resources: Vec<Resource>) -> Self {
        Self {
            skills: dedup_by_name("skill", skills, |s| s.name()),
            agents: dedup_by_name("agent", agents, |a| a.name()),
            resources: dedup_by_name("resource", resources, |r| r.name()),
        }
    }

    /// The catalog compiled into the crate
    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_CATALOG).context("Failed to parse built-in catalog")
    }

    /// Parse a catalog document with `skills` and `agents` lists.
    ///
    /// Invalid entries are skipped with a warning.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_yaml::from_str(yaml).with_context(|| "Failed to parse catalog YAML")?;

        let skills = file
            .skills
            .into_iter()
            .filter_map(|meta| {
                Skill::from_metadata(meta, None)
                    .map_err(|e| warn!("Skipping catalog skill: {}", e))
                    .ok()
            })
            .collect();

        let agents = file
            .agents
            .into_iter()
            .filter_map(|meta| {
                Agent::from_metadata(meta, None)
                    .map_err(|e| warn!("Skipping catalog agent: {}", e))
                    .ok()
            })
            .collect();

        Ok(Self::new(skills, agents, Vec::new()))
    }

    /// Append another catalog; names already present win
    pub fn merge(self, other: Catalog) -> Self {
        let mut skills = self.skills;
        skills.extend(other.skills);
        let mut agents = self.agents;
        agents.extend(other.agents);
        let mut resources = self.resources;
        resources.extend(other.resources);
        Self::new(skills, agents, resources)
    }

    /// All skills in load order
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// All agents in load order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// All resources in load order
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Whether the catalog holds nothing at all
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.agents.is_empty() && self.resources.is_empty()
    }

    /// Concise skills list, one "- name: description" line per skill
    pub fn skills_summary(&self) -> String {
        if self.skills.is_empty() {
            return "No skills available".to_string();
        }

        self.skills
            .iter()
            .map(Skill::to_summary)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn dedup_by_name<T>(kind: &str, items: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| {
            let fresh = seen.insert(name(item).to_string());
            if !fresh {
                warn!("Duplicate {} '{}' ignored", kind, name(item));
            }
            fresh
        })
        .collect()
}

/// Builder that assembles a [`Catalog`] from the built-in set and directories
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    builtin: bool,
    skills_dirs: Vec<PathBuf>,
    agents_dirs: Vec<PathBuf>,
    resources_dirs: Vec<PathBuf>,
}

impl CatalogLoader {
    /// Loader with the built-in catalog and no directories
    pub fn new() -> Self {
        Self {
            builtin: true,
            skills_dirs: Vec::new(),
            agents_dirs: Vec::new(),
            resources_dirs: Vec::new(),
        }
    }

    /// Include or exclude the built-in catalog
    pub fn with_builtin(mut self, enabled: bool) -> Self {
        self.builtin = enabled;
        self
    }

    /// Add a directory of `<skill>/SKILL.md` folders
    pub fn add_skills_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skills_dirs.push(dir.into());
        self
    }

    /// Add a directory of agent `*.md` files
    pub fn add_agents_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.agents_dirs.push(dir.into());
        self
    }

    /// Add a directory of resource documents
    pub fn add_resources_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resources_dirs.push(dir.into());
        self
    }

    /// Add `~/.skillscope/{skills,agents,resources}`
    pub fn with_personal_dirs(self) -> Self {
        if let Some(home) = dirs::home_dir() {
            let root = home.join(".skillscope");
            self.add_skills_directory(root.join("skills"))
                .add_agents_directory(root.join("agents"))
                .add_resources_directory(root.join("resources"))
        } else {
            warn!("Could not find home directory for personal catalog");
            self
        }
    }

    /// Load everything into an immutable catalog
    pub fn load(&self) -> Result<Catalog> {
        let base = if self.builtin {
            Catalog::builtin()?
        } else {
            Catalog::default()
        };

        let mut skills = Vec::new();
        for dir in &self.skills_dirs {
            for entry in sorted_entries(dir) {
                if !entry.is_dir() {
                    continue;
                }
                match Skill::from_dir(&entry) {
                    Ok(skill) => {
                        debug!("Discovered skill: {} at {:?}", skill.name(), skill.path());
                        skills.push(skill);
                    }
                    Err(e) => debug!("Skipping {:?}: {:#}", entry, e),
                }
            }
        }

        let mut agents = Vec::new();
        for dir in &self.agents_dirs {
            for entry in sorted_entries(dir) {
                if !has_extension(&entry, &["md"]) {
                    continue;
                }
                match Agent::from_file(&entry) {
                    Ok(agent) => {
                        debug!("Discovered agent: {} at {:?}", agent.name(), agent.path());
                        agents.push(agent);
                    }
                    Err(e) => debug!("Skipping {:?}: {:#}", entry, e),
                }
            }
        }

        let mut resources = Vec::new();
        for dir in &self.resources_dirs {
            for entry in sorted_entries(dir) {
                if !entry.is_file() || !has_extension(&entry, RESOURCE_EXTENSIONS) {
                    continue;
                }
                match Resource::from_file(&entry) {
                    Ok(resource) => resources.push(resource),
                    Err(e) => debug!("Skipping {:?}: {:#}", entry, e),
                }
            }
        }

        let catalog = base.merge(Catalog::new(skills, agents, resources));

        info!(
            "Catalog loaded: {} skills, {} agents, {} resources",
            catalog.skills().len(),
            catalog.agents().len(),
            catalog.resources().len()
        );
        Ok(catalog)
    }
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Entries of a catalog directory sorted by path.
///
/// A missing or unreadable directory yields nothing, and unreadable entries
/// are dropped, so one bad path never fails the whole load.
fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Catalog directory does not exist: {:?}", dir);
            return Vec::new();
        }
        Err(e) => {
            warn!("Skipping catalog directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| {
            entry
                .map_err(|e| debug!("Skipping unreadable entry in {:?}: {}", dir, e))
                .ok()
        })
        .map(|entry| entry.path())
        .collect();
    paths.sort();
    paths
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
