use anyhow::{anyhow, Context};
use serde::Deserialize;
use skillscope_catalog::CatalogLoader;
use skillscope_matcher::ScoringConfig;
use skillscope_types::MAX_PROMPT_LENGTH;
use std::fs;
use std::path::PathBuf;

/// Default config template created when no config exists
pub const DEFAULT_CONFIG: &str = r#"
[logging]
level = "info"  # trace, debug, info, warn, error
format = "pretty"  # pretty or json

[catalog]
builtin = true
skills_dirs = ["~/.skillscope/skills", ".skillscope/skills"]
agents_dirs = ["~/.skillscope/agents", ".skillscope/agents"]
resources_dirs = ["~/.skillscope/resources", ".skillscope/resources"]

[limits]
max_prompt_length = 10000

# Scoring overrides; omitted keys keep their defaults
[scoring.skills.weights]
keywords = 40
files = 30
content = 30
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default = "default_builtin")]
    pub builtin: bool,
    #[serde(default)]
    pub skills_dirs: Vec<String>,
    #[serde(default)]
    pub agents_dirs: Vec<String>,
    #[serde(default)]
    pub resources_dirs: Vec<String>,
}

fn default_builtin() -> bool {
    true
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_prompt_length")]
    pub max_prompt_length: usize,
}

fn default_max_prompt_length() -> usize {
    MAX_PROMPT_LENGTH
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub catalog: CatalogConfig,
    pub limits: LimitsConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl CatalogConfig {
    /// Build a catalog loader with `~` expanded in every directory
    pub fn loader(&self) -> CatalogLoader {
        let mut loader = CatalogLoader::new().with_builtin(self.builtin);
        for dir in &self.skills_dirs {
            loader = loader.add_skills_directory(expand_tilde(dir));
        }
        for dir in &self.agents_dirs {
            loader = loader.add_agents_directory(expand_tilde(dir));
        }
        for dir in &self.resources_dirs {
            loader = loader.add_resources_directory(expand_tilde(dir));
        }
        loader
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_tilde(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(dir)
}

impl Config {
    /// Get the global config path: ~/.skillscope/skillscope.toml
    fn global_config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".skillscope").join("skillscope.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::global_config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| anyhow!("Config path has no parent: {}", config_path.display()))?;

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)
                .with_context(|| format!("Failed to create {}", config_dir.display()))?;
            eprintln!("Created config directory: {}", config_dir.display());
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Built-in defaults
    /// 2. Global config: ~/.skillscope/skillscope.toml (auto-created if missing)
    /// 3. Local override: ./skillscope.toml (workspace, optional)
    /// 4. Environment variables with SKILLSCOPE__ prefix (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(global_config_path))
            .add_source(config::File::with_name("skillscope").required(false))
            .add_source(
                config::Environment::with_prefix("SKILLSCOPE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("catalog.skills_dirs")
                    .with_list_parse_key("catalog.agents_dirs")
                    .with_list_parse_key("catalog.resources_dirs")
                    .try_parsing(true),
            );

        // Convenience override, mirrors RUST_LOG-style usage
        if let Ok(level) = std::env::var("SKILLSCOPE_LOG") {
            builder = builder.set_override("logging.level", level)?;
        }

        let config: Self = builder.build()?.try_deserialize()?;
        Ok(config)
    }
}
