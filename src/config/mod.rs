//! Configuration management for glory-maze.
//!
//! Config files are markdown with a YAML frontmatter block. Values are
//! merged from the global config (`~/.config/glory-maze/config.md`) and the
//! project config (`.glory/config.md`); both are optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;
pub mod validation;

pub use defaults::*;

/// Project config location, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".glory/config.md";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration with full merge semantics.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/glory-maze/config.md)
    /// 2. Project config (`override_path` or .glory/config.md)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let project = override_path.unwrap_or(Path::new(PROJECT_CONFIG_PATH));
        if let Some(path) = override_path {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
        }
        Self::load_merged_from(global_config_path().as_deref(), project)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        let config: Config =
            serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")?;
        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from the given global and project paths.
    /// Missing files contribute nothing.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: &Path) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = Some(project_path)
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;

        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        self.game.validate()?;
        self.paths.validate()
    }

    pub fn maps_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.maps_dir)
    }

    pub fn riddles_file(&self) -> PathBuf {
        PathBuf::from(&self.paths.riddles_file)
    }

    pub fn reports_dir(&self) -> PathBuf {
        PathBuf::from(&self.paths.reports_dir)
    }

    pub fn log_file(&self) -> PathBuf {
        PathBuf::from(&self.paths.log_file)
    }
}

/// Returns the path to the global config file at ~/.config/glory-maze/config.md
pub fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("glory-maze").join("config.md"))
}

/// Split `---` delimited YAML frontmatter from the markdown body.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let content = content.trim();

    if !content.starts_with("---") {
        return (None, content);
    }

    let rest = &content[3..];
    if let Some(end) = rest.find("---") {
        let frontmatter = rest[..end].to_string();
        let body = rest[end + 3..].trim_start();
        (Some(frontmatter), body)
    } else {
        (None, content)
    }
}

/// Partial config for merging - all fields optional
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub game: Option<PartialGameSettings>,
    pub paths: Option<PartialPathsConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialGameSettings {
    pub starting_power: Option<i64>,
    pub bot_error_chance: Option<f64>,
    pub bot_delay_ms: Option<u64>,
    pub lever_success_chance: Option<f64>,
    pub bot_lever_chance: Option<f64>,
    pub item_find_chance: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialPathsConfig {
    pub maps_dir: Option<String>,
    pub riddles_file: Option<String>,
    pub reports_dir: Option<String>,
    pub log_file: Option<String>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_game = self.game.unwrap_or_default();
        let project_game = project.game.unwrap_or_default();
        let global_paths = self.paths.unwrap_or_default();
        let project_paths = project.paths.unwrap_or_default();

        Config {
            game: GameSettings {
                // Project value > global value > default
                starting_power: project_game
                    .starting_power
                    .or(global_game.starting_power)
                    .unwrap_or_else(defaults::default_starting_power),
                bot_error_chance: project_game
                    .bot_error_chance
                    .or(global_game.bot_error_chance)
                    .unwrap_or_else(defaults::default_bot_error_chance),
                bot_delay_ms: project_game
                    .bot_delay_ms
                    .or(global_game.bot_delay_ms)
                    .unwrap_or_else(defaults::default_bot_delay_ms),
                lever_success_chance: project_game
                    .lever_success_chance
                    .or(global_game.lever_success_chance)
                    .unwrap_or_else(defaults::default_lever_success_chance),
                bot_lever_chance: project_game
                    .bot_lever_chance
                    .or(global_game.bot_lever_chance)
                    .unwrap_or_else(defaults::default_bot_lever_chance),
                item_find_chance: project_game
                    .item_find_chance
                    .or(global_game.item_find_chance)
                    .unwrap_or_else(defaults::default_item_find_chance),
            },
            paths: PathsConfig {
                maps_dir: project_paths
                    .maps_dir
                    .or(global_paths.maps_dir)
                    .unwrap_or_else(defaults::default_maps_dir),
                riddles_file: project_paths
                    .riddles_file
                    .or(global_paths.riddles_file)
                    .unwrap_or_else(defaults::default_riddles_file),
                reports_dir: project_paths
                    .reports_dir
                    .or(global_paths.reports_dir)
                    .unwrap_or_else(defaults::default_reports_dir),
                log_file: project_paths
                    .log_file
                    .or(global_paths.log_file)
                    .unwrap_or_else(defaults::default_log_file),
            },
        }
    }
}
