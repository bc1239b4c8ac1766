//! Command handlers for the glory-maze CLI

use anyhow::Result;
use std::path::{Path, PathBuf};

use glory_maze::config::Config;
use glory_maze::dice::RandomDice;

pub mod check;
pub mod maps;
pub mod play;

/// Global flags shared by every command.
pub struct Session {
    pub config: Config,
    pub dice: RandomDice,
}

impl Session {
    pub fn load(config_path: Option<&Path>, seed: Option<u64>) -> Result<Self> {
        let config = Config::load(config_path)?;
        if let Some(seed) = seed {
            tracing::debug!(seed, "using seeded dice");
        }
        Ok(Self {
            config,
            dice: RandomDice::new(seed),
        })
    }
}

/// Resolve a map argument: existing paths first, then names in the maps
/// directory (with or without `.json`).
pub fn resolve_map(config: &Config, map: &str) -> PathBuf {
    glory_maze::ui::menu::resolve_custom_map(&config.maps_dir(), map)
}
