//! Common test helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use glory_maze::config::Config;

/// Config whose every path points inside `dir`, with bot pauses disabled.
pub fn sandbox_config(dir: &Path) -> Config {
    let maps = dir.join("maps");
    fs::create_dir_all(&maps).expect("Failed to create maps dir");

    let mut config = Config::default();
    config.game.bot_delay_ms = 0;
    config.paths.maps_dir = maps.display().to_string();
    config.paths.riddles_file = maps.join("enigmas.json").display().to_string();
    config.paths.reports_dir = dir.join("reports").display().to_string();
    config.paths.log_file = dir.join("game_log.txt").display().to_string();
    config
}

/// Copy a fixture into the sandbox maps directory under `name`.
pub fn install_fixture(config: &Config, fixture: &str, name: &str) -> PathBuf {
    let target = config.maps_dir().join(name);
    fs::copy(crate::support::fixtures::fixture_path(fixture), &target)
        .expect("Failed to copy fixture");
    target
}

pub fn read_json(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content).expect("Invalid JSON")
}
