//! Config

use glory_maze::config::{Config, PROJECT_CONFIG_PATH};
use serial_test::serial;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct CwdGuard {
    original: std::path::PathBuf,
}

impl CwdGuard {
    fn enter(dir: &Path) -> Self {
        let original = std::env::current_dir().expect("Failed to get current dir");
        std::env::set_current_dir(dir).expect("Failed to change dir");
        Self { original }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

fn write_config(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
#[serial]
fn test_project_config_from_working_dir() {
    let tmp = TempDir::new().unwrap();
    write_config(
        &tmp.path().join(PROJECT_CONFIG_PATH),
        "---\ngame:\n  starting_power: 80\npaths:\n  maps_dir: levels\n---\n",
    );

    let _cwd = CwdGuard::enter(tmp.path());
    let config = Config::load_merged_from(None, Path::new(PROJECT_CONFIG_PATH)).unwrap();
    assert_eq!(config.game.starting_power, 80);
    assert_eq!(config.maps_dir(), Path::new("levels"));
    assert_eq!(config.riddles_file(), Path::new("maps/enigmas.json"));
}

#[test]
#[serial]
fn test_no_config_files_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let _cwd = CwdGuard::enter(tmp.path());

    let config = Config::load_merged_from(None, Path::new(PROJECT_CONFIG_PATH)).unwrap();
    assert_eq!(config.game.starting_power, 100);
    assert_eq!(config.game.bot_delay_ms, 1000);
    assert_eq!(config.log_file(), Path::new("game_log.txt"));
}

#[test]
fn test_project_overrides_global() {
    let tmp = TempDir::new().unwrap();
    let global = tmp.path().join("global.md");
    let project = tmp.path().join("project.md");
    write_config(
        &global,
        "---\ngame:\n  starting_power: 120\n  bot_delay_ms: 10\n---\n",
    );
    write_config(&project, "---\ngame:\n  bot_delay_ms: 0\n---\n");

    let config = Config::load_merged_from(Some(&global), &project).unwrap();
    assert_eq!(config.game.starting_power, 120);
    assert_eq!(config.game.bot_delay_ms, 0);
}

#[test]
fn test_invalid_override_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = Config::load(Some(&tmp.path().join("missing.md"))).unwrap_err();
    assert!(err.to_string().contains("Config file not found"));

    let bad = tmp.path().join("bad.md");
    write_config(&bad, "---\ngame:\n  lever_success_chance: 2.0\n---\n");
    assert!(Config::load_merged_from(None, &bad).is_err());
}
