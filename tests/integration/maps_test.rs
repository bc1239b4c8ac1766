//! Map and riddle files

use crate::common;
use crate::support::fixtures;

use glory_maze::error::GameError;
use glory_maze::model::Effect;
use glory_maze::storage::{discover_maps, load_maze, load_riddles, save_maze};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_fixture_map() {
    let riddles = load_riddles(&fixtures::fixture_path("riddles.json")).unwrap();
    assert_eq!(riddles.len(), 1);

    let maze = load_maze(&fixtures::fixture_path("test_map.json"), riddles).unwrap();
    assert_eq!(maze.name(), "Test Maze");
    assert_eq!(maze.len(), 6);
    assert_eq!(maze.corridors().len(), 5);
    assert_eq!(maze.entrances().len(), 2);
    assert_eq!(maze.treasure_room().unwrap().id, "C1");
    assert_eq!(maze.corridor_between("E2", "L1").unwrap().cost, 2.0);

    let riddle = maze.room("R1").unwrap().riddle_ref().unwrap();
    assert_eq!(riddle.question, "What has keys but cannot open any lock?");

    let event = maze.corridor_between("R1", "C1").unwrap().event.clone().unwrap();
    assert_eq!(event.item.unwrap().effect, Effect::Heal);
}

#[test]
fn test_shortest_path_on_fixture() {
    let maze = load_maze(&fixtures::fixture_path("test_map.json"), Vec::new()).unwrap();
    let path: Vec<&str> = maze
        .shortest_path("E2", "C1")
        .iter()
        .map(|room| room.id.as_str())
        .collect();
    assert_eq!(path, vec!["E2", "L1", "R1", "C1"]);
    assert_eq!(maze.path_cost("E2", "C1"), Some(6.0));
}

#[test]
fn test_saved_map_reloads() {
    let tmp = TempDir::new().unwrap();
    let mut maze = load_maze(&fixtures::fixture_path("test_map.json"), Vec::new()).unwrap();
    maze.set_name("Copy");

    let path = tmp.path().join("nested").join("copy.json");
    save_maze(&maze, &path).unwrap();

    let reloaded = load_maze(&path, Vec::new()).unwrap();
    assert_eq!(reloaded.name(), "Copy");
    assert_eq!(reloaded.len(), maze.len());
    assert_eq!(reloaded.corridors(), maze.corridors());

    let json = common::read_json(&path);
    assert_eq!(json["salas"][0]["tipo"], "ENTRADA");
    assert_eq!(json["ligacoes"][0]["evento"]["efeito"], "DAMAGE");
}

#[test]
fn test_missing_and_malformed_maps() {
    let tmp = TempDir::new().unwrap();
    let missing = load_maze(&tmp.path().join("nope.json"), Vec::new()).unwrap_err();
    assert!(matches!(missing, GameError::MapNotFound(_)));

    let broken = tmp.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    let err = load_maze(&broken, Vec::new()).unwrap_err();
    assert!(matches!(err, GameError::InvalidJson { .. }));
}

#[test]
fn test_discover_maps_skips_riddles() {
    let tmp = TempDir::new().unwrap();
    let config = common::sandbox_config(tmp.path());
    common::install_fixture(&config, "test_map.json", "b_map.json");
    common::install_fixture(&config, "test_map.json", "a_map.json");
    common::install_fixture(&config, "riddles.json", "enigmas.json");
    fs::write(config.maps_dir().join("notes.txt"), "not a map").unwrap();

    let names: Vec<String> = discover_maps(&config.maps_dir(), &config.riddles_file())
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a_map.json", "b_map.json"]);
}

#[test]
fn test_bundled_maps_are_playable() {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("maps");
    let riddles = load_riddles(&root.join("enigmas.json")).unwrap();
    assert!(!riddles.is_empty());

    for known in glory_maze::storage::KNOWN_MAPS {
        let maze = load_maze(&root.join(known.file), riddles.clone()).unwrap();
        let treasure = maze.treasure_room().unwrap();
        for entrance in maze.entrances() {
            assert!(
                !maze.shortest_path(&entrance.id, &treasure.id).is_empty(),
                "{}: treasure unreachable from {}",
                known.file,
                entrance.id
            );
        }
    }
}
