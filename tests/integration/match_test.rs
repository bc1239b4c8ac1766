//! Full scripted matches

use crate::common;
use crate::support::builders::MazeBuilder;

use glory_maze::config::Config;
use glory_maze::console::ScriptedConsole;
use glory_maze::dice::ScriptedDice;
use glory_maze::engine::{GameEngine, MatchOutcome};
use glory_maze::model::{Effect, Player};
use std::fs;
use tempfile::TempDir;

fn sandbox() -> (TempDir, Config) {
    let tmp = TempDir::new().expect("Failed to create temp dir");
    let config = common::sandbox_config(tmp.path());
    common::install_fixture(&config, "test_map.json", "test_map.json");
    common::install_fixture(&config, "riddles.json", "enigmas.json");
    (tmp, config)
}

#[test]
fn test_human_reaches_treasure() {
    let (tmp, config) = sandbox();
    let map = config.maps_dir().join("test_map.json");
    let console = ScriptedConsole::new([
        // setup: one human, manual entrance, no bots
        "1", "y", "Ana", "1", "0",
        // E1 -> S1 through the falling stone
        "1",
        // S1 -> R1 and answer the riddle
        "R1", "2",
        // R1 -> C1
        "c1",
    ]);
    let mut engine = GameEngine::new(config, console, ScriptedDice::new());

    let outcome = engine.play(&map).unwrap();
    assert_eq!(
        outcome,
        MatchOutcome::Victory {
            winner: "Ana".to_string()
        }
    );

    let ana = engine.player("Ana").unwrap();
    assert_eq!(ana.history(), ["E1", "S1", "R1", "C1"]);
    assert_eq!(ana.power, 75);
    assert_eq!(ana.moves, 3);

    let reports = tmp.path().join("reports");
    let report = common::read_json(&reports.join("report_Ana.json"));
    assert_eq!(report["result"], "VICTORY");
    assert_eq!(report["final_power"], 75);
    assert_eq!(report["riddles_solved"].as_array().unwrap().len(), 1);
    assert_eq!(report["effects_applied"][0], "DAMAGE");
    assert_eq!(report["statistics"]["total_moves"], 3);

    let summary = common::read_json(&reports.join("report_match.json"));
    assert_eq!(summary["winner"], "Ana");

    let journal = fs::read_to_string(tmp.path().join("game_log.txt")).unwrap();
    assert!(journal.contains("=== GLORY MAZE - SESSION START ==="));
    assert!(journal.contains("Ana solved the riddle in R1"));
    assert!(journal.contains("=== END OF MATCH - WINNER: Ana ==="));
}

#[test]
fn test_wrong_answer_holds_player() {
    let (_tmp, config) = sandbox();
    let map = config.maps_dir().join("test_map.json");
    let console = ScriptedConsole::new([
        "1", "y", "Ana", "1", "0",
        "1", "R1", "3",
        "1",
        "exit",
    ]);
    let mut engine = GameEngine::new(config, console, ScriptedDice::new());

    // Wrong on entry, wrong again next turn, then "exit" is read as an
    // answer and the input runs out at the following riddle prompt.
    assert_eq!(engine.play(&map).unwrap(), MatchOutcome::Abandoned);
    let ana = engine.player("Ana").unwrap();
    assert_eq!(ana.room_id(), Some("R1"));
    assert!(ana.solved_riddles.is_empty());
}

#[test]
fn test_smart_bot_wins() {
    let (tmp, config) = sandbox();
    let map = config.maps_dir().join("test_map.json");
    // smart bot, entrance E1, guesses option 2 of the riddle
    let dice = ScriptedDice::new().with_chances(&[true]).with_picks(&[0, 1]);
    let console = ScriptedConsole::new(["0", "1"]);
    let mut engine = GameEngine::new(config, console, dice);

    let outcome = engine.play(&map).unwrap();
    assert_eq!(
        outcome,
        MatchOutcome::Victory {
            winner: "Bot_1".to_string()
        }
    );
    assert_eq!(engine.players()[0].history(), ["E1", "S1", "R1", "C1"]);
    assert!(tmp.path().join("reports").join("report_Bot_1.json").exists());
}

#[test]
fn test_random_bot_runs_out_of_power() {
    let (tmp, config) = sandbox();
    let map = config.maps_dir().join("test_map.json");
    // random bot bouncing over the damaging corridor E1 - S1
    let console = ScriptedConsole::new(["0", "1"]);
    let mut engine = GameEngine::new(config, console, ScriptedDice::new());

    let outcome = engine.play(&map).unwrap();
    assert_eq!(
        outcome,
        MatchOutcome::Defeat {
            player: "Bot_1".to_string()
        }
    );
    assert_eq!(engine.players()[0].power, 0);

    let report = common::read_json(&tmp.path().join("reports").join("report_Bot_1.json"));
    assert_eq!(report["result"], "DEFEAT");
    assert_eq!(report["statistics"]["game_status"], "ABANDONED_OR_DEFEATED");
    let summary = common::read_json(&tmp.path().join("reports").join("report_match.json"));
    assert_eq!(summary["winner"], "NONE");
}

#[test]
fn test_swap_all_corridor_rotates_players() {
    let tmp = TempDir::new().unwrap();
    let config = common::sandbox_config(tmp.path());
    let maze = MazeBuilder::new("Rotation")
        .entrance("E1")
        .entrance("E2")
        .room("S1")
        .treasure("C1")
        .event("E1", "S1", Effect::SwapAll)
        .corridor("E2", "C1", 5.0)
        .build();

    let console = ScriptedConsole::new(["S1", "exit"]);
    let mut engine = GameEngine::new(config, console, ScriptedDice::new());
    engine.set_maze(maze);
    engine.add_player(Player::human("Ana", 100), "E1").unwrap();
    engine.add_player(Player::human("Rui", 100), "E2").unwrap();

    // Ana triggers the swap and is displaced before reaching S1, then Rui
    // quits from E1.
    assert_eq!(engine.start(), MatchOutcome::Abandoned);
    assert_eq!(engine.player("Ana").unwrap().room_id(), Some("E2"));
    assert_eq!(engine.player("Rui").unwrap().room_id(), Some("E1"));
}

#[test]
fn test_no_players_does_not_start() {
    let (tmp, config) = sandbox();
    let map = config.maps_dir().join("test_map.json");
    let mut engine = GameEngine::new(config, ScriptedConsole::new(["0", "0"]), ScriptedDice::new());

    assert_eq!(engine.play(&map).unwrap(), MatchOutcome::NotStarted);
    assert!(!tmp.path().join("reports").exists());
}
