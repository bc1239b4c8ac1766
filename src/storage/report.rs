//! End-of-match JSON reports.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use serde::Serialize;

use crate::error::Result;
use crate::model::{Maze, Player};

pub const MATCH_REPORT_FILE: &str = "report_match.json";

#[derive(Debug, Serialize)]
struct MissionReport<'a> {
    player: &'a str,
    date: String,
    result: &'static str,
    path_taken: &'a [String],
    final_power: i64,
    riddles_solved: &'a [String],
    effects_applied: &'a [String],
    events_encountered: &'a [String],
    items_found: Vec<String>,
    statistics: Statistics,
}

#[derive(Debug, Serialize)]
struct Statistics {
    total_riddles_encountered: usize,
    total_effects_applied: usize,
    total_events_encountered: usize,
    total_moves: u32,
    final_power_percentage: i64,
    game_status: &'static str,
}

#[derive(Debug, Serialize)]
struct MatchSummary<'a> {
    date: String,
    winner: &'a str,
    players: Vec<PlayerSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct PlayerSummary<'a> {
    name: &'a str,
    power: i64,
    current_room: &'a str,
    path_taken: &'a [String],
    riddles_solved: &'a [String],
    effects_applied: &'a [String],
    events_encountered: &'a [String],
}

fn now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.f").to_string()
}

/// `report_<name>.json`, with whitespace runs in the name replaced by `_`.
pub fn report_file_name(player_name: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    format!("report_{}.json", re.replace_all(player_name, "_"))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Write the report of one player's match into `dir`. Returns the file path.
pub fn export_mission_report(player: &Player, maze: &Maze, dir: &Path) -> Result<PathBuf> {
    let victory = player
        .room_id()
        .and_then(|id| maze.room(id))
        .is_some_and(|room| room.is_treasure());

    let report = MissionReport {
        player: &player.name,
        date: now(),
        result: if victory { "VICTORY" } else { "DEFEAT" },
        path_taken: player.history(),
        final_power: player.power,
        riddles_solved: &player.solved_riddles,
        effects_applied: &player.applied_effects,
        events_encountered: &player.encountered_events,
        items_found: player.items.iter().map(ToString::to_string).collect(),
        statistics: Statistics {
            total_riddles_encountered: player.solved_riddles.len(),
            total_effects_applied: player.applied_effects.len(),
            total_events_encountered: player.encountered_events.len(),
            total_moves: player.moves,
            final_power_percentage: player.power_percentage(),
            game_status: if victory {
                "COMPLETED_SUCCESSFULLY"
            } else {
                "ABANDONED_OR_DEFEATED"
            },
        },
    };

    let path = dir.join(report_file_name(&player.name));
    write_json(&path, &report)?;
    tracing::info!(path = %path.display(), "mission report saved");
    Ok(path)
}

/// Write `report_match.json` covering every player into `dir`.
pub fn export_match_summary(
    players: &[Player],
    winner: Option<&Player>,
    dir: &Path,
) -> Result<PathBuf> {
    let summary = MatchSummary {
        date: now(),
        winner: winner.map_or("NONE", |w| w.name.as_str()),
        players: players
            .iter()
            .map(|p| PlayerSummary {
                name: &p.name,
                power: p.power,
                current_room: p.room_id().unwrap_or("UNKNOWN"),
                path_taken: p.history(),
                riddles_solved: &p.solved_riddles,
                effects_applied: &p.applied_effects,
                events_encountered: &p.encountered_events,
            })
            .collect(),
    };

    let path = dir.join(MATCH_REPORT_FILE);
    write_json(&path, &summary)?;
    tracing::info!(path = %path.display(), "match summary saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Effect, Item, Room};
    use serde_json::Value;
    use tempfile::TempDir;

    fn maze() -> Maze {
        let mut maze = Maze::new();
        maze.add_room(Room::entrance("E1", "Gate")).unwrap();
        maze.add_room(Room::treasure("C1", "Vault")).unwrap();
        maze.add_corridor("E1", "C1", 1.0, None).unwrap();
        maze
    }

    fn read(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_report_file_name_collapses_whitespace() {
        assert_eq!(report_file_name("Ana"), "report_Ana.json");
        assert_eq!(report_file_name("Ana  Maria\tSilva"), "report_Ana_Maria_Silva.json");
    }

    #[test]
    fn test_mission_report_victory() {
        let tmp = TempDir::new().unwrap();
        let mut player = Player::human("Ana Maria", 100);
        player.enter_room("E1");
        player.enter_room("C1");
        player.moves = 1;
        player.update_power(-25);
        player.record_effect("DAMAGE");
        player.record_item(Item::new("Potion", Effect::Heal));

        let path = export_mission_report(&player, &maze(), tmp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "report_Ana_Maria.json");

        let json = read(&path);
        assert_eq!(json["player"], "Ana Maria");
        assert_eq!(json["result"], "VICTORY");
        assert_eq!(json["path_taken"], serde_json::json!(["E1", "C1"]));
        assert_eq!(json["final_power"], 75);
        assert_eq!(json["items_found"][0], "Potion (HEAL)");
        assert_eq!(json["statistics"]["total_effects_applied"], 1);
        assert_eq!(json["statistics"]["total_moves"], 1);
        assert_eq!(json["statistics"]["final_power_percentage"], 75);
        assert_eq!(json["statistics"]["game_status"], "COMPLETED_SUCCESSFULLY");
        assert!(json["date"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn test_mission_report_defeat() {
        let tmp = TempDir::new().unwrap();
        let mut player = Player::human("Bot_1", 100);
        player.enter_room("E1");

        let json = read(&export_mission_report(&player, &maze(), tmp.path()).unwrap());
        assert_eq!(json["result"], "DEFEAT");
        assert_eq!(json["statistics"]["game_status"], "ABANDONED_OR_DEFEATED");
    }

    #[test]
    fn test_match_summary() {
        let tmp = TempDir::new().unwrap();
        let mut winner = Player::human("Ana", 100);
        winner.enter_room("C1");
        let idle = Player::human("Rui", 100);
        let players = vec![winner.clone(), idle];

        let path = export_match_summary(&players, Some(&winner), tmp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), MATCH_REPORT_FILE);

        let json = read(&path);
        assert_eq!(json["winner"], "Ana");
        assert_eq!(json["players"][0]["current_room"], "C1");
        assert_eq!(json["players"][1]["current_room"], "UNKNOWN");

        let json = read(&export_match_summary(&players, None, tmp.path()).unwrap());
        assert_eq!(json["winner"], "NONE");
    }
}
