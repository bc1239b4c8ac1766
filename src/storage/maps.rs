//! Map files.
//!
//! ```json
//! { "nome": "...",
//!   "salas": [ { "id", "tipo", "descricao" } ],
//!   "ligacoes": [ { "origem", "destino", "custo",
//!                   "evento": { "descricao", "efeito", "item": { "nome", "efeito" } } } ] }
//! ```
//!
//! Loading is lenient: bad rooms and corridors are skipped with a warning.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GameError, Result};
use crate::model::{Effect, Item, Maze, RandomEvent, Riddle, Room};

const UNKNOWN_MAP_NAME: &str = "Unknown Map";
const DEFAULT_EVENT_DESCRIPTION: &str = "Mysterious event";
const DEFAULT_COST: f64 = 1.0;

/// A map shipped with the game, listed first in the new-game menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownMap {
    pub file: &'static str,
    pub label: &'static str,
}

pub const KNOWN_MAPS: [KnownMap; 4] = [
    KnownMap {
        file: "mapa_facil.json",
        label: "Easy",
    },
    KnownMap {
        file: "mapa_medio.json",
        label: "Medium",
    },
    KnownMap {
        file: "mapa_dificil.json",
        label: "Hard",
    },
    KnownMap {
        file: "mapa_epico.json",
        label: "Epic",
    },
];

#[derive(Debug, Serialize, Deserialize)]
struct MapFile {
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    salas: Option<Vec<Value>>,
    #[serde(default)]
    ligacoes: Option<Vec<Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RoomEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    tipo: Option<String>,
    #[serde(default)]
    descricao: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CorridorEntry {
    #[serde(default)]
    origem: Option<String>,
    #[serde(default)]
    destino: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custo: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evento: Option<EventEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EventEntry {
    #[serde(default)]
    descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    efeito: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    item: Option<ItemEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ItemEntry {
    #[serde(default)]
    nome: Option<String>,
    #[serde(default)]
    efeito: Option<String>,
}

/// Hands out riddles in file order, starting over once all have been used.
#[derive(Debug, Default)]
struct RiddlePool {
    available: VecDeque<Riddle>,
    used: Vec<Riddle>,
}

impl RiddlePool {
    fn new(riddles: Vec<Riddle>) -> Self {
        Self {
            available: riddles.into(),
            used: Vec::new(),
        }
    }

    fn draw(&mut self) -> Option<Riddle> {
        if self.available.is_empty() && !self.used.is_empty() {
            tracing::debug!("all riddles used, cycling the pool");
            self.available.extend(self.used.drain(..));
        }
        let riddle = self.available.pop_front()?;
        self.used.push(riddle.clone());
        Some(riddle)
    }
}

/// Load a maze, assigning riddles to riddle rooms from `riddles`.
pub fn load_maze(path: &Path, riddles: Vec<Riddle>) -> Result<Maze> {
    if !path.exists() {
        return Err(GameError::MapNotFound(path.display().to_string()));
    }
    let content = fs::read_to_string(path)?;
    parse_maze(&content, riddles).map_err(|message| GameError::InvalidJson {
        path: path.display().to_string(),
        message,
    })
}

pub(crate) fn parse_maze(
    content: &str,
    riddles: Vec<Riddle>,
) -> std::result::Result<Maze, String> {
    let file: MapFile = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let name = file.nome.unwrap_or_else(|| {
        tracing::warn!("map has no 'nome' field");
        UNKNOWN_MAP_NAME.to_string()
    });
    let mut maze = Maze::named(name);

    let rooms = file.salas.unwrap_or_default();
    if rooms.is_empty() {
        tracing::warn!(map = maze.name(), "map has no rooms ('salas')");
        return Ok(maze);
    }

    let mut pool = RiddlePool::new(riddles);
    for value in rooms {
        let entry: RoomEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping malformed room: {}", err);
                continue;
            }
        };
        let Some(id) = entry.id.filter(|id| !id.is_empty()) else {
            tracing::warn!("skipping room without id");
            continue;
        };
        if maze.contains(&id) {
            tracing::warn!("skipping room: {}", GameError::DuplicateRoom(id));
            continue;
        }

        let mut room = Room::from_tag(
            &id,
            entry.tipo.as_deref(),
            entry.descricao.as_deref().unwrap_or_default(),
        );
        if room.is_riddle() {
            if let Some(riddle) = pool.draw() {
                room.set_riddle(riddle);
            }
        }
        if let Err(err) = maze.add_room(room) {
            tracing::warn!("skipping room: {}", err);
        }
    }

    for value in file.ligacoes.unwrap_or_default() {
        let entry: CorridorEntry = match serde_json::from_value(value) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("skipping malformed corridor: {}", err);
                continue;
            }
        };
        let (Some(from), Some(to)) = (
            entry.origem.filter(|s| !s.is_empty()),
            entry.destino.filter(|s| !s.is_empty()),
        ) else {
            tracing::warn!("skipping corridor with missing endpoints");
            continue;
        };

        let cost = parse_cost(entry.custo.as_ref(), &from, &to);
        let event = entry.evento.map(parse_event);
        if let Err(err) = maze.add_corridor(&from, &to, cost, event) {
            tracing::warn!("skipping corridor {} -> {}: {}", from, to, err);
        }
    }

    tracing::info!(
        map = maze.name(),
        rooms = maze.len(),
        corridors = maze.corridors().len(),
        "map loaded"
    );
    Ok(maze)
}

fn parse_cost(value: Option<&Value>, from: &str, to: &str) -> f64 {
    let parsed = match value {
        None | Some(Value::Null) => return DEFAULT_COST,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(cost) if cost.is_finite() && cost >= 0.0 => cost,
        _ => {
            tracing::warn!("invalid cost for corridor {} -> {}, using {}", from, to, DEFAULT_COST);
            DEFAULT_COST
        }
    }
}

fn parse_effect(name: Option<&str>) -> Option<Effect> {
    let name = name.map(str::trim).filter(|n| !n.is_empty())?;
    match name.parse() {
        Ok(effect) => Some(effect),
        Err(err) => {
            tracing::warn!("{}", err);
            None
        }
    }
}

fn parse_event(entry: EventEntry) -> RandomEvent {
    let description = entry
        .descricao
        .unwrap_or_else(|| DEFAULT_EVENT_DESCRIPTION.to_string());
    let mut event = RandomEvent::new(description, parse_effect(entry.efeito.as_deref()));

    if let Some(item) = entry.item {
        match parse_effect(item.efeito.as_deref()) {
            Some(effect) => {
                let name = item.nome.unwrap_or_else(|| "Unknown item".to_string());
                event = event.with_item(Item::new(name, effect));
            }
            None => tracing::warn!("skipping item without a valid effect"),
        }
    }
    event
}

/// Write a maze in the map file format. Secret passages are left out.
pub fn save_maze(maze: &Maze, path: &Path) -> Result<()> {
    let salas = maze
        .rooms()
        .iter()
        .map(|room| {
            serde_json::to_value(RoomEntry {
                id: Some(room.id.clone()),
                tipo: Some(room.tag().to_string()),
                descricao: Some(room.description.clone()),
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let ligacoes = maze
        .corridors()
        .iter()
        .filter(|corridor| !corridor.secret)
        .map(|corridor| {
            serde_json::to_value(CorridorEntry {
                origem: Some(corridor.from.clone()),
                destino: Some(corridor.to.clone()),
                custo: serde_json::Number::from_f64(corridor.cost).map(Value::Number),
                evento: corridor.event.as_ref().map(|event| EventEntry {
                    descricao: Some(event.description.clone()),
                    efeito: event.effect.map(|e| e.name().to_string()),
                    item: event.item.as_ref().map(|item| ItemEntry {
                        nome: Some(item.name.clone()),
                        efeito: Some(item.effect.name().to_string()),
                    }),
                }),
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let file = MapFile {
        nome: Some(maze.name().to_string()),
        salas: Some(salas),
        ligacoes: Some(ligacoes),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(&file)?)?;
    tracing::debug!(path = %path.display(), "map saved");
    Ok(())
}

/// Map files in `dir`, sorted, without the riddles file.
pub fn discover_maps(dir: &Path, riddles_file: &Path) -> Vec<PathBuf> {
    let pattern = dir.join("*.json");
    let Some(pattern) = pattern.to_str() else {
        return Vec::new();
    };
    let riddles_name = riddles_file.file_name();

    let mut maps: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(paths) => paths
            .filter_map(|entry| entry.ok())
            .filter(|path| path.file_name() != riddles_name)
            .collect(),
        Err(err) => {
            tracing::warn!("invalid maps directory pattern: {}", err);
            Vec::new()
        }
    };
    maps.sort();
    maps
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SMALL_MAP: &str = r#"{
        "nome": "Small",
        "salas": [
            { "id": "E1", "tipo": "ENTRADA", "descricao": "Gate" },
            { "id": "R1", "tipo": "ENIGMA", "descricao": "Sphinx" },
            { "id": "R2", "tipo": "ENIGMA", "descricao": "Second sphinx" },
            { "id": "R3", "tipo": "ENIGMA", "descricao": "Third sphinx" },
            { "id": "C1", "tipo": "TESOURO", "descricao": "Treasure" }
        ],
        "ligacoes": [
            { "origem": "E1", "destino": "R1", "custo": 2,
              "evento": { "descricao": "Fountain", "efeito": "heal" } },
            { "origem": "R1", "destino": "C1", "custo": "3.5" }
        ]
    }"#;

    fn riddle(q: &str) -> Riddle {
        Riddle::new(q, vec!["a".to_string(), "b".to_string()], 0)
    }

    #[test]
    fn test_parse_small_map() {
        let maze = parse_maze(SMALL_MAP, vec![]).unwrap();
        assert_eq!(maze.name(), "Small");
        assert_eq!(maze.len(), 5);
        assert_eq!(maze.entrance().unwrap().id, "E1");
        assert_eq!(maze.treasure_room().unwrap().id, "C1");

        let corridor = maze.corridor_between("E1", "R1").unwrap();
        assert_eq!(corridor.cost, 2.0);
        let event = corridor.event.as_ref().unwrap();
        assert_eq!(event.effect, Some(Effect::Heal));

        assert_eq!(maze.corridor_between("C1", "R1").unwrap().cost, 3.5);
    }

    #[test]
    fn test_riddles_cycle_when_pool_runs_out() {
        let maze = parse_maze(SMALL_MAP, vec![riddle("first"), riddle("second")]).unwrap();
        let question = |id: &str| maze.room(id).unwrap().riddle_ref().unwrap().question.clone();
        assert_eq!(question("R1"), "first");
        assert_eq!(question("R2"), "second");
        assert_eq!(question("R3"), "first");
    }

    #[test]
    fn test_duplicate_riddle_room_keeps_its_riddle_for_the_next_room() {
        let json = r#"{
            "salas": [
                { "id": "R1", "tipo": "ENIGMA" },
                { "id": "R1", "tipo": "ENIGMA" },
                { "id": "R2", "tipo": "ENIGMA" }
            ]
        }"#;
        let maze = parse_maze(json, vec![riddle("first"), riddle("second")]).unwrap();
        let question = |id: &str| maze.room(id).unwrap().riddle_ref().unwrap().question.clone();
        assert_eq!(maze.len(), 2);
        assert_eq!(question("R1"), "first");
        assert_eq!(question("R2"), "second");
    }

    #[test]
    fn test_riddle_rooms_without_pool_stay_open() {
        let maze = parse_maze(SMALL_MAP, vec![]).unwrap();
        let room = maze.room("R1").unwrap();
        assert!(room.riddle_ref().is_none());
        assert!(!room.blocks_exit());
    }

    #[test]
    fn test_lenient_loading() {
        let json = r#"{
            "salas": [
                { "id": "A", "tipo": "ENTRADA" },
                { "tipo": "NORMAL", "descricao": "no id" },
                { "id": "A", "tipo": "NORMAL" },
                { "id": "B" },
                42
            ],
            "ligacoes": [
                { "origem": "A", "destino": "B", "custo": "cheap",
                  "evento": { "efeito": "LIGHTNING" } },
                { "origem": "A" },
                { "origem": "A", "destino": "Z" },
                { "origem": "B", "destino": "A", "custo": -4,
                  "evento": { "descricao": "Chest", "item": { "nome": "Potion", "efeito": "HEAL" } } }
            ]
        }"#;
        let maze = parse_maze(json, vec![]).unwrap();
        assert_eq!(maze.name(), UNKNOWN_MAP_NAME);
        assert_eq!(maze.len(), 2);
        assert_eq!(maze.corridors().len(), 2);

        let first = &maze.corridors()[0];
        assert_eq!(first.cost, DEFAULT_COST);
        let event = first.event.as_ref().unwrap();
        assert_eq!(event.description, DEFAULT_EVENT_DESCRIPTION);
        assert!(event.effect.is_none());

        let second = &maze.corridors()[1];
        assert_eq!(second.cost, DEFAULT_COST);
        let item = second.event.as_ref().unwrap().item.as_ref().unwrap();
        assert_eq!(item.name, "Potion");
        assert_eq!(item.effect, Effect::Heal);
    }

    #[test]
    fn test_no_rooms_gives_empty_maze() {
        let maze = parse_maze(r#"{ "nome": "Void" }"#, vec![]).unwrap();
        assert!(maze.is_empty());
        assert_eq!(maze.name(), "Void");
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_maze("{ \"nome\": ", vec![]).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_maze(&tmp.path().join("ghost.json"), vec![]).unwrap_err();
        assert!(matches!(err, GameError::MapNotFound(_)));
    }

    #[test]
    fn test_save_then_load_keeps_structure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("saved.json");

        let mut maze = parse_maze(SMALL_MAP, vec![]).unwrap();
        let mut dice = crate::dice::ScriptedDice::new();
        maze.create_secret_passage("E1", &mut dice).unwrap();
        save_maze(&maze, &path).unwrap();

        let reloaded = load_maze(&path, vec![]).unwrap();
        assert_eq!(reloaded.name(), "Small");
        assert_eq!(reloaded.len(), maze.len());
        // Secret passage is not persisted
        assert_eq!(reloaded.corridors().len(), 2);
        assert_eq!(
            reloaded.corridor_between("E1", "R1").unwrap().event,
            maze.corridor_between("E1", "R1").unwrap().event
        );
        assert!(reloaded.room("R2").unwrap().is_riddle());
    }

    #[test]
    fn test_discover_maps_skips_riddles_file() {
        let tmp = TempDir::new().unwrap();
        for name in ["b.json", "a.json", "enigmas.json", "notes.txt"] {
            fs::write(tmp.path().join(name), "{}").unwrap();
        }
        let maps = discover_maps(tmp.path(), Path::new("maps/enigmas.json"));
        let names: Vec<_> = maps
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_riddle_pool_order() {
        let mut pool = RiddlePool::new(vec![riddle("x")]);
        assert_eq!(pool.draw().unwrap().question, "x");
        assert_eq!(pool.draw().unwrap().question, "x");
        assert!(RiddlePool::default().draw().is_none());
    }
}
