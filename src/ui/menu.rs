//! Main menu and map selection.
//!
//! On a terminal the menus are `dialoguer` selects. With piped or scripted
//! input they fall back to numbered prompts read through the [`Console`].

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Config;
use crate::console::Console;
use crate::dice::Dice;
use crate::engine::{GameEngine, MatchOutcome};
use crate::storage::{discover_maps, KNOWN_MAPS};
use crate::ui::editor::MapEditor;
use crate::ui::{self, colors, format};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    Editor,
    Exit,
}

const MAIN_ITEMS: [(&str, MenuChoice); 3] = [
    ("New game", MenuChoice::NewGame),
    ("Map editor", MenuChoice::Editor),
    ("Exit", MenuChoice::Exit),
];

/// What the player picked on the map list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapChoice {
    Map(PathBuf),
    Custom,
    Back,
}

pub struct MainMenu<'a, C: Console, D: Dice> {
    config: &'a Config,
    console: &'a mut C,
    dice: &'a mut D,
    widgets: bool,
}

impl<'a, C: Console, D: Dice> MainMenu<'a, C, D> {
    pub fn new(config: &'a Config, console: &'a mut C, dice: &'a mut D) -> Self {
        Self {
            config,
            console,
            dice,
            widgets: ui::is_interactive(),
        }
    }

    /// Force numbered prompts even on a terminal.
    pub fn without_widgets(mut self) -> Self {
        self.widgets = false;
        self
    }

    pub fn run(&mut self) -> Result<()> {
        self.console
            .say(&colors::heading("\n=== GLORY MAZE ===").to_string());
        loop {
            match self.main_choice()? {
                Some(MenuChoice::NewGame) => {
                    if let Err(err) = self.new_game() {
                        self.console
                            .say(&colors::error(&format!("Error: {:#}", err)).to_string());
                    }
                }
                Some(MenuChoice::Editor) => {
                    MapEditor::new(&mut *self.console, self.config.maps_dir())
                        .with_riddles_file(self.config.riddles_file())
                        .run();
                }
                Some(MenuChoice::Exit) | None => {
                    self.console.say("Goodbye!");
                    return Ok(());
                }
            }
        }
    }

    /// `None` at end of input.
    fn main_choice(&mut self) -> Result<Option<MenuChoice>> {
        if self.widgets {
            let labels: Vec<&str> = MAIN_ITEMS.iter().map(|(label, _)| *label).collect();
            let picked = dialoguer::Select::new()
                .with_prompt("Main menu")
                .items(&labels)
                .default(0)
                .interact_opt()?;
            return Ok(picked.map(|i| MAIN_ITEMS[i].1));
        }

        self.console.say("");
        for (i, (label, _)) in MAIN_ITEMS.iter().enumerate() {
            self.console.say(&format!("{}. {}", i + 1, label));
        }
        loop {
            let Some(n) = self.console.prompt_number("Choose an option: ") else {
                return Ok(None);
            };
            match usize::try_from(n).ok().and_then(|n| n.checked_sub(1)) {
                Some(i) if i < MAIN_ITEMS.len() => return Ok(Some(MAIN_ITEMS[i].1)),
                _ => self.console.say("Invalid option."),
            }
        }
    }

    /// Pick a map and play it. Returns `None` when the user backed out.
    pub fn new_game(&mut self) -> Result<Option<MatchOutcome>> {
        let maps = map_entries(self.config);
        if maps.is_empty() {
            self.console.say(&format!(
                "No maps found in {}. Create one with the map editor.",
                self.config.maps_dir().display()
            ));
            return Ok(None);
        }

        let path = match self.map_choice(&maps)? {
            MapChoice::Map(path) => path,
            MapChoice::Custom => {
                let Some(name) = self.console.prompt("Map file name: ") else {
                    return Ok(None);
                };
                resolve_custom_map(&self.config.maps_dir(), name.trim())
            }
            MapChoice::Back => return Ok(None),
        };

        let mut engine = GameEngine::new(self.config.clone(), &mut *self.console, &mut *self.dice);
        let outcome = engine.play(&path)?;
        Ok(Some(outcome))
    }

    fn map_choice(&mut self, maps: &[(String, PathBuf)]) -> Result<MapChoice> {
        if self.widgets {
            let mut labels: Vec<&str> = maps.iter().map(|(label, _)| label.as_str()).collect();
            labels.push("Load custom map");
            labels.push("Back");
            let picked = dialoguer::Select::new()
                .with_prompt("Choose a map")
                .items(&labels)
                .default(0)
                .interact_opt()?;
            return Ok(match picked {
                Some(i) if i < maps.len() => MapChoice::Map(maps[i].1.clone()),
                Some(i) if i == maps.len() => MapChoice::Custom,
                _ => MapChoice::Back,
            });
        }

        self.console.say("\nAvailable maps:");
        for (i, (label, _)) in maps.iter().enumerate() {
            self.console.say(&format!("{}. {}", i + 1, label));
        }
        self.console.say(&format!("{}. Load custom map", maps.len() + 1));
        self.console.say("0. Back");

        loop {
            let Some(n) = self.console.prompt_number("Choose a map: ") else {
                return Ok(MapChoice::Back);
            };
            match usize::try_from(n) {
                Ok(0) => return Ok(MapChoice::Back),
                Ok(i) if i <= maps.len() => return Ok(MapChoice::Map(maps[i - 1].1.clone())),
                Ok(i) if i == maps.len() + 1 => return Ok(MapChoice::Custom),
                _ => self.console.say("Invalid option."),
            }
        }
    }
}

/// Maps offered by the new-game menu: the known catalogue first (only those
/// present on disk), then any other map in the maps directory.
pub fn map_entries(config: &Config) -> Vec<(String, PathBuf)> {
    let dir = config.maps_dir();
    let mut entries: Vec<(String, PathBuf)> = KNOWN_MAPS
        .iter()
        .map(|known| (known, dir.join(known.file)))
        .filter(|(_, path)| path.is_file())
        .map(|(known, path)| (format!("{} ({})", known.label, known.file), path))
        .collect();

    for path in discover_maps(&dir, &config.riddles_file()) {
        if !entries.iter().any(|(_, known)| known == &path) {
            entries.push((format::file_label(&path), path));
        }
    }
    entries
}

/// Resolve a user-typed map name. Existing paths are used as they are;
/// anything else gets `.json` appended if missing and is looked up in
/// `maps_dir`.
pub fn resolve_custom_map(maps_dir: &Path, name: &str) -> PathBuf {
    let direct = Path::new(name);
    if direct.is_file() {
        return direct.to_path_buf();
    }
    let file = if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    };
    maps_dir.join(file)
}
