//! Text map editor.
//!
//! Builds a maze room by room and saves it in the map file format so it
//! can be picked from the new-game menu later.

use std::path::{Path, PathBuf};

use crate::console::Console;
use crate::model::{Effect, Maze, RandomEvent, Room};
use crate::storage;
use crate::ui::colors;

const ROOM_TYPES: &str = "ENTRADA, TESOURO, ENIGMA, ALAVANCA, NORMAL";

pub struct MapEditor<'a, C: Console> {
    console: &'a mut C,
    maps_dir: PathBuf,
    /// Never overwritten by a save.
    riddles_file: Option<PathBuf>,
    maze: Maze,
}

impl<'a, C: Console> MapEditor<'a, C> {
    pub fn new(console: &'a mut C, maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            console,
            maps_dir: maps_dir.into(),
            riddles_file: None,
            maze: Maze::new(),
        }
    }

    pub fn with_riddles_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.riddles_file = Some(path.into());
        self
    }

    fn is_riddles_file(&self, path: &Path) -> bool {
        let name = |p: &Path| p.file_name().map(|n| n.to_string_lossy().to_lowercase());
        self.riddles_file
            .as_deref()
            .is_some_and(|riddles| name(riddles).is_some() && name(riddles) == name(path))
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Run the editor menu until the user leaves or input runs out.
    pub fn run(&mut self) {
        loop {
            self.console.say("");
            self.console.say(&colors::heading("=== MAP EDITOR ===").to_string());
            self.console.say("1. Add room");
            self.console.say("2. Add corridor");
            self.console.say("3. List maze");
            self.console.say("4. Save map");
            self.console.say("5. Add corridor with event");
            self.console.say("0. Exit");

            let Some(choice) = self.console.prompt_number("\nChoose an option: ") else {
                return;
            };
            let keep_going = match choice {
                1 => self.add_room(),
                2 => self.add_corridor(false),
                3 => {
                    let listing = self.maze.to_string();
                    self.console.say(&listing);
                    true
                }
                4 => self.save(),
                5 => self.add_corridor(true),
                0 => return,
                _ => {
                    self.console.say("Invalid option.");
                    true
                }
            };
            if !keep_going {
                return;
            }
        }
    }

    /// Each step returns `false` when input ran out mid-way.
    fn add_room(&mut self) -> bool {
        let Some(id) = self.console.prompt("ID: ") else {
            return false;
        };
        let Some(kind) = self.console.prompt(&format!("Type ({}): ", ROOM_TYPES)) else {
            return false;
        };
        let Some(description) = self.console.prompt("Description: ") else {
            return false;
        };

        let id = id.trim();
        if id.is_empty() {
            self.console.say(&colors::error("The room id cannot be empty.").to_string());
            return true;
        }

        let room = Room::from_tag(id, Some(kind.as_str()), description.trim());
        match self.maze.add_room(room) {
            Ok(()) => self.console.say(&colors::success("Room added!").to_string()),
            Err(err) => self.console.say(&colors::error(&err.to_string()).to_string()),
        }
        true
    }

    fn add_corridor(&mut self, with_event: bool) -> bool {
        let Some(from) = self.console.prompt("From (ID): ") else {
            return false;
        };
        let Some(to) = self.console.prompt("To (ID): ") else {
            return false;
        };
        let Some(cost) = self.prompt_cost() else {
            return false;
        };
        let event = if with_event {
            match self.prompt_event() {
                Some(event) => event,
                None => return false,
            }
        } else {
            None
        };

        match self.maze.add_corridor(from.trim(), to.trim(), cost, event) {
            Ok(()) => self.console.say(&colors::success("Corridor added!").to_string()),
            Err(err) => self.console.say(&colors::error(&err.to_string()).to_string()),
        }
        true
    }

    fn prompt_cost(&mut self) -> Option<f64> {
        loop {
            let line = self.console.prompt("Cost: ")?;
            match line.trim().parse::<f64>() {
                Ok(cost) if cost.is_finite() && cost >= 0.0 => return Some(cost),
                _ => self.console.say("Please enter a valid cost!"),
            }
        }
    }

    /// `Some(None)` when the user declines to attach an event.
    fn prompt_event(&mut self) -> Option<Option<RandomEvent>> {
        if !self.console.confirm("Add an event to the corridor? (y/n) ") {
            return Some(None);
        }

        let description = self.console.prompt("Event description: ")?;
        let description = match description.trim() {
            "" => "Mysterious event".to_string(),
            text => text.to_string(),
        };

        self.console.say("Effect (optional). Pick one of the options or leave it empty:");
        for effect in Effect::ALL {
            self.console.say(&format!(" - {}", effect));
        }
        let raw = self.console.prompt("Effect: ")?;
        let effect = match raw.trim() {
            "" => None,
            text => match text.parse::<Effect>() {
                Ok(effect) => Some(effect),
                Err(_) => {
                    self.console
                        .say("Unknown effect. The event will be descriptive only.");
                    None
                }
            },
        };

        Some(Some(RandomEvent::new(description, effect)))
    }

    fn save(&mut self) -> bool {
        let Some(name) = self.console.prompt("File name (without .json): ") else {
            return false;
        };
        let name = name.trim().trim_end_matches(".json").to_string();
        if name.is_empty() {
            self.console.say(&colors::error("The file name cannot be empty.").to_string());
            return true;
        }

        let path = self.maps_dir.join(format!("{}.json", name));
        if self.is_riddles_file(&path) {
            let text = format!("{}.json holds the riddles, choose another name.", name);
            self.console.say(&colors::error(&text).to_string());
            return true;
        }

        self.maze.set_name(&name);
        match storage::save_maze(&self.maze, &path) {
            Ok(()) => {
                self.console
                    .say(&colors::success(&format!("Map saved as {}", path.display())).to_string());
                tracing::info!(path = %path.display(), "map saved from editor");
            }
            Err(err) => self
                .console
                .say(&colors::error(&format!("Failed to save: {}", err)).to_string()),
        }
        true
    }
}
