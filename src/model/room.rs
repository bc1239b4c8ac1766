//! Rooms (maze vertices) and their per-kind state.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::riddle::Riddle;
use crate::dice::Dice;

#[derive(Debug, Clone, PartialEq)]
pub enum RoomKind {
    /// Possible starting location.
    Entrance,
    /// The center of the maze. First player to arrive wins.
    Treasure,
    Standard,
    Riddle { riddle: Option<Riddle>, solved: bool },
    Lever { solved: bool, attempts: u32 },
}

/// Result of pulling a lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeverOutcome {
    /// The passage opens.
    Correct,
    /// Nothing happens; try again on a later turn.
    Incorrect,
    AlreadySolved,
}

#[derive(Debug, Clone)]
pub struct Room {
    pub id: String,
    pub description: String,
    pub kind: RoomKind,
}

impl Room {
    pub fn new(id: impl Into<String>, description: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            kind,
        }
    }

    pub fn entrance(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, description, RoomKind::Entrance)
    }

    pub fn treasure(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, description, RoomKind::Treasure)
    }

    pub fn standard(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(id, description, RoomKind::Standard)
    }

    pub fn riddle(
        id: impl Into<String>,
        description: impl Into<String>,
        riddle: Option<Riddle>,
    ) -> Self {
        Self::new(
            id,
            description,
            RoomKind::Riddle {
                riddle,
                solved: false,
            },
        )
    }

    pub fn lever(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(
            id,
            description,
            RoomKind::Lever {
                solved: false,
                attempts: 0,
            },
        )
    }

    /// Build a room from a map file type tag.
    ///
    /// Unknown or missing tags produce a standard room. Riddle rooms start
    /// without a riddle; the loader assigns one.
    pub fn from_tag(id: &str, tag: Option<&str>, description: &str) -> Self {
        let kind = match tag.map(|t| t.trim().to_uppercase()).as_deref() {
            Some("ENTRADA") | Some("ENTRANCE") => RoomKind::Entrance,
            Some("TESOURO") | Some("CENTER") | Some("TREASURE") => RoomKind::Treasure,
            Some("ENIGMA") | Some("RIDDLE") => RoomKind::Riddle {
                riddle: None,
                solved: false,
            },
            Some("ALAVANCA") | Some("LEVER") => RoomKind::Lever {
                solved: false,
                attempts: 0,
            },
            _ => RoomKind::Standard,
        };
        Self::new(id, description, kind)
    }

    /// Type tag written to map files.
    pub fn tag(&self) -> &'static str {
        match self.kind {
            RoomKind::Entrance => "ENTRADA",
            RoomKind::Treasure => "TESOURO",
            RoomKind::Riddle { .. } => "ENIGMA",
            RoomKind::Lever { .. } => "ALAVANCA",
            RoomKind::Standard => "NORMAL",
        }
    }

    pub fn is_entrance(&self) -> bool {
        matches!(self.kind, RoomKind::Entrance)
    }

    pub fn is_treasure(&self) -> bool {
        matches!(self.kind, RoomKind::Treasure)
    }

    pub fn is_riddle(&self) -> bool {
        matches!(self.kind, RoomKind::Riddle { .. })
    }

    pub fn is_lever(&self) -> bool {
        matches!(self.kind, RoomKind::Lever { .. })
    }

    pub fn riddle_ref(&self) -> Option<&Riddle> {
        match &self.kind {
            RoomKind::Riddle { riddle, .. } => riddle.as_ref(),
            _ => None,
        }
    }

    /// Riddle solved or lever activated. `false` for other kinds.
    pub fn is_solved(&self) -> bool {
        match self.kind {
            RoomKind::Riddle { solved, .. } | RoomKind::Lever { solved, .. } => solved,
            _ => false,
        }
    }

    pub fn set_solved(&mut self, value: bool) {
        match &mut self.kind {
            RoomKind::Riddle { solved, .. } | RoomKind::Lever { solved, .. } => *solved = value,
            _ => {}
        }
    }

    pub fn set_riddle(&mut self, new_riddle: Riddle) {
        if let RoomKind::Riddle { riddle, .. } = &mut self.kind {
            *riddle = Some(new_riddle);
        }
    }

    /// A riddle room holds its occupant until the riddle is answered.
    /// A riddle room without a riddle never blocks.
    pub fn blocks_exit(&self) -> bool {
        match &self.kind {
            RoomKind::Riddle { riddle, solved } => riddle.is_some() && !solved,
            _ => false,
        }
    }

    pub fn lever_attempts(&self) -> u32 {
        match self.kind {
            RoomKind::Lever { attempts, .. } => attempts,
            _ => 0,
        }
    }

    /// Try the lever in this room.
    ///
    /// Non-lever rooms answer `AlreadySolved` so callers never loop on them.
    pub fn attempt_lever(&mut self, dice: &mut dyn Dice, success_chance: f64) -> LeverOutcome {
        match &mut self.kind {
            RoomKind::Lever { solved, attempts } => {
                if *solved {
                    return LeverOutcome::AlreadySolved;
                }
                *attempts += 1;
                if dice.chance(success_chance) {
                    *solved = true;
                    LeverOutcome::Correct
                } else {
                    LeverOutcome::Incorrect
                }
            }
            _ => LeverOutcome::AlreadySolved,
        }
    }

    /// Text shown to a player entering the room.
    pub fn entry_message(&self) -> String {
        match &self.kind {
            RoomKind::Entrance => format!(
                "You are at the entrance: {}\nThe adventure starts here!",
                self.description
            ),
            RoomKind::Treasure => format!("You found the treasure: {}", self.description),
            RoomKind::Standard => format!("You entered a normal room: {}", self.description),
            RoomKind::Riddle { solved, .. } => {
                if *solved {
                    format!(
                        "Riddle: {}\nThe guardian lets you pass.",
                        self.description
                    )
                } else {
                    format!(
                        "Riddle: {}\nYou must answer to get through!",
                        self.description
                    )
                }
            }
            RoomKind::Lever { solved, .. } => {
                if *solved {
                    format!(
                        "{}\nThe lever has been pulled. The way is open.",
                        self.description
                    )
                } else {
                    format!(
                        "{}\nA mysterious lever sits on the wall. Can you activate it?",
                        self.description
                    )
                }
            }
        }
    }
}

impl PartialEq for Room {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Room {}

impl Hash for Room {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.id, self.description)
    }
}
