//! Players: humans and bots moving through the maze.

use std::fmt;

use super::effect::Item;
use crate::dice::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStrategy {
    /// Follows the shortest path to the treasure, with occasional mistakes.
    Smart,
    Random,
}

impl fmt::Display for BotStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotStrategy::Smart => write!(f, "smart"),
            BotStrategy::Random => write!(f, "random"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Bot(BotStrategy),
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub kind: PlayerKind,
    pub current_room: Option<String>,
    pub power: i64,
    /// Power at creation, the reference for percentages.
    pub starting_power: i64,
    pub skip_next_turn: bool,
    /// Turns to play right after the current one.
    pub extra_turns: u32,
    /// Room received in the most recent swap. Receding never goes past it.
    pub last_swapped_room: Option<String>,
    history: Vec<String>,
    pub solved_riddles: Vec<String>,
    pub applied_effects: Vec<String>,
    pub encountered_events: Vec<String>,
    pub items: Vec<Item>,
    pub moves: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, kind: PlayerKind, starting_power: i64) -> Self {
        Self {
            name: name.into(),
            kind,
            current_room: None,
            power: starting_power,
            starting_power,
            skip_next_turn: false,
            extra_turns: 0,
            last_swapped_room: None,
            history: Vec::new(),
            solved_riddles: Vec::new(),
            applied_effects: Vec::new(),
            encountered_events: Vec::new(),
            items: Vec::new(),
            moves: 0,
        }
    }

    pub fn human(name: impl Into<String>, starting_power: i64) -> Self {
        Self::new(name, PlayerKind::Human, starting_power)
    }

    /// A bot whose strategy is a coin flip.
    pub fn bot(name: impl Into<String>, starting_power: i64, dice: &mut dyn Dice) -> Self {
        let strategy = if dice.chance(0.5) {
            BotStrategy::Smart
        } else {
            BotStrategy::Random
        };
        Self::new(name, PlayerKind::Bot(strategy), starting_power)
    }

    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    pub fn strategy(&self) -> Option<BotStrategy> {
        match self.kind {
            PlayerKind::Bot(strategy) => Some(strategy),
            PlayerKind::Human => None,
        }
    }

    pub fn room_id(&self) -> Option<&str> {
        self.current_room.as_deref()
    }

    /// Move into a room, remembering it in the history.
    pub fn enter_room(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.history.push(id.clone());
        self.current_room = Some(id);
    }

    /// Teleport (swap, recede). Same bookkeeping as `enter_room`.
    pub fn place(&mut self, id: impl Into<String>) {
        self.enter_room(id);
    }

    /// Add `delta` to the power, never dropping below zero.
    pub fn update_power(&mut self, delta: i64) {
        self.power = (self.power + delta).max(0);
    }

    pub fn is_alive(&self) -> bool {
        self.power > 0
    }

    /// Current power as a percentage of the starting power.
    pub fn power_percentage(&self) -> i64 {
        if self.starting_power <= 0 {
            return 0;
        }
        self.power * 100 / self.starting_power
    }

    /// Visited room ids, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_label(&self) -> String {
        self.history.join(" -> ")
    }

    pub fn record_riddle(&mut self, question: impl Into<String>) {
        self.solved_riddles.push(question.into());
    }

    pub fn record_effect(&mut self, effect: impl Into<String>) {
        self.applied_effects.push(effect.into());
    }

    pub fn record_event(&mut self, event: impl Into<String>) {
        self.encountered_events.push(event.into());
    }

    pub fn record_item(&mut self, item: Item) {
        self.items.push(item);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            PlayerKind::Human => write!(f, "{}", self.name),
            PlayerKind::Bot(strategy) => write!(f, "{} (bot, {})", self.name, strategy),
        }
    }
}
