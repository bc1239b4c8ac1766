//! Game domain: rooms, corridors, the maze graph, players and effects.
//!
//! These types hold state and enforce local rules only; turn flow lives in
//! [`crate::engine`].

pub mod corridor;
pub mod effect;
pub mod maze;
pub mod player;
pub mod riddle;
pub mod room;

pub use corridor::Corridor;
pub use effect::{Effect, Item, RandomEvent};
pub use maze::Maze;
pub use player::{BotStrategy, Player, PlayerKind};
pub use riddle::Riddle;
pub use room::{LeverOutcome, Room, RoomKind};
