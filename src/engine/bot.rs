//! Bot movement decisions.

use crate::dice::Dice;
use crate::model::{BotStrategy, Maze, Player};

/// What a bot chose to do this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotMove {
    /// Room to move into, `None` at a dead end.
    pub target: Option<String>,
    /// A smart bot that lost track of its route and moved at random.
    pub distracted: bool,
}

/// Decide where a bot goes next.
///
/// Smart bots follow the shortest path to the treasure unless distracted
/// (probability `error_chance`). Random bots, distracted bots and smart
/// bots without a route pick uniformly among the exits.
pub fn decide_move(
    player: &Player,
    maze: &Maze,
    dice: &mut dyn Dice,
    error_chance: f64,
) -> BotMove {
    let Some(current) = player.room_id() else {
        return BotMove {
            target: None,
            distracted: false,
        };
    };

    let mut distracted = false;
    if player.strategy() == Some(BotStrategy::Smart) {
        if dice.chance(error_chance) {
            distracted = true;
        } else if let Some(step) = next_step(maze, current) {
            return BotMove {
                target: Some(step),
                distracted,
            };
        }
    }

    let exits = maze.exits(current);
    let target = if exits.is_empty() {
        None
    } else {
        Some(exits[dice.pick(exits.len())].id.clone())
    };
    BotMove { target, distracted }
}

/// Second room on the cheapest route to the treasure.
fn next_step(maze: &Maze, from: &str) -> Option<String> {
    let treasure = maze.treasure_room()?;
    let path = maze.shortest_path(from, &treasure.id);
    path.get(1).map(|room| room.id.clone())
}
