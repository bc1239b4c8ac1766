//! Human and bot turns, and moving between rooms.

use super::effects::EffectOutcome;
use super::events::RiddleResult;
use super::{bot, GameEngine};
use crate::console::Console;
use crate::dice::Dice;
use crate::error::{GameError, Result};
use crate::ui;

/// How a single turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    /// The player reached the treasure.
    Won,
    Died,
    /// The player left the match (or input ran out).
    Quit,
}

impl<C: Console, D: Dice> GameEngine<C, D> {
    pub fn play_turn(&mut self, idx: usize) -> TurnOutcome {
        let name = self.players[idx].to_string();
        let heading = format!("\n>>> {}'s turn <<<", name);
        self.say(&ui::colors::heading(&heading).to_string());
        if self.players[idx].is_bot() {
            self.bot_turn(idx)
        } else {
            self.human_turn(idx)
        }
    }

    /// Location, power and exits of player `idx`.
    pub fn print_status(&mut self, idx: usize) {
        let player = &self.players[idx];
        let room = player.room_id().and_then(|id| self.maze.room(id));
        let location = room.map_or_else(|| "nowhere".to_string(), |r| r.to_string());
        let lines = [
            format!("--- Status of {} ---", player.name),
            format!("Location: {}", location),
            format!("Power: {}", ui::format::power_bar(player.power, player.starting_power)),
            format!(
                "Exits: [{}]",
                self.maze.available_exits_label(player.room_id())
            ),
        ];
        for line in lines {
            self.say(&line);
        }
    }

    fn human_turn(&mut self, idx: usize) -> TurnOutcome {
        self.print_status(idx);
        let Some(current) = self.players[idx].current_room.clone() else {
            return TurnOutcome::Continue;
        };

        if self.maze.room(&current).is_some_and(|r| r.blocks_exit()) {
            match self.handle_riddle(idx) {
                RiddleResult::Open => {}
                RiddleResult::Wrong => {
                    self.say("You are stuck here until the riddle is solved.");
                    return TurnOutcome::Continue;
                }
                RiddleResult::NoAnswer => return TurnOutcome::Quit,
            }
        }

        if self
            .maze
            .room(&current)
            .is_some_and(|r| r.is_lever() && !r.is_solved())
            && self.console.confirm("Pull the lever? (y/n) ")
        {
            self.handle_lever(idx);
        }

        loop {
            let exits: Vec<(String, String)> = self
                .maze
                .exits(&current)
                .iter()
                .map(|room| (room.id.clone(), room.description.clone()))
                .collect();
            if exits.is_empty() {
                self.say("Dead end! There is nowhere to go.");
                return TurnOutcome::Continue;
            }

            self.say("Where do you want to go?");
            for (i, (id, description)) in exits.iter().enumerate() {
                self.say(&format!("  {}. {} - {}", i + 1, id, description));
            }

            let Some(input) = self
                .console
                .prompt("Choose an exit number ('look' to see status, 'exit' to quit): ")
            else {
                return TurnOutcome::Quit;
            };
            let input = input.trim();

            let target = match input.to_lowercase().as_str() {
                "exit" | "quit" => {
                    self.say("Leaving the game...");
                    return TurnOutcome::Quit;
                }
                "look" => {
                    self.print_status(idx);
                    continue;
                }
                _ => match input.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= exits.len() => exits[n - 1].0.clone(),
                    Ok(_) => {
                        self.say("Invalid option. Pick one of the listed numbers.");
                        continue;
                    }
                    Err(_) => match exits.iter().find(|(id, _)| id.eq_ignore_ascii_case(input)) {
                        Some((id, _)) => id.clone(),
                        None => {
                            self.say("Invalid command.");
                            continue;
                        }
                    },
                },
            };

            match self.move_player(idx, &target) {
                Ok(outcome) => return outcome,
                Err(err) => self.say(&ui::colors::error(&err.to_string()).to_string()),
            }
        }
    }

    fn bot_turn(&mut self, idx: usize) -> TurnOutcome {
        let Some(current) = self.players[idx].current_room.clone() else {
            return TurnOutcome::Continue;
        };
        let name = self.players[idx].name.clone();
        self.say(&format!(
            "{} is in {} (power: {})",
            name, current, self.players[idx].power
        ));

        let lever_ready = self
            .maze
            .room(&current)
            .is_some_and(|r| r.is_lever() && !r.is_solved());
        if lever_ready && self.dice.chance(self.config.game.bot_lever_chance) {
            self.handle_lever(idx);
        }

        if self.maze.room(&current).is_some_and(|r| r.blocks_exit()) {
            self.handle_bot_riddle(idx);
            return TurnOutcome::Continue;
        }

        let decision = bot::decide_move(
            &self.players[idx],
            &self.maze,
            &mut self.dice,
            self.config.game.bot_error_chance,
        );
        if decision.distracted {
            self.say(&format!("{} got distracted and wanders around...", name));
        }
        let Some(target) = decision.target else {
            self.say(&format!("{} is at a dead end and passes the turn.", name));
            return TurnOutcome::Continue;
        };

        self.say(&format!("{} decides to move to {}", name, target));
        match self.move_player(idx, &target) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(bot = %name, error = %err, "bot move rejected");
                TurnOutcome::Continue
            }
        }
    }

    /// Move player `idx` through the corridor to `target`.
    ///
    /// Fails with [`GameError::InvalidMove`] when `target` is not an exit of
    /// the current room. Leaving an unsolved riddle room is refused without
    /// error.
    pub fn move_player(&mut self, idx: usize, target: &str) -> Result<TurnOutcome> {
        let from = self.players[idx].current_room.clone().ok_or_else(|| {
            GameError::NoSuchRoom(format!("{} is not in the maze", self.players[idx].name))
        })?;

        if self.maze.room(&from).is_some_and(|r| r.blocks_exit()) {
            self.say("You must solve the riddle before leaving this room!");
            return Ok(TurnOutcome::Continue);
        }

        let target_id = self
            .maze
            .find_exit(&from, target)
            .map(|room| room.id.clone())
            .ok_or_else(|| GameError::InvalidMove {
                from: from.clone(),
                target: target.to_string(),
            })?;

        let name = self.players[idx].name.clone();
        let event = self
            .maze
            .corridor_between(&from, &target_id)
            .and_then(|corridor| corridor.event.clone());
        if let Some(event) = event {
            let text = format!("Event: {}", event.description);
            self.say(&ui::colors::warning(&text).to_string());
            self.journal(&format!("{} triggered event '{}'", name, event.description));
            match self.apply_event(idx, &event) {
                EffectOutcome::Died => return Ok(TurnOutcome::Died),
                EffectOutcome::Displaced => return Ok(TurnOutcome::Continue),
                EffectOutcome::Continue => {}
            }
        }

        let player = &mut self.players[idx];
        player.enter_room(target_id.clone());
        player.moves += 1;

        let Some((message, treasure, riddle, lever)) = self.maze.room(&target_id).map(|room| {
            (
                room.entry_message(),
                room.is_treasure(),
                room.blocks_exit(),
                room.is_lever() && !room.is_solved(),
            )
        }) else {
            return Ok(TurnOutcome::Continue);
        };

        self.say(&format!(">> {} entered {}", name, target_id));
        self.say(&message);
        self.journal(&format!("{} moved {} -> {}", name, from, target_id));

        if treasure {
            return Ok(TurnOutcome::Won);
        }

        let is_bot = self.players[idx].is_bot();
        if riddle {
            let result = if is_bot {
                self.handle_bot_riddle(idx)
            } else {
                self.handle_riddle(idx)
            };
            if result == RiddleResult::NoAnswer {
                return Ok(TurnOutcome::Quit);
            }
        } else if lever {
            self.handle_lever(idx);
        }
        Ok(TurnOutcome::Continue)
    }
}
