//! Corridor events and the effects they apply to players.

use super::GameEngine;
use crate::console::Console;
use crate::dice::Dice;
use crate::model::{Effect, Player, RandomEvent};

/// Result of applying an effect to the moving player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectOutcome {
    Continue,
    /// The player was moved elsewhere; a move in progress stops.
    Displaced,
    Died,
}

impl EffectOutcome {
    /// Keep the most severe of two outcomes.
    fn worst(self, other: EffectOutcome) -> EffectOutcome {
        use EffectOutcome::*;
        match (self, other) {
            (Died, _) | (_, Died) => Died,
            (Displaced, _) | (_, Displaced) => Displaced,
            _ => Continue,
        }
    }
}

/// Room a player recedes to after going back `steps` rooms.
///
/// Walks the history backwards and never goes past the room received in
/// the last swap. `None` when the player cannot move back.
pub fn recede_target(player: &Player, steps: usize) -> Option<String> {
    let history = player.history();
    let last = history.len().checked_sub(1)?;
    let barrier = player.last_swapped_room.as_deref();

    let mut i = last;
    for _ in 0..steps {
        if i == 0 || barrier == Some(history[i].as_str()) {
            break;
        }
        i -= 1;
    }
    (i != last).then(|| history[i].clone())
}

impl<C: Console, D: Dice> GameEngine<C, D> {
    /// Apply a corridor event to player `idx`.
    ///
    /// The player may find the event's item first; its effect applies
    /// before the event's own effect.
    pub fn apply_event(&mut self, idx: usize, event: &RandomEvent) -> EffectOutcome {
        self.players[idx].record_event(event.description.clone());
        let mut outcome = EffectOutcome::Continue;

        if let Some(item) = &event.item {
            if self.dice.chance(self.config.game.item_find_chance) {
                let name = self.players[idx].name.clone();
                self.say(&format!("{} found an item: {}", name, item));
                self.journal(&format!("{} found {}", name, item));
                self.players[idx].record_item(item.clone());
                outcome = self.apply_effect(idx, item.effect);
                if outcome == EffectOutcome::Died {
                    return outcome;
                }
            }
        }

        if let Some(effect) = event.effect {
            outcome = outcome.worst(self.apply_effect(idx, effect));
        }
        outcome
    }

    pub fn apply_effect(&mut self, idx: usize, effect: Effect) -> EffectOutcome {
        let name = self.players[idx].name.clone();
        self.players[idx].record_effect(effect.name());
        self.journal(&format!("Effect {} applied to {}", effect, name));

        match effect {
            Effect::Damage | Effect::Trap => {
                let loss = effect.value().abs();
                let player = &mut self.players[idx];
                player.update_power(-loss);
                player.record_event("TRAP");
                let power = player.power;
                self.say(&format!("{} lost {} power! (power: {})", name, loss, power));
                if power <= 0 {
                    self.say(&format!("{} collapsed in the maze...", name));
                    self.journal(&format!("{} died", name));
                    return EffectOutcome::Died;
                }
            }
            Effect::Heal | Effect::BonusPower => {
                let gain = effect.value().abs();
                let player = &mut self.players[idx];
                player.update_power(gain);
                player.record_event("HEAL/BONUS");
                let power = player.power;
                self.say(&format!("{} gained {} power! (power: {})", name, gain, power));
            }
            Effect::SkipTurn => {
                self.players[idx].skip_next_turn = true;
                self.say(&format!("{} will lose the next turn.", name));
            }
            Effect::SwapPosition => self.swap_position(idx),
            Effect::SwapAll => {
                if self.swap_all() {
                    return EffectOutcome::Displaced;
                }
            }
            Effect::ExtraTurn => {
                self.players[idx].extra_turns += 1;
                self.say(&format!("{} earned an extra turn!", name));
            }
            Effect::Recede => {
                self.perform_recede(idx, effect.value().unsigned_abs() as usize);
                return EffectOutcome::Displaced;
            }
        }
        EffectOutcome::Continue
    }

    fn swap_position(&mut self, idx: usize) {
        let others: Vec<usize> = (0..self.players.len())
            .filter(|&i| i != idx && self.players[i].current_room.is_some())
            .collect();
        if others.is_empty() || self.players[idx].current_room.is_none() {
            self.say("There is no one to swap places with.");
            return;
        }

        let other = if self.players[idx].is_bot() {
            others[self.dice.pick(others.len())]
        } else {
            self.say("Choose a player to swap places with:");
            for (n, &i) in others.iter().enumerate() {
                let p = &self.players[i];
                let line = format!("  {}. {} (in {})", n + 1, p.name, p.room_id().unwrap_or("?"));
                self.say(&line);
            }
            let choice = self
                .console
                .prompt("Player number: ")
                .and_then(|line| line.trim().parse::<usize>().ok());
            match choice {
                Some(n) if n >= 1 && n <= others.len() => others[n - 1],
                _ => {
                    self.say("Invalid choice, swap cancelled.");
                    return;
                }
            }
        };

        let (Some(mine), Some(theirs)) = (
            self.players[idx].current_room.clone(),
            self.players[other].current_room.clone(),
        ) else {
            return;
        };

        let me = &mut self.players[idx];
        me.place(theirs.clone());
        me.last_swapped_room = Some(theirs.clone());
        let them = &mut self.players[other];
        them.place(mine.clone());
        them.last_swapped_room = Some(mine.clone());

        let text = format!(
            "{} swapped places with {} ({} <-> {})",
            self.players[idx].name, self.players[other].name, mine, theirs
        );
        self.say(&text);
        self.journal(&text);
    }

    /// Rotate everyone's room: player i takes the room of player i+1.
    /// Returns whether anything moved.
    fn swap_all(&mut self) -> bool {
        let placed: Vec<usize> = (0..self.players.len())
            .filter(|&i| self.players[i].current_room.is_some())
            .collect();
        if placed.len() < 2 {
            self.say("Not enough players to swap positions.");
            return false;
        }

        let rooms: Vec<String> = placed
            .iter()
            .filter_map(|&i| self.players[i].current_room.clone())
            .collect();
        for (n, &i) in placed.iter().enumerate() {
            let room = rooms[(n + 1) % rooms.len()].clone();
            let player = &mut self.players[i];
            player.place(room.clone());
            player.last_swapped_room = Some(room);
        }

        self.say("Chaos! Every player swapped positions!");
        self.journal("All players swapped positions");
        true
    }

    /// Send player `idx` back `steps` rooms along its history.
    pub fn perform_recede(&mut self, idx: usize, steps: usize) {
        let name = self.players[idx].name.clone();
        match recede_target(&self.players[idx], steps) {
            Some(room) => {
                self.players[idx].place(room.clone());
                self.say(&format!("{} was pushed back to {}.", name, room));
                self.journal(&format!("{} receded to {}", name, room));
            }
            None => self.say(&format!("{} has nowhere to go back to.", name)),
        }
    }
}
