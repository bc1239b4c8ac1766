//! Riddle and lever rooms.

use super::GameEngine;
use crate::console::Console;
use crate::dice::Dice;
use crate::model::LeverOutcome;

/// Result of posing a riddle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiddleResult {
    /// Solved now or earlier, or the room has no riddle.
    Open,
    Wrong,
    /// Input ran out before an answer.
    NoAnswer,
}

impl<C: Console, D: Dice> GameEngine<C, D> {
    /// Pose the riddle of the room player `idx` stands in.
    pub fn handle_riddle(&mut self, idx: usize) -> RiddleResult {
        let Some(room_id) = self.players[idx].current_room.clone() else {
            return RiddleResult::Open;
        };
        let Some((solved, riddle)) = self
            .maze
            .room(&room_id)
            .map(|room| (room.is_solved(), room.riddle_ref().cloned()))
        else {
            return RiddleResult::Open;
        };
        if solved {
            self.say("This riddle has already been solved.");
            return RiddleResult::Open;
        }
        let Some(riddle) = riddle else {
            return RiddleResult::Open;
        };

        self.say("\n--- RIDDLE ---");
        self.say(&riddle.question);
        for (i, option) in riddle.options.iter().enumerate() {
            self.say(&format!("{}. {}", i + 1, option));
        }

        let Some(answer) = self.console.prompt("Answer: ") else {
            return RiddleResult::NoAnswer;
        };
        let Ok(choice) = answer.trim().parse::<i64>() else {
            self.say("That is not a number. The guardian does not move.");
            return RiddleResult::Wrong;
        };

        if riddle.check_choice(choice) {
            self.solve_riddle(idx, &room_id, &riddle.question);
            RiddleResult::Open
        } else {
            let name = self.players[idx].name.clone();
            self.say("Wrong! You lost time.");
            self.journal(&format!("{} failed the riddle in {}", name, room_id));
            RiddleResult::Wrong
        }
    }

    /// A bot guesses one of the options at random.
    pub fn handle_bot_riddle(&mut self, idx: usize) -> RiddleResult {
        let Some(room_id) = self.players[idx].current_room.clone() else {
            return RiddleResult::Open;
        };
        let Some(riddle) = self
            .maze
            .room(&room_id)
            .filter(|room| !room.is_solved())
            .and_then(|room| room.riddle_ref().cloned())
        else {
            return RiddleResult::Open;
        };

        let name = self.players[idx].name.clone();
        let guess = self.dice.pick(riddle.options.len());
        self.say(&format!(
            "{} tries to answer: {}",
            name,
            riddle.options.get(guess).map(String::as_str).unwrap_or("?")
        ));

        if riddle.check_answer(guess) {
            self.solve_riddle(idx, &room_id, &riddle.question);
            RiddleResult::Open
        } else {
            self.say(&format!("{} got it wrong.", name));
            RiddleResult::Wrong
        }
    }

    fn solve_riddle(&mut self, idx: usize, room_id: &str, question: &str) {
        if let Some(room) = self.maze.room_mut(room_id) {
            room.set_solved(true);
        }
        self.players[idx].record_riddle(question);
        let name = self.players[idx].name.clone();
        self.say("Correct! You may continue.");
        self.journal(&format!("{} solved the riddle in {}", name, room_id));
    }

    /// Pull the lever in the room player `idx` stands in.
    pub fn handle_lever(&mut self, idx: usize) -> LeverOutcome {
        let Some(room_id) = self.players[idx].current_room.clone() else {
            return LeverOutcome::AlreadySolved;
        };
        let name = self.players[idx].name.clone();

        let state = self
            .maze
            .room(&room_id)
            .filter(|room| room.is_lever())
            .map(|room| room.is_solved());
        match state {
            Some(false) => {}
            Some(true) => {
                self.say("The lever has already been pulled.");
                return LeverOutcome::AlreadySolved;
            }
            None => return LeverOutcome::AlreadySolved,
        }

        self.players[idx].record_event(format!("Lever: {}", room_id));
        let chance = self.config.game.lever_success_chance;
        let outcome = match self.maze.room_mut(&room_id) {
            Some(room) => room.attempt_lever(&mut self.dice, chance),
            None => return LeverOutcome::AlreadySolved,
        };

        match outcome {
            LeverOutcome::Correct => {
                self.say(&format!("{} pulled the lever... something rumbles!", name));
                match self.maze.create_secret_passage(&room_id, &mut self.dice) {
                    Some(target) => {
                        self.say(&format!(
                            "A secret passage opened to {}! It is available to every player.",
                            target
                        ));
                        self.journal(&format!(
                            "{} opened a secret passage {} -> {}",
                            name, room_id, target
                        ));
                    }
                    None => self.say("The mechanism is jammed. No passage opened."),
                }
                self.players[idx].record_event("LEVER_UNLOCKED");
                self.maze.activate_lever(&room_id);
            }
            LeverOutcome::Incorrect => {
                self.say("Nothing happens. Try again on a later turn.");
                self.players[idx].record_event("LEVER_FAILED");
            }
            LeverOutcome::AlreadySolved => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::console::ScriptedConsole;
    use crate::dice::ScriptedDice;
    use crate::logging::GameLog;
    use crate::model::{Maze, Player, Riddle, Room};

    fn maze() -> Maze {
        let riddle = Riddle::new(
            "What has keys but opens no locks?",
            vec!["A door".to_string(), "A piano".to_string()],
            1,
        );
        let mut maze = Maze::new();
        maze.add_room(Room::entrance("E1", "Gate")).unwrap();
        maze.add_room(Room::riddle("R1", "Sphinx", Some(riddle))).unwrap();
        maze.add_room(Room::lever("L1", "Crank room")).unwrap();
        maze.add_room(Room::standard("S1", "Hall")).unwrap();
        maze.add_corridor("E1", "L1", 1.0, None).unwrap();
        maze
    }

    fn engine(
        lines: &[&str],
        dice: ScriptedDice,
        room: &str,
    ) -> GameEngine<ScriptedConsole, ScriptedDice> {
        let mut engine = GameEngine::with_journal(
            Config::default(),
            ScriptedConsole::new(lines.iter().copied()),
            dice,
            GameLog::disabled(),
        );
        engine.set_maze(maze());
        engine.add_player(Player::human("Ana", 100), room).unwrap();
        engine
    }

    #[test]
    fn test_correct_answer_solves_riddle() {
        let mut engine = engine(&["2"], ScriptedDice::new(), "R1");
        assert_eq!(engine.handle_riddle(0), RiddleResult::Open);
        assert!(engine.maze().room("R1").unwrap().is_solved());
        assert_eq!(engine.players()[0].solved_riddles.len(), 1);

        // Second visit
        assert_eq!(engine.handle_riddle(0), RiddleResult::Open);
        assert!(engine.console().saw("already been solved"));
    }

    #[test]
    fn test_wrong_answer_keeps_room_blocked() {
        let mut engine = engine(&["1", "piano"], ScriptedDice::new(), "R1");
        assert_eq!(engine.handle_riddle(0), RiddleResult::Wrong);
        assert_eq!(engine.handle_riddle(0), RiddleResult::Wrong);
        assert!(engine.console().saw("not a number"));
        assert!(engine.maze().room("R1").unwrap().blocks_exit());
        assert!(engine.players()[0].solved_riddles.is_empty());
    }

    #[test]
    fn test_riddle_without_input() {
        let mut engine = engine(&[], ScriptedDice::new(), "R1");
        assert_eq!(engine.handle_riddle(0), RiddleResult::NoAnswer);
    }

    #[test]
    fn test_bot_riddle_guess() {
        let mut engine = engine(&[], ScriptedDice::new().with_picks(&[0, 1]), "R1");
        assert_eq!(engine.handle_bot_riddle(0), RiddleResult::Wrong);
        assert_eq!(engine.handle_bot_riddle(0), RiddleResult::Open);
        assert!(engine.maze().room("R1").unwrap().is_solved());
    }

    #[test]
    fn test_lever_success_opens_passage() {
        let dice = ScriptedDice::new().with_chances(&[true]).with_picks(&[1]);
        let mut engine = engine(&[], dice, "L1");

        assert_eq!(engine.handle_lever(0), LeverOutcome::Correct);
        // Candidates: R1, S1 (E1 is already adjacent)
        let passage = engine.maze().corridor_between("L1", "S1").unwrap();
        assert!(passage.secret);
        assert!(engine.maze().is_lever_activated("L1"));
        assert_eq!(
            engine.players()[0].encountered_events,
            vec!["Lever: L1", "LEVER_UNLOCKED"]
        );

        assert_eq!(engine.handle_lever(0), LeverOutcome::AlreadySolved);
    }

    #[test]
    fn test_lever_failure() {
        let mut engine = engine(&[], ScriptedDice::new().with_chances(&[false]), "L1");
        assert_eq!(engine.handle_lever(0), LeverOutcome::Incorrect);
        assert!(!engine.maze().is_lever_activated("L1"));
        assert_eq!(
            engine.players()[0].encountered_events,
            vec!["Lever: L1", "LEVER_FAILED"]
        );
    }

    #[test]
    fn test_lever_in_normal_room() {
        let mut engine = engine(&[], ScriptedDice::new(), "S1");
        assert_eq!(engine.handle_lever(0), LeverOutcome::AlreadySolved);
        assert!(engine.players()[0].encountered_events.is_empty());
    }
}
