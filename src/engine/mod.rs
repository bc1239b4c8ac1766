//! Match orchestration.
//!
//! [`GameEngine`] owns the maze, the players and the turn queue. Turn
//! handling, corridor effects and room events live in the submodules as
//! further `impl GameEngine` blocks.

use std::collections::VecDeque;
use std::path::Path;

use crate::config::Config;
use crate::console::Console;
use crate::dice::Dice;
use crate::error::{GameError, Result};
use crate::logging::GameLog;
use crate::model::{Maze, Player};
use crate::storage;
use crate::ui;

pub mod bot;
pub mod effects;
pub mod events;
pub mod turns;

pub use bot::{decide_move, BotMove};
pub use effects::{recede_target, EffectOutcome};
pub use turns::TurnOutcome;

/// How a match ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    Victory { winner: String },
    Defeat { player: String },
    /// A player quit or input ran out.
    Abandoned,
    /// No players, so nothing was played.
    NotStarted,
}

pub struct GameEngine<C: Console, D: Dice> {
    config: Config,
    console: C,
    dice: D,
    maze: Maze,
    players: Vec<Player>,
    queue: VecDeque<usize>,
    journal: GameLog,
}

impl<C: Console, D: Dice> GameEngine<C, D> {
    /// Create an engine. The journal file is opened (and truncated) here.
    pub fn new(config: Config, console: C, dice: D) -> Self {
        let journal = GameLog::open(config.log_file());
        Self::with_journal(config, console, dice, journal)
    }

    pub fn with_journal(config: Config, console: C, dice: D, journal: GameLog) -> Self {
        Self {
            config,
            console,
            dice,
            maze: Maze::new(),
            players: Vec::new(),
            queue: VecDeque::new(),
            journal,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn maze_mut(&mut self) -> &mut Maze {
        &mut self.maze
    }

    pub fn set_maze(&mut self, maze: Maze) {
        self.maze = maze;
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Load the riddle pool then the maze from `path`.
    pub fn load_map(&mut self, path: &Path) -> Result<()> {
        self.console.say(&format!(">>> Loading maze {}...", path.display()));
        let riddles = storage::load_riddles(&self.config.riddles_file())?;
        let maze = storage::load_maze(path, riddles)?;
        if maze.is_empty() {
            return Err(GameError::EmptyMaze);
        }

        let loaded = format!(
            "Loaded map: {} ({} rooms, {} corridors)",
            maze.name(),
            maze.len(),
            maze.corridors().len()
        );
        self.say(&ui::colors::success(&loaded).to_string());
        self.journal.log(&format!("Map loaded: {}", maze.name()));
        self.maze = maze;
        Ok(())
    }

    /// Load a map, ask the setup questions and run the match.
    pub fn play(&mut self, path: &Path) -> Result<MatchOutcome> {
        self.load_map(path)?;
        if self.setup_players()? == 0 {
            return Ok(MatchOutcome::NotStarted);
        }
        Ok(self.start())
    }

    fn say(&mut self, text: &str) {
        self.console.say(text);
    }

    fn journal(&mut self, text: &str) {
        self.journal.log(text);
    }

    fn starting_power(&self) -> i64 {
        self.config.game.starting_power
    }

    /// Ask how many humans and bots play, their names and entrances.
    /// Returns the number of players added.
    pub fn setup_players(&mut self) -> Result<usize> {
        if self.maze.entrances().is_empty() {
            return Err(GameError::NoEntrance);
        }

        let humans = self.read_count("How many human players? ");
        let manual = humans > 0
            && self
                .console
                .confirm("Do you want to choose the entrance manually? (y/n) ");

        for i in 1..=humans {
            let name = self
                .console
                .prompt(&format!("Name of player {}: ", i))
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| format!("Player {}", i));

            self.add_human(&name, manual)?;
        }

        let bots = self.read_count("How many bots? ");
        for i in 1..=bots {
            self.add_bot(&format!("Bot_{}", i))?;
        }

        if self.players.is_empty() {
            self.say("No players, the game cannot start.");
        }
        Ok(self.players.len())
    }

    /// A count answer. Anything that is not a non-negative number means 0.
    fn read_count(&mut self, text: &str) -> usize {
        self.console
            .prompt(text)
            .and_then(|line| line.trim().parse::<usize>().ok())
            .unwrap_or(0)
    }

    fn choose_entrance(&mut self, name: &str) -> String {
        let entrances: Vec<(String, String)> = self
            .maze
            .entrances()
            .iter()
            .map(|room| (room.id.clone(), room.description.clone()))
            .collect();

        self.say(&format!("Available entrances for {}:", name));
        for (i, (id, description)) in entrances.iter().enumerate() {
            self.say(&format!("  {}. {} - {}", i + 1, id, description));
        }

        loop {
            let Some(choice) = self.console.prompt_number("Choose the entrance number: ") else {
                return entrances[0].0.clone();
            };
            if choice >= 1 && (choice as usize) <= entrances.len() {
                return entrances[choice as usize - 1].0.clone();
            }
            self.say("Invalid entrance, try again.");
        }
    }

    fn random_entrance(&mut self) -> String {
        let entrances = self.maze.entrances();
        // Callers check that the maze has entrances.
        let i = self.dice.pick(entrances.len());
        entrances[i].id.clone()
    }

    /// `name`, or `name_2`, `name_3`... when another player already writes
    /// to the same report file.
    fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| {
            let file = storage::report_file_name(candidate);
            self.players
                .iter()
                .any(|p| storage::report_file_name(&p.name) == file)
        };
        if !taken(name) {
            return name.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", name, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Place a player at `entrance` and enqueue it. A player whose name is
    /// already taken is renamed with a numeric suffix.
    pub fn add_player(&mut self, mut player: Player, entrance: &str) -> Result<()> {
        let room = self
            .maze
            .room(entrance)
            .ok_or_else(|| GameError::NoSuchRoom(entrance.to_string()))?;
        let message = room.entry_message();

        let name = self.unique_name(&player.name);
        if name != player.name {
            self.say(&format!("The name {} is taken, playing as {}.", player.name, name));
            player.name = name;
        }
        player.enter_room(entrance);
        self.say(&format!(">> {} joined the game at {}", player, entrance));
        self.say(&message);
        self.journal(&format!("{} entered the maze at {}", player.name, entrance));

        self.queue.push_back(self.players.len());
        self.players.push(player);
        Ok(())
    }

    /// Add a human player, asking for the entrance when `manual` is set and
    /// picking one at random otherwise.
    pub fn add_human(&mut self, name: &str, manual: bool) -> Result<()> {
        if self.maze.entrances().is_empty() {
            return Err(GameError::NoEntrance);
        }
        let entrance = if manual {
            self.choose_entrance(name)
        } else {
            self.random_entrance()
        };
        let player = Player::human(name, self.starting_power());
        self.add_player(player, &entrance)
    }

    /// Add a bot at a random entrance.
    pub fn add_bot(&mut self, name: &str) -> Result<()> {
        if self.maze.entrances().is_empty() {
            return Err(GameError::NoEntrance);
        }
        let bot = Player::bot(name, self.starting_power(), &mut self.dice);
        let entrance = self.random_entrance();
        self.add_player(bot, &entrance)
    }

    /// Run the match to its end and export the reports.
    pub fn start(&mut self) -> MatchOutcome {
        if self.players.is_empty() {
            return MatchOutcome::NotStarted;
        }

        self.say(&ui::colors::heading("\n=== THE GAME HAS STARTED! ===").to_string());
        self.journal(&format!(
            "Match started on '{}' with {} players",
            self.maze.name(),
            self.players.len()
        ));

        let (outcome, winner) = loop {
            let Some(idx) = self.queue.pop_front() else {
                break (MatchOutcome::Abandoned, None);
            };

            if self.players[idx].skip_next_turn {
                self.players[idx].skip_next_turn = false;
                let name = self.players[idx].name.clone();
                self.say(&format!("{} loses this turn.", name));
                self.journal(&format!("{} skipped a turn", name));
                self.queue.push_back(idx);
                continue;
            }

            let mut turn = self.play_turn(idx);
            while turn == TurnOutcome::Continue && self.players[idx].extra_turns > 0 {
                self.players[idx].extra_turns -= 1;
                let name = self.players[idx].name.clone();
                self.say(&format!("{} plays an extra turn!", name));
                turn = self.play_turn(idx);
            }

            let name = self.players[idx].name.clone();
            match turn {
                TurnOutcome::Won => break (MatchOutcome::Victory { winner: name }, Some(idx)),
                TurnOutcome::Died => break (MatchOutcome::Defeat { player: name }, None),
                TurnOutcome::Quit => break (MatchOutcome::Abandoned, None),
                TurnOutcome::Continue => {
                    self.queue.push_back(idx);
                    if self.players[idx].is_bot() {
                        ui::pause(self.config.game.bot_delay_ms);
                    }
                }
            }
        };

        self.finish(&outcome, winner);
        outcome
    }

    /// `winner` is the index of the winning player, if any.
    fn finish(&mut self, outcome: &MatchOutcome, winner: Option<usize>) {
        match (outcome, winner) {
            (MatchOutcome::Victory { .. }, Some(idx)) => {
                let name = self.players[idx].name.clone();
                let moves = self.players[idx].moves;
                let text = format!("\nVICTORY! {} found the treasure!", name);
                self.say(&ui::colors::success(&text).to_string());
                self.journal.log_victory(&name, moves);
            }
            (MatchOutcome::Defeat { player }, _) => {
                let text = format!("\n{} has no power left. Game over!", player);
                self.say(&ui::colors::error(&text).to_string());
                self.journal.log_defeat(player);
            }
            (MatchOutcome::Abandoned, _) => {
                self.say("Leaving the game...");
                self.journal("Match abandoned");
            }
            _ => {}
        }

        let dir = self.config.reports_dir();
        for player in &self.players {
            if let Err(err) = storage::export_mission_report(player, &self.maze, &dir) {
                tracing::warn!(player = %player.name, error = %err, "failed to save report");
            }
        }
        let winner = winner.map(|i| &self.players[i]);
        match storage::export_match_summary(&self.players, winner, &dir) {
            Ok(path) => self
                .console
                .say(&format!("Match summary saved: {}", path.display())),
            Err(err) => tracing::warn!(error = %err, "failed to save match summary"),
        }

        self.say("Game over.");
        self.journal.close();
    }
}
