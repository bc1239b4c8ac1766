//! # Glory Maze
//!
//! A turn-based multiplayer maze game for the terminal.
//!
//! ## Overview
//!
//! A maze is a weighted graph of rooms joined by corridors. Human players
//! and bots start at entrance rooms and take turns moving; the first to
//! reach the treasure room wins. Corridors may carry events with effects,
//! riddle rooms hold players until answered, and lever rooms may open
//! secret passages. Maps and riddles are JSON files, and every match ends
//! with JSON reports and a session journal.
//!
//! ## Modules
//!
//! - [`model`] - Rooms, corridors, the maze graph, players and effects
//! - [`engine`] - Match orchestration: setup, turns, effects, room events, bots
//! - [`storage`] - Map, riddle and report files
//! - [`config`] - Configuration loading and defaults
//! - [`console`] / [`dice`] - Injected input and randomness
//! - [`logging`] - Diagnostics and the session journal
//! - [`ui`] - Menus, map editor and terminal helpers
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use glory_maze::config::Config;
//! use glory_maze::console::StdinConsole;
//! use glory_maze::dice::RandomDice;
//! use glory_maze::engine::GameEngine;
//!
//! let config = Config::load(None).expect("Failed to load config");
//! let mut engine = GameEngine::new(config, StdinConsole::new(), RandomDice::new(None));
//! let outcome = engine
//!     .play(Path::new("maps/mapa_facil.json"))
//!     .expect("Failed to start the match");
//! println!("{:?}", outcome);
//! ```

pub mod config;
pub mod console;
pub mod dice;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod ui;
