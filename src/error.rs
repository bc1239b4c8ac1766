//! Error types shared by the library.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: String, message: String },

    #[error("Map file not found: {0}")]
    MapNotFound(String),

    #[error("Room not found: {0}")]
    NoSuchRoom(String),

    #[error("Invalid move: no path to {target} from {from}")]
    InvalidMove { from: String, target: String },

    #[error("Room '{0}' already exists")]
    DuplicateRoom(String),

    #[error("Maze has no rooms")]
    EmptyMaze,

    #[error("Maze has no entrance")]
    NoEntrance,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

impl GameError {
    /// Hint shown next to the error on the command line.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            GameError::MapNotFound(_) => Some("Run 'glory-maze maps' to list the available maps"),
            GameError::InvalidJson { .. } => {
                Some("Run 'glory-maze check <MAP>' to inspect the map structure")
            }
            GameError::NoEntrance => Some("Add a room with type ENTRADA using 'glory-maze edit'"),
            GameError::Config(_) => Some("Check .glory/config.md"),
            _ => None,
        }
    }
}
