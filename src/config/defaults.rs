//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_starting_power, i64, 100);
default_fn!(default_bot_error_chance, f64, 0.2);
default_fn!(default_bot_delay_ms, u64, 1000); // 1 second pause after bot turns
default_fn!(default_lever_success_chance, f64, 0.5);
default_fn!(default_bot_lever_chance, f64, 0.5);
default_fn!(default_item_find_chance, f64, 0.5);
default_fn!(default_maps_dir, String, "maps".to_string());
default_fn!(default_riddles_file, String, "maps/enigmas.json".to_string());
default_fn!(default_reports_dir, String, ".".to_string());
default_fn!(default_log_file, String, "game_log.txt".to_string());

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// Rules of play
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameSettings {
    /// Power every player starts with (default: 100)
    #[serde(default = "default_starting_power")]
    pub starting_power: i64,
    /// Probability that a smart bot ignores its route (default: 0.2)
    #[serde(default = "default_bot_error_chance")]
    pub bot_error_chance: f64,
    /// Pause after each bot turn, 0 disables it
    #[serde(default = "default_bot_delay_ms")]
    pub bot_delay_ms: u64,
    #[serde(default = "default_lever_success_chance")]
    pub lever_success_chance: f64,
    /// Probability a bot pulls an unsolved lever on its turn
    #[serde(default = "default_bot_lever_chance")]
    pub bot_lever_chance: f64,
    #[serde(default = "default_item_find_chance")]
    pub item_find_chance: f64,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_power: default_starting_power(),
            bot_error_chance: default_bot_error_chance(),
            bot_delay_ms: default_bot_delay_ms(),
            lever_success_chance: default_lever_success_chance(),
            bot_lever_chance: default_bot_lever_chance(),
            item_find_chance: default_item_find_chance(),
        }
    }
}

/// Where maps, riddles, reports and the journal live.
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_maps_dir")]
    pub maps_dir: String,
    #[serde(default = "default_riddles_file")]
    pub riddles_file: String,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            maps_dir: default_maps_dir(),
            riddles_file: default_riddles_file(),
            reports_dir: default_reports_dir(),
            log_file: default_log_file(),
        }
    }
}
