//! Validation logic for configuration values.

use super::defaults::{GameSettings, PathsConfig};
use crate::error::{GameError, Result};

fn check_probability(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GameError::Config(format!(
            "game.{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}

impl GameSettings {
    /// Validate game settings
    pub fn validate(&self) -> Result<()> {
        if self.starting_power <= 0 {
            return Err(GameError::Config(format!(
                "game.starting_power must be greater than 0, got {}",
                self.starting_power
            )));
        }

        check_probability("bot_error_chance", self.bot_error_chance)?;
        check_probability("lever_success_chance", self.lever_success_chance)?;
        check_probability("bot_lever_chance", self.bot_lever_chance)?;
        check_probability("item_find_chance", self.item_find_chance)
    }
}

impl PathsConfig {
    /// Validate configured paths
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("maps_dir", &self.maps_dir),
            ("riddles_file", &self.riddles_file),
            ("reports_dir", &self.reports_dir),
            ("log_file", &self.log_file),
        ] {
            if value.trim().is_empty() {
                return Err(GameError::Config(format!("paths.{} must not be empty", name)));
            }
        }
        Ok(())
    }
}
