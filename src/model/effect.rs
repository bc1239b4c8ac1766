//! Effects applied to players by corridor events and items.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Effect {
    Heal,
    Damage,
    BonusPower,
    Trap,
    SkipTurn,
    SwapPosition,
    SwapAll,
    ExtraTurn,
    Recede,
}

impl Effect {
    pub const ALL: [Effect; 9] = [
        Effect::Heal,
        Effect::Damage,
        Effect::BonusPower,
        Effect::Trap,
        Effect::SkipTurn,
        Effect::SwapPosition,
        Effect::SwapAll,
        Effect::ExtraTurn,
        Effect::Recede,
    ];

    /// Signed magnitude: power delta for power effects, steps for `Recede`.
    pub fn value(self) -> i64 {
        match self {
            Effect::Heal => 20,
            Effect::Damage => -25,
            Effect::BonusPower => 15,
            Effect::Trap => -30,
            Effect::Recede => 2,
            Effect::SkipTurn | Effect::SwapPosition | Effect::SwapAll | Effect::ExtraTurn => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Effect::Heal => "HEAL",
            Effect::Damage => "DAMAGE",
            Effect::BonusPower => "BONUS_POWER",
            Effect::Trap => "TRAP",
            Effect::SkipTurn => "SKIP_TURN",
            Effect::SwapPosition => "SWAP_POSITION",
            Effect::SwapAll => "SWAP_ALL",
            Effect::ExtraTurn => "EXTRA_TURN",
            Effect::Recede => "RECEDE",
        }
    }

    /// Whether applying the effect moves the player somewhere else,
    /// interrupting a move in progress.
    pub fn displaces(self) -> bool {
        matches!(self, Effect::SwapAll | Effect::Recede)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Effect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace(['-', ' '], "_");
        Effect::ALL
            .iter()
            .copied()
            .find(|effect| effect.name() == wanted)
            .ok_or_else(|| format!("Unknown effect: {}", s.trim()))
    }
}

/// Something a player can find while crossing a corridor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub effect: Effect,
}

impl Item {
    pub fn new(name: impl Into<String>, effect: Effect) -> Self {
        Self {
            name: name.into(),
            effect,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.effect)
    }
}

/// Event attached to a corridor, triggered every time it is crossed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomEvent {
    pub description: String,
    pub effect: Option<Effect>,
    pub item: Option<Item>,
}

impl RandomEvent {
    pub fn new(description: impl Into<String>, effect: Option<Effect>) -> Self {
        Self {
            description: description.into(),
            effect,
            item: None,
        }
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.item = Some(item);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("heal".parse::<Effect>().unwrap(), Effect::Heal);
        assert_eq!("Swap_All".parse::<Effect>().unwrap(), Effect::SwapAll);
        assert_eq!("bonus-power".parse::<Effect>().unwrap(), Effect::BonusPower);
        assert!("LIGHTNING".parse::<Effect>().is_err());
    }

    #[test]
    fn test_values() {
        assert_eq!(Effect::Heal.value(), 20);
        assert_eq!(Effect::Damage.value().abs(), 25);
        assert_eq!(Effect::BonusPower.value(), 15);
        assert_eq!(Effect::Trap.value().abs(), 30);
        assert_eq!(Effect::Recede.value(), 2);
        assert_eq!(Effect::SkipTurn.value(), 0);
    }

    #[test]
    fn test_name_round_trips_through_serde() {
        for effect in Effect::ALL {
            let json = serde_json::to_string(&effect).unwrap();
            assert_eq!(json, format!("\"{}\"", effect.name()));
        }
    }

    #[test]
    fn test_displaces() {
        assert!(Effect::SwapAll.displaces());
        assert!(Effect::Recede.displaces());
        assert!(!Effect::SwapPosition.displaces());
    }

    #[test]
    fn test_item_display() {
        let item = Item::new("Potion", Effect::Heal);
        assert_eq!(item.to_string(), "Potion (HEAL)");
    }
}
