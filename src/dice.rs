//! Source of randomness for the game.
//!
//! Every random decision (bot strategy, lever pulls, secret passages, random
//! entrances, bot riddle guesses) goes through [`Dice`] so matches can be
//! replayed with a fixed seed or a scripted sequence.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

pub trait Dice {
    /// Returns `true` with the given probability (clamped to `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool;

    /// Picks an index in `0..len`. `len` must be greater than zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn chance(&mut self, probability: f64) -> bool {
        (**self).chance(probability)
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Dice backed by a seedable PRNG.
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, otherwise from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Dice for RandomDice {
    fn chance(&mut self, probability: f64) -> bool {
        if probability.is_nan() {
            return false;
        }
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Dice that replay queued answers.
///
/// When a queue runs dry, `chance` answers `false` and `pick` answers `0`.
/// Picks are reduced modulo `len`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedDice {
    chances: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chances(mut self, chances: &[bool]) -> Self {
        self.chances.extend(chances.iter().copied());
        self
    }

    pub fn with_picks(mut self, picks: &[usize]) -> Self {
        self.picks.extend(picks.iter().copied());
        self
    }

    pub fn push_chance(&mut self, value: bool) {
        self.chances.push_back(value);
    }

    pub fn push_pick(&mut self, value: usize) {
        self.picks.push_back(value);
    }
}

impl Dice for ScriptedDice {
    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.picks.pop_front().unwrap_or(0) % len
    }
}
