//! Declarative game setup loaded from JSON.
use serde::{Deserialize, Serialize};

use crate::die::Die;
use crate::error::Result;
use crate::face::Face;
use crate::game::Game;
use crate::rng::RollRng;
use crate::weight::WeightValue;

/// A game description: the dice to roll and an optional seed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub dice: Vec<DieConfig>,
}

/// One die definition, optionally repeated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieConfig {
    pub faces: Vec<Face>,
    #[serde(default = "default_weight")]
    pub weight: WeightValue,
    #[serde(default)]
    pub overrides: Vec<WeightOverride>,
    #[serde(default = "default_copies")]
    pub copies: usize,
}

/// Weight for a single face, applied after the die's base weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightOverride {
    pub face: Face,
    pub weight: WeightValue,
}

fn default_weight() -> WeightValue {
    WeightValue::Number(1.0)
}

fn default_copies() -> usize {
    1
}

impl DieConfig {
    /// Build a single die from this definition.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Die::with_weight`] and [`Die::change_weight`].
    pub fn build(&self) -> Result<Die> {
        let mut die = Die::with_weight(self.faces.iter().cloned(), &self.weight)?;
        for entry in &self.overrides {
            die.change_weight(entry.face.clone(), &entry.weight)?;
        }
        Ok(die)
    }
}

impl GameConfig {
    /// Load a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::MonteCarloError::Config`] if the JSON cannot be parsed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the described game, expanding `copies`.
    ///
    /// # Errors
    ///
    /// Returns the first die-construction error encountered.
    pub fn build(&self) -> Result<Game> {
        let mut dice = Vec::new();
        for die_cfg in &self.dice {
            let die = die_cfg.build()?;
            dice.extend(std::iter::repeat_n(die, die_cfg.copies));
        }
        Ok(Game::new(dice))
    }

    /// Random source for this configuration: seeded when `seed` is set.
    #[must_use]
    pub fn rng(&self) -> RollRng {
        self.seed
            .map_or_else(RollRng::from_entropy, RollRng::from_user_seed)
    }
}
