//! Casino Monte Carlo
//!
//! Simulates repeated rolls of weighted dice and summarizes the results.
//! A [`Die`] is any discrete random variable with per-face weights, a [`Game`]
//! rolls an ordered set of dice a number of times and records every outcome,
//! and an [`Analyzer`] derives jackpot, combination, and face-count statistics
//! from a played game.
//!
//! ```
//! use casino_montecarlo::{Die, Game, RollRng};
//!
//! let coin = Die::new(["H", "T"]).unwrap();
//! let mut game = Game::new([coin.clone(), coin]);
//! game.play_with(4, &mut RollRng::from_user_seed(7)).unwrap();
//!
//! let analyzer = game.analyzer();
//! assert_eq!(analyzer.combo().unwrap().total(), 4);
//! assert!(analyzer.jackpot().unwrap() <= 4);
//! ```

pub mod analyzer;
pub mod config;
pub mod die;
pub mod error;
pub mod face;
pub mod game;
pub mod layout;
pub mod numbers;
pub mod rng;
pub mod weight;

// Re-export commonly used types
pub use analyzer::{
    Analyzer, ComboCount, ComboTable, Combination, FaceCountRow, FaceCountTable, Orientation,
};
pub use config::{DieConfig, GameConfig, WeightOverride};
pub use die::{Die, DieSnapshot, FaceWeight};
pub use error::{ErrorKind, MonteCarloError, Result};
pub use face::{Face, FaceKind, faces};
pub use game::Game;
pub use layout::{Layout, NARROW_COLUMNS, NarrowRow, NarrowView, TrialMatrix, View, WideView};
pub use rng::{CountingRng, RollRng, reseed_shared, with_shared};
pub use weight::{IntoWeight, Weight, WeightValue};
