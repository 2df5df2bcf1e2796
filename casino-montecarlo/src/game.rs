//! Games: repeated synchronized rolls of an ordered set of dice.

use rand::Rng;

use crate::analyzer::Analyzer;
use crate::die::Die;
use crate::error::{MonteCarloError, Result};
use crate::layout::{Layout, NarrowView, TrialMatrix, View, WideView};
use crate::rng::with_shared;

/// Rolls one or more dice a number of times and records every outcome.
///
/// Dice are usually of the same kind but may carry different weights. Mixed
/// face sets are accepted without validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    dice: Vec<Die>,
    matrix: Option<TrialMatrix>,
    layout: Layout,
}

impl Game {
    #[must_use]
    pub fn new<I>(dice: I) -> Self
    where
        I: IntoIterator<Item = Die>,
    {
        let dice: Vec<Die> = dice.into_iter().collect();
        if dice.windows(2).any(|pair| pair[0].faces() != pair[1].faces()) {
            log::warn!("game built from dice with differing faces");
        }
        Self {
            dice,
            matrix: None,
            layout: Layout::default(),
        }
    }

    #[must_use]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Mutable access to the die at 0-based `index`, e.g. to re-weight it
    /// before the next play.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::UnknownDie`] when `index` is out of range.
    pub fn die_mut(&mut self, index: usize) -> Result<&mut Die> {
        let len = self.dice.len();
        self.dice
            .get_mut(index)
            .ok_or(MonteCarloError::UnknownDie { index, len })
    }

    /// Roll every die `num_trials` times using `rng`, replacing earlier results.
    ///
    /// Each die draws all of its rolls in one batch, in die order; the
    /// batches are then transposed into trial rows numbered from 1.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::InvalidTrialCount`] when `num_trials < 1`,
    /// [`MonteCarloError::NoDice`] for a game without dice, and
    /// [`MonteCarloError::AllWeightsZero`] when a die cannot be sampled. The
    /// previous results are kept on error.
    pub fn play_with<R>(&mut self, num_trials: i64, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        let trials = usize::try_from(num_trials)
            .ok()
            .filter(|trials| *trials >= 1)
            .ok_or(MonteCarloError::InvalidTrialCount {
                requested: num_trials,
            })?;
        if self.dice.is_empty() {
            return Err(MonteCarloError::NoDice);
        }
        let columns = self
            .dice
            .iter()
            .map(|die| die.sample_with(trials, rng))
            .collect::<Result<Vec<_>>>()?;
        self.matrix = Some(TrialMatrix::from_columns(columns));
        log::debug!("played {trials} trials with {} dice", self.dice.len());
        Ok(())
    }

    /// Roll every die `num_trials` times from the shared source.
    ///
    /// # Errors
    ///
    /// See [`Game::play_with`].
    pub fn play(&mut self, num_trials: i64) -> Result<()> {
        with_shared(|rng| self.play_with(num_trials, rng))
    }

    /// Alias of [`Game::play`].
    ///
    /// # Errors
    ///
    /// See [`Game::play_with`].
    pub fn run(&mut self, num_trials: i64) -> Result<()> {
        self.play(num_trials)
    }

    /// Alias of [`Game::play_with`].
    ///
    /// # Errors
    ///
    /// See [`Game::play_with`].
    pub fn run_with<R>(&mut self, num_trials: i64, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        self.play_with(num_trials, rng)
    }

    #[must_use]
    pub const fn is_played(&self) -> bool {
        self.matrix.is_some()
    }

    /// The recorded outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::NotPlayed`] before the first play.
    pub fn matrix(&self) -> Result<&TrialMatrix> {
        self.matrix.as_ref().ok_or(MonteCarloError::NotPlayed)
    }

    /// Number of trials in the last play, or 0 before the first play.
    #[must_use]
    pub fn num_trials(&self) -> usize {
        self.matrix.as_ref().map_or(0, TrialMatrix::trials)
    }

    /// Layout most recently requested through [`Game::view`].
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Return the results in the named layout (`"wide"`/`"narrow"`, or
    /// `"W"`/`"N"`) and remember it as the current layout.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::InvalidLayout`] for any other name and
    /// [`MonteCarloError::NotPlayed`] before the first play.
    pub fn view(&mut self, layout: &str) -> Result<View> {
        let layout: Layout = layout.parse()?;
        self.view_as(layout)
    }

    /// Alias of [`Game::view`].
    ///
    /// # Errors
    ///
    /// See [`Game::view`].
    pub fn show(&mut self, layout: &str) -> Result<View> {
        self.view(layout)
    }

    /// Typed form of [`Game::view`].
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::NotPlayed`] before the first play.
    pub fn view_as(&mut self, layout: Layout) -> Result<View> {
        let view = self.matrix()?.project(layout);
        self.layout = layout;
        Ok(view)
    }

    /// Wide projection; does not change the remembered layout.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::NotPlayed`] before the first play.
    pub fn wide(&self) -> Result<WideView> {
        self.matrix().map(TrialMatrix::wide)
    }

    /// Narrow projection; does not change the remembered layout.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::NotPlayed`] before the first play.
    pub fn narrow(&self) -> Result<NarrowView> {
        self.matrix().map(TrialMatrix::narrow)
    }

    /// Analyzer borrowing this game's results.
    #[must_use]
    pub const fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(self)
    }
}
