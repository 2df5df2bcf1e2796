//! Weighted dice: discrete random variables over a fixed set of faces.

use std::collections::HashSet;

use rand::Rng;
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use serde::{Deserialize, Serialize};

use crate::error::{MonteCarloError, Result};
use crate::face::Face;
use crate::rng::with_shared;
use crate::weight::{IntoWeight, Weight};

/// A discrete random variable with one mutable weight per face.
///
/// Dice can model anything with a finite set of outcomes: a coin, a deck of
/// cards, a loaded six-sider. Faces are fixed at construction; weights may be
/// changed at any time and take effect on the next roll.
#[derive(Debug, Clone, PartialEq)]
pub struct Die {
    faces: Vec<Face>,
    weights: Vec<f64>,
}

/// One `(face, weight)` row of a [`DieSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceWeight {
    pub face: Face,
    pub weight: f64,
}

/// Read-only table of a die's faces and their current weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DieSnapshot {
    pub rows: Vec<FaceWeight>,
}

impl DieSnapshot {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn weight_of(&self, face: &Face) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| &row.face == face)
            .map(|row| row.weight)
    }
}

impl Die {
    /// Create a die whose faces all start with weight 1.0.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::EmptyFaces`] or [`MonteCarloError::DuplicateFace`]
    /// when the faces do not form a valid domain.
    pub fn new<I, T>(faces: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Face>,
    {
        Self::with_weight(faces, Weight::DEFAULT)
    }

    /// Create a die whose faces all start with `weight`.
    ///
    /// # Errors
    ///
    /// Returns a domain error for empty or duplicated faces and
    /// [`MonteCarloError::InvalidWeight`] for an unusable weight.
    pub fn with_weight<I, T, W>(faces: I, weight: W) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Face>,
        W: IntoWeight,
    {
        let faces: Vec<Face> = faces.into_iter().map(Into::into).collect();
        if faces.is_empty() {
            return Err(MonteCarloError::EmptyFaces);
        }
        let mut seen = HashSet::with_capacity(faces.len());
        for face in &faces {
            if !seen.insert(face) {
                return Err(MonteCarloError::DuplicateFace { face: face.clone() });
            }
        }
        let weight = weight.into_weight()?.get();
        let weights = vec![weight; faces.len()];
        Ok(Self { faces, weights })
    }

    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; a die has at least one face.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    #[must_use]
    pub fn contains(&self, face: &Face) -> bool {
        self.position(face).is_some()
    }

    fn position(&self, face: &Face) -> Option<usize> {
        self.faces.iter().position(|candidate| candidate == face)
    }

    /// Current weight of `face`, if it belongs to this die.
    #[must_use]
    pub fn weight_of(&self, face: impl Into<Face>) -> Option<f64> {
        let face = face.into();
        self.position(&face).map(|idx| self.weights[idx])
    }

    /// Replace the weight of a single face.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::UnknownFace`] if the face is not on this die and
    /// [`MonteCarloError::InvalidWeight`] if `weight` is not a finite,
    /// non-negative number. The die is unchanged on error.
    pub fn change_weight<F, W>(&mut self, face: F, weight: W) -> Result<()>
    where
        F: Into<Face>,
        W: IntoWeight,
    {
        let face = face.into();
        let idx = self
            .position(&face)
            .ok_or_else(|| MonteCarloError::UnknownFace { face: face.clone() })?;
        let weight = weight.into_weight()?.get();
        log::debug!("face {face} re-weighted {} -> {weight}", self.weights[idx]);
        self.weights[idx] = weight;
        Ok(())
    }

    /// Alias of [`Die::change_weight`].
    ///
    /// # Errors
    ///
    /// See [`Die::change_weight`].
    pub fn set_weight<F, W>(&mut self, face: F, weight: W) -> Result<()>
    where
        F: Into<Face>,
        W: IntoWeight,
    {
        self.change_weight(face, weight)
    }

    /// Sum of all weights; must stay finite for a distribution to exist.
    fn total_weight(&self) -> Result<f64> {
        let total: f64 = self.weights.iter().sum();
        if !total.is_finite() {
            return Err(MonteCarloError::InvalidWeight {
                input: format!("{:?}", self.weights),
                reason: "weights sum to infinity",
            });
        }
        if total <= 0.0 {
            return Err(MonteCarloError::AllWeightsZero);
        }
        Ok(total)
    }

    fn distribution(&self) -> Result<WeightedIndex<f64>> {
        self.total_weight()?;
        WeightedIndex::new(&self.weights).map_err(|err| match err {
            WeightedError::AllWeightsZero => MonteCarloError::AllWeightsZero,
            WeightedError::NoItem => MonteCarloError::EmptyFaces,
            _ => MonteCarloError::InvalidWeight {
                input: format!("{:?}", self.weights),
                reason: "weights cannot form a distribution",
            },
        })
    }

    /// Normalized probability of each face, in face order.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::AllWeightsZero`] when no distribution exists
    /// and [`MonteCarloError::InvalidWeight`] when the weights overflow.
    pub fn probabilities(&self) -> Result<Vec<f64>> {
        let total = self.total_weight()?;
        Ok(self.weights.iter().map(|weight| weight / total).collect())
    }

    /// Draw `n` faces with replacement from `rng`.
    ///
    /// Weights are renormalized on every call.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::AllWeightsZero`] when every weight is zero and
    /// [`MonteCarloError::InvalidWeight`] when the weights sum past `f64::MAX`.
    pub fn sample_with<R>(&self, n: usize, rng: &mut R) -> Result<Vec<Face>>
    where
        R: Rng + ?Sized,
    {
        let dist = self.distribution()?;
        log::trace!("rolling {n} times over {} faces", self.faces.len());
        Ok((0..n)
            .map(|_| self.faces[dist.sample(rng)].clone())
            .collect())
    }

    /// Draw `n` faces with replacement from the shared source.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::AllWeightsZero`] when every weight is zero.
    pub fn sample(&self, n: usize) -> Result<Vec<Face>> {
        with_shared(|rng| self.sample_with(n, rng))
    }

    /// Alias of [`Die::sample`].
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::AllWeightsZero`] when every weight is zero.
    pub fn roll(&self, n: usize) -> Result<Vec<Face>> {
        self.sample(n)
    }

    /// Current faces and weights as a table.
    #[must_use]
    pub fn snapshot(&self) -> DieSnapshot {
        DieSnapshot {
            rows: self
                .faces
                .iter()
                .zip(&self.weights)
                .map(|(face, weight)| FaceWeight {
                    face: face.clone(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// Alias of [`Die::snapshot`].
    #[must_use]
    pub fn show(&self) -> DieSnapshot {
        self.snapshot()
    }
}
