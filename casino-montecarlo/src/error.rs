//! Error taxonomy shared by dice, games, and analyzers.

use thiserror::Error;

use crate::face::Face;

/// Convenience alias used throughout the crate.
pub type Result<T, E = MonteCarloError> = std::result::Result<T, E>;

/// Broad classification of a [`MonteCarloError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The outcome domain of a die is empty or contains duplicates.
    Domain,
    /// A face or die referenced by the caller does not exist.
    NotFound,
    /// A weight could not be read as a finite, non-negative real.
    InvalidWeight,
    /// Every weight of a die is zero, so no distribution exists.
    EmptyDomain,
    /// A trial count, layout name, or dice collection was rejected.
    InvalidArgument,
    /// Results were requested before the game was played.
    NotReady,
    /// A configuration document could not be parsed.
    Config,
}

/// Errors raised by the Monte Carlo engine.
#[derive(Debug, Error)]
pub enum MonteCarloError {
    #[error("a die needs at least one face")]
    EmptyFaces,
    #[error("face {face} appears more than once in the domain")]
    DuplicateFace { face: Face },
    #[error("face {face} is not part of this die")]
    UnknownFace { face: Face },
    #[error("die {index} does not exist (game has {len} dice)")]
    UnknownDie { index: usize, len: usize },
    #[error("invalid weight {input:?}: {reason}")]
    InvalidWeight { input: String, reason: &'static str },
    #[error("every weight is zero; probabilities are undefined")]
    AllWeightsZero,
    #[error("number of trials must be at least 1 (got {requested})")]
    InvalidTrialCount { requested: i64 },
    #[error("unknown layout {requested:?}; expected \"wide\" or \"narrow\"")]
    InvalidLayout { requested: String },
    #[error("a game needs at least one die to play")]
    NoDice,
    #[error("trial {row} has {found} outcomes but trial 1 has {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("the game has not been played yet")]
    NotPlayed,
    #[error("invalid game configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl MonteCarloError {
    /// Classify the error into the taxonomy callers match on.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyFaces | Self::DuplicateFace { .. } => ErrorKind::Domain,
            Self::UnknownFace { .. } | Self::UnknownDie { .. } => ErrorKind::NotFound,
            Self::InvalidWeight { .. } => ErrorKind::InvalidWeight,
            Self::AllWeightsZero => ErrorKind::EmptyDomain,
            Self::InvalidTrialCount { .. } | Self::InvalidLayout { .. } | Self::NoDice
            | Self::RaggedRows { .. } => ErrorKind::InvalidArgument,
            Self::NotPlayed => ErrorKind::NotReady,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}
