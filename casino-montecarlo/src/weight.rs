//! Face weights and the conversions accepted when re-weighting a die.

use serde::{Deserialize, Serialize};

use crate::error::{MonteCarloError, Result};
use crate::numbers::to_f64;

/// A finite, non-negative sampling weight.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// The weight every face starts with unless told otherwise.
    pub const DEFAULT: Self = Self(1.0);

    /// Validate a raw value.
    ///
    /// # Errors
    ///
    /// Returns [`MonteCarloError::InvalidWeight`] for NaN, infinite, or negative values.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(invalid(value, "not a number"));
        }
        if value.is_infinite() {
            return Err(invalid(value, "must be finite"));
        }
        if value < 0.0 {
            return Err(invalid(value, "must not be negative"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn invalid(value: impl ToString, reason: &'static str) -> MonteCarloError {
    MonteCarloError::InvalidWeight {
        input: value.to_string(),
        reason,
    }
}

/// Values that can be interpreted as a [`Weight`].
///
/// Numbers convert directly; strings are accepted when they parse as a number.
pub trait IntoWeight {
    /// # Errors
    ///
    /// Returns [`MonteCarloError::InvalidWeight`] when the value is not numeric or
    /// does not describe a finite, non-negative weight.
    fn into_weight(self) -> Result<Weight>;
}

impl IntoWeight for Weight {
    fn into_weight(self) -> Result<Weight> {
        Ok(self)
    }
}

macro_rules! numeric_into_weight {
    ($($ty:ty),*) => {
        $(
            impl IntoWeight for $ty {
                fn into_weight(self) -> Result<Weight> {
                    let value = to_f64(self).ok_or_else(|| invalid(self, "not representable as f64"))?;
                    Weight::new(value)
                }
            }
        )*
    };
}

numeric_into_weight!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl IntoWeight for &str {
    fn into_weight(self) -> Result<Weight> {
        let value: f64 = self
            .trim()
            .parse()
            .map_err(|_| invalid(self, "cannot be converted to a number"))?;
        Weight::new(value)
    }
}

impl IntoWeight for String {
    fn into_weight(self) -> Result<Weight> {
        self.as_str().into_weight()
    }
}

impl IntoWeight for &String {
    fn into_weight(self) -> Result<Weight> {
        self.as_str().into_weight()
    }
}

/// A weight as written in configuration: a number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightValue {
    Number(f64),
    Text(String),
}

impl IntoWeight for WeightValue {
    fn into_weight(self) -> Result<Weight> {
        match self {
            Self::Number(value) => Weight::new(value),
            Self::Text(text) => text.into_weight(),
        }
    }
}

impl IntoWeight for &WeightValue {
    fn into_weight(self) -> Result<Weight> {
        self.clone().into_weight()
    }
}
