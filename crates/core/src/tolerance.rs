//! Tolerance - The epsilon used by the settlement stage
//!
//! Aggregation is exact. Only the planner decides that a balance or a
//! transfer is "effectively zero", and it does so through this type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when creating a tolerance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToleranceError {
    #[error("Tolerance cannot be negative: {0}")]
    Negative(Decimal),

    #[error("Tolerance must be below one currency unit: {0}")]
    TooLarge(Decimal),
}

/// Non-negative epsilon below which a value is treated as zero.
///
/// The default is `0.00000001`: one millionth of a 0.01 minor unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Tolerance(Decimal);

impl Tolerance {
    /// Default epsilon (1e-8)
    pub const DEFAULT: Self = Self(Decimal::from_parts(1, 0, 0, false, 8));

    /// Zero tolerance: only exact zero is zero
    pub const EXACT: Self = Self(Decimal::ZERO);

    pub fn new(epsilon: Decimal) -> Result<Self, ToleranceError> {
        if epsilon < Decimal::ZERO {
            return Err(ToleranceError::Negative(epsilon));
        }
        if epsilon >= Decimal::ONE {
            return Err(ToleranceError::TooLarge(epsilon));
        }
        Ok(Self(epsilon))
    }

    #[inline]
    pub const fn epsilon(&self) -> Decimal {
        self.0
    }

    /// `|value| <= epsilon`
    #[inline]
    pub fn is_negligible(&self, value: Decimal) -> bool {
        value.abs() <= self.0
    }

    /// `|value| > epsilon`
    #[inline]
    pub fn exceeds(&self, value: Decimal) -> bool {
        !self.is_negligible(value)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Tolerance {
    type Error = ToleranceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Tolerance> for Decimal {
    fn from(t: Tolerance) -> Self {
        t.0
    }
}
