//! Physical dimension bookkeeping for field headers.
//!
//! Every field file carries a vector of seven SI base-unit exponents
//! (mass, length, time, temperature, amount, current, luminous intensity).
//! Fields are only combined when their exponent vectors agree, and the
//! product rule gives derived quantities their exponents.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error type for dimension parsing.
#[derive(Debug, Error)]
pub enum DimensionsError {
    /// Wrong number of exponents in a dimension string
    #[error("Expected 7 dimension exponents, found {0}")]
    WrongCount(usize),

    /// An exponent failed to parse as an integer
    #[error("Invalid dimension exponent '{0}'")]
    InvalidExponent(String),
}

/// SI base-unit exponents `[kg m s K mol A cd]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions([i8; 7]);

impl Dimensions {
    /// Dimensionless quantity.
    pub const DIMENSIONLESS: Self = Self([0; 7]);

    /// Velocity, m/s.
    pub const VELOCITY: Self = Self([0, 1, -1, 0, 0, 0, 0]);

    /// Specific energy, m²/s² (velocity squared; the TKE dimensions).
    pub const SPECIFIC_ENERGY: Self = Self([0, 2, -2, 0, 0, 0, 0]);

    /// Kinematic viscosity, m²/s.
    pub const KINEMATIC_VISCOSITY: Self = Self([0, 2, -1, 0, 0, 0, 0]);

    /// Create from an explicit exponent vector.
    pub const fn new(exponents: [i8; 7]) -> Self {
        Self(exponents)
    }

    /// The raw exponent vector.
    pub const fn exponents(self) -> [i8; 7] {
        self.0
    }

    /// Exponents of the product of two quantities.
    ///
    /// Used to derive the dimensions of `|U - UMean|²` from those of `U`.
    pub fn product(self, other: Self) -> Self {
        let mut out = [0i8; 7];
        for (i, e) in out.iter_mut().enumerate() {
            *e = self.0[i] + other.0[i];
        }
        Self(out)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in self.0 {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", e)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for Dimensions {
    type Err = DimensionsError;

    /// Parse seven whitespace-separated integer exponents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 7 {
            return Err(DimensionsError::WrongCount(parts.len()));
        }

        let mut exponents = [0i8; 7];
        for (i, part) in parts.iter().enumerate() {
            exponents[i] = part
                .parse()
                .map_err(|_| DimensionsError::InvalidExponent(part.to_string()))?;
        }
        Ok(Self(exponents))
    }
}
