//! Field data model.
//!
//! This module provides:
//! - **`Vec3`**: the per-cell value type for vector quantities
//! - **`ScalarField` / `VectorField`**: named, time-tagged per-cell arrays
//!   with dimension metadata and a boundary-condition block
//! - **`Dimensions`**: SI base-unit exponent bookkeeping
//! - **Elementwise operations**: the deviation-energy kernel and the
//!   accumulator arithmetic, all shape- and dimension-checked
//!
//! Fields are immutable once loaded from a store; every derived quantity
//! goes through an explicit operation that validates the operands first.

mod dimensions;
mod scalar;
mod vector;

use thiserror::Error;

pub use dimensions::{Dimensions, DimensionsError};
pub use scalar::ScalarField;
pub use vector::{Vec3, VectorField};

/// Error type for elementwise field operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Cell counts disagree between two combined fields
    #[error("Field shape mismatch: expected {expected} cells, found {actual}")]
    ShapeMismatch {
        /// Cell count of the left-hand field
        expected: usize,
        /// Cell count of the offending field
        actual: usize,
    },

    /// Dimension vectors disagree where they must be equal
    #[error("Field dimension mismatch: expected [{expected}], found [{actual}]")]
    DimensionMismatch {
        /// Dimensions of the left-hand field
        expected: Dimensions,
        /// Dimensions of the offending field
        actual: Dimensions,
    },
}

/// One patch of the boundary-condition block carried by a field file.
///
/// The block is opaque to the accumulation pass; it is preserved on read
/// and written back out so downstream tooling keeps seeing it.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryPatch {
    /// Patch name (e.g. `inlet`)
    pub name: String,
    /// Condition kind (e.g. `fixedValue`, `zeroGradient`)
    pub kind: String,
    /// Optional condition values
    pub value: Vec<f64>,
}

impl BoundaryPatch {
    /// Create a patch without values.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: Vec::new(),
        }
    }

    /// Attach condition values.
    pub fn with_value(mut self, value: Vec<f64>) -> Self {
        self.value = value;
        self
    }
}
