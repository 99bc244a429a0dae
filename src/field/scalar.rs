//! Scalar fields over the mesh cells.
//!
//! The accumulator that builds up the time-averaged turbulent kinetic
//! energy is a `ScalarField`; its only mutation paths are the elementwise
//! operations below, so every shape and dimension check sits on the seam
//! where two fields meet.

use crate::time::TimeInstant;

use super::{BoundaryPatch, Dimensions, FieldError};

/// A per-cell scalar quantity at one output time.
#[derive(Clone, Debug)]
pub struct ScalarField {
    /// Field name used for store resolution
    pub name: String,
    /// Output time this field belongs to
    pub time: TimeInstant,
    /// SI dimension exponents
    pub dimensions: Dimensions,
    /// Boundary-condition block carried through from the file
    pub boundary: Vec<BoundaryPatch>,
    values: Vec<f64>,
}

impl ScalarField {
    /// Create a field from per-cell values.
    pub fn new(
        name: impl Into<String>,
        time: TimeInstant,
        dimensions: Dimensions,
        values: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            time,
            dimensions,
            boundary: Vec::new(),
            values,
        }
    }

    /// Create a zero-valued field with the given shape.
    pub fn zeros(
        name: impl Into<String>,
        time: TimeInstant,
        dimensions: Dimensions,
        n_cells: usize,
    ) -> Self {
        Self::new(name, time, dimensions, vec![0.0; n_cells])
    }

    /// Create a field with every cell set to the same value.
    pub fn uniform(
        name: impl Into<String>,
        time: TimeInstant,
        dimensions: Dimensions,
        value: f64,
        n_cells: usize,
    ) -> Self {
        Self::new(name, time, dimensions, vec![value; n_cells])
    }

    /// Attach a boundary-condition block.
    pub fn with_boundary(mut self, boundary: Vec<BoundaryPatch>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Rebind the field to a different output time.
    pub fn with_time(mut self, time: TimeInstant) -> Self {
        self.time = time;
        self
    }

    /// Number of mesh cells.
    pub fn n_cells(&self) -> usize {
        self.values.len()
    }

    /// Per-cell values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Add another field cell-by-cell into this one.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the cell counts differ
    /// - `DimensionMismatch` if the dimension vectors differ
    pub fn add_assign_field(&mut self, other: &ScalarField) -> Result<(), FieldError> {
        if other.values.len() != self.values.len() {
            return Err(FieldError::ShapeMismatch {
                expected: self.values.len(),
                actual: other.values.len(),
            });
        }
        if other.dimensions != self.dimensions {
            return Err(FieldError::DimensionMismatch {
                expected: self.dimensions,
                actual: other.dimensions,
            });
        }

        for (a, b) in self.values.iter_mut().zip(other.values.iter()) {
            *a += b;
        }
        Ok(())
    }

    /// Multiply every cell by a constant.
    pub fn scale(&mut self, s: f64) {
        for v in &mut self.values {
            *v *= s;
        }
    }

    /// Divide every cell by a constant.
    ///
    /// The caller guards against a zero divisor; the accumulation driver
    /// refuses an empty sample set before this can be reached.
    pub fn divide_by(&mut self, divisor: f64) {
        self.scale(1.0 / divisor);
    }
}
