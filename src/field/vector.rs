//! Vector fields over the mesh cells.
//!
//! `Vec3` is the per-cell value type; `VectorField` adds the identity a
//! field needs to live in a store (name, time tag, dimensions) plus the
//! deviation-energy kernel that feeds the accumulation pass.

use std::ops::{Add, Mul, Sub};

use crate::time::TimeInstant;

use super::{BoundaryPatch, Dimensions, FieldError, ScalarField};

/// A 3-component vector value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vec3 {
    /// x-component
    pub x: f64,
    /// y-component
    pub y: f64,
    /// z-component
    pub z: f64,
}

impl Vec3 {
    /// Create a new vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Squared magnitude `x² + y² + z²`.
    pub fn mag_sqr(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude.
    pub fn mag(self) -> f64 {
        self.mag_sqr().sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// A per-cell vector quantity at one output time.
///
/// Values are read-only once the field is constructed; derived quantities
/// come out of explicit elementwise operations that produce new fields.
#[derive(Clone, Debug)]
pub struct VectorField {
    /// Field name used for store resolution
    pub name: String,
    /// Output time this field belongs to
    pub time: TimeInstant,
    /// SI dimension exponents
    pub dimensions: Dimensions,
    /// Boundary-condition block carried through from the file
    pub boundary: Vec<BoundaryPatch>,
    values: Vec<Vec3>,
}

impl VectorField {
    /// Create a field from per-cell values.
    pub fn new(
        name: impl Into<String>,
        time: TimeInstant,
        dimensions: Dimensions,
        values: Vec<Vec3>,
    ) -> Self {
        Self {
            name: name.into(),
            time,
            dimensions,
            boundary: Vec::new(),
            values,
        }
    }

    /// Create a field with every cell set to the same value.
    pub fn uniform(
        name: impl Into<String>,
        time: TimeInstant,
        dimensions: Dimensions,
        value: Vec3,
        n_cells: usize,
    ) -> Self {
        Self::new(name, time, dimensions, vec![value; n_cells])
    }

    /// Attach a boundary-condition block.
    pub fn with_boundary(mut self, boundary: Vec<BoundaryPatch>) -> Self {
        self.boundary = boundary;
        self
    }

    /// Number of mesh cells.
    pub fn n_cells(&self) -> usize {
        self.values.len()
    }

    /// Per-cell values.
    pub fn values(&self) -> &[Vec3] {
        &self.values
    }

    /// Elementwise `0.5 * |self - mean|²`.
    ///
    /// This is one snapshot's turbulence-energy contribution: half the
    /// squared magnitude of the deviation from the mean flow. The result
    /// is a scalar field at this field's time with the squared dimensions
    /// of the operands.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the cell counts differ
    /// - `DimensionMismatch` if the dimension vectors differ
    pub fn deviation_energy(&self, mean: &VectorField) -> Result<ScalarField, FieldError> {
        if self.values.len() != mean.values.len() {
            return Err(FieldError::ShapeMismatch {
                expected: mean.values.len(),
                actual: self.values.len(),
            });
        }
        if self.dimensions != mean.dimensions {
            return Err(FieldError::DimensionMismatch {
                expected: mean.dimensions,
                actual: self.dimensions,
            });
        }

        let values: Vec<f64> = self
            .values
            .iter()
            .zip(mean.values.iter())
            .map(|(&u, &m)| 0.5 * (u - m).mag_sqr())
            .collect();

        Ok(ScalarField::new(
            self.name.clone(),
            self.time.clone(),
            self.dimensions.product(self.dimensions),
            values,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn t0() -> TimeInstant {
        TimeInstant::new(0.0)
    }

    #[test]
    fn test_vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 1.0, 1.5);

        let sum = a + b;
        assert!((sum.x - 1.5).abs() < TOL);

        let diff = a - b;
        assert!((diff.z - 1.5).abs() < TOL);

        let scaled = a * 2.0;
        assert!((scaled.y - 4.0).abs() < TOL);
    }

    #[test]
    fn test_vec3_mag_sqr() {
        let v = Vec3::new(1.0, 2.0, 2.0);
        assert!((v.mag_sqr() - 9.0).abs() < TOL);
        assert!((v.mag() - 3.0).abs() < TOL);
    }

    #[test]
    fn test_deviation_energy_values() {
        let u = VectorField::new(
            "U",
            t0(),
            Dimensions::VELOCITY,
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)],
        );
        let mean = VectorField::uniform("UMean", t0(), Dimensions::VELOCITY, Vec3::zero(), 2);

        let k = u.deviation_energy(&mean).unwrap();

        assert_eq!(k.n_cells(), 2);
        assert!((k.values()[0] - 0.5).abs() < TOL);
        assert!((k.values()[1] - 2.0).abs() < TOL);
        assert_eq!(k.dimensions, Dimensions::SPECIFIC_ENERGY);
    }

    #[test]
    fn test_deviation_energy_zero_when_equal() {
        let u = VectorField::uniform("U", t0(), Dimensions::VELOCITY, Vec3::new(1.0, 2.0, 3.0), 4);
        let mean = u.clone();

        let k = u.deviation_energy(&mean).unwrap();
        assert!(k.values().iter().all(|&v| v.abs() < TOL));
    }

    #[test]
    fn test_deviation_energy_shape_mismatch() {
        let u = VectorField::uniform("U", t0(), Dimensions::VELOCITY, Vec3::zero(), 3);
        let mean = VectorField::uniform("UMean", t0(), Dimensions::VELOCITY, Vec3::zero(), 4);

        let result = u.deviation_energy(&mean);
        assert!(matches!(
            result,
            Err(FieldError::ShapeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_deviation_energy_dimension_mismatch() {
        let u = VectorField::uniform("U", t0(), Dimensions::VELOCITY, Vec3::zero(), 2);
        let mean = VectorField::uniform("UMean", t0(), Dimensions::DIMENSIONLESS, Vec3::zero(), 2);

        let result = u.deviation_energy(&mean);
        assert!(matches!(result, Err(FieldError::DimensionMismatch { .. })));
    }
}
