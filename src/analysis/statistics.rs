//! Summary statistics for the end-of-run report.

use std::fmt;

use crate::field::ScalarField;

/// Min/max/mean summary of a scalar field.
#[derive(Clone, Copy, Debug)]
pub struct FieldSummary {
    /// Smallest cell value
    pub min: f64,
    /// Largest cell value
    pub max: f64,
    /// Arithmetic mean over cells
    pub mean: f64,
    /// Number of cells
    pub n_cells: usize,
}

impl FieldSummary {
    /// Compute the summary of a scalar field.
    ///
    /// An empty field yields an all-zero summary.
    pub fn compute(field: &ScalarField) -> Self {
        let values = field.values();
        if values.is_empty() {
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                n_cells: 0,
            };
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Self {
            min,
            max,
            mean,
            n_cells: values.len(),
        }
    }
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min={:.6e} max={:.6e} mean={:.6e} over {} cells",
            self.min, self.max, self.mean, self.n_cells
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Dimensions;
    use crate::time::TimeInstant;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_summary() {
        let field = ScalarField::new(
            "k",
            TimeInstant::new(0.0),
            Dimensions::SPECIFIC_ENERGY,
            vec![1.0, 2.0, 3.0, 4.0],
        );
        let summary = FieldSummary::compute(&field);

        assert_eq!(summary.n_cells, 4);
        assert!((summary.min - 1.0).abs() < TOL);
        assert!((summary.max - 4.0).abs() < TOL);
        assert!((summary.mean - 2.5).abs() < TOL);
    }

    #[test]
    fn test_summary_empty_field() {
        let field = ScalarField::zeros("k", TimeInstant::new(0.0), Dimensions::SPECIFIC_ENERGY, 0);
        let summary = FieldSummary::compute(&field);

        assert_eq!(summary.n_cells, 0);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 0.0);
    }
}
