//! Time-averaged turbulent kinetic energy accumulation.
//!
//! One linear pass over the selected output times: per snapshot, load the
//! instantaneous velocity, accumulate `0.5 * |U - UMean|²` per cell, then
//! divide by the sample count and persist the result. The mean velocity
//! is resolved once, before the loop; the eddy-viscosity field is checked
//! for presence per snapshot but its values are never used.
//!
//! Any missing or malformed field aborts the run before the single output
//! write, so a failed run leaves the store untouched.

use thiserror::Error;

use crate::field::{FieldError, ScalarField};
use crate::store::{FieldStore, StoreError};
use crate::time::TimeInstant;

use super::FieldSummary;

/// Field names and switches for an accumulation run.
#[derive(Clone, Debug)]
pub struct TkeOptions {
    /// Instantaneous velocity field, loaded per snapshot
    pub velocity_name: String,
    /// Mean velocity field, loaded once from the first selected instant
    pub mean_name: String,
    /// Eddy-viscosity field checked for presence per snapshot
    pub viscosity_name: String,
    /// Name the averaged result is persisted under
    pub output_name: String,
    /// Whether the eddy-viscosity presence check runs at all
    pub require_viscosity: bool,
}

impl Default for TkeOptions {
    fn default() -> Self {
        Self {
            velocity_name: "U".to_string(),
            mean_name: "UMean".to_string(),
            viscosity_name: "nut".to_string(),
            output_name: "kMean".to_string(),
            require_viscosity: true,
        }
    }
}

/// Error type for an accumulation run.
#[derive(Debug, Error)]
pub enum TkeError {
    /// The time selection produced no instants; averaging is undefined
    #[error("No output times selected; nothing to average")]
    NoTimesSelected,

    /// A required field failed to resolve
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Fields disagreed in shape or dimensions
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Outcome of a completed accumulation run.
#[derive(Clone, Debug)]
pub struct TkeReport {
    /// Number of snapshots that contributed to the average
    pub samples: usize,
    /// Instant the result was persisted at
    pub output_time: TimeInstant,
    /// Summary of the persisted field
    pub summary: FieldSummary,
}

/// Accumulate the time-averaged turbulent kinetic energy over `times`.
///
/// `times` must be the (ascending) output of the time selection; an empty
/// list is a defined error rather than a division by zero. The mean
/// velocity and the initial accumulator are resolved from the first
/// instant; the averaged result is rebound to the last instant and
/// persisted through the store as the run's only write.
///
/// If the store already holds a field under the output name at the first
/// instant, it seeds the accumulation, so an earlier average can be
/// extended. Otherwise the accumulator starts from zero with the squared
/// dimensions of the mean velocity.
///
/// # Errors
/// - [`TkeError::NoTimesSelected`] for an empty `times`
/// - [`TkeError::Store`] when any required field is absent or malformed
/// - [`TkeError::Field`] on cell-count or dimension disagreement
pub fn run_tke_average<S: FieldStore>(
    store: &mut S,
    times: &[TimeInstant],
    options: &TkeOptions,
) -> Result<TkeReport, TkeError> {
    let first = times.first().ok_or(TkeError::NoTimesSelected)?;
    let last = times.last().ok_or(TkeError::NoTimesSelected)?;

    tracing::info!(mean = %options.mean_name, time = %first, "reading mean velocity");
    let mean = store.load_vector(&options.mean_name, first)?;

    let mut accumulator = if store.contains(&options.output_name, first) {
        tracing::info!(
            output = %options.output_name,
            time = %first,
            "seeding accumulator from existing field"
        );
        store.load_scalar(&options.output_name, first)?
    } else {
        ScalarField::zeros(
            options.output_name.clone(),
            first.clone(),
            mean.dimensions.product(mean.dimensions),
            mean.n_cells(),
        )
    };

    let mut samples: usize = 0;

    for instant in times {
        tracing::info!(time = %instant, field = %options.velocity_name, "processing snapshot");

        let velocity = store.load_vector(&options.velocity_name, instant)?;

        if options.require_viscosity {
            // Presence and readability check only; the values are unused
            store.load_scalar(&options.viscosity_name, instant)?;
        }

        let contribution = velocity.deviation_energy(&mean)?;
        accumulator.add_assign_field(&contribution)?;
        samples += 1;
    }

    accumulator.divide_by(samples as f64);
    let result = accumulator.with_time(last.clone());

    store.save_scalar(&result)?;

    let summary = FieldSummary::compute(&result);
    tracing::info!(samples, time = %last, %summary, "averaged turbulent kinetic energy written");

    Ok(TkeReport {
        samples,
        output_time: last.clone(),
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Dimensions, Vec3, VectorField};
    use crate::store::MemoryStore;

    const TOL: f64 = 1e-12;

    fn add_snapshot(store: &mut MemoryStore, time: &TimeInstant, u: &[Vec3]) {
        store.insert_vector(VectorField::new(
            "U",
            time.clone(),
            Dimensions::VELOCITY,
            u.to_vec(),
        ));
        store.insert_scalar(ScalarField::uniform(
            "nut",
            time.clone(),
            Dimensions::KINEMATIC_VISCOSITY,
            1e-5,
            u.len(),
        ));
    }

    fn add_mean(store: &mut MemoryStore, time: &TimeInstant, mean: Vec3, n_cells: usize) {
        store.insert_vector(VectorField::uniform(
            "UMean",
            time.clone(),
            Dimensions::VELOCITY,
            mean,
            n_cells,
        ));
    }

    #[test]
    fn test_two_samples_average() {
        let mut store = MemoryStore::new();
        let t1 = TimeInstant::new(1.0);
        let t2 = TimeInstant::new(2.0);

        add_mean(&mut store, &t1, Vec3::new(1.0, 0.0, 0.0), 2);
        add_snapshot(
            &mut store,
            &t1,
            &[Vec3::new(2.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
        );
        add_snapshot(
            &mut store,
            &t2,
            &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 3.0)],
        );

        let times = vec![t1, t2.clone()];
        let report =
            run_tke_average(&mut store, &times, &TkeOptions::default()).unwrap();

        assert_eq!(report.samples, 2);
        assert_eq!(report.output_time, t2);

        let result = store.load_scalar("kMean", &t2).unwrap();
        // Cell 0: (0.5*1 + 0.5*1) / 2 = 0.5
        assert!((result.values()[0] - 0.5).abs() < TOL);
        // Cell 1: (0.5*1 + 0.5*9) / 2 = 2.5
        assert!((result.values()[1] - 2.5).abs() < TOL);
        assert_eq!(result.dimensions, Dimensions::SPECIFIC_ENERGY);
    }

    #[test]
    fn test_empty_times_is_defined_error() {
        let mut store = MemoryStore::new();
        let result = run_tke_average(&mut store, &[], &TkeOptions::default());
        assert!(matches!(result, Err(TkeError::NoTimesSelected)));
    }

    #[test]
    fn test_missing_velocity_aborts_without_write() {
        let mut store = MemoryStore::new();
        let t1 = TimeInstant::new(1.0);
        let t2 = TimeInstant::new(2.0);

        add_mean(&mut store, &t1, Vec3::zero(), 1);
        add_snapshot(&mut store, &t1, &[Vec3::new(1.0, 0.0, 0.0)]);
        // No U at t2

        let times = vec![t1, t2.clone()];
        let result = run_tke_average(&mut store, &times, &TkeOptions::default());

        assert!(matches!(result, Err(TkeError::Store(_))));
        assert!(!store.contains("kMean", &t2));
    }

    #[test]
    fn test_missing_viscosity_is_fatal_by_default() {
        let mut store = MemoryStore::new();
        let t1 = TimeInstant::new(1.0);

        add_mean(&mut store, &t1, Vec3::zero(), 1);
        store.insert_vector(VectorField::uniform(
            "U",
            t1.clone(),
            Dimensions::VELOCITY,
            Vec3::new(1.0, 0.0, 0.0),
            1,
        ));

        let times = vec![t1.clone()];
        let result = run_tke_average(&mut store, &times, &TkeOptions::default());
        assert!(matches!(result, Err(TkeError::Store(_))));

        // Disabling the presence check lets the same run complete
        let options = TkeOptions {
            require_viscosity: false,
            ..TkeOptions::default()
        };
        let report = run_tke_average(&mut store, &times, &options).unwrap();
        assert_eq!(report.samples, 1);
    }

    #[test]
    fn test_seeded_accumulator_extends_average() {
        let mut store = MemoryStore::new();
        let t1 = TimeInstant::new(1.0);

        add_mean(&mut store, &t1, Vec3::zero(), 1);
        add_snapshot(&mut store, &t1, &[Vec3::new(2.0, 0.0, 0.0)]);
        store.insert_scalar(ScalarField::uniform(
            "kMean",
            t1.clone(),
            Dimensions::SPECIFIC_ENERGY,
            3.0,
            1,
        ));

        let times = vec![t1.clone()];
        let report = run_tke_average(&mut store, &times, &TkeOptions::default()).unwrap();
        assert_eq!(report.samples, 1);

        // (seed 3.0 + 0.5*4) / 1 = 5.0
        let result = store.load_scalar("kMean", &t1).unwrap();
        assert!((result.values()[0] - 5.0).abs() < TOL);
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let mut store = MemoryStore::new();
        let t1 = TimeInstant::new(1.0);

        add_mean(&mut store, &t1, Vec3::zero(), 2);
        // Velocity on a different cell count than the mean
        store.insert_vector(VectorField::uniform(
            "U",
            t1.clone(),
            Dimensions::VELOCITY,
            Vec3::zero(),
            3,
        ));
        store.insert_scalar(ScalarField::uniform(
            "nut",
            t1.clone(),
            Dimensions::KINEMATIC_VISCOSITY,
            1e-5,
            3,
        ));

        let times = vec![t1];
        let result = run_tke_average(&mut store, &times, &TkeOptions::default());
        assert!(matches!(result, Err(TkeError::Field(_))));
    }

    #[test]
    fn test_custom_field_names() {
        let mut store = MemoryStore::new();
        let t1 = TimeInstant::new(1.0);

        store.insert_vector(VectorField::uniform(
            "velocity",
            t1.clone(),
            Dimensions::VELOCITY,
            Vec3::new(1.0, 0.0, 0.0),
            1,
        ));
        store.insert_vector(VectorField::uniform(
            "velocityMean",
            t1.clone(),
            Dimensions::VELOCITY,
            Vec3::zero(),
            1,
        ));

        let options = TkeOptions {
            velocity_name: "velocity".to_string(),
            mean_name: "velocityMean".to_string(),
            output_name: "tke".to_string(),
            require_viscosity: false,
            ..TkeOptions::default()
        };

        let times = vec![t1.clone()];
        run_tke_average(&mut store, &times, &options).unwrap();

        let result = store.load_scalar("tke", &t1).unwrap();
        assert!((result.values()[0] - 0.5).abs() < TOL);
    }
}
