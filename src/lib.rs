//! # tkepost
//!
//! A post-processing library for computing time-averaged turbulent
//! kinetic energy from stored velocity snapshots of a CFD run.
//!
//! This crate provides the building blocks for the `tkepost` binary:
//! - Field data model (scalar/vector fields, dimension bookkeeping)
//! - The on-disk field-file format (reader/writer)
//! - Field stores resolving `(name, time)` to fields (disk and in-memory)
//! - Output-time discovery and flag-based selection
//! - The accumulation pass and its run report
//!
//! The accumulation itself is deliberately small: per selected snapshot
//! it adds `0.5 * |U - UMean|²` per cell into an accumulator, and at the
//! end divides by the sample count and persists the result. Everything
//! else here exists to resolve, validate, and move fields around it.

pub mod analysis;
pub mod field;
pub mod io;
pub mod store;
pub mod time;

// Re-export main types for convenience
pub use analysis::{run_tke_average, FieldSummary, TkeError, TkeOptions, TkeReport};
pub use field::{BoundaryPatch, Dimensions, FieldError, ScalarField, Vec3, VectorField};
pub use io::{
    parse_scalar_field, parse_vector_field, read_scalar_field, read_vector_field,
    write_scalar_field, write_vector_field, FieldFileError, FieldKind,
};
pub use store::{CaseStore, FieldStore, MemoryStore, StoreError};
pub use time::{discover_times, TimeError, TimeInstant, TimeSelection};
