//! Field resolution: named, time-tagged field storage.
//!
//! The accumulation pass never touches the filesystem directly; it asks a
//! [`FieldStore`] for fields by `(name, time)` and hands the result back
//! for persistence. `CaseStore` implements the trait over a case
//! directory tree, `MemoryStore` over an in-memory map so the numerics
//! can be tested without touching disk.

mod case;
mod memory;

use thiserror::Error;

use crate::field::{ScalarField, VectorField};
use crate::io::FieldFileError;
use crate::time::TimeInstant;

pub use case::CaseStore;
pub use memory::MemoryStore;

/// Error type for field resolution.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No field under the requested name and time tag
    #[error("Field '{name}' not found at time {time}")]
    FieldNotFound {
        /// Requested field name
        name: String,
        /// Requested time tag
        time: String,
    },

    /// The field exists but its file is malformed
    #[error("Field '{name}' at time {time}: {source}")]
    Format {
        /// Requested field name
        name: String,
        /// Requested time tag
        time: String,
        /// Underlying format error
        source: FieldFileError,
    },

    /// File I/O error while writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Named, time-tagged field storage.
///
/// Loads hand out owned fields; the single store write of a run happens
/// through `save_scalar` after the accumulation completes.
pub trait FieldStore {
    /// Whether a field exists under the given name and time tag.
    fn contains(&self, name: &str, time: &TimeInstant) -> bool;

    /// Load a scalar field.
    ///
    /// # Errors
    /// `FieldNotFound` when absent, `Format` when the stored data is
    /// malformed or of the wrong kind. Both are fatal to a run.
    fn load_scalar(&self, name: &str, time: &TimeInstant) -> Result<ScalarField, StoreError>;

    /// Load a vector field.
    fn load_vector(&self, name: &str, time: &TimeInstant) -> Result<VectorField, StoreError>;

    /// Persist a scalar field under its own name and time tag.
    fn save_scalar(&mut self, field: &ScalarField) -> Result<(), StoreError>;
}
