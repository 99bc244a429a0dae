//! Disk-backed field store over a case directory.
//!
//! Fields live at `<case-root>/<time-dir>/<field-name>`; the time
//! directory name is the instant's on-disk spelling, so a store never
//! invents a new spelling for an existing instant.

use std::path::{Path, PathBuf};

use crate::field::{ScalarField, VectorField};
use crate::io::{read_scalar_field, read_vector_field, write_scalar_field};
use crate::time::TimeInstant;

use super::{FieldStore, StoreError};

/// Field store over a case directory tree.
#[derive(Clone, Debug)]
pub struct CaseStore {
    root: PathBuf,
}

impl CaseStore {
    /// Create a store rooted at a case directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The case root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn field_path(&self, name: &str, time: &TimeInstant) -> PathBuf {
        self.root.join(&time.name).join(name)
    }

    fn not_found(&self, name: &str, time: &TimeInstant) -> StoreError {
        StoreError::FieldNotFound {
            name: name.to_string(),
            time: time.name.clone(),
        }
    }

    fn format_error(name: &str, time: &TimeInstant, source: crate::io::FieldFileError) -> StoreError {
        StoreError::Format {
            name: name.to_string(),
            time: time.name.clone(),
            source,
        }
    }
}

impl FieldStore for CaseStore {
    fn contains(&self, name: &str, time: &TimeInstant) -> bool {
        self.field_path(name, time).is_file()
    }

    fn load_scalar(&self, name: &str, time: &TimeInstant) -> Result<ScalarField, StoreError> {
        let path = self.field_path(name, time);
        if !path.is_file() {
            return Err(self.not_found(name, time));
        }
        let field =
            read_scalar_field(&path).map_err(|e| Self::format_error(name, time, e))?;
        // The directory tag is authoritative over whatever the header says
        Ok(field.with_time(time.clone()))
    }

    fn load_vector(&self, name: &str, time: &TimeInstant) -> Result<VectorField, StoreError> {
        let path = self.field_path(name, time);
        if !path.is_file() {
            return Err(self.not_found(name, time));
        }
        let mut field =
            read_vector_field(&path).map_err(|e| Self::format_error(name, time, e))?;
        field.time = time.clone();
        Ok(field)
    }

    fn save_scalar(&mut self, field: &ScalarField) -> Result<(), StoreError> {
        let dir = self.root.join(&field.time.name);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(&field.name);
        write_scalar_field(&path, field)
            .map_err(|e| Self::format_error(&field.name, &field.time, e))
    }
}
