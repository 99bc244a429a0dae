//! In-memory field store for testing the accumulation logic.

use std::collections::HashMap;

use crate::field::{ScalarField, VectorField};
use crate::time::TimeInstant;

use super::{FieldStore, StoreError};

enum StoredField {
    Scalar(ScalarField),
    Vector(VectorField),
}

/// Field store backed by a `(name, time) -> field` map.
///
/// Loads clone the stored field, matching the owned-value contract of the
/// disk store.
#[derive(Default)]
pub struct MemoryStore {
    fields: HashMap<(String, String), StoredField>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(name: &str, time: &TimeInstant) -> (String, String) {
        (name.to_string(), time.name.clone())
    }

    /// Insert a scalar field under its own name and time tag.
    pub fn insert_scalar(&mut self, field: ScalarField) {
        let key = Self::key(&field.name, &field.time);
        self.fields.insert(key, StoredField::Scalar(field));
    }

    /// Insert a vector field under its own name and time tag.
    pub fn insert_vector(&mut self, field: VectorField) {
        let key = Self::key(&field.name, &field.time);
        self.fields.insert(key, StoredField::Vector(field));
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the store holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldStore for MemoryStore {
    fn contains(&self, name: &str, time: &TimeInstant) -> bool {
        self.fields.contains_key(&Self::key(name, time))
    }

    fn load_scalar(&self, name: &str, time: &TimeInstant) -> Result<ScalarField, StoreError> {
        match self.fields.get(&Self::key(name, time)) {
            Some(StoredField::Scalar(field)) => Ok(field.clone()),
            _ => Err(StoreError::FieldNotFound {
                name: name.to_string(),
                time: time.name.clone(),
            }),
        }
    }

    fn load_vector(&self, name: &str, time: &TimeInstant) -> Result<VectorField, StoreError> {
        match self.fields.get(&Self::key(name, time)) {
            Some(StoredField::Vector(field)) => Ok(field.clone()),
            _ => Err(StoreError::FieldNotFound {
                name: name.to_string(),
                time: time.name.clone(),
            }),
        }
    }

    fn save_scalar(&mut self, field: &ScalarField) -> Result<(), StoreError> {
        self.insert_scalar(field.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Dimensions, Vec3};

    #[test]
    fn test_insert_and_load() {
        let mut store = MemoryStore::new();
        let t = TimeInstant::new(1.0);

        store.insert_vector(VectorField::uniform(
            "U",
            t.clone(),
            Dimensions::VELOCITY,
            Vec3::zero(),
            2,
        ));

        assert!(store.contains("U", &t));
        assert_eq!(store.load_vector("U", &t).unwrap().n_cells(), 2);
    }

    #[test]
    fn test_kind_mismatch_is_not_found() {
        let mut store = MemoryStore::new();
        let t = TimeInstant::new(1.0);

        store.insert_vector(VectorField::uniform(
            "U",
            t.clone(),
            Dimensions::VELOCITY,
            Vec3::zero(),
            2,
        ));

        // A vector entry does not satisfy a scalar request
        assert!(matches!(
            store.load_scalar("U", &t),
            Err(StoreError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn test_missing_time_not_found() {
        let mut store = MemoryStore::new();
        store.insert_scalar(ScalarField::zeros(
            "nut",
            TimeInstant::new(1.0),
            Dimensions::KINEMATIC_VISCOSITY,
            2,
        ));

        let result = store.load_scalar("nut", &TimeInstant::new(2.0));
        assert!(matches!(result, Err(StoreError::FieldNotFound { .. })));
    }
}
