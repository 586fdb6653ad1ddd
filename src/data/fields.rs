//! Named per-vertex scalar fields.
//!
//! Fields are stored in a [`BTreeMap`] so that iteration is always in name
//! order; the binary exporter relies on that order.

use crate::mesh_error::MeshSurferError;
use std::collections::BTreeMap;

/// Name of the field holding per-vertex tributary areas.
pub const POINT_AREAS_FIELD: &str = "point_areas";

/// Collection of named scalar fields, each parallel to the vertex array.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet {
    fields: BTreeMap<String, Vec<f64>>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field, checking its length against `num_vertices`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
        num_vertices: usize,
    ) -> Result<(), MeshSurferError> {
        let name = name.into();
        if values.len() != num_vertices {
            return Err(MeshSurferError::FieldLengthMismatch {
                name,
                expected: num_vertices,
                found: values.len(),
            });
        }
        self.fields.insert(name, values);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<f64>> {
        self.fields.remove(name)
    }

    /// Field names in iteration (lexicographic) order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut Vec<f64>> + '_ {
        self.fields.values_mut()
    }

    pub(crate) fn clear(&mut self) {
        self.fields.clear();
    }
}
