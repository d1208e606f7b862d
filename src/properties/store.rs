use std::collections::BTreeMap;

use log::debug;

use super::array::PropertyArray;
use super::{PropertyError, PropertyValues};

/// Named per-point properties over a fixed point-id domain with an active mask
///
/// Every backing array spans all `N` points of the domain. Reads and writes
/// only ever see the points whose mask entry is `true`, in ascending
/// point-id order, so values outside the active subset are never disturbed.
#[derive(Debug, Clone)]
pub struct MaskedProperties {
    is_in_data: Vec<bool>,
    arrays: BTreeMap<String, PropertyArray>,
}

impl MaskedProperties {
    /// Create an empty store over `n_points` points, all active
    pub fn new(n_points: usize) -> Self {
        Self {
            is_in_data: vec![true; n_points],
            arrays: BTreeMap::new(),
        }
    }

    /// Create an empty store with an explicit active mask
    pub fn with_mask(is_in_data: Vec<bool>) -> Self {
        Self {
            is_in_data,
            arrays: BTreeMap::new(),
        }
    }

    /// Number of points in the full domain
    pub fn len(&self) -> usize {
        self.is_in_data.len()
    }

    /// Whether the domain holds no points
    pub fn is_empty(&self) -> bool {
        self.is_in_data.is_empty()
    }

    /// Number of currently active points
    pub fn active_len(&self) -> usize {
        self.is_in_data.iter().filter(|&&b| b).count()
    }

    /// The active mask, one entry per point id
    pub fn mask(&self) -> &[bool] {
        &self.is_in_data
    }

    /// Ids of the active points, ascending
    pub fn active_ids(&self) -> Vec<usize> {
        self.is_in_data
            .iter()
            .enumerate()
            .filter_map(|(id, &active)| active.then_some(id))
            .collect()
    }

    /// Replace the active mask
    ///
    /// Array contents are left untouched; only the visibility of points in
    /// later calls changes.
    pub fn set_mask(&mut self, is_in_data: Vec<bool>) -> Result<(), PropertyError> {
        if is_in_data.len() != self.is_in_data.len() {
            return Err(PropertyError::MaskLength {
                expected: self.is_in_data.len(),
                actual: is_in_data.len(),
            });
        }
        self.is_in_data = is_in_data;
        Ok(())
    }

    /// Whether `key` has been set
    pub fn contains(&self, key: &str) -> bool {
        self.arrays.contains_key(key)
    }

    /// Property names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    /// Number of stored properties
    pub fn n_properties(&self) -> usize {
        self.arrays.len()
    }

    /// Write `values` to the active points
    ///
    /// `values` must hold one entry (times its component count) per active
    /// point. A missing key is created full-size and zero-filled with the
    /// element type of `values`; an existing key must match it.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        values: impl Into<PropertyValues>,
    ) -> Result<(), PropertyError> {
        let key = key.into();
        let values = values.into();
        let ids = self.active_ids();

        if values.len() != ids.len() {
            return Err(PropertyError::LengthMismatch {
                key,
                expected: ids.len() * values.components(),
                actual: values.len() * values.components(),
            });
        }

        if let Some(existing) = self.arrays.get(&key) {
            if existing.element_type() != values.element_type()
                || existing.components() != values.components()
            {
                return Err(PropertyError::TypeMismatch {
                    key,
                    expected: existing.element_type(),
                    expected_components: existing.components(),
                    actual: values.element_type(),
                    actual_components: values.components(),
                });
            }
        }

        let n_points = self.len();
        let array = self.arrays.entry(key.clone()).or_insert_with(|| {
            PropertyArray::zeros(n_points, values.element_type(), values.components())
        });
        debug_assert_eq!(array.n_points(), n_points);
        array.scatter(&ids, &values);
        debug!("Set property '{}' on {} active points", key, ids.len());
        Ok(())
    }

    /// Values of `key` at the active points, ascending point-id order
    pub fn get(&self, key: &str) -> Result<PropertyValues, PropertyError> {
        let array = self
            .arrays
            .get(key)
            .ok_or_else(|| PropertyError::KeyNotFound(key.to_string()))?;
        debug!("Get property '{}'", key);
        Ok(array.gather(&self.active_ids()))
    }

    /// Remove a property, returning whether it existed
    pub fn remove(&mut self, key: &str) -> bool {
        self.arrays.remove(key).is_some()
    }
}
