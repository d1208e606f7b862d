use serde::{Deserialize, Serialize};

/// Element type of a property array, fixed when the array is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// 64-bit floating point values
    Float,
    /// 64-bit signed integer values
    Int,
}

/// Flat element storage, `components` consecutive entries per point
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyData {
    /// Floating point storage
    Float(Vec<f64>),
    /// Integer storage
    Int(Vec<i64>),
}

impl PropertyData {
    fn len(&self) -> usize {
        match self {
            PropertyData::Float(v) => v.len(),
            PropertyData::Int(v) => v.len(),
        }
    }

    fn element_type(&self) -> ElementType {
        match self {
            PropertyData::Float(_) => ElementType::Float,
            PropertyData::Int(_) => ElementType::Int,
        }
    }
}

/// Values of one property for a sequence of points, in ascending point-id order
///
/// Each point carries `components` values stored back to back. Most ANG
/// properties are scalar (`components == 1`).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValues {
    data: PropertyData,
    components: usize,
}

impl PropertyValues {
    /// Scalar floating point values, one per point
    pub fn float(values: Vec<f64>) -> Self {
        Self {
            data: PropertyData::Float(values),
            components: 1,
        }
    }

    /// Scalar integer values, one per point
    pub fn int(values: Vec<i64>) -> Self {
        Self {
            data: PropertyData::Int(values),
            components: 1,
        }
    }

    /// Multi-valued float property with `components` values per point
    ///
    /// A trailing partial point is dropped so that the data always holds a
    /// whole number of points.
    pub fn float_components(mut values: Vec<f64>, components: usize) -> Self {
        let components = components.max(1);
        values.truncate(values.len() - values.len() % components);
        Self {
            data: PropertyData::Float(values),
            components,
        }
    }

    /// Multi-valued integer property with `components` values per point
    pub fn int_components(mut values: Vec<i64>, components: usize) -> Self {
        let components = components.max(1);
        values.truncate(values.len() - values.len() % components);
        Self {
            data: PropertyData::Int(values),
            components,
        }
    }

    pub(crate) fn from_parts(data: PropertyData, components: usize) -> Self {
        Self { data, components }
    }

    /// Number of points covered
    pub fn len(&self) -> usize {
        self.data.len() / self.components
    }

    /// Whether no points are covered
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Values per point
    pub fn components(&self) -> usize {
        self.components
    }

    /// Element type tag
    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// Underlying storage
    pub fn data(&self) -> &PropertyData {
        &self.data
    }

    /// Float slice, if the values are floats
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.data {
            PropertyData::Float(v) => Some(v),
            PropertyData::Int(_) => None,
        }
    }

    /// Integer slice, if the values are integers
    pub fn as_i64(&self) -> Option<&[i64]> {
        match &self.data {
            PropertyData::Int(v) => Some(v),
            PropertyData::Float(_) => None,
        }
    }

    /// First component of every point, converted to f64
    pub fn first_component(&self) -> Vec<f64> {
        let step = self.components;
        match &self.data {
            PropertyData::Float(v) => v.iter().step_by(step).copied().collect(),
            PropertyData::Int(v) => v.iter().step_by(step).map(|&x| x as f64).collect(),
        }
    }
}

impl From<Vec<f64>> for PropertyValues {
    fn from(values: Vec<f64>) -> Self {
        Self::float(values)
    }
}

impl From<Vec<i64>> for PropertyValues {
    fn from(values: Vec<i64>) -> Self {
        Self::int(values)
    }
}
