//! Per-point orientations stored as Bunge Euler angle triples (radians).
//!
//! Conversion to rotation matrices or quaternions is left to downstream
//! crates; this type only keeps the three angles together per point.

use serde::{Deserialize, Serialize};

/// Euler angle triple `(phi1, Phi, phi2)`
pub type Euler = [f64; 3];

/// Orientations of a sequence of points
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientations {
    euler: Vec<Euler>,
}

impl Orientations {
    /// Orientations from Euler angle triples
    pub fn from_euler(euler: Vec<Euler>) -> Self {
        Self { euler }
    }

    /// Combine three angle columns into one triple per point
    ///
    /// Columns of unequal length are truncated to the shortest.
    pub fn from_columns(phi1: Vec<f64>, big_phi: Vec<f64>, phi2: Vec<f64>) -> Self {
        let euler = phi1
            .into_iter()
            .zip(big_phi)
            .zip(phi2)
            .map(|((a, b), c)| [a, b, c])
            .collect();
        Self { euler }
    }

    /// Identity orientations for `n` points
    pub fn identity(n: usize) -> Self {
        Self {
            euler: vec![[0.0; 3]; n],
        }
    }

    /// Euler angle triples
    pub fn euler(&self) -> &[Euler] {
        &self.euler
    }

    /// Number of orientations
    pub fn len(&self) -> usize {
        self.euler.len()
    }

    /// Whether there are no orientations
    pub fn is_empty(&self) -> bool {
        self.euler.is_empty()
    }

    pub(crate) fn select(&self, ids: &[usize]) -> Self {
        Self {
            euler: ids.iter().map(|&id| self.euler[id]).collect(),
        }
    }
}
