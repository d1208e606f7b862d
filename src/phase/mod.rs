//! # Crystallographic phases
//!
//! Plain value records for the phases referenced by per-point phase ids.
//! Symmetry operations and lattice math live outside this crate; a phase
//! only carries the point-group name and the six lattice constants that the
//! ANG header describes.

mod list;

#[cfg(test)]
mod tests;

pub use list::PhaseList;

use serde::{Deserialize, Serialize};

/// Phase id marking points for which no phase could be determined
pub const NOT_INDEXED_ID: i32 = -1;

/// Name of the pseudo-phase used for not-indexed points
pub const NOT_INDEXED_NAME: &str = "not_indexed";

/// Unit cell lengths (a, b, c) and angles (alpha, beta, gamma, in degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// Length of the a axis
    pub a: f64,
    /// Length of the b axis
    pub b: f64,
    /// Length of the c axis
    pub c: f64,
    /// Angle between b and c
    pub alpha: f64,
    /// Angle between a and c
    pub beta: f64,
    /// Angle between a and b
    pub gamma: f64,
}

impl Lattice {
    /// Lattice from the six constants in `a b c alpha beta gamma` order
    pub fn from_abcabg(constants: [f64; 6]) -> Self {
        let [a, b, c, alpha, beta, gamma] = constants;
        Self {
            a,
            b,
            c,
            alpha,
            beta,
            gamma,
        }
    }

    /// The six constants in `a b c alpha beta gamma` order
    pub fn abcabg(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.alpha, self.beta, self.gamma]
    }
}

impl Default for Lattice {
    /// Unit cube
    fn default() -> Self {
        Self::from_abcabg([1.0, 1.0, 1.0, 90.0, 90.0, 90.0])
    }
}

/// Crystal structure placeholder holding a title and a lattice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Structure title, usually the phase name
    pub title: String,
    /// Unit cell
    pub lattice: Lattice,
}

/// A crystallographic phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Phase id as used in the per-point phase id column
    pub id: i32,
    /// Display name
    pub name: String,
    /// Point group (or vendor symmetry code) as written in the header
    pub point_group: String,
    /// Structure placeholder with the lattice constants
    pub structure: Structure,
}

impl Phase {
    /// Create a phase with a default structure titled after the phase
    pub fn new(id: i32, name: impl Into<String>, point_group: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            structure: Structure {
                title: name.clone(),
                lattice: Lattice::default(),
            },
            name,
            point_group: point_group.into(),
        }
    }

    /// Builder-style lattice setter
    pub fn with_lattice(mut self, lattice: Lattice) -> Self {
        self.structure.lattice = lattice;
        self
    }

    /// The not-indexed pseudo-phase
    pub fn not_indexed() -> Self {
        Self::new(NOT_INDEXED_ID, NOT_INDEXED_NAME, "")
    }

    /// Whether this is the not-indexed pseudo-phase
    pub fn is_not_indexed(&self) -> bool {
        self.id == NOT_INDEXED_ID
    }
}
