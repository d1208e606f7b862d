use log::debug;
use serde::{Deserialize, Serialize};

use super::{Phase, NOT_INDEXED_ID};
use crate::crystal_map::MapError;

/// Ordered collection of phases with unique ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseList {
    phases: Vec<Phase>,
}

impl PhaseList {
    /// Create an empty phase list
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a phase list, rejecting duplicate ids
    pub fn from_phases(phases: impl IntoIterator<Item = Phase>) -> Result<Self, MapError> {
        let mut list = Self::new();
        for phase in phases {
            list.add(phase)?;
        }
        Ok(list)
    }

    /// Append a phase
    pub fn add(&mut self, phase: Phase) -> Result<(), MapError> {
        if self.get(phase.id).is_some() {
            return Err(MapError::DuplicatePhaseId(phase.id));
        }
        debug!("Add phase {} '{}'", phase.id, phase.name);
        self.phases.push(phase);
        Ok(())
    }

    /// Add the not-indexed pseudo-phase unless a phase with its id exists
    pub fn add_not_indexed(&mut self) {
        if self.get(NOT_INDEXED_ID).is_none() {
            self.phases.insert(0, Phase::not_indexed());
        }
    }

    /// Phase with the given id
    pub fn get(&self, id: i32) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Mutable phase with the given id
    pub fn get_mut(&mut self, id: i32) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.id == id)
    }

    /// Phase ids in list order
    pub fn ids(&self) -> Vec<i32> {
        self.phases.iter().map(|p| p.id).collect()
    }

    /// Iterate over the phases in list order
    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }

    /// Iterate over the phases that are not the not-indexed pseudo-phase
    pub fn indexed(&self) -> impl Iterator<Item = &Phase> {
        self.phases.iter().filter(|p| !p.is_not_indexed())
    }

    /// Number of phases
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }
}

impl<'a> IntoIterator for &'a PhaseList {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}
