//! Header block parsing: the leading comment lines, vendor footprint and
//! per-phase metadata.

use log::{debug, warn};

use super::Vendor;
use crate::phase::{Lattice, Phase, PhaseList, NOT_INDEXED_ID};

/// Comment marker starting every header line
pub const COMMENT: char = '#';

/// Leading comment block of an ANG file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    lines: Vec<String>,
}

impl Header {
    /// Collect the leading comment lines of `text`
    ///
    /// Returns the header and the number of lines it spans; the first line
    /// not starting with `#` ends the header.
    pub fn parse(text: &str) -> (Self, usize) {
        let lines: Vec<String> = text
            .lines()
            .take_while(|line| line.starts_with(COMMENT))
            .map(|line| line.trim_end().to_string())
            .collect();
        let n = lines.len();
        (Self { lines }, n)
    }

    /// Header lines with trailing whitespace removed
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Vendor whose footprint appears in the header
    pub fn vendor(&self) -> Vendor {
        Vendor::detect(&self.lines)
    }

    /// Phase metadata described by the header
    pub fn phases(&self) -> PhaseMetadata {
        let mut meta = PhaseMetadata::default();
        for line in &self.lines {
            let tokens = tokenize(line);
            let Some(first) = tokens.first() else {
                continue;
            };
            if let Some(pattern) = PHASE_PATTERNS.iter().find(|p| p.marker == *first) {
                (pattern.handler)(&mut meta, &tokens[1..]);
            }
        }
        meta
    }
}

/// Strip the comment marker and split on whitespace
fn tokenize(line: &str) -> Vec<&str> {
    line.trim_start_matches(|c: char| c == COMMENT || c == ' ')
        .split_whitespace()
        .collect()
}

type Handler = fn(&mut PhaseMetadata, &[&str]);

/// A header line recognized by its first token
struct LinePattern {
    marker: &'static str,
    handler: Handler,
}

/// Header lines carrying phase metadata, tried in order
const PHASE_PATTERNS: &[LinePattern] = &[
    LinePattern {
        marker: "Phase",
        handler: handle_phase_id,
    },
    LinePattern {
        marker: "MaterialName",
        handler: handle_material_name,
    },
    LinePattern {
        marker: "Formula",
        handler: handle_formula,
    },
    LinePattern {
        marker: "Symmetry",
        handler: handle_symmetry,
    },
    LinePattern {
        marker: "LatticeConstants",
        handler: handle_lattice_constants,
    },
];

fn last_token(values: &[&str]) -> String {
    values.last().map(|s| s.to_string()).unwrap_or_default()
}

fn handle_phase_id(meta: &mut PhaseMetadata, values: &[&str]) {
    match values.last().map(|s| s.parse::<i32>()) {
        Some(Ok(id)) => meta.ids.push(id),
        _ => debug!("Skipping malformed phase id line: {:?}", values),
    }
}

fn handle_material_name(meta: &mut PhaseMetadata, values: &[&str]) {
    meta.names.push(values.join(" "));
}

fn handle_formula(meta: &mut PhaseMetadata, values: &[&str]) {
    meta.formulas.push(last_token(values));
}

fn handle_symmetry(meta: &mut PhaseMetadata, values: &[&str]) {
    meta.point_groups.push(last_token(values));
}

fn handle_lattice_constants(meta: &mut PhaseMetadata, values: &[&str]) {
    let parsed: Result<Vec<f64>, _> = values.iter().map(|v| v.parse::<f64>()).collect();
    match parsed.ok().and_then(|v| <[f64; 6]>::try_from(v).ok()) {
        Some(constants) => meta.lattice_constants.push(constants),
        None => debug!("Skipping malformed lattice constants line: {:?}", values),
    }
}

/// Per-phase values collected from the header, one list per field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseMetadata {
    /// Explicit phase ids
    pub ids: Vec<i32>,
    /// Material names
    pub names: Vec<String>,
    /// Chemical formulas
    pub formulas: Vec<String>,
    /// Point groups or vendor symmetry codes
    pub point_groups: Vec<String>,
    /// Lattice constants `a b c alpha beta gamma`
    pub lattice_constants: Vec<[f64; 6]>,
}

impl PhaseMetadata {
    /// Display name of every phase
    ///
    /// Formulas are preferred when there is one per material name and none
    /// of them is empty (ASTAR Index often leaves them blank).
    pub fn display_names(&self) -> Vec<String> {
        let use_formulas = !self.formulas.is_empty()
            && self.formulas.len() == self.names.len()
            && self.formulas.iter().all(|f| !f.is_empty());
        if use_formulas {
            self.formulas.clone()
        } else {
            self.names.clone()
        }
    }

    /// Number of phases described
    pub fn n_phases(&self) -> usize {
        self.display_names().len()
    }

    /// One unique id per phase
    ///
    /// Explicit ids are kept in order (repeats dropped). Without any,
    /// phases are numbered from zero; otherwise missing ids continue from
    /// the largest explicit id. Phases that would need an id past
    /// `i32::MAX` are left out.
    pub fn complete_ids(&self) -> Vec<i32> {
        let n = self.n_phases();
        let mut ids: Vec<i32> = Vec::with_capacity(n);
        for &id in &self.ids {
            if ids.contains(&id) {
                warn!("Phase id {} appears more than once in the header; dropping repeat", id);
            } else {
                ids.push(id);
            }
        }
        ids.truncate(n);

        let mut next = match ids.iter().max() {
            Some(&max) => max.checked_add(1),
            None => Some(0),
        };
        while ids.len() < n {
            match next {
                Some(id) => {
                    ids.push(id);
                    next = id.checked_add(1);
                }
                None => {
                    warn!(
                        "No phase ids left after {}; skipping {} phase(s)",
                        i32::MAX,
                        n - ids.len()
                    );
                    break;
                }
            }
        }
        ids
    }

    /// Phase list pairing each phase with its point group and lattice
    pub fn to_phase_list(&self) -> PhaseList {
        let mut list = PhaseList::new();
        let names = self.display_names();
        for (i, (id, name)) in self.complete_ids().into_iter().zip(names).enumerate() {
            let point_group = self.point_groups.get(i).cloned().unwrap_or_default();
            let lattice = self
                .lattice_constants
                .get(i)
                .map(|&c| Lattice::from_abcabg(c))
                .unwrap_or_default();
            if id == NOT_INDEXED_ID {
                warn!(
                    "Header phase '{}' uses id {}; it is treated as not indexed and left out of written headers",
                    name, NOT_INDEXED_ID
                );
            }
            // Ids are unique by construction
            if let Err(e) = list.add(Phase::new(id, name, point_group).with_lattice(lattice)) {
                warn!("Skipping phase: {}", e);
            }
        }
        list
    }
}
