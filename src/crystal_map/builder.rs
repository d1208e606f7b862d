use log::warn;

use super::{CrystalMap, Geometry, MapError, ScanUnit};
use crate::orientation::Orientations;
use crate::phase::{Phase, PhaseList};
use crate::properties::{MaskedProperties, PropertyValues};

/// Builder for [`CrystalMap`]
///
/// Only the orientations are required. Missing phase ids default to zero
/// with a single unnamed phase; missing coordinates are generated from the
/// shape and step sizes; a missing shape is inferred from the coordinates
/// when they form a full grid, and is one-dimensional otherwise.
#[derive(Debug, Clone)]
pub struct CrystalMapBuilder {
    orientations: Orientations,
    phase_id: Option<Vec<i32>>,
    coordinates: Option<(Vec<f64>, Vec<f64>)>,
    shape: Option<Vec<usize>>,
    steps: Option<(f64, f64)>,
    phases: Option<PhaseList>,
    scan_unit: ScanUnit,
    properties: Vec<(String, PropertyValues)>,
    is_in_data: Option<Vec<bool>>,
}

impl CrystalMapBuilder {
    /// Start a map with one point per orientation
    pub fn new(orientations: Orientations) -> Self {
        Self {
            orientations,
            phase_id: None,
            coordinates: None,
            shape: None,
            steps: None,
            phases: None,
            scan_unit: ScanUnit::default(),
            properties: Vec::new(),
            is_in_data: None,
        }
    }

    /// Per-point phase ids
    pub fn phase_id(mut self, phase_id: Vec<i32>) -> Self {
        self.phase_id = Some(phase_id);
        self
    }

    /// Per-point x and y coordinates
    pub fn coordinates(mut self, x: Vec<f64>, y: Vec<f64>) -> Self {
        self.coordinates = Some((x, y));
        self
    }

    /// Row-major grid shape
    pub fn shape(mut self, shape: Vec<usize>) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Step sizes along y (rows) and x (columns)
    pub fn steps(mut self, dy: f64, dx: f64) -> Self {
        self.steps = Some((dy, dx));
        self
    }

    /// Phase list
    pub fn phases(mut self, phases: PhaseList) -> Self {
        self.phases = Some(phases);
        self
    }

    /// Coordinate unit
    pub fn scan_unit(mut self, scan_unit: ScanUnit) -> Self {
        self.scan_unit = scan_unit;
        self
    }

    /// Per-point property covering every point
    pub fn property(mut self, name: impl Into<String>, values: impl Into<PropertyValues>) -> Self {
        self.properties.push((name.into(), values.into()));
        self
    }

    /// Initial active mask
    pub fn mask(mut self, is_in_data: Vec<bool>) -> Self {
        self.is_in_data = Some(is_in_data);
        self
    }

    /// Validate the inputs and assemble the map
    pub fn build(self) -> Result<CrystalMap, MapError> {
        let n = self.orientations.len();

        let phase_id = self.phase_id.unwrap_or_else(|| vec![0; n]);
        check_len("phase_id", n, phase_id.len())?;

        let geometry = match (&self.shape, &self.coordinates) {
            (Some(shape), _) => Geometry::new(shape.clone()),
            (None, Some((x, y))) => {
                check_len("x", n, x.len())?;
                check_len("y", n, y.len())?;
                Geometry::from_coordinates(x, y).unwrap_or_else(|| {
                    warn!("Coordinates do not form a full grid; treating the map as 1D");
                    Geometry::new(vec![n])
                })
            }
            (None, None) => Geometry::new(vec![n]),
        };
        let geometry = match self.steps {
            Some((dy, dx)) => geometry.with_steps(dy, dx),
            None => geometry,
        };
        if geometry.size() != n {
            return Err(MapError::ShapeMismatch {
                shape: geometry.shape.clone(),
                expected: geometry.size(),
                actual: n,
            });
        }

        let (x, y) = match self.coordinates {
            Some((x, y)) => {
                check_len("x", n, x.len())?;
                check_len("y", n, y.len())?;
                (x, y)
            }
            None => grid_coordinates(&geometry),
        };

        let phases = match self.phases {
            Some(phases) => phases,
            None => PhaseList::from_phases(
                sorted_unique(&phase_id)
                    .into_iter()
                    .map(|id| Phase::new(id, "", "")),
            )?,
        };

        let mut props = MaskedProperties::new(n);
        for (name, values) in self.properties {
            props.set(name, values)?;
        }
        if let Some(mask) = self.is_in_data {
            props.set_mask(mask)?;
        }

        let mut map = CrystalMap {
            orientations: self.orientations,
            phase_id,
            x,
            y,
            props,
            phases,
            geometry,
            scan_unit: self.scan_unit,
        };
        if map.has_not_indexed() {
            map.phases.add_not_indexed();
        }
        Ok(map)
    }
}

fn check_len(name: &str, expected: usize, actual: usize) -> Result<(), MapError> {
    if expected != actual {
        return Err(MapError::LengthMismatch {
            name: name.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn sorted_unique(ids: &[i32]) -> Vec<i32> {
    let mut unique: Vec<i32> = ids.iter().copied().filter(|&id| id >= 0).collect();
    unique.sort_unstable();
    unique.dedup();
    unique
}

/// Row-major coordinates, `x = col * dx` and `y = row * dy`
fn grid_coordinates(geometry: &Geometry) -> (Vec<f64>, Vec<f64>) {
    let ncols = geometry.ncols().max(1);
    let size = geometry.size();
    let x = (0..size).map(|i| (i % ncols) as f64 * geometry.dx).collect();
    let y = (0..size)
        .map(|i| ((i / ncols) % geometry.nrows().max(1)) as f64 * geometry.dy)
        .collect();
    (x, y)
}
