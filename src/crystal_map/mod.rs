//! # Crystal Map
//!
//! Container for one orientation map: per-point orientations, coordinates
//! and phase ids over a fixed point-id domain, a [`MaskedProperties`] store
//! for everything else, the phase list and the grid geometry.
//!
//! Points can be taken out of the data with [`CrystalMap::set_mask`]. The
//! accessors then only return the active points, while the `map_*` methods
//! lay the active values out on the full grid and fill the rest with a
//! placeholder.
//!
//! ```rust
//! use angmap::crystal_map::CrystalMapBuilder;
//! use angmap::orientation::Orientations;
//!
//! let map = CrystalMapBuilder::new(Orientations::identity(6))
//!     .shape(vec![2, 3])
//!     .steps(0.5, 0.5)
//!     .property("iq", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
//!     .build()?;
//! assert_eq!(map.ndim(), 2);
//! assert_eq!(map.x(), vec![0.0, 0.5, 1.0, 0.0, 0.5, 1.0]);
//! # Ok::<(), angmap::crystal_map::MapError>(())
//! ```

mod builder;
mod error;
mod geometry;


pub use builder::CrystalMapBuilder;
pub use error::MapError;
pub use geometry::Geometry;

use serde::{Deserialize, Serialize};

use crate::orientation::{Euler, Orientations};
use crate::phase::{PhaseList, NOT_INDEXED_ID};
use crate::properties::{MaskedProperties, PropertyValues};

/// Unit of the scan coordinates and step sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScanUnit {
    /// Micrometer
    #[default]
    #[serde(rename = "um")]
    Micrometer,
    /// Nanometer
    #[serde(rename = "nm")]
    Nanometer,
}

impl ScanUnit {
    /// Short unit symbol
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanUnit::Micrometer => "um",
            ScanUnit::Nanometer => "nm",
        }
    }
}

impl std::fmt::Display for ScanUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of a per-point item laid out on the full grid
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    /// Row-major values, `components` per grid position
    pub values: Vec<f64>,
    /// Values per grid position
    pub components: usize,
}

impl MapData {
    /// First component at every grid position
    pub fn first_component(&self) -> Vec<f64> {
        self.values
            .iter()
            .step_by(self.components.max(1))
            .copied()
            .collect()
    }
}

/// Orientation map over a fixed point-id domain
#[derive(Debug, Clone)]
pub struct CrystalMap {
    orientations: Orientations,
    phase_id: Vec<i32>,
    x: Vec<f64>,
    y: Vec<f64>,
    props: MaskedProperties,
    phases: PhaseList,
    geometry: Geometry,
    scan_unit: ScanUnit,
}

impl CrystalMap {
    /// Number of points in the full domain
    pub fn size(&self) -> usize {
        self.phase_id.len()
    }

    /// Number of active points
    pub fn active_size(&self) -> usize {
        self.props.active_len()
    }

    /// Grid geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Grid shape
    pub fn shape(&self) -> &[usize] {
        &self.geometry.shape
    }

    /// Number of grid dimensions
    pub fn ndim(&self) -> usize {
        self.geometry.ndim()
    }

    /// Step size along x
    pub fn dx(&self) -> f64 {
        self.geometry.dx
    }

    /// Step size along y
    pub fn dy(&self) -> f64 {
        self.geometry.dy
    }

    /// Unit of coordinates and steps
    pub fn scan_unit(&self) -> ScanUnit {
        self.scan_unit
    }

    /// Phases referenced by the phase ids
    pub fn phases(&self) -> &PhaseList {
        &self.phases
    }

    /// Mutable phase list
    pub fn phases_mut(&mut self) -> &mut PhaseList {
        &mut self.phases
    }

    /// Property store
    pub fn prop(&self) -> &MaskedProperties {
        &self.props
    }

    /// Mutable property store
    pub fn prop_mut(&mut self) -> &mut MaskedProperties {
        &mut self.props
    }

    /// Active mask, one entry per point id
    pub fn is_in_data(&self) -> &[bool] {
        self.props.mask()
    }

    /// Replace the active mask
    pub fn set_mask(&mut self, is_in_data: Vec<bool>) -> Result<(), MapError> {
        self.props.set_mask(is_in_data)?;
        Ok(())
    }

    /// Ids of the active points
    pub fn active_ids(&self) -> Vec<usize> {
        self.props.active_ids()
    }

    /// Orientations of the active points
    pub fn orientations(&self) -> Orientations {
        self.orientations.select(&self.active_ids())
    }

    /// Phase ids of the active points
    pub fn phase_id(&self) -> Vec<i32> {
        self.active_ids().iter().map(|&i| self.phase_id[i]).collect()
    }

    /// Overwrite the phase id of the active points
    pub fn set_phase_id(&mut self, phase_id: &[i32]) -> Result<(), MapError> {
        let ids = self.active_ids();
        if ids.len() != phase_id.len() {
            return Err(MapError::LengthMismatch {
                name: "phase_id".to_string(),
                expected: ids.len(),
                actual: phase_id.len(),
            });
        }
        for (&id, &value) in ids.iter().zip(phase_id) {
            self.phase_id[id] = value;
        }
        Ok(())
    }

    /// Whether any active point is not indexed
    pub fn has_not_indexed(&self) -> bool {
        self.phase_id().contains(&NOT_INDEXED_ID)
    }

    /// x coordinates of the active points
    pub fn x(&self) -> Vec<f64> {
        self.active_ids().iter().map(|&i| self.x[i]).collect()
    }

    /// y coordinates of the active points
    pub fn y(&self) -> Vec<f64> {
        self.active_ids().iter().map(|&i| self.y[i]).collect()
    }

    /// Orientations on the full grid, inactive positions set to `fill`
    pub fn map_orientations(&self, decimals: Option<u32>, fill: f64) -> Vec<Euler> {
        let mut grid = vec![[fill; 3]; self.geometry.size()];
        for id in self.grid_ids() {
            let euler = self.orientations.euler()[id];
            grid[id] = euler.map(|v| round_to(v, decimals));
        }
        grid
    }

    /// Phase ids on the full grid, inactive positions set to `fill`
    pub fn map_phase_id(&self, fill: i32) -> Vec<i32> {
        let mut grid = vec![fill; self.geometry.size()];
        for id in self.grid_ids() {
            grid[id] = self.phase_id[id];
        }
        grid
    }

    /// Property values on the full grid, inactive positions set to `fill`
    pub fn map_property(
        &self,
        name: &str,
        decimals: Option<u32>,
        fill: f64,
    ) -> Result<MapData, MapError> {
        let values = self.props.get(name)?;
        let components = values.components();
        let flat = to_f64(&values);

        let mut grid = vec![fill; self.geometry.size() * components];
        for (k, id) in self.active_ids().into_iter().enumerate() {
            if id >= self.geometry.size() {
                continue;
            }
            for c in 0..components {
                grid[id * components + c] = round_to(flat[k * components + c], decimals);
            }
        }
        Ok(MapData {
            values: grid,
            components,
        })
    }

    fn grid_ids(&self) -> impl Iterator<Item = usize> + '_ {
        let size = self.geometry.size();
        self.active_ids().into_iter().filter(move |&id| id < size)
    }
}

fn to_f64(values: &PropertyValues) -> Vec<f64> {
    match (values.as_f64(), values.as_i64()) {
        (Some(v), _) => v.to_vec(),
        (None, Some(v)) => v.iter().map(|&x| x as f64).collect(),
        (None, None) => Vec::new(),
    }
}

/// Round `value` to `decimals` decimal places
pub(crate) fn round_to(value: f64, decimals: Option<u32>) -> f64 {
    match decimals {
        Some(d) => {
            let factor = 10f64.powi(d as i32);
            let rounded = (value * factor).round() / factor;
            if rounded == 0.0 {
                0.0
            } else {
                rounded
            }
        }
        None => value,
    }
}
