//! # angmap - ANG orientation maps in Rust
//!
//! `angmap` reads and writes the `.ang` text format used to exchange
//! electron backscatter diffraction (EBSD) and precession electron
//! diffraction orientation maps, and keeps per-point data in a masked
//! property store so that a filtered subset of points can be worked on
//! without losing the values of the points outside it.
//!
//! ## Key Features
//!
//! - **Vendor detection**: EDAX TSL, EMsoft and NanoMegas ASTAR Index column
//!   layouts, with a generic fallback for anything else.
//! - **Header metadata**: phase ids, names, point groups and lattice
//!   constants recovered from the comment header.
//! - **Masked properties**: full-size arrays per property, read and written
//!   through the active-point mask only.
//! - **Aligned output**: fixed-point columns sized to their widest value,
//!   readable by MTEX and the vendor tools.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use angmap::ang::{self, WriteOptions};
//!
//! let mut map = ang::read("ni_scan.ang")?;
//!
//! // Keep only well-indexed points
//! let ci = map.prop().get("ci")?.first_component();
//! let mask = ci.iter().map(|&v| v > 0.1).collect();
//! map.set_mask(mask)?;
//!
//! ang::write("ni_scan_filtered.ang", &map, &WriteOptions::default())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`properties`]: masked property store
//! - [`phase`]: phase records and phase lists
//! - [`orientation`]: per-point Euler angle triples
//! - [`crystal_map`]: the map container with grid geometry
//! - [`ang`]: header parser, column resolver, reader and writer

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod ang;
pub mod crystal_map;
pub mod orientation;
pub mod phase;
pub mod properties;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::ang::{read, read_str, write, AngError, Vendor, WriteOptions};
    pub use crate::crystal_map::{CrystalMap, CrystalMapBuilder, Geometry, MapError, ScanUnit};
    pub use crate::orientation::Orientations;
    pub use crate::phase::{Lattice, Phase, PhaseList};
    pub use crate::properties::{MaskedProperties, PropertyError, PropertyValues};
}
