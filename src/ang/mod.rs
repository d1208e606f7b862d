//! # ANG File Format
//!
//! Reading and writing of the `.ang` text format for orientation maps.
//!
//! An ANG file starts with a block of `#` comment lines followed by one
//! whitespace-separated row of numbers per map point. The column layout is
//! not stored in the file; it depends on the software that produced it:
//!
//! | Vendor | Footprint | Columns |
//! |--------|-----------|---------|
//! | EDAX TSL (default) | none | 14 |
//! | EMsoft `EMdpmerge` | `EMsoft` | 8 |
//! | NanoMegas ASTAR Index | `ACOM` | 9 |
//!
//! Files whose column count does not match the detected vendor are read
//! with a generic layout (`euler1, euler2, euler3, x, y, unknown1,
//! unknown2, phase_id, unknown3, ...`).
//!
//! Points in TSL files with a confidence index of −1 are marked as not
//! indexed (phase id −1).
//!
//! ## Example
//!
//! ```rust,no_run
//! use angmap::ang::{self, WriteOptions};
//!
//! let map = ang::read("scan.ang")?;
//! println!("{} points, {} phases", map.size(), map.phases().len());
//!
//! let options = WriteOptions::new().confidence_index("ci");
//! ang::write("scan_copy.ang", &map, &options)?;
//! # Ok::<(), angmap::ang::AngError>(())
//! ```

mod error;
pub mod header;
mod options;
mod reader;
pub mod vendor;
mod writer;

#[cfg(test)]
mod tests;

pub use error::AngError;
pub use header::{Header, PhaseMetadata};
pub use options::{OutputSlot, WriteOptions, DECIMALS};
pub use reader::{read, read_str};
pub use vendor::{resolve_columns, NotIndexedRule, Vendor, VendorSchema};
pub use writer::{encode, write};

/// File extensions handled by this module
pub const FILE_EXTENSIONS: &[&str] = &["ang"];
