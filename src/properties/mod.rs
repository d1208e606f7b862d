//! # Masked Property Store
//!
//! Per-point properties of a crystal map are kept in full-domain arrays
//! indexed by point id. A separate boolean mask marks which points are
//! currently part of the data (for example after filtering out points with
//! a low confidence index). All access goes through [`MaskedProperties::get`]
//! and [`MaskedProperties::set`], which only see the active points.
//!
//! ## Example
//!
//! ```rust
//! use angmap::properties::MaskedProperties;
//!
//! let mut props = MaskedProperties::new(5);
//! props.set_mask(vec![true, true, false, true, true])?;
//! props.set("iq", vec![1.0, 2.0, 3.0, 4.0])?;
//!
//! let iq = props.get("iq")?;
//! assert_eq!(iq.as_f64(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
//! # Ok::<(), angmap::properties::PropertyError>(())
//! ```

mod array;
mod error;
mod store;
mod values;


pub use error::PropertyError;
pub use store::MaskedProperties;
pub use values::{ElementType, PropertyData, PropertyValues};
