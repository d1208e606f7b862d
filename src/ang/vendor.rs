//! Vendor column layouts and column-count resolution.

use log::warn;
use serde::Serialize;

use crate::crystal_map::ScanUnit;

/// Software that produced an ANG file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    /// EDAX TSL OIM (the default assumption)
    Tsl,
    /// EMsoft `EMdpmerge`
    Emsoft,
    /// NanoMegas ASTAR Index
    Astar,
    /// Unrecognized column layout
    Unknown,
}

/// Vendors that leave a footprint in the header, in detection order
const DETECTION_ORDER: [Vendor; 2] = [Vendor::Emsoft, Vendor::Astar];

const TSL_COLUMNS: &[&str] = &[
    "euler1",
    "euler2",
    "euler3",
    "x",
    "y",
    "iq", // Image quality from Hough transform
    "ci", // Confidence index
    "phase_id",
    "unknown1",
    "fit", // Pattern fit
    "unknown2",
    "unknown3",
    "unknown4",
    "unknown5",
];

const EMSOFT_COLUMNS: &[&str] = &[
    "euler1",
    "euler2",
    "euler3",
    "x",
    "y",
    "iq", // Image quality from Krieger Lassen's method
    "dp", // Dot product
    "phase_id",
];

const ASTAR_COLUMNS: &[&str] = &[
    "euler1",
    "euler2",
    "euler3",
    "x",
    "y",
    "ind", // Correlation index
    "rel", // Reliability
    "phase_id",
    "relx100", // Reliability x 100
];

const UNKNOWN_COLUMNS: &[&str] = &[
    "euler1", "euler2", "euler3", "x", "y", "unknown1", "unknown2", "phase_id",
];

/// Number of `unknownN` names already used by the fallback layout
const UNKNOWN_NAMED: usize = 2;

/// Points whose `property` equals `value` are not indexed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotIndexedRule {
    /// Property inspected by the rule
    pub property: &'static str,
    /// Value marking a point as not indexed
    pub value: f64,
}

impl NotIndexedRule {
    /// Whether `value` marks a point as not indexed
    pub fn matches(&self, value: f64) -> bool {
        value == self.value
    }
}

impl Vendor {
    /// Lowercase vendor name
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Tsl => "tsl",
            Vendor::Emsoft => "emsoft",
            Vendor::Astar => "astar",
            Vendor::Unknown => "unknown",
        }
    }

    /// Header substring identifying the vendor
    pub fn footprint(&self) -> Option<&'static str> {
        match self {
            Vendor::Emsoft => Some("EMsoft"),
            Vendor::Astar => Some("ACOM"),
            Vendor::Tsl | Vendor::Unknown => None,
        }
    }

    /// Detect the vendor from header lines
    ///
    /// The first vendor in detection order whose footprint occurs in any
    /// line wins; without a footprint the file is assumed to be TSL.
    pub fn detect<S: AsRef<str>>(header: &[S]) -> Vendor {
        DETECTION_ORDER
            .into_iter()
            .find(|vendor| {
                vendor.footprint().is_some_and(|footprint| {
                    header.iter().any(|line| line.as_ref().contains(footprint))
                })
            })
            .unwrap_or(Vendor::Tsl)
    }

    /// Expected column names, in file order
    ///
    /// For [`Vendor::Unknown`] this is the base layout before extension.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Vendor::Tsl => TSL_COLUMNS,
            Vendor::Emsoft => EMSOFT_COLUMNS,
            Vendor::Astar => ASTAR_COLUMNS,
            Vendor::Unknown => UNKNOWN_COLUMNS,
        }
    }

    /// Unit of the scan coordinates
    pub fn scan_unit(&self) -> ScanUnit {
        match self {
            Vendor::Tsl | Vendor::Emsoft => ScanUnit::Micrometer,
            Vendor::Astar | Vendor::Unknown => ScanUnit::Nanometer,
        }
    }

    /// Convention for marking points as not indexed, if the vendor has one
    pub fn not_indexed_rule(&self) -> Option<NotIndexedRule> {
        match self {
            Vendor::Tsl => Some(NotIndexedRule {
                property: "ci",
                value: -1.0,
            }),
            // TODO: add the not-indexed convention for ASTAR Index files
            Vendor::Emsoft | Vendor::Astar | Vendor::Unknown => None,
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Column layout resolved for a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorSchema {
    /// Vendor whose layout is used
    pub vendor: Vendor,
    /// Column names, one per file column
    pub columns: Vec<String>,
}

/// Resolve the column names for a file with `n_cols` columns
///
/// When the vendor's layout does not have exactly `n_cols` columns, the
/// fallback layout is used instead and extended with `unknown3`,
/// `unknown4`, ... until it covers every file column.
pub fn resolve_columns(vendor: Vendor, n_cols: usize) -> VendorSchema {
    let expected = vendor.columns();
    if expected.len() == n_cols {
        return VendorSchema {
            vendor,
            columns: expected.iter().map(|c| c.to_string()).collect(),
        };
    }

    warn!(
        "Number of columns, {}, in the file is not equal to the expected number of columns, {}, \
         for the assumed vendor '{}'. Will therefore assume the following columns: euler1, \
         euler2, euler3, x, y, unknown1, unknown2, phase_id, unknown3, unknown4, etc.",
        n_cols,
        expected.len(),
        vendor
    );

    let mut columns: Vec<String> = UNKNOWN_COLUMNS
        .iter()
        .take(n_cols)
        .map(|c| c.to_string())
        .collect();
    let excess = n_cols.saturating_sub(UNKNOWN_COLUMNS.len());
    columns.extend((1..=excess).map(|k| format!("unknown{}", k + UNKNOWN_NAMED)));

    VendorSchema {
        vendor: Vendor::Unknown,
        columns,
    }
}
