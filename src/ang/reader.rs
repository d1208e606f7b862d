use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};

use super::header::{Header, COMMENT};
use super::vendor::{resolve_columns, VendorSchema};
use super::AngError;
use crate::crystal_map::{CrystalMap, CrystalMapBuilder};
use crate::orientation::Orientations;
use crate::phase::{Phase, PhaseList, NOT_INDEXED_ID};

/// Columns with a dedicated place in the crystal map
const REQUIRED_COLUMNS: [&str; 6] = ["euler1", "euler2", "euler3", "x", "y", "phase_id"];

/// Read an ANG file into a crystal map
pub fn read<P: AsRef<Path>>(path: P) -> Result<CrystalMap, AngError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let map = read_str(&text)?;
    info!(
        "Read {} points ({:?}) and {} phases from {}",
        map.size(),
        map.shape(),
        map.phases().len(),
        path.display()
    );
    Ok(map)
}

/// Parse the contents of an ANG file
pub fn read_str(text: &str) -> Result<CrystalMap, AngError> {
    let (header, n_header_lines) = Header::parse(text);
    let table = NumericTable::parse(text, n_header_lines)?;

    let schema = resolve_columns(header.vendor(), table.n_cols());
    debug!(
        "Resolved {} columns for vendor '{}': {:?}",
        schema.columns.len(),
        schema.vendor,
        schema.columns
    );

    let phases = header.phases().to_phase_list();
    assemble(table, &schema, phases)
}

/// Whitespace-delimited numeric rows, stored column by column
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NumericTable {
    columns: Vec<Vec<f64>>,
    n_rows: usize,
    first_line: usize,
}

impl NumericTable {
    /// Parse every line after the first `skip` header lines
    ///
    /// Blank lines and comment lines are ignored. All rows must have the
    /// same number of values.
    pub(crate) fn parse(text: &str, skip: usize) -> Result<Self, AngError> {
        let mut columns: Vec<Vec<f64>> = Vec::new();
        let mut n_rows = 0;
        let mut first_line = 0;

        for (idx, line) in text.lines().enumerate().skip(skip) {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with(COMMENT) {
                continue;
            }

            let row: Vec<f64> = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| AngError::InvalidFormat {
                        line: line_no,
                        message: format!("could not convert '{}' to a number", token),
                    })
                })
                .collect::<Result<_, _>>()?;

            if n_rows == 0 {
                columns = vec![Vec::new(); row.len()];
                first_line = line_no;
            } else if row.len() != columns.len() {
                return Err(AngError::InvalidFormat {
                    line: line_no,
                    message: format!("expected {} columns, found {}", columns.len(), row.len()),
                });
            }
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
            n_rows += 1;
        }

        if n_rows == 0 {
            return Err(AngError::InvalidFormat {
                line: skip + 1,
                message: "no data rows after the header".to_string(),
            });
        }
        Ok(Self {
            columns,
            n_rows,
            first_line,
        })
    }

    pub(crate) fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub(crate) fn n_rows(&self) -> usize {
        self.n_rows
    }
}

/// Split the table by column name and build the crystal map
fn assemble(
    table: NumericTable,
    schema: &VendorSchema,
    mut phases: PhaseList,
) -> Result<CrystalMap, AngError> {
    let n_rows = table.n_rows();
    let first_line = table.first_line;
    let mut dedicated: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut props: Vec<(String, Vec<f64>)> = Vec::new();

    for (name, column) in schema.columns.iter().zip(table.columns) {
        match REQUIRED_COLUMNS.iter().find(|&&r| r == name.as_str()) {
            Some(&required) => {
                dedicated.insert(required, column);
            }
            None => props.push((name.clone(), column)),
        }
    }

    let mut take = |name: &str| {
        dedicated.remove(name).ok_or_else(|| AngError::InvalidFormat {
            line: first_line,
            message: format!(
                "missing required column '{}' ({} columns in the file)",
                name,
                schema.columns.len()
            ),
        })
    };
    let orientations = Orientations::from_columns(take("euler1")?, take("euler2")?, take("euler3")?);
    let x = take("x")?;
    let y = take("y")?;
    let mut phase_id: Vec<i32> = take("phase_id")?
        .into_iter()
        .map(|v| v.round() as i32)
        .collect();

    if let Some(rule) = schema.vendor.not_indexed_rule() {
        if let Some((_, values)) = props.iter().find(|(name, _)| name == rule.property) {
            let mut n_not_indexed = 0;
            for (id, &value) in phase_id.iter_mut().zip(values) {
                if rule.matches(value) {
                    *id = NOT_INDEXED_ID;
                    n_not_indexed += 1;
                }
            }
            debug!("{} of {} points are not indexed", n_not_indexed, n_rows);
        }
    }

    for id in phase_id.iter().copied() {
        if id != NOT_INDEXED_ID && phases.get(id).is_none() {
            debug!("Phase id {} is not described in the header", id);
            phases.add(Phase::new(id, "", ""))?;
        }
    }

    let mut builder = CrystalMapBuilder::new(orientations)
        .coordinates(x, y)
        .phase_id(phase_id)
        .phases(phases)
        .scan_unit(schema.vendor.scan_unit());
    for (name, values) in props {
        builder = builder.property(name, values);
    }
    Ok(builder.build()?)
}
