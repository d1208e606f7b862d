use std::io::Write as _;
use std::path::Path;

use log::{debug, info};

use super::header::COMMENT;
use super::options::{OutputSlot, WriteOptions, DECIMALS};
use super::AngError;
use crate::crystal_map::CrystalMap;
use crate::phase::NOT_INDEXED_ID;
use crate::properties::PropertyError;

/// Placeholder for orientations and properties of points not in the data
const FILL_VALUE: f64 = 0.0;

/// Write a crystal map to an ANG file
///
/// The map must have at most two dimensions. The whole file is encoded in
/// memory and then moved into place, so nothing is created at `path` when
/// encoding fails.
pub fn write<P: AsRef<Path>>(
    path: P,
    map: &CrystalMap,
    options: &WriteOptions,
) -> Result<(), AngError> {
    let path = path.as_ref();
    let contents = encode(map, options)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.persist(path).map_err(|e| e.error)?;

    info!("Wrote {} points to {}", map.size(), path.display());
    Ok(())
}

/// Encode a crystal map as ANG text
pub fn encode(map: &CrystalMap, options: &WriteOptions) -> Result<String, AngError> {
    if map.ndim() > 2 {
        return Err(AngError::UnsupportedDimensions { ndim: map.ndim() });
    }

    let grid = GridLayout::of(map);
    let map_size = grid.nrows * grid.ncols;

    let euler = map.map_orientations(Some(DECIMALS as u32), FILL_VALUE);
    let x: Vec<f64> = (0..map_size)
        .map(|i| (i % grid.ncols) as f64 * grid.dx)
        .collect();
    let y: Vec<f64> = (0..map_size)
        .map(|i| (i / grid.ncols) as f64 * grid.dy)
        .collect();
    let phase_id = map.map_phase_id(NOT_INDEXED_ID);

    let [iq, ci, sem_signal, fit] = OutputSlot::ALL.map(|slot| output_column(map, slot, options));
    let (iq, ci, sem_signal, fit) = (iq?, ci?, sem_signal?, fit?);

    let x_width = column_width(column_max(&x), DECIMALS);
    let y_width = column_width(column_max(&y), DECIMALS);
    let iq_width = column_width(column_max(&iq), DECIMALS);
    let ci_width = column_width(column_max(&ci), DECIMALS);
    let fit_width = column_width(column_max(&fit), DECIMALS);
    let sem_width = column_width(column_max(&sem_signal), DECIMALS);

    let mut out = String::with_capacity(map_size * 96);
    for line in header_lines(map, &grid) {
        let line = line.trim_end();
        if line.is_empty() {
            out.push(COMMENT);
        } else {
            out.push_str(&format!("{} {}", COMMENT, line));
        }
        out.push('\n');
    }

    let d = DECIMALS;
    for i in 0..map_size {
        let [phi1, big_phi, phi2] = euler.get(i).copied().unwrap_or([FILL_VALUE; 3]);
        out.push_str(&format!(
            "{:8.d$}  {:8.d$}  {:8.d$}  {:xw$.d$}  {:yw$.d$}  {:iw$.d$}  {:cw$.d$}  {}  {:fw$.d$}  {:sw$.d$}",
            phi1,
            big_phi,
            phi2,
            x[i],
            y[i],
            iq[i],
            ci[i],
            phase_id.get(i).copied().unwrap_or(NOT_INDEXED_ID),
            fit[i],
            sem_signal[i],
            d = d,
            xw = x_width,
            yw = y_width,
            iw = iq_width,
            cw = ci_width,
            fw = fit_width,
            sw = sem_width,
        ));
        out.push('\n');
    }
    Ok(out)
}

/// Rows, columns and steps of the output grid
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridLayout {
    nrows: usize,
    ncols: usize,
    dy: f64,
    dx: f64,
}

impl GridLayout {
    fn of(map: &CrystalMap) -> Self {
        let geometry = map.geometry();
        match geometry.shape.as_slice() {
            [rows, cols] => Self {
                nrows: *rows,
                ncols: *cols,
                dy: geometry.dy,
                dx: geometry.dx,
            },
            shape => Self {
                nrows: 1,
                ncols: shape.first().copied().unwrap_or(0),
                dy: 1.0,
                dx: geometry.dx,
            },
        }
    }
}

/// Grid values of the property written to `slot`
///
/// Resolution order: the explicit name in `options`, then the first alias
/// of the slot matching a property name, then zeros.
fn output_column(
    map: &CrystalMap,
    slot: OutputSlot,
    options: &WriteOptions,
) -> Result<Vec<f64>, AngError> {
    let map_size = map.geometry().size();
    let name = match options.get(slot) {
        Some(name) if map.prop().contains(name) => Some(name.to_string()),
        Some(name) => return Err(PropertyError::KeyNotFound(name.to_string()).into()),
        None => find_by_alias(map.prop().keys(), slot),
    };

    match name {
        Some(name) => {
            debug!("Writing property '{}' as {}", name, slot.label());
            let data = map.map_property(&name, Some(DECIMALS as u32), FILL_VALUE)?;
            Ok(data.first_component())
        }
        None => {
            debug!("No property found for {}; writing zeros", slot.label());
            Ok(vec![0.0; map_size])
        }
    }
}

/// "Image_Quality" -> "imagequality"
fn normalize(name: &str) -> String {
    name.to_lowercase().replace('_', "")
}

/// First property, by alias priority, that matches one of the slot's aliases
fn find_by_alias<'a>(names: impl Iterator<Item = &'a str>, slot: OutputSlot) -> Option<String> {
    let names: Vec<&str> = names.collect();
    let normalized: Vec<String> = names.iter().map(|n| normalize(n)).collect();
    slot.aliases().iter().find_map(|alias| {
        let alias = normalize(alias);
        normalized
            .iter()
            .position(|n| *n == alias)
            .map(|i| names[i].to_string())
    })
}

fn column_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))
        .unwrap_or(0.0)
}

/// Width fitting the integer part of `max_value` plus the decimals
fn column_width(max_value: f64, decimals: usize) -> usize {
    let integer = max_value.floor() as i64;
    integer.to_string().len() + decimals + 1
}

fn header_lines(map: &CrystalMap, grid: &GridLayout) -> Vec<String> {
    let mut lines: Vec<String> = vec![
        "TEM_PIXperUM           1.000000".to_string(),
        "x-star                 0.000000".to_string(),
        "y-star                 0.000000".to_string(),
        "z-star                 0.000000".to_string(),
        "WorkingDistance        0.000000".to_string(),
        String::new(),
    ];

    for phase in map.phases().indexed() {
        let constants = phase
            .structure
            .lattice
            .abcabg()
            .iter()
            .map(|v| format!("{:.3}", v))
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("Phase {}", phase.id));
        lines.push(format!("MaterialName    {}", phase.name));
        lines.push(format!("Formula    {}", phase.name));
        lines.push("Info".to_string());
        lines.push(format!("Symmetry    {}", phase.point_group));
        lines.push(format!("LatticeConstants    {}", constants));
        lines.push("NumberFamilies    0".to_string());
    }

    lines.push("GRID: SqrGrid".to_string());
    lines.push(format!("XSTEP: {:.6}", map.dx()));
    lines.push(format!("YSTEP: {:.6}", map.dy()));
    lines.push(format!("NCOLS_ODD: {}", grid.ncols));
    lines.push(format!("NCOLS_EVEN: {}", grid.ncols));
    lines.push(format!("NROWS: {}", grid.nrows));
    lines.push(String::new());
    lines.push(format!("OPERATOR: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")));
    lines.push(String::new());
    lines.push("SAMPLEID:".to_string());
    lines.push(String::new());
    lines.push("SCANID:".to_string());
    lines
}
