use serde::{Deserialize, Serialize};

/// Relative tolerance used when grouping coordinates into grid lines
const COORD_TOLERANCE: f64 = 1e-6;

/// Grid shape and step sizes of a crystal map
///
/// `shape` is row-major: `[ncols]` for a single row, `[nrows, ncols]` for a
/// 2D map and `[nlayers, nrows, ncols]` for volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Grid dimensions, slowest varying first
    pub shape: Vec<usize>,
    /// Step size along x (columns)
    pub dx: f64,
    /// Step size along y (rows)
    pub dy: f64,
    /// Step size along z (layers)
    pub dz: f64,
}

impl Geometry {
    /// Geometry with the given shape and unit steps
    pub fn new(shape: Vec<usize>) -> Self {
        Self {
            shape,
            dx: 1.0,
            dy: 1.0,
            dz: 1.0,
        }
    }

    /// Builder-style step setter
    pub fn with_steps(mut self, dy: f64, dx: f64) -> Self {
        self.dy = dy;
        self.dx = dx;
        self
    }

    /// Infer a 1D or 2D geometry from per-point coordinates
    ///
    /// Rows and columns are the distinct y and x values. Returns `None` when
    /// those counts do not describe a full grid of `x.len()` points.
    pub fn from_coordinates(x: &[f64], y: &[f64]) -> Option<Self> {
        let xs = distinct_sorted(x);
        let ys = distinct_sorted(y);
        let (ncols, nrows) = (xs.len(), ys.len());
        if ncols == 0 || ncols * nrows != x.len() {
            return None;
        }

        let dx = first_step(&xs);
        let dy = first_step(&ys);
        let shape = if nrows == 1 {
            vec![ncols]
        } else {
            vec![nrows, ncols]
        };
        Some(Self {
            shape,
            dx,
            dy,
            dz: 1.0,
        })
    }

    /// Number of grid dimensions
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Number of grid positions
    pub fn size(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of rows (1 for a single-row map)
    pub fn nrows(&self) -> usize {
        match self.shape.as_slice() {
            [] | [_] => 1,
            [.., rows, _] => *rows,
        }
    }

    /// Number of columns
    pub fn ncols(&self) -> usize {
        self.shape.last().copied().unwrap_or(0)
    }
}

fn distinct_sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let scale = sorted
        .iter()
        .fold(1.0_f64, |acc, v| acc.max(v.abs()))
        * COORD_TOLERANCE;
    sorted.dedup_by(|a, b| (*a - *b).abs() <= scale);
    sorted
}

fn first_step(distinct: &[f64]) -> f64 {
    match distinct {
        [first, second, ..] => second - first,
        _ => 1.0,
    }
}
