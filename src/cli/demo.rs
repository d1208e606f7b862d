use anyhow::{Context, Result};
use log::info;
use std::f64::consts::PI;
use std::path::PathBuf;

use angmap::ang::{self, WriteOptions};
use angmap::crystal_map::{CrystalMap, CrystalMapBuilder};
use angmap::orientation::Orientations;
use angmap::phase::{Lattice, Phase, PhaseList};

/// Generate a synthetic two-phase map and write it as ANG
pub fn run(output: PathBuf, rows: usize, cols: usize) -> Result<()> {
    if rows == 0 || cols == 0 {
        anyhow::bail!("Map must have at least one row and one column");
    }

    info!("Generating {} x {} demo map", rows, cols);
    let map = build_demo_map(rows, cols)?;

    ang::write(&output, &map, &WriteOptions::default())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!("Demo map written to {}", output.display());
    Ok(())
}

/// Left half austenite, right half ferrite, with a band of unindexed points
fn build_demo_map(rows: usize, cols: usize) -> Result<CrystalMap> {
    let n = rows * cols;
    let mut euler = Vec::with_capacity(n);
    let mut phase_id = Vec::with_capacity(n);
    let mut iq = Vec::with_capacity(n);
    let mut ci = Vec::with_capacity(n);

    for row in 0..rows {
        for col in 0..cols {
            let u = col as f64 / cols as f64;
            let v = row as f64 / rows as f64;
            euler.push([
                2.0 * PI * u,
                0.5 * PI * v,
                (2.0 * PI * (u + v)) % (2.0 * PI),
            ]);

            let boundary = col == cols / 2;
            phase_id.push(match (boundary, col < cols / 2) {
                (true, _) => -1,
                (false, true) => 1,
                (false, false) => 2,
            });
            iq.push(if boundary { 20.0 } else { 100.0 + 50.0 * v });
            ci.push(if boundary { -1.0 } else { 0.5 + 0.4 * u });
        }
    }

    let phases = PhaseList::from_phases([
        Phase::new(1, "austenite", "m-3m")
            .with_lattice(Lattice::from_abcabg([3.595, 3.595, 3.595, 90.0, 90.0, 90.0])),
        Phase::new(2, "ferrite", "m-3m")
            .with_lattice(Lattice::from_abcabg([2.866, 2.866, 2.866, 90.0, 90.0, 90.0])),
    ])?;

    let map = CrystalMapBuilder::new(Orientations::from_euler(euler))
        .shape(if rows == 1 { vec![cols] } else { vec![rows, cols] })
        .steps(0.1, 0.1)
        .phase_id(phase_id)
        .phases(phases)
        .property("iq", iq)
        .property("ci", ci)
        .build()?;
    Ok(map)
}
