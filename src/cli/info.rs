use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use angmap::ang;
use angmap::crystal_map::CrystalMap;
use angmap::phase::Phase;

#[cfg(feature = "colorized_output")]
use console::style;

/// Summary of a map, printed as text or JSON
#[derive(Debug, Serialize)]
struct MapSummary {
    file: String,
    points: usize,
    shape: Vec<usize>,
    dx: f64,
    dy: f64,
    scan_unit: String,
    not_indexed: usize,
    phases: Vec<Phase>,
    properties: Vec<String>,
}

impl MapSummary {
    fn new(file: &Path, map: &CrystalMap) -> Self {
        Self {
            file: file.display().to_string(),
            points: map.size(),
            shape: map.shape().to_vec(),
            dx: map.dx(),
            dy: map.dy(),
            scan_unit: map.scan_unit().to_string(),
            not_indexed: map.phase_id().iter().filter(|&&id| id < 0).count(),
            phases: map.phases().iter().cloned().collect(),
            properties: map.prop().keys().map(str::to_string).collect(),
        }
    }
}

#[cfg(feature = "colorized_output")]
fn heading(text: &str) -> String {
    style(text).bold().to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn heading(text: &str) -> String {
    text.to_string()
}

/// Display information about an ANG file
pub fn run(file: PathBuf, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    let map = ang::read(&file).context("Failed to read ANG file")?;
    let summary = MapSummary::new(&file, &map);

    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}", heading("ANG File Information"));
    println!("====================");
    println!("File: {}", summary.file);
    println!();

    println!("{}", heading("Grid:"));
    println!("  Points: {}", summary.points);
    println!("  Shape: {:?}", summary.shape);
    println!(
        "  Step size: {} x {} {}",
        summary.dx, summary.dy, summary.scan_unit
    );
    println!("  Not indexed: {}", summary.not_indexed);
    println!();

    println!("{}", heading("Phases:"));
    for phase in &summary.phases {
        let [a, b, c, alpha, beta, gamma] = phase.structure.lattice.abcabg();
        println!(
            "  {:3}. {} (point group: {}, lattice: {:.3} {:.3} {:.3} {:.1} {:.1} {:.1})",
            phase.id, phase.name, phase.point_group, a, b, c, alpha, beta, gamma
        );
    }
    println!();

    println!("{}", heading("Properties:"));
    for name in &summary.properties {
        println!("  {}", name);
    }

    Ok(())
}
