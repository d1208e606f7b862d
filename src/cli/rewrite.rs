use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use angmap::ang::{self, WriteOptions};

use super::{ColumnArgs, Config};

/// Read an ANG file and write it back
pub fn run(
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    columns: ColumnArgs,
) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let file_options = match config {
        Some(path) => Config::from_file(&path)?.write,
        None => WriteOptions::default(),
    };
    // Flags take precedence over the config file
    let options = WriteOptions {
        image_quality: columns.iq,
        confidence_index: columns.ci,
        sem_signal: columns.sem_signal,
        pattern_fit: columns.pattern_fit,
    }
    .or(file_options);

    let map = ang::read(&input)
        .with_context(|| format!("Failed to read ANG file: {}", input.display()))?;
    info!(
        "Read {} points in a {:?} grid with {} phases",
        map.size(),
        map.shape(),
        map.phases().len()
    );

    ang::write(&output, &map, &options)
        .with_context(|| format!("Failed to write ANG file: {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}
