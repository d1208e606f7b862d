use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod demo;
mod info;
mod rewrite;

pub use config::Config;

/// angmap - ANG orientation map toolkit
#[derive(Parser)]
#[command(name = "angmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Property names used for the conventional output columns
#[derive(clap::Args, Debug, Default)]
pub struct ColumnArgs {
    /// Property written as image quality
    #[arg(long, value_name = "NAME")]
    iq: Option<String>,

    /// Property written as confidence index
    #[arg(long, value_name = "NAME")]
    ci: Option<String>,

    /// Property written as SEM signal
    #[arg(long, value_name = "NAME")]
    sem_signal: Option<String>,

    /// Property written as pattern fit
    #[arg(long, value_name = "NAME")]
    pattern_fit: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display information about an ANG file
    Info {
        /// Input ANG file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read an ANG file and write it back in normalized form
    Rewrite {
        /// Input ANG file path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output ANG file path
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Load column settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        #[command(flatten)]
        columns: ColumnArgs,
    },

    /// Generate a synthetic two-phase map for testing
    Demo {
        /// Output ANG file path
        #[arg(value_name = "OUTPUT", default_value = "demo_map.ang")]
        output: PathBuf,

        /// Number of rows
        #[arg(long, default_value = "50")]
        rows: usize,

        /// Number of columns
        #[arg(long, default_value = "80")]
        cols: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { file, json } => info::run(file, json),
        Commands::Rewrite {
            input,
            output,
            config,
            columns,
        } => rewrite::run(input, output, config, columns),
        Commands::Demo { output, rows, cols } => demo::run(output, rows, cols),
    }
}
