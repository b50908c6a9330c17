//! Command-line parsing for the clearing-price pipeline.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline code; resolution against the environment happens in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "prices", version, about = "Course Match clearing-price history builder")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download every registry term, build histories and forecasts, write JSON.
    Fetch(FetchArgs),
    /// Print the operator rankings from an existing courses.json.
    Report(ReportArgs),
    /// List the resolved term registry.
    Terms(RegistryArgs),
}

/// Registry selection shared by subcommands.
#[derive(Debug, Args, Clone, Default)]
pub struct RegistryArgs {
    /// JSON registry file: `[{"term": ..., "url": ...}]` in chronological order.
    ///
    /// Falls back to `CLEARING_PRICES_REGISTRY`, then the built-in registry.
    #[arg(long, value_name = "JSON")]
    pub registry: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Output directory for courses.json, stats.json and departments.json.
    ///
    /// Falls back to `CLEARING_PRICES_OUT_DIR`, then `public/data`.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Length of each console ranking.
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// courses.json written by `prices fetch`.
    #[arg(long, value_name = "JSON", default_value = "public/data/courses.json")]
    pub courses: PathBuf,

    /// Length of each console ranking.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Also print one line per course for this department.
    #[arg(long, value_name = "DEPT")]
    pub department: Option<String>,
}
