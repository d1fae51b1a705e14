//! Command-line interface definitions for perfcmp.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;

/// Benchmark result comparison tool.
#[derive(Parser)]
#[command(name = "perfcmp", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Print loading, pairing and timing diagnostics to stderr.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// TOML file providing default options.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Compare two benchmark result files.
    Compare(CompareArgs),
}

/// Arguments for the `compare` subcommand.
#[derive(Parser)]
pub struct CompareArgs {
    /// Baseline result file.
    pub baseline: PathBuf,

    /// Changed result file.
    pub changed: PathBuf,

    /// Layout of the report on stdout.
    #[arg(long, short = 'O', value_enum)]
    pub output_style: Option<OutputStyle>,

    /// Write the comparison as CSV to this path instead of stdout.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

/// Report layout for stdout output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One block of text per benchmark.
    #[default]
    Normal,
    /// A fixed-width table.
    Table,
}
