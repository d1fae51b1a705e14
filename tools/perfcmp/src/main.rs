//! Benchmark result comparison tool.
//!
//! Loads two benchmark result files, pairs benchmarks by name, tests each
//! pair for a significant change and prints a report.
//!
//! Pipeline: resolve options → load both suites → pair and compare →
//!           render (stdout or CSV file) → version check → exit status.

mod cli;
mod config;
mod verbose;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use perfcmp_report::{Report, ReportMode, ResultSet};

use verbose::{Timer, veprintln};

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    verbose::init(cli.verbose);

    match cli.command {
        cli::Command::Compare(ref args) => cmd_compare(&cli, args),
    }
}

/// `perfcmp compare` — compare two result files.
///
/// A version mismatch between the suites still prints the whole report; it
/// only turns the exit status into a failure afterwards.
fn cmd_compare(cli: &cli::Cli, args: &cli::CompareArgs) -> Result<ExitCode> {
    let config = config::resolve(cli.config.as_deref(), args)?;
    veprintln!("Report mode: {:?}", config.mode);

    let (base, changed) = {
        let _t = Timer::start("loading results");
        (load_suite(&config.baseline)?, load_suite(&config.changed)?)
    };

    let report = {
        let _t = Timer::start("comparing");
        Report::build(&base, &changed)
    };
    log_pairing(&report);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    {
        let _t = Timer::start("rendering");
        match &config.csv {
            Some(path) => write_csv(&report, path)?,
            None => report
                .render(config.mode, &mut out)
                .context("writing report to stdout")?,
        }
    }
    report
        .write_version_error(config.mode, &mut out)
        .context("writing report to stdout")?;
    out.flush().context("flushing stdout")?;

    if report.version_check().is_mismatch() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Load one result file, attaching the path to any error.
fn load_suite(path: &Path) -> Result<ResultSet> {
    let suite =
        ResultSet::load(path).with_context(|| format!("loading {}", path.display()))?;
    veprintln!(
        "Loaded {} ({} benchmarks, performance version {})",
        path.display(),
        suite.iter().count(),
        suite.version()
    );
    Ok(suite)
}

/// Write the CSV report to `path`.
fn write_csv(report: &Report<'_>, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    report
        .render(ReportMode::Csv, &mut out)
        .with_context(|| format!("writing {}", path.display()))?;
    out.flush()
        .with_context(|| format!("writing {}", path.display()))?;
    veprintln!("CSV report written to {}", path.display());
    Ok(())
}

/// Verbose-only summary of what was compared and what was left out.
fn log_pairing(report: &Report<'_>) {
    let pairing = report.pairing();
    veprintln!("{} benchmark(s) in common", pairing.pairs.len());

    for (label, names) in [
        ("only in baseline", &pairing.base_only),
        ("only in changed", &pairing.changed_only),
        ("with mismatched units", &pairing.unit_mismatch),
    ] {
        if !names.is_empty() {
            veprintln!("  Skipped {} benchmark(s) {label}: {}", names.len(), names.join(", "));
        }
    }

    for cmp in report.comparisons() {
        match cmp.significance.t_score() {
            Some(t) => veprintln!("  {}: ratio {:.4}, t={t:.4}", cmp.name, cmp.ratio),
            None => veprintln!("  {}: ratio {:.4}, single sample", cmp.name, cmp.ratio),
        }
    }
}
