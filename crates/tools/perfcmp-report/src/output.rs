//! Report rendering: plain text, fixed-width table, and CSV.
//!
//! A [`Report`] is built once from two result sets and rendered in a single
//! [`ReportMode`]. Differing suite versions do not stop rendering; they are
//! recorded as a [`VersionCheck`] the caller inspects after the body is out.

use std::fmt;
use std::io::{self, Write};

use crate::compare::Comparison;
use crate::format::format_csv_value;
use crate::pair::{Pairing, pair_benchmarks};
use crate::suite::ResultSet;

/// Benchmark, base, changed, change, significance.
const TABLE_COLUMNS: usize = 5;

/// How the report body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// `### name ###` blocks with summary and significance lines.
    Text,
    /// Fixed-width grid, one row per benchmark.
    Table,
    /// `Benchmark,Base,Changed` rows of raw centers.
    Csv,
}

/// Whether both suites were produced by the same tool version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// Versions agree.
    Match,
    /// Versions differ.
    Mismatch {
        /// Version of the base suite.
        base: String,
        /// Version of the changed suite.
        changed: String,
    },
}

impl VersionCheck {
    /// Compare the version tags of two result sets.
    #[must_use]
    pub fn between(base: &ResultSet, changed: &ResultSet) -> Self {
        if base.version() == changed.version() {
            Self::Match
        } else {
            Self::Mismatch {
                base: base.version().to_owned(),
                changed: changed.version().to_owned(),
            }
        }
    }

    /// Returns `true` if the versions differ.
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        matches!(self, Self::Mismatch { .. })
    }
}

impl fmt::Display for VersionCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "Performance versions match"),
            Self::Mismatch { base, changed } => write!(
                f,
                "ERROR: Performance versions are different: {base} != {changed}"
            ),
        }
    }
}

/// Comparison of two result sets, ready to render.
#[derive(Debug)]
pub struct Report<'a> {
    base: &'a ResultSet,
    changed: &'a ResultSet,
    pairing: Pairing<'a>,
    comparisons: Vec<Comparison<'a>>,
    version_check: VersionCheck,
}

impl<'a> Report<'a> {
    /// Pair and compare every benchmark common to both sets.
    #[must_use]
    pub fn build(base: &'a ResultSet, changed: &'a ResultSet) -> Self {
        let pairing = pair_benchmarks(base, changed);
        let comparisons = pairing.pairs.iter().copied().map(Comparison::new).collect();
        Self {
            base,
            changed,
            pairing,
            comparisons,
            version_check: VersionCheck::between(base, changed),
        }
    }

    /// Comparisons in base-set order.
    #[must_use]
    pub fn comparisons(&self) -> &[Comparison<'a>] {
        &self.comparisons
    }

    /// The pairing the comparisons were built from, including unmatched names.
    #[must_use]
    pub fn pairing(&self) -> &Pairing<'a> {
        &self.pairing
    }

    /// Outcome of the version comparison.
    #[must_use]
    pub fn version_check(&self) -> &VersionCheck {
        &self.version_check
    }

    /// Render the report body in `mode`.
    ///
    /// Text and table output start with a header block per suite; CSV
    /// output is data only.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn render<W: Write>(&self, mode: ReportMode, out: &mut W) -> io::Result<()> {
        match mode {
            ReportMode::Text => {
                self.write_headers(out)?;
                self.write_text(out)
            }
            ReportMode::Table => {
                self.write_headers(out)?;
                self.write_table(out)
            }
            ReportMode::Csv => self.write_csv(out),
        }
    }

    /// Write the trailing version error, if any.
    ///
    /// In text and table modes the error is separated from the body by a
    /// blank line.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to `out`.
    pub fn write_version_error<W: Write>(&self, mode: ReportMode, out: &mut W) -> io::Result<()> {
        if !self.version_check.is_mismatch() {
            return Ok(());
        }
        if mode != ReportMode::Csv {
            writeln!(out)?;
        }
        writeln!(out, "{}", self.version_check)
    }

    fn write_headers<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for set in [self.base, self.changed] {
            let title = set.name();
            writeln!(out, "{title}")?;
            writeln!(out, "{}", "=".repeat(title.chars().count()))?;
            writeln!(out)?;
            writeln!(out, "Performance version: {}", set.version())?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, cmp) in self.comparisons.iter().enumerate() {
            if i != 0 {
                writeln!(out)?;
            }
            writeln!(out, "### {} ###", cmp.name)?;
            writeln!(out, "{}", cmp.summary_line())?;
            if let Some(line) = cmp.significance_line() {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }

    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let header = [
            "Benchmark".to_owned(),
            self.base.name().to_owned(),
            self.changed.name().to_owned(),
            "Change".to_owned(),
            "Significance".to_owned(),
        ];
        let rows: Vec<[String; TABLE_COLUMNS]> = self
            .comparisons
            .iter()
            .map(|cmp| {
                [
                    cmp.name.to_owned(),
                    cmp.base_cell(),
                    cmp.changed_cell(),
                    cmp.change_label(),
                    cmp.significance.to_string(),
                ]
            })
            .collect();

        let mut widths = [0usize; TABLE_COLUMNS];
        for row in std::iter::once(&header).chain(&rows) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_border(out, &widths, "-")?;
        write_row(out, &widths, &header)?;
        write_border(out, &widths, "=")?;
        if !rows.is_empty() {
            for row in &rows {
                write_row(out, &widths, row)?;
            }
            write_border(out, &widths, "-")?;
        }
        Ok(())
    }

    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut *out);
        writer.write_record(["Benchmark", "Base", "Changed"])?;
        for cmp in &self.comparisons {
            let base = format_csv_value(cmp.base.center());
            let changed = format_csv_value(cmp.changed.center());
            writer.write_record([cmp.name, base.as_str(), changed.as_str()])?;
        }
        writer.flush()
    }
}

fn write_border<W: Write>(out: &mut W, widths: &[usize], fill: &str) -> io::Result<()> {
    let mut line = String::from("+");
    for &width in widths {
        line.push_str(&fill.repeat(width + 2));
        line.push('+');
    }
    writeln!(out, "{line}")
}

fn write_row<W: Write>(out: &mut W, widths: &[usize], cells: &[String]) -> io::Result<()> {
    let mut line = String::from("|");
    for (cell, &width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(width - cell.chars().count()));
        line.push_str(" |");
    }
    writeln!(out, "{line}")
}
