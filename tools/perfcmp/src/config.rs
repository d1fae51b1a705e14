//! Option resolution for perfcmp.
//!
//! Defaults may come from a TOML file passed with `--config`; flags given on
//! the command line always win.
//!
//! ```toml
//! [compare]
//! output-style = "table"
//! csv = "results.csv"
//! ```

use anyhow::{Context, Result};
use perfcmp_report::ReportMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cli::{CompareArgs, OutputStyle};

/// Top-level configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Options for `perfcmp compare`.
    #[serde(default)]
    pub compare: CompareSection,
}

/// `[compare]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CompareSection {
    /// Default layout when `-O` is not given.
    pub output_style: Option<OutputStyle>,
    /// Default CSV destination. Relative paths are taken from the config
    /// file's directory.
    pub csv: Option<PathBuf>,
}

/// Fully resolved options for one comparison run.
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Baseline result file.
    pub baseline: PathBuf,
    /// Changed result file.
    pub changed: PathBuf,
    /// Report layout.
    pub mode: ReportMode,
    /// CSV destination; set exactly when `mode` is CSV.
    pub csv: Option<PathBuf>,
}

/// Parse a configuration file.
///
/// # Errors
///
/// Fails if the file cannot be read or is not a valid configuration.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let mut config: ConfigFile =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;

    if let Some(csv) = config.compare.csv.take() {
        config.compare.csv = Some(match path.parent() {
            Some(dir) if csv.is_relative() => dir.join(csv),
            _ => csv,
        });
    }
    Ok(config)
}

/// Merge command-line arguments over the optional config file.
///
/// # Errors
///
/// Fails if `config_path` is given and [`load_config_file`] fails on it.
pub fn resolve(config_path: Option<&Path>, args: &CompareArgs) -> Result<ResolvedConfig> {
    let file = match config_path {
        Some(path) => load_config_file(path)?,
        None => ConfigFile::default(),
    };
    Ok(merge(file, args))
}

fn merge(file: ConfigFile, args: &CompareArgs) -> ResolvedConfig {
    let csv = args.csv.clone().or(file.compare.csv);
    let style = args
        .output_style
        .or(file.compare.output_style)
        .unwrap_or_default();

    let mode = match (&csv, style) {
        (Some(_), _) => ReportMode::Csv,
        (None, OutputStyle::Normal) => ReportMode::Text,
        (None, OutputStyle::Table) => ReportMode::Table,
    };

    ResolvedConfig {
        baseline: args.baseline.clone(),
        changed: args.changed.clone(),
        mode,
        csv,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(style: Option<OutputStyle>, csv: Option<&str>) -> CompareArgs {
        CompareArgs {
            baseline: "a.json".into(),
            changed: "b.json".into(),
            output_style: style,
            csv: csv.map(PathBuf::from),
        }
    }

    fn parse(text: &str) -> ConfigFile {
        toml::from_str(text).unwrap()
    }

    #[test]
    fn defaults_to_text() {
        let resolved = merge(ConfigFile::default(), &args(None, None));
        assert_eq!(resolved.mode, ReportMode::Text);
        assert!(resolved.csv.is_none());
        assert_eq!(resolved.baseline, PathBuf::from("a.json"));
    }

    #[test]
    fn config_file_supplies_defaults() {
        let file = parse("[compare]\noutput-style = \"table\"\n");
        assert_eq!(merge(file, &args(None, None)).mode, ReportMode::Table);
    }

    #[test]
    fn flags_override_config() {
        let file = parse("[compare]\noutput-style = \"table\"\n");
        let resolved = merge(file, &args(Some(OutputStyle::Normal), None));
        assert_eq!(resolved.mode, ReportMode::Text);
    }

    #[test]
    fn csv_selects_csv_mode() {
        let resolved = merge(
            ConfigFile::default(),
            &args(Some(OutputStyle::Table), Some("out.csv")),
        );
        assert_eq!(resolved.mode, ReportMode::Csv);
        assert_eq!(resolved.csv, Some(PathBuf::from("out.csv")));

        let file = parse("[compare]\ncsv = \"from-config.csv\"\n");
        let resolved = merge(file, &args(None, Some("flag.csv")));
        assert_eq!(resolved.csv, Some(PathBuf::from("flag.csv")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<ConfigFile>("[compare]\noutput_style = \"table\"\n").is_err());
        assert!(toml::from_str::<ConfigFile>("[report]\n").is_err());
        assert!(toml::from_str::<ConfigFile>("[compare]\noutput-style = \"fancy\"\n").is_err());
    }

    #[test]
    fn relative_csv_is_anchored_to_config_dir() {
        let dir = std::env::temp_dir().join(format!("perfcmp-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("perfcmp.toml");
        std::fs::write(&path, "[compare]\ncsv = \"out.csv\"\n").unwrap();

        let file = load_config_file(&path).unwrap();
        assert_eq!(file.compare.csv, Some(dir.join("out.csv")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = resolve(Some(Path::new("/nonexistent/perfcmp.toml")), &args(None, None));
        assert!(err.is_err());
    }
}
