//! Command-line overrides on top of `katas.toml`.

use anyhow::Result;
use catalog::io::config::{ReportFormat, RunConfig};
use clap::ValueEnum;

/// `--format` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

/// Flags given to `katas run`; `None`/`false` keeps the file's value.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub timeout_ms: Option<u64>,
    pub format: Option<FormatArg>,
    pub verbose: bool,
}

/// Apply command-line overrides to the loaded config.
pub fn apply_overrides(mut base: RunConfig, overrides: &RunOverrides) -> Result<RunConfig> {
    if let Some(timeout_ms) = overrides.timeout_ms {
        base.async_timeout_ms = timeout_ms;
    }
    if let Some(format) = overrides.format {
        base.format = format.into();
    }
    if overrides.verbose {
        base.verbose = true;
    }
    base.validate()?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_file_values_without_flags() {
        let base = RunConfig {
            async_timeout_ms: 500,
            format: ReportFormat::Json,
            verbose: true,
        };
        let merged = apply_overrides(base.clone(), &RunOverrides::default()).expect("merge");
        assert_eq!(merged, base);
    }

    #[test]
    fn flags_win_over_the_file() {
        let overrides = RunOverrides {
            timeout_ms: Some(100),
            format: Some(FormatArg::Json),
            verbose: true,
        };
        let merged = apply_overrides(RunConfig::default(), &overrides).expect("merge");
        assert_eq!(merged.async_timeout_ms, 100);
        assert_eq!(merged.format, ReportFormat::Json);
        assert!(merged.verbose);
    }

    #[test]
    fn zero_timeout_flag_is_rejected() {
        let overrides = RunOverrides {
            timeout_ms: Some(0),
            ..RunOverrides::default()
        };
        let err = apply_overrides(RunConfig::default(), &overrides).expect_err("invalid");
        assert!(err.to_string().contains("async_timeout_ms"));
    }
}
