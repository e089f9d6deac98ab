pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty, validate_one_of, validate_path, validate_range, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_CONCURRENCY: usize = 5;
/// Largest permit count a tokio semaphore accepts.
pub const MAX_CONCURRENCY: usize = tokio::sync::Semaphore::MAX_PERMITS;
pub const DEFAULT_FORMAT: &str = "text";
pub const OUTPUT_FORMATS: [&str; 2] = ["text", "json"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "delayed-square")]
#[command(about = "Squares numbers after a fixed one-second delay; negative numbers are rejected")]
pub struct CliConfig {
    /// Numbers to square; appended after the inputs of --config
    #[arg(allow_negative_numbers = true)]
    pub inputs: Vec<f64>,

    /// TOML batch file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum number of squares in flight [default: 5]
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Report format: text or json [default: text]
    #[arg(long)]
    pub format: Option<String>,

    /// Directory to write the report into
    #[arg(long)]
    pub output_path: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

/// Settings for one batch run, after merging the TOML file and the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub name: Option<String>,
    pub inputs: Vec<f64>,
    pub concurrency: usize,
    pub format: String,
    pub output_path: Option<String>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            name: None,
            inputs: Vec::new(),
            concurrency: DEFAULT_CONCURRENCY,
            format: DEFAULT_FORMAT.to_string(),
            output_path: None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl From<TomlConfig> for BatchConfig {
    fn from(file: TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            name: file.name().map(str::to_string),
            format: file.format().map(str::to_string).unwrap_or(defaults.format),
            output_path: file.output_path().map(str::to_string),
            verbose: file.verbose(),
            json_logs: file.json_logs(),
            concurrency: file.batch.concurrency.unwrap_or(defaults.concurrency),
            inputs: file.batch.inputs,
        }
    }
}

impl BatchConfig {
    /// Loads `--config` if given, then applies command line overrides.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?.into(),
            None => Self::default(),
        };

        config.inputs.extend(cli.inputs);
        if let Some(concurrency) = cli.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(format) = cli.format {
            config.format = format;
        }
        if cli.output_path.is_some() {
            config.output_path = cli.output_path;
        }
        config.verbose |= cli.verbose;
        config.json_logs |= cli.json_logs;

        Ok(config)
    }

    pub fn report_file_name(&self) -> &'static str {
        if self.format == "json" {
            "report.json"
        } else {
            "report.txt"
        }
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty("inputs", &self.inputs)?;
        validate_range("concurrency", self.concurrency, 1, MAX_CONCURRENCY)?;
        validate_one_of("format", &self.format, &OUTPUT_FORMATS)?;
        if let Some(path) = &self.output_path {
            validate_path("output_path", path)?;
        }
        Ok(())
    }
}

impl ConfigProvider for BatchConfig {
    fn inputs(&self) -> &[f64] {
        &self.inputs
    }

    fn concurrency(&self) -> usize {
        self.concurrency
    }

    fn output_format(&self) -> &str {
        &self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SquareError;

    #[test]
    fn test_defaults_need_inputs() {
        let config = BatchConfig::default();
        assert!(matches!(
            config.validate(),
            Err(SquareError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = BatchConfig {
            inputs: vec![1.0],
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        config.concurrency = 0;
        assert!(config.validate().is_err());

        config.concurrency = 1;
        config.format = "xml".to_string();
        assert!(config.validate().is_err());

        config.format = "json".to_string();
        config.output_path = Some(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_concurrency_above_semaphore_limit_is_rejected() {
        let mut config = BatchConfig {
            inputs: vec![2.0],
            concurrency: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SquareError::InvalidConfigValueError { ref field, .. }) if field == "concurrency"
        ));

        config.concurrency = MAX_CONCURRENCY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_applies_defaults() {
        let file = TomlConfig::from_toml_str("[batch]\ninputs = [2, -2]\n").unwrap();
        let config = BatchConfig::from(file);
        assert_eq!(config.inputs, vec![2.0, -2.0]);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.format, "text");
        assert_eq!(config.report_file_name(), "report.txt");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parses_negative_inputs() {
        let cli = CliConfig::try_parse_from(["delayed-square", "5", "-3", "0", "--format", "json"])
            .unwrap();
        let config = BatchConfig::from_cli(cli).unwrap();
        assert_eq!(config.inputs, vec![5.0, -3.0, 0.0]);
        assert_eq!(config.format, "json");
        assert_eq!(config.report_file_name(), "report.json");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_toml() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[batch]\ninputs = [1, 2]\nconcurrency = 2\n\n[output]\nformat = \"json\"\n")
            .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = CliConfig::try_parse_from([
            "delayed-square",
            "--config",
            path.as_str(),
            "--concurrency",
            "8",
            "3",
        ])
        .unwrap();
        let config = BatchConfig::from_cli(cli).unwrap();

        assert_eq!(config.inputs, vec![1.0, 2.0, 3.0]);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.format, "json");
    }
}
