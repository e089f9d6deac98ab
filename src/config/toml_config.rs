use crate::utils::error::{Result, SquareError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub batch: BatchSection,
    pub output: Option<OutputSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSection {
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<f64>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub format: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入批次設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SquareError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SquareError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn name(&self) -> Option<&str> {
        self.batch.name.as_deref()
    }

    pub fn format(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.format.as_deref())
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.output_path.as_deref())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[batch]
name = "nightly"
inputs = [0, 5, -3, 2.5]
concurrency = 2

[output]
format = "json"
output_path = "./reports"

[logging]
verbose = true
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.name(), Some("nightly"));
        assert_eq!(config.batch.inputs, vec![0.0, 5.0, -3.0, 2.5]);
        assert_eq!(config.batch.concurrency, Some(2));
        assert_eq!(config.format(), Some("json"));
        assert_eq!(config.output_path(), Some("./reports"));
        assert!(config.verbose());
        assert!(config.json_logs());
    }

    #[test]
    fn test_sections_are_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.batch.inputs.is_empty());
        assert_eq!(config.format(), None);
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DELAYED_SQUARE_TEST_REPORT_DIR", "/tmp/square-reports");

        let toml_content = r#"
[batch]
inputs = [1]

[output]
output_path = "${DELAYED_SQUARE_TEST_REPORT_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), Some("/tmp/square-reports"));

        std::env::remove_var("DELAYED_SQUARE_TEST_REPORT_DIR");
    }

    #[test]
    fn test_unknown_env_var_is_kept() {
        let toml_content = r#"
[output]
output_path = "${DELAYED_SQUARE_TEST_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), Some("${DELAYED_SQUARE_TEST_UNSET_VAR}"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[batch\ninputs = ").unwrap_err();
        assert!(matches!(err, SquareError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[batch]\nname = \"file-test\"\ninputs = [4]\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name(), Some("file-test"));
        assert_eq!(config.batch.inputs, vec![4.0]);
    }
}
