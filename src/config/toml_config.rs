use crate::config::{Settings, OUTPUT_FORMATS};
use crate::utils::error::{Result, RotationError};
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub board: Option<BoardConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
    pub path: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RotationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left
    /// as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RotationError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source.path", &self.source.path)?;
        if let Some(format) = self.output.as_ref().and_then(|o| o.format.as_deref()) {
            validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }
        Settings::from_toml(self).validate()
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
[source]
path = "./data/startups.json"

[board]
utc_offset_minutes = 120

[output]
format = "csv"
path = "./out/board.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let settings = Settings::from_toml(&config);
        assert_eq!(settings.listings_path, "./data/startups.json");
        assert_eq!(settings.utc_offset_minutes, 120);
        assert_eq!(settings.output_format, "csv");
        assert_eq!(settings.output_path.as_deref(), Some("./out/board.csv"));
    }

    #[test]
    fn test_optional_sections_fall_back_to_defaults() {
        let config = TomlConfig::from_toml_str("[source]\npath = \"listings.json\"\n").unwrap();
        let settings = Settings::from_toml(&config);
        assert_eq!(settings.output_format, "table");
        assert_eq!(settings.utc_offset_minutes, 0);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("LAUNCH_ROTATION_TEST_SOURCE", "/srv/export.json");

        let config = TomlConfig::from_toml_str(
            "[source]\npath = \"${LAUNCH_ROTATION_TEST_SOURCE}\"\n",
        )
        .unwrap();
        assert_eq!(config.source.path, "/srv/export.json");

        std::env::remove_var("LAUNCH_ROTATION_TEST_SOURCE");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let config = TomlConfig::from_toml_str(
            "[source]\npath = \"x.json\"\n[output]\nformat = \"yaml\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            "[source]\npath = \"x.json\"\n[board]\nutc_offset_minutes = -900\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_and_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[source]\npath = \"listings.json\"").unwrap();
        assert!(TomlConfig::from_file(file.path()).is_ok());

        assert!(TomlConfig::from_toml_str("[source").is_err());
        assert!(TomlConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
