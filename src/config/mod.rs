pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const OUTPUT_FORMATS: [&str; 3] = ["table", "json", "csv"];

/// UTC offsets range from UTC-12:00 to UTC+14:00.
pub const MIN_UTC_OFFSET_MINUTES: i32 = -12 * 60;
pub const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "launch-rotation")]
#[command(about = "Render the rotating startup launch board")]
pub struct CliConfig {
    /// JSON export of the startup listings
    #[arg(long)]
    pub listings: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Render the board as of this RFC 3339 instant instead of now
    #[arg(long)]
    pub now: Option<chrono::DateTime<chrono::Utc>>,

    /// Output format: table, json or csv
    #[arg(long)]
    pub format: Option<String>,

    /// Write the board to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Offset from UTC used for the weekly window, in minutes
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Keep running and re-render on every rotation
    #[arg(long)]
    pub watch: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// Effective settings after layering CLI flags over the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub listings_path: String,
    pub output_path: Option<String>,
    pub output_format: String,
    pub utc_offset_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listings_path: "listings.json".to_string(),
            output_path: None,
            output_format: "table".to_string(),
            utc_offset_minutes: 0,
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            listings_path: config.source.path.clone(),
            output_path: config.output.as_ref().and_then(|o| o.path.clone()),
            output_format: config
                .output
                .as_ref()
                .and_then(|o| o.format.clone())
                .unwrap_or(defaults.output_format),
            utc_offset_minutes: config
                .board
                .as_ref()
                .and_then(|b| b.utc_offset_minutes)
                .unwrap_or(defaults.utc_offset_minutes),
        }
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                Self::from_toml(&TomlConfig::from_file(path)?)
            }
            None => Self::default(),
        };

        if let Some(listings) = &cli.listings {
            settings.listings_path = listings.clone();
        }
        if let Some(output) = &cli.output {
            settings.output_path = Some(output.clone());
        }
        if let Some(format) = &cli.format {
            settings.output_format = format.clone();
        }
        if let Some(offset) = cli.utc_offset_minutes {
            settings.utc_offset_minutes = offset;
        }

        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn listings_path(&self) -> &str {
        &self.listings_path
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }

    fn output_format(&self) -> &str {
        &self.output_format
    }

    fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("listings", &self.listings_path)?;
        if let Some(output) = &self.output_path {
            validate_path("output", output)?;
        }
        validate_one_of("format", &self.output_format, &OUTPUT_FORMATS)?;
        validate_range(
            "utc_offset_minutes",
            self.utc_offset_minutes,
            MIN_UTC_OFFSET_MINUTES,
            MAX_UTC_OFFSET_MINUTES,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.utc_offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn test_rejects_unknown_format_and_offset() {
        let mut settings = Settings {
            output_format: "xml".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());

        settings.output_format = "csv".to_string();
        settings.utc_offset_minutes = 15 * 60;
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_flags_override_defaults() {
        use clap::Parser;

        let cli = CliConfig::parse_from([
            "launch-rotation",
            "--listings",
            "data/startups.json",
            "--format",
            "json",
            "--utc-offset-minutes",
            "-300",
        ]);
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.listings_path, "data/startups.json");
        assert_eq!(settings.output_format, "json");
        assert_eq!(settings.utc_offset_minutes, -300);
        assert!(settings.output_path.is_none());
    }
}
