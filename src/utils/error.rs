use crate::domain::model::{Status, Tier};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Rendering error: {0}")]
    RenderError(#[from] std::fmt::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingConfigError { field: String },

    #[error("Cannot move listing {id} from {from} to {to}")]
    InvalidTransition { id: String, from: Status, to: Status },

    #[error("Cannot change tier of listing {id} to {tier} while it is {status}")]
    TierChangeNotAllowed { id: String, tier: Tier, status: Status },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Moderation,
}

impl RotationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RotationError::IoError(_) => ErrorCategory::Io,
            RotationError::SerializationError(_)
            | RotationError::CsvError(_)
            | RotationError::RenderError(_) => ErrorCategory::Data,
            RotationError::ConfigValidationError { .. }
            | RotationError::InvalidConfigValueError { .. }
            | RotationError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RotationError::InvalidTransition { .. }
            | RotationError::TierChangeNotAllowed { .. } => ErrorCategory::Moderation,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RotationError::IoError(e) => format!("Could not read or write a file: {}", e),
            RotationError::SerializationError(e) => format!("Listing data is not valid JSON: {}", e),
            RotationError::CsvError(e) => format!("Could not write CSV output: {}", e),
            RotationError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            RotationError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            RotationError::MissingConfigError { field } => {
                format!("'{}' must be provided", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and is readable/writable",
            ErrorCategory::Data => "Check the listings file against the expected JSON shape",
            ErrorCategory::Configuration => "Fix the flag or TOML value and run again",
            ErrorCategory::Moderation => "Review the listing's current status before changing it",
        }
    }
}

pub type Result<T> = std::result::Result<T, RotationError>;
