use std::fmt;
use std::io;
use thiserror::Error;

/// A validation error with path and message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// JSON path to the error location.
    pub path: String,
    /// Human-readable error description.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Result of config validation.
#[derive(Debug)]
pub(crate) enum ValidationResult {
    /// Validation passed with no errors.
    Valid,
    /// Validation failed with one or more errors.
    Invalid(Vec<ValidationError>),
}

/// Error type for settings loading operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Home directory not found.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Config file I/O error.
    #[error("failed to read config: {0}")]
    ConfigIo(#[from] io::Error),

    /// Config is not valid JSON, or does not deserialize.
    #[error("invalid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config schema validation error.
    #[error("config validation failed: {}", format_validation_errors(.0))]
    ConfigValidation(Vec<ValidationError>),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
