use crate::error::{SettingsError, ValidationError, ValidationResult};
use catalog::Catalog;
use jsonschema::Validator;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_JSON: &str = include_str!("../../../../assets/shuttle.default.json");
const SCHEMA_JSON: &str = include_str!("../../../../assets/shuttle.schema.json");

/// Internal configuration structure for JSON deserialization.
/// All fields are optional - defaults are applied by the Settings struct.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ConfigContent {
    pub terminal: Option<String>,
    pub open_in_new_window: Option<bool>,
    pub dispatch_timeout_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub editor: Option<String>,
    pub hosts: Option<Catalog>,
}

// ============================================================================
// Schema Validation
// ============================================================================

/// Returns the embedded JSON schema as a string.
pub fn schema() -> &'static str {
    SCHEMA_JSON
}

/// Validates a JSON value against the config schema.
///
/// # Panics
///
/// Panics if the embedded schema is invalid JSON or not a valid JSON Schema.
/// This should never happen as the schema is compile-time embedded.
pub(crate) fn validate(value: &Value) -> ValidationResult {
    let schema: Value =
        serde_json::from_str(SCHEMA_JSON).expect("embedded schema should be valid JSON");

    let validator = Validator::new(&schema).expect("embedded schema should be a valid JSON Schema");

    let errors: Vec<ValidationError> = validator
        .iter_errors(value)
        .map(|e| ValidationError {
            path: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(errors)
    }
}

// ============================================================================
// Config Loading
// ============================================================================

/// Returns the default config file path (~/.shuttle.json).
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".shuttle.json"))
}

/// Writes the default config to `path` unless a file is already there.
///
/// # Errors
///
/// Returns an error if writing the default config file fails.
pub(crate) fn ensure_exists_at(path: &Path) -> Result<(), SettingsError> {
    if !path.exists() {
        fs::write(path, DEFAULT_JSON)?;
        log::info!("created default config at {}", path.display());
    }

    Ok(())
}

/// Loads config content from a string.
///
/// Validates against the schema first, then deserializes from the text
/// itself: a `Value` map sorts its keys, and category order must follow the
/// document.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or fails schema validation.
pub(crate) fn load_from_str(s: &str) -> Result<ConfigContent, SettingsError> {
    let value: Value = serde_json::from_str(s)?;

    if let ValidationResult::Invalid(errors) = validate(&value) {
        return Err(SettingsError::ConfigValidation(errors));
    }

    Ok(serde_json::from_str(s)?)
}

/// Loads config content from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is unparseable.
pub(crate) fn load_from_path(path: &Path) -> Result<ConfigContent, SettingsError> {
    log::debug!("loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

/// Loads config content from `path`.
///
/// Returns `None` if the file doesn't exist (caller should use defaults).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is invalid.
pub(crate) fn load_if_exists(path: &Path) -> Result<Option<ConfigContent>, SettingsError> {
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok(None);
    }

    load_from_path(path).map(Some)
}
