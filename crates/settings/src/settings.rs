use crate::error::SettingsError;
use crate::sources::config::{self, ConfigContent};
use catalog::{Catalog, Hosts};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete application settings loaded from the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Terminal application commands are dispatched to.
    pub terminal: String,
    /// Open a new window instead of a new tab for each dispatch.
    pub open_in_new_window: bool,
    /// Upper bound on waiting for a terminal window to appear.
    pub dispatch_timeout: Duration,
    /// Delay between window checks while waiting.
    pub poll_interval: Duration,
    /// Editor for opening the config file.
    pub editor: String,
    /// Host catalog from ~/.shuttle.json.
    pub catalog: Catalog,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_content(ConfigContent::default())
    }
}

impl Settings {
    /// Default terminal value when not specified in config.
    pub const DEFAULT_TERMINAL: &'static str = "iTerm";
    /// Default editor value when not specified in config.
    pub const DEFAULT_EDITOR: &'static str = "default";
    pub const DEFAULT_DISPATCH_TIMEOUT_MS: u64 = 5_000;
    pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

    fn from_content(content: ConfigContent) -> Self {
        Self {
            terminal: content
                .terminal
                .unwrap_or_else(|| Self::DEFAULT_TERMINAL.to_string()),
            open_in_new_window: content.open_in_new_window.unwrap_or(false),
            dispatch_timeout: Duration::from_millis(
                content
                    .dispatch_timeout_ms
                    .unwrap_or(Self::DEFAULT_DISPATCH_TIMEOUT_MS),
            ),
            poll_interval: Duration::from_millis(
                content
                    .poll_interval_ms
                    .unwrap_or(Self::DEFAULT_POLL_INTERVAL_MS),
            ),
            editor: content
                .editor
                .unwrap_or_else(|| Self::DEFAULT_EDITOR.to_string()),
            catalog: content.hosts.unwrap_or_default(),
        }
    }

    /// Load settings from `~/.shuttle.json`, using defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Home directory cannot be determined
    /// - Config file exists but is invalid JSON or fails validation
    pub fn load() -> Result<Self, SettingsError> {
        let path = Self::config_path().ok_or(SettingsError::NoHomeDir)?;
        Self::load_from(&path)
    }

    /// Load settings from a specific config file, using defaults if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is invalid
    /// JSON or fails validation.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = config::load_if_exists(path)?.unwrap_or_default();
        let settings = Self::from_content(content);

        log::info!(
            "loaded {} top-level catalog entries from {}",
            settings.catalog.nodes().len(),
            path.display()
        );
        Ok(settings)
    }

    /// Flattens the catalog into the host list.
    #[must_use]
    pub fn hosts(&self) -> Hosts {
        Hosts::from_catalog(&self.catalog)
    }

    /// Get the path to the main config file.
    pub fn config_path() -> Option<PathBuf> {
        config::config_path()
    }

    /// Write the default config to `path` if no file exists there yet.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the default config file fails.
    pub fn ensure_config_at(path: &Path) -> Result<(), SettingsError> {
        config::ensure_exists_at(path)
    }
}
