mod error;
mod settings;
mod sources;

pub use error::{SettingsError, ValidationError};
pub use settings::Settings;
pub use sources::config::schema;
