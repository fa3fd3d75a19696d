use settings::SettingsError;
use terminal::DispatchError;
use thiserror::Error;

use crate::cli::SelectError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("Could not determine home directory")]
    NoConfigPath,

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
