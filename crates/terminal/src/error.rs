use std::io;
use std::time::Duration;
use thiserror::Error;

/// Failure talking to the terminal application.
#[derive(Error, Debug)]
pub enum AutomationError {
    /// The scripting bridge is not installed on this system.
    #[error("cannot automate {0}: osascript not found")]
    Unavailable(String),

    /// The scripting bridge could not be started.
    #[error("failed to run osascript: {0}")]
    Spawn(#[from] io::Error),

    /// The application rejected or failed a request.
    #[error("{app} failed: {message}")]
    Script { app: String, message: String },
}

/// Outcome of a failed dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Automation(#[from] AutomationError),

    /// No window appeared within the configured bound.
    #[error("no terminal window appeared within {0:?}")]
    Timeout(Duration),

    #[error("dispatch cancelled")]
    Cancelled,
}
