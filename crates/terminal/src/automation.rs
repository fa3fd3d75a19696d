use crate::error::AutomationError;
use async_trait::async_trait;
use std::sync::Arc;

/// Scripting interface of a terminal application.
///
/// Each call is one request to a single application instance. Only boolean
/// answers are read back.
#[async_trait]
pub trait Automation: Send + Sync {
    /// Application name, for logs.
    fn name(&self) -> &str;

    async fn is_running(&self) -> Result<bool, AutomationError>;

    /// Whether at least one window is open. Only asked while the
    /// application is running, since asking a stopped one may launch it.
    async fn has_windows(&self) -> Result<bool, AutomationError>;

    /// Brings the application to the front, launching it if needed.
    async fn activate(&self) -> Result<(), AutomationError>;

    async fn create_window(&self) -> Result<(), AutomationError>;

    async fn create_tab(&self) -> Result<(), AutomationError>;

    /// Types `text` into the current session of the front window.
    async fn write_text(&self, text: &str) -> Result<(), AutomationError>;
}

#[async_trait]
impl<A: Automation + ?Sized> Automation for Arc<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn is_running(&self) -> Result<bool, AutomationError> {
        (**self).is_running().await
    }

    async fn has_windows(&self) -> Result<bool, AutomationError> {
        (**self).has_windows().await
    }

    async fn activate(&self) -> Result<(), AutomationError> {
        (**self).activate().await
    }

    async fn create_window(&self) -> Result<(), AutomationError> {
        (**self).create_window().await
    }

    async fn create_tab(&self) -> Result<(), AutomationError> {
        (**self).create_tab().await
    }

    async fn write_text(&self, text: &str) -> Result<(), AutomationError> {
        (**self).write_text(text).await
    }
}
