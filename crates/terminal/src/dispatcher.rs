//! Delivers a command to a terminal application.
//!
//! A dispatch walks a fixed handshake: check for a window, acquire a fresh
//! session, wait until a window is ready, type the command, then bring the
//! application to the front.

use crate::automation::Automation;
use crate::error::DispatchError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, watch};

/// What to open for each dispatch when the application is already running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewSession {
    #[default]
    Tab,
    Window,
}

impl NewSession {
    /// `Window` when `open_in_new_window` is set, `Tab` otherwise.
    pub fn from_flag(open_in_new_window: bool) -> Self {
        if open_in_new_window {
            Self::Window
        } else {
            Self::Tab
        }
    }
}

impl fmt::Display for NewSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab => f.write_str("tab"),
            Self::Window => f.write_str("window"),
        }
    }
}

/// Runs dispatches against one terminal application, one at a time.
///
/// Dispatchers sharing a gate (see [`Dispatcher::with_gate`]) also wait for
/// each other.
#[derive(Debug)]
pub struct Dispatcher<A> {
    automation: A,
    new_session: NewSession,
    timeout: Duration,
    poll_interval: Duration,
    in_flight: Arc<Mutex<()>>,
}

impl<A: Automation> Dispatcher<A> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new(automation: A) -> Self {
        Self {
            automation,
            new_session: NewSession::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            in_flight: Arc::default(),
        }
    }

    #[must_use]
    pub fn with_new_session(mut self, new_session: NewSession) -> Self {
        self.new_session = new_session;
        self
    }

    /// Bound on waiting for a window to appear.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Serializes dispatches with every other dispatcher holding `gate`,
    /// e.g. the one replaced by a config reload.
    #[must_use]
    pub fn with_gate(mut self, gate: Arc<Mutex<()>>) -> Self {
        self.in_flight = gate;
        self
    }

    pub fn automation(&self) -> &A {
        &self.automation
    }

    /// Types `cmd` into a fresh session of the terminal application.
    ///
    /// Overlapping calls queue behind the one in flight.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Automation`] if the application cannot be
    /// queried or driven, [`DispatchError::Timeout`] if no window appears in
    /// time, and [`DispatchError::Cancelled`] once `cancel` holds `true`.
    pub async fn dispatch(
        &self,
        cmd: &str,
        cancel: &watch::Receiver<bool>,
    ) -> Result<(), DispatchError> {
        let _in_flight = tokio::select! {
            biased;
            () = cancelled(cancel) => return Err(DispatchError::Cancelled),
            guard = self.in_flight.lock() => guard,
        };

        let app = self.automation.name();
        log::info!("dispatching to {app}");

        if self.has_window().await? || self.automation.is_running().await? {
            // Launching also opens a window, so only a running app gets one explicitly
            log::debug!("{app}: opening a new {}", self.new_session);
            self.open_session().await?;
        } else {
            log::debug!("{app}: not running, launching");
            self.automation.activate().await?;
        }

        tokio::select! {
            biased;
            () = cancelled(cancel) => return Err(DispatchError::Cancelled),
            ready = tokio::time::timeout(self.timeout, self.await_window()) => {
                ready.map_err(|_| DispatchError::Timeout(self.timeout))??;
            }
        }

        self.automation.write_text(cmd).await?;
        self.automation.activate().await?;

        log::debug!("{app}: command delivered");
        Ok(())
    }

    async fn has_window(&self) -> Result<bool, DispatchError> {
        Ok(self.automation.is_running().await? && self.automation.has_windows().await?)
    }

    async fn open_session(&self) -> Result<(), DispatchError> {
        match self.new_session {
            NewSession::Tab => self.automation.create_tab().await?,
            NewSession::Window => self.automation.create_window().await?,
        }
        Ok(())
    }

    async fn await_window(&self) -> Result<(), DispatchError> {
        while !self.has_window().await? {
            tokio::time::sleep(self.poll_interval).await;
        }
        Ok(())
    }
}

/// Resolves once the shutdown signal is raised. A dropped sender can no
/// longer cancel, so that case never resolves.
async fn cancelled(cancel: &watch::Receiver<bool>) {
    let mut cancel = cancel.clone();
    let closed = cancel.wait_for(|&cancelled| cancelled).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}
