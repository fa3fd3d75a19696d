use crate::automation::Automation;
use crate::error::AutomationError;
use async_trait::async_trait;
use tokio::process::Command;

/// A single request to the application, rendered as AppleScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request<'a> {
    IsRunning,
    HasWindows,
    Activate,
    CreateWindow,
    CreateTab,
    WriteText(&'a str),
}

impl Request<'_> {
    fn script(&self, app: &str) -> String {
        let app = quote(app);

        match self {
            Self::IsRunning => format!("application {app} is running"),
            Self::HasWindows => format!("tell application {app} to (count of windows) > 0"),
            Self::Activate => format!("tell application {app} to activate"),
            Self::CreateWindow => {
                format!("tell application {app} to create window with default profile")
            }
            // Asking for a tab with no window open creates the window instead
            Self::CreateTab => format!(
                "tell application {app}\n\
                 \tif (count of windows) is 0 then\n\
                 \t\tcreate window with default profile\n\
                 \telse\n\
                 \t\ttell the first window to create tab with default profile\n\
                 \tend if\n\
                 end tell"
            ),
            Self::WriteText(text) => format!(
                "tell application {app} to tell the first window to tell current session \
                 to write text {}",
                quote(text)
            ),
        }
    }
}

/// Quotes `s` as an AppleScript string literal.
fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// iTerm2 driven through `osascript`.
#[derive(Debug, Clone)]
pub struct ITerm {
    app: String,
}

impl Default for ITerm {
    fn default() -> Self {
        Self::new(Self::DEFAULT_APP)
    }
}

impl ITerm {
    pub const DEFAULT_APP: &'static str = "iTerm";

    /// Targets the application called `app`, e.g. `"iTerm"`.
    pub fn new(app: impl Into<String>) -> Self {
        Self { app: app.into() }
    }

    async fn run(&self, request: Request<'_>) -> Result<String, AutomationError> {
        let osascript =
            which::which("osascript").map_err(|_| AutomationError::Unavailable(self.app.clone()))?;

        log::debug!("{}: {request:?}", self.app);

        let output = Command::new(osascript)
            .arg("-e")
            .arg(request.script(&self.app))
            .output()
            .await?;

        if !output.status.success() {
            return Err(AutomationError::Script {
                app: self.app.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn query(&self, request: Request<'_>) -> Result<bool, AutomationError> {
        Ok(self.run(request).await? == "true")
    }
}

#[async_trait]
impl Automation for ITerm {
    fn name(&self) -> &str {
        &self.app
    }

    async fn is_running(&self) -> Result<bool, AutomationError> {
        self.query(Request::IsRunning).await
    }

    async fn has_windows(&self) -> Result<bool, AutomationError> {
        self.query(Request::HasWindows).await
    }

    async fn activate(&self) -> Result<(), AutomationError> {
        self.run(Request::Activate).await.map(drop)
    }

    async fn create_window(&self) -> Result<(), AutomationError> {
        self.run(Request::CreateWindow).await.map(drop)
    }

    async fn create_tab(&self) -> Result<(), AutomationError> {
        self.run(Request::CreateTab).await.map(drop)
    }

    async fn write_text(&self, text: &str) -> Result<(), AutomationError> {
        self.run(Request::WriteText(text)).await.map(drop)
    }
}
