use std::sync::Arc;

use settings::Settings;
use terminal::{Dispatcher, ITerm, NewSession};
use tokio::sync::Mutex;

/// Builds the dispatcher described by the loaded settings. Dispatchers built
/// with the same `gate` never run at the same time.
pub fn from_settings(settings: &Settings, gate: Arc<Mutex<()>>) -> Dispatcher<ITerm> {
    Dispatcher::new(ITerm::new(&settings.terminal))
        .with_new_session(NewSession::from_flag(settings.open_in_new_window))
        .with_timeout(settings.dispatch_timeout)
        .with_poll_interval(settings.poll_interval)
        .with_gate(gate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use terminal::Automation;

    #[test]
    fn test_dispatcher_targets_configured_terminal() {
        let settings = Settings {
            terminal: "iTerm2".into(),
            ..Settings::default()
        };
        let dispatcher = from_settings(&settings, Arc::default());
        assert_eq!(dispatcher.automation().name(), "iTerm2");
    }
}
