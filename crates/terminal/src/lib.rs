mod automation;
mod dispatcher;
mod error;
mod iterm;

pub use automation::Automation;
pub use dispatcher::{Dispatcher, NewSession};
pub use error::{AutomationError, DispatchError};
pub use iterm::ITerm;
