// Application state module
// Read-only state shared by every connection

use super::types::Config;
use crate::handler::Dispatcher;

/// Application state
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub const fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self { config, dispatcher }
    }
}
