use crate::actions::{register_desktop_actions, ActionRegistry};
use crate::desktop::SharedDesktop;

/// Shared application state
pub struct AppState {
    /// Action registry, populated at startup and read-only afterwards
    pub registry: ActionRegistry,
}

impl AppState {
    pub fn new(desktop: SharedDesktop) -> Self {
        let mut registry = ActionRegistry::new();
        register_desktop_actions(&mut registry, desktop);
        tracing::info!("Registered {} actions", registry.definitions().len());

        Self { registry }
    }
}
