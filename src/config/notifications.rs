//! Notification configuration

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// When false, roster changes never call the notifier.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

fn default_enabled() -> bool {
    true
}
