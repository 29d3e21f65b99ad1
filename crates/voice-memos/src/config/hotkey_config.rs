use crate::config::default_hotkey_enabled;

use serde::{Deserialize, Serialize};

/// Global hotkey configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Whether CTRL+SHIFT+Space toggles recording.
    #[serde(default = "default_hotkey_enabled")]
    pub enabled: bool,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            enabled: default_hotkey_enabled(),
        }
    }
}
