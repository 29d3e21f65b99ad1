use serde::{Deserialize, Serialize};

/// What "open settings" launches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// URL or path to open (None = the platform's microphone privacy page).
    #[serde(default)]
    pub url: Option<String>,
}
