mod hotkey_config;
#[allow(clippy::module_inception)]
mod config;
mod recording_config;
mod settings_config;

pub(crate) use {
    config::Config, hotkey_config::HotkeyConfig, recording_config::RecordingConfig,
    settings_config::SettingsConfig,
};

pub(crate) const DEFAULT_HOTKEY_ENABLED: bool = true;
pub(crate) const RECORDINGS_DIR_NAME: &str = "voice-memos";

pub(crate) fn default_hotkey_enabled() -> bool {
    DEFAULT_HOTKEY_ENABLED
}
