use crate::config::{Config, HotkeyConfig, RecordingConfig, SettingsConfig};

use std::{fs, path::PathBuf};

use uuid::Uuid;

/// WHAT: An empty file yields the default configuration
/// WHY: Every section is optional
#[test]
#[allow(clippy::unwrap_used)]
fn given_empty_toml_when_parsing_then_defaults() {
    // Given / When
    let config = Config::parse("").unwrap();

    // Then
    assert_eq!(config, Config::default());
    assert!(config.hotkey.enabled);
    assert_eq!(config.recording.directory, None);
    assert_eq!(config.settings.url, None);
}

/// WHAT: A partial file keeps defaults for missing keys
/// WHY: Users edit only the settings they care about
#[test]
#[allow(clippy::unwrap_used)]
fn given_partial_toml_when_parsing_then_missing_keys_default() {
    // Given
    let contents = r#"
        [recording]
        directory = "/var/memos"

        [hotkey]
    "#;

    // When
    let config = Config::parse(contents).unwrap();

    // Then
    assert_eq!(config.recording.directory, Some(PathBuf::from("/var/memos")));
    assert!(config.hotkey.enabled);
}

/// WHAT: Malformed TOML is a configuration error
/// WHY: A broken file must not silently reset settings
#[test]
fn given_malformed_toml_when_parsing_then_config_error() {
    // Given / When
    let result = Config::parse("[hotkey\nenabled = 1");

    // Then
    assert!(matches!(result, Err(crate::AppError::ConfigError { .. })));
}

/// WHAT: The configured recording directory wins over the default
/// WHY: Users choose where memos are stored
#[test]
fn given_recording_directory_when_resolving_then_configured_path() {
    // Given
    let config = Config {
        recording: RecordingConfig {
            directory: Some(PathBuf::from("/srv/memos")),
        },
        ..Config::default()
    };

    // When / Then
    assert_eq!(config.recording_directory(), PathBuf::from("/srv/memos"));
}

/// WHAT: Without a directory, recordings go under the system temp dir
/// WHY: Recordings need a writable location out of the box
#[test]
fn given_no_recording_directory_when_resolving_then_temp_subdirectory() {
    // Given
    let config = Config::default();

    // When / Then
    assert_eq!(
        config.recording_directory(),
        std::env::temp_dir().join("voice-memos")
    );
}

/// WHAT: A configured settings URL is used as-is
/// WHY: Overrides the platform's microphone privacy page
#[test]
#[allow(clippy::unwrap_used)]
fn given_settings_url_when_resolving_target_then_url_returned() {
    // Given
    let config = Config {
        settings: SettingsConfig {
            url: Some("https://example.com/settings".to_string()),
        },
        ..Config::default()
    };

    // When / Then
    assert_eq!(
        config.settings_target().unwrap(),
        "https://example.com/settings"
    );
}

/// WHAT: Saved configuration reads back identically
/// WHY: The atomic write must produce a complete file
#[test]
#[allow(clippy::unwrap_used)]
fn given_config_when_saved_then_reloads_equal_and_no_temp_left() {
    // Given
    let dir = std::env::temp_dir().join(format!("voice-memos-config-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    let config = Config {
        recording: RecordingConfig {
            directory: Some(PathBuf::from("/srv/memos")),
        },
        settings: SettingsConfig {
            url: Some("ms-settings:privacy-microphone".to_string()),
        },
        hotkey: HotkeyConfig { enabled: false },
    };

    // When
    config.save_to(&path).unwrap();

    // Then
    let reloaded = Config::parse(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded, config);
    assert!(!path.with_extension("toml.tmp").exists());

    fs::remove_dir_all(&dir).unwrap();
}
