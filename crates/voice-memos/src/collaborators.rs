//! Production collaborators for the coordinator and effect runner.

use crate::AppResult;

use std::{future::Future, path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;
use voice_memos_core::{AudioRecorder, Clock, TempDirectoryProvider, UniqueIdSource};

/// Wall clock.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random v4 UUIDs.
pub struct RandomIds;

impl UniqueIdSource for RandomIds {
    fn next(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Fixed recording directory from the configuration.
pub struct RecordingDirectory(pub PathBuf);

impl TempDirectoryProvider for RecordingDirectory {
    fn path(&self) -> PathBuf {
        self.0.clone()
    }
}

/// Asks whether the microphone may be used.
pub trait PermissionService: Send + Sync + 'static {
    /// Resolve to `true` when recording is allowed.
    fn request_record_permission(&self) -> impl Future<Output = bool> + Send;
}

/// Captures microphone audio into files.
///
/// Calls for one recorder arrive strictly in order; a handle is stopped at
/// most once.
pub trait RecordingBackend: Send + Sync + 'static {
    /// A recording in progress.
    type Handle: Send + 'static;

    /// Begin capturing into `location`.
    fn start(&self, location: PathBuf) -> impl Future<Output = AppResult<Self::Handle>> + Send;

    /// Finish the recording, write the file and return its length.
    fn stop(&self, handle: Self::Handle) -> impl Future<Output = AppResult<Duration>> + Send;
}

/// Opens the system settings. Failures are logged, never reported.
pub trait SettingsLauncher: Send + Sync + 'static {
    /// Open the settings target.
    fn open(&self) -> impl Future<Output = ()> + Send;
}

/// Grants permission when a usable input device is present.
pub struct DevicePermissionService;

impl PermissionService for DevicePermissionService {
    #[instrument(skip(self))]
    async fn request_record_permission(&self) -> bool {
        match tokio::task::spawn_blocking(AudioRecorder::check_input_device).await {
            Ok(Ok(())) => {
                info!("Microphone available, recording allowed");
                true
            }
            Ok(Err(e)) => {
                warn!(error = ?e, "Microphone unavailable, recording denied");
                false
            }
            Err(e) => {
                error!(error = ?e, "Microphone check task panicked");
                false
            }
        }
    }
}

/// Records from the default input device.
pub struct DeviceRecorder;

impl RecordingBackend for DeviceRecorder {
    type Handle = AudioRecorder;

    #[instrument(skip(self))]
    async fn start(&self, location: PathBuf) -> AppResult<AudioRecorder> {
        let recorder = tokio::task::spawn_blocking(move || -> AppResult<AudioRecorder> {
            let mut recorder = AudioRecorder::new()?;
            recorder.start(&location)?;
            Ok(recorder)
        })
        .await??;
        Ok(recorder)
    }

    #[instrument(skip(self, handle))]
    async fn stop(&self, mut handle: AudioRecorder) -> AppResult<Duration> {
        let duration =
            tokio::task::spawn_blocking(move || -> AppResult<Duration> { Ok(handle.stop()?) })
                .await??;
        info!(duration_ms = duration.as_millis(), "Recording finished");
        Ok(duration)
    }
}

/// Opens a URL or path with the platform's default handler.
pub struct SystemSettingsLauncher {
    target: String,
}

impl SystemSettingsLauncher {
    /// Launcher for `target`.
    pub fn new(target: String) -> Self {
        Self { target }
    }
}

impl SettingsLauncher for SystemSettingsLauncher {
    #[instrument(skip(self), fields(target = %self.target))]
    async fn open(&self) {
        let target = self.target.clone();
        match tokio::task::spawn_blocking(move || open::that(target)).await {
            Ok(Ok(())) => info!("Opened settings"),
            Ok(Err(e)) => warn!(error = ?e, "Failed to open settings"),
            Err(e) => error!(error = ?e, "Settings launcher task panicked"),
        }
    }
}
