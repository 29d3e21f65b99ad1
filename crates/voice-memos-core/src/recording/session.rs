use crate::mvi::UiState;

use std::{path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};

/// How often the runtime ticks the recording timer.
pub const TIMER_INTERVAL: Duration = Duration::from_millis(500);

/// Phase of a live recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordingMode {
    /// Capturing audio.
    #[default]
    Recording,
    /// Stop requested; waiting for the recorder to flush the file.
    Encoding,
}

/// The single live recording, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSession {
    /// When recording started.
    pub date: DateTime<Utc>,
    /// File the recorder writes to.
    pub location: PathBuf,
    /// Elapsed time, advanced by timer ticks and corrected by the recorder.
    pub duration: Duration,
    /// Current phase.
    pub mode: RecordingMode,
}

impl UiState for RecordingSession {}

impl RecordingSession {
    /// Start a session writing to `location`.
    pub fn new(date: DateTime<Utc>, location: PathBuf) -> Self {
        Self {
            date,
            location,
            duration: Duration::ZERO,
            mode: RecordingMode::Recording,
        }
    }
}

/// Audio produced by a successful recording.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAudio {
    /// When recording started.
    pub date: DateTime<Utc>,
    /// Final length.
    pub duration: Duration,
    /// File holding the audio.
    pub location: PathBuf,
}

/// Terminal result of a recording session. Exactly one per session.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingOutcome {
    /// Recording saved.
    Success(RecordedAudio),
    /// Recorder failed; nothing usable was written.
    Failure,
}
