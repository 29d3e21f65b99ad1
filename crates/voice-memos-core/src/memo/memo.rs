use crate::mvi::UiState;

use std::{fmt, path::PathBuf, time::Duration};

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Stable identity of a saved memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoId(Uuid);

impl MemoId {
    /// Wrap an identifier produced by a [`UniqueIdSource`](crate::UniqueIdSource).
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying identifier.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for MemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Playback state of a single memo.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackMode {
    /// Idle.
    #[default]
    NotPlaying,
    /// Playing, with progress in `0.0..=1.0`.
    Playing {
        /// Fraction of the memo's duration already played.
        progress: f64,
    },
}

impl PlaybackMode {
    /// Whether the memo is currently playing.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing { .. })
    }
}

/// A completed recording in the memo list.
#[derive(Debug, Clone, PartialEq)]
pub struct Memo {
    /// Stable identity used for targeted updates and deletion.
    pub id: MemoId,
    /// When the recording started.
    pub date: DateTime<Utc>,
    /// Length of the recording.
    pub duration: Duration,
    /// WAV file holding the audio.
    pub location: PathBuf,
    /// User supplied title; empty until edited.
    pub title: String,
    /// Current playback state.
    pub mode: PlaybackMode,
    /// Number of playbacks started. Player reports carry the generation
    /// they belong to; reports from an earlier one are dropped.
    pub generation: u64,
}

impl UiState for Memo {}

impl Memo {
    /// Create a memo for a finished recording with default title and mode.
    pub fn new(id: MemoId, date: DateTime<Utc>, duration: Duration, location: PathBuf) -> Self {
        Self {
            id,
            date,
            duration,
            location,
            title: String::new(),
            mode: PlaybackMode::NotPlaying,
            generation: 0,
        }
    }

    /// Title to show in the list, falling back to the recording date.
    pub fn display_title(&self) -> String {
        if self.title.is_empty() {
            self.date.format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            self.title.clone()
        }
    }

    /// Whether a player report tagged `generation` belongs to the current
    /// playback.
    pub(crate) fn is_current_playback(&self, generation: u64) -> bool {
        self.mode.is_playing() && self.generation == generation
    }

    /// Playback progress for `elapsed` playing time, clamped to `0.0..=1.0`.
    pub(crate) fn progress_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 0.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
