use std::fmt;

/// User-facing alert. At most one is shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    /// Microphone permission was denied.
    MicrophoneAccessRequired,
    /// The recorder failed to produce a file.
    RecordingFailed,
    /// A memo could not be played.
    PlaybackFailed,
}

impl Alert {
    /// Stable message key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::MicrophoneAccessRequired => "microphone access required",
            Self::RecordingFailed => "recording failed",
            Self::PlaybackFailed => "playback failed",
        }
    }

    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MicrophoneAccessRequired => {
                "Permission is required to record voice memos. Use `settings` to grant microphone access."
            }
            Self::RecordingFailed => "Voice memo recording failed.",
            Self::PlaybackFailed => "Voice memo playback failed.",
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
