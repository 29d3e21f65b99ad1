use crate::memo::MemoId;

use std::path::PathBuf;

/// Side effects requested by the coordinator.
///
/// Each is resolved asynchronously by the runtime; outcomes come back as
/// [`MemoListAction`](crate::MemoListAction)s.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Ask for microphone permission; answers with `PermissionResponded`.
    RequestRecordPermission,
    /// Open the system settings. Fire-and-forget.
    OpenSettings,
    /// Start capturing into `location`; reports through `RecorderReported`
    /// actions tagged with the same location.
    StartRecording {
        /// File to write.
        location: PathBuf,
    },
    /// Stop the capture writing `location` and flush the file.
    StopRecording {
        /// File of the session being stopped.
        location: PathBuf,
    },
    /// Start playing a memo; reports through `Memo` actions tagged with
    /// `generation`.
    StartPlayback {
        /// Memo being played.
        id: MemoId,
        /// File to play.
        location: PathBuf,
        /// Playback generation of the memo.
        generation: u64,
    },
    /// Stop any playback of a memo.
    StopPlayback {
        /// Memo to stop.
        id: MemoId,
    },
}

impl Effect {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequestRecordPermission => "request_record_permission",
            Self::OpenSettings => "open_settings",
            Self::StartRecording { .. } => "start_recording",
            Self::StopRecording { .. } => "stop_recording",
            Self::StartPlayback { .. } => "start_playback",
            Self::StopPlayback { .. } => "stop_playback",
        }
    }
}
