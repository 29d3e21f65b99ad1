use crate::{
    memo::{MemoAction, MemoDelegate, MemoId},
    mvi::Intent,
    recording::{RecordingAction, RecordingOutcome},
};

use std::path::PathBuf;

/// Everything the memo list coordinator reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoListAction {
    /// User asked to open the system settings.
    OpenSettingsRequested,
    /// User pressed record.
    RecordButtonPressed,
    /// Permission prompt answered.
    PermissionResponded {
        /// Whether recording was allowed.
        granted: bool,
    },
    /// The live recording session ended.
    RecordingFinished(RecordingOutcome),
    /// Action for the live recording session.
    Recording(RecordingAction),
    /// Report from the recorder for the session writing `location`.
    /// Dropped unless that session is still live.
    RecorderReported {
        /// File of the session the recorder was working for.
        location: PathBuf,
        /// What the recorder reported.
        action: RecordingAction,
    },
    /// Action for one memo.
    Memo {
        /// Target memo.
        id: MemoId,
        /// Action to apply.
        action: MemoAction,
    },
    /// Notification bubbled up from one memo.
    MemoDelegate {
        /// Memo that raised it.
        id: MemoId,
        /// What happened.
        event: MemoDelegate,
    },
    /// Remove the memos at these display offsets.
    MemosDeleted {
        /// Display offsets to remove.
        offsets: Vec<usize>,
    },
    /// Move the memos at these display offsets before `destination`.
    MemosMoved {
        /// Display offsets to move.
        offsets: Vec<usize>,
        /// Target offset, in terms of the list before the move.
        destination: usize,
    },
    /// User dismissed the alert.
    AlertDismissed,
}

impl Intent for MemoListAction {}
