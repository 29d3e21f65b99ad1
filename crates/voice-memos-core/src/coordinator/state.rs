use crate::{
    coordinator::Alert,
    memo::{Memo, MemoCollection},
    mvi::UiState,
    recording::RecordingSession,
};

/// Microphone permission as last reported by the permission service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionStatus {
    /// Not asked yet.
    #[default]
    Undetermined,
    /// Recording allowed.
    Allowed,
    /// Recording refused.
    Denied,
}

/// State owned by the memo list coordinator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoListState {
    /// Microphone permission.
    pub permission: PermissionStatus,
    /// Alert currently shown, if any.
    pub alert: Option<Alert>,
    /// The live recording, if any.
    pub active_recording: Option<RecordingSession>,
    /// Saved memos, newest first.
    pub memos: MemoCollection,
}

impl UiState for MemoListState {}

impl MemoListState {
    /// Whether a recording session is live.
    pub fn is_recording(&self) -> bool {
        self.active_recording.is_some()
    }

    /// The memo currently playing, if any.
    pub fn playing_memo(&self) -> Option<&Memo> {
        self.memos.iter().find(|memo| memo.mode.is_playing())
    }
}
