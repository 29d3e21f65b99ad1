use voice_memos_core::MemoListState;

/// Tray icon states corresponding to application activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Nothing recording or playing.
    Idle,
    /// A recording session is live.
    Recording,
    /// A memo is playing.
    Playing,
}

impl TrayIconState {
    /// Icon state for the current memo list. Recording wins over playback.
    pub fn for_state(state: &MemoListState) -> Self {
        if state.is_recording() {
            Self::Recording
        } else if state.playing_memo().is_some() {
            Self::Playing
        } else {
            Self::Idle
        }
    }
}
