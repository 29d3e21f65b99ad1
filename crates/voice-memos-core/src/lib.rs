//! Voice Memos Core Library
//!
//! State machines for a voice-memo recorder/player built on unidirectional
//! data flow, plus cpal-backed recording and playback.
//!
//! # Example
//!
//! ```no_run
//! use voice_memos_core::{
//!     Clock, Effect, Environment, MemoListAction, MemoListCoordinator, MemoListState,
//!     PermissionStatus, Reducer, TempDirectoryProvider, UniqueIdSource,
//! };
//!
//! use std::{path::PathBuf, sync::Arc};
//!
//! struct Now;
//! impl Clock for Now {
//!     fn now(&self) -> chrono::DateTime<chrono::Utc> {
//!         chrono::Utc::now()
//!     }
//! }
//!
//! struct Ids;
//! impl UniqueIdSource for Ids {
//!     fn next(&self) -> uuid::Uuid {
//!         uuid::Uuid::new_v4()
//!     }
//! }
//!
//! struct Tmp;
//! impl TempDirectoryProvider for Tmp {
//!     fn path(&self) -> PathBuf {
//!         std::env::temp_dir()
//!     }
//! }
//!
//! let coordinator = MemoListCoordinator::new(Environment {
//!     clock: Arc::new(Now),
//!     ids: Arc::new(Ids),
//!     temp_dir: Arc::new(Tmp),
//! });
//!
//! let mut state = MemoListState {
//!     permission: PermissionStatus::Allowed,
//!     ..MemoListState::default()
//! };
//! let effects = coordinator.reduce(&mut state, MemoListAction::RecordButtonPressed);
//! assert!(matches!(effects[..], [Effect::StartRecording { .. }]));
//! ```

mod audio;
mod coordinator;
mod environment;
mod error;
mod memo;
pub mod mvi;
mod recording;

pub use {
    audio::{AudioPlayer, AudioRecorder, Playback},
    coordinator::{
        AUDIO_FILE_EXTENSION, Alert, Effect, MemoListAction, MemoListCoordinator, MemoListState,
        PermissionStatus,
    },
    environment::{Clock, Environment, TempDirectoryProvider, UniqueIdSource},
    error::{AudioError, Result as CoreResult},
    memo::{
        Memo, MemoAction, MemoCollection, MemoDelegate, MemoEffect, MemoId, MemoReducer,
        PlaybackMode,
    },
    mvi::Reducer,
    recording::{
        RecordedAudio, RecordingAction, RecordingEffect, RecordingMode, RecordingOutcome,
        RecordingReducer, RecordingSession, TIMER_INTERVAL,
    },
};

#[cfg(test)]
mod tests;
