//! Memo list coordinator.
//!
//! Mediates between recording, permission, alerting and playback. Child
//! state machines (one per memo, one for the live recording) are driven from
//! here and their delegate notifications are handled in the same step that
//! produced them, so the "one memo playing" rule is applied atomically.

use crate::{
    coordinator::{Alert, Effect, MemoListAction, MemoListState, PermissionStatus},
    environment::Environment,
    memo::{Memo, MemoAction, MemoDelegate, MemoEffect, MemoId, MemoReducer, PlaybackMode},
    mvi::Reducer,
    recording::{
        RecordingAction, RecordingEffect, RecordingOutcome, RecordingReducer, RecordingSession,
    },
};

use tracing::{debug, info, instrument, warn};

/// File extension of new recordings.
pub const AUDIO_FILE_EXTENSION: &str = "wav";

/// Reducer owning list-level state and the cross-memo invariants.
#[derive(Debug, Clone)]
pub struct MemoListCoordinator {
    env: Environment,
    memo: MemoReducer,
    recording: RecordingReducer,
}

impl MemoListCoordinator {
    /// Create a coordinator using the given collaborators.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            memo: MemoReducer,
            recording: RecordingReducer,
        }
    }

    fn record_button_pressed(&self, state: &mut MemoListState) -> Vec<Effect> {
        match state.permission {
            PermissionStatus::Undetermined => vec![Effect::RequestRecordPermission],
            PermissionStatus::Denied => {
                state.alert = Some(Alert::MicrophoneAccessRequired);
                Vec::new()
            }
            PermissionStatus::Allowed => self.start_session(state),
        }
    }

    fn permission_responded(&self, state: &mut MemoListState, granted: bool) -> Vec<Effect> {
        if granted {
            state.permission = PermissionStatus::Allowed;
            self.start_session(state)
        } else {
            state.permission = PermissionStatus::Denied;
            state.alert = Some(Alert::MicrophoneAccessRequired);
            Vec::new()
        }
    }

    fn start_session(&self, state: &mut MemoListState) -> Vec<Effect> {
        if let Some(active) = &state.active_recording {
            warn!(
                location = ?active.location,
                "Recording already in progress, ignoring record request"
            );
            return Vec::new();
        }

        let location = self
            .env
            .temp_dir
            .path()
            .join(format!("{}.{}", self.env.ids.next(), AUDIO_FILE_EXTENSION));
        let session = RecordingSession::new(self.env.clock.now(), location.clone());

        info!(location = ?location, "Recording session started");
        state.active_recording = Some(session);

        vec![Effect::StartRecording { location }]
    }

    fn recording_finished(
        &self,
        state: &mut MemoListState,
        outcome: RecordingOutcome,
    ) -> Vec<Effect> {
        state.active_recording = None;

        match outcome {
            RecordingOutcome::Success(audio) => {
                let memo = Memo::new(
                    MemoId::new(self.env.ids.next()),
                    audio.date,
                    audio.duration,
                    audio.location,
                );
                info!(
                    memo_id = %memo.id,
                    duration_ms = memo.duration.as_millis(),
                    "Memo saved"
                );
                state.memos.insert_front(memo);
            }
            RecordingOutcome::Failure => {
                warn!("Recording failed");
                state.alert = Some(Alert::RecordingFailed);
            }
        }

        Vec::new()
    }

    fn forward_to_recording(
        &self,
        state: &mut MemoListState,
        action: RecordingAction,
    ) -> Vec<Effect> {
        let Some(session) = state.active_recording.as_mut() else {
            debug!(action = ?action, "No active recording, dropping action");
            return Vec::new();
        };

        let location = session.location.clone();
        let mut effects = Vec::new();
        for effect in self.recording.reduce(session, action) {
            match effect {
                RecordingEffect::StopRecording => effects.push(Effect::StopRecording {
                    location: location.clone(),
                }),
                RecordingEffect::Finished(outcome) => {
                    effects.extend(self.recording_finished(state, outcome));
                }
            }
        }
        effects
    }

    fn forward_to_memo(
        &self,
        state: &mut MemoListState,
        id: MemoId,
        action: MemoAction,
    ) -> Vec<Effect> {
        let Some(memo) = state.memos.get_mut(id) else {
            debug!(memo_id = %id, action = ?action, "Unknown memo, dropping action");
            return Vec::new();
        };

        let mut effects = Vec::new();
        for effect in self.memo.reduce(memo, action) {
            match effect {
                MemoEffect::StartPlayback {
                    location,
                    generation,
                } => {
                    effects.push(Effect::StartPlayback {
                        id,
                        location,
                        generation,
                    });
                }
                MemoEffect::StopPlayback => effects.push(Effect::StopPlayback { id }),
                MemoEffect::Delegate(event) => {
                    effects.extend(self.memo_delegate(state, id, event));
                }
            }
        }
        effects
    }

    fn memo_delegate(
        &self,
        state: &mut MemoListState,
        id: MemoId,
        event: MemoDelegate,
    ) -> Vec<Effect> {
        match event {
            MemoDelegate::PlaybackStarted => {
                let mut effects = Vec::new();
                for memo in state.memos.values_mut().filter(|memo| memo.id != id) {
                    if memo.mode.is_playing() {
                        debug!(memo_id = %memo.id, playing = %id, "Stopping sibling playback");
                        effects.push(Effect::StopPlayback { id: memo.id });
                    }
                    memo.mode = PlaybackMode::NotPlaying;
                }
                effects
            }
            MemoDelegate::PlaybackFailed => {
                warn!(memo_id = %id, "Playback failed");
                state.alert = Some(Alert::PlaybackFailed);
                Vec::new()
            }
        }
    }
}

impl Reducer for MemoListCoordinator {
    type State = MemoListState;
    type Intent = MemoListAction;
    type Effect = Effect;

    #[instrument(skip(self, state), level = "debug")]
    fn reduce(&self, state: &mut MemoListState, action: MemoListAction) -> Vec<Effect> {
        match action {
            MemoListAction::OpenSettingsRequested => vec![Effect::OpenSettings],
            MemoListAction::RecordButtonPressed => self.record_button_pressed(state),
            MemoListAction::PermissionResponded { granted } => {
                self.permission_responded(state, granted)
            }
            MemoListAction::RecordingFinished(outcome) => self.recording_finished(state, outcome),
            MemoListAction::Recording(action) => self.forward_to_recording(state, action),
            MemoListAction::RecorderReported { location, action } => {
                let live = state
                    .active_recording
                    .as_ref()
                    .is_some_and(|session| session.location == location);
                if live {
                    self.forward_to_recording(state, action)
                } else {
                    debug!(
                        location = ?location,
                        action = ?action,
                        "Recorder report for a finished session, dropping"
                    );
                    Vec::new()
                }
            }
            MemoListAction::Memo { id, action } => self.forward_to_memo(state, id, action),
            MemoListAction::MemoDelegate { id, event } => self.memo_delegate(state, id, event),
            MemoListAction::MemosDeleted { offsets } => state
                .memos
                .remove_offsets(&offsets)
                .into_iter()
                .filter(|memo| memo.mode.is_playing())
                .map(|memo| Effect::StopPlayback { id: memo.id })
                .collect(),
            MemoListAction::MemosMoved {
                offsets,
                destination,
            } => {
                state.memos.move_offsets(&offsets, destination);
                Vec::new()
            }
            MemoListAction::AlertDismissed => {
                state.alert = None;
                Vec::new()
            }
        }
    }
}
