//! Live recording state machine.

use crate::{
    mvi::{Intent, Reducer},
    recording::{RecordedAudio, RecordingMode, RecordingOutcome, RecordingSession, TIMER_INTERVAL},
};

use std::time::Duration;

use tracing::debug;

/// Actions addressed to the live recording session.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingAction {
    /// Recording timer fired.
    TimerTicked,
    /// User asked to stop.
    StopButtonTapped,
    /// Recorder reported the exact length of the captured audio.
    FinalRecordingTime(Duration),
    /// Recorder finished writing the file.
    RecorderFinished {
        /// Whether the file was written successfully.
        success: bool,
    },
}

impl Intent for RecordingAction {}

/// Effects emitted by the recording state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingEffect {
    /// Stop the recorder and flush the file.
    StopRecording,
    /// Session is over; the parent promotes or discards it.
    Finished(RecordingOutcome),
}

/// Reducer for the [`RecordingSession`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordingReducer;

impl Reducer for RecordingReducer {
    type State = RecordingSession;
    type Intent = RecordingAction;
    type Effect = RecordingEffect;

    fn reduce(
        &self,
        session: &mut RecordingSession,
        action: RecordingAction,
    ) -> Vec<RecordingEffect> {
        match action {
            RecordingAction::TimerTicked => {
                if session.mode == RecordingMode::Recording {
                    session.duration += TIMER_INTERVAL;
                }
                Vec::new()
            }
            RecordingAction::StopButtonTapped => match session.mode {
                RecordingMode::Recording => {
                    session.mode = RecordingMode::Encoding;
                    vec![RecordingEffect::StopRecording]
                }
                RecordingMode::Encoding => {
                    debug!("Stop already requested");
                    Vec::new()
                }
            },
            RecordingAction::FinalRecordingTime(duration) => {
                session.duration = duration;
                Vec::new()
            }
            RecordingAction::RecorderFinished { success: true } => {
                vec![RecordingEffect::Finished(RecordingOutcome::Success(
                    RecordedAudio {
                        date: session.date,
                        duration: session.duration,
                        location: session.location.clone(),
                    },
                ))]
            }
            RecordingAction::RecorderFinished { success: false } => {
                vec![RecordingEffect::Finished(RecordingOutcome::Failure)]
            }
        }
    }
}
