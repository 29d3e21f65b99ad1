mod reducer;
mod session;

pub use {
    reducer::{RecordingAction, RecordingEffect, RecordingReducer},
    session::{RecordedAudio, RecordingMode, RecordingOutcome, RecordingSession, TIMER_INTERVAL},
};
