//! Per-memo playback state machine.

use crate::{
    memo::{Memo, PlaybackMode},
    mvi::{Intent, Reducer},
};

use std::{path::PathBuf, time::Duration};

use tracing::debug;

/// Actions addressed to a single memo.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoAction {
    /// Play button toggled.
    PlayButtonTapped,
    /// Playback clock update with total time played so far.
    PlaybackProgress {
        /// Playback the report belongs to.
        generation: u64,
        /// Time played so far.
        elapsed: Duration,
    },
    /// Player reached the end of the file.
    PlaybackFinished {
        /// Playback the report belongs to.
        generation: u64,
    },
    /// Player could not open or play the file.
    PlaybackFailed {
        /// Playback the report belongs to.
        generation: u64,
    },
    /// Title edited.
    TitleChanged(String),
}

impl Intent for MemoAction {}

/// Notifications a memo bubbles up to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoDelegate {
    /// This memo started playing; every other memo must stop.
    PlaybackStarted,
    /// Playback of this memo failed.
    PlaybackFailed,
}

/// Effects emitted by the memo state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum MemoEffect {
    /// Start playing the file.
    StartPlayback {
        /// File to play.
        location: PathBuf,
        /// Tag for the player's reports.
        generation: u64,
    },
    /// Stop any playback of this memo.
    StopPlayback,
    /// Notify the parent list.
    Delegate(MemoDelegate),
}

/// Reducer for one [`Memo`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoReducer;

impl Reducer for MemoReducer {
    type State = Memo;
    type Intent = MemoAction;
    type Effect = MemoEffect;

    fn reduce(&self, memo: &mut Memo, action: MemoAction) -> Vec<MemoEffect> {
        match action {
            MemoAction::PlayButtonTapped => match memo.mode {
                PlaybackMode::NotPlaying => {
                    memo.mode = PlaybackMode::Playing { progress: 0.0 };
                    memo.generation += 1;
                    // Delegate first so the parent stops siblings before this
                    // memo's playback is dispatched.
                    vec![
                        MemoEffect::Delegate(MemoDelegate::PlaybackStarted),
                        MemoEffect::StartPlayback {
                            location: memo.location.clone(),
                            generation: memo.generation,
                        },
                    ]
                }
                PlaybackMode::Playing { .. } => {
                    memo.mode = PlaybackMode::NotPlaying;
                    vec![MemoEffect::StopPlayback]
                }
            },
            MemoAction::PlaybackProgress {
                generation,
                elapsed,
            } => {
                if !memo.is_current_playback(generation) {
                    debug!(memo_id = %memo.id, generation, "Ignoring stale playback progress");
                    return Vec::new();
                }
                memo.mode = PlaybackMode::Playing {
                    progress: memo.progress_at(elapsed),
                };
                Vec::new()
            }
            MemoAction::PlaybackFinished { generation } => {
                if memo.is_current_playback(generation) {
                    memo.mode = PlaybackMode::NotPlaying;
                } else {
                    debug!(memo_id = %memo.id, generation, "Ignoring stale playback finish");
                }
                Vec::new()
            }
            MemoAction::PlaybackFailed { generation } => {
                if !memo.is_current_playback(generation) {
                    debug!(memo_id = %memo.id, generation, "Ignoring stale playback failure");
                    return Vec::new();
                }
                memo.mode = PlaybackMode::NotPlaying;
                vec![MemoEffect::Delegate(MemoDelegate::PlaybackFailed)]
            }
            MemoAction::TitleChanged(title) => {
                memo.title = title;
                Vec::new()
            }
        }
    }
}
