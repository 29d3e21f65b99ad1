//! Resolves coordinator effects.
//!
//! Nothing here blocks the event loop: every effect is handed to a spawned
//! task whose outcome re-enters the application queue as a new action.

use crate::{
    AppCommand,
    collaborators::{PermissionService, RecordingBackend, SettingsLauncher},
};

use std::{collections::HashMap, path::PathBuf, sync::Arc, time::Duration};

use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};
use tracing::{debug, error, info, instrument, warn};
use voice_memos_core::{
    AudioPlayer, Effect, MemoAction, MemoId, MemoListAction, RecordingAction, TIMER_INTERVAL,
};

/// How often playback progress is reported.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(250);

/// Work for the recorder task, processed strictly in order. Each command
/// names the session file it belongs to.
#[derive(Debug)]
enum RecorderCommand {
    Start(PathBuf),
    Stop(PathBuf),
}

impl RecorderCommand {
    fn into_location(self) -> PathBuf {
        match self {
            RecorderCommand::Start(location) | RecorderCommand::Stop(location) => location,
        }
    }
}

/// Dispatches [`Effect`]s to collaborators and audio devices.
pub struct EffectRunner<P, S> {
    command_tx: mpsc::Sender<AppCommand>,
    permission: Arc<P>,
    settings: Arc<S>,
    recorder_tx: mpsc::Sender<RecorderCommand>,
    recorder_task: JoinHandle<()>,
    recording_timer: Option<JoinHandle<()>>,
    playbacks: HashMap<MemoId, JoinHandle<()>>,
}

impl<P: PermissionService, S: SettingsLauncher> EffectRunner<P, S> {
    /// Create a runner that reports outcomes through `command_tx`. The
    /// recorder moves into its own task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new<R: RecordingBackend>(
        command_tx: mpsc::Sender<AppCommand>,
        permission: P,
        settings: S,
        recorder: R,
    ) -> Self {
        let (recorder_tx, recorder_rx) = mpsc::channel(8);
        let recorder_task = tokio::spawn(run_recorder(
            Arc::new(recorder),
            recorder_rx,
            command_tx.clone(),
        ));

        Self {
            command_tx,
            permission: Arc::new(permission),
            settings: Arc::new(settings),
            recorder_tx,
            recorder_task,
            recording_timer: None,
            playbacks: HashMap::new(),
        }
    }

    /// Start resolving an effect.
    #[instrument(skip(self), fields(kind = effect.kind()))]
    pub fn run(&mut self, effect: Effect) {
        self.playbacks.retain(|_, handle| !handle.is_finished());

        match effect {
            Effect::RequestRecordPermission => {
                let permission = Arc::clone(&self.permission);
                let tx = self.command_tx.clone();
                tokio::spawn(async move {
                    let granted = permission.request_record_permission().await;
                    dispatch(&tx, MemoListAction::PermissionResponded { granted }).await;
                });
            }
            Effect::OpenSettings => {
                let settings = Arc::clone(&self.settings);
                tokio::spawn(async move { settings.open().await });
            }
            Effect::StartRecording { location } => {
                self.send_to_recorder(RecorderCommand::Start(location));
                self.cancel_recording_timer();
                self.recording_timer = Some(tokio::spawn(run_recording_timer(
                    self.command_tx.clone(),
                )));
            }
            Effect::StopRecording { location } => {
                self.cancel_recording_timer();
                self.send_to_recorder(RecorderCommand::Stop(location));
            }
            Effect::StartPlayback {
                id,
                location,
                generation,
            } => {
                self.stop_playback(id);
                let handle = tokio::spawn(run_playback(
                    id,
                    location,
                    generation,
                    self.command_tx.clone(),
                ));
                self.playbacks.insert(id, handle);
            }
            Effect::StopPlayback { id } => self.stop_playback(id),
        }
    }

    /// Stop the recording timer, if running.
    pub fn cancel_recording_timer(&mut self) {
        if let Some(timer) = self.recording_timer.take() {
            timer.abort();
        }
    }

    /// Number of playbacks still running.
    #[cfg(test)]
    pub(crate) fn active_playbacks(&self) -> usize {
        self.playbacks
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Abort everything in flight.
    #[instrument(skip(self))]
    pub fn shutdown(mut self) {
        self.cancel_recording_timer();
        for (id, handle) in self.playbacks.drain() {
            debug!(memo_id = %id, "Aborting playback");
            handle.abort();
        }
        self.recorder_task.abort();
        info!("Effect runner stopped");
    }

    fn stop_playback(&mut self, id: MemoId) {
        if let Some(handle) = self.playbacks.remove(&id) {
            handle.abort();
            debug!(memo_id = %id, "Playback stopped");
        }
    }

    /// Queue `command` for the recorder. If it cannot be queued the
    /// session is failed here, since the recorder will never see it.
    fn send_to_recorder(&self, command: RecorderCommand) {
        if let Err(e) = self.recorder_tx.try_send(command) {
            let command = match e {
                TrySendError::Full(command) | TrySendError::Closed(command) => command,
            };
            error!(command = ?command, "Recorder queue unavailable");
            let tx = self.command_tx.clone();
            let location = command.into_location();
            tokio::spawn(async move { recorder_failed(&tx, location).await });
        }
    }
}

/// Send an action back into the application queue.
async fn dispatch(tx: &mpsc::Sender<AppCommand>, action: MemoListAction) {
    if let Err(e) = tx.send(AppCommand::Dispatch(action)).await {
        debug!(error = ?e, "Application queue closed, dropping effect outcome");
    }
}

/// Owns the running recording; processes start/stop in order.
///
/// Every session gets exactly one outcome: a failed start reports once and
/// its later stop finds nothing to stop.
async fn run_recorder<R: RecordingBackend>(
    backend: Arc<R>,
    mut rx: mpsc::Receiver<RecorderCommand>,
    tx: mpsc::Sender<AppCommand>,
) {
    let mut active: Option<(PathBuf, R::Handle)> = None;

    while let Some(command) = rx.recv().await {
        match command {
            RecorderCommand::Start(location) => {
                let running = active.as_ref().map(|(running, _)| running.clone());
                if let Some(running) = running {
                    warn!(
                        running = ?running,
                        location = ?location,
                        "Recorder already running, failing new session"
                    );
                    recorder_failed(&tx, location).await;
                    continue;
                }

                match backend.start(location.clone()).await {
                    Ok(handle) => {
                        debug!(location = ?location, "Recorder started");
                        active = Some((location, handle));
                    }
                    Err(e) => {
                        error!(location = ?location, error = ?e, "Failed to start recording");
                        recorder_failed(&tx, location).await;
                    }
                }
            }
            RecorderCommand::Stop(location) => {
                let handle = match active.take() {
                    Some((running, handle)) if running == location => handle,
                    other => {
                        active = other;
                        debug!(location = ?location, "No recorder running for session");
                        continue;
                    }
                };

                match backend.stop(handle).await {
                    Ok(duration) => {
                        report(
                            &tx,
                            location.clone(),
                            RecordingAction::FinalRecordingTime(duration),
                        )
                        .await;
                        report(
                            &tx,
                            location,
                            RecordingAction::RecorderFinished { success: true },
                        )
                        .await;
                    }
                    Err(e) => {
                        error!(location = ?location, error = ?e, "Failed to finish recording");
                        recorder_failed(&tx, location).await;
                    }
                }
            }
        }
    }

    debug!("Recorder queue closed");
}

async fn report(tx: &mpsc::Sender<AppCommand>, location: PathBuf, action: RecordingAction) {
    dispatch(tx, MemoListAction::RecorderReported { location, action }).await;
}

async fn recorder_failed(tx: &mpsc::Sender<AppCommand>, location: PathBuf) {
    report(
        tx,
        location,
        RecordingAction::RecorderFinished { success: false },
    )
    .await;
}

async fn run_recording_timer(tx: mpsc::Sender<AppCommand>) {
    let mut interval = tokio::time::interval(TIMER_INTERVAL);
    // The first tick completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        dispatch(&tx, MemoListAction::Recording(RecordingAction::TimerTicked)).await;
    }
}

async fn run_playback(
    id: MemoId,
    location: PathBuf,
    generation: u64,
    tx: mpsc::Sender<AppCommand>,
) {
    let memo = |action| MemoListAction::Memo { id, action };

    let playback = match tokio::task::spawn_blocking(move || AudioPlayer::play(&location)).await {
        Ok(Ok(playback)) => playback,
        Ok(Err(e)) => {
            error!(memo_id = %id, error = ?e, "Failed to start playback");
            dispatch(&tx, memo(MemoAction::PlaybackFailed { generation })).await;
            return;
        }
        Err(e) => {
            error!(memo_id = %id, error = ?e, "Playback task panicked");
            dispatch(&tx, memo(MemoAction::PlaybackFailed { generation })).await;
            return;
        }
    };

    debug!(memo_id = %id, duration_ms = playback.duration().as_millis(), "Playing");

    let mut interval = tokio::time::interval(PROGRESS_INTERVAL);
    loop {
        interval.tick().await;
        if playback.is_finished() {
            dispatch(&tx, memo(MemoAction::PlaybackFinished { generation })).await;
            break;
        }
        dispatch(
            &tx,
            memo(MemoAction::PlaybackProgress {
                generation,
                elapsed: playback.elapsed(),
            }),
        )
        .await;
    }
}
