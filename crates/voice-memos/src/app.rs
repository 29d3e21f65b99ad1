use crate::{
    AppCommand, AppResult, EffectRunner, TrayIconState, TrayRequest,
    collaborators::{DevicePermissionService, SystemSettingsLauncher},
    console::{self, Resolution},
};

use std::time::Duration;

use tao::event_loop::EventLoopProxy;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument};
use tray_icon::menu::{MenuEvent, MenuId};
use voice_memos_core::{
    MemoListAction, MemoListCoordinator, MemoListState, RecordingAction, mvi::Reducer,
};

/// Main application state.
///
/// Runs on the async runtime thread and is the only owner of the memo list.
/// Tray icon updates go back to the main thread via `tray_proxy` because
/// `TrayIcon` is `!Send` and must remain on the UI thread.
pub struct App {
    pub(crate) coordinator: MemoListCoordinator,
    pub(crate) state: MemoListState,
    pub(crate) effects: EffectRunner<DevicePermissionService, SystemSettingsLauncher>,
    pub(crate) tray_proxy: EventLoopProxy<TrayRequest>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) settings_menu_id: MenuId,
    pub(crate) exit_menu_id: MenuId,
    pub(crate) last_view: String,
    pub(crate) tray_state: TrayIconState,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Voice Memos starting");

        self.refresh();

        // MenuEvent::receiver() is a crossbeam receiver with blocking recv(),
        // so one blocking task forwards events. It exits on the first failed
        // send once tray_event_rx is dropped.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if event.id == self.settings_menu_id {
                        self.dispatch(MemoListAction::OpenSettingsRequested);
                    } else if event.id == self.exit_menu_id {
                        info!("Exit requested from tray menu");
                        break;
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    match cmd {
                        AppCommand::Dispatch(action) => self.dispatch(action),
                        AppCommand::ToggleRecording => {
                            let action = if self.state.is_recording() {
                                MemoListAction::Recording(RecordingAction::StopButtonTapped)
                            } else {
                                MemoListAction::RecordButtonPressed
                            };
                            self.dispatch(action);
                        }
                        AppCommand::Console(command) => {
                            match console::resolve(&self.state, command) {
                                Resolution::Dispatch(action) => self.dispatch(action),
                                Resolution::Print(text) => println!("{}", text),
                                Resolution::Quit => {
                                    info!("Quit requested from console");
                                    break;
                                }
                            }
                        }
                        AppCommand::Shutdown => {
                            info!("Shutdown requested");
                            break;
                        }
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        self.effects.shutdown();
        let _ = self.shutdown_tx.send(true);
        if self.tray_proxy.send_event(TrayRequest::Quit).is_err() {
            debug!("Event loop already closed");
        }
        info!("Voice Memos shut down successfully");

        Ok(())
    }

    /// Apply one action and start resolving its effects.
    fn dispatch(&mut self, action: MemoListAction) {
        let effects = self.coordinator.reduce(&mut self.state, action);
        for effect in effects {
            self.effects.run(effect);
        }

        if !self.state.is_recording() {
            self.effects.cancel_recording_timer();
        }

        self.refresh();
    }

    /// Re-render the list and tray icon when they changed.
    fn refresh(&mut self) {
        let view = console::render(&self.state);
        if view != self.last_view {
            print!("{}", view);
            self.last_view = view;
        }

        let tray_state = TrayIconState::for_state(&self.state);
        if tray_state != self.tray_state {
            if self
                .tray_proxy
                .send_event(TrayRequest::Show(tray_state))
                .is_err()
            {
                debug!("Event loop closed, tray state not updated");
            }
            self.tray_state = tray_state;
        }
    }
}
