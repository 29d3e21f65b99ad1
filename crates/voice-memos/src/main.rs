//! Voice Memos: record, list, and play back voice memos from the console,
//! with a tray icon and a global hotkey to toggle recording.

mod app;
mod app_command;
mod collaborators;
mod config;
mod console;
mod effect_runner;
mod error;
mod hotkey_handler;
#[cfg(test)]
mod tests;
mod tray_icon_state;
mod tray_manager;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    effect_runner::EffectRunner,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    tray_icon_state::TrayIconState,
    tray_manager::{TrayManager, TrayRequest},
};

use crate::{
    collaborators::{
        DevicePermissionService, DeviceRecorder, RandomIds, RecordingDirectory, SystemClock,
        SystemSettingsLauncher,
    },
    config::Config,
};

use std::sync::Arc;

use global_hotkey::GlobalHotKeyManager;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use voice_memos_core::{Environment, MemoListCoordinator, MemoListState};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "voice_memos=debug,voice_memos_core=debug";

/// Application entry point.
fn main() {
    // stdout carries the memo list; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let event_loop = EventLoopBuilder::<TrayRequest>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Dropping it unregisters the hotkey.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(request) => {
                if tray_manager.handle(request) {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
                return;
            }
            Event::NewEvents(tao::event::StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let settings_target = match config.settings_target() {
                    Ok(target) => target,
                    Err(e) => {
                        error!("Failed to resolve settings target: {:?}", e);
                        std::process::exit(1);
                    }
                };
                let recording_directory = config.recording_directory();
                info!(recording_directory = ?recording_directory, "Recordings directory");

                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (command_tx, command_rx) = mpsc::channel(32);
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register on the main thread; tao's event loop pumps the
                // Windows messages needed for WM_HOTKEY delivery.
                let hotkey_id = if config.hotkey.enabled {
                    match HotkeyHandler::register_hotkey() {
                        Ok((manager, hotkey_id)) => {
                            hotkey_manager = Some(manager);
                            Some(hotkey_id)
                        }
                        Err(e) => {
                            warn!(error = ?e, "Continuing without global hotkey");
                            None
                        }
                    }
                } else {
                    info!("Global hotkey disabled in config");
                    None
                };

                let tray_proxy = tray_proxy.clone();
                let settings_menu_id = tray_manager.settings_item_id().clone();
                let exit_menu_id = tray_manager.exit_item_id().clone();

                // TrayManager and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkey_handler =
                            hotkey_id.map(|id| HotkeyHandler::new(id, command_tx.clone()));

                        let coordinator = MemoListCoordinator::new(Environment {
                            clock: Arc::new(SystemClock),
                            ids: Arc::new(RandomIds),
                            temp_dir: Arc::new(RecordingDirectory(recording_directory)),
                        });

                        let effects = EffectRunner::new(
                            command_tx.clone(),
                            DevicePermissionService,
                            SystemSettingsLauncher::new(settings_target),
                            DeviceRecorder,
                        );

                        let app = App {
                            coordinator,
                            state: MemoListState::default(),
                            effects,
                            tray_proxy,
                            command_rx,
                            shutdown_tx,
                            settings_menu_id,
                            exit_menu_id,
                            last_view: String::new(),
                            tray_state: TrayIconState::Idle,
                        };

                        let console_shutdown_rx = shutdown_rx.clone();

                        tokio::join!(
                            async {
                                let Some(handler) = hotkey_handler else {
                                    return;
                                };
                                if let Err(e) = handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            },
                            console::run(command_tx, console_shutdown_rx),
                            async {
                                if let Err(e) = app.run().await {
                                    error!(error = ?e, "App error");
                                }
                            }
                        );
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}
