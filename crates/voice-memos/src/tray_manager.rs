//! System tray icon with state-based updates.
//!
//! Shows whether the app is idle, recording, or playing, and offers a context
//! menu for opening the microphone settings and exiting.

use crate::{AppError, AppResult, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{error, info, instrument};
use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{Menu, MenuId, MenuItem},
};

/// Edge length of the generated icons, in pixels.
const ICON_SIZE: u32 = 32;

/// Requests from the runtime thread to the tray, which lives on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayRequest {
    /// Show this activity on the icon and tooltip.
    Show(TrayIconState),
    /// Leave the event loop.
    Quit,
}

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    settings_item_id: MenuId,
    exit_item_id: MenuId,
}

impl TrayManager {
    /// Create a new tray manager in the idle state.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let settings_item = MenuItem::new("Open Settings", true, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let settings_item_id = settings_item.id().clone();
        let exit_item_id = exit_item.id().clone();

        menu.append(&settings_item)
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to add settings menu: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        menu.append(&exit_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(tooltip(TrayIconState::Idle))
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(TrayIconState::Idle)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            settings_item_id,
            exit_item_id,
        })
    }

    /// Apply a request from the runtime. Returns `true` once the event loop
    /// should exit.
    pub fn handle(&mut self, request: TrayRequest) -> bool {
        match request {
            TrayRequest::Show(state) => {
                if let Err(e) = self.update_state(state) {
                    error!(error = ?e, "Failed to update tray icon");
                }
                false
            }
            TrayRequest::Quit => true,
        }
    }

    /// Update the tray icon and tooltip.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        self.tray_icon
            .set_icon(Some(Self::load_icon(state)?))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(tooltip(state)))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        Icon::from_rgba(icon_pixels(state), ICON_SIZE, ICON_SIZE).map_err(|e| {
            AppError::TrayError {
                reason: format!("Failed to create icon from RGBA: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Get the settings menu item ID.
    pub fn settings_item_id(&self) -> &MenuId {
        &self.settings_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}

pub(crate) fn tooltip(state: TrayIconState) -> &'static str {
    match state {
        TrayIconState::Idle => "Voice Memos - Ready",
        TrayIconState::Recording => "Voice Memos - Recording...",
        TrayIconState::Playing => "Voice Memos - Playing...",
    }
}

/// A filled circle on a transparent square, coloured per state.
pub(crate) fn icon_pixels(state: TrayIconState) -> Vec<u8> {
    let [r, g, b] = match state {
        TrayIconState::Idle => [0x9e, 0x9e, 0x9e],
        TrayIconState::Recording => [0xe5, 0x39, 0x35],
        TrayIconState::Playing => [0x43, 0xa0, 0x47],
    };

    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    let mut pixels = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let alpha = if dx * dx + dy * dy <= radius * radius {
                0xff
            } else {
                0x00
            };
            pixels.extend_from_slice(&[r, g, b, alpha]);
        }
    }
    pixels
}
