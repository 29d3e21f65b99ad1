mod action;
mod alert;
mod effect;
mod reducer;
mod state;

pub use {
    action::MemoListAction,
    alert::Alert,
    effect::Effect,
    reducer::{AUDIO_FILE_EXTENSION, MemoListCoordinator},
    state::{MemoListState, PermissionStatus},
};
