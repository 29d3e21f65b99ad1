use crate::console::ConsoleCommand;

use voice_memos_core::MemoListAction;

/// Commands delivered to the application event loop.
///
/// Every producer (console, hotkey, effect runners) shares one queue, so
/// actions reach the coordinator strictly in arrival order.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Apply an action to the memo list.
    Dispatch(MemoListAction),
    /// Start recording, or stop the live recording.
    ToggleRecording,
    /// A parsed console command, resolved against the current list.
    Console(ConsoleCommand),
    /// Request application shutdown.
    Shutdown,
}
