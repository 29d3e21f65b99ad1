//! Line-oriented command surface and list rendering.
//!
//! Memos are addressed by their 1-based position in the rendered list.

use crate::AppCommand;

use std::fmt::Write as _;

use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::{mpsc, watch},
};
use tracing::{debug, info, instrument};
use voice_memos_core::{
    MemoAction, MemoListAction, MemoListState, PermissionStatus, RecordingAction, RecordingMode,
};

/// Usage text printed for `help` and unparseable input.
pub const USAGE: &str = "\
commands:
  record                 start recording
  stop                   stop recording
  play <n>               play or stop memo n
  title <n> <text>       rename memo n
  delete <n> [<n>...]    delete memos
  move <from> <to>       move memo to position
  settings               open microphone settings
  dismiss                dismiss the alert
  list                   show memos
  quit                   exit";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Start recording.
    Record,
    /// Stop the live recording.
    Stop,
    /// Toggle playback of a memo (1-based).
    Play(usize),
    /// Rename a memo (1-based).
    Title(usize, String),
    /// Delete memos (1-based).
    Delete(Vec<usize>),
    /// Move a memo to a position (both 1-based).
    Move(usize, usize),
    /// Open system settings.
    Settings,
    /// Dismiss the alert.
    Dismiss,
    /// Re-render the list.
    List,
    /// Print usage.
    Help,
    /// Exit.
    Quit,
}

/// What the application does with a resolved command.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Apply an action to the memo list.
    Dispatch(MemoListAction),
    /// Print text without touching state.
    Print(String),
    /// Shut down.
    Quit,
}

/// Parse one input line. `None` for blank lines.
pub fn parse(line: &str) -> Option<Result<ConsoleCommand, String>> {
    let mut words = line.split_whitespace();
    let verb = words.next()?;

    let position = |word: Option<&str>| -> Result<usize, String> {
        let word = word.ok_or_else(|| format!("`{}` needs a memo number", verb))?;
        match word.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("`{}` is not a memo number", word)),
        }
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "record" | "r" => Ok(ConsoleCommand::Record),
        "stop" | "s" => Ok(ConsoleCommand::Stop),
        "play" | "p" => position(words.next()).map(ConsoleCommand::Play),
        "title" | "t" => position(words.next())
            .map(|n| ConsoleCommand::Title(n, words.collect::<Vec<_>>().join(" "))),
        "delete" | "d" => {
            let first = position(words.next());
            first.and_then(|n| {
                std::iter::once(Ok(n))
                    .chain(words.map(|word| position(Some(word))))
                    .collect::<Result<Vec<_>, _>>()
                    .map(ConsoleCommand::Delete)
            })
        }
        "move" | "m" => position(words.next())
            .and_then(|from| position(words.next()).map(|to| ConsoleCommand::Move(from, to))),
        "settings" => Ok(ConsoleCommand::Settings),
        "dismiss" => Ok(ConsoleCommand::Dismiss),
        "list" | "ls" => Ok(ConsoleCommand::List),
        "help" | "?" => Ok(ConsoleCommand::Help),
        "quit" | "exit" | "q" => Ok(ConsoleCommand::Quit),
        other => Err(format!("unknown command `{}`", other)),
    };

    Some(command)
}

/// Turn a command into an action against the current list.
pub fn resolve(state: &MemoListState, command: ConsoleCommand) -> Resolution {
    let memo_at = |n: usize| {
        n.checked_sub(1)
            .and_then(|offset| state.memos.at(offset))
            .map(|memo| memo.id)
            .ok_or_else(|| Resolution::Print(format!("no memo {}", n)))
    };

    match command {
        ConsoleCommand::Record => Resolution::Dispatch(MemoListAction::RecordButtonPressed),
        ConsoleCommand::Stop => {
            if state.is_recording() {
                Resolution::Dispatch(MemoListAction::Recording(RecordingAction::StopButtonTapped))
            } else {
                Resolution::Print("not recording".to_string())
            }
        }
        ConsoleCommand::Play(n) => match memo_at(n) {
            Ok(id) => Resolution::Dispatch(MemoListAction::Memo {
                id,
                action: MemoAction::PlayButtonTapped,
            }),
            Err(print) => print,
        },
        ConsoleCommand::Title(n, title) => match memo_at(n) {
            Ok(id) => Resolution::Dispatch(MemoListAction::Memo {
                id,
                action: MemoAction::TitleChanged(title),
            }),
            Err(print) => print,
        },
        ConsoleCommand::Delete(positions) => Resolution::Dispatch(MemoListAction::MemosDeleted {
            offsets: positions.into_iter().filter_map(|n| n.checked_sub(1)).collect(),
        }),
        ConsoleCommand::Move(from, to) => {
            let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
                return Resolution::Print("memo numbers start at 1".to_string());
            };
            // Positions name the slot the memo should end up in; list moves
            // take the destination before removal.
            let destination = if to > from { to + 1 } else { to };
            Resolution::Dispatch(MemoListAction::MemosMoved {
                offsets: vec![from],
                destination,
            })
        }
        ConsoleCommand::Settings => Resolution::Dispatch(MemoListAction::OpenSettingsRequested),
        ConsoleCommand::Dismiss => Resolution::Dispatch(MemoListAction::AlertDismissed),
        ConsoleCommand::List => Resolution::Print(render(state)),
        ConsoleCommand::Help => Resolution::Print(USAGE.to_string()),
        ConsoleCommand::Quit => Resolution::Quit,
    }
}

/// Render the memo list.
///
/// Progress and elapsed time are left out so the view only changes on
/// state a user acts on.
pub fn render(state: &MemoListState) -> String {
    let mut out = String::new();

    if let Some(alert) = state.alert {
        let _ = writeln!(out, "! {}  (dismiss to clear)", alert);
    }

    match &state.active_recording {
        Some(session) if session.mode == RecordingMode::Recording => {
            let _ = writeln!(out, "● recording…  (stop to finish)");
        }
        Some(_) => {
            let _ = writeln!(out, "● saving recording…");
        }
        None if state.permission == PermissionStatus::Denied => {
            let _ = writeln!(out, "microphone access denied (settings to change)");
        }
        None => {}
    }

    if state.memos.is_empty() {
        let _ = writeln!(out, "no memos yet (record to start)");
    }

    for (index, memo) in state.memos.iter().enumerate() {
        let marker = if memo.mode.is_playing() { "▶" } else { " " };
        let total = memo.duration.as_secs();
        let _ = writeln!(
            out,
            "{} {:>2}. {}  {}:{:02}",
            marker,
            index + 1,
            memo.display_title(),
            total / 60,
            total % 60
        );
    }

    out
}

/// Read commands from stdin until EOF, `quit`, or shutdown.
#[instrument(skip_all)]
pub async fn run(command_tx: mpsc::Sender<AppCommand>, mut shutdown_rx: watch::Receiver<bool>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", USAGE);

    loop {
        tokio::select! {
            _ = shutdown_rx.changed() => {
                debug!("Console shutting down");
                break;
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Console input closed");
                        break;
                    }
                    Err(e) => {
                        info!(error = ?e, "Console input failed");
                        break;
                    }
                };

                match parse(&line) {
                    None => continue,
                    Some(Err(message)) => println!("{}\n{}", message, USAGE),
                    Some(Ok(command)) => {
                        if command_tx.send(AppCommand::Console(command)).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    }
}
