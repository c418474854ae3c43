//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::models::{ApplicationPhase, BackdropOption};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Path entry (upload screen)
    PathChar(char),
    PathBackspace,
    /// Submit the typed path
    SelectFile,
    /// A path dragged onto the terminal
    DropFile(String),

    // Result screen
    PickBackdrop(BackdropOption),
    /// Activate Custom with the recorded custom color
    PickCustomBackdrop,
    StartColorEdit,
    ColorChar(char),
    ColorBackspace,
    StopColorEdit,
    Download,

    /// New image / try again
    Reset,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    phase: ApplicationPhase,
    editing_color: bool,
    show_help: bool,
) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if key.code == KeyCode::F(1) {
        return Some(UiEvent::ToggleHelp);
    }

    match phase {
        // The upload screen is always taking a path, so letters are input
        ApplicationPhase::Idle => match key.code {
            KeyCode::Esc => Some(UiEvent::Quit),
            KeyCode::Enter => Some(UiEvent::SelectFile),
            KeyCode::Backspace => Some(UiEvent::PathBackspace),
            KeyCode::Char(c) => Some(UiEvent::PathChar(c)),
            _ => None,
        },
        ApplicationPhase::Processing => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            _ => None,
        },
        ApplicationPhase::ResultReady if editing_color => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopColorEdit),
            KeyCode::Backspace => Some(UiEvent::ColorBackspace),
            KeyCode::Char(c) => Some(UiEvent::ColorChar(c)),
            _ => None,
        },
        ApplicationPhase::ResultReady => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                Some(UiEvent::PickBackdrop(BackdropOption::PRESETS[index]))
            }
            KeyCode::Char('6') => Some(UiEvent::PickCustomBackdrop),
            KeyCode::Char('c') => Some(UiEvent::StartColorEdit),
            KeyCode::Char('d') | KeyCode::Enter => Some(UiEvent::Download),
            KeyCode::Char('n') => Some(UiEvent::Reset),
            _ => None,
        },
        ApplicationPhase::Error => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('r') | KeyCode::Char('n') | KeyCode::Enter => Some(UiEvent::Reset),
            _ => None,
        },
    }
}

/// Turn pasted text into a path. Terminals deliver a dragged file as its
/// path, sometimes quoted, shell-escaped or as a `file://` URL.
pub fn parse_dropped_path(text: &str) -> Option<String> {
    let text = text.trim();
    let first = text.lines().next()?.trim();

    let unquoted = if first.len() >= 2
        && ((first.starts_with('\'') && first.ends_with('\''))
            || (first.starts_with('"') && first.ends_with('"')))
    {
        first[1..first.len() - 1].to_string()
    } else if cfg!(windows) {
        first.to_string()
    } else {
        unescape_shell(first)
    };

    let path = if unquoted.starts_with("file://") {
        file_url_to_path(&unquoted)?
    } else {
        unquoted
    };

    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}

fn unescape_shell(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// `file:///tmp/a%20b.png` or `file://localhost/tmp/a%20b.png` to a local path
fn file_url_to_path(text: &str) -> Option<String> {
    let path = reqwest::Url::parse(text).ok()?.to_file_path().ok()?;
    Some(path.to_string_lossy().into_owned())
}
