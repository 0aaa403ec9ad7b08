//! Keybinding definitions

use crossterm::event::KeyCode;

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Start editing the source record
    EditSource,
    /// Select the next style
    NextStyle,
    /// Select the previous style
    PrevStyle,
    /// Select a style by position (0-based)
    PickStyle(usize),
    /// Generate the reference
    Generate,
    /// Open the in-text dialog
    OpenInText,
    /// Copy the output
    Copy,
    /// Toggle help
    ToggleHelp,
    /// Dismiss help / clear status
    Cancel,
}

/// Get the action for a key in normal mode
pub fn normal_mode_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('i') | KeyCode::Char('e') => Some(Action::EditSource),
        KeyCode::Tab | KeyCode::Char('s') => Some(Action::NextStyle),
        KeyCode::BackTab | KeyCode::Char('S') => Some(Action::PrevStyle),
        KeyCode::Char(c @ '1'..='6') => Some(Action::PickStyle(c as usize - '1' as usize)),
        KeyCode::Char('g') | KeyCode::Enter => Some(Action::Generate),
        KeyCode::Char('t') => Some(Action::OpenInText),
        KeyCode::Char('y') | KeyCode::Char('c') => Some(Action::Copy),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}
