//! Input handling for the listing table.
//!
//! Key events map to [`Command`]s depending on the input mode: Normal
//! navigation and sorting, Filter text entry, and the Help overlay.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::table::{MODIFIED_COLUMN, NAME_COLUMN, SIZE_COLUMN};

/// The current input mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Browsing and sorting the table.
    #[default]
    Normal,
    /// Typing a name filter.
    Filter,
    /// Help overlay showing all keyboard shortcuts.
    Help,
}

/// Commands that can be issued by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move selection up.
    MoveUp,
    /// Move selection down.
    MoveDown,
    PageUp,
    PageDown,
    GotoTop,
    GotoBottom,
    /// Open the selected directory (or the parent row).
    Enter,
    /// Go to the parent directory.
    Back,
    /// Sort by a column, as a click on its header would.
    Sort(usize),
    /// Enter filter mode.
    StartFilter,
    /// Add a character to the filter.
    FilterInput(char),
    /// Remove the last character from the filter.
    FilterBackspace,
    /// Leave filter mode, keeping the filter.
    ConfirmFilter,
    /// Leave filter mode and clear the filter.
    ExitFilter,
    ShowHelp,
    HideHelp,
    Quit,
    /// Key was not recognized or not applicable.
    Noop,
}

/// Handle a key event and return the corresponding command.
pub fn handle_key(key: KeyEvent, mode: InputMode) -> Command {
    match mode {
        InputMode::Normal => handle_normal_mode(key),
        InputMode::Filter => handle_filter_mode(key),
        InputMode::Help => Command::HideHelp,
    }
}

fn handle_normal_mode(key: KeyEvent) -> Command {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Command::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Command::MoveUp,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::PageUp,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::PageDown,
        KeyCode::Char('g') | KeyCode::Home => Command::GotoTop,
        KeyCode::Char('G') | KeyCode::End => Command::GotoBottom,

        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Command::Enter,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Command::Back,

        // Column headers: digits address columns directly, letters name them
        KeyCode::Char(c @ '0'..='9') => Command::Sort(c as usize - '0' as usize),
        KeyCode::Char('n') => Command::Sort(NAME_COLUMN),
        KeyCode::Char('s') => Command::Sort(SIZE_COLUMN),
        KeyCode::Char('m') => Command::Sort(MODIFIED_COLUMN),

        KeyCode::Char('/') => Command::StartFilter,
        KeyCode::Esc => Command::ExitFilter,
        KeyCode::Char('?') => Command::ShowHelp,
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Command::Quit,

        _ => Command::Noop,
    }
}

fn handle_filter_mode(key: KeyEvent) -> Command {
    match key.code {
        KeyCode::Esc => Command::ExitFilter,
        KeyCode::Enter => Command::ConfirmFilter,
        KeyCode::Backspace => Command::FilterBackspace,
        KeyCode::Down => Command::MoveDown,
        KeyCode::Up => Command::MoveUp,
        KeyCode::Char(c) => Command::FilterInput(c),
        _ => Command::Noop,
    }
}
