use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input modes, modeled after vim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Default mode. Navigation and actions via keybinds.
    #[default]
    Normal,
    /// Text input mode. Entered with `i`, `e` or `Enter`. Exited with `Esc`.
    Insert,
    /// Command-line mode. Entered with `:`. Supports `:q`, `:open`, etc.
    Command,
}

impl InputMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Command => "COMMAND",
        }
    }
}

/// Actions that can result from processing a key event.
/// The form tool and the hub return these to signal what should happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No-op, the key was consumed but nothing happens.
    None,
    /// Quit the application.
    Quit,
    /// Switch to a specific input mode.
    SetMode(InputMode),
    /// Move focus down by N fields.
    MoveDown(usize),
    /// Move focus up by N fields.
    MoveUp(usize),
    /// Jump to the first field.
    GotoTop,
    /// Jump to the last field.
    GotoBottom,
    /// Switch between the key and value column.
    ToggleColumn,
    /// Confirm: edit the focused field, or start on the start button.
    Confirm,
    /// Clear the focused item (`dd`).
    Delete,
    /// Add a new row.
    Add,
    /// Begin editing the focused field.
    Edit,
    /// Generate the URL and hand it to the platform.
    Start,
    /// Copy the generated URL to the clipboard.
    Yank,
    /// Open which-key leader menu.
    LeaderKey,
    /// A leader key sequence was completed with this key.
    LeaderSequence(char),
    /// Show help.
    Help,
}

/// Pending key state for multi-key sequences like `gg` and `dd`.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    /// Whether the leader key (Space) was just pressed.
    pub leader_active: bool,
    /// Pending first key of a two-key sequence ('g' for gg, 'd' for dd).
    pub pending_key: Option<char>,
}

impl KeyState {
    pub fn reset(&mut self) {
        self.leader_active = false;
        self.pending_key = None;
    }
}

/// Process a key event in Normal mode, accounting for multi-key sequences.
pub fn process_normal_key(key: KeyEvent, state: &mut KeyState) -> Action {
    if state.leader_active {
        state.leader_active = false;
        return match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Char(c) => Action::LeaderSequence(c),
            _ => Action::None,
        };
    }

    if let Some(pending) = state.pending_key.take() {
        return match (pending, key.code) {
            ('g', KeyCode::Char('g')) => Action::GotoTop,
            ('d', KeyCode::Char('d')) => Action::Delete,
            _ => Action::None, // Invalid sequence, ignore
        };
    }

    match key.code {
        KeyCode::Char(' ') => {
            state.leader_active = true;
            Action::LeaderKey
        }
        KeyCode::Char('j') | KeyCode::Down => Action::MoveDown(1),
        KeyCode::Char('k') | KeyCode::Up => Action::MoveUp(1),
        KeyCode::Char('G') => Action::GotoBottom,
        KeyCode::Char('g') => {
            state.pending_key = Some('g');
            Action::None
        }
        KeyCode::Char('d') => {
            state.pending_key = Some('d');
            Action::None
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Char('l') => {
            Action::ToggleColumn
        }
        KeyCode::Enter => Action::Confirm,
        KeyCode::Char('o') if key.modifiers == KeyModifiers::CONTROL => Action::Start,
        KeyCode::Char('a') | KeyCode::Char('o') => Action::Add,
        KeyCode::Char('i') | KeyCode::Char('e') => Action::Edit,
        KeyCode::Char('s') => Action::Start,
        KeyCode::Char('y') => Action::Yank,
        KeyCode::Char(':') => Action::SetMode(InputMode::Command),
        KeyCode::Char('?') => Action::Help,
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_single_keys() {
        let mut state = KeyState::default();
        assert_eq!(process_normal_key(press('j'), &mut state), Action::MoveDown(1));
        assert_eq!(process_normal_key(press('k'), &mut state), Action::MoveUp(1));
        assert_eq!(process_normal_key(press('s'), &mut state), Action::Start);
        assert_eq!(process_normal_key(press('o'), &mut state), Action::Add);
    }

    #[test]
    fn test_two_key_sequences() {
        let mut state = KeyState::default();
        assert_eq!(process_normal_key(press('g'), &mut state), Action::None);
        assert_eq!(process_normal_key(press('g'), &mut state), Action::GotoTop);

        assert_eq!(process_normal_key(press('d'), &mut state), Action::None);
        assert_eq!(process_normal_key(press('d'), &mut state), Action::Delete);

        // Broken sequence is swallowed
        assert_eq!(process_normal_key(press('d'), &mut state), Action::None);
        assert_eq!(process_normal_key(press('x'), &mut state), Action::None);
        assert!(state.pending_key.is_none());
    }

    #[test]
    fn test_leader_sequence() {
        let mut state = KeyState::default();
        assert_eq!(process_normal_key(press(' '), &mut state), Action::LeaderKey);
        assert_eq!(
            process_normal_key(press('s'), &mut state),
            Action::LeaderSequence('s')
        );
        assert!(!state.leader_active);
    }
}
