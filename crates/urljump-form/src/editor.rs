use crate::model::{EditOutcome, FormState};

// ── Focus ────────────────────────────────────────────────────────────

/// Which field of the form has focus, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Host,
    Route,
    /// A parameter row, by index.
    Param(usize),
    /// The start button.
    Start,
}

/// Which column of a parameter row is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KvField {
    Key,
    Value,
}

impl KvField {
    fn other(self) -> Self {
        match self {
            KvField::Key => KvField::Value,
            KvField::Value => KvField::Key,
        }
    }
}

// ── Editor ───────────────────────────────────────────────────────────

/// Focus, column and cursor over a `FormState`.
///
/// Every keystroke writes the full new text back through the `FormState`
/// setters, so row pruning runs on each edit.
#[derive(Debug, Clone)]
pub struct FormEditor {
    pub focus: Focus,
    pub column: KvField,
    /// Whether the focused field is being edited (Insert mode).
    pub editing: bool,
    /// Byte offset into the edited field.
    pub cursor: usize,
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    pub fn new() -> Self {
        Self {
            focus: Focus::Host,
            column: KvField::Key,
            editing: false,
            cursor: 0,
        }
    }

    /// Text of the focused field, or None on the start button.
    pub fn current_text<'a>(&self, state: &'a FormState) -> Option<&'a str> {
        match self.focus {
            Focus::Host => Some(state.host()),
            Focus::Route => Some(state.route()),
            Focus::Param(i) => state.param(i).map(|row| match self.column {
                KvField::Key => row.key.as_str(),
                KvField::Value => row.value.as_str(),
            }),
            Focus::Start => None,
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn move_down(&mut self, state: &FormState) {
        self.focus = match self.focus {
            Focus::Host => Focus::Route,
            Focus::Route if state.is_empty() => Focus::Start,
            Focus::Route => Focus::Param(0),
            Focus::Param(i) if i + 1 < state.len() => Focus::Param(i + 1),
            Focus::Param(_) | Focus::Start => Focus::Start,
        };
    }

    pub fn move_up(&mut self, state: &FormState) {
        self.focus = match self.focus {
            Focus::Host | Focus::Route => Focus::Host,
            Focus::Param(0) => Focus::Route,
            Focus::Param(i) => Focus::Param(i - 1),
            Focus::Start if state.is_empty() => Focus::Route,
            Focus::Start => Focus::Param(state.len() - 1),
        };
    }

    pub fn goto_top(&mut self) {
        self.focus = Focus::Host;
    }

    pub fn goto_bottom(&mut self) {
        self.focus = Focus::Start;
    }

    pub fn focus_row(&mut self, index: usize, column: KvField) {
        self.focus = Focus::Param(index);
        self.column = column;
    }

    pub fn toggle_column(&mut self, state: &FormState) {
        self.column = self.column.other();
        if self.editing {
            self.cursor = self.current_text(state).map(str::len).unwrap_or(0);
        }
    }

    /// Keep focus on an existing row after rows were removed.
    pub fn clamp(&mut self, state: &FormState) {
        if let Focus::Param(i) = self.focus {
            if state.is_empty() {
                self.focus = Focus::Route;
            } else if i >= state.len() {
                self.focus = Focus::Param(state.len() - 1);
            }
        }
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Start editing the focused field. Returns false on the start button.
    pub fn start_edit(&mut self, state: &FormState) -> bool {
        match self.current_text(state) {
            Some(text) => {
                self.cursor = text.len();
                self.editing = true;
                true
            }
            None => false,
        }
    }

    pub fn stop_edit(&mut self) {
        self.editing = false;
    }

    /// Write `text` into the focused field. Returns the edit outcome for rows.
    fn write(&mut self, state: &mut FormState, text: String) -> EditOutcome {
        let outcome = match self.focus {
            Focus::Host => {
                state.set_host(text);
                EditOutcome::Kept
            }
            Focus::Route => {
                state.set_route(text);
                EditOutcome::Kept
            }
            Focus::Param(i) => match self.column {
                KvField::Key => state.edit_param_key(i, text),
                KvField::Value => state.edit_param_value(i, text),
            },
            Focus::Start => EditOutcome::Kept,
        };
        if outcome == EditOutcome::Removed {
            self.editing = false;
            self.cursor = 0;
            self.clamp(state);
        }
        outcome
    }

    pub fn insert_char(&mut self, state: &mut FormState, c: char) {
        let Some(current) = self.current_text(state) else {
            return;
        };
        let mut text = current.to_string();
        let at = self.cursor.min(text.len());
        text.insert(at, c);
        self.cursor = at + c.len_utf8();
        self.write(state, text);
    }

    /// Insert pasted text at the cursor. Newlines are dropped.
    pub fn insert_str(&mut self, state: &mut FormState, pasted: &str) {
        let Some(current) = self.current_text(state) else {
            return;
        };
        let clean: String = pasted.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if clean.is_empty() {
            return;
        }
        let mut text = current.to_string();
        let at = self.cursor.min(text.len());
        text.insert_str(at, &clean);
        self.cursor = at + clean.len();
        self.write(state, text);
    }

    pub fn backspace(&mut self, state: &mut FormState) -> EditOutcome {
        let Some(current) = self.current_text(state) else {
            return EditOutcome::Kept;
        };
        if self.cursor == 0 {
            return EditOutcome::Kept;
        }
        let prev = current[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut text = current.to_string();
        text.drain(prev..self.cursor);
        self.cursor = prev;
        self.write(state, text)
    }

    pub fn delete(&mut self, state: &mut FormState) -> EditOutcome {
        let Some(current) = self.current_text(state) else {
            return EditOutcome::Kept;
        };
        if self.cursor >= current.len() {
            return EditOutcome::Kept;
        }
        let mut text = current.to_string();
        text.remove(self.cursor);
        self.write(state, text)
    }

    pub fn cursor_left(&mut self, state: &FormState) {
        if let Some(text) = self.current_text(state) {
            if self.cursor > 0 {
                self.cursor = text[..self.cursor]
                    .char_indices()
                    .next_back()
                    .map(|(i, _)| i)
                    .unwrap_or(0);
            }
        }
    }

    pub fn cursor_right(&mut self, state: &FormState) {
        if let Some(text) = self.current_text(state) {
            if self.cursor < text.len() {
                let next = text[self.cursor..]
                    .chars()
                    .next()
                    .map(|c| c.len_utf8())
                    .unwrap_or(0);
                self.cursor += next;
            }
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self, state: &FormState) {
        self.cursor = self.current_text(state).map(str::len).unwrap_or(0);
    }

    /// Tab in Insert mode: key to value, then on to the next field.
    /// Editing ends when focus lands on the start button.
    pub fn next_field(&mut self, state: &FormState) {
        match (self.focus, self.column) {
            (Focus::Param(_), KvField::Key) => self.column = KvField::Value,
            (Focus::Param(_), KvField::Value) => {
                self.column = KvField::Key;
                self.move_down(state);
            }
            _ => {
                self.column = KvField::Key;
                self.move_down(state);
            }
        }
        if !self.editing || !self.start_edit(state) {
            self.editing = false;
        }
    }

    // ── Rows ─────────────────────────────────────────────────────────

    /// Append a row if the form allows it and focus its key. Returns whether a row was added.
    pub fn add_row(&mut self, state: &mut FormState) -> bool {
        if !state.can_add_row() {
            return false;
        }
        state.add_param_row();
        self.focus_row(state.len() - 1, KvField::Key);
        true
    }

    /// Clear both fields of the focused row through the edit operations,
    /// so a redundant blank row disappears.
    pub fn clear_row(&mut self, state: &mut FormState) -> EditOutcome {
        let Focus::Param(i) = self.focus else {
            return EditOutcome::Kept;
        };
        self.editing = false;
        self.cursor = 0;
        let mut outcome = state.edit_param_key(i, "");
        if outcome == EditOutcome::Kept {
            outcome = state.edit_param_value(i, "");
        }
        self.clamp(state);
        outcome
    }
}
