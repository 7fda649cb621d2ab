pub mod dispatch;
pub mod editor;
pub mod model;
pub mod ui;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Frame, layout::Rect};

use urljump_core::help_popup::{self, HelpEntry};
use urljump_core::i18n::{Locale, StringId, text};
use urljump_core::keybinds::{Action, InputMode, KeyState, process_normal_key};
use urljump_core::ui::NoticeLevel;

use dispatch::UrlDispatcher;
use editor::{Focus, FormEditor, KvField};
use model::{EditOutcome, FormState, UrlError};

/// The URL form: host, route, param rows, and the start action.
pub struct FormTool {
    state: FormState,
    editor: FormEditor,
    mode: InputMode,
    key_state: KeyState,
    locale: Locale,
    dispatcher: Box<dyn UrlDispatcher>,
    /// System clipboard, if one is reachable.
    clipboard: Option<arboard::Clipboard>,
    /// One-shot message for the status bar, cleared on the next key.
    notice: Option<(NoticeLevel, String)>,
}

impl FormTool {
    pub fn new(dispatcher: Box<dyn UrlDispatcher>, locale: Locale) -> Self {
        Self {
            state: FormState::new(),
            editor: FormEditor::new(),
            mode: InputMode::Normal,
            key_state: KeyState::default(),
            locale,
            dispatcher,
            clipboard: arboard::Clipboard::new().ok(),
            notice: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn editor(&self) -> &FormEditor {
        &self.editor
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn notice(&self) -> Option<(NoticeLevel, &str)> {
        self.notice.as_ref().map(|(level, msg)| (*level, msg.as_str()))
    }

    /// Fill the form from startup values. Each pair lands in its own row
    /// through the regular edit operations. The non-empty field is written
    /// first so a pair like `=v` is never pruned halfway.
    pub fn prefill(&mut self, host: &str, route: &str, params: &[(String, String)]) {
        self.state.set_host(host);
        self.state.set_route(route);
        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                self.state.add_param_row();
            }
            let last = self.state.len() - 1;
            let outcome = if key.is_empty() {
                self.state.edit_param_value(last, value.as_str())
            } else {
                self.state.edit_param_key(last, key.as_str())
            };
            if outcome == EditOutcome::Kept {
                if key.is_empty() {
                    self.state.edit_param_key(last, key.as_str());
                } else {
                    self.state.edit_param_value(last, value.as_str());
                }
            }
        }
    }

    /// Generate the URL and hand it to the dispatcher.
    pub fn start(&mut self) {
        let url = match self.state.generate_url() {
            Ok(url) => url,
            Err(UrlError::MissingHost) => {
                tracing::info!("start refused: host is empty");
                self.set_notice(NoticeLevel::Error, text(self.locale, StringId::UrlInvalid));
                return;
            }
        };

        tracing::info!(url = %url, via = %self.dispatcher.describe(), "dispatching url");
        match self.dispatcher.open_url(&url) {
            Ok(()) => {
                let msg = format!("{}: {}", text(self.locale, StringId::Opened), url);
                self.set_notice(NoticeLevel::Info, msg);
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "dispatch failed");
                self.set_notice(NoticeLevel::Error, e.to_string());
            }
        }
    }

    /// Copy the generated URL to the system clipboard.
    pub fn yank(&mut self) {
        let url = match self.state.generate_url() {
            Ok(url) => url,
            Err(UrlError::MissingHost) => {
                self.set_notice(NoticeLevel::Error, text(self.locale, StringId::UrlInvalid));
                return;
            }
        };
        let result = match self.clipboard.as_mut() {
            Some(cb) => cb.set_text(url).map_err(|e| e.to_string()),
            None => Err("clipboard unavailable".to_string()),
        };
        match result {
            Ok(()) => self.set_notice(NoticeLevel::Info, text(self.locale, StringId::Copied)),
            Err(e) => {
                tracing::warn!(error = %e, "copy failed");
                self.set_notice(NoticeLevel::Error, e);
            }
        }
    }

    fn set_notice(&mut self, level: NoticeLevel, msg: impl Into<String>) {
        self.notice = Some((level, msg.into()));
    }

    /// Add a row and start typing its key. Does nothing while a blank row exists.
    fn add_row(&mut self) {
        if self.editor.add_row(&mut self.state) {
            self.enter_insert();
        }
    }

    fn enter_insert(&mut self) {
        if self.editor.start_edit(&self.state) {
            self.mode = InputMode::Insert;
        }
    }

    /// Leave Insert mode if the editor stopped editing (e.g. the row was pruned).
    fn sync_mode(&mut self) {
        if !self.editor.editing {
            self.mode = InputMode::Normal;
        }
    }

    /// Handle a key event. Returns the actions the hub has to act on.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        self.notice = None;
        match self.mode {
            InputMode::Insert => self.handle_insert_key(key),
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Command => Action::None,
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Action {
        let action = process_normal_key(key, &mut self.key_state);
        match action {
            Action::MoveDown(n) => {
                for _ in 0..n {
                    self.editor.move_down(&self.state);
                }
                Action::None
            }
            Action::MoveUp(n) => {
                for _ in 0..n {
                    self.editor.move_up(&self.state);
                }
                Action::None
            }
            Action::GotoTop => {
                self.editor.goto_top();
                Action::None
            }
            Action::GotoBottom => {
                self.editor.goto_bottom();
                Action::None
            }
            Action::ToggleColumn => {
                self.editor.toggle_column(&self.state);
                Action::None
            }
            Action::Confirm => {
                if self.editor.focus == Focus::Start {
                    self.start();
                } else {
                    self.enter_insert();
                }
                Action::None
            }
            Action::Edit => {
                self.enter_insert();
                Action::None
            }
            Action::Add => {
                self.add_row();
                Action::None
            }
            Action::Delete => {
                self.editor.clear_row(&mut self.state);
                Action::None
            }
            Action::Start => {
                self.start();
                Action::None
            }
            Action::Yank => {
                self.yank();
                Action::None
            }
            // These bubble up to the hub
            Action::Quit
            | Action::SetMode(_)
            | Action::LeaderKey
            | Action::LeaderSequence(_)
            | Action::Help => action,
            Action::None => Action::None,
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editor.stop_edit();
                self.mode = InputMode::Normal;
                return Action::SetMode(InputMode::Normal);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.editor.insert_char(&mut self.state, c);
            }
            KeyCode::Backspace => {
                self.editor.backspace(&mut self.state);
            }
            KeyCode::Delete => {
                self.editor.delete(&mut self.state);
            }
            KeyCode::Left => self.editor.cursor_left(&self.state),
            KeyCode::Right => self.editor.cursor_right(&self.state),
            KeyCode::Home => self.editor.cursor_home(),
            KeyCode::End => self.editor.cursor_end(&self.state),
            KeyCode::Tab => self.editor.next_field(&self.state),
            KeyCode::BackTab => self.editor.toggle_column(&self.state),
            _ => {}
        }
        self.sync_mode();
        Action::None
    }

    /// Bracketed paste goes into the field being edited.
    pub fn handle_paste(&mut self, pasted: &str) {
        if self.mode == InputMode::Insert {
            self.editor.insert_str(&mut self.state, pasted);
            self.sync_mode();
        }
    }

    /// Run a leader-menu entry. Returns an action for the hub, if any.
    pub fn handle_leader_action(&mut self, key: char) -> Option<Action> {
        match key {
            's' => self.start(),
            'y' => self.yank(),
            'a' => self.add_row(),
            'h' => {
                self.editor.goto_top();
                self.editor.column = KvField::Key;
            }
            'q' => return Some(Action::Quit),
            '?' => return Some(Action::Help),
            _ => {}
        }
        None
    }

    /// Reset any pending key state (leader, multi-key sequences).
    pub fn reset_key_state(&mut self) {
        self.key_state.reset();
    }

    pub fn help_entries(&self) -> Vec<HelpEntry> {
        help_popup::form_help_entries()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        ui::render_form(frame, area, &self.state, &self.editor, self.locale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchError;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every URL it is asked to open.
    struct Recorder {
        opened: Rc<RefCell<Vec<String>>>,
        fail: bool,
    }

    impl UrlDispatcher for Recorder {
        fn open_url(&self, url: &str) -> Result<(), DispatchError> {
            if self.fail {
                return Err(DispatchError::EmptyCommand);
            }
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }

        fn describe(&self) -> String {
            "recorder".to_string()
        }
    }

    fn tool(fail: bool) -> (FormTool, Rc<RefCell<Vec<String>>>) {
        let opened = Rc::new(RefCell::new(Vec::new()));
        let recorder = Recorder {
            opened: Rc::clone(&opened),
            fail,
        };
        (FormTool::new(Box::new(recorder), Locale::En), opened)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(tool: &mut FormTool, s: &str) {
        for c in s.chars() {
            tool.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_start_without_host_shows_message() {
        let (mut tool, opened) = tool(false);
        tool.handle_key(key(KeyCode::Char('s')));
        assert!(opened.borrow().is_empty());
        let (level, msg) = tool.notice().unwrap();
        assert_eq!(level, NoticeLevel::Error);
        assert_eq!(msg, text(Locale::En, StringId::UrlInvalid));
    }

    #[test]
    fn test_type_and_start() {
        let (mut tool, opened) = tool(false);
        // Host
        tool.handle_key(key(KeyCode::Char('i')));
        assert_eq!(tool.mode(), InputMode::Insert);
        type_str(&mut tool, "a.com");
        tool.handle_key(key(KeyCode::Tab));
        // Route
        type_str(&mut tool, "x");
        tool.handle_key(key(KeyCode::Tab));
        // Param key, then value
        type_str(&mut tool, "a");
        tool.handle_key(key(KeyCode::Tab));
        type_str(&mut tool, "1");
        tool.handle_key(key(KeyCode::Esc));
        assert_eq!(tool.mode(), InputMode::Normal);

        tool.handle_key(key(KeyCode::Char('G')));
        tool.handle_key(key(KeyCode::Enter));
        assert_eq!(opened.borrow().as_slice(), ["a.com/x?a=1"]);
        assert_eq!(tool.notice().unwrap().0, NoticeLevel::Info);
    }

    #[test]
    fn test_dispatch_failure_reported() {
        let (mut tool, _) = tool(true);
        tool.prefill("a.com", "", &[]);
        tool.start();
        assert_eq!(tool.notice().unwrap().0, NoticeLevel::Error);
    }

    #[test]
    fn test_add_row_only_when_no_blank() {
        let (mut tool, _) = tool(false);
        tool.handle_key(key(KeyCode::Char('a')));
        assert_eq!(tool.state().len(), 1);
        assert_eq!(tool.mode(), InputMode::Normal);

        tool.prefill("a.com", "", &[("k".to_string(), "v".to_string())]);
        tool.handle_key(key(KeyCode::Char('a')));
        assert_eq!(tool.state().len(), 2);
        assert_eq!(tool.mode(), InputMode::Insert);
        assert_eq!(tool.editor().focus, Focus::Param(1));
    }

    #[test]
    fn test_backspace_prunes_and_leaves_insert() {
        let (mut tool, _) = tool(false);
        tool.prefill("a.com", "", &[("k".to_string(), String::new())]);
        tool.handle_key(key(KeyCode::Char('a')));
        assert_eq!(tool.state().len(), 2);
        type_str(&mut tool, "z");
        tool.handle_key(key(KeyCode::Esc));

        // Empty row 0 while row 1 holds "z": kept, row 0 is the single blank
        tool.handle_key(key(KeyCode::Char('g')));
        tool.handle_key(key(KeyCode::Char('g')));
        tool.handle_key(key(KeyCode::Char('j')));
        tool.handle_key(key(KeyCode::Char('j')));
        assert_eq!(tool.editor().focus, Focus::Param(0));
        tool.handle_key(key(KeyCode::Char('i')));
        tool.handle_key(key(KeyCode::Backspace));
        assert_eq!(tool.state().len(), 2);
        tool.handle_key(key(KeyCode::Esc));

        // Empty row 1 too: now it's the redundant blank and goes away
        tool.handle_key(key(KeyCode::Char('j')));
        tool.handle_key(key(KeyCode::Char('i')));
        tool.handle_key(key(KeyCode::Backspace));
        assert_eq!(tool.state().len(), 1);
        assert_eq!(tool.mode(), InputMode::Normal);
        assert_eq!(tool.editor().focus, Focus::Param(0));
    }

    #[test]
    fn test_prefill_params() {
        let (mut tool, _) = tool(false);
        tool.prefill(
            "myapp://open",
            "detail",
            &[
                ("id".to_string(), "7".to_string()),
                ("tab".to_string(), "info".to_string()),
            ],
        );
        assert_eq!(
            tool.state().generate_url().unwrap(),
            "myapp://open/detail?id=7&tab=info"
        );
    }

    #[test]
    fn test_prefill_value_without_key() {
        let (mut single, _) = tool(false);
        single.prefill("a.com", "", &[(String::new(), "v".to_string())]);
        assert_eq!(single.state().generate_url().unwrap(), "a.com?=v");

        let (mut pair, _) = tool(false);
        pair.prefill(
            "a.com",
            "",
            &[
                (String::new(), String::new()),
                (String::new(), "v".to_string()),
            ],
        );
        assert_eq!(pair.state().len(), 2);
        assert_eq!(pair.state().generate_url().unwrap(), "a.com?=&=v");
    }

    #[test]
    fn test_hub_actions_bubble_up() {
        let (mut tool, _) = tool(false);
        assert_eq!(tool.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(tool.handle_key(key(KeyCode::Char('?'))), Action::Help);
        assert_eq!(
            tool.handle_key(key(KeyCode::Char(':'))),
            Action::SetMode(InputMode::Command)
        );
    }

    #[test]
    fn test_leader_actions() {
        let (mut tool, opened) = tool(false);
        tool.prefill("a.com", "", &[]);
        assert_eq!(tool.handle_leader_action('s'), None);
        assert_eq!(opened.borrow().as_slice(), ["a.com?="]);
        assert_eq!(tool.handle_leader_action('q'), Some(Action::Quit));
    }
}
