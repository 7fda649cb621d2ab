use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;

use urljump_core::{
    help_popup::HelpPopup,
    i18n::{StringId, text},
    keybinds::{Action, InputMode},
    ui,
    which_key::{self, WhichKey},
};
use urljump_form::FormTool;

/// The main application state.
pub struct App {
    /// The URL form.
    form: FormTool,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Hub-level input mode (Command mode lives here, the rest in the form).
    mode: InputMode,
    /// Which-key popup state.
    which_key: WhichKey,
    /// Help popup state.
    help_popup: HelpPopup,
    /// Command-line input buffer.
    command_input: String,
    /// Command-line cursor position.
    command_cursor: usize,
    /// Feedback for an unknown command.
    command_error: Option<String>,
}

impl App {
    pub fn new(form: FormTool) -> Self {
        Self {
            form,
            should_quit: false,
            mode: InputMode::Normal,
            which_key: WhichKey::new(),
            help_popup: HelpPopup::new(),
            command_input: String::new(),
            command_cursor: 0,
            command_error: None,
        }
    }

    /// Handle a terminal event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Paste(text) => {
                if !self.which_key.visible && !self.help_popup.visible {
                    self.form.handle_paste(&text);
                }
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl-c always quits
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            self.should_quit = true;
            return;
        }
        self.command_error = None;

        if self.which_key.visible {
            self.handle_which_key_input(key);
            return;
        }

        if self.help_popup.visible {
            self.handle_help_key(key);
            return;
        }

        if self.mode == InputMode::Command {
            self.handle_command_key(key);
            return;
        }

        let action = self.form.handle_key(key);
        self.process_action(action);
    }

    /// Process an action returned by the form.
    fn process_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::LeaderKey => self.show_leader_menu(),
            Action::LeaderSequence(c) => self.run_leader_action(c),
            Action::SetMode(InputMode::Command) => {
                self.mode = InputMode::Command;
                self.command_input.clear();
                self.command_cursor = 0;
            }
            Action::SetMode(mode) => self.mode = mode,
            Action::Help => self.show_help(),
            _ => {}
        }
    }

    fn show_leader_menu(&mut self) {
        self.form.reset_key_state();
        self.which_key.show("Leader", which_key::leader_entries());
    }

    fn run_leader_action(&mut self, c: char) {
        if let Some(action) = self.form.handle_leader_action(c) {
            self.process_action(action);
        }
    }

    /// Handle input while which-key is visible.
    fn handle_which_key_input(&mut self, key: KeyEvent) {
        self.which_key.hide();
        self.form.reset_key_state();
        if let KeyCode::Char(c) = key.code {
            self.run_leader_action(c);
        }
    }

    /// Handle command-mode key events.
    fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = InputMode::Normal;
                self.command_input.clear();
                self.command_cursor = 0;
            }
            KeyCode::Enter => {
                let cmd = self.command_input.trim().to_string();
                self.mode = InputMode::Normal;
                self.command_input.clear();
                self.command_cursor = 0;
                self.execute_command(&cmd);
            }
            KeyCode::Char(c) => {
                self.command_input.insert(self.command_cursor, c);
                self.command_cursor += c.len_utf8();
            }
            KeyCode::Backspace => {
                if self.command_cursor > 0 {
                    let prev = self.command_input[..self.command_cursor]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                    self.command_input.drain(prev..self.command_cursor);
                    self.command_cursor = prev;
                } else if self.command_input.is_empty() {
                    self.mode = InputMode::Normal;
                }
            }
            KeyCode::Left => {
                if self.command_cursor > 0 {
                    self.command_cursor = self.command_input[..self.command_cursor]
                        .char_indices()
                        .next_back()
                        .map(|(i, _)| i)
                        .unwrap_or(0);
                }
            }
            KeyCode::Right => {
                if self.command_cursor < self.command_input.len() {
                    self.command_cursor = self.command_input[self.command_cursor..]
                        .char_indices()
                        .nth(1)
                        .map(|(i, _)| self.command_cursor + i)
                        .unwrap_or(self.command_input.len());
                }
            }
            _ => {}
        }
    }

    /// Execute a command-mode command.
    fn execute_command(&mut self, cmd: &str) {
        match cmd {
            "" => {}
            "q" | "quit" | "qa" | "qa!" | "q!" => self.should_quit = true,
            "open" | "o" | "start" => self.form.start(),
            "yank" | "y" => self.form.yank(),
            "help" | "h" => self.show_help(),
            other => {
                tracing::debug!(command = other, "unknown command");
                self.command_error = Some(format!("Not an editor command: {other}"));
            }
        }
    }

    fn show_help(&mut self) {
        self.form.reset_key_state();
        self.help_popup.show("Help", self.form.help_entries());
    }

    /// Handle key events while the help popup is visible.
    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
                self.help_popup.hide();
                self.form.reset_key_state();
            }
            KeyCode::Char('j') | KeyCode::Down => self.help_popup.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.help_popup.scroll_up(),
            _ => {}
        }
    }

    /// Render the entire application.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (title_area, content_area, status_area) = ui::standard_layout(area);
        let locale = self.form.locale();

        ui::render_title_bar(frame, title_area, text(locale, StringId::Title));
        self.form.render(frame, content_area);

        if self.mode == InputMode::Command {
            ui::render_command_line(frame, status_area, &self.command_input, self.command_cursor);
        } else {
            let notice = match &self.command_error {
                Some(err) => Some((ui::NoticeLevel::Error, err.as_str())),
                None => self.form.notice(),
            };
            let info = match self.form.mode() {
                InputMode::Insert => "Esc: done  Tab: next field",
                _ => "s: open  y: copy  a: add row  Space: leader  ?: help  :q quit",
            };
            ui::render_status_bar(frame, status_area, self.form.mode(), "urljump", info, notice);
        }

        // Overlays (rendered last, on top)
        self.which_key.render(frame, area);
        self.help_popup.render(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urljump_core::i18n::Locale;
    use urljump_form::dispatch::SystemDispatcher;

    fn app() -> App {
        App::new(FormTool::new(Box::new(SystemDispatcher), Locale::En))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    #[test]
    fn test_command_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        assert_eq!(app.mode, InputMode::Command);
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
    }

    #[test]
    fn test_unknown_command_reported() {
        let mut app = app();
        press(&mut app, KeyCode::Char(':'));
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
        assert!(app.command_error.is_some());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_leader_menu_and_help() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(app.which_key.visible);
        press(&mut app, KeyCode::Char('?'));
        assert!(!app.which_key.visible);
        assert!(app.help_popup.visible);
        press(&mut app, KeyCode::Esc);
        assert!(!app.help_popup.visible);
    }

    #[test]
    fn test_ctrl_c_quits_from_insert() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.form.mode(), InputMode::Insert);
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit);
    }

    #[test]
    fn test_paste_into_host() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        app.handle_event(Event::Paste("myapp://open".to_string()));
        assert_eq!(app.form.state().host(), "myapp://open");
    }
}
