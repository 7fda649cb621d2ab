use crate::ui::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A single entry in the help popup.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    /// The key or key combination (e.g., "j/k", "dd").
    pub key: String,
    /// Human-readable description (e.g., "Move down/up").
    pub description: String,
    /// Optional section header this entry belongs to.
    pub section: Option<String>,
}

impl HelpEntry {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            section: None,
        }
    }

    pub fn with_section(
        section: impl Into<String>,
        key: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            section: Some(section.into()),
        }
    }
}

/// The help popup state.
#[derive(Debug, Default)]
pub struct HelpPopup {
    /// Whether the popup is currently visible.
    pub visible: bool,
    /// Title for the help popup.
    title: String,
    /// All help entries to display.
    entries: Vec<HelpEntry>,
    /// Scroll offset for long help content.
    scroll: u16,
}

impl HelpPopup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the help popup with the given title and entries.
    pub fn show(&mut self, title: impl Into<String>, entries: Vec<HelpEntry>) {
        self.visible = true;
        self.title = title.into();
        self.entries = entries;
        self.scroll = 0;
    }

    /// Hide the help popup.
    pub fn hide(&mut self) {
        self.visible = false;
        self.entries.clear();
        self.title.clear();
        self.scroll = 0;
    }

    /// Scroll down by one line.
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Scroll up by one line.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Render the help popup centered on screen.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible || self.entries.is_empty() {
            return;
        }

        // Build lines, grouping by section
        let lines = self.build_lines();

        // Use most of the screen
        let popup_width = (area.width.saturating_sub(8)).min(60);
        let popup_height = (area.height.saturating_sub(6)).min(lines.len() as u16 + 2);

        // Center the popup
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);

        // Clamp scroll
        let max_scroll = (lines.len() as u16).saturating_sub(popup_height.saturating_sub(2));
        let scroll = self.scroll.min(max_scroll);

        let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
        frame.render_widget(paragraph, popup_area);
    }

    /// Build display lines from entries, inserting section headers.
    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut current_section: Option<&str> = None;

        for entry in &self.entries {
            // Insert section header if it changed
            if let Some(ref section) = entry.section {
                if current_section != Some(section.as_str()) {
                    if !lines.is_empty() {
                        lines.push(Line::from(""));
                    }
                    lines.push(Line::from(Span::styled(
                        format!(" {}", section),
                        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    )));
                    current_section = Some(section.as_str());
                }
            }

            let key_style = Style::default().add_modifier(Modifier::BOLD);
            let desc_style = Style::default();

            lines.push(Line::from(vec![
                Span::styled(format!("  {:>12} ", entry.key), key_style),
                Span::styled("  ", Style::default().add_modifier(Modifier::DIM)),
                Span::styled(entry.description.clone(), desc_style),
            ]));
        }

        // Footer
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Esc/q/?  close    j/k  scroll",
            Style::default().add_modifier(Modifier::DIM),
        )));

        lines
    }
}

/// Returns the keybind help entries for the URL form.
pub fn form_help_entries() -> Vec<HelpEntry> {
    vec![
        HelpEntry::with_section("Navigation", "j / k", "Next / previous field"),
        HelpEntry::with_section("Navigation", "gg / G", "First / last field"),
        HelpEntry::with_section("Navigation", "Tab / h / l", "Switch key / value column"),
        HelpEntry::with_section("Editing", "i / e / Enter", "Edit focused field"),
        HelpEntry::with_section("Editing", "Esc / Enter", "Leave Insert mode"),
        HelpEntry::with_section("Editing", "Tab (insert)", "Jump to next field"),
        HelpEntry::with_section("Params", "a / o", "Add param row"),
        HelpEntry::with_section("Params", "dd", "Clear row (removes extra blanks)"),
        HelpEntry::with_section("Actions", "s / Ctrl-o", "Open the URL"),
        HelpEntry::with_section("Actions", "y", "Copy the URL"),
        HelpEntry::with_section("Leader (Space)", "<Space>", "Open leader menu"),
        HelpEntry::with_section("Other", ":open / :yank", "Open / copy from command line"),
        HelpEntry::with_section("Other", ":q", "Quit"),
        HelpEntry::with_section("Other", "?", "This help"),
        HelpEntry::with_section("Other", "Ctrl-c", "Force quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_hide() {
        let mut popup = HelpPopup::new();
        popup.show("Help", form_help_entries());
        assert!(popup.visible);
        popup.scroll_down();
        popup.scroll_up();
        popup.scroll_up();
        assert_eq!(popup.scroll, 0);
        popup.hide();
        assert!(!popup.visible);
        assert!(popup.entries.is_empty());
    }

    #[test]
    fn test_section_headers_inserted_once() {
        let mut popup = HelpPopup::new();
        popup.show(
            "Help",
            vec![
                HelpEntry::with_section("A", "x", "one"),
                HelpEntry::with_section("A", "y", "two"),
                HelpEntry::with_section("B", "z", "three"),
            ],
        );
        let lines = popup.build_lines();
        // A header, 2 entries, blank, B header, 1 entry, blank, footer
        assert_eq!(lines.len(), 8);
    }
}
