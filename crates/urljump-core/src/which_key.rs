use crate::ui::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A single entry in the which-key menu.
#[derive(Debug, Clone)]
pub struct WhichKeyEntry {
    /// The key to press (e.g., "s", "y").
    pub key: String,
    /// Human-readable description (e.g., "Open URL").
    pub description: String,
}

impl WhichKeyEntry {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
        }
    }
}

/// The which-key popup state.
#[derive(Debug, Default)]
pub struct WhichKey {
    /// Whether the popup is currently visible.
    pub visible: bool,
    /// Current entries to display.
    pub entries: Vec<WhichKeyEntry>,
    /// Popup title.
    pub title: String,
}

impl WhichKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the which-key popup with the given entries.
    pub fn show(&mut self, title: impl Into<String>, entries: Vec<WhichKeyEntry>) {
        self.visible = true;
        self.title = title.into();
        self.entries = entries;
    }

    /// Hide the which-key popup.
    pub fn hide(&mut self) {
        self.visible = false;
        self.entries.clear();
        self.title.clear();
    }

    /// Render the which-key popup centered on screen.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible || self.entries.is_empty() {
            return;
        }

        // Calculate popup size
        let max_key_len = self.entries.iter().map(|e| e.key.len()).max().unwrap_or(1);
        let max_desc_len = self
            .entries
            .iter()
            .map(|e| e.description.len())
            .max()
            .unwrap_or(10);
        let popup_width = (max_key_len + max_desc_len + 8).min(60) as u16;
        let popup_height = (self.entries.len() as u16 + 2).min(area.height.saturating_sub(4));

        // Center the popup
        let popup_area = centered_rect(popup_width, popup_height, area);

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        // Build lines
        let lines: Vec<Line> = self
            .entries
            .iter()
            .map(|entry| {
                Line::from(vec![
                    Span::styled(
                        format!("  {} ", entry.key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("-> ", Style::default().add_modifier(Modifier::DIM)),
                    Span::raw(entry.description.clone()),
                ])
            })
            .collect();

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL);

        let paragraph = Paragraph::new(lines).block(block);
        frame.render_widget(paragraph, popup_area);
    }
}

/// Returns the leader menu entries for the URL form.
pub fn leader_entries() -> Vec<WhichKeyEntry> {
    vec![
        WhichKeyEntry::new("s", "Open URL"),
        WhichKeyEntry::new("y", "Copy URL"),
        WhichKeyEntry::new("a", "Add param row"),
        WhichKeyEntry::new("h", "Go to host"),
        WhichKeyEntry::new("?", "Help"),
        WhichKeyEntry::new("q", "Quit"),
    ]
}
