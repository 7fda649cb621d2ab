use crate::keybinds::InputMode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

/// Render the centered title line at the top of the screen.
pub fn render_title_bar(frame: &mut Frame, area: Rect, title: &str) {
    let line = Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

/// Severity of a message shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Render the bottom status bar showing the current mode and optional info.
/// A notice, when present, replaces the info text.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    mode: InputMode,
    name: &str,
    info: &str,
    notice: Option<(NoticeLevel, &str)>,
) {
    let mode_style = Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);

    let mut spans = vec![
        Span::styled(format!(" {} ", mode.label()), mode_style),
        Span::raw(" "),
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
    ];
    match notice {
        Some((NoticeLevel::Error, text)) => spans.push(Span::styled(
            text,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Some((NoticeLevel::Info, text)) => {
            spans.push(Span::styled(text, Style::default().fg(Color::Green)))
        }
        None => spans.push(Span::styled(info, Style::default().add_modifier(Modifier::DIM))),
    }

    let bar = Paragraph::new(Line::from(spans));
    frame.render_widget(bar, area);
}

/// Render the command-line input at the bottom of the screen.
pub fn render_command_line(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let line = Line::from(vec![
        Span::styled(":", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(input),
    ]);

    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);

    let x = area
        .x
        .saturating_add(1)
        .saturating_add(command_cursor_offset(input, cursor));
    if x < area.right() {
        frame.set_cursor_position((x, area.y));
    }
}

/// Display columns before the byte offset `cursor`.
fn command_cursor_offset(input: &str, cursor: usize) -> u16 {
    let width = input.get(..cursor).unwrap_or(input).width();
    u16::try_from(width).unwrap_or(u16::MAX)
}

/// Standard layout: title bar (1 line) + main content + status bar (1 line).
/// Returns (title_area, content_area, status_area).
pub fn standard_layout(area: Rect) -> (Rect, Rect, Rect) {
    let [title_area, content_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    (title_area, content_area, status_area)
}

/// Create a bordered block, blue when focused and dim otherwise.
pub fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused {
        Color::Blue
    } else {
        Color::DarkGray
    };
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Center a `width` x `height` rect within `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_cursor_counts_columns() {
        assert_eq!(command_cursor_offset("open", 2), 2);
        // "é" is two bytes, one column; "打" is three bytes, two columns
        assert_eq!(command_cursor_offset("é", 2), 1);
        assert_eq!(command_cursor_offset("打开", 6), 4);
        assert_eq!(command_cursor_offset("打开", 3), 2);
    }
}
