use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use unicode_width::UnicodeWidthStr;

use urljump_core::i18n::{Locale, StringId, text};
use urljump_core::ui::field_block;

use crate::editor::{Focus, FormEditor, KvField};
use crate::model::FormState;

const SELECTED_BG: Color = Color::Rgb(40, 40, 60);
const PLACEHOLDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Width of the key column as a share of the row (the value column gets the rest).
const KEY_COLUMN_RATIO: u16 = 3;

// ── Main entry point ─────────────────────────────────────────────────

/// Render the whole form: host, route, params table, URL preview and start button.
pub fn render_form(
    frame: &mut Frame,
    area: Rect,
    state: &FormState,
    editor: &FormEditor,
    locale: Locale,
) {
    let table_height = params_table_height(state.len());
    let [host_area, route_area, params_area, preview_area, start_area, _] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Max(table_height),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_text_input(
        frame,
        host_area,
        text(locale, StringId::HostLabel),
        text(locale, StringId::HostPlaceholder),
        state.host(),
        editor,
        editor.focus == Focus::Host,
    );
    render_text_input(
        frame,
        route_area,
        text(locale, StringId::RouteLabel),
        text(locale, StringId::RoutePlaceholder),
        state.route(),
        editor,
        editor.focus == Focus::Route,
    );
    render_params_table(frame, params_area, state, editor, locale);
    render_preview(frame, preview_area, state, locale);
    render_start_button(frame, start_area, editor.focus == Focus::Start, locale);
}

// ── Text inputs ──────────────────────────────────────────────────────

fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    placeholder: &str,
    value: &str,
    editor: &FormEditor,
    focused: bool,
) {
    let block = field_block(label, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let line = if value.is_empty() {
        Line::from(Span::styled(placeholder, PLACEHOLDER_STYLE))
    } else {
        Line::from(value)
    };
    frame.render_widget(Paragraph::new(line), inner);

    if focused && editor.editing {
        place_cursor(frame, inner, value, editor.cursor);
    }
}

fn place_cursor(frame: &mut Frame, area: Rect, value: &str, cursor: usize) {
    let cursor = cursor.min(value.len());
    let offset = value[..cursor].width() as u16;
    let x = area.x + offset;
    if x < area.x + area.width {
        frame.set_cursor_position((x, area.y));
    }
}

// ── Params table ─────────────────────────────────────────────────────

/// Header line + rows + add line + borders.
fn params_table_height(rows: usize) -> u16 {
    u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(4)
}

fn render_params_table(
    frame: &mut Frame,
    area: Rect,
    state: &FormState,
    editor: &FormEditor,
    locale: Locale,
) {
    let focused_row = match editor.focus {
        Focus::Param(i) => Some(i),
        _ => None,
    };
    let block = field_block(text(locale, StringId::ParamsLabel), focused_row.is_some());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 6 {
        return;
    }

    let key_width = inner.width / KEY_COLUMN_RATIO;
    let value_x = inner.x + key_width + 1;
    let value_width = inner.width.saturating_sub(key_width + 1);

    // Column header
    let header = Line::from(vec![
        Span::styled(
            pad(text(locale, StringId::Key), key_width),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled("\u{2502}", PLACEHOLDER_STYLE),
        Span::styled(
            text(locale, StringId::Value),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), Rect { height: 1, ..inner });

    // One line is reserved for the add affordance
    let rows_height = inner.height.saturating_sub(2) as usize;
    let scroll = match focused_row {
        Some(sel) if sel >= rows_height => sel + 1 - rows_height,
        _ => 0,
    };

    let mut y = inner.y + 1;
    for (idx, row) in state
        .params()
        .iter()
        .enumerate()
        .skip(scroll)
        .take(rows_height)
    {
        let selected = focused_row == Some(idx);
        let row_style = if selected {
            Style::default().bg(SELECTED_BG)
        } else {
            Style::default()
        };
        let cell_style = |column: KvField| {
            if selected && editor.column == column {
                row_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                row_style
            }
        };

        let key_span = if row.key.is_empty() {
            Span::styled(
                pad(text(locale, StringId::Key), key_width),
                PLACEHOLDER_STYLE.bg(row_style.bg.unwrap_or(Color::Reset)),
            )
        } else {
            Span::styled(pad(&row.key, key_width), cell_style(KvField::Key))
        };
        let value_span = if row.value.is_empty() {
            Span::styled(
                pad(text(locale, StringId::Value), value_width),
                PLACEHOLDER_STYLE.bg(row_style.bg.unwrap_or(Color::Reset)),
            )
        } else {
            Span::styled(pad(&row.value, value_width), cell_style(KvField::Value))
        };

        let line = Line::from(vec![
            key_span,
            Span::styled("\u{2502}", PLACEHOLDER_STYLE),
            value_span,
        ]);
        let row_area = Rect {
            y,
            height: 1,
            ..inner
        };
        frame.render_widget(Paragraph::new(line), row_area);

        if selected && editor.editing {
            let (cell, value) = match editor.column {
                KvField::Key => (
                    Rect {
                        width: key_width,
                        ..row_area
                    },
                    row.key.as_str(),
                ),
                KvField::Value => (
                    Rect {
                        x: value_x,
                        width: value_width,
                        ..row_area
                    },
                    row.value.as_str(),
                ),
            };
            place_cursor(frame, cell, value, editor.cursor);
        }
        y += 1;
    }

    // Add affordance, inactive while a blank row exists
    let add_style = if state.can_add_row() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    };
    let add_line = Line::from(Span::styled(
        format!("[+] {}", text(locale, StringId::AddRow)),
        add_style,
    ))
    .alignment(Alignment::Center);
    let add_area = Rect {
        y: inner.y + inner.height - 1,
        height: 1,
        ..inner
    };
    frame.render_widget(Paragraph::new(add_line), add_area);
}

/// Truncate or right-pad `s` to exactly `width` columns.
fn pad(s: &str, width: u16) -> String {
    let width = width as usize;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width - used));
    out
}

// ── Preview & start ──────────────────────────────────────────────────

fn render_preview(frame: &mut Frame, area: Rect, state: &FormState, locale: Locale) {
    let block = field_block(text(locale, StringId::Preview), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = match state.generate_url() {
        Ok(url) => Line::from(Span::styled(url, Style::default().fg(Color::Cyan))),
        Err(_) => Line::from(Span::styled(
            text(locale, StringId::UrlInvalid),
            Style::default().fg(Color::Red),
        )),
    };
    frame.render_widget(Paragraph::new(line), inner);
}

fn render_start_button(frame: &mut Frame, area: Rect, focused: bool, locale: Locale) {
    let style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };
    let label = format!(" \u{25B6} {} ", text(locale, StringId::Start));
    let button = Paragraph::new(Line::from(Span::styled(label, style))).alignment(Alignment::Center);
    frame.render_widget(button, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(state: &FormState, editor: &FormEditor) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_form(frame, area, state, editor, Locale::En);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("abc", 5), "abc  ");
        assert_eq!(pad("abcdef", 3), "abc");
        assert_eq!(pad("", 2), "  ");
    }

    #[test]
    fn test_params_table_height_saturates() {
        assert_eq!(params_table_height(1), 5);
        assert_eq!(params_table_height(usize::from(u16::MAX)), u16::MAX);
        assert_eq!(params_table_height(1 << 20), u16::MAX);
    }

    #[test]
    fn test_renders_preview_and_validation() {
        let mut state = FormState::new();
        let editor = FormEditor::new();
        let screen = screen_text(&state, &editor);
        assert!(screen.contains("Host is empty"));
        assert!(screen.contains("Start"));

        state.set_host("a.com");
        state.set_route("x");
        state.edit_param_key(0, "a");
        state.edit_param_value(0, "1");
        let screen = screen_text(&state, &editor);
        assert!(screen.contains("a.com/x?a=1"));
        assert!(screen.contains("Add param"));
    }
}
