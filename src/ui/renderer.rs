//! Frame rendering
//!
//! [`transcript_lines`] is a pure function from messages to styled lines,
//! so transcript presentation is testable without a terminal. [`ui`] does
//! the per-frame work: layout, scroll clamping, the input box, and the
//! suggestions overlay.

use std::collections::VecDeque;
use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::core::app::App;
use crate::core::message::{Message, MessageKind, TranscriptRole};
use crate::ui::suggestions::SuggestionPicker;
use crate::ui::theme::Theme;
use crate::utils::url::display_host;

/// Marker rendered under every copyable preview.
pub const COPY_HINT: &str = "[copy: Ctrl+Y]";

/// Build the styled transcript: one block of lines per message, blank line
/// between messages, previews followed by the copy marker.
pub fn transcript_lines(messages: &VecDeque<Message>, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    for message in messages {
        match message.role {
            TranscriptRole::User => {
                let mut content_lines = message.content.lines();
                let first = content_lines.next().unwrap_or("").to_string();
                lines.push(Line::from(vec![
                    Span::styled("You: ", theme.user_prefix_style),
                    Span::styled(first, theme.user_text_style),
                ]));
                for rest in content_lines {
                    lines.push(Line::from(Span::styled(
                        rest.to_string(),
                        theme.user_text_style,
                    )));
                }
            }
            TranscriptRole::System => {
                let style = match message.kind {
                    MessageKind::Plain => theme.system_text_style,
                    MessageKind::Preview => theme.preview_text_style,
                    MessageKind::Grammar => theme.grammar_text_style,
                    MessageKind::Error => theme.error_text_style,
                };
                for content_line in message.content.lines() {
                    lines.push(Line::from(Span::styled(content_line.to_string(), style)));
                }
                if message.content.is_empty() {
                    lines.push(Line::from(Span::styled(String::new(), style)));
                }
                if message.kind == MessageKind::Preview {
                    lines.push(Line::from(Span::styled(
                        COPY_HINT.to_string(),
                        theme.preview_marker_style,
                    )));
                }
            }
        }
        lines.push(Line::default());
    }

    lines
}

fn pulse_symbol(pulse_start: Instant) -> &'static str {
    let elapsed = pulse_start.elapsed().as_millis() as f32 / 1000.0;
    let phase = (elapsed * 2.0) % 2.0;
    let intensity = if phase < 1.0 { phase } else { 2.0 - phase };
    if intensity < 0.33 {
        "○"
    } else if intensity < 0.66 {
        "◐"
    } else {
        "●"
    }
}

fn input_title(app: &App) -> Line<'static> {
    let theme = &app.ui.theme;
    let hints = if app.ui.suggestions_open() {
        "Suggestions: ↑/↓ move • Space toggle • a all • Enter add • Esc dismiss"
    } else {
        "Enter send • Alt+Enter newline • Ctrl+S save • Ctrl+Y copy • /help"
    };

    let mut spans = vec![Span::styled(hints.to_string(), theme.input_title_style)];
    if let Some(status) = &app.ui.status {
        spans.push(Span::styled("  •  ".to_string(), theme.input_title_style));
        spans.push(Span::styled(status.text.clone(), theme.status_style));
    }
    if app.session.in_flight {
        spans.push(Span::styled(" ".to_string(), theme.input_title_style));
        spans.push(Span::styled(
            pulse_symbol(app.ui.pulse_start).to_string(),
            theme.activity_indicator_style,
        ));
    }
    Line::from(spans)
}

/// Rows the input editor needs, capped so the transcript keeps most of the
/// screen.
pub fn input_area_height(app: &App) -> u16 {
    (app.ui.input_line_count() as u16).clamp(1, 6)
}

fn overlay_rect(area: Rect, picker: &SuggestionPicker) -> Rect {
    let width = area.width.saturating_sub(6).clamp(20, 76);
    let height = (picker.len() as u16 + 2).clamp(3, area.height.saturating_sub(2).max(3));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn draw_suggestions_overlay(f: &mut Frame, area: Rect, picker: &SuggestionPicker, theme: &Theme) {
    let rect = overlay_rect(area, picker);
    f.render_widget(Clear, rect);

    let items: Vec<ListItem> = picker
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let marker = if row.checked { "[x] " } else { "[ ] " };
            let marker_style = if row.checked {
                theme.overlay_checked_style
            } else {
                theme.overlay_row_style
            };
            let mut line = Line::from(vec![
                Span::styled(marker.to_string(), marker_style),
                Span::styled(row.label.clone(), theme.overlay_row_style),
            ]);
            if i == picker.cursor {
                line = line.style(theme.overlay_cursor_style);
            }
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.overlay_border_style)
            .title(Span::styled(
                "Suggested additions",
                theme.overlay_title_style,
            ))
            .style(Style::default().bg(theme.background_color)),
    );
    f.render_widget(list, rect);
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.ui.theme.clone();

    f.render_widget(
        Block::default().style(Style::default().bg(theme.background_color)),
        f.area(),
    );

    let input_height = input_area_height(app);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(input_height + 2),
        ])
        .split(f.area());

    let title = format!(
        "phrasedeck v{} — {} • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        display_host(&app.session.base_url),
        app.session.logging.status_string()
    );
    f.render_widget(
        Paragraph::new(Span::styled(title, theme.title_style)),
        chunks[0],
    );

    // Transcript is prewrapped to the pane width, so no Paragraph wrapping
    // here; scroll math and rendering see the same lines.
    let transcript_area = chunks[1];
    let total_lines = app.ui.wrapped_line_count(transcript_area.width);
    let max_offset = total_lines.saturating_sub(transcript_area.height);
    let scroll = if app.ui.auto_scroll {
        max_offset
    } else {
        app.ui.scroll_offset.min(max_offset)
    };
    app.ui.scroll_offset = scroll;

    let lines = app.ui.prewrapped_lines(transcript_area.width).to_vec();
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), transcript_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.input_border_style)
        .title(input_title(app));
    app.ui.textarea.set_block(block);
    f.render_widget(&app.ui.textarea, chunks[2]);

    if let Some(picker) = app.ui.suggestion_picker.clone() {
        draw_suggestions_overlay(f, transcript_area, &picker, &theme);
    }
}
