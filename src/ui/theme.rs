use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub system_text_style: Style,
    pub preview_text_style: Style,
    pub preview_marker_style: Style,
    pub grammar_text_style: Style,
    pub error_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub activity_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,
    pub status_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
    pub input_cursor_line_style: Style,

    // Suggestions overlay
    pub overlay_border_style: Style,
    pub overlay_title_style: Style,
    pub overlay_row_style: Style,
    pub overlay_cursor_style: Style,
    pub overlay_checked_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            system_text_style: Style::default().fg(Color::DarkGray),
            preview_text_style: Style::default().fg(Color::White),
            preview_marker_style: Style::default().fg(Color::DarkGray),
            grammar_text_style: Style::default().fg(Color::Yellow),
            error_text_style: Style::default().fg(Color::Red),

            title_style: Style::default().fg(Color::Gray),
            activity_indicator_style: Style::default().fg(Color::White),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),
            status_style: Style::default().fg(Color::Green),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_cursor_line_style: Style::default(),

            overlay_border_style: Style::default().fg(Color::Gray),
            overlay_title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            overlay_row_style: Style::default().fg(Color::White),
            overlay_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            overlay_checked_style: Style::default().fg(Color::Green),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            system_text_style: Style::default().fg(Color::Gray),
            preview_text_style: Style::default().fg(Color::Black),
            preview_marker_style: Style::default().fg(Color::Gray),
            grammar_text_style: Style::default().fg(Color::Magenta),
            error_text_style: Style::default().fg(Color::Red),

            title_style: Style::default().fg(Color::DarkGray),
            activity_indicator_style: Style::default().fg(Color::Black),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),
            status_style: Style::default().fg(Color::Green),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            input_cursor_line_style: Style::default(),

            overlay_border_style: Style::default().fg(Color::Black),
            overlay_title_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            overlay_row_style: Style::default().fg(Color::Black),
            overlay_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
            overlay_checked_style: Style::default().fg(Color::Green),
        }
    }

    /// Look up a built-in theme by name, case-insensitively.
    pub fn find(name: &str) -> Option<Theme> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::dark_default()),
            "light" => Some(Theme::light()),
            _ => None,
        }
    }
}
