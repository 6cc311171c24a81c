//! Terminal-facing state: transcript, input editor, scroll position,
//! status line, and the suggestions overlay slot.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::text::Line;
use tui_textarea::TextArea;

use crate::core::message::Message;
use crate::ui::suggestions::SuggestionPicker;
use crate::ui::theme::Theme;

/// How long transient status text (copy confirmations and the like) stays
/// on screen before the event loop sweeps it away.
pub const STATUS_TTL: Duration = Duration::from_secs(2);

pub struct StatusLine {
    pub text: String,
    /// `None` keeps the status until something replaces or clears it.
    pub expires_at: Option<Instant>,
}

struct PrewrapCache {
    width: u16,
    revision: u64,
    lines: Vec<Line<'static>>,
}

pub struct UiState {
    pub messages: VecDeque<Message>,
    pub textarea: TextArea<'static>,
    pub theme: Theme,
    pub scroll_offset: u16,
    /// Stick to the bottom of the transcript until the user scrolls up.
    pub auto_scroll: bool,
    pub status: Option<StatusLine>,
    pub suggestion_picker: Option<SuggestionPicker>,
    pub exit_requested: bool,
    pub pulse_start: Instant,
    transcript_revision: u64,
    prewrap_cache: Option<PrewrapCache>,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        let mut ui = Self {
            messages: VecDeque::new(),
            textarea: TextArea::default(),
            theme,
            scroll_offset: 0,
            auto_scroll: true,
            status: None,
            suggestion_picker: None,
            exit_requested: false,
            pulse_start: Instant::now(),
            transcript_revision: 0,
            prewrap_cache: None,
        };
        ui.configure_textarea();
        ui
    }

    fn configure_textarea(&mut self) {
        let style = self
            .theme
            .input_text_style
            .patch(ratatui::style::Style::default().bg(self.theme.background_color));
        self.textarea.set_style(style);
        self.textarea.set_cursor_style(self.theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(self.theme.input_cursor_line_style);
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push_back(message);
        self.transcript_revision += 1;
        if self.auto_scroll {
            self.scroll_offset = u16::MAX; // clamped to the bottom at render time
        }
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.transcript_revision += 1;
        self.scroll_offset = 0;
        self.auto_scroll = true;
    }

    /// Newest copyable preview in the transcript, if any.
    pub fn latest_preview(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| m.is_preview())
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len()
    }

    /// Drain the input editor, returning its contents.
    pub fn take_input_text(&mut self) -> String {
        let text = self.input_text();
        self.textarea = TextArea::default();
        self.configure_textarea();
        text
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            expires_at: None,
        });
    }

    pub fn set_transient_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusLine {
            text: text.into(),
            expires_at: Some(Instant::now() + STATUS_TTL),
        });
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Drop an expired transient status. Returns true when the status
    /// changed, so the caller knows to redraw.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        if let Some(status) = &self.status {
            if let Some(expires_at) = status.expires_at {
                if now >= expires_at {
                    self.status = None;
                    return true;
                }
            }
        }
        false
    }

    pub fn suggestions_open(&self) -> bool {
        self.suggestion_picker.is_some()
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.auto_scroll = false;
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.auto_scroll = true;
        self.scroll_offset = u16::MAX;
    }

    /// Transcript lines wrapped to the given width, cached per
    /// (width, transcript revision) so redraws don't rebuild them.
    pub fn prewrapped_lines(&mut self, width: u16) -> &[Line<'static>] {
        let stale = match &self.prewrap_cache {
            Some(cache) => cache.width != width || cache.revision != self.transcript_revision,
            None => true,
        };
        if stale {
            let built = crate::ui::renderer::transcript_lines(&self.messages, &self.theme);
            let wrapped = crate::utils::text::prewrap_lines(&built, width);
            self.prewrap_cache = Some(PrewrapCache {
                width,
                revision: self.transcript_revision,
                lines: wrapped,
            });
        }
        &self.prewrap_cache.as_ref().unwrap().lines
    }

    pub fn wrapped_line_count(&mut self, width: u16) -> u16 {
        self.prewrapped_lines(width).len().min(u16::MAX as usize) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Message;

    fn ui() -> UiState {
        UiState::new(Theme::dark_default())
    }

    #[test]
    fn latest_preview_finds_the_newest_copyable_message() {
        let mut ui = ui();
        ui.push_message(Message::preview("first"));
        ui.push_message(Message::system("noise"));
        ui.push_message(Message::preview("second"));
        ui.push_message(Message::error("boom"));

        assert_eq!(ui.latest_preview().unwrap().content, "second");
    }

    #[test]
    fn take_input_drains_the_editor() {
        let mut ui = ui();
        ui.textarea.insert_str("line one");
        assert_eq!(ui.take_input_text(), "line one");
        assert_eq!(ui.input_text(), "");
    }

    #[test]
    fn transient_status_expires_after_ttl() {
        let mut ui = ui();
        ui.set_transient_status("Copied to clipboard");
        assert!(!ui.expire_status(Instant::now()));
        assert!(ui.expire_status(Instant::now() + STATUS_TTL + Duration::from_millis(1)));
        assert!(ui.status.is_none());
    }

    #[test]
    fn persistent_status_never_expires() {
        let mut ui = ui();
        ui.set_status("Waiting for the backend");
        assert!(!ui.expire_status(Instant::now() + Duration::from_secs(60)));
        assert!(ui.status.is_some());
    }

    #[test]
    fn prewrap_cache_rebuilds_on_new_messages() {
        let mut ui = ui();
        ui.push_message(Message::user("hello"));
        let before = ui.prewrapped_lines(80).len();
        ui.push_message(Message::system("world"));
        let after = ui.prewrapped_lines(80).len();
        assert!(after > before);
    }

    #[test]
    fn scrolling_up_disables_auto_scroll() {
        let mut ui = ui();
        ui.push_message(Message::user("hello"));
        assert!(ui.auto_scroll);
        ui.scroll_up(1);
        assert!(!ui.auto_scroll);
        ui.scroll_to_bottom();
        assert!(ui.auto_scroll);
    }
}
