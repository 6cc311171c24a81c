//! Transcript mutations that also feed the optional transcript log.

use super::{session::SessionContext, ui_state::UiState};
use crate::core::message::Message;

pub struct ConversationController<'a> {
    session: &'a mut SessionContext,
    ui: &'a mut UiState,
}

impl<'a> ConversationController<'a> {
    pub fn new(session: &'a mut SessionContext, ui: &'a mut UiState) -> Self {
        Self { session, ui }
    }

    pub fn add_user_message(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.log(&format!("You: {content}"));
        self.ui.push_message(Message::user(content));
    }

    pub fn add_system_message(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.log(&content);
        self.ui.push_message(Message::system(content));
    }

    pub fn add_preview_message(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.log(&content);
        self.ui.push_message(Message::preview(content));
    }

    pub fn add_grammar_message(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.log(&content);
        self.ui.push_message(Message::grammar(content));
    }

    pub fn add_error_message(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.log(&content);
        self.ui.push_message(Message::error(content));
    }

    fn log(&mut self, content: &str) {
        if let Err(e) = self.session.logging.log_entry(content) {
            self.ui
                .set_transient_status(format!("Transcript log error: {e}"));
        }
    }
}
