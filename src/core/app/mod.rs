//! Application state and the action/reducer state machine.
//!
//! All user intent and all network completions flow through [`AppAction`]
//! and [`apply_action`], which mutate [`App`] and may hand back an
//! [`AppCommand`] side effect for the event loop to run. Keeping the
//! transitions here makes every interaction property testable without a
//! terminal or a backend.

pub mod actions;
pub mod conversation;
pub mod session;
pub mod ui_state;

pub use actions::{apply_action, apply_actions, AppAction, AppCommand};
pub use conversation::ConversationController;
pub use session::{bootstrap_session, SessionBootstrap, SessionContext};
pub use ui_state::UiState;

use crate::core::notebook::Notebook;
use crate::ui::theme::Theme;

pub struct App {
    pub session: SessionContext,
    pub notebook: Notebook,
    pub ui: UiState,
}

impl App {
    pub fn new(session: SessionContext, theme: Theme) -> Self {
        Self {
            session,
            notebook: Notebook::new(),
            ui: UiState::new(theme),
        }
    }

    pub fn conversation(&mut self) -> ConversationController<'_> {
        ConversationController::new(&mut self.session, &mut self.ui)
    }

    pub fn request_exit(&mut self) {
        self.ui.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.ui.exit_requested
    }
}
