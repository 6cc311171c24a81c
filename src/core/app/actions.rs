//! Action reducer: every user intent and network completion becomes an
//! [`AppAction`]; [`apply_action`] mutates the [`App`] and may return an
//! [`AppCommand`] for the event loop to execute.

use std::time::Instant;

use crate::api::{
    ApiError, ProcessRequest, ProcessResponse, RefineRequest, RefineResponse, RequestKind,
    RequestParams, SaveRequest, SaveResponse,
};
use crate::core::classify::{classify, SubmissionKind};
use crate::core::preview::{build_preview, grammar_summary, save_summary};
use crate::ui::suggestions::SuggestionPicker;
use crate::utils::clipboard::copy_to_clipboard;

use super::App;

pub enum AppAction {
    /// The user pressed Enter on the input box.
    SubmitInput { text: String },
    ProcessCompleted {
        request_id: u64,
        result: Result<ProcessResponse, ApiError>,
    },
    RefineCompleted {
        request_id: u64,
        result: Result<RefineResponse, ApiError>,
    },
    SaveCompleted {
        request_id: u64,
        result: Result<SaveResponse, ApiError>,
    },
    ToggleSuggestion { index: usize },
    ToggleAllSuggestions,
    ConfirmSuggestions,
    DismissSuggestions,
    SaveRequested,
    ClearSession,
    CopyLatestPreview,
}

/// Side effect the event loop runs after a state transition.
pub enum AppCommand {
    Spawn(RequestParams),
}

pub fn apply_actions(
    app: &mut App,
    actions: impl IntoIterator<Item = AppAction>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for action in actions {
        if let Some(cmd) = apply_action(app, action) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput { text } => handle_submit(app, text),
        AppAction::ProcessCompleted { request_id, result } => {
            handle_process_completed(app, request_id, result)
        }
        AppAction::RefineCompleted { request_id, result } => {
            handle_refine_completed(app, request_id, result)
        }
        AppAction::SaveCompleted { request_id, result } => {
            handle_save_completed(app, request_id, result)
        }
        AppAction::ToggleSuggestion { index } => {
            if let Some(picker) = app.ui.suggestion_picker.as_mut() {
                picker.toggle(index);
            }
            None
        }
        AppAction::ToggleAllSuggestions => {
            if let Some(picker) = app.ui.suggestion_picker.as_mut() {
                picker.toggle_all();
            }
            None
        }
        AppAction::ConfirmSuggestions => handle_confirm_suggestions(app),
        AppAction::DismissSuggestions => {
            app.ui.suggestion_picker = None;
            app.notebook.discard_suggestions();
            None
        }
        AppAction::SaveRequested => handle_save_requested(app),
        AppAction::ClearSession => handle_clear_session(app),
        AppAction::CopyLatestPreview => handle_copy_latest_preview(app),
    }
}

fn spawn_request(app: &mut App, kind: RequestKind) -> AppCommand {
    let (request_id, cancel_token) = app.session.begin_request();
    app.ui.pulse_start = Instant::now();
    AppCommand::Spawn(RequestParams {
        client: app.session.client.clone(),
        base_url: app.session.base_url.clone(),
        kind,
        cancel_token,
        request_id,
    })
}

fn handle_submit(app: &mut App, text: String) -> Option<AppCommand> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let trimmed = trimmed.to_string();
    app.conversation().add_user_message(trimmed.clone());

    let kind = match classify(&trimmed, app.notebook.has_processed) {
        SubmissionKind::Process => {
            // Stored before the request is issued and never rolled back, so
            // a failed attempt still refines against these notes later.
            app.notebook.original_notes = trimmed.clone();
            RequestKind::Process(ProcessRequest { notes: trimmed })
        }
        SubmissionKind::Refine => RequestKind::Refine(RefineRequest {
            items: app.notebook.items.clone(),
            notes: app.notebook.original_notes.clone(),
            feedback: trimmed,
        }),
    };

    app.ui.set_status("Thinking…");
    Some(spawn_request(app, kind))
}

fn is_stale(app: &App, request_id: u64, endpoint: &'static str) -> bool {
    if request_id != app.session.current_request_id {
        tracing::debug!(
            request_id,
            current = app.session.current_request_id,
            endpoint,
            "dropping stale response"
        );
        return true;
    }
    false
}

fn handle_process_completed(
    app: &mut App,
    request_id: u64,
    result: Result<ProcessResponse, ApiError>,
) -> Option<AppCommand> {
    if is_stale(app, request_id, "process") {
        return None;
    }
    app.session.finish_request();
    app.ui.clear_status();

    match result {
        Ok(response) => {
            app.notebook.has_processed = true;
            app.notebook.apply_items(response.items);
            app.notebook.apply_theme(response.theme);
            app.conversation().add_preview_message(response.preview);

            if let Some(grammar) = response.grammar {
                if grammar.checked {
                    app.conversation().add_grammar_message(grammar_summary(&grammar));
                }
            }
            if let Some(suggestions) = response.suggestions {
                if !suggestions.is_empty() {
                    let labels = suggestions.iter().map(|s| s.label()).collect();
                    app.notebook.set_suggestions(suggestions);
                    app.ui.suggestion_picker = Some(SuggestionPicker::new(labels));
                }
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "process request failed");
            app.conversation().add_error_message(format!("Error: {err}"));
        }
    }
    None
}

fn handle_refine_completed(
    app: &mut App,
    request_id: u64,
    result: Result<RefineResponse, ApiError>,
) -> Option<AppCommand> {
    if is_stale(app, request_id, "refine") {
        return None;
    }
    app.session.finish_request();
    app.ui.clear_status();

    match result {
        Ok(response) => {
            app.notebook.has_processed = true;
            app.notebook.apply_items(response.items);
            app.notebook.apply_theme(response.theme);
            app.conversation().add_preview_message(response.preview);
        }
        Err(err) => {
            tracing::error!(error = %err, "refine request failed");
            app.conversation().add_error_message(format!("Error: {err}"));
        }
    }
    None
}

fn handle_save_completed(
    app: &mut App,
    request_id: u64,
    result: Result<SaveResponse, ApiError>,
) -> Option<AppCommand> {
    if is_stale(app, request_id, "save") {
        return None;
    }
    app.session.finish_request();
    app.ui.clear_status();

    match result {
        Ok(response) => {
            let summary = save_summary(response.saved, response.failed);
            app.conversation().add_system_message(summary);
        }
        Err(err) => {
            tracing::error!(error = %err, "save request failed");
            app.conversation().add_error_message("Save failed.");
        }
    }
    None
}

fn handle_confirm_suggestions(app: &mut App) -> Option<AppCommand> {
    let checked = match app.ui.suggestion_picker.as_ref() {
        Some(picker) => picker.checked_indices(),
        None => return None,
    };

    if checked.is_empty() {
        app.conversation()
            .add_system_message("Select at least one suggestion first.");
        return None;
    }

    let adopted = app.notebook.adopt_suggestions(&checked);
    app.ui.suggestion_picker = None;
    app.conversation().add_system_message(format!(
        "Added {} suggestion{} to the list.",
        adopted,
        if adopted == 1 { "" } else { "s" }
    ));
    let preview = build_preview(&app.notebook.items, &app.notebook.theme);
    app.conversation().add_preview_message(preview);
    None
}

fn handle_save_requested(app: &mut App) -> Option<AppCommand> {
    if app.notebook.items.is_empty() {
        app.conversation().add_system_message("Nothing to save.");
        return None;
    }
    let request = SaveRequest {
        items: app.notebook.items.clone(),
        theme: app.notebook.theme.clone(),
    };
    app.ui.set_status("Saving…");
    Some(spawn_request(app, RequestKind::Save(request)))
}

fn handle_clear_session(app: &mut App) -> Option<AppCommand> {
    app.session.cancel_in_flight();
    app.notebook.reset();
    app.ui.clear_messages();
    app.ui.suggestion_picker = None;
    app.ui.clear_status();
    app.conversation()
        .add_system_message("Session cleared. Paste study notes to start a new vocabulary list.");
    None
}

fn handle_copy_latest_preview(app: &mut App) -> Option<AppCommand> {
    match app.ui.latest_preview() {
        Some(message) => {
            let content = message.content.clone();
            match copy_to_clipboard(&content) {
                Ok(()) => app.ui.set_transient_status("Copied to clipboard"),
                Err(e) => app.ui.set_transient_status(e),
            }
        }
        None => app.ui.set_transient_status("Nothing to copy yet"),
    }
    None
}
