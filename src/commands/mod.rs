//! Slash-command parsing and handlers
//!
//! Inputs that don't start with `/` (and unknown `/words`) fall through as
//! chat messages. Known commands either mutate the app directly or hand an
//! action back to the event loop to apply.

mod registry;

pub use registry::{all_commands, CommandInvocation};

use chrono::Utc;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::core::app::{App, AppAction};
use crate::core::message::TranscriptRole;

pub enum CommandResult {
    Continue,
    ProcessAsMessage(String),
    Dispatch(AppAction),
    Quit,
}

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if !trimmed.starts_with('/') {
        return CommandResult::ProcessAsMessage(input.to_string());
    }

    let mut parts = trimmed[1..].splitn(2, ' ');
    let command_name = match parts.next() {
        Some(name) if !name.is_empty() => name,
        _ => return CommandResult::ProcessAsMessage(input.to_string()),
    };
    let args = parts.next().unwrap_or("").trim();

    if let Some(command) = registry::find_command(command_name) {
        let invocation = CommandInvocation {
            input: trimmed,
            args,
        };
        (command.handler)(app, invocation)
    } else {
        CommandResult::ProcessAsMessage(input.to_string())
    }
}

pub(super) fn handle_help(app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    let mut help = String::from(
        "Keyboard:\n\
         Enter sends, Alt+Enter inserts a newline.\n\
         Ctrl+S saves, Ctrl+Y copies the latest preview, Ctrl+C quits.\n\
         Up/Down and the mouse wheel scroll the transcript.\n\
         \n\
         Commands:",
    );
    for command in all_commands() {
        help.push_str(&format!("\n/{} — {}", command.name, command.help));
    }
    app.conversation().add_system_message(help);
    CommandResult::Continue
}

pub(super) fn handle_save(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Dispatch(AppAction::SaveRequested)
}

pub(super) fn handle_clear(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Dispatch(AppAction::ClearSession)
}

pub(super) fn handle_copy(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Dispatch(AppAction::CopyLatestPreview)
}

pub(super) fn handle_quit(_app: &mut App, _invocation: CommandInvocation<'_>) -> CommandResult {
    CommandResult::Quit
}

pub(super) fn handle_log(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    if invocation.args.is_empty() {
        match app.session.logging.toggle() {
            Ok(message) => app.ui.set_transient_status(message),
            Err(e) => app.ui.set_transient_status(format!("Log error: {e}")),
        }
    } else if invocation.args.split_whitespace().count() == 1 {
        match app.session.logging.set_log_file(invocation.args.to_string()) {
            Ok(message) => app.ui.set_transient_status(message),
            Err(e) => app.ui.set_transient_status(format!("Logfile error: {e}")),
        }
    } else {
        app.ui.set_transient_status("Usage: /log [filename]");
    }
    CommandResult::Continue
}

pub(super) fn handle_dump(app: &mut App, invocation: CommandInvocation<'_>) -> CommandResult {
    let filename = if invocation.args.is_empty() {
        let timestamp = Utc::now().format("%Y-%m-%d").to_string();
        format!("phrasedeck-log-{timestamp}.txt")
    } else if invocation.args.split_whitespace().count() == 1 {
        invocation.args.to_string()
    } else {
        app.ui.set_transient_status("Usage: /dump [filename]");
        return CommandResult::Continue;
    };

    match dump_transcript(app, &filename) {
        Ok(()) => app
            .ui
            .set_transient_status(format!("Transcript dumped to: {filename}")),
        Err(e) => app.ui.set_transient_status(format!("Dump error: {e}")),
    }
    CommandResult::Continue
}

fn dump_transcript(app: &App, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    if std::path::Path::new(filename).exists() {
        return Err(format!("File '{filename}' already exists").into());
    }

    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);
    for message in &app.ui.messages {
        match message.role {
            TranscriptRole::User => writeln!(writer, "You: {}", message.content)?,
            TranscriptRole::System => writeln!(writer, "{}", message.content)?,
        }
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
