use super::CommandResult;
use crate::core::app::App;

pub type CommandHandler = fn(&mut App, CommandInvocation<'_>) -> CommandResult;

pub struct Command {
    pub name: &'static str,
    pub help: &'static str,
    pub handler: CommandHandler,
}

#[derive(Clone, Copy)]
pub struct CommandInvocation<'a> {
    pub input: &'a str,
    pub args: &'a str,
}

pub fn all_commands() -> &'static [Command] {
    COMMANDS
}

pub fn find_command(name: &str) -> Option<&'static Command> {
    all_commands()
        .iter()
        .find(|command| command.name.eq_ignore_ascii_case(name))
}

const COMMANDS: &[Command] = &[
    Command {
        name: "help",
        help: "Show available commands and keyboard shortcuts.",
        handler: super::handle_help,
    },
    Command {
        name: "save",
        help: "Save the current vocabulary list through the backend.",
        handler: super::handle_save,
    },
    Command {
        name: "clear",
        help: "Clear the session and start over.",
        handler: super::handle_clear,
    },
    Command {
        name: "copy",
        help: "Copy the latest preview to the clipboard.",
        handler: super::handle_copy,
    },
    Command {
        name: "log",
        help: "Toggle transcript logging or set the log file path.",
        handler: super::handle_log,
    },
    Command {
        name: "dump",
        help: "Export the current transcript to a file.",
        handler: super::handle_dump,
    },
    Command {
        name: "quit",
        help: "Exit phrasedeck.",
        handler: super::handle_quit,
    },
];
