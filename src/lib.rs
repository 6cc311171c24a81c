//! Phrasedeck is a terminal-first chat client for a notes-to-vocabulary
//! backend: paste study notes, get back a bilingual vocabulary list, refine
//! it conversationally, and save it.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the session state: the vocabulary notebook, message
//!   classification, preview formatting, configuration, and the
//!   action/reducer state machine in [`core::app`].
//! - [`ui`] renders the terminal interface and runs the interactive event
//!   loop that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and command execution
//!   used by the chat loop.
//! - [`api`] defines the wire types for the process/refine/save endpoints
//!   and the request service that calls them.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`], which initializes and dispatches into
//! [`core::app`] and [`ui::chat_loop`] for interactive sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
