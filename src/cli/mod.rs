//! Command-line interface parsing and handling
//!
//! Parses arguments, initializes diagnostics, and dispatches either into
//! the interactive chat session or the config subcommands.

use std::error::Error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;

#[derive(Parser)]
#[command(name = "phrasedeck")]
#[command(about = "A terminal chat interface for turning study notes into bilingual vocabulary lists")]
#[command(
    long_about = "Phrasedeck is a full-screen terminal chat interface for a notes-to-vocabulary \
backend. Paste study notes to extract English/Chinese vocabulary items, refine the list with \
follow-up messages, and save it through the backend.\n\n\
Configuration:\n\
  phrasedeck set base-url <URL>   Persist the backend address\n\
  phrasedeck set theme <NAME>     Persist the UI theme (dark or light)\n\
  PHRASEDECK_BASE_URL             Environment override for the backend address\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a newline\n\
  Ctrl+S            Save the vocabulary list\n\
  Ctrl+Y            Copy the latest preview\n\
  Up/Down/Mouse     Scroll through the transcript\n\
  Ctrl+C            Quit"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL for this session (overrides env and config)
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// UI theme: dark or light
    #[arg(short = 't', long, global = true, value_name = "NAME")]
    pub theme: Option<String>,

    /// Enable transcript logging to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            run_chat(
                args.base_url.as_deref(),
                args.theme.as_deref(),
                args.log,
            )
            .await
        }
        Commands::Set { key, value } => handle_set(key.as_deref(), value),
        Commands::Unset { key } => handle_unset(&key),
    }
}

fn handle_set(key: Option<&str>, value: Option<String>) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    let Some(key) = key else {
        config.print_all();
        return Ok(());
    };
    let Some(value) = value else {
        config.print_all();
        return Ok(());
    };

    match key {
        "base-url" => {
            config.base_url = Some(value.clone());
            config.save()?;
            println!("Set base-url to: {value}");
        }
        "theme" => {
            if crate::ui::theme::Theme::find(&value).is_none() {
                eprintln!("Unknown theme: {value} (expected dark or light)");
                std::process::exit(1);
            }
            config.theme = Some(value.clone());
            config.save()?;
            println!("Set theme to: {value}");
        }
        _ => {
            eprintln!("Unknown config key: {key}");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn handle_unset(key: &str) -> Result<(), Box<dyn Error>> {
    let mut config = Config::load()?;
    match key {
        "base-url" => {
            config.base_url = None;
            config.save()?;
            println!("Unset base-url");
        }
        "theme" => {
            config.theme = None;
            config.save()?;
            println!("Unset theme");
        }
        _ => {
            eprintln!("Unknown config key: {key}");
            std::process::exit(1);
        }
    }
    Ok(())
}
