pub mod app;
pub mod classify;
pub mod config;
pub mod message;
pub mod notebook;
pub mod preview;
