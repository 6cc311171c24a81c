//! Terminal UI layer for interactive sessions.
//!
//! The UI module owns rendering, keyboard handling, and loop control for
//! the text user interface.
//!
//! Key submodules:
//! - [`chat_loop`]: the main interaction loop that dispatches user input to
//!   [`crate::commands`] and coordinates backend calls via [`crate::api`].
//! - [`renderer`]: view composition and frame output.
//! - [`suggestions`]: the multi-select checklist overlay.
//! - [`theme`]: color/style policy.
//!
//! Ownership boundary: this layer presents and captures interaction state,
//! while [`crate::core`] owns domain logic and backend coordination.

pub mod chat_loop;
pub mod renderer;
pub mod suggestions;
pub mod theme;
