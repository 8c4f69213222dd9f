//! Presentation layer: result rendering and the interactive prompt loop.

pub mod interactive;
pub mod render;

pub use interactive::{LinePrompt, QueryPrompt, SessionError, TerminalPrompt, run_session};
pub use render::{OutputFormat, write_load_error, write_results};
