//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, and the command handlers.

pub mod app;
pub mod args;
pub mod auth_cmd;
pub mod config_cmd;
pub mod presenter;
pub mod respond_cmd;
pub mod tests_cmd;

// Re-export commonly used types
pub use app::{load_merged_config, require_session, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, TestsAction};
pub use presenter::Presenter;
pub use respond_cmd::{run_respond, RespondOptions};
