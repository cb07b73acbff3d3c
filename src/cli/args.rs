//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// IELTS Practice - speaking and listening practice from the terminal
#[derive(Parser, Debug)]
#[command(name = "ielts-practice")]
#[command(version = "0.1.0")]
#[command(about = "Record and submit IELTS speaking practice responses")]
#[command(long_about = None)]
pub struct Cli {
    /// Practice server URL (overrides config file and environment)
    #[arg(short = 's', long, value_name = "URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the practice server
    Login {
        /// Account email (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Account password (prompted when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Log out and clear the stored session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Browse the test catalog
    Tests {
        #[command(subcommand)]
        action: Option<TestsAction>,
    },
    /// Record and submit a response to a speaking test
    Respond {
        /// Speaking test id
        test_id: String,

        /// Written response text to submit alongside (or instead of) audio
        #[arg(short, long, value_name = "TEXT")]
        text: Option<String>,

        /// Submit text only, without recording audio
        #[arg(long, requires = "text")]
        text_only: bool,

        /// Maximum answer length (e.g., 45s, 2m, 1m30s)
        #[arg(short, long, value_name = "TIME")]
        max_duration: Option<String>,

        /// Preparation countdown before recording starts (e.g., 30s)
        #[arg(short, long, value_name = "TIME")]
        prep_time: Option<String>,

        /// Submit immediately after recording, without the review prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Test catalog actions
#[derive(Subcommand, Debug)]
pub enum TestsAction {
    /// List speaking tests (the default)
    Speaking,
    /// List listening tests
    Listening,
    /// Add a speaking test (admin only)
    Add {
        /// The question prompt
        question: String,
    },
    /// Remove a speaking test (admin only)
    Remove {
        /// Speaking test id
        id: String,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["server_url", "max_duration", "prep_time"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
