//! Shared runner helpers: config merging and the login guard

use std::env;

use crate::application::ports::{ConfigStore, SessionStore};
use crate::domain::auth::AuthSession;
use crate::domain::config::AppConfig;
use crate::infrastructure::{JsonSessionStore, XdgConfigStore};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the server URL
pub const SERVER_ENV_VAR: &str = "IELTS_PRACTICE_SERVER";

/// Load and merge configuration from file, env, and CLI.
/// Precedence: defaults < file < env < cli.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let env_config = AppConfig {
        server_url: env::var(SERVER_ENV_VAR).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Load the stored session, or fail with the login hint.
/// Runs before any network or microphone access.
pub async fn require_session() -> Result<AuthSession, String> {
    let store = JsonSessionStore::new();
    match store.load().await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err("Not logged in. Run 'ielts-practice login' first.".to_string()),
        Err(e) => Err(format!("Could not read session: {}", e)),
    }
}
