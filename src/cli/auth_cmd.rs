//! Login, logout, and whoami command handlers

use std::io::{self, BufRead, Write};

use crate::application::ports::{Authenticator, SessionStore};

use super::presenter::Presenter;

/// Handle the login command
pub async fn handle_login<A, S>(
    authenticator: &A,
    store: &S,
    presenter: &Presenter,
    email: Option<String>,
    password: Option<String>,
) -> Result<(), String>
where
    A: Authenticator,
    S: SessionStore,
{
    let email = match email {
        Some(e) => e,
        None => prompt("Email: ")?,
    };
    let password = match password {
        Some(p) => p,
        None => prompt("Password: ")?,
    };

    if email.trim().is_empty() || password.is_empty() {
        return Err("Email and password are required".to_string());
    }

    let session = authenticator
        .login(email.trim(), &password)
        .await
        .map_err(|e| e.to_string())?;

    store.save(&session).await.map_err(|e| e.to_string())?;

    presenter.success(&format!(
        "Logged in as {} ({})",
        session.email, session.role
    ));
    Ok(())
}

/// Handle the logout command
pub async fn handle_logout<S: SessionStore>(
    store: &S,
    presenter: &Presenter,
) -> Result<(), String> {
    store.clear().await.map_err(|e| e.to_string())?;
    presenter.success("Logged out");
    Ok(())
}

/// Handle the whoami command
pub async fn handle_whoami<S: SessionStore>(
    store: &S,
    presenter: &Presenter,
) -> Result<(), String> {
    match store.load().await.map_err(|e| e.to_string())? {
        Some(session) => {
            presenter.key_value("email", &session.email);
            presenter.key_value("role", session.role.as_str());
        }
        None => presenter.output("Not logged in"),
    }
    Ok(())
}

/// Prompt on stderr and read one line from stdin
fn prompt(label: &str) -> Result<String, String> {
    eprint!("{}", label);
    io::stderr().flush().map_err(|e| e.to_string())?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| e.to_string())?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
