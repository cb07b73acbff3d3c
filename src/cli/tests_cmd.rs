//! Test catalog command handlers

use crate::application::ports::TestCatalog;
use crate::domain::auth::AuthSession;

use super::args::TestsAction;
use super::presenter::Presenter;

/// Handle the tests subcommand. Listing defaults to speaking tests;
/// add and remove require an admin session.
pub async fn handle_tests_command<C: TestCatalog>(
    action: Option<TestsAction>,
    catalog: &C,
    session: &AuthSession,
    presenter: &Presenter,
) -> Result<(), String> {
    match action.unwrap_or(TestsAction::Speaking) {
        TestsAction::Speaking => list_speaking(catalog, presenter).await,
        TestsAction::Listening => list_listening(catalog, presenter).await,
        TestsAction::Add { question } => {
            require_admin(session)?;
            let test = catalog
                .create_speaking_test(&question)
                .await
                .map_err(|e| e.to_string())?;
            presenter.success(&format!("Created speaking test {}", test.id));
            Ok(())
        }
        TestsAction::Remove { id } => {
            require_admin(session)?;
            catalog
                .delete_speaking_test(&id)
                .await
                .map_err(|e| e.to_string())?;
            presenter.success(&format!("Removed speaking test {}", id));
            Ok(())
        }
    }
}

async fn list_speaking<C: TestCatalog>(
    catalog: &C,
    presenter: &Presenter,
) -> Result<(), String> {
    let tests = catalog.speaking_tests().await.map_err(|e| e.to_string())?;

    if tests.is_empty() {
        presenter.info("No speaking tests available");
        return Ok(());
    }

    for test in tests {
        presenter.catalog_entry(&test.id, &test.question);
    }
    Ok(())
}

async fn list_listening<C: TestCatalog>(
    catalog: &C,
    presenter: &Presenter,
) -> Result<(), String> {
    let tests = catalog.listening_tests().await.map_err(|e| e.to_string())?;

    if tests.is_empty() {
        presenter.info("No listening tests available");
        return Ok(());
    }

    for test in tests {
        presenter.catalog_entry(&test.id, &test.question);
    }
    Ok(())
}

fn require_admin(session: &AuthSession) -> Result<(), String> {
    if session.is_admin() {
        Ok(())
    } else {
        Err("This action requires an admin account".to_string())
    }
}
