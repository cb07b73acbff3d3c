//! IELTS Practice CLI entry point

use std::process::ExitCode;

use clap::Parser;

use ielts_practice::application::SubmitResponseUseCase;
use ielts_practice::cli::{
    app::{load_merged_config, require_session, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    auth_cmd::{handle_login, handle_logout, handle_whoami},
    config_cmd::handle_config_command,
    respond_cmd::{run_respond, RespondOptions},
    tests_cmd::handle_tests_command,
    Presenter,
};
use ielts_practice::domain::config::AppConfig;
use ielts_practice::domain::recording::Duration;
use ielts_practice::infrastructure::{
    ApiClient, CpalRecorder, FallbackSubmitter, JsonSessionStore, XdgConfigStore,
};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut presenter = Presenter::new();

    // Build CLI config from args
    let cli_config = AppConfig {
        server_url: cli.server.clone(),
        ..Default::default()
    };
    let config = load_merged_config(cli_config).await;
    let server_url = config.server_url_or_default();

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }

        Commands::Login { email, password } => {
            let client = ApiClient::new(&server_url);
            let store = JsonSessionStore::new();
            if let Err(e) = handle_login(&client, &store, &presenter, email, password).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }

        Commands::Logout => {
            let store = JsonSessionStore::new();
            if let Err(e) = handle_logout(&store, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }

        Commands::Whoami => {
            let store = JsonSessionStore::new();
            if let Err(e) = handle_whoami(&store, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }

        Commands::Tests { action } => {
            let session = match require_session().await {
                Ok(session) => session,
                Err(e) => {
                    presenter.error(&e);
                    return ExitCode::from(EXIT_ERROR);
                }
            };

            let catalog = ApiClient::new(&server_url).with_token(&session.token);
            if let Err(e) = handle_tests_command(action, &catalog, &session, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }

        Commands::Respond {
            test_id,
            text,
            text_only,
            max_duration,
            prep_time,
            yes,
        } => {
            // Usage errors surface before auth or microphone access
            let max_duration = match max_duration.or(config.max_duration.clone()) {
                Some(s) => match s.parse::<Duration>() {
                    Ok(d) => d,
                    Err(e) => {
                        presenter.error(&format!("Invalid max-duration: {}", e));
                        return ExitCode::from(EXIT_USAGE_ERROR);
                    }
                },
                None => Duration::default_max_response(),
            };

            let prep_time = match prep_time.or(config.prep_time.clone()) {
                Some(s) => match s.parse::<Duration>() {
                    Ok(d) => Some(d),
                    Err(e) => {
                        presenter.error(&format!("Invalid prep-time: {}", e));
                        return ExitCode::from(EXIT_USAGE_ERROR);
                    }
                },
                None => None,
            };

            let session = match require_session().await {
                Ok(session) => session,
                Err(e) => {
                    presenter.error(&e);
                    return ExitCode::from(EXIT_ERROR);
                }
            };

            let recorder = CpalRecorder::new();
            let submitter = FallbackSubmitter::new(&server_url).with_token(&session.token);
            let use_case = SubmitResponseUseCase::new(submitter);

            let options = RespondOptions {
                test_id,
                text,
                text_only,
                max_duration,
                prep_time,
                skip_review: yes,
            };

            if let Err(e) = run_respond(options, &recorder, &use_case, &mut presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
    }
}
