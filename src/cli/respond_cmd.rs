//! Respond command: record, review, and submit one answer

use std::sync::Arc;

use colored::*;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration as TokioDuration};

use crate::application::ports::{ResponseSubmitter, VoiceRecorder};
use crate::application::{SubmitResponseCallbacks, SubmitResponseInput, SubmitResponseUseCase};
use crate::domain::recording::Duration;
use crate::domain::session::{PracticeTimer, ResponseSession};

use super::presenter::Presenter;

/// Parsed respond options
#[derive(Debug, Clone)]
pub struct RespondOptions {
    pub test_id: String,
    pub text: Option<String>,
    pub text_only: bool,
    pub max_duration: Duration,
    pub prep_time: Option<Duration>,
    pub skip_review: bool,
}

/// What the user chose at the review prompt
enum ReviewChoice {
    Submit,
    ReRecord,
    Discard,
}

/// Run the respond workflow: optional prep countdown, recording with a
/// live timer, a review prompt, then submission with endpoint fallback.
pub async fn run_respond<R, S>(
    options: RespondOptions,
    recorder: &R,
    use_case: &SubmitResponseUseCase<S>,
    presenter: &mut Presenter,
) -> Result<(), String>
where
    R: VoiceRecorder,
    S: ResponseSubmitter,
{
    let mut session = ResponseSession::new();
    let mut stdin_lines = spawn_stdin_lines();

    if !options.text_only {
        loop {
            if let Some(prep) = options.prep_time {
                run_prep_countdown(prep, &mut stdin_lines, presenter).await;
            }

            record_once(
                &mut session,
                recorder,
                options.max_duration,
                &mut stdin_lines,
                presenter,
            )
            .await?;

            if options.skip_review {
                break;
            }

            match review_prompt(&mut stdin_lines).await {
                ReviewChoice::Submit => break,
                ReviewChoice::ReRecord => {
                    presenter.info("Recording again");
                    continue;
                }
                ReviewChoice::Discard => {
                    session.delete_recording().map_err(|e| e.to_string())?;
                    presenter.info("Recording discarded, nothing submitted");
                    return Ok(());
                }
            }
        }
    }

    submit(&mut session, options, use_case, presenter).await
}

/// Countdown before recording starts; Enter skips the wait
async fn run_prep_countdown(
    prep: Duration,
    stdin_lines: &mut mpsc::UnboundedReceiver<String>,
    presenter: &mut Presenter,
) {
    let mut timer = PracticeTimer::new(prep);
    presenter.start_spinner(&format!(
        "Preparation time {} (press Enter to start now)",
        timer
    ));

    let mut ticker = interval(TokioDuration::from_millis(250));

    while !timer.is_expired() {
        tokio::select! {
            _ = ticker.tick() => {
                timer.tick(250);
                presenter.update_spinner(&format!(
                    "Preparation time {} (press Enter to start now)",
                    timer
                ));
            }
            line = stdin_lines.recv() => {
                if line.is_some() {
                    break;
                }
            }
        }
    }

    presenter.stop_spinner();
}

/// One recording pass: start the microphone, show progress until Enter
/// or the answer window closes, then store the capture on the session
async fn record_once<R: VoiceRecorder>(
    session: &mut ResponseSession,
    recorder: &R,
    max_duration: Duration,
    stdin_lines: &mut mpsc::UnboundedReceiver<String>,
    presenter: &mut Presenter,
) -> Result<(), String> {
    session.start_recording().map_err(|e| e.to_string())?;
    recorder.start().await.map_err(|e| e.to_string())?;

    presenter.show_recording_progress("Recording...");

    let total_ms = max_duration.as_millis();
    let mut ticker = interval(TokioDuration::from_millis(200));

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed = recorder.elapsed_ms();
                presenter.update_recording_progress(elapsed, total_ms);
                if elapsed >= total_ms {
                    break;
                }
            }
            _ = stdin_lines.recv() => {
                break;
            }
            _ = tokio::signal::ctrl_c() => {
                recorder.cancel().await.map_err(|e| e.to_string())?;
                presenter.spinner_fail("Recording cancelled");
                return Err("Cancelled".to_string());
            }
        }
    }

    let elapsed_secs = recorder.elapsed_ms() / 1000;
    let audio = recorder.stop().await.map_err(|e| e.to_string())?;
    let size = audio.human_readable_size();

    session
        .stop_recording(audio, elapsed_secs)
        .map_err(|e| e.to_string())?;

    presenter.spinner_success(&format!("Recorded {}s ({})", elapsed_secs, size));
    Ok(())
}

/// Ask what to do with the recording. A closed stdin submits, so piped
/// invocations behave like --yes.
async fn review_prompt(stdin_lines: &mut mpsc::UnboundedReceiver<String>) -> ReviewChoice {
    loop {
        eprint!("{} [s]ubmit  [r]e-record  [d]iscard: ", "?".cyan());

        let line = match stdin_lines.recv().await {
            Some(line) => line,
            None => return ReviewChoice::Submit,
        };

        match line.trim().to_lowercase().as_str() {
            "" | "s" | "submit" => return ReviewChoice::Submit,
            "r" | "re-record" => return ReviewChoice::ReRecord,
            "d" | "discard" => return ReviewChoice::Discard,
            other => eprintln!("Unrecognized choice '{}'", other),
        }
    }
}

/// Deliver the draft and report the receipt
async fn submit<S: ResponseSubmitter>(
    session: &mut ResponseSession,
    options: RespondOptions,
    use_case: &SubmitResponseUseCase<S>,
    presenter: &mut Presenter,
) -> Result<(), String> {
    let input = SubmitResponseInput {
        test_id: options.test_id.clone(),
        text: options.text.clone(),
    };

    // Per-route failures are progress reporting, not errors
    let callbacks = SubmitResponseCallbacks {
        on_submit_start: Some(Box::new(|| {
            eprintln!("{} Submitting...", "⠋");
        })),
        on_attempt_failed: Some(Arc::new(|route, err| {
            eprintln!("{} {} failed: {}", "⚠".yellow(), route, err);
        })),
    };

    let receipt = use_case
        .execute(session, input, callbacks)
        .await
        .map_err(|e| e.to_string())?;

    presenter.success(&format!("Response submitted via {}", receipt.route));
    if let Some(id) = &receipt.response_id {
        presenter.key_value("response id", id);
    }
    if let Some(message) = &receipt.message {
        presenter.info(message);
    }

    Ok(())
}

/// Forward stdin lines over a channel so the countdown, the recording
/// loop, and the review prompt can share one reader
fn spawn_stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        use std::io::BufRead;
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    rx
}
