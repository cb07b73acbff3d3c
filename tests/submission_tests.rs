//! Submission fallback integration tests
//!
//! Exercises the delivery route order against a local mock server:
//! short-circuit on first success, fallback across endpoints, the
//! text-only placeholder resort, and exhaustion.

use std::sync::{Arc, Mutex};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ielts_practice::application::ports::{ResponseSubmitter, SubmitError};
use ielts_practice::domain::audio::{AudioBlob, AudioMimeType};
use ielts_practice::domain::submission::{DeliveryRoute, DraftResponse};
use ielts_practice::infrastructure::FallbackSubmitter;

fn audio_draft() -> DraftResponse {
    // Payload bytes are opaque to the fallback logic
    DraftResponse::new().with_audio(AudioBlob::new(vec![0u8; 64], AudioMimeType::Wav))
}

/// Collects failed routes so tests can assert on attempt order
fn route_collector() -> (
    Arc<Mutex<Vec<DeliveryRoute>>>,
    ielts_practice::application::ports::AttemptCallback,
) {
    let seen: Arc<Mutex<Vec<DeliveryRoute>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_cb = Arc::clone(&seen);
    let callback: ielts_practice::application::ports::AttemptCallback =
        Arc::new(move |route, _err| {
            seen_cb.lock().unwrap().push(route);
        });
    (seen, callback)
}

#[tokio::test]
async fn first_route_success_short_circuits() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/speaking-tests/7/audio-response"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "r-100",
            "message": "Response saved"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/upload-audio"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let submitter = FallbackSubmitter::new(server.uri());
    let (seen, callback) = route_collector();

    let receipt = submitter
        .submit("7", &audio_draft(), Some(callback))
        .await
        .unwrap();

    assert_eq!(receipt.route, DeliveryRoute::SpeakingTestAudio);
    assert_eq!(receipt.response_id.as_deref(), Some("r-100"));
    assert_eq!(receipt.message.as_deref(), Some("Response saved"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn falls_back_across_endpoints_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/speaking-tests/7/audio-response"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/upload-audio"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/submit-audio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "id": "r-2" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let submitter = FallbackSubmitter::new(server.uri());
    let (seen, callback) = route_collector();

    let receipt = submitter
        .submit("7", &audio_draft(), Some(callback))
        .await
        .unwrap();

    assert_eq!(receipt.route, DeliveryRoute::SubmitAudio);
    assert_eq!(receipt.response_id.as_deref(), Some("r-2"));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![DeliveryRoute::SpeakingTestAudio, DeliveryRoute::UploadAudio]
    );
}

#[tokio::test]
async fn audio_only_exhaustion_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let submitter = FallbackSubmitter::new(server.uri());
    let (seen, callback) = route_collector();

    let err = submitter
        .submit("7", &audio_draft(), Some(callback))
        .await
        .unwrap_err();

    match err {
        SubmitError::AllRoutesFailed { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("Expected AllRoutesFailed, got: {:?}", other),
    }
    assert_eq!(seen.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn text_only_ends_with_placeholder_audio_resort() {
    let server = MockServer::start().await;

    // The text-only chain hits /api/upload-audio twice: once with the
    // text-only form, once with the placeholder audio part. Budgeted
    // mounts distinguish the two calls.
    Mock::given(method("POST"))
        .and(path("/api/upload-audio"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/submit-audio"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/upload-audio"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let draft = DraftResponse::new().with_text("Written answer only");
    let submitter = FallbackSubmitter::new(server.uri());
    let (seen, callback) = route_collector();

    let receipt = submitter
        .submit("7", &draft, Some(callback))
        .await
        .unwrap();

    assert_eq!(receipt.route, DeliveryRoute::UploadWithPlaceholderAudio);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![DeliveryRoute::UploadTextOnly, DeliveryRoute::SubmitTextOnly]
    );
}

#[tokio::test]
async fn audio_with_text_falls_through_all_six_routes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let draft = audio_draft().with_text("also written");
    let submitter = FallbackSubmitter::new(server.uri());
    let (seen, callback) = route_collector();

    let err = submitter
        .submit("7", &draft, Some(callback))
        .await
        .unwrap_err();

    match err {
        SubmitError::AllRoutesFailed { attempts, .. } => assert_eq!(attempts, 6),
        other => panic!("Expected AllRoutesFailed, got: {:?}", other),
    }
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            DeliveryRoute::SpeakingTestAudio,
            DeliveryRoute::UploadAudio,
            DeliveryRoute::SubmitAudio,
            DeliveryRoute::UploadTextOnly,
            DeliveryRoute::SubmitTextOnly,
            DeliveryRoute::UploadWithPlaceholderAudio,
        ]
    );
}

#[tokio::test]
async fn empty_draft_never_reaches_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let submitter = FallbackSubmitter::new(server.uri());
    let err = submitter
        .submit("7", &DraftResponse::new(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Validation(_)));
}
