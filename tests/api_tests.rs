//! API client integration tests against a local mock server

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ielts_practice::application::ports::{ApiError, Authenticator, TestCatalog};
use ielts_practice::domain::auth::Role;
use ielts_practice::infrastructure::ApiClient;

#[tokio::test]
async fn login_returns_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "email": "taker@example.com",
            "token": "jwt-token-1",
            "role": "test_taker"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let session = client.login("taker@example.com", "secret").await.unwrap();

    assert_eq!(session.email, "taker@example.com");
    assert_eq!(session.token, "jwt-token-1");
    assert_eq!(session.role, Role::TestTaker);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "Invalid email or password"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let err = client.login("taker@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[tokio::test]
async fn speaking_tests_decode_enveloped_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/speaking-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "id": "1", "question": "Describe your hometown" },
                { "id": "2", "question": "Talk about a book you enjoyed", "createdAt": "2024-03-01" }
            ]
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let tests = client.speaking_tests().await.unwrap();

    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0].question, "Describe your hometown");
    assert_eq!(tests[1].created_at.as_deref(), Some("2024-03-01"));
}

#[tokio::test]
async fn listening_tests_decode_bare_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/listening-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "id": "5", "question": "Listen and summarize", "audio_file": "clip5.mp3" }
        ])))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri());
    let tests = client.listening_tests().await.unwrap();

    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].audio_file.as_deref(), Some("clip5.mp3"));
}

#[tokio::test]
async fn bearer_token_is_attached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/speaking-tests"))
        .and(header("authorization", "Bearer jwt-token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).with_token("jwt-token-1");
    let tests = client.speaking_tests().await.unwrap();
    assert!(tests.is_empty());
}

#[tokio::test]
async fn server_error_carries_the_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/speaking-tests/9"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "message": "Admin access required"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).with_token("jwt");
    let err = client.delete_speaking_test("9").await.unwrap_err();

    match err {
        ApiError::Server(message) => assert_eq!(message, "Admin access required"),
        other => panic!("Expected Server error, got: {:?}", other),
    }
}

#[tokio::test]
async fn create_speaking_test_decodes_enveloped_response() {
    let server = MockServer::start().await;

    // Create responses come back wrapped in the data envelope
    Mock::given(method("POST"))
        .and(path("/api/speaking-tests"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "data": {
                "id": "10",
                "question": "Describe a tradition"
            }
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).with_token("jwt");
    let test = client.create_speaking_test("Describe a tradition").await.unwrap();

    assert_eq!(test.id, "10");
    assert_eq!(test.question, "Describe a tradition");
}

#[tokio::test]
async fn create_speaking_test_accepts_bare_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/speaking-tests"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "11",
            "question": "Describe a festival"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(server.uri()).with_token("jwt");
    let test = client.create_speaking_test("Describe a festival").await.unwrap();

    assert_eq!(test.id, "11");
}
