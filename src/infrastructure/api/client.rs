//! HTTP client for the practice server API
//!
//! Covers authentication and the speaking/listening test catalog. Responses
//! arrive either bare or wrapped in a `{"data": ...}` envelope depending on
//! the endpoint, so catalog decoding tries both shapes.

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{ApiError, Authenticator, TestCatalog};
use crate::domain::auth::AuthSession;
use crate::domain::catalog::{ListeningTest, SpeakingTest};

/// Envelope used by list endpoints
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Error body returned by the server on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the practice server REST API.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a client for the given server, without credentials
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a bearer token to all subsequent requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.get(self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.delete(self.url(path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Extract the server's error message from a failed response
    async fn server_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("Server returned {}", status));
        ApiError::Server(message)
    }

    /// Decode a list that may or may not be wrapped in a data envelope
    async fn decode_list<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if let Ok(envelope) = serde_json::from_str::<DataEnvelope<Vec<T>>>(&body) {
            return Ok(envelope.data);
        }
        serde_json::from_str::<Vec<T>>(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Decode a single entity that may or may not be wrapped in a data
    /// envelope. Create endpoints wrap, older deployments do not.
    async fn decode_item<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if let Ok(envelope) = serde_json::from_str::<DataEnvelope<T>>(&body) {
            return Ok(envelope.data);
        }
        serde_json::from_str::<T>(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl Authenticator for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let response = self
            .post("/api/users/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::BAD_REQUEST
        {
            return Err(ApiError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(Self::server_error(response).await);
        }

        response
            .json::<AuthSession>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TestCatalog for ApiClient {
    async fn speaking_tests(&self) -> Result<Vec<SpeakingTest>, ApiError> {
        let response = self
            .get("/api/speaking-tests")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Self::decode_list(response).await
    }

    async fn listening_tests(&self) -> Result<Vec<ListeningTest>, ApiError> {
        let response = self
            .get("/api/listening-tests")
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Self::decode_list(response).await
    }

    async fn create_speaking_test(&self, question: &str) -> Result<SpeakingTest, ApiError> {
        let response = self
            .post("/api/speaking-tests")
            .json(&serde_json::json!({ "question": question }))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Self::decode_item(response).await
    }

    async fn delete_speaking_test(&self, test_id: &str) -> Result<(), ApiError> {
        let response = self
            .delete(&format!("/api/speaking-tests/{}", test_id))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.url("/api/users/login"), "http://localhost:5000/api/users/login");
    }

    #[test]
    fn envelope_and_bare_lists_both_decode() {
        let enveloped = r#"{"data":[{"id":"t1","question":"Describe a city"}]}"#;
        let bare = r#"[{"id":"t1","question":"Describe a city"}]"#;

        let from_env: DataEnvelope<Vec<SpeakingTest>> = serde_json::from_str(enveloped).unwrap();
        let from_bare: Vec<SpeakingTest> = serde_json::from_str(bare).unwrap();

        assert_eq!(from_env.data[0].id, "t1");
        assert_eq!(from_bare[0].question, "Describe a city");
    }

    #[test]
    fn enveloped_and_bare_entities_both_decode() {
        let enveloped = r#"{"data":{"id":"t2","question":"Describe a festival"}}"#;
        let bare = r#"{"id":"t2","question":"Describe a festival"}"#;

        let from_env: DataEnvelope<SpeakingTest> = serde_json::from_str(enveloped).unwrap();
        let from_bare: SpeakingTest = serde_json::from_str(bare).unwrap();

        assert_eq!(from_env.data.id, "t2");
        assert_eq!(from_bare.question, "Describe a festival");
    }
}
