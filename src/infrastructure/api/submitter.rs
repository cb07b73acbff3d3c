//! Fallback submission over an ordered list of delivery routes
//!
//! The server deployment varies in which upload endpoints it exposes, so a
//! submission walks a fixed route list and stops at the first endpoint that
//! accepts the payload. Route failures are reported through the attempt
//! callback; the caller only sees an error once every route is exhausted.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::application::ports::{AttemptCallback, ResponseSubmitter, SubmitError};
use crate::domain::submission::{DeliveryRoute, DraftResponse, SubmissionReceipt};

/// Submitter that posts multipart forms to the practice server, walking
/// the delivery route list in order.
pub struct FallbackSubmitter {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl FallbackSubmitter {
    /// Create a submitter for the given server
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            client: reqwest::Client::new(),
        }
    }

    /// Attach a bearer token to all submission requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The ordered routes for a draft. Audio drafts try the three audio
    /// endpoints first; drafts carrying text fall through to the text-only
    /// chain, ending with the placeholder-audio resort.
    fn routes_for(draft: &DraftResponse) -> Vec<DeliveryRoute> {
        let mut routes = Vec::new();

        if draft.has_audio() {
            routes.push(DeliveryRoute::SpeakingTestAudio);
            routes.push(DeliveryRoute::UploadAudio);
            routes.push(DeliveryRoute::SubmitAudio);
        }

        if draft.has_text() || !draft.has_audio() {
            routes.push(DeliveryRoute::UploadTextOnly);
            routes.push(DeliveryRoute::SubmitTextOnly);
            routes.push(DeliveryRoute::UploadWithPlaceholderAudio);
        }

        routes
    }

    fn route_path(route: DeliveryRoute, test_id: &str) -> String {
        match route {
            DeliveryRoute::SpeakingTestAudio => {
                format!("/api/speaking-tests/{}/audio-response", test_id)
            }
            DeliveryRoute::UploadAudio
            | DeliveryRoute::UploadTextOnly
            | DeliveryRoute::UploadWithPlaceholderAudio => "/api/upload-audio".to_string(),
            DeliveryRoute::SubmitAudio | DeliveryRoute::SubmitTextOnly => {
                "/api/submit-audio".to_string()
            }
        }
    }

    /// Build the multipart form this route expects
    fn build_form(
        route: DeliveryRoute,
        test_id: &str,
        draft: &DraftResponse,
    ) -> Result<Form, String> {
        let mut form = Form::new();

        match route {
            DeliveryRoute::SpeakingTestAudio
            | DeliveryRoute::UploadAudio
            | DeliveryRoute::SubmitAudio => {
                let audio = draft.audio().ok_or("Draft has no audio")?;
                let part = Part::bytes(audio.data().to_vec())
                    .file_name(format!("recording_{}.{}", test_id, audio.mime_type().extension()))
                    .mime_str(audio.mime_type().as_str())
                    .map_err(|e| e.to_string())?;
                form = form.part("audio", part);

                if let Some(text) = draft.text() {
                    form = form.text("response", text.to_string());
                }
            }

            DeliveryRoute::UploadTextOnly | DeliveryRoute::SubmitTextOnly => {
                let text = draft.text().unwrap_or_default();
                form = form
                    .text("response", text.to_string())
                    .text("text_only", "true");
            }

            DeliveryRoute::UploadWithPlaceholderAudio => {
                let text = draft.text().unwrap_or_default();
                // Zero-byte audio part satisfies servers that require one
                let part = Part::bytes(Vec::new())
                    .file_name(format!("empty_audio_{}.webm", test_id))
                    .mime_str("audio/webm")
                    .map_err(|e| e.to_string())?;
                form = form.text("response", text.to_string()).part("audio", part);
            }
        }

        Ok(form)
    }

    /// Post one route and turn a 2xx response into a receipt
    async fn post_route(
        &self,
        route: DeliveryRoute,
        test_id: &str,
        draft: &DraftResponse,
    ) -> Result<SubmissionReceipt, String> {
        let form = Self::build_form(route, test_id, draft)?;
        let url = format!("{}{}", self.base_url, Self::route_path(route, test_id));

        let mut builder = self.client.post(&url).multipart(form);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("{} returned {}", url, status));
        }

        let mut receipt = SubmissionReceipt::new(route);
        if let Ok(body) = response.json::<serde_json::Value>().await {
            let id = body
                .pointer("/data/id")
                .or_else(|| body.get("id"))
                .and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
            if let Some(id) = id {
                receipt = receipt.with_response_id(id);
            }
            if let Some(message) = body.get("message").and_then(|v| v.as_str()) {
                receipt = receipt.with_message(message);
            }
        }

        Ok(receipt)
    }
}

#[async_trait]
impl ResponseSubmitter for FallbackSubmitter {
    async fn submit(
        &self,
        test_id: &str,
        draft: &DraftResponse,
        on_attempt_failed: Option<AttemptCallback>,
    ) -> Result<SubmissionReceipt, SubmitError> {
        draft.validate()?;

        let routes = Self::routes_for(draft);
        let attempts = routes.len();
        let mut last_error = String::new();

        for route in routes {
            match self.post_route(route, test_id, draft).await {
                Ok(receipt) => return Ok(receipt),
                Err(err) => {
                    if let Some(callback) = &on_attempt_failed {
                        callback(route, &err);
                    }
                    last_error = err;
                }
            }
        }

        Err(SubmitError::AllRoutesFailed {
            attempts,
            last_error,
        })
    }
}
