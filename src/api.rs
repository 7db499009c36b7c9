//! Grok API client.
//!
//! One blocking round trip per call: JSON body `{"prompt", "model"}` to
//! `{base_url}/chat`, bearer-token auth, `response` field extracted from the
//! JSON reply. No retries; every failure mode maps to an [`ApiError`] so
//! callers can uniformly check whether the call succeeded.

use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Errors from a single API round trip.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API request failed with status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("Malformed API response: missing `response` field")]
    MalformedResponse,
}

/// Client for the Grok chat endpoint.
pub struct Client {
    http: HttpClient,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    prompt: &'a str,
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: Option<String>,
}

impl Client {
    /// Create a client from resolved configuration.
    pub fn new(config: &crate::config::Config) -> Result<Self, ApiError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(300))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the response text verbatim.
    ///
    /// Shows a transient spinner for the duration of the call; the spinner is
    /// presentation only and is cleared before returning.
    pub async fn complete(&self, prompt: &str) -> Result<String, ApiError> {
        let spinner = processing_spinner();
        let result = self.complete_inner(prompt).await;
        spinner.finish_and_clear();
        result
    }

    async fn complete_inner(&self, prompt: &str) -> Result<String, ApiError> {
        debug!(
            prompt_len = prompt.len(),
            model = %self.model,
            "dispatching request"
        );

        let request = ChatRequest {
            prompt,
            model: &self.model,
        };

        let response = self
            .http
            .post(format!("{}/chat", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }

        let body: ChatResponse = response.json().await?;
        debug!(status = %status, "request completed");

        body.response.ok_or(ApiError::MalformedResponse)
    }
}

fn processing_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or(ProgressStyle::default_spinner()),
    );
    spinner.set_message("Processing with Grok 4...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
