//! [`GeminiClient`] — HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use roster_core::generate::TextGenerator;
use serde::Deserialize;

use crate::{
  Error, Result,
  types::{GenerateRequest, GenerateResponse},
};

/// Connection settings for the Gemini API.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  pub api_key:  String,
  #[serde(default = "default_model")]
  pub model:    String,
  #[serde(default = "default_base_url")]
  pub base_url: String,
}

pub fn default_model() -> String { "gemini-pro".to_string() }

pub fn default_base_url() -> String {
  "https://generativelanguage.googleapis.com".to_string()
}

impl GeminiConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key:  api_key.into(),
      model:    default_model(),
      base_url: default_base_url(),
    }
  }
}

/// Async client for Gemini text generation.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiClient {
  client: reqwest::Client,
  config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("GeminiClient")
      .field("model", &self.config.model)
      .field("base_url", &self.config.base_url)
      .finish_non_exhaustive()
  }
}

impl GeminiClient {
  pub fn new(config: GeminiConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  /// Send `prompt` and return the first candidate's text.
  pub async fn generate_text(&self, prompt: &str) -> Result<String> {
    let resp = self
      .client
      .post(self.url())
      .header("x-goog-api-key", &self.config.api_key)
      .json(&GenerateRequest::text(prompt))
      .send()
      .await?;

    let status = resp.status();
    tracing::debug!(%status, model = %self.config.model, "gemini response received");
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Status { status, body });
    }

    let body: GenerateResponse = resp.json().await?;
    if let Some(reason) = body
      .prompt_feedback
      .as_ref()
      .and_then(|f| f.block_reason.clone())
    {
      return Err(Error::Blocked(reason));
    }
    match body.first_text() {
      Some(text) => Ok(text),
      None => match body.candidates.first().and_then(|c| c.finish_reason.clone()) {
        Some(reason) if reason == "SAFETY" => Err(Error::Blocked(reason)),
        _ => Err(Error::Empty),
      },
    }
  }
}

impl TextGenerator for GeminiClient {
  async fn generate(&self, prompt: &str) -> roster_core::Result<String> {
    self.generate_text(prompt).await.map_err(Into::into)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
  };

  use super::*;

  const PATH: &str = "/v1beta/models/gemini-pro:generateContent";

  async fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig {
      api_key:  "test-key".into(),
      model:    default_model(),
      base_url: server.uri(),
    })
    .unwrap()
  }

  #[tokio::test]
  async fn returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(PATH))
      .and(header("x-goog-api-key", "test-key"))
      .and(body_partial_json(json!({
        "contents": [{ "parts": [{ "text": "hello" }] }]
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
          "content": { "parts": [{ "text": "Hi " }, { "text": "there" }] },
          "finishReason": "STOP"
        }]
      })))
      .expect(1)
      .mount(&server)
      .await;

    let text = client_for(&server).await.generate("hello").await.unwrap();
    assert_eq!(text, "Hi there");
  }

  #[tokio::test]
  async fn sends_all_safety_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path(PATH))
      .and(body_partial_json(json!({
        "safetySettings": [
          { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
          { "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
          { "category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" },
          { "category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_MEDIUM_AND_ABOVE" }
        ]
      })))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
      })))
      .mount(&server)
      .await;

    assert_eq!(client_for(&server).await.generate_text("x").await.unwrap(), "ok");
  }

  #[tokio::test]
  async fn upstream_error_status_is_generation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
      .mount(&server)
      .await;

    let client = client_for(&server).await;
    let err = client.generate_text("x").await.unwrap_err();
    assert!(matches!(err, Error::Status { status, .. } if status.as_u16() == 403));

    let err = client.generate("x").await.unwrap_err();
    assert!(matches!(err, roster_core::Error::Generation(_)));
  }

  #[tokio::test]
  async fn blocked_prompt_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
        "promptFeedback": { "blockReason": "SAFETY" }
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).await.generate_text("x").await.unwrap_err();
    assert!(matches!(err, Error::Blocked(r) if r == "SAFETY"));
  }

  #[tokio::test]
  async fn empty_candidates_are_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
      .mount(&server)
      .await;

    let err = client_for(&server).await.generate_text("x").await.unwrap_err();
    assert!(matches!(err, Error::Empty));
  }

  #[tokio::test]
  async fn unreachable_server_is_http_error() {
    let client = GeminiClient::new(GeminiConfig {
      api_key:  "k".into(),
      model:    default_model(),
      base_url: "http://127.0.0.1:9".into(),
    })
    .unwrap();
    let err = client.generate_text("x").await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
  }
}
