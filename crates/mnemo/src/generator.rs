//! Client for the text-generation service.
//!
//! The service is a black box behind the [`Generator`] trait: the pipeline
//! only sends a prompt and receives free-form text. Everything about
//! validating that text lives in [`crate::enrichment`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::GeneratorConfig;
use crate::enrichment::SYSTEM_PROMPT;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum GeneratorError {
  #[error("request to the model service failed: {0}")]
  Http(#[from] reqwest::Error),
  #[error("model service returned {status}: {body}")]
  Api { status: StatusCode, body: String },
  #[error("model reply contained no choices")]
  EmptyReply,
}

/// Seam between the pipeline and the generation service, so batches can run
/// against a scripted fake in tests.
#[async_trait]
pub trait Generator {
  /// Send one prompt, return the raw reply text.
  async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// Chat-completions client (OpenAI wire format).
pub struct OpenAiGenerator {
  client: Client,
  url: String,
  api_key: String,
  model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
  model: &'a str,
  messages: Vec<ChatMessage<'a>>,
  temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
  role: &'a str,
  content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
  choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
  message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
  content: String,
}

impl OpenAiGenerator {
  pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(Self {
      client,
      url: config.url.clone(),
      api_key: config.api_key.clone(),
      model: config.model.clone(),
    })
  }
}

#[async_trait]
impl Generator for OpenAiGenerator {
  async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
    let request = ChatRequest {
      model: &self.model,
      messages: vec![
        ChatMessage { role: "system", content: SYSTEM_PROMPT },
        ChatMessage { role: "user", content: prompt },
      ],
      temperature: TEMPERATURE,
    };

    tracing::debug!(model = %self.model, "sending generation request");

    let response =
      self.client.post(&self.url).bearer_auth(&self.api_key).json(&request).send().await?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      tracing::warn!(%status, "model service rejected the request");
      return Err(GeneratorError::Api { status, body });
    }

    let reply: ChatResponse = response.json().await?;
    let choice = reply.choices.into_iter().next().ok_or(GeneratorError::EmptyReply)?;
    Ok(choice.message.content)
  }
}
