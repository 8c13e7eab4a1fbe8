use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::ModelBackend;
use crate::config::{API_BASE_URL, API_KEY_ENV, CHAT_MODEL, EMBEDDING_MODEL, REQUEST_TIMEOUT_SECS};
use crate::error::{RagError, Result};

/// Client for the Generative Language REST API (`embedContent` and
/// `generateContent`).
pub struct GeminiClient {
    client: HttpClient,
    api_key: String,
    base_url: String,
    embed_model: String,
    chat_model: String,
}

impl GeminiClient {
    /// Build a client with the default models, reading the API key from
    /// [`API_KEY_ENV`].
    ///
    /// Fails with [`RagError::Configuration`] before any network access when
    /// the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(&api_key, EMBEDDING_MODEL, CHAT_MODEL)
    }

    pub fn new(api_key: &str, embed_model: &str, chat_model: &str) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(RagError::Configuration(format!(
                "missing {API_KEY_ENV} environment variable"
            )));
        }
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| RagError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: API_BASE_URL.to_string(),
            embed_model: embed_model.to_string(),
            chat_model: chat_model.to_string(),
        })
    }

    #[cfg(test)]
    #[must_use]
    fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn embed_model(&self) -> &str {
        &self.embed_model
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{model}:{method}", self.base_url)
    }

    /// POST `body` and return the raw response body, or the API's error
    /// message for non-success statuses.
    fn post<T: Serialize>(&self, url: &str, body: &T) -> std::result::Result<String, String> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .map_err(|e| format!("request failed: {e}"))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| format!("failed to read response body: {e}"))?;
        if !status.is_success() {
            return Err(describe_failure(status, &text));
        }
        Ok(text)
    }
}

impl ModelBackend for GeminiClient {
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = self.endpoint(&self.embed_model, "embedContent");
        let request = EmbedRequest {
            model: format!("models/{}", self.embed_model),
            content: Content::user_text(text),
        };
        debug!(model = %self.embed_model, text_len = text.len(), "Embedding text");
        let body = self.post(&url, &request).map_err(RagError::EmbeddingService)?;
        parse_embed_response(&body)
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        let url = self.endpoint(&self.chat_model, "generateContent");
        let request = GenerateRequest {
            contents: vec![Content::user_text(prompt)],
        };
        debug!(model = %self.chat_model, prompt_len = prompt.len(), "Generating answer");
        let body = self.post(&url, &request).map_err(RagError::GenerationService)?;
        parse_generate_response(&body)
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest {
    model: String,
    content: Content,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbeddingValues,
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => format!("{status}: {}", err.error.message),
        Err(_) => format!("{status}"),
    }
}

fn parse_embed_response(body: &str) -> Result<Vec<f32>> {
    let response: EmbedResponse = serde_json::from_str(body)
        .map_err(|e| RagError::EmbeddingService(format!("malformed embedding response: {e}")))?;
    let values = response.embedding.values;
    if values.is_empty() {
        return Err(RagError::EmbeddingService(
            "embedding response contained no values".to_string(),
        ));
    }
    Ok(values)
}

/// Concatenate the text parts of the first candidate and trim the result.
fn parse_generate_response(body: &str) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| RagError::GenerationService(format!("malformed generation response: {e}")))?;
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| RagError::GenerationService("response contained no candidates".into()))?;
    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        return Err(RagError::GenerationService(
            "candidate contained no text".to_string(),
        ));
    }
    Ok(texts.concat().trim().to_string())
}
