//! External text generator adapter
//!
//! The only place that talks to the optional text-generation endpoint. The
//! contract is narrow: send one prompt, get text back or an error. Callers
//! treat every error as "use the offline coach instead".

use crate::config::GeneratorConfig;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Top-level keys that may carry the generated text, in lookup order
const TEXT_KEYS: [&str; 5] = ["output", "text", "response", "completion", "result"];
/// Keys checked when the top-level value is itself an object
const NESTED_TEXT_KEYS: [&str; 4] = ["text", "content", "message", "output"];

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generator returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unrecognized response shape")]
    UnrecognizedShape,

    #[error("Generator returned empty text")]
    EmptyText,
}

/// A source of generated replies
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a reply for a prompt
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

/// Generator backed by a JSON-over-HTTP endpoint
///
/// Sends `{"prompt": ..., "model": ..., ...extra}` and reads the reply from
/// one of a few conventional response shapes. One attempt per prompt.
pub struct HttpGenerator {
    client: Client,
    url: String,
    api_key: Option<SecretString>,
    model: Option<String>,
    extra: HashMap<String, String>,
}

impl HttpGenerator {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<SecretString>,
        model: Option<String>,
        extra: HashMap<String, String>,
        timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url: url.into(),
            api_key,
            model,
            extra,
        })
    }

    /// Build a generator from configuration; `None` when no endpoint is set
    pub fn from_config(config: &GeneratorConfig) -> Result<Option<Self>, GeneratorError> {
        let Some(url) = config.endpoint() else {
            return Ok(None);
        };

        let api_key = config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().trim().to_string())
            .filter(|key| !key.is_empty())
            .map(SecretString::new);

        Self::new(
            url,
            api_key,
            config.model_name().map(str::to_string),
            config.extra.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    fn payload(&self, prompt: &str) -> Value {
        let mut body = Map::new();
        body.insert("prompt".to_string(), Value::String(prompt.to_string()));
        if let Some(model) = &self.model {
            body.insert("model".to_string(), Value::String(model.clone()));
        }
        // Extra fields may override the defaults above.
        for (key, value) in &self.extra {
            body.insert(key.clone(), Value::String(value.clone()));
        }
        Value::Object(body)
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let mut request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(&self.payload(prompt));
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, format!("Bearer {}", key.expose_secret()));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeneratorError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let data: Value = serde_json::from_slice(&body)?;
        let text = extract_text(&data).ok_or(GeneratorError::UnrecognizedShape)?;
        if text.trim().is_empty() {
            return Err(GeneratorError::EmptyText);
        }

        debug!(chars = text.len(), "Generator call succeeded");
        Ok(text)
    }
}

/// Pull the generated text out of a response body
///
/// Accepts a bare string, an object with one of [`TEXT_KEYS`] (whose value
/// may itself be an object keyed by one of [`NESTED_TEXT_KEYS`]), or an
/// array whose first element is one of those.
pub fn extract_text(data: &Value) -> Option<String> {
    match data {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => {
            let value = TEXT_KEYS.iter().find_map(|key| map.get(*key))?;
            match value {
                Value::Object(inner) => NESTED_TEXT_KEYS
                    .iter()
                    .find_map(|key| inner.get(*key))
                    .and_then(scalar_text),
                other => scalar_text(other),
            }
        }
        Value::Array(items) => items.first().and_then(extract_text),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
