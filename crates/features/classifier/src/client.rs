//! Groq chat-completions client.

use crate::error::{ClassifierError, ClassifierErrorExt};
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use urlc_domain::config::GroqConfig;

/// Something that turns a prompt into a text completion.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ClassifierError>> + Send;
}

impl<C: CompletionBackend> CompletionBackend for &C {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, ClassifierError>> + Send {
        (**self).complete(prompt)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: u8,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: String,
}

/// OpenAI-compatible chat client pointed at Groq.
#[derive(Clone)]
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    config: GroqConfig,
}

impl fmt::Debug for GroqClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqClient")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>, config: GroqConfig) -> Result<Self, ClassifierError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("building Groq HTTP client")?;

        Ok(Self { http, api_key: api_key.into(), config })
    }

    #[must_use]
    pub const fn config(&self) -> &GroqConfig {
        &self.config
    }
}

impl CompletionBackend for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, ClassifierError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage { role: "user", content: prompt }],
            temperature: 0,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT_ENCODING, "identity")
            .json(&request)
            .send()
            .await
            .context("sending completion request")?;

        let status = response.status();
        let body = response.text().await.context("reading completion response")?;
        if !status.is_success() {
            return Err(ClassifierError::Status { status: status.as_u16(), body, context: None });
        }

        let parsed = serde_json::from_str::<ChatResponse>(&body)
            .context("decoding completion response")?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ClassifierError::from("completion has no choices"))?;

        debug!(model = %self.config.model, chars = content.len(), "Completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_shape() {
        let request = ChatRequest {
            model: "m",
            messages: [ChatMessage { role: "user", content: "hi" }],
            temperature: 0,
            max_tokens: 300,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "m",
                "messages": [{"role": "user", "content": "hi"}],
                "temperature": 0,
                "max_tokens": 300
            })
        );
    }

    #[test]
    fn debug_hides_the_key() {
        let client = GroqClient::new("gsk-secret", GroqConfig::default()).unwrap();
        assert!(!format!("{client:?}").contains("gsk-secret"));
    }
}
