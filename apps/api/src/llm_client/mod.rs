//! LLM client — the single point of entry for the upstream completion call.
//!
//! One round trip per request, no retries: a failed generation is surfaced to
//! the caller, who decides whether to try again.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Fixed for all generation calls; not configurable to prevent drift.
pub const MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 300;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY is not set")]
    MissingCredentials,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited by upstream")]
    RateLimited,

    #[error("upstream returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if the model produced any.
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LlmClient {
    /// `api_key` may be absent; calls then fail with `MissingCredentials`
    /// so the rest of the service keeps working without a key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends one system + user message pair and returns the completion text.
    pub async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingCredentials)?;

        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;

        debug!("LLM call succeeded (model: {MODEL})");

        chat_response.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(content: Option<&str>) -> ChatResponse {
        ChatResponse {
            choices: vec![Choice {
                message: ChoiceMessage {
                    content: content.map(str::to_string),
                },
            }],
        }
    }

    #[test]
    fn test_text_trims_content() {
        let r = response_with(Some("  a post \n"));
        assert_eq!(r.text().as_deref(), Some("a post"));
    }

    #[test]
    fn test_text_rejects_blank_content() {
        assert!(response_with(Some("   ")).text().is_none());
        assert!(response_with(None).text().is_none());
        assert!(ChatResponse { choices: vec![] }.text().is_none());
    }

    #[tokio::test]
    async fn test_generate_without_key_is_missing_credentials() {
        let client = LlmClient::new(None);
        let err = client.generate("sys", "user").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingCredentials));
    }
}
