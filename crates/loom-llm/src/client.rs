//! Completion client seam and the OpenAI-compatible HTTP implementation.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::http::check_response;
use crate::router::ProviderRoute;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One completion call: ordered messages plus sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the provider for a JSON object response.
    pub json_output: bool,
}

/// Anything that turns a routed request into completion text.
///
/// Implemented by [`ChatClient`] for real providers and by scripted clients
/// in tests.
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return its text.
    ///
    /// # Errors
    ///
    /// Returns `LlmError` on transport, provider or timeout failure.
    fn complete(
        &self,
        route: &ProviderRoute,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// HTTP client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatClient {
    http: reqwest::Client,
    timeout_secs: u64,
}

impl ChatClient {
    /// Create a client whose every call is bounded by `timeout_secs`.
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Http` if the underlying `reqwest::Client` fails to build.
    pub fn new(timeout_secs: u64) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("loom/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http, timeout_secs })
    }

    fn map_send_error(&self, error: reqwest::Error) -> LlmError {
        if error.is_timeout() {
            LlmError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            LlmError::Http(error)
        }
    }
}

impl CompletionClient for ChatClient {
    async fn complete(
        &self,
        route: &ProviderRoute,
        request: &CompletionRequest,
    ) -> Result<String, LlmError> {
        let body = ChatCompletionBody {
            model: &route.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let mut builder = self.http.post(route.completions_url()).json(&body);
        if !route.api_key.is_empty() {
            builder = builder.bearer_auth(&route.api_key);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let resp = check_response(resp).await?;
        let data: ChatCompletionResponse =
            resp.json().await.map_err(|e| self.map_send_error(e))?;

        extract_content(data)
    }
}

fn extract_content(data: ChatCompletionResponse) -> Result<String, LlmError> {
    data.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(LlmError::EmptyCompletion)
}
