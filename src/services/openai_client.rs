use std::{fmt, time::Duration};

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Anything that can turn a chat-completion request into the assistant's reply text.
#[async_trait]
pub trait ChatCompletion: fmt::Debug + Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest, timeout: Duration)
        -> Result<String>;
}

/// Chat-completions client for OpenAI-compatible endpoints.
///
/// Issues exactly one HTTP request per call; failures are returned, never retried.
#[derive(Clone)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub async fn chat_completion(&self, body: &Value, timeout: Duration) -> Result<Value> {
        let request_url = build_chat_url(&self.base_url);

        let response = self
            .http
            .post(&request_url)
            .timeout(timeout)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| transport_error(err, timeout))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| transport_error(err, timeout))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(|value| value.as_str())
                        .map(|s| s.to_string())
                })
                .unwrap_or(response_text);

            return Err(PlannerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&response_text).map_err(|err| {
            PlannerError::Http(format!("Malformed chat-completion response body: {err}"))
        })
    }
}

#[async_trait]
impl ChatCompletion for OpenAIClient {
    async fn complete(
        &self,
        request: &ChatCompletionRequest,
        timeout: Duration,
    ) -> Result<String> {
        debug!(
            target: "chicago_planner::http",
            model = %request.model,
            max_tokens = ?request.max_tokens,
            timeout_secs = timeout.as_secs(),
            "sending chat completion request"
        );

        let response = self.chat_completion(&request.to_value(), timeout).await?;
        extract_message_content(&response)
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> PlannerError {
    if err.is_timeout() {
        PlannerError::Timeout(format!(
            "no response within {}s: {err}",
            timeout.as_secs()
        ))
    } else {
        PlannerError::Http(format!("HTTP request failed: {err}"))
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

/// Pull `choices[0].message.content` out of a chat-completion response.
pub(crate) fn extract_message_content(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(|content| content.to_string())
        .ok_or(PlannerError::EmptyResponse)
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Value>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
        }
    }

    /// System instruction followed by a single user turn.
    pub fn with_system_and_user(
        model: impl Into<String>,
        system: &str,
        user: &str,
    ) -> Self {
        Self::new(
            model,
            vec![
                json!({ "role": "system", "content": system }),
                json!({ "role": "user", "content": user }),
            ],
        )
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[Value] {
        &self.messages
    }

    pub fn to_value(&self) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(temperature) = self.temperature {
            body["temperature"] = json!(temperature);
        }

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        body
    }
}
