/// LLM Client — the single point of entry for all local-model calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the model server directly.
/// Flows consume the `ModelInvoker` trait so tests can substitute a canned
/// stub, and a model failure is folded into the reply text via
/// `invoke_or_sentinel` rather than surfacing as a transport error.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_RETRIES: u32 = 3;

/// Prefix marking a model-invocation failure embedded in a normal reply.
/// Callers that need to distinguish advice from failure check for this.
pub const LLM_ERROR_PREFIX: &str = "[LLM ERROR]";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,

    #[error("model server unavailable after {retries} attempts")]
    Unavailable { retries: u32 },
}

/// A capability that turns a prompt into generated text.
/// Carried in `AppState` as `Arc<dyn ModelInvoker>`.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// Client for a locally hosted Ollama server (`/api/chat`, non-streaming).
/// Retries connect errors and 5xx responses with exponential backoff.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "model call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("model server returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Ollama wraps errors as {"error": "..."} — unwrap when it does
                let message = serde_json::from_str::<OllamaError>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;
            let content = chat.message.content.trim().to_string();
            if content.is_empty() {
                return Err(LlmError::EmptyContent);
            }

            debug!("model call succeeded: {} chars", content.len());
            return Ok(content);
        }

        Err(last_error.unwrap_or(LlmError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl ModelInvoker for OllamaClient {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        self.chat(prompt).await
    }
}

/// Invokes the model and degrades any failure to a `[LLM ERROR]` sentinel
/// string. Advice and review replies always come back as plain text, so a
/// timeout or refused connection is a readable message, not a fault.
pub async fn invoke_or_sentinel(model: &dyn ModelInvoker, prompt: &str) -> String {
    match model.invoke(prompt).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("model invocation failed: {e}");
            format!("{LLM_ERROR_PREFIX} {e}")
        }
    }
}

/// True when a reply produced by `invoke_or_sentinel` reports a failure.
pub fn is_llm_error(reply: &str) -> bool {
    reply.starts_with(LLM_ERROR_PREFIX)
}
