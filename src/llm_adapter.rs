use crate::types::{AnalyzerError, LlmConfig, Result};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::Client;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

/// A chat-completion backend. The pipeline needs exactly one operation from
/// the remote model, which keeps it swappable for a scripted mock in tests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Identifier of the underlying model, for logs.
    fn model_name(&self) -> String;

    /// Send a system instruction plus a user payload and return the
    /// assistant's response text.
    async fn complete(&self, system_prompt: &str, user_payload: &str) -> Result<String>;
}

/// Production adapter for an OpenAI-compatible chat-completions API
/// (Deepseek by default).
pub struct ChatApiModel {
    client: Client,
    config: LlmConfig,
}

impl ChatApiModel {
    pub fn new(config: LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    async fn request_completion(&self, system_prompt: &str, user_payload: &str) -> Result<String> {
        let url = self.config.api_base.join("chat/completions")?;

        let body = json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_payload },
            ],
        });

        debug!("Sending completion request to {}", url);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = response.json().await?;
        let content = value
            .pointer("/choices/0/message/content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| AnalyzerError::Api {
                status: status.as_u16(),
                body: "completion response carried no choices[0].message.content".to_string(),
            })?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl ChatModel for ChatApiModel {
    fn model_name(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, system_prompt: &str, user_payload: &str) -> Result<String> {
        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 8),
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut last_error = None;

        // max_retries defaults to 0, i.e. a single attempt per chunk.
        for attempt in 0..=self.config.max_retries {
            match self.request_completion(system_prompt, user_payload).await {
                Ok(text) => {
                    debug!("Completion succeeded on attempt {}", attempt + 1);
                    return Ok(text);
                }
                Err(e) => {
                    if attempt < self.config.max_retries {
                        if let Some(delay) = backoff.next_backoff() {
                            warn!(
                                "Completion attempt {} failed ({}), retrying in {:?}",
                                attempt + 1,
                                e,
                                delay
                            );
                            tokio::time::sleep(delay).await;
                        }
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AnalyzerError::General("completion failed without error detail".to_string())
        }))
    }
}

/// Scripted reply for [`MockChatModel`].
pub enum MockReply {
    Text(String),
    Failure(String),
}

/// Mock chat model for development and testing. Replies are consumed in FIFO
/// order; the call counter and recorded payloads let tests assert what went
/// upstream.
pub struct MockChatModel {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<String>>,
    calls: AtomicUsize,
    response_delay_ms: u64,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            response_delay_ms: 0,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    /// Queue a successful reply.
    pub fn with_reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(MockReply::Text(text.to_string()));
        self
    }

    /// Queue a simulated upstream failure.
    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(MockReply::Failure(message.to_string()));
        self
    }

    /// Number of completion calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// User payloads received so far, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .clone()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    fn model_name(&self) -> String {
        "mock-chat-model".to_string()
    }

    async fn complete(&self, _system_prompt: &str, user_payload: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("mock request log poisoned")
            .push(user_payload.to_string());

        if self.response_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
        }

        let reply = self
            .replies
            .lock()
            .expect("mock reply queue poisoned")
            .pop_front();

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Failure(message)) => Err(AnalyzerError::Api {
                status: 503,
                body: message,
            }),
            None => Err(AnalyzerError::General(
                "mock model has no scripted reply left".to_string(),
            )),
        }
    }
}
