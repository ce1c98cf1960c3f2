//! OpenAI chat-completions provider
//!
//! Sends the prompt as a single user message and returns the first
//! choice's content. HTTP status codes are mapped onto `AnalysisError`
//! so callers can tell throttling apart from other failures.

use crate::{AnalysisError, CompletionProvider, GenerationParams, ServiceError};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base; `/chat/completions` is appended
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default timeout for one completion request
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub params: GenerationParams,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            params: GenerationParams::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

pub struct OpenAiProvider {
    url: String,
    api_key: String,
    params: GenerationParams,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, AnalysisError> {
        if config.api_key.trim().is_empty() {
            return Err(AnalysisError::Configuration("API key is empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::Configuration(e.to_string()))?;

        Ok(Self {
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            api_key: config.api_key,
            params: config.params,
            client,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<String, AnalysisError> {
        let body = ChatRequest {
            model: &self.params.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
        };

        debug!(model = %self.params.model, prompt_len = prompt.len(), "requesting completion");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ServiceError::Timeout
                } else {
                    ServiceError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "completion request rejected");
            return Err(match status {
                StatusCode::TOO_MANY_REQUESTS => AnalysisError::RateLimited,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ServiceError::Authentication(text).into()
                }
                _ => ServiceError::Http {
                    status: status.as_u16(),
                    body: text,
                }
                .into(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ServiceError::Timeout
            } else {
                ServiceError::MalformedResponse(format!("Failed to parse response: {}", e))
            }
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::MalformedResponse("No completion content".to_string()).into())
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode as HttpStatus},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral local port and return its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn provider(endpoint: String) -> OpenAiProvider {
        OpenAiProvider::new(OpenAiConfig {
            endpoint,
            ..OpenAiConfig::new("test-key")
        })
        .unwrap()
    }

    fn status_route(status: HttpStatus) -> Router {
        Router::new().route(
            "/v1/chat/completions",
            post(move || async move { (status, "nope").into_response() }),
        )
    }

    #[tokio::test]
    async fn test_successful_completion_echoes_request() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer test-key") {
                    return (HttpStatus::UNAUTHORIZED, "bad key").into_response();
                }
                let content = format!(
                    "{}|{}|{}|{}",
                    body["model"].as_str().unwrap_or_default(),
                    body["max_tokens"],
                    body["messages"][0]["role"].as_str().unwrap_or_default(),
                    body["messages"][0]["content"].as_str().unwrap_or_default(),
                );
                Json(json!({
                    "choices": [{ "message": { "role": "assistant", "content": content } }]
                }))
                .into_response()
            }),
        );
        let base = serve(router).await;

        let text = provider(base).complete("Review this lease").await.unwrap();
        assert_eq!(text, "gpt-4|800|user|Review this lease");
    }

    #[tokio::test]
    async fn test_429_is_rate_limited() {
        let base = serve(status_route(HttpStatus::TOO_MANY_REQUESTS)).await;
        assert_eq!(provider(base).complete("x").await, Err(AnalysisError::RateLimited));
    }

    #[tokio::test]
    async fn test_401_is_authentication() {
        let base = serve(status_route(HttpStatus::UNAUTHORIZED)).await;
        assert_eq!(
            provider(base).complete("x").await,
            Err(AnalysisError::Service(ServiceError::Authentication(
                "nope".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_server_error_keeps_status() {
        let base = serve(status_route(HttpStatus::INTERNAL_SERVER_ERROR)).await;
        assert_eq!(
            provider(base).complete("x").await,
            Err(AnalysisError::Service(ServiceError::Http {
                status: 500,
                body: "nope".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({ "choices": [] })) }),
        );
        let base = serve(router).await;
        assert!(matches!(
            provider(base).complete("x").await,
            Err(AnalysisError::Service(ServiceError::MalformedResponse(_)))
        ));
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let base = serve(router).await;
        let provider = OpenAiProvider::new(OpenAiConfig {
            endpoint: base,
            timeout: Duration::from_millis(100),
            ..OpenAiConfig::new("test-key")
        })
        .unwrap();
        assert_eq!(provider.complete("x").await, Err(ServiceError::Timeout.into()));
    }

    #[tokio::test]
    async fn test_unreachable_is_transport() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = provider(format!("http://{}/v1", addr)).complete("x").await;
        assert!(matches!(result, Err(AnalysisError::Service(ServiceError::Transport(_)))));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            OpenAiProvider::new(OpenAiConfig::new("  ")),
            Err(AnalysisError::Configuration(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = OpenAiConfig::new("k");
        assert_eq!(config.params.model, "gpt-4");
        assert_eq!(config.params.max_tokens, 800);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }
}
