use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::types::LlmClient;
use super::AnalysisError;
use crate::config::AnalysisConfig;

/// Gemini `generateContent` client with schema-constrained JSON output.
///
/// Holds settings only. The blocking HTTP client owns a private runtime, so
/// it is built per call on a thread outside any async context; constructing
/// or dropping a `GeminiClient` is safe anywhere.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Build a client from configuration. A missing credential is refused
    /// here so that no request is ever attempted without one.
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let api_key = config
            .api_key()
            .ok_or(AnalysisError::ConfigurationMissing)?
            .to_string();

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn http_client(&self) -> Result<reqwest::blocking::Client, AnalysisError> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AnalysisError::ServiceUnavailable(format!("HTTP client setup failed: {e}")))
    }

    /// One request/response exchange. Must run where blocking is allowed.
    fn send(&self, body: &GenerateContentRequest<'_>) -> Result<String, AnalysisError> {
        let response = self
            .http_client()?
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    AnalysisError::ServiceUnavailable(format!(
                        "Request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    AnalysisError::ServiceUnavailable(format!(
                        "Cannot connect to {}",
                        self.base_url
                    ))
                } else {
                    AnalysisError::ServiceUnavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnalysisError::ServiceUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate_for_log(&body)
            )));
        }

        let parsed: GenerateContentResponse = response.json().map_err(|e| {
            AnalysisError::ServiceUnavailable(format!("Unreadable service response: {e}"))
        })?;

        parsed.into_text().ok_or(AnalysisError::EmptyResponse)
    }
}

/// Request body for `models/{model}:generateContent`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a serde_json::Value,
    temperature: f32,
    thinking_config: ThinkingConfig,
}

/// Thinking disabled: lower latency for a fixed-shape answer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Response body from `generateContent`.
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl LlmClient for GeminiClient {
    fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &serde_json::Value,
    ) -> Result<String, AnalysisError> {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
                temperature: 0.2,
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        // Inside a tokio runtime (an async caller or the blocking pool) the
        // exchange moves to a plain thread; the blocking client cannot be
        // created or dropped on a runtime thread.
        if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::scope(|scope| scope.spawn(|| self.send(&body)).join()).unwrap_or_else(
                |_| {
                    Err(AnalysisError::ServiceUnavailable(
                        "HTTP worker thread panicked".to_string(),
                    ))
                },
            )
        } else {
            self.send(&body)
        }
    }
}

fn truncate_for_log(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() <= MAX {
        body.to_string()
    } else {
        format!("{}…", body.chars().take(MAX).collect::<String>())
    }
}

/// Mock LLM client for testing — returns a configurable outcome and counts calls.
pub struct MockLlmClient {
    outcome: Result<String, AnalysisError>,
    calls: AtomicUsize,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            outcome: Ok(response.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: AnalysisError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmClient for MockLlmClient {
    fn generate(
        &self,
        _prompt: &str,
        _system: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

impl<T: LlmClient + ?Sized> LlmClient for std::sync::Arc<T> {
    fn generate(
        &self,
        prompt: &str,
        system: &str,
        schema: &serde_json::Value,
    ) -> Result<String, AnalysisError> {
        (**self).generate(prompt, system, schema)
    }
}
