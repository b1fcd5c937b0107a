//! Google Gemini `generateContent` client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompt::{build_prompt, clean_output};
use super::{RewriteError, RewriteStyle, Rewriter};
use crate::metrics;

/// Gemini client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL including the API version segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1".to_string()
}

fn default_timeout() -> u32 {
    60
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Rewriter backed by the Gemini API.
pub struct GeminiRewriter {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
    timeout: Duration,
}

impl GeminiRewriter {
    pub fn new(config: GeminiConfig) -> Result<Self, RewriteError> {
        if config.api_key.is_empty() {
            return Err(RewriteError::NotConfigured(
                "Gemini API key is required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(u64::from(config.timeout_secs));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RewriteError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            model: config.model,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    async fn generate(&self, prompt: String) -> Result<String, RewriteError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.api_base, self.model
            ))
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RewriteError::Timeout(self.timeout)
                } else {
                    RewriteError::Http(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RewriteError::Http(e.to_string()))?;

        debug!("Gemini responded with status {} ({} bytes)", status, body.len());

        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(RewriteError::Api { status, message });
        }

        parse_generated_text(status, &body)
    }
}

/// Extract `candidates[0].content.parts[0].text` or fail with a single
/// typed error.
fn parse_generated_text(status: u16, body: &str) -> Result<String, RewriteError> {
    let parsed: GenerateContentResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            // Some failures come back as 200 with an error envelope.
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
                return Err(RewriteError::Api {
                    status,
                    message: envelope.error.message,
                });
            }
            return Err(RewriteError::MalformedResponse(e.to_string()));
        }
    };

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| {
            RewriteError::MalformedResponse("response contained no candidate text".to_string())
        })?;

    if text.trim().is_empty() {
        return Err(RewriteError::MalformedResponse(
            "candidate text is empty".to_string(),
        ));
    }

    Ok(text)
}

#[async_trait]
impl Rewriter for GeminiRewriter {
    fn provider(&self) -> &str {
        "gemini"
    }

    async fn rewrite(&self, text: &str, style: RewriteStyle) -> Result<String, RewriteError> {
        let started = Instant::now();
        let result = self.generate(build_prompt(text, style)).await;
        metrics::observe_external_call("gemini", style.as_str(), started, result.is_ok());

        result.map(|generated| clean_output(&generated))
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
