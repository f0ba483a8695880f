// SPDX-License-Identifier: MIT
// Test case generation — chat-completion transport and decode step.

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::generate::model::GenerationOutcome;
use crate::generate::prompt::build_prompt;

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

// ─── Generator ────────────────────────────────────────────────────────────────

/// Client for the hosted chat-completion endpoint.
///
/// One outbound call per `generate` invocation — no retry, no caching, no
/// rate limiting. Two calls with the same input may return different test
/// cases; callers must not assume idempotence.
#[derive(Clone)]
pub struct Generator {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl Generator {
    pub fn new(api_key: String, config: &AppConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    /// Model identifier sent with every completion request.
    pub fn model_id(&self) -> &str {
        &self.model
    }

    /// Generate test cases for a module description.
    ///
    /// Every failure path — empty input, transport error, timeout, non-2xx,
    /// undecodable completion — comes back as `GenerationOutcome::Failure`;
    /// nothing propagates past this boundary.
    pub async fn generate(&self, module: &str) -> GenerationOutcome {
        if module.trim().is_empty() {
            // Rejected before any network call.
            return GenerationOutcome::failure("module description is required", "");
        }

        let prompt = build_prompt(module);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, url = %url, "sending completion request");

        let response = match self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!(err = %e, "completion request failed");
                return GenerationOutcome::failure(
                    format!("completion request failed: {e}"),
                    "",
                );
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                warn!(err = %e, "failed to read completion response body");
                return GenerationOutcome::failure(
                    format!("failed to read completion response: {e}"),
                    "",
                );
            }
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), "completion endpoint returned an error");
            return GenerationOutcome::failure(
                format!("completion endpoint returned {status}"),
                body,
            );
        }

        let parsed: ChatResponse = match serde_json::from_str(&body) {
            Ok(p) => p,
            Err(e) => {
                return GenerationOutcome::failure(
                    format!("unexpected completion response shape: {e}"),
                    body,
                );
            }
        };

        let Some(choice) = parsed.choices.into_iter().next() else {
            return GenerationOutcome::failure("completion response contained no choices", body);
        };

        decode_completion(&choice.message.content)
    }
}

// ─── Decode step ──────────────────────────────────────────────────────────────

/// Decode a completion's text content into a JSON value.
///
/// The text is trimmed and stripped of markdown code fences first — models
/// occasionally wrap their JSON despite the "ONLY JSON" instruction. On
/// failure the *original* trimmed text is preserved in the outcome so the
/// caller can display it.
pub fn decode_completion(raw: &str) -> GenerationOutcome {
    let trimmed = raw.trim();
    match serde_json::from_str::<Value>(strip_code_fences(trimmed)) {
        Ok(value) => GenerationOutcome::Success(value),
        Err(e) => GenerationOutcome::failure(
            format!("completion is not valid JSON: {e}"),
            trimmed,
        ),
    }
}

/// Strip a surrounding markdown code fence, if present.
fn strip_code_fences(text: &str) -> &str {
    let Some(after_fence) = text.strip_prefix("```") else {
        return text;
    };
    // Drop an optional language tag on the fence line.
    let body = match after_fence.find('\n') {
        Some(nl) => &after_fence[nl + 1..],
        None => after_fence,
    };
    match body.rfind("\n```") {
        Some(end) => &body[..end],
        None => body.strip_suffix("```").unwrap_or(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_valid_json() {
        let outcome = decode_completion(r#"{"module":"Login form","test_cases":[]}"#);
        match outcome {
            GenerationOutcome::Success(value) => {
                assert_eq!(value, json!({"module": "Login form", "test_cases": []}));
            }
            GenerationOutcome::Failure(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn decode_failure_preserves_raw_text() {
        let raw = "Sure, here are your test cases: {not json";
        match decode_completion(raw) {
            GenerationOutcome::Failure(f) => {
                assert_eq!(f.raw_response, raw);
                assert!(f.error.contains("not valid JSON"));
            }
            GenerationOutcome::Success(_) => panic!("malformed text must not decode"),
        }
    }

    #[test]
    fn decode_strips_code_fences() {
        let fenced = "```json\n{\"module\": \"Cart\"}\n```";
        match decode_completion(fenced) {
            GenerationOutcome::Success(value) => assert_eq!(value["module"], "Cart"),
            GenerationOutcome::Failure(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn decode_trims_whitespace() {
        match decode_completion("  \n {\"module\": \"X\"} \n ") {
            GenerationOutcome::Success(value) => assert_eq!(value["module"], "X"),
            GenerationOutcome::Failure(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn fence_without_language_tag() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }
}
