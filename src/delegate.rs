// 🤖 Primary Intent Classifier - external text-generation delegate
//
// The delegate is untrusted: its text is stripped of code fences and checked
// against a closed decision schema before anything acts on it. Every failure
// is returned as a DelegateError so the dispatcher can fall back.

use crate::config::DelegateConfig;
use crate::error::{DelegateError, DelegateResult, ToolError};
use crate::intent::IntentDecision;
use crate::tools::{ToolCall, ToolName};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

// ============================================================================
// DELEGATE TRAIT
// ============================================================================

/// Anything that can turn (task description, user message) into raw text
#[async_trait]
pub trait IntentDelegate: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn generate(&self, task: &str, message: &str) -> DelegateResult<String>;
}

// ============================================================================
// GEMINI (Generative Language API)
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Delegate backed by the Generative Language `generateContent` endpoint.
///
/// No request timeout is set here; the hosting transport owns that.
pub struct GeminiDelegate {
    config: DelegateConfig,
    client: Client,
}

impl GeminiDelegate {
    pub fn new(config: DelegateConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl IntentDelegate for GeminiDelegate {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate(&self, task: &str, message: &str) -> DelegateResult<String> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: task }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: message }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                response_mime_type: "application/json",
            },
        };

        debug!(model = %self.config.model, "Sending classification request to delegate");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DelegateError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(DelegateError::EmptyResponse);
        }

        Ok(text)
    }
}

// ============================================================================
// DECISION SCHEMA
// ============================================================================

/// The only shapes a delegate may answer with
#[derive(Debug, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
enum WireDecision {
    Chat {
        reply: String,
    },
    ToolCall {
        tool: String,
        #[serde(default)]
        args: Value,
    },
    Unknown,
}

/// Remove a surrounding Markdown code fence (```json ... ```), if any
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json") on the opening fence
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Validate raw delegate text into a decision.
///
/// A well-formed tool_call naming a tool outside the registry is `Unknown`,
/// not an error. Anything else off-schema is `Malformed`.
pub fn parse_decision(raw: &str) -> DelegateResult<IntentDecision> {
    let body = strip_code_fences(raw);
    let wire: WireDecision =
        serde_json::from_str(body).map_err(|e| DelegateError::Malformed(e.to_string()))?;

    match wire {
        WireDecision::Chat { reply } => {
            if reply.trim().is_empty() {
                return Err(DelegateError::Malformed("empty chat reply".to_string()));
            }
            Ok(IntentDecision::Chat { reply })
        }
        WireDecision::ToolCall { tool, args } => match ToolCall::from_parts(&tool, args) {
            Ok(call) => Ok(IntentDecision::Tool(call)),
            Err(ToolError::UnknownTool(name)) => {
                warn!(tool = %name, "Delegate asked for an unregistered tool");
                Ok(IntentDecision::Unknown)
            }
            Err(err @ ToolError::InvalidArgs { .. }) => {
                Err(DelegateError::Malformed(err.to_string()))
            }
        },
        WireDecision::Unknown => Ok(IntentDecision::Unknown),
    }
}

/// Instructions sent with every message
pub fn task_description() -> String {
    let tools = ToolName::ALL
        .iter()
        .map(|tool| format!("- {}", tool.describe()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are the assistant behind a banking operations dashboard. \
Decide how to answer the operator's message.\n\n\
Available tools:\n{tools}\n\n\
Respond with a single JSON object and nothing else, in exactly one of these shapes:\n\
{{\"intent\": \"chat\", \"reply\": \"<answer>\"}}\n\
{{\"intent\": \"tool_call\", \"tool\": \"<tool name>\", \"args\": {{ ... }}}}\n\n\
Use tool_call whenever the message asks about customers, balances or transactions. \
Customer ids look like C001 and account ids like A101001. \
Use chat only for greetings and general questions."
    )
}

// ============================================================================
// PRIMARY CLASSIFIER
// ============================================================================

pub struct PrimaryClassifier {
    delegate: Arc<dyn IntentDelegate>,
    task: String,
}

impl PrimaryClassifier {
    pub fn new(delegate: Arc<dyn IntentDelegate>) -> Self {
        Self {
            delegate,
            task: task_description(),
        }
    }

    pub fn delegate_name(&self) -> &'static str {
        self.delegate.name()
    }

    pub async fn classify(&self, message: &str) -> DelegateResult<IntentDecision> {
        let raw = self.delegate.generate(&self.task, message).await?;
        debug!(delegate = self.delegate.name(), bytes = raw.len(), "Delegate answered");
        parse_decision(&raw)
    }
}

// ============================================================================
// TESTS
// ============================================================================
