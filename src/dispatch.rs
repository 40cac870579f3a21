// 🚦 Dispatch Controller - classify, run the tool, always answer
//
//   AwaitingClassification
//     -> Classified(decision)      primary delegate if configured, else fallback;
//                                  any delegate error re-classifies with fallback
//     -> ToolExecuted | DirectReply | Unresolved
//
// Every path ends in a non-empty text reply. Nothing here returns an error.

use crate::config::AppConfig;
use crate::delegate::{GeminiDelegate, IntentDelegate, PrimaryClassifier};
use crate::fallback::FallbackClassifier;
use crate::intent::{ClassifierSource, IntentDecision};
use crate::model::Snapshot;
use crate::tools::ToolName;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const UNRESOLVED_MESSAGE: &str = "I'm not sure how to handle that yet. Try asking for specific \
customer or account details (include IDs like C001 or A101001).";

// ============================================================================
// REPLY
// ============================================================================

/// Terminal state of one dispatch cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    ToolExecuted,
    DirectReply,
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Text shown to the operator (includes the diagnostic suffix when enabled)
    pub text: String,

    pub outcome: DispatchOutcome,

    /// Set when `outcome` is `ToolExecuted`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolName>,

    pub source: ClassifierSource,

    /// Delegate failure that triggered the fallback, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

// ============================================================================
// ASSISTANT
// ============================================================================

/// Stateless between messages; share behind an `Arc`.
pub struct Assistant {
    primary: Option<PrimaryClassifier>,
    fallback: FallbackClassifier,
    diagnostics: bool,
}

impl Assistant {
    /// Keyword rules only
    pub fn fallback_only() -> Self {
        Assistant {
            primary: None,
            fallback: FallbackClassifier::new(),
            diagnostics: false,
        }
    }

    pub fn with_delegate(delegate: Arc<dyn IntentDelegate>) -> Self {
        Assistant {
            primary: Some(PrimaryClassifier::new(delegate)),
            ..Self::fallback_only()
        }
    }

    /// Gemini when an API key is configured, fallback-only otherwise
    pub fn from_config(config: &AppConfig) -> Self {
        let assistant = match &config.delegate {
            Some(delegate) => {
                info!(model = %delegate.model, "Primary classifier enabled");
                Self::with_delegate(Arc::new(GeminiDelegate::new(delegate.clone())))
            }
            None => {
                info!("No delegate API key configured, using keyword classifier only");
                Self::fallback_only()
            }
        };

        assistant.with_diagnostics(config.diagnostics)
    }

    /// Append delegate failure details to replies
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn has_delegate(&self) -> bool {
        self.primary.is_some()
    }

    /// Resolve one message against a snapshot. Never fails.
    pub async fn classify_and_respond(&self, message: &str, snapshot: &Snapshot) -> AssistantReply {
        let (decision, source, failure) = self.classify(message).await;
        debug!(?decision, ?source, "Message classified");

        let (text, outcome, tool) = match decision {
            IntentDecision::Chat { reply } => (reply, DispatchOutcome::DirectReply, None),
            IntentDecision::Tool(call) => {
                let name = call.name();
                info!(tool = %name, ?source, "Executing tool");
                (call.execute(snapshot), DispatchOutcome::ToolExecuted, Some(name))
            }
            IntentDecision::Unknown => (
                UNRESOLVED_MESSAGE.to_string(),
                DispatchOutcome::Unresolved,
                None,
            ),
        };

        let text = match (&failure, self.diagnostics) {
            (Some(err), true) => format!("{}\n\n[delegate unavailable: {}]", text, err),
            _ => text,
        };

        AssistantReply {
            text,
            outcome,
            tool,
            source,
            diagnostic: failure,
        }
    }

    async fn classify(&self, message: &str) -> (IntentDecision, ClassifierSource, Option<String>) {
        let Some(primary) = &self.primary else {
            return (self.fallback.classify(message), ClassifierSource::Fallback, None);
        };

        match primary.classify(message).await {
            Ok(decision) => (decision, ClassifierSource::Delegate, None),
            Err(err) => {
                warn!(
                    delegate = primary.delegate_name(),
                    error = %err,
                    "Delegate classification failed, using keyword classifier"
                );
                (
                    self.fallback.classify(message),
                    ClassifierSource::Fallback,
                    Some(err.to_string()),
                )
            }
        }
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::fallback_only()
    }
}

// ============================================================================
// TESTS
// ============================================================================
