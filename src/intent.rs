// 🧭 Intent Decision - what a classifier made of one message

use crate::tools::ToolCall;
use serde::{Deserialize, Serialize};

/// Result of classifying a single message. Discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentDecision {
    /// Conversational answer, returned verbatim
    Chat { reply: String },

    /// A validated call into the tool registry
    Tool(ToolCall),

    /// Nothing the assistant can act on
    Unknown,
}

/// Which classifier produced the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierSource {
    Delegate,
    Fallback,
}
