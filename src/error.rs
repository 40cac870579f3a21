// ⚠️ Error types for the classification and dispatch layer
//
// None of these ever reach a chat user: the dispatcher catches them and falls
// back to the keyword classifier or a templated reply.

use thiserror::Error;

/// Anything that can go wrong while asking the external delegate for a decision
#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("delegate request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status (quota, auth, bad request)
    #[error("delegate returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("delegate returned no candidates")]
    EmptyResponse,

    /// Output did not match the decision schema
    #[error("malformed delegate output: {0}")]
    Malformed(String),
}

/// A tool call that cannot be built from a name and loose arguments
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {source}")]
    InvalidArgs {
        tool: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub type DelegateResult<T> = std::result::Result<T, DelegateError>;
