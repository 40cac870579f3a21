// Banking Assistant - Core Library
// Chat intent resolution and tool dispatch over a banking data snapshot

pub mod config;
pub mod delegate;
pub mod dispatch;
pub mod error;
pub mod extractor;
pub mod fallback;
pub mod intent;
pub mod model;
pub mod telemetry;
pub mod tools;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::{AppConfig, DelegateConfig};
pub use delegate::{
    parse_decision, strip_code_fences, task_description,
    GeminiDelegate, IntentDelegate, PrimaryClassifier,
};
pub use dispatch::{Assistant, AssistantReply, DispatchOutcome, UNRESOLVED_MESSAGE};
pub use error::{DelegateError, ToolError};
pub use extractor::{EntityExtractor, ExtractedEntities};
pub use fallback::{FallbackClassifier, HELP_MESSAGE};
pub use intent::{ClassifierSource, IntentDecision};
pub use model::{Account, Customer, CustomerType, Snapshot, Transaction};
pub use telemetry::init_tracing;
pub use tools::{
    GetBalanceArgs, GetCustomersArgs, GetTransactionsArgs,
    ToolCall, ToolName,
};
