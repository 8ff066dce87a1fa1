//! LLM client abstraction used by the model-backed duration strategy.
//!
//! ## Example
//!
//! ```rust,ignore
//! use notes_core::llm::{ChatMessage, ClientConfig, CompletionRequest, LLMClient, OpenAIClient};
//!
//! let client = OpenAIClient::new(
//!     ClientConfig::new("your-api-key").with_default_model("gpt-4o-mini"),
//! )?;
//!
//! let request = CompletionRequest::new()
//!     .with_system("Answer with a single integer.")
//!     .with_message(ChatMessage::user("30 min run"));
//!
//! let response = client.complete(request).await?;
//! ```

mod client;
mod types;

pub use client::{ClientConfig, LLMClient, OpenAIClient};
pub use types::{
    ChatMessage, ChatRole, CompletionRequest, CompletionResponse, StopReason, TokenUsage,
};
