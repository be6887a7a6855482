//! LLM integration module
//!
//! One blocking chat-completion call per stage. The `ChatClient` trait is the
//! seam between the pipeline and the hosted model; `OpenAiClient` speaks the
//! OpenAI-compatible `chat/completions` API.

mod client;
mod error;
mod message;
mod openai;
mod runner;

pub use client::{ChatClient, ChatRequest};
pub use error::LlmError;
pub use message::{ChatMessage, MessageRole};
pub use openai::OpenAiClient;
pub use runner::AgentRunner;
