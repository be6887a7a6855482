//! Chat client trait

use super::{ChatMessage, LlmError};

/// One chat-completion request
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    /// Agent display name, for logging
    pub agent: &'a str,
    /// Role instructions, sent as the system message
    pub instructions: &'a str,
    /// Model identifier
    pub model: &'a str,
    /// Conversation, excluding the system message
    pub messages: &'a [ChatMessage],
}

/// Synchronous chat-completion client
///
/// Returns the conversation after the call: the request messages followed by
/// whatever the model produced. Callers use the last message.
pub trait ChatClient {
    fn complete(&self, request: &ChatRequest<'_>) -> Result<Vec<ChatMessage>, LlmError>;
}

impl<C: ChatClient + ?Sized> ChatClient for &C {
    fn complete(&self, request: &ChatRequest<'_>) -> Result<Vec<ChatMessage>, LlmError> {
        (**self).complete(request)
    }
}
