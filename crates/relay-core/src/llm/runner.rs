//! Agent runner: one agent, one user message, one reply

use super::{ChatClient, ChatMessage, ChatRequest, LlmError};
use crate::orchestration::AgentDefinition;

/// Runs agents against a chat client
pub struct AgentRunner<C> {
    client: C,
}

impl<C: ChatClient> AgentRunner<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Send `user_message` to `agent` and return the last message's text
    ///
    /// Client errors are returned unchanged; nothing is retried.
    pub fn run(&self, agent: &AgentDefinition, user_message: &str) -> Result<String, LlmError> {
        let messages = [ChatMessage::user(user_message)];
        let request = ChatRequest {
            agent: &agent.name,
            instructions: &agent.instructions,
            model: &agent.model,
            messages: &messages,
        };

        let conversation = self.client.complete(&request)?;
        conversation
            .into_iter()
            .last()
            .map(|m| m.content)
            .ok_or_else(|| LlmError::InvalidResponse(format!("{} returned no messages", agent.name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestration::Role;
    use std::cell::RefCell;

    struct Echo {
        seen: RefCell<Vec<(String, String, String)>>,
    }

    impl ChatClient for Echo {
        fn complete(&self, request: &ChatRequest<'_>) -> Result<Vec<ChatMessage>, LlmError> {
            self.seen.borrow_mut().push((
                request.agent.to_string(),
                request.model.to_string(),
                request.messages[0].content.clone(),
            ));
            let mut out = request.messages.to_vec();
            out.push(ChatMessage::assistant(format!("echo: {}", request.messages[0].content)));
            Ok(out)
        }
    }

    struct Silent;

    impl ChatClient for Silent {
        fn complete(&self, _request: &ChatRequest<'_>) -> Result<Vec<ChatMessage>, LlmError> {
            Ok(Vec::new())
        }
    }

    struct Down;

    impl ChatClient for Down {
        fn complete(&self, _request: &ChatRequest<'_>) -> Result<Vec<ChatMessage>, LlmError> {
            Err(LlmError::Connection("refused".to_string()))
        }
    }

    #[test]
    fn test_returns_last_message() {
        let runner = AgentRunner::new(Echo {
            seen: RefCell::new(Vec::new()),
        });
        let agent = Role::Architect.definition("gpt-4o");

        let text = runner.run(&agent, "design").unwrap();

        assert_eq!(text, "echo: design");
        let seen = runner.client().seen.borrow();
        assert_eq!(
            seen[0],
            ("Phase3-Architect".to_string(), "gpt-4o".to_string(), "design".to_string())
        );
    }

    #[test]
    fn test_empty_conversation_is_invalid() {
        let runner = AgentRunner::new(Silent);
        let err = runner.run(&Role::Integrator.definition("gpt-4o"), "x").unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(msg) if msg.contains("Phase3-Integrator")));
    }

    #[test]
    fn test_client_error_propagates() {
        let runner = AgentRunner::new(Down);
        let err = runner.run(&Role::UiDeveloper.definition("gpt-4o"), "x").unwrap_err();
        assert_eq!(err, LlmError::Connection("refused".to_string()));
    }
}
