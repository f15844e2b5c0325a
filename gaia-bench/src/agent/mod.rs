//! Agents answer one question at a time
//!
//! Every agent variant is a [`ToolAgent`] with a different tool set and
//! prompt; the model backend is injected as an [`LLMProvider`].
//!
//! [`LLMProvider`]: crate::providers::LLMProvider

mod prompt;
mod tool_agent;

pub use prompt::{PromptTemplate, DEFAULT_SYSTEM_PROMPT};
pub use tool_agent::ToolAgent;

use async_trait::async_trait;
use std::path::Path;

use gaia::AgentResponse;

use crate::providers::ProviderError;
use crate::tools::ToolError;

/// Error types for an agent run
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Step limit of {0} reached without a final answer")]
    StepLimit(u32),

    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

impl AgentError {
    /// Whether running the question again may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::Provider(e) => e.is_retryable(),
            AgentError::StepLimit(_) | AgentError::Tool(_) => false,
        }
    }
}

/// Something that can answer a benchmark question
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Answer `question`, optionally with an attached file
    async fn run(&self, question: &str, file_path: Option<&Path>) -> Result<AgentResponse, AgentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_follows_provider() {
        let limited = AgentError::from(ProviderError::RateLimited { retry_after_ms: 5 });
        assert!(limited.is_retryable());
        assert!(!AgentError::StepLimit(3).is_retryable());
        assert!(!AgentError::from(ProviderError::Parse("bad".into())).is_retryable());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AgentError::StepLimit(15).to_string(),
            "Step limit of 15 reached without a final answer"
        );
        assert_eq!(
            AgentError::from(ToolError::UnknownTool("x".into())).to_string(),
            "Tool error: Unknown tool: x"
        );
    }
}
