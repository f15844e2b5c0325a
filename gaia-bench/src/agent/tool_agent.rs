//! Function-calling agent loop

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use gaia::{extract_final_answer, AgentResponse, ToolInvocation};

use super::{Agent, AgentError, PromptTemplate};
use crate::config::Config;
use crate::providers::{CompletionRequest, LLMProvider, Message};
use crate::tools::ToolRegistry;

const DEFAULT_MAX_STEPS: u32 = 15;
const DEFAULT_MAX_TOKENS: u32 = 4096;
/// Tool output longer than this is shortened in the step log
const LOG_PREVIEW_CHARS: usize = 200;

/// Agent that alternates model turns and tool calls until the model answers
///
/// Each step sends the conversation so far with the tool specs. If the model
/// requests tools, every call runs and its output is appended as a tool
/// message. A turn without tool calls ends the run; its text goes through
/// [`extract_final_answer`].
pub struct ToolAgent {
    name: String,
    provider: Arc<dyn LLMProvider>,
    tools: ToolRegistry,
    prompt: PromptTemplate,
    max_steps: u32,
    max_tokens: u32,
    temperature: Option<f32>,
}

impl ToolAgent {
    pub fn new(provider: Arc<dyn LLMProvider>, tools: ToolRegistry) -> Self {
        Self {
            name: "tool-agent".to_string(),
            provider,
            tools,
            prompt: PromptTemplate::default(),
            max_steps: DEFAULT_MAX_STEPS,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    /// Build from the `[agent]` section and the agent provider's limits
    pub fn from_config(
        provider: Arc<dyn LLMProvider>,
        config: &Config,
        attachments_dir: &Path,
    ) -> Result<Self, AgentError> {
        let tools = ToolRegistry::from_names(&config.agent.tools, attachments_dir)?;
        let mut agent = Self::new(provider, tools).with_max_steps(config.agent.max_steps);
        if let Some(system) = &config.agent.system_prompt {
            agent = agent.with_prompt(PromptTemplate::new(system.clone()));
        }
        if let Some(pc) = config.agent_provider() {
            agent = agent.with_max_tokens(pc.max_tokens);
            if let Some(temperature) = pc.temperature {
                agent = agent.with_temperature(temperature);
            }
        }
        Ok(agent)
    }

    pub fn with_prompt(mut self, prompt: PromptTemplate) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    fn request(&self, messages: &[Message]) -> CompletionRequest {
        let request = CompletionRequest::new(messages.to_vec(), self.max_tokens)
            .with_system(self.prompt.system_prompt())
            .with_tools(self.tools.specs());
        match self.temperature {
            Some(t) => request.with_temperature(t),
            None => request,
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= LOG_PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}...", head)
    }
}

#[async_trait]
impl Agent for ToolAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, question: &str, file_path: Option<&Path>) -> Result<AgentResponse, AgentError> {
        let mut messages = vec![Message::user(self.prompt.user_message(question, file_path))];
        let mut invocations: Vec<ToolInvocation> = Vec::new();

        for step in 1..=self.max_steps {
            let started = Instant::now();
            let response = self.provider.complete(&self.request(&messages)).await?;

            if !response.has_tool_calls() {
                tracing::debug!("Step {}: model answered ({}ms)", step, started.elapsed().as_millis());
                return Ok(AgentResponse {
                    final_answer: extract_final_answer(&response.content).to_string(),
                    num_steps: step,
                    tool_calls: invocations,
                });
            }

            messages.push(Message::assistant_with_tools(
                response.content.clone(),
                response.tool_calls.clone(),
            ));

            for call in &response.tool_calls {
                tracing::info!("Step {}: calling {} with {}", step, call.name, call.arguments);
                let output = match self.tools.call(&call.name, call.arguments.clone()).await {
                    Ok(output) => output,
                    // The model sees the failure and may try something else
                    Err(e) => {
                        tracing::warn!("Step {}: tool {} failed: {}", step, call.name, e);
                        format!("Error: {}", e)
                    }
                };
                tracing::debug!("Step {}: {} returned {}", step, call.name, preview(&output));

                invocations.push(ToolInvocation::new(call.name.clone(), call.arguments.clone()));
                messages.push(Message::tool(call.id.clone(), output));
            }

            tracing::debug!("Step {} finished in {}ms", step, started.elapsed().as_millis());
        }

        Err(AgentError::StepLimit(self.max_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_CHARS + 5);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), LOG_PREVIEW_CHARS + 3);
        assert_eq!(preview("short"), "short");
    }
}
