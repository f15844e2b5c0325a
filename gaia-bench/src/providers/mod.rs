//! LLM provider implementations

pub mod openai;
pub mod traits;

pub use openai::OpenAIClient;
pub use traits::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, ProviderError, ProviderResult,
    Role, ToolCall, ToolSpec,
};

use crate::config::Config;
use std::sync::Arc;

/// Create the provider named `name`, applying its config section when present
///
/// Every configured provider speaks the OpenAI chat-completions protocol; the
/// section decides endpoint, key variable, model and limits.
pub fn create_provider(name: &str, config: &Config) -> ProviderResult<Arc<dyn LLMProvider>> {
    let client = match config.get_provider(name) {
        Some(pc) if !pc.enabled => {
            return Err(ProviderError::Config(format!("Provider {} is disabled", name)));
        }
        Some(pc) => OpenAIClient::from_config(pc)?,
        None => match name.to_lowercase().as_str() {
            "openai" | "gpt" => OpenAIClient::from_env()?,
            _ => return Err(ProviderError::Config(format!("Unknown provider: {}", name))),
        },
    };
    Ok(Arc::new(client))
}

/// Create the provider the agent section points at, optionally overriding its model
pub fn create_agent_provider(
    config: &Config,
    model: Option<&str>,
) -> ProviderResult<Arc<dyn LLMProvider>> {
    match model {
        Some(model) => {
            let mut config = config.clone();
            if let Some(pc) = config.providers.get_mut(&config.agent.provider) {
                pc.default_model = model.to_string();
            } else if config.agent.provider.eq_ignore_ascii_case("openai") {
                return Ok(Arc::new(OpenAIClient::from_env()?.with_model(model)));
            }
            create_provider(&config.agent.provider, &config)
        }
        None => create_provider(&config.agent.provider, config),
    }
}
