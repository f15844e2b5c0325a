//! GAIA benchmark runner
//!
//! Drives a tool-using LLM agent over GAIA questions and grades the answers
//! with the `gaia` core crate.
//!
//! # Features
//!
//! - `metadata.jsonl` loading with level and task-id selection
//! - OpenAI-compatible function-calling agent with calculator and file tools
//! - Concurrent evaluation with retries, timeouts and per-question fault isolation
//! - Dated JSON answers files, console review and hub submission payloads
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! use gaia_bench::{
//!     agent::ToolAgent,
//!     dataset::{load_questions, select_questions, DatasetSplit},
//!     providers::OpenAIClient,
//!     runner::{EvalRunner, RunnerConfig},
//!     tools::{Calculator, ToolRegistry},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let questions = load_questions(Path::new("data"), DatasetSplit::Validation)?;
//!     let questions = select_questions(questions, Some(1), None);
//!
//!     let mut tools = ToolRegistry::new();
//!     tools.register(Calculator);
//!     let agent = ToolAgent::new(Arc::new(OpenAIClient::from_env()?), tools);
//!
//!     let runner = EvalRunner::new(Arc::new(agent), RunnerConfig::default());
//!     let answers = runner.evaluate(&questions).await;
//!     println!("{}", gaia::ScoreSummary::from_answers(&answers));
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod config;
pub mod dataset;
pub mod hub;
pub mod providers;
pub mod reporting;
pub mod runner;
pub mod tools;

pub use config::Config;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::agent::{Agent, AgentError, PromptTemplate, ToolAgent};
    pub use crate::config::Config;
    pub use crate::dataset::{load_questions, select_questions, DatasetSplit};
    pub use crate::hub::{build_answers_payload, HubClient};
    pub use crate::providers::{
        create_agent_provider, CompletionRequest, CompletionResponse, LLMProvider, Message,
        ProviderError, ProviderResult,
    };
    pub use crate::reporting::{load_answers, print_console_report, save_answers, AnswersFileName};
    pub use crate::runner::{EvalRunner, RunnerConfig};
    pub use crate::tools::{Tool, ToolRegistry};
    pub use gaia::{Answer, Question, ScoreSummary};
}
