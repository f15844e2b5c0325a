//! Core types: questions, agent responses and evaluation records

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// =============================================================================
// Error Type
// =============================================================================

/// Errors raised while building core records.
///
/// Extraction and scoring never fail; only record construction validates input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid level: {0} (expected {min}..={max})", min = MIN_LEVEL, max = MAX_LEVEL)]
    InvalidLevel(i64),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Easiest difficulty tier.
pub const MIN_LEVEL: u8 = 1;
/// Hardest difficulty tier.
pub const MAX_LEVEL: u8 = 3;

/// Check that a raw level value is a known difficulty tier.
pub fn validate_level(level: i64) -> Result<u8> {
    if (MIN_LEVEL as i64..=MAX_LEVEL as i64).contains(&level) {
        Ok(level as u8)
    } else {
        Err(Error::InvalidLevel(level))
    }
}

// =============================================================================
// Question
// =============================================================================

/// A benchmark question with its reference answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub task_id: String,
    pub question: String,
    /// Attachment shipped with the question, if any
    pub file_path: Option<PathBuf>,
    pub expected_answer: String,
    pub level: u8,
}

impl Question {
    /// Create a question, validating the task id and level.
    pub fn new(
        task_id: impl Into<String>,
        question: impl Into<String>,
        expected_answer: impl Into<String>,
        level: i64,
    ) -> Result<Self> {
        let task_id = task_id.into();
        if task_id.trim().is_empty() {
            return Err(Error::MissingField("task_id"));
        }
        Ok(Self {
            task_id,
            question: question.into(),
            file_path: None,
            expected_answer: expected_answer.into(),
            level: validate_level(level)?,
        })
    }

    /// Attach a file to the question
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }
}

// =============================================================================
// Agent response
// =============================================================================

/// A single tool call made by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Outcome of one agent run on one question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub final_answer: String,
    pub num_steps: u32,
    pub tool_calls: Vec<ToolInvocation>,
}

impl AgentResponse {
    pub fn new(final_answer: impl Into<String>) -> Self {
        Self {
            final_answer: final_answer.into(),
            num_steps: 0,
            tool_calls: Vec::new(),
        }
    }

    pub fn with_steps(mut self, num_steps: u32) -> Self {
        self.num_steps = num_steps;
        self
    }

    pub fn with_tool_call(mut self, call: ToolInvocation) -> Self {
        self.tool_calls.push(call);
        self
    }

    /// Names of the tools invoked, in call order.
    pub fn tools_used(&self) -> Vec<String> {
        self.tool_calls.iter().map(|c| c.name.clone()).collect()
    }
}

// =============================================================================
// Answer (evaluation record)
// =============================================================================

/// Evaluation record joining a question with the agent's outcome.
///
/// Field names match the persisted answers file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub task_id: String,
    pub question: String,
    pub file_path: Option<PathBuf>,
    pub level: u8,
    pub submitted_answer: String,
    pub expected_answer: String,
    /// 0 or 1
    pub score: u8,
    pub duration_s: f64,
    pub tools: Vec<String>,
    pub number_of_steps: u32,
}

impl Answer {
    /// Build a record for `question`, scoring `response` against its reference.
    pub fn from_response(question: &Question, response: &AgentResponse, duration_s: f64) -> Self {
        Self {
            task_id: question.task_id.clone(),
            question: question.question.clone(),
            file_path: question.file_path.clone(),
            level: question.level,
            submitted_answer: response.final_answer.clone(),
            expected_answer: question.expected_answer.clone(),
            score: crate::scorer::score(&response.final_answer, &question.expected_answer),
            duration_s,
            tools: response.tools_used(),
            number_of_steps: response.num_steps,
        }
    }

    /// Build a record for a run that failed before producing an answer.
    ///
    /// The error text becomes the submitted answer, so it scores like any other
    /// wrong answer.
    pub fn from_error(question: &Question, message: &str, duration_s: f64) -> Self {
        let response = AgentResponse::new(format!("Error: {}", message));
        Self::from_response(question, &response, duration_s)
    }

    pub fn is_correct(&self) -> bool {
        self.score > 0
    }
}
