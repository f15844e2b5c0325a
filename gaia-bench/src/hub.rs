//! Scoring hub client and submission payloads

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use gaia::Answer;

pub const DEFAULT_API_URL: &str = "https://agents-course-unit4-scoring.hf.space";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Error types for hub requests
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Hub returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Parse(String),
}

/// One entry of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionEntry {
    pub task_id: String,
    pub submitted_answer: String,
}

/// Question as served by the hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubQuestion {
    pub task_id: String,
    pub question: String,
    #[serde(rename = "Level", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<serde_json::Value>,
    #[serde(default)]
    pub file_name: String,
}

/// Pair each task id with its submitted answer, skipping incomplete records
pub fn build_answers_payload(answers: &[Answer]) -> Vec<SubmissionEntry> {
    answers
        .iter()
        .filter(|a| !a.task_id.is_empty() && !a.submitted_answer.is_empty())
        .map(|a| SubmissionEntry {
            task_id: a.task_id.clone(),
            submitted_answer: a.submitted_answer.clone(),
        })
        .collect()
}

/// Client for the scoring hub API
pub struct HubClient {
    api_url: String,
    http_client: Client,
}

impl Default for HubClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl HubClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    pub fn questions_url(&self) -> String {
        format!("{}/questions", self.api_url)
    }

    /// Download the hub's question list
    pub async fn fetch_questions(&self) -> Result<Vec<HubQuestion>, HubError> {
        let url = self.questions_url();
        tracing::info!("Fetching questions from: {}", url);

        let response = self
            .http_client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(HubError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let snippet: String = body.chars().take(500).collect();
            HubError::Parse(format!("{} (response text: {})", e, snippet))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaia::{AgentResponse, Question};

    fn answer(task_id: &str, submitted: &str) -> Answer {
        let mut a = Answer::from_response(
            &Question::new("placeholder", "q", "x", 1).unwrap(),
            &AgentResponse::new(submitted),
            0.0,
        );
        a.task_id = task_id.to_string();
        a
    }

    #[test]
    fn test_payload_skips_incomplete() {
        let answers = vec![answer("t1", "42"), answer("", "7"), answer("t3", ""), answer("t4", "Paris")];
        let payload = build_answers_payload(&answers);
        assert_eq!(
            payload,
            vec![
                SubmissionEntry { task_id: "t1".into(), submitted_answer: "42".into() },
                SubmissionEntry { task_id: "t4".into(), submitted_answer: "Paris".into() },
            ]
        );
    }

    #[test]
    fn test_payload_json_shape() {
        let json = serde_json::to_value(build_answers_payload(&[answer("t1", "42")])).unwrap();
        assert_eq!(json, serde_json::json!([{"task_id": "t1", "submitted_answer": "42"}]));
    }

    #[test]
    fn test_questions_url() {
        assert_eq!(
            HubClient::default().questions_url(),
            "https://agents-course-unit4-scoring.hf.space/questions"
        );
        assert_eq!(HubClient::new("http://localhost:7860/").questions_url(), "http://localhost:7860/questions");
    }

    #[test]
    fn test_hub_question_parse() {
        let raw = r#"[{"task_id": "8e867cd7", "question": "How many albums?", "Level": "1", "file_name": ""}]"#;
        let questions: Vec<HubQuestion> = serde_json::from_str(raw).unwrap();
        assert_eq!(questions[0].task_id, "8e867cd7");
        assert_eq!(questions[0].file_name, "");
    }
}
