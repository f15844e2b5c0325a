//! GAIA answer evaluation core
//!
//! Turns a free-form agent transcript into a graded answer and aggregates
//! grades per difficulty level.
//!
//! # Example
//!
//! ```rust
//! use gaia::{extract_final_answer, question_scorer, AgentResponse, Answer, Question, ScoreSummary};
//!
//! let question = Question::new("task-1", "How many legs does a spider have?", "8", 1).unwrap();
//! let transcript = "Spiders are arachnids.\nFINAL ANSWER: 8.0\nArachnids have eight legs.";
//!
//! let submitted = extract_final_answer(transcript);
//! assert!(question_scorer(submitted, &question.expected_answer));
//!
//! let answer = Answer::from_response(&question, &AgentResponse::new(submitted), 1.2);
//! let summary = ScoreSummary::from_answers(&[answer]);
//! assert_eq!(summary.total.total_score, 1);
//! ```

pub mod aggregate;
pub mod extract;
pub mod normalize;
pub mod scorer;
mod types;

pub use aggregate::{LevelStats, ScoreSummary};
pub use extract::{extract_final_answer, has_final_answer, FINAL_ANSWER_MARKER};
pub use scorer::{question_scorer, score, score_detailed, AnswerKind, ScoreDetail};
pub use types::{
    validate_level, AgentResponse, Answer, Error, Question, Result, ToolInvocation, MAX_LEVEL,
    MIN_LEVEL,
};
