//! Async evaluation runner: drives an agent over a question list

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::sleep;

use gaia::{AgentResponse, Answer, Question};

use crate::agent::{Agent, AgentError};
use crate::config::BenchmarkConfig;
use crate::providers::ProviderError;
use crate::reporting::print_run_block;

/// Configuration for the runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Questions evaluated concurrently
    pub parallel: usize,
    /// Number of retries on a retryable failure
    pub retry_count: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Maximum retry delay in milliseconds
    pub max_retry_delay_ms: u64,
    /// Per-attempt timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            parallel: 1,
            retry_count: 3,
            retry_delay_ms: 1000,
            max_retry_delay_ms: 60_000,
            timeout_ms: 600_000,
        }
    }
}

impl From<&BenchmarkConfig> for RunnerConfig {
    fn from(config: &BenchmarkConfig) -> Self {
        Self {
            parallel: config.parallel_requests,
            retry_count: config.retry_count,
            retry_delay_ms: config.retry_delay_ms,
            max_retry_delay_ms: config.max_retry_delay_ms,
            timeout_ms: config.timeout_ms,
        }
    }
}

/// Runs an agent over questions and grades each answer
///
/// A failing question never stops the batch: its error text becomes the
/// submitted answer and scores 0.
pub struct EvalRunner {
    agent: Arc<dyn Agent>,
    config: RunnerConfig,
    semaphore: Arc<Semaphore>,
    progress: Arc<dyn ProgressCallback>,
}

impl EvalRunner {
    pub fn new(agent: Arc<dyn Agent>, config: RunnerConfig) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.parallel.max(1)));
        Self {
            agent,
            config,
            semaphore,
            progress: Arc::new(NoOpProgress),
        }
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Evaluate every question; answers come back in question order
    pub async fn evaluate(&self, questions: &[Question]) -> Vec<Answer> {
        let total = questions.len();
        let completed = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(total);

        for (index, question) in questions.iter().enumerate() {
            let question = question.clone();
            let agent = Arc::clone(&self.agent);
            let config = self.config.clone();
            let semaphore = Arc::clone(&self.semaphore);
            let progress = Arc::clone(&self.progress);
            let completed = Arc::clone(&completed);

            handles.push(tokio::spawn(async move {
                // The semaphore is never closed, so acquisition only fails on shutdown
                let _permit = semaphore.acquire_owned().await.ok();
                progress.on_question_start(&question, index, total);

                let answer = evaluate_question(agent.as_ref(), &config, &question).await;

                progress.on_question_complete(&answer);
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                progress.on_progress(done, total);
                answer
            }));
        }

        let mut answers = Vec::with_capacity(total);
        for (handle, question) in handles.into_iter().zip(questions) {
            match handle.await {
                Ok(answer) => answers.push(answer),
                Err(e) => {
                    tracing::error!("Question {} panicked: {}", question.task_id, e);
                    answers.push(Answer::from_error(question, &format!("evaluation panicked: {}", e), 0.0));
                }
            }
        }

        answers
    }

    /// Evaluate a single question
    pub async fn evaluate_one(&self, question: &Question) -> Answer {
        evaluate_question(self.agent.as_ref(), &self.config, question).await
    }
}

/// Time and grade one question, turning a final failure into an error answer
async fn evaluate_question(agent: &dyn Agent, config: &RunnerConfig, question: &Question) -> Answer {
    let start = Instant::now();
    let outcome = run_with_retries(agent, config, question).await;
    let duration_s = start.elapsed().as_secs_f64();

    match outcome {
        Ok(response) => Answer::from_response(question, &response, duration_s),
        Err(e) => {
            tracing::error!("Error on question {}: {}", question.task_id, e);
            Answer::from_error(question, &e.to_string(), duration_s)
        }
    }
}

async fn run_with_retries(
    agent: &dyn Agent,
    config: &RunnerConfig,
    question: &Question,
) -> Result<AgentResponse, AgentError> {
    let mut delay = config.retry_delay_ms.min(config.max_retry_delay_ms);
    let mut attempt = 0;

    loop {
        let error = match try_run(agent, config, question).await {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        if attempt >= config.retry_count || !error.is_retryable() {
            return Err(error);
        }
        attempt += 1;

        let wait = match &error {
            AgentError::Provider(ProviderError::RateLimited { retry_after_ms }) => {
                (*retry_after_ms).min(config.max_retry_delay_ms)
            }
            _ => delay,
        };
        tracing::warn!(
            "Retry {} for question {} in {}ms: {}",
            attempt,
            question.task_id,
            wait,
            error
        );
        sleep(Duration::from_millis(wait)).await;
        delay = delay.saturating_mul(2).min(config.max_retry_delay_ms);
    }
}

/// Single attempt bounded by the configured timeout
async fn try_run(
    agent: &dyn Agent,
    config: &RunnerConfig,
    question: &Question,
) -> Result<AgentResponse, AgentError> {
    let timeout = Duration::from_millis(config.timeout_ms);
    let run = agent.run(&question.question, question.file_path.as_deref());

    match tokio::time::timeout(timeout, run).await {
        Ok(result) => result,
        Err(_) => Err(AgentError::Provider(ProviderError::Timeout {
            timeout_ms: config.timeout_ms,
        })),
    }
}

/// Progress callback for tracking execution
pub trait ProgressCallback: Send + Sync {
    fn on_question_start(&self, question: &Question, index: usize, total: usize);
    fn on_question_complete(&self, answer: &Answer);
    fn on_progress(&self, completed: usize, total: usize);
}

/// Default no-op progress callback
pub struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_question_start(&self, _question: &Question, _index: usize, _total: usize) {}
    fn on_question_complete(&self, _answer: &Answer) {}
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Console progress callback printing one block per graded question
pub struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_question_start(&self, question: &Question, index: usize, total: usize) {
        tracing::info!("Starting question {}/{}: {}", index + 1, total, question.task_id);
    }

    fn on_question_complete(&self, answer: &Answer) {
        print_run_block(answer);
    }

    fn on_progress(&self, completed: usize, total: usize) {
        tracing::info!("Progress: {}/{} questions complete", completed, total);
    }
}
