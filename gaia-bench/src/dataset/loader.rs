//! Question loading from GAIA `metadata.jsonl` files

use serde::Deserialize;
use std::path::{Path, PathBuf};

use gaia::Question;

use super::DatasetSplit;

/// Reference answer used by splits that withhold the real one
pub const PLACEHOLDER_ANSWER: &str = "?";

/// Error type for question loading
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid question on line {line}: {source}")]
    Invalid {
        line: usize,
        #[source]
        source: gaia::Error,
    },
}

/// One line of `metadata.jsonl`
#[derive(Deserialize)]
struct MetadataRecord {
    task_id: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Level")]
    level: LevelField,
    #[serde(rename = "Final answer", default)]
    final_answer: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
}

/// Levels appear both as numbers and as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelField {
    Int(i64),
    Text(String),
}

impl LevelField {
    fn value(&self) -> Result<i64, String> {
        match self {
            LevelField::Int(n) => Ok(*n),
            LevelField::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("Level is not a number: {:?}", s)),
        }
    }
}

/// Load every question of a split from `{data_dir}/{split}/metadata.jsonl`
pub fn load_questions(data_dir: &Path, split: DatasetSplit) -> Result<Vec<Question>, LoadError> {
    let path = split.metadata_path(data_dir);
    let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    let questions = load_questions_from_str(&content, &split.dir(data_dir))?;
    tracing::debug!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Parse JSONL content; attachments resolve relative to `split_dir`
pub fn load_questions_from_str(content: &str, split_dir: &Path) -> Result<Vec<Question>, LoadError> {
    let mut questions = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let record: MetadataRecord = serde_json::from_str(line).map_err(|e| LoadError::Parse {
            line: line_no,
            message: e.to_string(),
        })?;
        questions.push(to_question(record, split_dir, line_no)?);
    }

    Ok(questions)
}

fn to_question(record: MetadataRecord, split_dir: &Path, line: usize) -> Result<Question, LoadError> {
    let level = record
        .level
        .value()
        .map_err(|message| LoadError::Parse { line, message })?;
    let expected = record
        .final_answer
        .unwrap_or_else(|| PLACEHOLDER_ANSWER.to_string());

    let question = Question::new(record.task_id, record.question, expected, level)
        .map_err(|source| LoadError::Invalid { line, source })?;

    Ok(match record.file_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => question.with_file(split_dir.join(name)),
        _ => question,
    })
}
