//! Answers file naming and JSON persistence

use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use gaia::Answer;

use crate::dataset::DatasetSplit;

/// Error type for answers file I/O
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Components of `{date}_{dataset}_answers[_level_N][_task_ID].json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswersFileName {
    pub date: NaiveDate,
    pub split: DatasetSplit,
    pub level: Option<u8>,
    pub task_id: Option<String>,
}

impl AnswersFileName {
    pub fn new(date: NaiveDate, split: DatasetSplit, level: Option<u8>, task_id: Option<&str>) -> Self {
        Self {
            date,
            split,
            level,
            task_id: task_id.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    /// Recover the run parameters from a file name produced by [`Display`](fmt::Display)
    pub fn parse(file_name: &str) -> Option<Self> {
        static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
        let pattern = PATTERN
            .get_or_init(|| {
                Regex::new(r"^(\d{8})_(validation|test)_answers(?:_level_([1-3]))?(?:_task_(.+))?\.json$").ok()
            })
            .as_ref()?;

        let caps = pattern.captures(file_name)?;
        Some(Self {
            date: NaiveDate::parse_from_str(caps.get(1)?.as_str(), "%Y%m%d").ok()?,
            split: caps.get(2)?.as_str().parse().ok()?,
            level: caps.get(3).and_then(|m| m.as_str().parse().ok()),
            task_id: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for AnswersFileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_answers", self.date.format("%Y%m%d"), self.split)?;
        if let Some(level) = self.level {
            write!(f, "_level_{}", level)?;
        }
        if let Some(task_id) = &self.task_id {
            // Keep the name a single path component
            let safe: String = task_id
                .chars()
                .map(|c| if c == '/' || c == '\\' { '_' } else { c })
                .collect();
            write!(f, "_task_{}", safe)?;
        }
        write!(f, ".json")
    }
}

/// File name for a run's answers
pub fn answers_filename(
    date: NaiveDate,
    split: DatasetSplit,
    level: Option<u8>,
    task_id: Option<&str>,
) -> String {
    AnswersFileName::new(date, split, level, task_id).to_string()
}

/// Write answers as a pretty JSON array into `dir`, creating it if needed
///
/// The whole payload is serialized before the file is opened, so a failed
/// save never leaves a partial file behind from this run.
pub fn save_answers(
    dir: &Path,
    name: &AnswersFileName,
    answers: &[Answer],
) -> Result<PathBuf, PersistError> {
    let path = dir.join(name.to_string());

    let json = serde_json::to_string_pretty(answers).map_err(|source| PersistError::Json {
        path: path.clone(),
        source,
    })?;

    std::fs::create_dir_all(dir).map_err(|source| PersistError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    std::fs::write(&path, json).map_err(|source| PersistError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!("Saved {} answers to {}", answers.len(), path.display());
    Ok(path)
}

/// Read an answers file written by [`save_answers`]
pub fn load_answers(path: &Path) -> Result<Vec<Answer>, PersistError> {
    let content = std::fs::read_to_string(path).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}
