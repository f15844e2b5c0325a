//! GAIA dataset access: splits, loading and question selection

pub mod loader;

pub use loader::{load_questions, load_questions_from_str, LoadError};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use gaia::Question;

/// Dataset split
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSplit {
    /// Public split with reference answers
    #[default]
    Validation,
    /// Held-out split; reference answers are placeholders
    Test,
}

impl DatasetSplit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetSplit::Validation => "validation",
            DatasetSplit::Test => "test",
        }
    }

    /// Directory holding this split under `data_dir`
    pub fn dir(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.as_str())
    }

    /// `{data_dir}/{split}/metadata.jsonl`
    pub fn metadata_path(&self, data_dir: &Path) -> PathBuf {
        self.dir(data_dir).join("metadata.jsonl")
    }
}

impl fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DatasetSplit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "validation" => Ok(DatasetSplit::Validation),
            "test" => Ok(DatasetSplit::Test),
            other => Err(format!("Unknown dataset split: {}", other)),
        }
    }
}

/// Narrow a question list to a level and/or a task id fragment.
///
/// The level filter runs first; the task id filter is a case-insensitive
/// substring match on what remains.
pub fn select_questions(
    questions: Vec<Question>,
    level: Option<u8>,
    task_id: Option<&str>,
) -> Vec<Question> {
    let by_level: Vec<Question> = match level {
        Some(level) => questions.into_iter().filter(|q| q.level == level).collect(),
        None => questions,
    };

    let Some(task_id) = task_id else {
        return by_level;
    };

    let needle = task_id.to_lowercase();
    let selected: Vec<Question> = by_level
        .into_iter()
        .filter(|q| q.task_id.to_lowercase().contains(&needle))
        .collect();

    if selected.is_empty() {
        tracing::warn!("No questions found matching ID: {}", task_id);
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions() -> Vec<Question> {
        vec![
            Question::new("c61d22de-5f6c", "q1", "a", 1).unwrap(),
            Question::new("17b5a6a3-bc87", "q2", "b", 2).unwrap(),
            Question::new("04a04a9b-226c", "q3", "c", 1).unwrap(),
            Question::new("C61D9999-0000", "q4", "d", 3).unwrap(),
        ]
    }

    fn ids(questions: &[Question]) -> Vec<&str> {
        questions.iter().map(|q| q.task_id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_returns_all() {
        assert_eq!(select_questions(questions(), None, None).len(), 4);
    }

    #[test]
    fn test_level_filter() {
        let selected = select_questions(questions(), Some(1), None);
        assert_eq!(ids(&selected), vec!["c61d22de-5f6c", "04a04a9b-226c"]);
    }

    #[test]
    fn test_task_id_is_case_insensitive_substring() {
        let selected = select_questions(questions(), None, Some("c61d"));
        assert_eq!(ids(&selected), vec!["c61d22de-5f6c", "C61D9999-0000"]);
    }

    #[test]
    fn test_level_then_task_id() {
        let selected = select_questions(questions(), Some(3), Some("c61d"));
        assert_eq!(ids(&selected), vec!["C61D9999-0000"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(select_questions(questions(), Some(2), Some("c61d")).is_empty());
    }

    #[test]
    fn test_split_paths() {
        let path = DatasetSplit::Test.metadata_path(Path::new("data"));
        assert_eq!(path, PathBuf::from("data/test/metadata.jsonl"));
        assert_eq!("Validation".parse::<DatasetSplit>(), Ok(DatasetSplit::Validation));
        assert!("dev".parse::<DatasetSplit>().is_err());
    }
}
