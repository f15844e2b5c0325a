//! Level-stratified score aggregation

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Answer;

/// Count and summed score for a group of answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub count: usize,
    pub total_score: u64,
}

impl LevelStats {
    /// Score as a percentage of the question count; 0 for an empty group.
    pub fn percentage(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            100.0 * self.total_score as f64 / self.count as f64
        }
    }

    fn add(&mut self, score: u8) {
        self.count += 1;
        self.total_score += u64::from(score);
    }
}

/// Overall and per-level statistics for a set of answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub total: LevelStats,
    /// Only levels that have at least one answer appear
    pub per_level: BTreeMap<u8, LevelStats>,
}

impl ScoreSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one answer into the summary.
    pub fn accumulate(mut self, answer: &Answer) -> Self {
        self.total.add(answer.score);
        self.per_level.entry(answer.level).or_default().add(answer.score);
        self
    }

    /// Summarize answers in order.
    pub fn from_answers<'a>(answers: impl IntoIterator<Item = &'a Answer>) -> Self {
        answers.into_iter().fold(Self::new(), Self::accumulate)
    }

    pub fn level(&self, level: u8) -> Option<&LevelStats> {
        self.per_level.get(&level)
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total score: {}/{} ({:.2}%)",
            self.total.total_score,
            self.total.count,
            self.total.percentage()
        )?;
        for (level, stats) in &self.per_level {
            writeln!(f)?;
            writeln!(f, "Level {}:", level)?;
            writeln!(f, "  Number of questions: {}", stats.count)?;
            writeln!(f, "  Total score: {}", stats.total_score)?;
            writeln!(f, "  Average score: {:.2}%", stats.percentage())?;
        }
        Ok(())
    }
}
