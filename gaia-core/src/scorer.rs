//! Answer scoring against a reference answer
//!
//! The comparison mode is picked from the shape of the **expected** answer,
//! never the submitted one, so a submission cannot choose a more lenient
//! comparison by changing its format.
//!
//! | expected shape              | mode    | rule                                   |
//! |-----------------------------|---------|----------------------------------------|
//! | contains `", "`             | list    | same length, element-wise, in order    |
//! | parses as a number          | numeric | parsed values equal                    |
//! | anything else               | string  | normalized text equal                  |

use serde::{Deserialize, Serialize};

use crate::normalize::{is_list, normalize_number, normalize_text, split_list};

/// Comparison mode chosen from an expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Numeric,
    List,
    String,
}

impl AnswerKind {
    /// Classify an expected answer.
    pub fn of(expected: &str) -> Self {
        if is_list(expected) {
            AnswerKind::List
        } else if normalize_number(expected).is_some() {
            AnswerKind::Numeric
        } else {
            AnswerKind::String
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Numeric => "numeric",
            AnswerKind::List => "list",
            AnswerKind::String => "string",
        }
    }
}

impl std::fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a comparison together with the mode that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub kind: AnswerKind,
    pub matched: bool,
}

/// Compare a submitted answer with the expected one.
///
/// Never fails: an empty submission or a shape mismatch is simply a miss.
///
/// ```
/// use gaia::question_scorer;
///
/// assert!(question_scorer("1,234", "1234"));
/// assert!(question_scorer("The Eiffel Tower", "eiffel tower"));
/// assert!(!question_scorer("Paris, London", "London, Paris"));
/// ```
pub fn question_scorer(submitted: &str, expected: &str) -> bool {
    score_detailed(submitted, expected).matched
}

/// [`question_scorer`] as the 0/1 integer stored in answer records.
pub fn score(submitted: &str, expected: &str) -> u8 {
    u8::from(question_scorer(submitted, expected))
}

/// Compare and report which mode was used.
pub fn score_detailed(submitted: &str, expected: &str) -> ScoreDetail {
    let kind = AnswerKind::of(expected);

    if submitted.trim().is_empty() {
        return ScoreDetail { kind, matched: false };
    }

    let matched = match kind {
        AnswerKind::List => lists_match(submitted, expected),
        AnswerKind::Numeric | AnswerKind::String => element_matches(submitted, expected),
    };

    ScoreDetail { kind, matched }
}

fn lists_match(submitted: &str, expected: &str) -> bool {
    let submitted = split_list(submitted);
    let expected = split_list(expected);

    submitted.len() == expected.len()
        && submitted
            .iter()
            .zip(&expected)
            .all(|(s, e)| element_matches(s, e))
}

/// Numeric comparison when the expected value is a number, string comparison
/// otherwise. A submission that fails to parse falls back to text.
fn element_matches(submitted: &str, expected: &str) -> bool {
    if let Some(expected_num) = normalize_number(expected) {
        if let Some(submitted_num) = normalize_number(submitted) {
            return submitted_num == expected_num;
        }
    }
    normalize_text(submitted) == normalize_text(expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_expected() {
        assert_eq!(AnswerKind::of("42"), AnswerKind::Numeric);
        assert_eq!(AnswerKind::of("$1,000"), AnswerKind::Numeric);
        assert_eq!(AnswerKind::of("Paris, London"), AnswerKind::List);
        assert_eq!(AnswerKind::of("1, 2"), AnswerKind::List);
        assert_eq!(AnswerKind::of("Paris"), AnswerKind::String);
        assert_eq!(AnswerKind::of("Paris,London"), AnswerKind::String);
    }

    #[test]
    fn test_numeric_equivalence() {
        assert_eq!(score("42", "42"), 1);
        assert_eq!(score("42.0", "42"), 1);
        assert_eq!(score("1,234", "1234"), 1);
        assert_eq!(score("$1234", "1,234"), 1);
        assert_eq!(score("43", "42"), 0);
        assert_eq!(score("42.01", "42"), 0);
    }

    #[test]
    fn test_numeric_mismatch_falls_back_to_text() {
        assert_eq!(score("forty-two", "42"), 0);
        assert_eq!(score("42 apples", "42"), 0);
    }

    #[test]
    fn test_unit_must_match_verbatim() {
        assert_eq!(AnswerKind::of("17 km"), AnswerKind::String);
        assert_eq!(score("17 km", "17 km"), 1);
        assert_eq!(score("17000 m", "17 km"), 0);
        assert_eq!(score("17", "17 km"), 0);
    }

    #[test]
    fn test_list_order_sensitive() {
        assert_eq!(score("Paris, London", "London, Paris"), 0);
        assert_eq!(score("Paris, London", "Paris, London"), 1);
        assert_eq!(score("paris, the london", "Paris, London"), 1);
    }

    #[test]
    fn test_list_length_must_match() {
        assert_eq!(score("1, 2", "1, 2, 3"), 0);
        assert_eq!(score("1, 2, 3, 4", "1, 2, 3"), 0);
        assert_eq!(score("1,2,3", "1, 2, 3"), 0);
    }

    #[test]
    fn test_list_elements_numeric() {
        assert_eq!(score("1.0, 2, 3,000", "1, 2.0, 3000"), 1);
        assert_eq!(score("b, 2.5", "B, 2.50"), 1);
    }

    #[test]
    fn test_string_normalization() {
        assert_eq!(score("The Eiffel Tower", "eiffel tower"), 1);
        assert_eq!(score("a Cat", "cat"), 1);
        assert_eq!(score("Right", "right."), 1);
        assert_eq!(score("Eiffel", "eiffel tower"), 0);
    }

    #[test]
    fn test_empty_submission() {
        assert_eq!(score("", "42"), 0);
        assert_eq!(score("   ", "Paris"), 0);
        assert_eq!(score("", "a, b"), 0);
        assert_eq!(score("", ""), 0);
    }

    #[test]
    fn test_error_answer_scores_zero() {
        assert_eq!(score("Error: request timed out", "42"), 0);
        assert_eq!(score("Error: request timed out", "timeout"), 0);
    }

    #[test]
    fn test_detail_reports_kind() {
        let detail = score_detailed("3", "3");
        assert_eq!(detail, ScoreDetail { kind: AnswerKind::Numeric, matched: true });
        let detail = score_detailed("", "x, y");
        assert_eq!(detail, ScoreDetail { kind: AnswerKind::List, matched: false });
    }
}
