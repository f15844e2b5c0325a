//! Property-based tests for extraction and scoring using proptest

use gaia::normalize::{normalize_number, normalize_text};
use gaia::{extract_final_answer, score, FINAL_ANSWER_MARKER};
use proptest::prelude::*;

// =========================================================================
// Strategies
// =========================================================================

/// Free text that cannot contain the marker (no colon, no upper-case run)
fn arb_marker_free_text() -> impl Strategy<Value = String> {
    "[a-z0-9 .,!?\n\t-]{0,80}"
}

/// A single-line answer with no surrounding whitespace
fn arb_answer_line() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][A-Za-z0-9 .,$%-]{0,30}[A-Za-z0-9]"
}

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{2,10}".prop_filter("not an article", |w| !["an", "the"].contains(&w.as_str()))
}

// =========================================================================
// Extraction
// =========================================================================

proptest! {
    #[test]
    fn prop_no_marker_is_trim(text in arb_marker_free_text()) {
        prop_assert_eq!(extract_final_answer(&text), text.trim());
    }

    #[test]
    fn prop_marker_line_is_answer(
        prefix in arb_marker_free_text(),
        answer in arb_answer_line(),
        trailer in arb_marker_free_text(),
    ) {
        let text = format!("{} {} {}\n{}", prefix, FINAL_ANSWER_MARKER, answer, trailer);
        prop_assert_eq!(extract_final_answer(&text), answer.as_str());
    }

    #[test]
    fn prop_last_marker_wins(
        first in arb_answer_line(),
        second in arb_answer_line(),
        middle in arb_marker_free_text(),
    ) {
        let text = format!(
            "{} {}\n{}\n{} {}",
            FINAL_ANSWER_MARKER, first, middle, FINAL_ANSWER_MARKER, second
        );
        prop_assert_eq!(extract_final_answer(&text), second.as_str());
    }

    #[test]
    fn prop_extracted_answer_is_single_line(text in "[A-Za-z :\n]{0,120}") {
        let extracted = extract_final_answer(&text);
        if text.contains(FINAL_ANSWER_MARKER) {
            prop_assert!(!extracted.contains('\n'));
        }
        prop_assert_eq!(extracted, extracted.trim());
    }
}

// =========================================================================
// Scoring
// =========================================================================

proptest! {
    #[test]
    fn prop_integer_matches_itself_and_float_form(n in -1_000_000i64..1_000_000i64) {
        let expected = n.to_string();
        prop_assert_eq!(score(&expected, &expected), 1);
        prop_assert_eq!(score(&format!("{}.0", n), &expected), 1);
    }

    #[test]
    fn prop_grouped_thousands_match(n in 1_000u32..1_000_000u32) {
        let grouped = format!("{},{:03}", n / 1000, n % 1000);
        prop_assert_eq!(score(&grouped, &n.to_string()), 1);
        prop_assert_eq!(normalize_number(&grouped), Some(n as f64));
    }

    #[test]
    fn prop_text_case_and_article_insensitive(words in prop::collection::vec(arb_word(), 1..5)) {
        let expected = words.join(" ");
        let submitted = format!("The {}", expected.to_uppercase());
        prop_assert_eq!(score(&submitted, &expected), 1);
    }

    #[test]
    fn prop_empty_submission_never_matches(expected in "[A-Za-z0-9 ,.]{0,30}") {
        prop_assert_eq!(score("", &expected), 0);
        prop_assert_eq!(score(" \t\n", &expected), 0);
    }

    #[test]
    fn prop_score_is_deterministic(a in "[A-Za-z0-9 ,.$%]{0,20}", b in "[A-Za-z0-9 ,.$%]{0,20}") {
        prop_assert_eq!(score(&a, &b), score(&a, &b));
    }

    #[test]
    fn prop_normalize_text_idempotent(text in "[A-Za-z .,'!-]{0,40}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
    }

    #[test]
    fn prop_list_reversal_mismatch(words in prop::collection::btree_set(arb_word(), 2..5)) {
        let words: Vec<String> = words.into_iter().collect();
        let expected = words.join(", ");
        let reversed: Vec<String> = words.iter().rev().cloned().collect();
        prop_assert_eq!(score(&expected, &expected), 1);
        prop_assert_eq!(score(&reversed.join(", "), &expected), 0);
    }
}
