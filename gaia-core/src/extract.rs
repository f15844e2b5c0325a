//! Final-answer extraction from agent transcripts
//!
//! Agents are prompted to finish with a line of the form
//! `FINAL ANSWER: <answer>`. The extractor owns exactly that one value:
//! reasoning before the marker and any explanation on the lines after the
//! answer are discarded.

/// Sentinel separating the reasoning trace from the answer to be graded.
pub const FINAL_ANSWER_MARKER: &str = "FINAL ANSWER:";

/// Extract the final answer from a transcript.
///
/// - Without the marker, the whole transcript (trimmed) is the answer.
/// - With the marker, the text after its **last** occurrence is used: models
///   sometimes quote the marker while reasoning before giving the real one.
///   Leading whitespace (newlines included) is skipped, then only the first
///   line is kept.
///
/// ```
/// use gaia::extract_final_answer;
///
/// assert_eq!(extract_final_answer("  42  "), "42");
/// assert_eq!(extract_final_answer("so...\nFINAL ANSWER: Paris\nbecause"), "Paris");
/// assert_eq!(
///     extract_final_answer("FINAL ANSWER: draft\nFINAL ANSWER: final"),
///     "final"
/// );
/// ```
pub fn extract_final_answer(text: &str) -> &str {
    let Some(pos) = text.rfind(FINAL_ANSWER_MARKER) else {
        return text.trim();
    };

    let rest = text[pos + FINAL_ANSWER_MARKER.len()..].trim_start();
    match rest.find('\n') {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

/// Whether the transcript contains the final-answer marker at all.
pub fn has_final_answer(text: &str) -> bool {
    text.contains(FINAL_ANSWER_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_returns_trimmed_input() {
        assert_eq!(extract_final_answer("\n  The answer is 3.\n"), "The answer is 3.");
        assert_eq!(extract_final_answer(""), "");
    }

    #[test]
    fn test_marker_same_line() {
        assert_eq!(extract_final_answer("Thinking. FINAL ANSWER: 17"), "17");
    }

    #[test]
    fn test_trailing_explanation_dropped() {
        let text = "Step 1...\nFINAL ANSWER: egalitarian\nThis follows from the paper.";
        assert_eq!(extract_final_answer(text), "egalitarian");
    }

    #[test]
    fn test_answer_on_next_line() {
        assert_eq!(extract_final_answer("FINAL ANSWER:\n  3\nnotes"), "3");
    }

    #[test]
    fn test_last_marker_wins() {
        let text = "I will write FINAL ANSWER: <x> at the end.\nFINAL ANSWER: 2, 3, 5";
        assert_eq!(extract_final_answer(text), "2, 3, 5");
    }

    #[test]
    fn test_marker_without_content() {
        assert_eq!(extract_final_answer("FINAL ANSWER:"), "");
        assert_eq!(extract_final_answer("FINAL ANSWER:   \n"), "");
    }

    #[test]
    fn test_crlf_line_endings() {
        assert_eq!(extract_final_answer("FINAL ANSWER: 9\r\nmore"), "9");
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert_eq!(extract_final_answer("final answer: 9"), "final answer: 9");
        assert!(!has_final_answer("Final Answer: 9"));
        assert!(has_final_answer("x FINAL ANSWER: 9"));
    }
}
