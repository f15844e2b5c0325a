//! Results reporting: console output and answers files

pub mod answers_file;

pub use answers_file::{answers_filename, load_answers, save_answers, AnswersFileName, PersistError};

use gaia::{score_detailed, Answer, ScoreSummary};

use crate::dataset::DatasetSplit;

pub fn banner(title: &str) -> String {
    format!("{0}{1}{0}", "-".repeat(30), title)
}

/// Block printed after each question during a run
pub fn format_run_block(answer: &Answer) -> String {
    let mut out = format!("\n{}\n\n", banner(&format!("Question {}", answer.task_id)));
    out.push_str(&format!("Level: {}\n", answer.level));
    out.push_str(&format!("Content: {}\n", answer.question));
    if let Some(path) = &answer.file_path {
        out.push_str(&format!("File: {}\n", path.display()));
    }
    out.push_str(&format!("Response: {}\n", answer.submitted_answer));
    out.push_str(&format!("Expected: {}\n", answer.expected_answer));
    out.push_str(&format!("Score: {}\n", answer.score));
    out.push_str(&format!("Duration: {:.2} seconds\n", answer.duration_s));
    out.push_str(&format!("Tools: {:?}\n", answer.tools));
    out.push_str(&format!("Number of steps: {}", answer.number_of_steps));
    out
}

pub fn print_run_block(answer: &Answer) {
    println!("{}", format_run_block(answer));
}

/// Full record, as shown when reviewing an answers file
pub fn format_answer(answer: &Answer) -> String {
    let mut lines = vec![
        format!("Task ID: {}", answer.task_id),
        format!("Question: {}", answer.question),
    ];
    if let Some(path) = &answer.file_path {
        lines.push(format!("File: {}", path.display()));
    }
    lines.extend([
        format!("Submitted answer: {}", answer.submitted_answer),
        format!("Expected answer: {}", answer.expected_answer),
        format!("Score: {}", answer.score),
        format!(
            "Compared as: {}",
            score_detailed(&answer.submitted_answer, &answer.expected_answer).kind
        ),
        format!("Duration: {:.2} seconds", answer.duration_s),
        format!("Tools: {:?}", answer.tools),
        format!("Number of steps: {}", answer.number_of_steps),
        format!("Level: {}", answer.level),
    ]);
    lines.join("\n")
}

pub fn print_answer(answer: &Answer) {
    println!("{}", format_answer(answer));
}

/// Wrong answers, optionally restricted to one level
pub fn wrong_answers(answers: &[Answer], level: Option<u8>) -> impl Iterator<Item = &Answer> {
    answers
        .iter()
        .filter(move |a| !a.is_correct() && level.map_or(true, |l| a.level == l))
}

pub fn print_wrong_answers(answers: &[Answer], level: Option<u8>) {
    println!("{0}Wrong Answers{0}", "*".repeat(30));
    for answer in wrong_answers(answers, level) {
        println!("\n{}\n", banner(&format!("Question {}", answer.task_id)));
        print_answer(answer);
    }
}

/// Header naming the evaluated slice of the dataset
pub fn format_run_header(split: DatasetSplit, level: Option<u8>) -> String {
    let level = level.map_or_else(|| "All".to_string(), |l| l.to_string());
    format!(
        "\n{}\n\nDatasets:\n  Dataset: {}\n  Level: {}",
        banner("Results"),
        split,
        level
    )
}

/// Generate a console report
pub fn print_console_report(summary: &ScoreSummary) {
    print!("{}", summary);
}
