use std::path::Path;

/// Instructions asking for the `FINAL ANSWER:` template and GAIA answer formatting
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a general AI assistant. I will ask you a question. \
Report your thoughts, and finish your answer with the following template: \
FINAL ANSWER: [YOUR FINAL ANSWER]. \
YOUR FINAL ANSWER should be a number OR as few words as possible OR a comma separated list of \
numbers and/or strings. \
If you are asked for a number, don't use comma to write your number neither use units such as $ \
or percent sign unless specified otherwise. \
If you are asked for a string, don't use articles, neither abbreviations (e.g. for cities), and \
write the digits in plain text unless specified otherwise. \
If you are asked for a comma separated list, apply the above rules depending of whether the \
element to be put in the list is a number or a string.";

const DEFAULT_FILE_NOTE: &str = "The question comes with an attached file: {path}";

/// System prompt plus the note announcing an attachment
#[derive(Debug, Clone, PartialEq)]
pub struct PromptTemplate {
    system: String,
    /// `{path}` is replaced with the attachment path
    file_note: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM_PROMPT.to_string(),
            file_note: DEFAULT_FILE_NOTE.to_string(),
        }
    }
}

impl PromptTemplate {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            ..Self::default()
        }
    }

    pub fn with_file_note(mut self, note: impl Into<String>) -> Self {
        self.file_note = note.into();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system
    }

    /// First user turn: the question, then the attachment note if any
    pub fn user_message(&self, question: &str, file_path: Option<&Path>) -> String {
        match file_path {
            Some(path) => format!(
                "{}\n\n{}",
                question,
                self.file_note.replace("{path}", &path.display().to_string())
            ),
            None => question.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_mentions_marker() {
        assert!(PromptTemplate::default()
            .system_prompt()
            .contains(gaia::FINAL_ANSWER_MARKER));
    }

    #[test]
    fn test_user_message_without_file() {
        let prompt = PromptTemplate::default();
        assert_eq!(prompt.user_message("What is 2+2?", None), "What is 2+2?");
    }

    #[test]
    fn test_user_message_with_file() {
        let prompt = PromptTemplate::new("sys").with_file_note("Attachment at {path}.");
        let msg = prompt.user_message("Sum column B.", Some(Path::new("data/validation/x.csv")));
        assert_eq!(msg, "Sum column B.\n\nAttachment at data/validation/x.csv.");
        assert_eq!(prompt.system_prompt(), "sys");
    }
}
