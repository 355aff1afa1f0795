use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub meaning: String,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            meaning: meaning.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl Outcome {
    /// Label written to the export file.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Correct => "正解",
            Outcome::Incorrect => "不正解",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub order: u32,
    pub word: String,
    pub meaning: String,
    pub result: Outcome,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastOutcome {
    pub result: Outcome,
    pub word: String,
    pub elapsed_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Quiz,
    Feedback,
    Done,
    Finished,
}

#[derive(Debug, PartialEq)]
pub enum AppState {
    Locked,
    Menu,
    Quiz,
    QuizQuitConfirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}
