use crate::error::ValidationError;
use crate::models::WordEntry;

/// Number of leading characters the learner types.
pub const ANSWER_LEN: usize = 2;

/// Gate applied before an answer is checked.
pub fn validate_answer_input(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.chars().count() != ANSWER_LEN {
        return Err(ValidationError::AnswerLength);
    }
    if !input.is_ascii() {
        return Err(ValidationError::NonAscii);
    }
    Ok(())
}

pub fn is_correct(input: &str, target: &WordEntry) -> bool {
    target
        .word
        .to_lowercase()
        .starts_with(&input.trim().to_lowercase())
}
