//! Quiz question entries.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};

/// Every question offers exactly this many answers.
pub const ANSWER_COUNT: usize = 4;

/// Unique question identifier, supplied by whoever authors the question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub u64);

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Question({})", self.0)
    }
}

/// A multiple-choice question.
///
/// ```
/// use quiz_conquest::questions::{Question, QuestionId};
///
/// let q = Question::new(QuestionId(1), "2 + 2 = ?", ["3", "4", "5", "22"], 1, "Arithmetic");
/// assert!(q.is_correct(1));
/// assert!(!q.is_correct(0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique id.
    pub id: QuestionId,
    /// Prompt shown to the player.
    pub text: String,
    /// Ordered answer options.
    pub answers: [String; ANSWER_COUNT],
    /// Index of the right answer in `answers`.
    pub correct_index: usize,
    /// Free-form topic label.
    pub category: String,
}

impl Question {
    /// Create a question.
    pub fn new(
        id: QuestionId,
        text: impl Into<String>,
        answers: [&str; ANSWER_COUNT],
        correct_index: usize,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            answers: answers.map(str::to_string),
            correct_index,
            category: category.into(),
        }
    }

    /// Whether `answer_index` is the right answer.
    #[must_use]
    pub fn is_correct(&self, answer_index: usize) -> bool {
        answer_index == self.correct_index
    }

    /// The text of the right answer.
    #[must_use]
    pub fn correct_answer(&self) -> Option<&str> {
        self.answers.get(self.correct_index).map(String::as_str)
    }

    /// Reject blank text, blank answers, blank category, or an out-of-range answer index.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(GameError::InvalidQuestion(format!("{} has no text", self.id)));
        }
        if let Some(blank) = self.answers.iter().position(|a| a.trim().is_empty()) {
            return Err(GameError::InvalidQuestion(format!(
                "{} has a blank answer at {blank}",
                self.id
            )));
        }
        if self.correct_index >= ANSWER_COUNT {
            return Err(GameError::InvalidQuestion(format!(
                "{} marks answer {} correct, only {ANSWER_COUNT} exist",
                self.id, self.correct_index
            )));
        }
        if self.category.trim().is_empty() {
            return Err(GameError::InvalidQuestion(format!("{} has no category", self.id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(QuestionId(7), "sin(30°)", ["0", "1", "0.5", "√3/2"], 2, "Trigonometry")
    }

    #[test]
    fn test_correct_answer() {
        let q = sample();
        assert_eq!(q.correct_answer(), Some("0.5"));
        assert!(q.is_correct(2));
        assert!(!q.is_correct(3));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut blank = sample();
        blank.answers[1] = "  ".into();
        assert!(matches!(blank.validate(), Err(GameError::InvalidQuestion(_))));

        let mut out_of_range = sample();
        out_of_range.correct_index = 4;
        assert!(out_of_range.validate().is_err());

        let mut no_text = sample();
        no_text.text.clear();
        assert!(no_text.validate().is_err());
    }

    #[test]
    fn test_answers_must_be_four() {
        let json = r#"{"id":1,"text":"t","answers":["a","b","c"],"correct_index":0,"category":"x"}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }
}
