//! Quiz questions: entries, the pool, and the source battles draw from.

pub mod question;
pub mod bank;

pub use question::{Question, QuestionId, ANSWER_COUNT};
pub use bank::{builtin_questions, BankSource, QuestionBank, QuestionSource};
