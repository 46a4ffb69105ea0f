//! The question pool and the question-source contract.
//!
//! The pool is the built-in fallback set plus user-authored questions.
//! The editor owns the authored list; battles only draw from it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::question::{Question, QuestionId};
use crate::core::{GameError, GameRng, Result};

/// Supplies questions to a battle.
///
/// `draw` picks uniformly among questions tagged `category` when any
/// exist, otherwise uniformly from the whole pool. `None` means the pool
/// is empty.
pub trait QuestionSource {
    /// Draw one question.
    fn draw(&mut self, category: Option<&str>) -> Option<Question>;
}

/// Questions that are always available.
#[must_use]
pub fn builtin_questions() -> Vec<Question> {
    vec![
        Question::new(QuestionId(1), "25 * 4 = ?", ["50", "100", "75", "125"], 1, "Arithmetic"),
        Question::new(QuestionId(2), "120 / 6 = ?", ["20", "12", "60", "30"], 0, "Arithmetic"),
        Question::new(QuestionId(5), "Simplify: 2x + 3x", ["5x", "6x", "5x^2", "x"], 0, "Algebra"),
        Question::new(QuestionId(8), "sin(30°)", ["0", "1", "0.5", "√3/2"], 2, "Trigonometry"),
        Question::new(QuestionId(11), "50% of 80", ["40", "20", "60", "30"], 0, "Percentages"),
    ]
}

/// Built-in plus user-authored questions.
///
/// Serializes as the authored questions and a flag saying whether the
/// built-ins are in the pool; the built-ins themselves are never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BankData", into = "BankData")]
pub struct QuestionBank {
    builtin: Vec<Question>,
    custom: Vec<Question>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct BankData {
    #[serde(default = "enabled")]
    builtins: bool,
    custom: Vec<Question>,
}

fn enabled() -> bool {
    true
}

impl From<QuestionBank> for BankData {
    fn from(bank: QuestionBank) -> Self {
        Self {
            builtins: bank.has_builtins(),
            custom: bank.custom,
        }
    }
}

impl TryFrom<BankData> for QuestionBank {
    type Error = GameError;

    fn try_from(data: BankData) -> Result<Self> {
        let mut bank = if data.builtins { Self::new() } else { Self::empty() };
        for question in data.custom {
            bank.upsert_question(question)?;
        }
        Ok(bank)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionBank {
    /// Bank with only the built-in questions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builtin: builtin_questions(),
            custom: Vec::new(),
        }
    }

    /// Bank with no built-ins, for callers that supply their own pool.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            builtin: Vec::new(),
            custom: Vec::new(),
        }
    }

    /// Bank with the built-ins and the given authored questions.
    ///
    /// Invalid entries are rejected as a whole.
    pub fn with_custom(custom: Vec<Question>) -> Result<Self> {
        let mut bank = Self::new();
        for question in custom {
            bank.upsert_question(question)?;
        }
        Ok(bank)
    }

    /// Every question in the pool, built-ins first.
    pub fn all(&self) -> impl Iterator<Item = &Question> {
        self.builtin.iter().chain(self.custom.iter())
    }

    /// Whether the built-in questions are part of the pool.
    #[must_use]
    pub fn has_builtins(&self) -> bool {
        !self.builtin.is_empty()
    }

    /// User-authored questions only.
    #[must_use]
    pub fn custom(&self) -> &[Question] {
        &self.custom
    }

    /// Pool size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    /// True when there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a question by id.
    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.all().find(|q| q.id == id)
    }

    /// Add a question, or replace the authored question with the same id.
    ///
    /// Built-in ids are reserved.
    pub fn upsert_question(&mut self, question: Question) -> Result<()> {
        question.validate()?;
        if self.builtin.iter().any(|q| q.id == question.id) {
            return Err(GameError::InvalidQuestion(format!(
                "{} is reserved for a built-in question",
                question.id
            )));
        }

        match self.custom.iter_mut().find(|q| q.id == question.id) {
            Some(existing) => {
                debug!(id = question.id.0, "Updated question");
                *existing = question;
            }
            None => {
                debug!(id = question.id.0, "Added question");
                self.custom.push(question);
            }
        }
        Ok(())
    }

    /// Delete an authored question. Returns it if it existed.
    pub fn remove_question(&mut self, id: QuestionId) -> Option<Question> {
        let index = self.custom.iter().position(|q| q.id == id)?;
        Some(self.custom.remove(index))
    }

    /// Distinct categories across the pool, sorted.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.all().map(|q| q.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Questions tagged with `category`.
    pub fn questions_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.all().filter(move |q| q.category == category)
    }

    /// Draw a question using `rng`.
    ///
    /// Falls back to the whole pool when the category is absent or unknown.
    pub fn draw(&self, category: Option<&str>, rng: &mut GameRng) -> Option<Question> {
        let mut pool: Vec<&Question> = match category {
            Some(c) => self.questions_in(c).collect(),
            None => Vec::new(),
        };
        if pool.is_empty() {
            pool = self.all().collect();
        }
        rng.choose(&pool).map(|q| (*q).clone())
    }

    /// Borrow this bank as a [`QuestionSource`] driven by `rng`.
    pub fn source<'a>(&'a self, rng: &'a mut GameRng) -> BankSource<'a> {
        BankSource { bank: self, rng }
    }
}

/// A [`QuestionBank`] paired with the RNG that picks from it.
#[derive(Debug)]
pub struct BankSource<'a> {
    bank: &'a QuestionBank,
    rng: &'a mut GameRng,
}

impl QuestionSource for BankSource<'_> {
    fn draw(&mut self, category: Option<&str>) -> Option<Question> {
        self.bank.draw(category, self.rng)
    }
}
