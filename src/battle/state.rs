//! Duel state machine: two clocks, one question at a time.
//!
//! ## Turn rules
//!
//! - A correct answer scores for the side to move and passes the turn.
//! - A wrong answer opens a penalty window and replaces the question; the
//!   same side keeps the turn.
//! - Answers during the penalty window are ignored.
//!
//! ## Clock
//!
//! [`BattleState::tick`] only decrements the active side's clock. Whether
//! the battle is over is a separate query, [`BattleState::outcome`], which
//! the session runs after every mutation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::PlayerId;
use crate::questions::{Question, QuestionSource};

/// Length of the wrong-answer penalty window in milliseconds.
pub const PENALTY_MS: u64 = 3_000;

/// One of the two duel participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The player who started the battle.
    Attacker,
    /// The player whose cell was attacked.
    Defender,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// What happened to a submitted answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Not evaluated: penalty active, no question, or no battle.
    Ignored,
    /// Right answer, turn passed.
    Correct,
    /// Wrong answer, penalty started.
    Incorrect,
}

/// Winner and loser of a finished battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BattleOutcome {
    /// Side whose clock did not run out.
    pub winner: PlayerId,
    /// Side whose clock ran out.
    pub loser: PlayerId,
}

/// Live state of a single battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleState {
    /// Player who started the battle.
    pub attacker: PlayerId,
    /// Player who was attacked.
    pub defender: PlayerId,
    /// Attacker's remaining seconds.
    pub attacker_time: u32,
    /// Defender's remaining seconds.
    pub defender_time: u32,
    /// Player who must answer now.
    pub current_turn: PlayerId,
    /// Topic chosen by the attacker.
    pub category: String,
    /// Question on screen. `None` only when the pool is empty.
    pub current_question: Option<Question>,
    /// Answers are ignored until this time (ms since epoch).
    pub penalty_until: Option<u64>,
    /// Correct answers given by the attacker.
    pub attacker_score: u32,
    /// Correct answers given by the defender.
    pub defender_score: u32,
}

impl BattleState {
    /// Start a battle. The attacker moves first.
    pub fn start(
        attacker: PlayerId,
        defender: PlayerId,
        category: impl Into<String>,
        time_limit: u32,
        source: &mut impl QuestionSource,
    ) -> Self {
        let category = category.into();
        let current_question = source.draw(Some(&category));

        Self {
            attacker,
            defender,
            attacker_time: time_limit,
            defender_time: time_limit,
            current_turn: attacker,
            category,
            current_question,
            penalty_until: None,
            attacker_score: 0,
            defender_score: 0,
        }
    }

    /// Side that must answer now.
    #[must_use]
    pub fn active_side(&self) -> Side {
        if self.current_turn == self.attacker {
            Side::Attacker
        } else {
            Side::Defender
        }
    }

    /// Player on a side.
    #[must_use]
    pub fn player(&self, side: Side) -> PlayerId {
        match side {
            Side::Attacker => self.attacker,
            Side::Defender => self.defender,
        }
    }

    /// Which side a player is on, if any.
    #[must_use]
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if player == self.attacker {
            Some(Side::Attacker)
        } else if player == self.defender {
            Some(Side::Defender)
        } else {
            None
        }
    }

    /// Seconds left on a side's clock.
    #[must_use]
    pub fn remaining(&self, side: Side) -> u32 {
        match side {
            Side::Attacker => self.attacker_time,
            Side::Defender => self.defender_time,
        }
    }

    /// Correct answers given by a side.
    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Attacker => self.attacker_score,
            Side::Defender => self.defender_score,
        }
    }

    /// Whether answers are currently blocked.
    #[must_use]
    pub fn is_penalized(&self, now_ms: u64) -> bool {
        self.penalty_until.is_some_and(|until| now_ms < until)
    }

    /// Evaluate an answer from the side to move.
    ///
    /// Who actually clicked is not checked; the caller only offers input to
    /// the active side.
    pub fn submit_answer(
        &mut self,
        answer_index: usize,
        now_ms: u64,
        source: &mut impl QuestionSource,
    ) -> AnswerOutcome {
        if self.is_penalized(now_ms) {
            debug!(answer_index, "Answer ignored during penalty");
            return AnswerOutcome::Ignored;
        }
        let Some(question) = &self.current_question else {
            return AnswerOutcome::Ignored;
        };

        if question.is_correct(answer_index) {
            let side = self.active_side();
            match side {
                Side::Attacker => self.attacker_score += 1,
                Side::Defender => self.defender_score += 1,
            }
            self.current_turn = self.player(side.other());
            self.current_question = source.draw(Some(&self.category));
            AnswerOutcome::Correct
        } else {
            self.penalty_until = Some(now_ms + PENALTY_MS);
            self.current_question = source.draw(Some(&self.category));
            debug!(player = self.current_turn.0, "Wrong answer, penalty started");
            AnswerOutcome::Incorrect
        }
    }

    /// Take one second off the active side's clock.
    ///
    /// Never decides the battle; see [`BattleState::outcome`].
    pub fn tick(&mut self) {
        match self.active_side() {
            Side::Attacker => self.attacker_time = self.attacker_time.saturating_sub(1),
            Side::Defender => self.defender_time = self.defender_time.saturating_sub(1),
        }
    }

    /// Side whose clock has run out, checking the active side first.
    #[must_use]
    pub fn expired_side(&self) -> Option<Side> {
        let active = self.active_side();
        [active, active.other()]
            .into_iter()
            .find(|&side| self.remaining(side) == 0)
    }

    /// Winner and loser once a clock has run out.
    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.expired_side().map(|loser| BattleOutcome {
            winner: self.player(loser.other()),
            loser: self.player(loser),
        })
    }

    /// Seconds of clock consumed by both sides together.
    #[must_use]
    pub fn elapsed_secs(&self, time_limit: u32) -> u32 {
        let budget = u64::from(time_limit) * 2;
        let left = u64::from(self.attacker_time) + u64::from(self.defender_time);
        u32::try_from(budget.saturating_sub(left)).unwrap_or(u32::MAX)
    }
}
