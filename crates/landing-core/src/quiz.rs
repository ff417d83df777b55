#![forbid(unsafe_code)]

//! Single-answer quiz: the first answer locks the widget.

use crate::config::QuizConfig;

/// Verdict of the one accepted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    /// Class shared by the result box and the chosen button.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Wrong => "wrong",
        }
    }
}

/// Everything the host renders after the accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub chosen: usize,
    pub verdict: Verdict,
    /// Result text for the result box.
    pub message: String,
    /// Option to additionally mark `correct` after a wrong answer.
    pub reveal_correct: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Quiz {
    correct: Vec<bool>,
    config: QuizConfig,
    answered: bool,
}

impl Quiz {
    /// `correct[i]` marks option `i` as a correct answer.
    #[must_use]
    pub fn new(correct: Vec<bool>, config: QuizConfig) -> Self {
        Self {
            correct,
            config,
            answered: false,
        }
    }

    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.answered
    }

    /// Option `option` was clicked. Returns `None` once locked or for an
    /// unknown option.
    pub fn answer(&mut self, option: usize) -> Option<QuizOutcome> {
        if self.answered {
            return None;
        }
        let is_correct = *self.correct.get(option)?;
        self.answered = true;
        let outcome = if is_correct {
            QuizOutcome {
                chosen: option,
                verdict: Verdict::Correct,
                message: self.config.correct_message.clone(),
                reveal_correct: None,
            }
        } else {
            QuizOutcome {
                chosen: option,
                verdict: Verdict::Wrong,
                message: self.config.wrong_message.clone(),
                reveal_correct: self.correct.iter().position(|c| *c),
            }
        };
        tracing::debug!(option, verdict = ?outcome.verdict, "quiz answered");
        Some(outcome)
    }
}
