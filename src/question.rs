//! Question generation.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::catalog::{DifficultyProfile, OperationKind};
use crate::error::{QuizError, QuizResult};

/// Upper bound on draws before giving up on finding a non-zero divisor.
pub const MAX_DIVISOR_DRAWS: usize = 32;

/// A single arithmetic question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
    pub answer: i64,
    pub operation: OperationKind,
}

impl Question {
    fn multiply(a: i64, b: i64) -> Option<Self> {
        Some(Self {
            text: format!("{} x {}", a, b),
            answer: a.checked_mul(b)?,
            operation: OperationKind::Multiply,
        })
    }

    /// Built backwards from the product so the quotient is always an integer.
    fn divide(a: i64, b: i64) -> Option<Self> {
        Some(Self {
            text: format!("{} / {}", a.checked_mul(b)?, b),
            answer: a,
            operation: OperationKind::Divide,
        })
    }
}

/// Generate a question for `profile` using the given random source.
pub fn generate<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> QuizResult<Question> {
    let range = profile.operand_range();

    for _ in 0..MAX_DIVISOR_DRAWS {
        let operation = *profile.operations.choose(rng).ok_or_else(|| {
            QuizError::InvalidProfile(format!("{}: no operations allowed", profile.name))
        })?;
        let a = rng.random_range(range.clone());
        let b = rng.random_range(range.clone());

        let question = match operation {
            OperationKind::Multiply => Question::multiply(a, b),
            OperationKind::Divide if b != 0 => Question::divide(a, b),
            OperationKind::Divide => {
                tracing::debug!(difficulty = %profile.name, "drew zero divisor, redrawing");
                continue;
            }
        };
        return question.ok_or_else(|| {
            QuizError::InvalidProfile(format!(
                "{}: {} {} {} overflows",
                profile.name, a, operation, b
            ))
        });
    }

    Err(QuizError::NoDivisor(profile.name.clone()))
}
