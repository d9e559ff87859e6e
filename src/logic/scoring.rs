//! Finish-match validation: winner and set scores, checked before any store call.

use crate::models::{PlayerId, QueueError, SetScore};
use serde::{Deserialize, Serialize};

/// How many sets a finished match reports.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFormat {
    /// Exactly one set.
    SingleSet,
    /// Two sets required, third optional.
    #[default]
    BestOfThree,
}

impl ScoreFormat {
    /// Score rows read from the form. Rows past this are ignored no matter
    /// what they contain.
    fn rows(self) -> usize {
        match self {
            ScoreFormat::SingleSet => 1,
            ScoreFormat::BestOfThree => 3,
        }
    }

    fn min_filled(self) -> usize {
        match self {
            ScoreFormat::SingleSet => 1,
            ScoreFormat::BestOfThree => 2,
        }
    }
}

/// One set's scores as entered. Blank strings mean the set was skipped.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawSetScore {
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub b: String,
}

impl RawSetScore {
    pub fn filled(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    fn is_filled(&self) -> bool {
        !self.a.trim().is_empty() && !self.b.trim().is_empty()
    }
}

/// A validated finish: the winner and the parsed set scores.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FinishInput {
    pub winner_id: PlayerId,
    pub sets: Vec<SetScore>,
}

/// Validate a finish before it reaches the store.
///
/// The winner must be designated and must be one of the match participants.
/// Enough rows must be filled for the format, and every filled row must
/// parse as two non-negative integers; a row that does not names its
/// 1-based set index in the error.
pub fn validate_finish(
    winner_id: Option<PlayerId>,
    participants: &[PlayerId],
    format: ScoreFormat,
    scores: &[RawSetScore],
) -> Result<FinishInput, QueueError> {
    let winner_id = winner_id.ok_or(QueueError::MissingWinner)?;
    if !participants.contains(&winner_id) {
        return Err(QueueError::WinnerNotInMatch(winner_id));
    }

    let filled: Vec<(usize, &RawSetScore)> = scores
        .iter()
        .take(format.rows())
        .enumerate()
        .filter(|(_, row)| row.is_filled())
        .collect();

    let required = format.min_filled();
    if filled.len() < required {
        return Err(QueueError::MissingSetScores {
            required,
            provided: filled.len(),
        });
    }

    let mut sets = Vec::with_capacity(filled.len());
    for (idx, row) in filled {
        let set = idx + 1;
        let a = row
            .a
            .trim()
            .parse::<u32>()
            .map_err(|_| QueueError::InvalidSetScore { set })?;
        let b = row
            .b
            .trim()
            .parse::<u32>()
            .map_err(|_| QueueError::InvalidSetScore { set })?;
        sets.push(SetScore { a, b });
    }

    Ok(FinishInput { winner_id, sets })
}
