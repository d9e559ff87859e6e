//! Next-match selection and positional team partitioning.

use crate::models::{Mode, QueueEntry, QueueError};
use serde::Serialize;

/// The players picked for the next match, in fairness order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct NextMatch {
    pub mode: Mode,
    /// Exactly `mode.needed_players()` entries.
    pub players: Vec<QueueEntry>,
}

/// Court slots for a selection, filled by position.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamAssignment {
    Singles {
        player_one: QueueEntry,
        player_two: QueueEntry,
    },
    Doubles {
        team_a: [QueueEntry; 2],
        team_b: [QueueEntry; 2],
    },
}

/// Take the first `needed` entries of an ordered queue as the next match.
/// Returns `None` while the queue is shorter than `needed` (the queue is
/// waiting, which is not an error).
pub fn select_next_match(ordered: &[QueueEntry], mode: Mode) -> Option<NextMatch> {
    let needed = mode.needed_players();
    if ordered.len() < needed {
        return None;
    }
    Some(NextMatch {
        mode,
        players: ordered[..needed].to_vec(),
    })
}

/// Entries still waiting after the next match is taken: everything past the
/// first `needed`, or the whole queue when no match can form yet.
pub fn waiting_list(ordered: &[QueueEntry], mode: Mode) -> &[QueueEntry] {
    let needed = mode.needed_players();
    if ordered.len() < needed {
        ordered
    } else {
        &ordered[needed..]
    }
}

/// Split a selection into court slots.
///
/// Purely positional: singles puts position 0 against position 1; doubles
/// pairs positions 0-1 as team A and 2-3 as team B. The fairness order
/// decides who plays, not who pairs with whom; there is no re-sorting and
/// no strength balancing. A selection of the wrong size is rejected.
pub fn partition_teams(selection: &[QueueEntry], mode: Mode) -> Result<TeamAssignment, QueueError> {
    let needed = mode.needed_players();
    if selection.len() != needed {
        return Err(QueueError::WrongNumberOfPlayers {
            needed,
            selected: selection.len(),
        });
    }
    Ok(match mode {
        Mode::Singles => TeamAssignment::Singles {
            player_one: selection[0].clone(),
            player_two: selection[1].clone(),
        },
        Mode::Doubles => TeamAssignment::Doubles {
            team_a: [selection[0].clone(), selection[1].clone()],
            team_b: [selection[2].clone(), selection[3].clone()],
        },
    })
}
