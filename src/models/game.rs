//! Matches started from a queue: participants, status, scores.

use crate::models::player::PlayerId;
use crate::models::queue::Mode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Where a match is in its lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Ongoing,
    Finished,
}

/// A participant snapshot taken when the match starts.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchPlayer {
    pub id: PlayerId,
    pub name: String,
}

/// Scores of one set, team A first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    pub a: u32,
    pub b: u32,
}

/// A match run from a queue.
///
/// Participants are kept in partition order: singles `[p1, p2]`, doubles
/// `[a1, a2, b1, b2]` with positions 0-1 forming team A and 2-3 team B.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QueueMatch {
    pub id: MatchId,
    pub mode: Mode,
    pub players: Vec<MatchPlayer>,
    pub status: MatchStatus,
    pub started_at: DateTime<Utc>,
    /// None while the match is ongoing.
    pub finished_at: Option<DateTime<Utc>>,
    pub winner_id: Option<PlayerId>,
    /// Rendered set scores, e.g. "21-15, 21-17".
    pub score_text: Option<String>,
}

impl QueueMatch {
    pub fn new(mode: Mode, players: Vec<MatchPlayer>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mode,
            players,
            status: MatchStatus::Ongoing,
            started_at,
            finished_at: None,
            winner_id: None,
            score_text: None,
        }
    }

    pub fn participant_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }
}
