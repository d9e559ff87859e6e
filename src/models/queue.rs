//! Queues, queue entries, and the shared error enum.

use crate::models::game::{MatchId, MatchStatus, QueueMatch};
use crate::models::player::{Player, PlayerId, UserId};
use crate::models::session::SessionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a queue.
pub type QueueId = Uuid;

/// Unique identifier for a queue entry (one player's place in one queue).
pub type EntryId = Uuid;

/// Errors that can occur during queue, match, and session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QueueError {
    /// Player name is empty or whitespace.
    EmptyName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player not found in the registry.
    PlayerNotFound(PlayerId),
    /// Queue is closed; nobody can join.
    QueueClosed,
    /// Player is already in the queue (at most one entry per player).
    AlreadyQueued(PlayerId),
    /// Player has no entry in the queue.
    PlayerNotInQueue(PlayerId),
    /// The same player appears twice in a participant list.
    DuplicatePlayer(PlayerId),
    /// Too few queued players to form a match.
    NotEnoughPlayers { needed: usize, available: usize },
    /// A participant list has the wrong size for the mode.
    WrongNumberOfPlayers { needed: usize, selected: usize },
    /// The manual selection already holds as many players as the mode allows.
    SelectionFull { limit: usize },
    /// Finishing a match requires a winner.
    MissingWinner,
    /// The designated winner did not play in the match.
    WinnerNotInMatch(PlayerId),
    /// Fewer filled set scores than the score format requires.
    MissingSetScores { required: usize, provided: usize },
    /// A set score did not parse as a non-negative integer (1-based index).
    InvalidSetScore { set: usize },
    /// No match with this id in the queue.
    MatchNotFound(MatchId),
    /// The match has already been finished.
    MatchAlreadyFinished(MatchId),
    /// User is already a member of the session.
    AlreadyMember(UserId),
    /// User is not a member of the session.
    NotAMember(UserId),
}

impl std::fmt::Display for QueueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueError::EmptyName => write!(f, "Player name required"),
            QueueError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            QueueError::PlayerNotFound(_) => write!(f, "Player not found"),
            QueueError::QueueClosed => write!(f, "Queue is closed"),
            QueueError::AlreadyQueued(_) => write!(f, "Player is already in the queue"),
            QueueError::PlayerNotInQueue(_) => write!(f, "Player is not in the queue"),
            QueueError::DuplicatePlayer(_) => write!(f, "Player listed more than once"),
            QueueError::NotEnoughPlayers { needed, available } => {
                write!(f, "Need {} queued players to start (have {})", needed, available)
            }
            QueueError::WrongNumberOfPlayers { needed, selected } => {
                write!(f, "Select exactly {} players (selected {})", needed, selected)
            }
            QueueError::SelectionFull { limit } => {
                write!(f, "Selection already holds {} players", limit)
            }
            QueueError::MissingWinner => write!(f, "Select the winner"),
            QueueError::WinnerNotInMatch(_) => write!(f, "Winner did not play in this match"),
            QueueError::MissingSetScores { required, provided } => {
                write!(f, "Enter at least {} set score(s) (got {})", required, provided)
            }
            QueueError::InvalidSetScore { set } => {
                write!(f, "Set {} scores must be non-negative numbers", set)
            }
            QueueError::MatchNotFound(_) => write!(f, "Match not found"),
            QueueError::MatchAlreadyFinished(_) => write!(f, "Match is already finished"),
            QueueError::AlreadyMember(_) => write!(f, "Already a member of this session"),
            QueueError::NotAMember(_) => write!(f, "Not a member of this session"),
        }
    }
}

/// Match format for a queue: 1v1 or 2v2.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Singles,
    Doubles,
}

impl Mode {
    /// Players on court: 2 for singles, 4 for doubles.
    pub fn needed_players(self) -> usize {
        match self {
            Mode::Singles => 2,
            Mode::Doubles => 4,
        }
    }
}

/// One player's place in a queue. Display name and games counter are
/// snapshots of the player registry taken at enqueue time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub id: EntryId,
    pub player_id: PlayerId,
    pub display_name: String,
    pub games_played: u32,
    pub joined_at: DateTime<Utc>,
}

/// A waiting list of players for one court mode, with its match log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub name: String,
    pub mode: Mode,
    pub is_open: bool,
    /// Owning session, when the queue was created for one.
    pub session_id: Option<SessionId>,
    pub entries: Vec<QueueEntry>,
    /// Matches started from this queue, ongoing and finished.
    pub matches: Vec<QueueMatch>,
}

impl Queue {
    /// Create an open, empty queue.
    pub fn new(name: impl Into<String>, mode: Mode, session_id: Option<SessionId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mode,
            is_open: true,
            session_id,
            entries: Vec::new(),
            matches: Vec::new(),
        }
    }

    /// Add a player. The queue must be open and a player can hold at most
    /// one entry.
    pub fn enqueue(&mut self, player: &Player, joined_at: DateTime<Utc>) -> Result<(), QueueError> {
        if !self.is_open {
            return Err(QueueError::QueueClosed);
        }
        if self.contains_player(player.id) {
            return Err(QueueError::AlreadyQueued(player.id));
        }
        self.entries.push(QueueEntry {
            id: Uuid::new_v4(),
            player_id: player.id,
            display_name: player.display_name.clone(),
            games_played: player.games_played,
            joined_at,
        });
        Ok(())
    }

    /// Remove a player's entry.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), QueueError> {
        let idx = self
            .entries
            .iter()
            .position(|e| e.player_id == player_id)
            .ok_or(QueueError::PlayerNotInQueue(player_id))?;
        self.entries.remove(idx);
        Ok(())
    }

    pub fn contains_player(&self, player_id: PlayerId) -> bool {
        self.entries.iter().any(|e| e.player_id == player_id)
    }

    /// Open or close the queue. A closed queue rejects new entries but
    /// keeps the existing ones.
    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn match_mut(&mut self, match_id: MatchId) -> Option<&mut QueueMatch> {
        self.matches.iter_mut().find(|m| m.id == match_id)
    }

    /// Matches currently being played.
    pub fn ongoing(&self) -> Vec<&QueueMatch> {
        self.matches
            .iter()
            .filter(|m| m.status == MatchStatus::Ongoing)
            .collect()
    }

    /// Finished matches, most recent first, capped at `limit`.
    pub fn history(&self, limit: usize) -> Vec<&QueueMatch> {
        let mut finished: Vec<&QueueMatch> = self
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::Finished)
            .collect();
        finished.sort_by(|a, b| b.finished_at.cmp(&a.finished_at));
        finished.truncate(limit);
        finished
    }
}
