//! Player registry entries and the fairness counter.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in queues and matches).
pub type PlayerId = Uuid;

/// Identifier of an account in the external auth service.
pub type UserId = Uuid;

/// A player known to the club: a registered member or a walk-in guest.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    /// Completed matches; drives the fairness ordering.
    pub games_played: u32,
    pub is_registered: bool,
    /// Linked account, when the player is a registered session member.
    pub user_id: Option<UserId>,
}

impl Player {
    /// Create a guest player with the given name. Counter starts at zero.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            games_played: 0,
            is_registered: false,
            user_id: None,
        }
    }

    /// Create a player linked to a registered account.
    pub fn registered(display_name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_name: display_name.into(),
            games_played: 0,
            is_registered: true,
            user_id: Some(user_id),
        }
    }

    /// Record one completed match for this player.
    pub fn record_game(&mut self) {
        self.games_played += 1;
    }
}
