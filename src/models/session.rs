//! Play sessions: scheduled events with members who check in and out.

use crate::models::player::UserId;
use crate::models::queue::QueueError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// A member's presence at the session.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    /// Joined the session but not at the venue.
    Joined,
    /// Present and available for queueing.
    CheckedIn,
    /// Left the venue.
    CheckedOut,
}

/// What a member may manage. Enforcement lives in the auth service; the
/// role is carried here for display and API responses.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionRole {
    Owner,
    CoHost,
    Member,
}

/// One user's membership in a session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionMember {
    pub user_id: UserId,
    pub name: String,
    pub status: MemberStatus,
    pub role: SessionRole,
}

/// A scheduled or ongoing play event. Owns zero or more queues (queues
/// point back via their `session_id`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub owner_user_id: UserId,
    pub owner_name: String,
    pub members: Vec<SessionMember>,
}

impl Session {
    /// Create a session; the owner becomes its first member.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        is_public: bool,
        owner_user_id: UserId,
        owner_name: impl Into<String>,
    ) -> Self {
        let owner_name = owner_name.into();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            is_public,
            owner_user_id,
            owner_name: owner_name.clone(),
            members: vec![SessionMember {
                user_id: owner_user_id,
                name: owner_name,
                status: MemberStatus::Joined,
                role: SessionRole::Owner,
            }],
        }
    }

    pub fn member(&self, user_id: UserId) -> Option<&SessionMember> {
        self.members.iter().find(|m| m.user_id == user_id)
    }

    /// Add a user as a plain member. A user can be a member at most once.
    pub fn join(&mut self, user_id: UserId, name: impl Into<String>) -> Result<(), QueueError> {
        if self.member(user_id).is_some() {
            return Err(QueueError::AlreadyMember(user_id));
        }
        self.members.push(SessionMember {
            user_id,
            name: name.into(),
            status: MemberStatus::Joined,
            role: SessionRole::Member,
        });
        Ok(())
    }

    pub fn leave(&mut self, user_id: UserId) -> Result<(), QueueError> {
        let idx = self
            .members
            .iter()
            .position(|m| m.user_id == user_id)
            .ok_or(QueueError::NotAMember(user_id))?;
        self.members.remove(idx);
        Ok(())
    }

    /// Mark a member present and available for queueing.
    pub fn check_in(&mut self, user_id: UserId) -> Result<(), QueueError> {
        self.set_status(user_id, MemberStatus::CheckedIn)
    }

    /// Mark a member as having left the venue.
    pub fn check_out(&mut self, user_id: UserId) -> Result<(), QueueError> {
        self.set_status(user_id, MemberStatus::CheckedOut)
    }

    fn set_status(&mut self, user_id: UserId, status: MemberStatus) -> Result<(), QueueError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.user_id == user_id)
            .ok_or(QueueError::NotAMember(user_id))?;
        member.status = status;
        Ok(())
    }
}
