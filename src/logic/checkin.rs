//! Check-in sync: keep a session's queue aligned with its checked-in members.

use crate::models::{MemberStatus, Player, PlayerId, Queue, Session, UserId};
use std::collections::HashSet;

/// Planned queue changes for one sync pass. The caller applies them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CheckinSync {
    /// Checked-in members with a linked player who are not yet queued.
    pub enqueue: Vec<PlayerId>,
    /// Queued players whose member is no longer checked in.
    pub remove: Vec<PlayerId>,
}

impl CheckinSync {
    pub fn is_empty(&self) -> bool {
        self.enqueue.is_empty() && self.remove.is_empty()
    }
}

/// Compute the enqueue/remove plan for a queue attached to a session.
/// Guests (players without a linked account) are left alone.
pub fn plan_checkin_sync(queue: &Queue, session: &Session, players: &[Player]) -> CheckinSync {
    let checked_in: HashSet<UserId> = session
        .members
        .iter()
        .filter(|m| m.status == MemberStatus::CheckedIn)
        .map(|m| m.user_id)
        .collect();
    let queued: HashSet<PlayerId> = queue.entries.iter().map(|e| e.player_id).collect();

    let mut plan = CheckinSync::default();
    for p in players {
        if let Some(user_id) = p.user_id {
            if checked_in.contains(&user_id) && !queued.contains(&p.id) {
                plan.enqueue.push(p.id);
            }
        }
    }
    for e in &queue.entries {
        if let Some(p) = players.iter().find(|p| p.id == e.player_id) {
            if let Some(user_id) = p.user_id {
                if !checked_in.contains(&user_id) {
                    plan.remove.push(e.player_id);
                }
            }
        }
    }
    plan
}
