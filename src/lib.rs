//! Badminton court queueing: library with models and the queue engine.

pub mod auth;
pub mod cache;
pub mod logic;
pub mod models;

pub use logic::{
    finish_match, order_entries, partition_teams, plan_checkin_sync, score_line,
    select_next_match, start_auto_match, start_manual_match, validate_finish, waiting_list,
    CheckinSync, FinishInput, ManualSelection, NextMatch, RawSetScore, ScoreFormat,
    TeamAssignment,
};
pub use models::{
    EntryId, MatchId, MatchPlayer, MatchStatus, MemberStatus, Mode, Player, PlayerId, Queue,
    QueueEntry, QueueError, QueueId, QueueMatch, Session, SessionId, SessionMember, SessionRole,
    SetScore, UserId,
};
