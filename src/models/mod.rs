//! Data structures for the queueing app: players, queues, matches, sessions.

mod game;
mod player;
mod queue;
mod session;

pub use game::{MatchId, MatchPlayer, MatchStatus, QueueMatch, SetScore};
pub use player::{Player, PlayerId, UserId};
pub use queue::{EntryId, Mode, Queue, QueueEntry, QueueError, QueueId};
pub use session::{MemberStatus, Session, SessionId, SessionMember, SessionRole};
