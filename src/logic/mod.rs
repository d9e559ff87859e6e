//! Queue engine: fair ordering, match formation, manual selection, scoring.

mod checkin;
mod manual;
mod matches;
mod ordering;
mod scoring;
mod selection;

pub use checkin::{plan_checkin_sync, CheckinSync};
pub use manual::ManualSelection;
pub use matches::{finish_match, score_line, start_auto_match, start_manual_match};
pub use ordering::order_entries;
pub use scoring::{validate_finish, FinishInput, RawSetScore, ScoreFormat};
pub use selection::{
    partition_teams, select_next_match, waiting_list, NextMatch, TeamAssignment,
};
