//! Fair queue ordering: fewest games first, earliest join breaks ties.

use crate::models::QueueEntry;

/// Sort queue entries by the fairness rule.
///
/// Primary key: ascending `games_played` (players who have played less go
/// first). Tie-break: ascending `joined_at`. The sort is stable, so entries
/// equal on both keys keep their snapshot order. The input is not mutated.
pub fn order_entries(entries: &[QueueEntry]) -> Vec<QueueEntry> {
    let mut ordered = entries.to_vec();
    ordered.sort_by_key(|e| (e.games_played, e.joined_at));
    ordered
}
