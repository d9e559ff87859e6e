//! Match lifecycle: starting matches from the queue and finishing them.

use crate::logic::ordering::order_entries;
use crate::logic::scoring::FinishInput;
use crate::logic::selection::select_next_match;
use crate::models::{
    MatchId, MatchPlayer, MatchStatus, Mode, PlayerId, Queue, QueueError, QueueMatch, SetScore,
};
use chrono::{DateTime, Utc};

/// Start a match with the fairness pick: order the queue, take the first
/// `needed` entries, and dequeue exactly those players.
///
/// Too few queued players is reported as `NotEnoughPlayers`; the engine's
/// "waiting" state becomes a rejection once a start is actually requested.
pub fn start_auto_match(
    queue: &mut Queue,
    mode: Mode,
    started_at: DateTime<Utc>,
) -> Result<MatchId, QueueError> {
    let ordered = order_entries(&queue.entries);
    let next = select_next_match(&ordered, mode).ok_or(QueueError::NotEnoughPlayers {
        needed: mode.needed_players(),
        available: ordered.len(),
    })?;
    let players: Vec<MatchPlayer> = next
        .players
        .iter()
        .map(|e| MatchPlayer {
            id: e.player_id,
            name: e.display_name.clone(),
        })
        .collect();
    start_with(queue, mode, players, started_at)
}

/// Start a match from an explicit participant list, kept in the given
/// order (the caller's order decides the team partition). Every player
/// must hold a queue entry and the count must match the mode exactly.
pub fn start_manual_match(
    queue: &mut Queue,
    player_ids: &[PlayerId],
    mode: Mode,
    started_at: DateTime<Utc>,
) -> Result<MatchId, QueueError> {
    let needed = mode.needed_players();
    if player_ids.len() != needed {
        return Err(QueueError::WrongNumberOfPlayers {
            needed,
            selected: player_ids.len(),
        });
    }
    for (i, id) in player_ids.iter().enumerate() {
        if player_ids[..i].contains(id) {
            return Err(QueueError::DuplicatePlayer(*id));
        }
    }
    let mut players = Vec::with_capacity(needed);
    for &id in player_ids {
        let entry = queue
            .entries
            .iter()
            .find(|e| e.player_id == id)
            .ok_or(QueueError::PlayerNotInQueue(id))?;
        players.push(MatchPlayer {
            id,
            name: entry.display_name.clone(),
        });
    }
    start_with(queue, mode, players, started_at)
}

/// Record the match and dequeue its participants in one step.
fn start_with(
    queue: &mut Queue,
    mode: Mode,
    players: Vec<MatchPlayer>,
    started_at: DateTime<Utc>,
) -> Result<MatchId, QueueError> {
    queue
        .entries
        .retain(|e| !players.iter().any(|p| p.id == e.player_id));
    let m = QueueMatch::new(mode, players, started_at);
    let id = m.id;
    queue.matches.push(m);
    Ok(id)
}

/// Finish an ongoing match with validated input: stamp the finish time,
/// winner, and rendered scores. Returns the participant ids so the caller
/// can bump their games counters in the player registry.
pub fn finish_match(
    queue: &mut Queue,
    match_id: MatchId,
    input: &FinishInput,
    finished_at: DateTime<Utc>,
) -> Result<Vec<PlayerId>, QueueError> {
    let m = queue
        .match_mut(match_id)
        .ok_or(QueueError::MatchNotFound(match_id))?;
    if m.status == MatchStatus::Finished {
        return Err(QueueError::MatchAlreadyFinished(match_id));
    }
    // The input was validated against a participant list the caller fetched
    // earlier; re-check against this match in case the two diverged.
    if !m.players.iter().any(|p| p.id == input.winner_id) {
        return Err(QueueError::WinnerNotInMatch(input.winner_id));
    }
    m.status = MatchStatus::Finished;
    m.finished_at = Some(finished_at);
    m.winner_id = Some(input.winner_id);
    m.score_text = Some(score_line(&input.sets));
    Ok(m.participant_ids())
}

/// Render set scores the way the history view shows them: "21-15, 21-17".
pub fn score_line(sets: &[SetScore]) -> String {
    sets.iter()
        .map(|s| format!("{}-{}", s.a, s.b))
        .collect::<Vec<_>>()
        .join(", ")
}
