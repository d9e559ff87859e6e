//! Manual match selection: a toggled set of players scoped to one queue view.

use crate::models::{Mode, PlayerId, QueueEntry, QueueError, QueueId};

/// Player picks for a manually formed match.
///
/// Scoped to one queue and mode; retargeting either clears the picks so a
/// stale selection cannot leak into another queue context.
#[derive(Clone, Debug)]
pub struct ManualSelection {
    queue_id: QueueId,
    mode: Mode,
    selected: Vec<PlayerId>,
}

impl ManualSelection {
    pub fn new(queue_id: QueueId, mode: Mode) -> Self {
        Self {
            queue_id,
            mode,
            selected: Vec::new(),
        }
    }

    pub fn queue_id(&self) -> QueueId {
        self.queue_id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Picked player ids, in the order they were toggled on.
    pub fn selected(&self) -> &[PlayerId] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() >= self.mode.needed_players()
    }

    /// Point the selection at a (possibly different) queue and mode. Any
    /// change of target clears the current picks.
    pub fn retarget(&mut self, queue_id: QueueId, mode: Mode) {
        if self.queue_id != queue_id || self.mode != mode {
            self.queue_id = queue_id;
            self.mode = mode;
            self.selected.clear();
        }
    }

    /// Toggle a player: picked players are dropped, new players are added
    /// while there is room. Adding past the needed count is rejected and
    /// leaves the selection unchanged.
    pub fn toggle(&mut self, player_id: PlayerId) -> Result<(), QueueError> {
        if let Some(pos) = self.selected.iter().position(|&id| id == player_id) {
            self.selected.remove(pos);
            return Ok(());
        }
        let limit = self.mode.needed_players();
        if self.selected.len() >= limit {
            return Err(QueueError::SelectionFull { limit });
        }
        self.selected.push(player_id);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop picks that are no longer present in a refreshed queue snapshot.
    pub fn reconcile(&mut self, entries: &[QueueEntry]) {
        self.selected
            .retain(|id| entries.iter().any(|e| e.player_id == *id));
    }

    /// The picks, ready to start a match: the count must equal the mode's
    /// needed players exactly.
    pub fn validate_start(&self) -> Result<&[PlayerId], QueueError> {
        let needed = self.mode.needed_players();
        if self.selected.len() != needed {
            return Err(QueueError::WrongNumberOfPlayers {
                needed,
                selected: self.selected.len(),
            });
        }
        Ok(&self.selected)
    }
}
