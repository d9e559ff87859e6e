//! Integration tests for the manual match selection set.

use badminton_queue_web::{ManualSelection, Mode, QueueEntry, QueueError};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn entry_for(player_id: Uuid) -> QueueEntry {
    QueueEntry {
        id: Uuid::new_v4(),
        player_id,
        display_name: "p".to_string(),
        games_played: 0,
        joined_at: Utc.timestamp_opt(0, 0).unwrap(),
    }
}

#[test]
fn toggle_twice_returns_to_the_original_state() {
    let mut sel = ManualSelection::new(Uuid::new_v4(), Mode::Doubles);
    let player = Uuid::new_v4();
    sel.toggle(player).unwrap();
    assert_eq!(sel.selected(), &[player]);
    sel.toggle(player).unwrap();
    assert!(sel.is_empty());
}

#[test]
fn adding_past_the_needed_count_is_rejected() {
    let mut sel = ManualSelection::new(Uuid::new_v4(), Mode::Doubles);
    let four: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    for id in &four {
        sel.toggle(*id).unwrap();
    }
    assert!(sel.is_full());

    let fifth = Uuid::new_v4();
    assert_eq!(sel.toggle(fifth), Err(QueueError::SelectionFull { limit: 4 }));
    assert_eq!(sel.selected(), four.as_slice());

    // A picked player can still be toggled off while full.
    sel.toggle(four[1]).unwrap();
    assert_eq!(sel.len(), 3);
}

#[test]
fn singles_holds_at_most_two() {
    let mut sel = ManualSelection::new(Uuid::new_v4(), Mode::Singles);
    sel.toggle(Uuid::new_v4()).unwrap();
    sel.toggle(Uuid::new_v4()).unwrap();
    assert_eq!(
        sel.toggle(Uuid::new_v4()),
        Err(QueueError::SelectionFull { limit: 2 })
    );
}

#[test]
fn retarget_clears_on_mode_or_queue_change() {
    let queue = Uuid::new_v4();
    let mut sel = ManualSelection::new(queue, Mode::Singles);
    sel.toggle(Uuid::new_v4()).unwrap();

    // Same target: picks survive.
    sel.retarget(queue, Mode::Singles);
    assert_eq!(sel.len(), 1);

    // Mode change: picks are gone.
    sel.retarget(queue, Mode::Doubles);
    assert!(sel.is_empty());
    assert_eq!(sel.mode(), Mode::Doubles);

    sel.toggle(Uuid::new_v4()).unwrap();

    // Queue change: picks are gone again.
    let other_queue = Uuid::new_v4();
    sel.retarget(other_queue, Mode::Doubles);
    assert!(sel.is_empty());
    assert_eq!(sel.queue_id(), other_queue);
}

#[test]
fn reconcile_drops_players_missing_from_the_snapshot() {
    let mut sel = ManualSelection::new(Uuid::new_v4(), Mode::Doubles);
    let stays = Uuid::new_v4();
    let gone = Uuid::new_v4();
    sel.toggle(stays).unwrap();
    sel.toggle(gone).unwrap();

    sel.reconcile(&[entry_for(stays)]);
    assert_eq!(sel.selected(), &[stays]);
}

#[test]
fn start_requires_the_exact_needed_count() {
    let mut sel = ManualSelection::new(Uuid::new_v4(), Mode::Doubles);
    for _ in 0..3 {
        sel.toggle(Uuid::new_v4()).unwrap();
    }
    assert_eq!(
        sel.validate_start().unwrap_err(),
        QueueError::WrongNumberOfPlayers {
            needed: 4,
            selected: 3
        }
    );

    let fourth = Uuid::new_v4();
    sel.toggle(fourth).unwrap();
    let ids = sel.validate_start().unwrap();
    assert_eq!(ids.len(), 4);
    assert_eq!(ids[3], fourth);
}

#[test]
fn clear_empties_the_selection() {
    let mut sel = ManualSelection::new(Uuid::new_v4(), Mode::Singles);
    sel.toggle(Uuid::new_v4()).unwrap();
    sel.clear();
    assert!(sel.is_empty());
}
