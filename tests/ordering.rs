//! Integration tests for fair ordering, next-match selection, and team partitioning.

use badminton_queue_web::{
    order_entries, partition_teams, select_next_match, waiting_list, Mode, QueueEntry,
    QueueError, TeamAssignment,
};
use chrono::{TimeZone, Utc};
use uuid::Uuid;

fn entry(games_played: u32, joined_secs: i64) -> QueueEntry {
    QueueEntry {
        id: Uuid::new_v4(),
        player_id: Uuid::new_v4(),
        display_name: format!("gp{games_played}/t{joined_secs}"),
        games_played,
        joined_at: Utc.timestamp_opt(joined_secs, 0).unwrap(),
    }
}

#[test]
fn order_of_empty_is_empty() {
    assert_eq!(order_entries(&[]), Vec::new());
}

#[test]
fn order_is_a_permutation_of_the_input() {
    let entries = vec![entry(3, 5), entry(0, 9), entry(1, 1), entry(0, 2), entry(2, 7)];
    let ordered = order_entries(&entries);
    assert_eq!(ordered.len(), entries.len());
    let mut input_ids: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
    let mut output_ids: Vec<Uuid> = ordered.iter().map(|e| e.id).collect();
    input_ids.sort();
    output_ids.sort();
    assert_eq!(input_ids, output_ids);
}

#[test]
fn order_does_not_mutate_the_input() {
    let entries = vec![entry(2, 1), entry(0, 2)];
    let before = entries.clone();
    let _ = order_entries(&entries);
    assert_eq!(entries, before);
}

#[test]
fn ordered_by_games_then_join_time() {
    let entries = vec![entry(3, 5), entry(0, 9), entry(1, 1), entry(0, 2), entry(2, 7)];
    let ordered = order_entries(&entries);
    for pair in ordered.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.games_played < b.games_played
                || (a.games_played == b.games_played && a.joined_at <= b.joined_at),
            "{} must not come after {}",
            a.display_name,
            b.display_name
        );
    }
}

#[test]
fn equal_games_fall_through_to_join_time() {
    let entries = vec![entry(1, 30), entry(1, 10), entry(1, 20)];
    let ordered = order_entries(&entries);
    let times: Vec<i64> = ordered.iter().map(|e| e.joined_at.timestamp()).collect();
    assert_eq!(times, vec![10, 20, 30]);
}

#[test]
fn equal_keys_keep_input_order() {
    // Whole-second join timestamps can collide; the sort must stay stable.
    let first = entry(2, 100);
    let second = entry(2, 100);
    let ordered = order_entries(&[first.clone(), second.clone()]);
    assert_eq!(ordered[0].id, first.id);
    assert_eq!(ordered[1].id, second.id);
}

#[test]
fn order_is_idempotent() {
    let entries = vec![entry(3, 5), entry(0, 9), entry(1, 1), entry(0, 2)];
    let once = order_entries(&entries);
    let twice = order_entries(&once);
    assert_eq!(once, twice);
}

#[test]
fn selection_absent_below_needed_for_all_modes() {
    for (mode, needed) in [(Mode::Singles, 2), (Mode::Doubles, 4)] {
        for n in 0..needed {
            let entries: Vec<QueueEntry> = (0..n).map(|i| entry(0, i as i64)).collect();
            let ordered = order_entries(&entries);
            assert!(
                select_next_match(&ordered, mode).is_none(),
                "{mode:?} with {n} entries must be waiting"
            );
            // Everyone keeps waiting while no match can form.
            assert_eq!(waiting_list(&ordered, mode).len(), n);
        }
    }
}

#[test]
fn singles_scenario_rested_players_go_first() {
    let gp2_t2 = entry(2, 2);
    let gp0_t1 = entry(0, 1);
    let gp0_t3 = entry(0, 3);
    let ordered = order_entries(&[gp2_t2.clone(), gp0_t1.clone(), gp0_t3.clone()]);
    assert_eq!(
        ordered.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![gp0_t1.id, gp0_t3.id, gp2_t2.id]
    );

    let next = select_next_match(&ordered, Mode::Singles).unwrap();
    assert_eq!(next.players.len(), 2);
    assert_eq!(next.players[0].id, gp0_t1.id);
    assert_eq!(next.players[1].id, gp0_t3.id);

    match partition_teams(&next.players, Mode::Singles).unwrap() {
        TeamAssignment::Singles {
            player_one,
            player_two,
        } => {
            assert_eq!(player_one.id, gp0_t1.id);
            assert_eq!(player_two.id, gp0_t3.id);
        }
        other => panic!("expected singles slots, got {other:?}"),
    }

    let waiting = waiting_list(&ordered, Mode::Singles);
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].id, gp2_t2.id);
}

#[test]
fn doubles_partition_is_positional() {
    let entries = vec![entry(0, 1), entry(0, 2), entry(1, 1), entry(5, 1)];
    let ordered = order_entries(&entries);
    let next = select_next_match(&ordered, Mode::Doubles).unwrap();
    match partition_teams(&next.players, Mode::Doubles).unwrap() {
        TeamAssignment::Doubles { team_a, team_b } => {
            assert_eq!(team_a[0].id, ordered[0].id);
            assert_eq!(team_a[1].id, ordered[1].id);
            assert_eq!(team_b[0].id, ordered[2].id);
            assert_eq!(team_b[1].id, ordered[3].id);
        }
        other => panic!("expected doubles teams, got {other:?}"),
    }
}

#[test]
fn partition_rejects_wrong_selection_size() {
    let three: Vec<QueueEntry> = (0..3).map(|i| entry(0, i)).collect();
    assert_eq!(
        partition_teams(&three, Mode::Doubles),
        Err(QueueError::WrongNumberOfPlayers {
            needed: 4,
            selected: 3
        })
    );
    assert_eq!(
        partition_teams(&three, Mode::Singles),
        Err(QueueError::WrongNumberOfPlayers {
            needed: 2,
            selected: 3
        })
    );
}
