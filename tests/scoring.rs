//! Integration tests for finish-match validation.

use badminton_queue_web::{validate_finish, PlayerId, QueueError, RawSetScore, ScoreFormat};
use uuid::Uuid;

fn participants() -> Vec<PlayerId> {
    (0..4).map(|_| Uuid::new_v4()).collect()
}

fn blank() -> RawSetScore {
    RawSetScore::default()
}

#[test]
fn a_winner_must_be_designated() {
    let players = participants();
    let sets = [RawSetScore::filled("21", "15")];
    assert_eq!(
        validate_finish(None, &players, ScoreFormat::SingleSet, &sets),
        Err(QueueError::MissingWinner)
    );
}

#[test]
fn the_winner_must_have_played() {
    let players = participants();
    let outsider = Uuid::new_v4();
    let sets = [RawSetScore::filled("21", "15")];
    assert_eq!(
        validate_finish(Some(outsider), &players, ScoreFormat::SingleSet, &sets),
        Err(QueueError::WinnerNotInMatch(outsider))
    );
}

#[test]
fn best_of_three_rejects_a_single_filled_set() {
    let players = participants();
    let sets = [RawSetScore::filled("21", "15"), blank(), blank()];
    assert_eq!(
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets),
        Err(QueueError::MissingSetScores {
            required: 2,
            provided: 1
        })
    );
}

#[test]
fn best_of_three_accepts_two_sets_with_the_third_blank() {
    let players = participants();
    let sets = [
        RawSetScore::filled("21", "15"),
        RawSetScore::filled("19", "21"),
        blank(),
    ];
    let input =
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets).unwrap();
    assert_eq!(input.winner_id, players[0]);
    assert_eq!(input.sets.len(), 2);
    assert_eq!((input.sets[0].a, input.sets[0].b), (21, 15));
    assert_eq!((input.sets[1].a, input.sets[1].b), (19, 21));
}

#[test]
fn best_of_three_accepts_all_three_sets() {
    let players = participants();
    let sets = [
        RawSetScore::filled("21", "15"),
        RawSetScore::filled("19", "21"),
        RawSetScore::filled("21", "17"),
    ];
    let input =
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets).unwrap();
    assert_eq!(input.sets.len(), 3);
}

#[test]
fn single_set_ignores_later_rows_no_matter_their_content() {
    let players = participants();
    let sets = [
        RawSetScore::filled("21", "15"),
        RawSetScore::filled("junk", "here"),
        blank(),
    ];
    let input =
        validate_finish(Some(players[0]), &players, ScoreFormat::SingleSet, &sets).unwrap();
    assert_eq!(input.sets.len(), 1);
    assert_eq!((input.sets[0].a, input.sets[0].b), (21, 15));
}

#[test]
fn single_set_requires_the_first_row() {
    let players = participants();
    let sets = [blank(), RawSetScore::filled("21", "15")];
    assert_eq!(
        validate_finish(Some(players[0]), &players, ScoreFormat::SingleSet, &sets),
        Err(QueueError::MissingSetScores {
            required: 1,
            provided: 0
        })
    );
}

#[test]
fn non_numeric_scores_name_the_offending_set() {
    let players = participants();
    let sets = [
        RawSetScore::filled("21", "15"),
        RawSetScore::filled("12", "abc"),
        blank(),
    ];
    assert_eq!(
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets),
        Err(QueueError::InvalidSetScore { set: 2 })
    );

    // The index is the row's position, not its rank among filled rows.
    let sets = [
        RawSetScore::filled("21", "15"),
        blank(),
        RawSetScore::filled("7", "x"),
    ];
    assert_eq!(
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets),
        Err(QueueError::InvalidSetScore { set: 3 })
    );
}

#[test]
fn negative_scores_are_rejected() {
    let players = participants();
    let sets = [
        RawSetScore::filled("21", "-3"),
        RawSetScore::filled("21", "15"),
    ];
    assert_eq!(
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets),
        Err(QueueError::InvalidSetScore { set: 1 })
    );
}

#[test]
fn scores_are_trimmed_before_parsing() {
    let players = participants();
    let sets = [
        RawSetScore::filled(" 21 ", " 15"),
        RawSetScore::filled("18", "21 "),
    ];
    let input =
        validate_finish(Some(players[0]), &players, ScoreFormat::BestOfThree, &sets).unwrap();
    assert_eq!((input.sets[0].a, input.sets[0].b), (21, 15));
}
