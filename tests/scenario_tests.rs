//! End-to-end games driven through the session API.

mod common;

use common::{at, started};
use quantum_fish::session::Contradiction;
use quantum_fish::{
    ErrorKind, Outcome, PlayerId, SessionError, SessionStatus, SuitId, TargetRef, WinReason,
};

fn seat(i: u8) -> TargetRef {
    TargetRef::Seat(PlayerId::new(i))
}

/// Seat 0 asks seat 1 for hearts and receives three: with the one heart
/// the ask proved, seat 0 holds all four and wins at once.
#[test]
fn test_asker_proves_whole_suit() {
    let mut session = started(&["amy", "bob", "cat"], 11);
    let first = at(&session, 0);
    let second = at(&session, 1);

    let outcome = session.ask(&first, &seat(1), "hearts").unwrap();
    assert!(!outcome.is_game_over());

    let outcome = session.respond(&second, 3).unwrap();

    let Outcome::GameOver(over) = outcome else {
        panic!("expected game over");
    };
    assert_eq!(over.winner.key, first);
    assert_eq!(over.reason, WinReason::SuitProven { suit: "hearts".into() });
    assert_eq!(session.status(), SessionStatus::GameOver);

    let engine = session.engine().unwrap();
    let hearts = SuitId::new(0);
    assert_eq!(engine.interval(PlayerId::new(0), hearts).min, 4);
    assert_eq!(engine.interval(PlayerId::new(0), hearts).max, 4);
    assert_eq!(engine.suit_fully_proven(hearts), Some(PlayerId::new(0)));
}

/// Once seat 0 has asked for hearts, seat 1 can hold at most three; a
/// claim of four is rejected and the game waits for a valid answer.
#[test]
fn test_give_beyond_derived_bound_is_a_contradiction() {
    let mut session = started(&["amy", "bob", "cat"], 11);
    let first = at(&session, 0);
    let second = at(&session, 1);
    session.ask(&first, &seat(1), "hearts").unwrap();

    let err = session.respond(&second, 4).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Contradiction);
    assert!(matches!(err, SessionError::Contradiction(Contradiction::Give { count: 4, .. })));
    assert_eq!(session.status(), SessionStatus::AwaitingResponse);
    assert!(session.respond(&second, 3).unwrap().is_game_over());
}

/// A go-fish answer proves the responder has none of the suit, which in a
/// two-player game hands the whole suit to the asker.
#[test]
fn test_prover_wins_even_when_responder_acted() {
    let mut session = started(&["amy", "bob"], 5);
    let first = at(&session, 0);
    let second = at(&session, 1);

    session.ask(&first, &seat(1), "clubs").unwrap();
    let outcome = session.go_fish(&second).unwrap();

    assert_eq!(outcome.winner().unwrap().key, first);
}

#[test]
fn test_self_target_is_rejected_in_any_state() {
    let mut session = started(&["amy", "bob", "cat"], 2);
    let first = at(&session, 0);
    let second = at(&session, 1);

    assert_eq!(session.ask(&first, &seat(0), "hearts"), Err(SessionError::SelfTarget));
    assert_eq!(session.ask(&first, &first.clone().into(), "hearts"), Err(SessionError::SelfTarget));

    // Still rejected after facts have accumulated
    session.ask(&first, &seat(1), "hearts").unwrap();
    session.go_fish(&second).unwrap();
    assert_eq!(session.ask(&second, &seat(1), "spades"), Err(SessionError::SelfTarget));
    assert_eq!(SessionError::SelfTarget.kind(), ErrorKind::Reference);
}

#[test]
fn test_fourth_suit_in_three_player_game_is_rejected() {
    let mut session = started(&["amy", "bob", "cat"], 8);
    let p0 = at(&session, 0);
    let p1 = at(&session, 1);
    let p2 = at(&session, 2);

    session.ask(&p0, &seat(1), "hearts").unwrap();
    session.go_fish(&p1).unwrap();
    session.ask(&p1, &seat(2), "clubs").unwrap();
    session.go_fish(&p2).unwrap();
    session.ask(&p2, &seat(0), "spades").unwrap();
    session.go_fish(&p0).unwrap();
    assert_eq!(session.suits().len(), 3);

    let engine_before = session.engine().cloned();
    let history_before = session.history().len();

    assert_eq!(session.ask(&p0, &seat(1), "diamonds"), Err(SessionError::SuitRegistryFull(3)));
    assert_eq!(session.engine().cloned(), engine_before);
    assert_eq!(session.history().len(), history_before);
    assert_eq!(session.suits().len(), 3);
    assert_eq!(session.status(), SessionStatus::AwaitingAsk);

    // Known names still work
    assert!(session.ask(&p0, &seat(1), "HEARTS").is_ok());
}

#[test]
fn test_ask_for_suit_known_absent_is_a_contradiction() {
    let mut session = started(&["amy", "bob", "cat"], 4);
    let p0 = at(&session, 0);
    let p1 = at(&session, 1);
    let p2 = at(&session, 2);

    // Bob answers "go fish" to hearts: he has none
    session.ask(&p0, &seat(1), "hearts").unwrap();
    session.go_fish(&p1).unwrap();

    let err = session.ask(&p1, &seat(2), "hearts").unwrap_err();
    assert!(matches!(err, SessionError::Contradiction(Contradiction::Ask { .. })));
    assert_eq!(session.status(), SessionStatus::AwaitingAsk);

    // A different suit is fine
    session.ask(&p1, &seat(2), "clubs").unwrap();
    assert_eq!(session.respond(&p2, 0).map(|o| o.is_game_over()), Ok(false));
}

#[test]
fn test_turn_passes_in_seat_order() {
    let mut session = started(&["amy", "bob", "cat", "dan"], 21);
    let keys: Vec<_> = (0..4).map(|i| at(&session, i)).collect();

    for round in 0..4u8 {
        let asker = &keys[round as usize];
        let target = (round + 1) % 4;
        session.ask(asker, &seat(target), &format!("suit{round}")).unwrap();
        let outcome = session.go_fish(&keys[target as usize]).unwrap();

        let Outcome::Turn(turn) = outcome else {
            panic!("expected the game to continue");
        };
        assert_eq!(turn.asker.seat, PlayerId::new(target));
        assert_eq!(turn.turn, u32::from(round) + 2);
    }
}

#[test]
fn test_actions_after_game_over_are_rejected() {
    let mut session = started(&["amy", "bob"], 5);
    let first = at(&session, 0);
    let second = at(&session, 1);
    session.ask(&first, &seat(1), "clubs").unwrap();
    session.go_fish(&second).unwrap();

    assert_eq!(session.ask(&second, &seat(0), "clubs"), Err(SessionError::GameOver));
    assert_eq!(session.respond(&first, 0), Err(SessionError::GameOver));
    assert_eq!(SessionError::GameOver.kind(), ErrorKind::State);
}

#[test]
fn test_final_report_reveals_holdings() {
    let mut session = started(&["amy", "bob"], 5);
    let first = at(&session, 0);
    let second = at(&session, 1);
    session.ask(&first, &seat(1), "clubs").unwrap();
    session.go_fish(&second).unwrap();

    let summary = session.status_report();
    assert_eq!(summary.status, SessionStatus::GameOver);
    assert_eq!(summary.turn, None);

    let report = summary.report.clone().unwrap();
    assert_eq!(report.result.winner.key, first);
    assert_eq!(report.suits, vec!["clubs".to_string(), "suit 1".to_string()]);
    // Two players, both hands fully known: clubs with the asker, the rest
    // with the responder
    assert_eq!(report.holdings, vec![vec![4, 0], vec![0, 4]]);

    let text = summary.to_string();
    assert!(text.contains("proven to hold every clubs"));
}
