//! Property tests for the deduction engine over reachable states.
//!
//! States are reached the way a session reaches them: ask, propagate,
//! give, receive, propagate, with rejected exchanges skipped.

use proptest::prelude::*;
use quantum_fish::{ConstraintState, PlayerId, SuitId};

/// (asker, giver, suit, count), indices taken modulo the player count.
type Move = (u8, u8, u8, u8);

fn games() -> impl Strategy<Value = (usize, Vec<Move>)> {
    (2usize..=5).prop_flat_map(|players| {
        let n = players as u8;
        let moves = prop::collection::vec((0..n, 0..n, 0..n, 0..=4u8), 0..24);
        (Just(players), moves)
    })
}

/// Play `moves` and return every state reached after a full exchange.
fn reachable(players: usize, moves: &[Move]) -> Vec<ConstraintState> {
    let mut state = ConstraintState::new(players);
    let mut states = vec![state.clone()];

    for &(asker, giver, suit, count) in moves {
        if asker == giver {
            continue;
        }
        let (asker, giver, suit) = (PlayerId::new(asker), PlayerId::new(giver), SuitId::new(suit));

        let mut next = state.clone();
        if !next.record_ask(asker, suit) || next.propagate().is_err() {
            continue;
        }
        if !next.record_give(giver, suit, count) {
            continue;
        }
        next.record_receive(asker, suit, count);
        if next.propagate().is_err() {
            continue;
        }

        state = next;
        states.push(state.clone());
        if state.suit_fully_proven(suit).is_some() || state.is_converged() {
            break;
        }
    }
    states
}

fn cells(state: &ConstraintState) -> impl Iterator<Item = (PlayerId, SuitId)> {
    let n = state.player_count();
    PlayerId::all(n).flat_map(move |p| SuitId::all(n).map(move |s| (p, s)))
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_exchange((players, moves) in games()) {
        for state in reachable(players, &moves) {
            prop_assert!(state.is_consistent(), "invariants broken:\n{}", state);
        }
    }

    #[test]
    fn prop_propagation_only_tightens_and_is_idempotent(
        (players, moves) in games(),
        asker in 0u8..5,
        suit in 0u8..5,
    ) {
        let state = reachable(players, &moves).pop().unwrap();
        let n = players as u8;
        let (asker, suit) = (PlayerId::new(asker % n), SuitId::new(suit % n));

        let mut before = state.clone();
        prop_assume!(before.record_ask(asker, suit));

        let mut after = before.clone();
        prop_assume!(after.propagate().is_ok());

        for (p, s) in cells(&after) {
            prop_assert!(before.interval(p, s).encloses(&after.interval(p, s)));
        }

        let settled = after.clone();
        prop_assert_eq!(after.propagate(), Ok(1));
        prop_assert_eq!(after, settled);
    }

    #[test]
    fn prop_record_ask_fails_iff_max_below_one(
        (players, moves) in games(),
        player in 0u8..5,
        suit in 0u8..5,
    ) {
        let mut state = reachable(players, &moves).pop().unwrap();
        let n = players as u8;
        let (player, suit) = (PlayerId::new(player % n), SuitId::new(suit % n));

        let known = state.interval(player, suit);
        let before = state.clone();
        let accepted = state.record_ask(player, suit);

        prop_assert_eq!(accepted, known.max >= 1);
        if accepted {
            prop_assert!(state.interval(player, suit).min >= 1);
        } else {
            prop_assert_eq!(state, before);
        }
    }

    #[test]
    fn prop_record_give_fails_iff_count_outside_bounds(
        (players, moves) in games(),
        player in 0u8..5,
        suit in 0u8..5,
        count in 0u8..=4,
    ) {
        let mut state = reachable(players, &moves).pop().unwrap();
        let n = players as u8;
        let (player, suit) = (PlayerId::new(player % n), SuitId::new(suit % n));

        let known = state.interval(player, suit);
        let before = state.clone();
        let accepted = state.record_give(player, suit, count);

        prop_assert_eq!(accepted, known.contains(count));
        if accepted {
            prop_assert!(state.interval(player, suit).is_exact());
            prop_assert_eq!(state.interval(player, suit).max, 0);
        } else {
            prop_assert_eq!(state, before);
        }
    }

    #[test]
    fn prop_cards_are_conserved((players, moves) in games()) {
        for state in reachable(players, &moves) {
            let total: u32 = state.hand_sizes().as_slice().iter().map(|&h| u32::from(h)).sum();
            prop_assert_eq!(total, 4 * players as u32);
        }
    }
}
