//! Fixed-point bound propagation.
//!
//! Two counting rules feed each other until nothing changes:
//!
//! - **Suit total**: the suit's counts over all players sum to
//!   `cards_per_suit`, so one player's count is at most what the others'
//!   minimums leave over and at least what their maximums cannot absorb.
//! - **Hand total**: a player's counts over all suits sum to their hand
//!   size, bounded the same way from the other suits.
//!
//! Minimums only rise and maximums only fall, all inside
//! `[0, cards_per_suit]`, so the loop ends after at most
//! `2 * players * suits * cards_per_suit` changing rounds.

use thiserror::Error;

use super::state::ConstraintState;
use crate::core::{PlayerId, SuitId};

/// The bounds admit no count for this (player, suit).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no consistent count remains for {player} in {suit}")]
pub struct Inconsistency {
    pub player: PlayerId,
    pub suit: SuitId,
}

impl ConstraintState {
    /// Apply the suit-total and hand-total rules until a full pass changes
    /// no bound.
    ///
    /// Returns the number of passes run, including the final unchanged one.
    ///
    /// # Errors
    ///
    /// [`Inconsistency`] if some interval becomes empty, meaning the facts
    /// recorded so far cannot all be true. The state is partially tightened
    /// in that case and should be discarded.
    pub fn propagate(&mut self) -> Result<usize, Inconsistency> {
        self.check_nonempty()?;

        let mut rounds = 0;
        loop {
            let previous = self.bounds.clone();
            self.suit_total_pass()?;
            self.hand_total_pass()?;
            rounds += 1;
            if self.bounds == previous {
                return Ok(rounds);
            }
        }
    }

    fn check_nonempty(&self) -> Result<(), Inconsistency> {
        for (player, row) in self.bounds.iter() {
            if let Some(suit) = row.iter().position(|iv| iv.is_empty()) {
                return Err(Inconsistency { player, suit: SuitId(suit as u8) });
            }
        }
        Ok(())
    }

    fn suit_total_pass(&mut self) -> Result<(), Inconsistency> {
        let total = i32::from(self.cards_per_suit);

        for suit in SuitId::all(self.suit_count()) {
            for player in PlayerId::all(self.player_count()) {
                let (others_min, others_max) = self
                    .bounds
                    .iter()
                    .filter(|(other, _)| *other != player)
                    .fold((0, 0), |(lo, hi), (_, row)| {
                        let iv = row[suit.index()];
                        (lo + i32::from(iv.min), hi + i32::from(iv.max))
                    });

                self.tighten_max(player, suit, total - others_min)?;
                self.tighten_min(player, suit, total - others_max)?;
            }
        }
        Ok(())
    }

    fn hand_total_pass(&mut self) -> Result<(), Inconsistency> {
        for player in PlayerId::all(self.player_count()) {
            let hand = i32::from(self.hand_sizes[player]);

            for suit in SuitId::all(self.suit_count()) {
                let (others_min, others_max) = self.bounds[player]
                    .iter()
                    .enumerate()
                    .filter(|(other, _)| *other != suit.index())
                    .fold((0, 0), |(lo, hi), (_, iv)| {
                        (lo + i32::from(iv.min), hi + i32::from(iv.max))
                    });

                self.tighten_max(player, suit, hand - others_min)?;
                self.tighten_min(player, suit, hand - others_max)?;
            }
        }
        Ok(())
    }

    fn tighten_max(&mut self, player: PlayerId, suit: SuitId, n: i32) -> Result<(), Inconsistency> {
        let iv = self.interval(player, suit);
        if n < i32::from(iv.min) {
            return Err(Inconsistency { player, suit });
        }
        if n < i32::from(iv.max) {
            self.at_most(player, suit, n as u8);
        }
        Ok(())
    }

    fn tighten_min(&mut self, player: PlayerId, suit: SuitId, n: i32) -> Result<(), Inconsistency> {
        let iv = self.interval(player, suit);
        if n > i32::from(iv.max) {
            return Err(Inconsistency { player, suit });
        }
        if n > i32::from(iv.min) {
            self.at_least(player, suit, n as u8);
        }
        Ok(())
    }
}
