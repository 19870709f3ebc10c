//! Per-player, per-suit card-count bounds.
//!
//! ## Model
//!
//! N players, N suits, `cards_per_suit` cards of each suit. Every player is
//! dealt `cards_per_suit` cards, so hand sizes start there and change only
//! through give/receive. A hand can grow to `players * cards_per_suit`
//! cards, so hand sizes are kept as `u16`. Nobody sees a hand; the state keeps, for every
//! (player, suit), the tightest `[min, max]` consistent with everything that
//! has been declared.
//!
//! ## Recording facts
//!
//! - `record_ask`: the asker holds at least one card of the suit.
//! - `record_give`: the giver held exactly `n` and now holds none.
//! - `record_receive`: the receiver gains `n` cards of the suit.
//!
//! `record_ask` and `record_give` reject facts that contradict the current
//! bounds and leave the state untouched. Derived bounds come from
//! `propagate` (see `propagate.rs`).

use serde::{Deserialize, Serialize};

use super::interval::Interval;
use crate::core::{PlayerId, PlayerMap, SuitId, CARDS_PER_SUIT};

/// Bounds on every player's holdings, derived from public declarations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintState {
    pub(super) cards_per_suit: u8,
    /// Indexed `[player][suit]`.
    pub(super) bounds: PlayerMap<Vec<Interval>>,
    pub(super) hand_sizes: PlayerMap<u16>,
}

impl ConstraintState {
    /// Fresh state for `player_count` players with the standard deck.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self::with_cards_per_suit(player_count, CARDS_PER_SUIT)
    }

    /// Fresh state with a custom number of cards per suit.
    #[must_use]
    pub fn with_cards_per_suit(player_count: usize, cards_per_suit: u8) -> Self {
        let open = Interval::new(0, cards_per_suit);
        Self {
            cards_per_suit,
            bounds: PlayerMap::new(player_count, |_| vec![open; player_count]),
            hand_sizes: PlayerMap::with_value(player_count, u16::from(cards_per_suit)),
        }
    }

    /// Rebuild a state from raw matrices, e.g. a stored snapshot.
    ///
    /// Returns `None` if the dimensions disagree or any interval is empty or
    /// exceeds `cards_per_suit`.
    pub fn from_parts(
        cards_per_suit: u8,
        minimums: Vec<Vec<u8>>,
        maximums: Vec<Vec<u8>>,
        hand_sizes: Vec<u16>,
    ) -> Option<Self> {
        let n = hand_sizes.len();
        if minimums.len() != n || maximums.len() != n {
            return None;
        }

        let mut rows = Vec::with_capacity(n);
        for (mins, maxs) in minimums.into_iter().zip(maximums) {
            if mins.len() != n || maxs.len() != n {
                return None;
            }
            let row: Vec<Interval> = mins
                .into_iter()
                .zip(maxs)
                .map(|(min, max)| Interval::new(min, max))
                .collect();
            if row.iter().any(|iv| iv.is_empty() || iv.max > cards_per_suit) {
                return None;
            }
            rows.push(row);
        }

        Some(Self {
            cards_per_suit,
            bounds: PlayerMap::from_vec(rows)?,
            hand_sizes: PlayerMap::from_vec(hand_sizes)?,
        })
    }

    // === Queries ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hand_sizes.player_count()
    }

    /// Suits tracked; always equal to the player count.
    #[must_use]
    pub fn suit_count(&self) -> usize {
        self.player_count()
    }

    #[must_use]
    pub fn cards_per_suit(&self) -> u8 {
        self.cards_per_suit
    }

    #[must_use]
    pub fn interval(&self, player: PlayerId, suit: SuitId) -> Interval {
        self.bounds[player][suit.index()]
    }

    #[must_use]
    pub fn hand_size(&self, player: PlayerId) -> u16 {
        self.hand_sizes[player]
    }

    #[must_use]
    pub fn hand_sizes(&self) -> &PlayerMap<u16> {
        &self.hand_sizes
    }

    /// Minimum-holdings matrix, `[player][suit]`.
    #[must_use]
    pub fn minimums(&self) -> Vec<Vec<u8>> {
        self.bounds
            .iter()
            .map(|(_, row)| row.iter().map(|iv| iv.min).collect())
            .collect()
    }

    /// Maximum-holdings matrix, `[player][suit]`.
    #[must_use]
    pub fn maximums(&self) -> Vec<Vec<u8>> {
        self.bounds
            .iter()
            .map(|(_, row)| row.iter().map(|iv| iv.max).collect())
            .collect()
    }

    /// Could `player` hold exactly `n` cards of `suit`?
    #[must_use]
    pub fn can_have(&self, player: PlayerId, suit: SuitId, n: u8) -> bool {
        self.interval(player, suit).contains(n)
    }

    /// Every player's exact holdings are known.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.bounds
            .iter()
            .all(|(_, row)| row.iter().all(Interval::is_exact))
    }

    /// The player proven to hold the whole suit, if any.
    #[must_use]
    pub fn suit_fully_proven(&self, suit: SuitId) -> Option<PlayerId> {
        self.bounds
            .iter()
            .find(|(_, row)| row[suit.index()].min == self.cards_per_suit)
            .map(|(player, _)| player)
    }

    /// Check the three structural invariants: intervals inside
    /// `[0, cards_per_suit]`, hand sizes between row sums, and suit totals
    /// between column sums.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let cps = u32::from(self.cards_per_suit);

        let intervals_ok = self
            .bounds
            .iter()
            .all(|(_, row)| row.iter().all(|iv| !iv.is_empty() && iv.max <= self.cards_per_suit));

        let hands_ok = self.bounds.iter().all(|(player, row)| {
            let lo: u32 = row.iter().map(|iv| u32::from(iv.min)).sum();
            let hi: u32 = row.iter().map(|iv| u32::from(iv.max)).sum();
            let hand = u32::from(self.hand_sizes[player]);
            lo <= hand && hand <= hi
        });

        let suits_ok = SuitId::all(self.suit_count()).all(|suit| {
            let lo: u32 = self.bounds.iter().map(|(_, row)| u32::from(row[suit.index()].min)).sum();
            let hi: u32 = self.bounds.iter().map(|(_, row)| u32::from(row[suit.index()].max)).sum();
            lo <= cps && cps <= hi
        });

        intervals_ok && hands_ok && suits_ok
    }

    // === Tightening primitives ===

    /// Raise the lower bound; never loosens.
    pub fn at_least(&mut self, player: PlayerId, suit: SuitId, n: u8) {
        let iv = &mut self.bounds[player][suit.index()];
        iv.min = iv.min.max(n);
    }

    /// Lower the upper bound; never loosens.
    pub fn at_most(&mut self, player: PlayerId, suit: SuitId, n: u8) {
        let iv = &mut self.bounds[player][suit.index()];
        iv.max = iv.max.min(n);
    }

    /// Pin the player's count in this suit to zero.
    pub fn set_known(&mut self, player: PlayerId, suit: SuitId) {
        self.bounds[player][suit.index()] = Interval::exactly(0);
    }

    pub fn set_hand_size(&mut self, player: PlayerId, n: u16) {
        self.hand_sizes[player] = n;
    }

    // === Declarations ===

    /// `player` asked for `suit`, so they hold at least one.
    ///
    /// Returns `false` without changing anything if they are known to hold
    /// none.
    pub fn record_ask(&mut self, player: PlayerId, suit: SuitId) -> bool {
        if !self.can_have(player, suit, 1) {
            return false;
        }
        self.at_least(player, suit, 1);
        true
    }

    /// `player` gave away `n` cards of `suit`.
    ///
    /// Giving is all-or-nothing: afterwards the player holds none of the
    /// suit. Returns `false` without changing anything if `n` is outside the
    /// player's known range for the suit or exceeds their hand.
    pub fn record_give(&mut self, player: PlayerId, suit: SuitId, n: u8) -> bool {
        let n_cards = u16::from(n);
        if !self.can_have(player, suit, n) || n_cards > self.hand_sizes[player] {
            return false;
        }
        let remaining = self.hand_sizes[player] - n_cards;
        self.set_hand_size(player, remaining);
        self.set_known(player, suit);
        true
    }

    /// `player` received `n` cards of `suit`. Cannot fail.
    pub fn record_receive(&mut self, player: PlayerId, suit: SuitId, n: u8) {
        let hand = self.hand_sizes[player] + u16::from(n);
        self.set_hand_size(player, hand);

        let cps = self.cards_per_suit;
        let iv = &mut self.bounds[player][suit.index()];
        let min = u16::from(iv.min) + u16::from(n);
        let max = u16::from(iv.max) + u16::from(n);
        *iv = if min > u16::from(cps) {
            // More than the whole suit: left empty for `propagate` to report
            Interval::new(cps, cps.saturating_sub(1))
        } else {
            Interval::new(min as u8, max.min(u16::from(cps)) as u8)
        };
    }

    /// Ask, give and receive as one fact sequence.
    ///
    /// Either all three apply or, if the ask or the give contradicts the
    /// bounds, none do.
    pub fn record_exchange(&mut self, asker: PlayerId, giver: PlayerId, suit: SuitId, n: u8) -> bool {
        let mut next = self.clone();
        if !next.record_ask(asker, suit) || !next.record_give(giver, suit, n) {
            return false;
        }
        next.record_receive(asker, suit, n);
        *self = next;
        true
    }
}

impl std::fmt::Display for ConstraintState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Hand sizes[players]:  {:?}", self.hand_sizes.as_slice())?;
        writeln!(f, "Mins[players][suits]: {:?}", self.minimums())?;
        write!(f, "Maxs[players][suits]: {:?}", self.maximums())
    }
}
