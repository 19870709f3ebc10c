//! Session configuration.

use serde::{Deserialize, Serialize};

/// Cards of each suit in the deck.
pub const CARDS_PER_SUIT: u8 = 4;

/// Seats are `u8` indices, so no session can hold more members.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Session configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Cards of each suit across all hands. Every player is also dealt this
    /// many cards, so the deck holds `cards_per_suit * player_count` cards.
    pub cards_per_suit: u8,

    /// Minimum members required to start.
    pub min_players: usize,

    /// Maximum members allowed to join (at most 255).
    pub max_players: usize,

    /// Seed for the turn-order shuffle.
    /// `None` draws a fresh seed at start.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cards_per_suit: CARDS_PER_SUIT,
            min_players: 2,
            max_players: 8,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Use a fixed seed for turn order.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Change the number of cards per suit.
    pub fn with_cards_per_suit(mut self, cards: u8) -> Self {
        assert!(cards > 0, "A suit needs at least one card");
        self.cards_per_suit = cards;
        self
    }

    /// Change the maximum number of members.
    pub fn with_max_players(mut self, max: usize) -> Self {
        assert!((2..=MAX_PLAYERS).contains(&max), "Max players must be 2-255");
        self.max_players = max;
        self
    }

    /// Change the minimum number of members needed to start.
    pub fn with_min_players(mut self, min: usize) -> Self {
        assert!(min >= 2, "A game needs at least 2 players");
        self.min_players = min;
        self
    }

    /// Pull every field back into its valid range.
    ///
    /// Fields are public and deserializable, so a config may bypass the
    /// builders; sessions normalize whatever they are given.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.cards_per_suit = self.cards_per_suit.max(1);
        self.max_players = self.max_players.clamp(2, MAX_PLAYERS);
        self.min_players = self.min_players.clamp(2, self.max_players);
        self
    }
}
