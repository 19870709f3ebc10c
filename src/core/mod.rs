//! Core types: players, suits, declarations, RNG, configuration.
//!
//! Everything here is plain data with no game rules attached. The deduction
//! engine lives in `constraints`, the turn protocol in `session`.

pub mod player;
pub mod suit;
pub mod rng;
pub mod config;
pub mod action;

pub use player::{PlayerId, PlayerKey, PlayerMap};
pub use suit::{SuitId, SuitLookup, SuitRegistry};
pub use rng::GameRng;
pub use config::{SessionConfig, CARDS_PER_SUIT, MAX_PLAYERS};
pub use action::{ActionRecord, Declaration};
