//! # quantum-fish
//!
//! Deduction engine for a card game where nobody ever sees a hand.
//!
//! Players ask each other for suits and hand cards over; every declaration
//! is public, every card is hidden. The engine turns the declarations into
//! the tightest possible `[min, max]` bounds on how many cards of each suit
//! each player holds, and the game ends the moment those bounds prove a
//! winner.
//!
//! ## Rules
//!
//! - N players, N suits, 4 cards per suit; everyone starts with 4 cards.
//! - Asking for a suit declares that you hold at least one of it.
//! - Giving away cards of a suit declares that you now hold none.
//! - A player proven to hold all four cards of a suit wins. If every hand
//!   becomes fully known first, the player who just acted wins.
//!
//! ## Modules
//!
//! - `core`: Player and suit IDs, per-player storage, declarations, RNG,
//!   configuration
//! - `constraints`: Bound propagation (`ConstraintState`)
//! - `session`: Turn protocol (`GameSession`), errors, reports, snapshots,
//!   and the per-key `SessionRegistry`
//!
//! ## Example
//!
//! ```
//! use quantum_fish::{GameSession, Outcome, PlayerKey, SessionConfig, TargetRef};
//!
//! let mut game = GameSession::with_config(SessionConfig::default().with_seed(1));
//! for name in ["amy", "bob", "cat"] {
//!     game.join(PlayerKey::from(name)).unwrap();
//! }
//! let turn = game.start().unwrap();
//! let asker = turn.asker.key.clone();
//! let target = game.players()[1].clone();
//!
//! game.ask(&asker, &TargetRef::Key(target.clone()), "hearts").unwrap();
//! let outcome = game.respond(&target, 3).unwrap();
//!
//! // The asker now provably holds all four hearts
//! assert!(outcome.is_game_over());
//! assert_eq!(outcome.winner().unwrap().key, asker);
//! ```

pub mod core;
pub mod constraints;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    ActionRecord, Declaration, GameRng, PlayerId, PlayerKey, PlayerMap, SessionConfig, SuitId, SuitRegistry,
    CARDS_PER_SUIT,
};

pub use crate::constraints::{ConstraintState, Inconsistency, Interval};

pub use crate::session::{
    Contradiction, ErrorKind, GameOver, GameSession, Outcome, Phase, SessionError, SessionRegistry,
    SessionSnapshot, SessionStatus, Summary, TargetRef, TurnInfo, WinReason,
};
