//! Deduction engine: card-count bounds per (player, suit).
//!
//! `ConstraintState` is pure data plus rules. It performs no I/O and knows
//! nothing about turns; the session decides which facts to record and when
//! to propagate.

pub mod interval;
pub mod state;
pub mod propagate;

pub use interval::Interval;
pub use state::ConstraintState;
pub use propagate::Inconsistency;
