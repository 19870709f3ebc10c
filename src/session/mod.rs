//! Game sessions: roster, turn protocol, reports, snapshots.
//!
//! A `GameSession` owns one `ConstraintState` and drives it through the
//! ask/give/receive cycle. Callers (a chat bot, a server) hold sessions in a
//! `SessionRegistry` and render the structured results themselves.

pub mod status;
pub mod error;
pub mod target;
pub mod report;
pub mod game;
pub mod snapshot;
pub mod registry;

pub use status::{Command, Phase, SessionStatus, Victory};
pub use error::{Contradiction, ErrorKind, SessionError};
pub use target::TargetRef;
pub use report::{FinalReport, GameOver, Outcome, PendingAsk, PlayerLine, Seat, Summary, TurnInfo, WinReason};
pub use game::GameSession;
pub use snapshot::{BoundsSnapshot, SessionSnapshot, SnapshotError};
pub use registry::{lock, RegistryError, SessionHandle, SessionRegistry};
