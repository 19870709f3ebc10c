//! Session status and the transition table.
//!
//! ```text
//! NotStarted       --join/leave-->   NotStarted
//! NotStarted       --start-->        AwaitingAsk
//! AwaitingAsk      --ask-->          AwaitingResponse | GameOver
//! AwaitingResponse --respond-->      AwaitingAsk      | GameOver
//! ```
//!
//! Anything else is rejected before the session is touched.

use serde::{Deserialize, Serialize};

use super::error::SessionError;
use crate::core::{PlayerId, SuitId};

/// Coarse session status, suitable for reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    NotStarted,
    AwaitingAsk,
    AwaitingResponse,
    GameOver,
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SessionStatus::NotStarted => "waiting for players",
            SessionStatus::AwaitingAsk => "waiting for an ask",
            SessionStatus::AwaitingResponse => "waiting for a response",
            SessionStatus::GameOver => "game over",
        };
        f.write_str(text)
    }
}

/// Commands a caller can issue against a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    Join,
    Leave,
    Start,
    Ask,
    Respond,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Command::Join => "join",
            Command::Leave => "leave",
            Command::Start => "start",
            Command::Ask => "ask",
            Command::Respond => "respond",
        };
        f.write_str(text)
    }
}

/// How the winner was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Victory {
    /// Every holding is known; the last player to act wins.
    Converged,
    /// One player is proven to hold the whole suit.
    SuitProven(SuitId),
}

/// Status plus the data that is only meaningful in that status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    NotStarted,
    AwaitingAsk {
        asker: PlayerId,
    },
    AwaitingResponse {
        asker: PlayerId,
        responder: PlayerId,
        suit: SuitId,
    },
    GameOver {
        winner: PlayerId,
        victory: Victory,
    },
}

impl Phase {
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        match self {
            Phase::NotStarted => SessionStatus::NotStarted,
            Phase::AwaitingAsk { .. } => SessionStatus::AwaitingAsk,
            Phase::AwaitingResponse { .. } => SessionStatus::AwaitingResponse,
            Phase::GameOver { .. } => SessionStatus::GameOver,
        }
    }

    /// Seats referenced by this phase.
    pub(crate) fn seats(&self) -> impl Iterator<Item = PlayerId> {
        let seats: [Option<PlayerId>; 2] = match *self {
            Phase::NotStarted => [None, None],
            Phase::AwaitingAsk { asker } => [Some(asker), None],
            Phase::AwaitingResponse { asker, responder, .. } => [Some(asker), Some(responder)],
            Phase::GameOver { winner, .. } => [Some(winner), None],
        };
        seats.into_iter().flatten()
    }
}

impl SessionStatus {
    /// Reject commands the table does not list for this status.
    ///
    /// # Errors
    ///
    /// A state error naming why the command is not allowed now.
    pub fn check(self, command: Command) -> Result<(), SessionError> {
        use Command::*;
        use SessionStatus::*;

        match (self, command) {
            (NotStarted, Join | Leave | Start)
            | (AwaitingAsk, Ask)
            | (AwaitingResponse, Respond) => Ok(()),
            (NotStarted, Ask | Respond) => Err(SessionError::NotStarted),
            (GameOver, Ask | Respond) => Err(SessionError::GameOver),
            (_, Join | Leave | Start) => Err(SessionError::AlreadyStarted),
            (status, command) => Err(SessionError::WrongPhase { status, command }),
        }
    }

    /// Status after `command` succeeds; `won` says whether the win check
    /// fired.
    ///
    /// # Errors
    ///
    /// Same as [`SessionStatus::check`].
    pub fn transition(self, command: Command, won: bool) -> Result<SessionStatus, SessionError> {
        self.check(command)?;

        let next = match (command, won) {
            (Command::Join | Command::Leave, _) => SessionStatus::NotStarted,
            (Command::Start, _) => SessionStatus::AwaitingAsk,
            (Command::Ask | Command::Respond, true) => SessionStatus::GameOver,
            (Command::Ask, false) => SessionStatus::AwaitingResponse,
            (Command::Respond, false) => SessionStatus::AwaitingAsk,
        };
        Ok(next)
    }
}
