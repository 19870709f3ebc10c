//! Session errors.
//!
//! Every error is recoverable: the session is unchanged and the caller may
//! reissue a corrected command.

use thiserror::Error;

use super::status::{Command, SessionStatus};
use super::target::TargetRef;
use crate::constraints::Interval;
use crate::core::PlayerKey;

/// Coarse classification used by callers to pick a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Not allowed in the current status, or not this player's turn.
    State,
    /// A player or suit reference could not be resolved.
    Reference,
    /// The declared fact conflicts with what is already known.
    Contradiction,
}

/// A declaration rejected by the deduction engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Contradiction {
    #[error("{player} cannot ask for {suit}: they are known to hold {known}")]
    Ask {
        player: PlayerKey,
        suit: String,
        known: Interval,
    },

    #[error("{player} cannot give {count} {suit}: they are known to hold {known}")]
    Give {
        player: PlayerKey,
        suit: String,
        count: u8,
        known: Interval,
    },

    #[error("{player} declaring that about {suit} leaves no possible deal")]
    Impossible { player: PlayerKey, suit: String },
}

/// Errors returned by session commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game has not started yet")]
    NotStarted,

    #[error("the game is over")]
    GameOver,

    #[error("cannot {command} while {status}")]
    WrongPhase {
        status: SessionStatus,
        command: Command,
    },

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerKey),

    #[error("{0} has already joined")]
    AlreadyJoined(PlayerKey),

    #[error("{0} is not in this game")]
    NotJoined(PlayerKey),

    #[error("the game is full ({max} players)")]
    SessionFull { max: usize },

    #[error("need at least {min} players to start, have {have}")]
    TooFewPlayers { min: usize, have: usize },

    #[error("no player matches {0}")]
    UnknownTarget(TargetRef),

    #[error("you cannot ask yourself")]
    SelfTarget,

    #[error("a suit needs a name")]
    EmptySuitName,

    #[error("all {0} suits already have names")]
    SuitRegistryFull(usize),

    #[error("cannot give {count} cards of one suit (at most {max})")]
    BadCount { count: u32, max: u8 },

    #[error(transparent)]
    Contradiction(#[from] Contradiction),
}

impl SessionError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::AlreadyStarted
            | SessionError::NotStarted
            | SessionError::GameOver
            | SessionError::WrongPhase { .. }
            | SessionError::NotYourTurn(_)
            | SessionError::AlreadyJoined(_)
            | SessionError::NotJoined(_)
            | SessionError::SessionFull { .. }
            | SessionError::TooFewPlayers { .. } => ErrorKind::State,
            SessionError::UnknownTarget(_)
            | SessionError::SelfTarget
            | SessionError::EmptySuitName
            | SessionError::SuitRegistryFull(_)
            | SessionError::BadCount { .. } => ErrorKind::Reference,
            SessionError::Contradiction(_) => ErrorKind::Contradiction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(SessionError::NotYourTurn(PlayerKey::from("a")).kind(), ErrorKind::State);
        assert_eq!(SessionError::SelfTarget.kind(), ErrorKind::Reference);
        assert_eq!(SessionError::SuitRegistryFull(3).kind(), ErrorKind::Reference);

        let contradiction = Contradiction::Impossible {
            player: PlayerKey::from("a"),
            suit: "hearts".into(),
        };
        assert_eq!(SessionError::from(contradiction).kind(), ErrorKind::Contradiction);
    }

    #[test]
    fn test_messages_name_the_bound() {
        let err = SessionError::from(Contradiction::Give {
            player: PlayerKey::from("bob"),
            suit: "hearts".into(),
            count: 4,
            known: Interval::new(0, 3),
        });
        assert_eq!(err.to_string(), "bob cannot give 4 hearts: they are known to hold 0..=3");

        let err = SessionError::WrongPhase {
            status: SessionStatus::AwaitingResponse,
            command: Command::Ask,
        };
        assert_eq!(err.to_string(), "cannot ask while waiting for a response");
    }
}
