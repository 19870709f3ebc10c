//! References to the player being asked.

use crate::core::{PlayerId, PlayerKey};

/// How a caller names the target of an ask: by seat or by key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TargetRef {
    Seat(PlayerId),
    Key(PlayerKey),
}

impl From<PlayerId> for TargetRef {
    fn from(seat: PlayerId) -> Self {
        TargetRef::Seat(seat)
    }
}

impl From<PlayerKey> for TargetRef {
    fn from(key: PlayerKey) -> Self {
        TargetRef::Key(key)
    }
}

impl From<&str> for TargetRef {
    fn from(key: &str) -> Self {
        TargetRef::Key(PlayerKey::from(key))
    }
}

impl std::fmt::Display for TargetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetRef::Seat(seat) => write!(f, "seat {}", seat.0),
            TargetRef::Key(key) => write!(f, "{key}"),
        }
    }
}
