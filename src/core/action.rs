//! Public declarations and the action history.
//!
//! Every fact the engine learns comes from one of three declarations. The
//! session records each accepted declaration so a finished game can be
//! replayed or explained.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::suit::SuitId;

/// A public declaration made by one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Declaration {
    /// "I ask for this suit" (so I hold at least one).
    Ask { suit: SuitId },
    /// "I give away this many of the suit" (so I hold none afterwards).
    Give { suit: SuitId, count: u8 },
    /// "I receive this many of the suit."
    Receive { suit: SuitId, count: u8 },
}

impl Declaration {
    /// The suit this declaration is about.
    #[must_use]
    pub fn suit(&self) -> SuitId {
        match *self {
            Declaration::Ask { suit }
            | Declaration::Give { suit, .. }
            | Declaration::Receive { suit, .. } => suit,
        }
    }
}

/// A recorded declaration with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who made the declaration.
    pub player: PlayerId,

    /// What was declared.
    pub declaration: Declaration,

    /// Turn number (starts at 1, advances after each answered ask).
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, declaration: Declaration, turn: u32) -> Self {
        Self {
            player,
            declaration,
            turn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_suit() {
        let suit = SuitId::new(2);
        assert_eq!(Declaration::Ask { suit }.suit(), suit);
        assert_eq!(Declaration::Give { suit, count: 1 }.suit(), suit);
        assert_eq!(Declaration::Receive { suit, count: 1 }.suit(), suit);
    }

    #[test]
    fn test_action_record_serialization() {
        let record = ActionRecord::new(
            PlayerId::new(1),
            Declaration::Give { suit: SuitId::new(0), count: 3 },
            4,
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
