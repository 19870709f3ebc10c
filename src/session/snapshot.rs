//! Session snapshots for external persistence.
//!
//! The snapshot is plain serde data; callers pick the storage format.
//! Restoring validates dimensions and references so a damaged record
//! cannot produce a session that violates the engine's invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::game::GameSession;
use super::status::{Phase, Victory};
use crate::constraints::ConstraintState;
use crate::core::{ActionRecord, PlayerKey, SessionConfig, SuitRegistry};

/// Bound matrices and hand sizes, `[player][suit]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundsSnapshot {
    pub minimums: Vec<Vec<u8>>,
    pub maximums: Vec<Vec<u8>>,
    pub hand_sizes: Vec<u16>,
}

/// Everything needed to rebuild a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub config: SessionConfig,
    /// Join order before start, turn order after.
    pub players: Vec<PlayerKey>,
    pub suit_names: Vec<String>,
    /// Present once the game has started.
    pub bounds: Option<BoundsSnapshot>,
    pub phase: Phase,
    pub turn: u32,
    pub history: Vec<ActionRecord>,
}

/// Why a snapshot could not be restored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("bounds do not match {players} players or are inconsistent")]
    Bounds { players: usize },

    #[error("a started game must carry bounds, and only a started game may")]
    MissingBounds,

    #[error("suit names are duplicated or exceed the suit count")]
    SuitNames,

    #[error("phase references a seat or suit that does not exist")]
    Phase,

    #[error("duplicate player {0}")]
    DuplicatePlayer(PlayerKey),

    #[error("history references a seat or suit that does not exist")]
    History,

    #[error("{have} players exceed the limit of {max}")]
    Roster { have: usize, max: usize },
}

impl GameSession {
    /// Capture the session for storage.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            config: self.config.clone(),
            players: self.players.clone(),
            suit_names: self.suits.names().map(str::to_string).collect(),
            bounds: self.engine.as_ref().map(|engine| BoundsSnapshot {
                minimums: engine.minimums(),
                maximums: engine.maximums(),
                hand_sizes: engine.hand_sizes().as_slice().to_vec(),
            }),
            phase: self.phase,
            turn: self.turn,
            history: self.history.clone(),
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// # Errors
    ///
    /// [`SnapshotError`] if the snapshot is internally inconsistent.
    pub fn restore(snapshot: SessionSnapshot) -> Result<Self, SnapshotError> {
        let SessionSnapshot { config, players, suit_names, bounds, phase, turn, history } = snapshot;
        let config = config.normalized();

        if players.len() > config.max_players {
            return Err(SnapshotError::Roster { have: players.len(), max: config.max_players });
        }

        for (i, key) in players.iter().enumerate() {
            if players[..i].contains(key) {
                return Err(SnapshotError::DuplicatePlayer(key.clone()));
            }
        }

        let started = !matches!(phase, Phase::NotStarted);
        let engine = match (started, bounds) {
            (true, Some(b)) => {
                let engine = ConstraintState::from_parts(config.cards_per_suit, b.minimums, b.maximums, b.hand_sizes)
                    .filter(|e| e.player_count() == players.len() && e.is_consistent())
                    .ok_or(SnapshotError::Bounds { players: players.len() })?;
                Some(engine)
            }
            (false, None) => None,
            _ => return Err(SnapshotError::MissingBounds),
        };

        let suits = if started {
            SuitRegistry::from_names(players.len(), &suit_names).ok_or(SnapshotError::SuitNames)?
        } else if suit_names.is_empty() {
            SuitRegistry::default()
        } else {
            return Err(SnapshotError::SuitNames);
        };

        let seats_valid = phase.seats().all(|seat| seat.index() < players.len());
        let suit_valid = match phase {
            Phase::AwaitingResponse { suit, .. } | Phase::GameOver { victory: Victory::SuitProven(suit), .. } => {
                suit.index() < suits.len()
            }
            _ => true,
        };
        if !seats_valid || !suit_valid {
            return Err(SnapshotError::Phase);
        }

        let history_valid = history
            .iter()
            .all(|r| r.player.index() < players.len() && r.declaration.suit().index() < suits.len());
        if !history_valid {
            return Err(SnapshotError::History);
        }

        Ok(Self {
            config,
            players,
            suits,
            engine,
            phase,
            turn,
            history,
        })
    }
}
