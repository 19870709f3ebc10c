//! Structured results returned to callers for rendering.

use serde::{Deserialize, Serialize};

use super::status::SessionStatus;
use crate::core::{PlayerId, PlayerKey};

/// A seat together with the key of the player sitting there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub seat: PlayerId,
    pub key: PlayerKey,
}

/// An ask waiting for its answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAsk {
    pub responder: Seat,
    pub suit: String,
}

/// Whose move it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    /// Turn number, starting at 1.
    pub turn: u32,
    pub asker: Seat,
    /// Set while the asker waits for a response.
    pub pending: Option<PendingAsk>,
    /// Hand sizes in seat order.
    pub hand_sizes: Vec<u16>,
}

/// How the game was won, with suit names resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    Converged,
    SuitProven { suit: String },
}

/// Final result of a finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub winner: Seat,
    pub reason: WinReason,
}

/// Result of an ask or respond.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Turn(TurnInfo),
    GameOver(GameOver),
}

impl Outcome {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, Outcome::GameOver(_))
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Seat> {
        match self {
            Outcome::GameOver(over) => Some(&over.winner),
            Outcome::Turn(_) => None,
        }
    }
}

/// One roster line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerLine {
    pub key: PlayerKey,
    /// Seat once the game has started.
    pub seat: Option<PlayerId>,
    pub hand_size: Option<u16>,
}

/// Revealed holdings once the game is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReport {
    pub result: GameOver,
    /// Suit names in index order; unnamed suits are listed as `suit N`.
    pub suits: Vec<String>,
    /// Minimum holdings, `[seat][suit]`.
    pub holdings: Vec<Vec<u8>>,
}

/// Snapshot of a session for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub status: SessionStatus,
    pub players: Vec<PlayerLine>,
    pub turn: Option<TurnInfo>,
    pub report: Option<FinalReport>,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Status: {}", self.status)?;
        for line in &self.players {
            match (line.seat, line.hand_size) {
                (Some(seat), Some(hand)) => writeln!(f, "  {}. {} ({} cards)", seat.0, line.key, hand)?,
                _ => writeln!(f, "  {}", line.key)?,
            }
        }

        if let Some(turn) = &self.turn {
            write!(f, "Turn {}: {} to ", turn.turn, turn.asker.key)?;
            match &turn.pending {
                Some(pending) => writeln!(f, "hear from {} about {}", pending.responder.key, pending.suit)?,
                None => writeln!(f, "ask")?,
            }
        }

        if let Some(report) = &self.report {
            match &report.result.reason {
                WinReason::Converged => writeln!(f, "{} wins: every hand is known", report.result.winner.key)?,
                WinReason::SuitProven { suit } => {
                    writeln!(f, "{} wins: proven to hold every {}", report.result.winner.key, suit)?
                }
            }
            for (line, row) in self.players.iter().zip(&report.holdings) {
                let cards: Vec<String> = report
                    .suits
                    .iter()
                    .zip(row)
                    .filter(|(_, count)| **count > 0)
                    .map(|(suit, count)| format!("{count} {suit}"))
                    .collect();
                writeln!(f, "  {}: {}", line.key, cards.join(", "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(i: u8, key: &str) -> Seat {
        Seat { seat: PlayerId::new(i), key: PlayerKey::from(key) }
    }

    #[test]
    fn test_outcome_winner() {
        let over = Outcome::GameOver(GameOver {
            winner: seat(1, "bob"),
            reason: WinReason::Converged,
        });
        assert!(over.is_game_over());
        assert_eq!(over.winner(), Some(&seat(1, "bob")));

        let turn = Outcome::Turn(TurnInfo {
            turn: 1,
            asker: seat(0, "amy"),
            pending: None,
            hand_sizes: vec![4, 4],
        });
        assert!(!turn.is_game_over());
        assert_eq!(turn.winner(), None);
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            status: SessionStatus::GameOver,
            players: vec![
                PlayerLine { key: "amy".into(), seat: Some(PlayerId::new(0)), hand_size: Some(5) },
                PlayerLine { key: "bob".into(), seat: Some(PlayerId::new(1)), hand_size: Some(3) },
            ],
            turn: None,
            report: Some(FinalReport {
                result: GameOver {
                    winner: seat(0, "amy"),
                    reason: WinReason::SuitProven { suit: "hearts".into() },
                },
                suits: vec!["hearts".into(), "suit 1".into()],
                holdings: vec![vec![4, 0], vec![0, 2]],
            }),
        };

        let text = summary.to_string();
        assert!(text.contains("Status: game over"));
        assert!(text.contains("0. amy (5 cards)"));
        assert!(text.contains("amy wins: proven to hold every hearts"));
        assert!(text.contains("  bob: 2 suit 1"));
    }
}
