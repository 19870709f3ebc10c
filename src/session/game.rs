//! One game: roster, suit names, turn order and the ask/respond protocol.
//!
//! ## Flow
//!
//! 1. Players `join` (and may `leave`) while the session is not started.
//! 2. `start` shuffles the roster into turn order and deals the engine.
//! 3. The current asker `ask`s another player for a suit.
//! 4. That player `respond`s with how many they hand over (zero is "go
//!    fish"). The asker receives them and the turn passes on.
//!
//! After every accepted declaration the engine propagates to a fixed point
//! and the win check runs. Each command is validated and applied against a
//! working copy of the engine; the session only changes when the whole
//! command succeeds.

use tracing::{debug, info, warn};

use super::error::{Contradiction, SessionError};
use super::report::{FinalReport, GameOver, Outcome, PendingAsk, PlayerLine, Seat, Summary, TurnInfo, WinReason};
use super::status::{Command, Phase, SessionStatus, Victory};
use super::target::TargetRef;
use crate::constraints::ConstraintState;
use crate::core::{
    ActionRecord, Declaration, GameRng, PlayerId, PlayerKey, PlayerMap, SessionConfig, SuitId, SuitLookup,
    SuitRegistry,
};

/// A single game session.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub(super) config: SessionConfig,
    /// Join order before start, turn order after.
    pub(super) players: Vec<PlayerKey>,
    pub(super) suits: SuitRegistry,
    pub(super) engine: Option<ConstraintState>,
    pub(super) phase: Phase,
    pub(super) turn: u32,
    pub(super) history: Vec<ActionRecord>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// New session with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// New session; out-of-range config fields are clamped.
    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config: config.normalized(),
            players: Vec::new(),
            suits: SuitRegistry::default(),
            engine: None,
            phase: Phase::NotStarted,
            turn: 0,
            history: Vec::new(),
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.phase.status()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Members in join order, or in turn order once started.
    #[must_use]
    pub fn players(&self) -> &[PlayerKey] {
        &self.players
    }

    /// The deduction engine, once the game has started.
    #[must_use]
    pub fn engine(&self) -> Option<&ConstraintState> {
        self.engine.as_ref()
    }

    #[must_use]
    pub fn suits(&self) -> &SuitRegistry {
        &self.suits
    }

    /// Accepted declarations in order.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Seat of a member. Before start this is the join position.
    #[must_use]
    pub fn seat_of(&self, key: &PlayerKey) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|k| k == key)
            .map(|i| PlayerId::new(i as u8))
    }

    /// Key of the member at a seat.
    #[must_use]
    pub fn whois(&self, seat: PlayerId) -> Option<&PlayerKey> {
        self.players.get(seat.index())
    }

    // === Roster ===

    /// # Errors
    ///
    /// `AlreadyStarted`, `AlreadyJoined` or `SessionFull`.
    pub fn join(&mut self, key: PlayerKey) -> Result<(), SessionError> {
        self.status().check(Command::Join)?;
        if self.players.contains(&key) {
            return Err(SessionError::AlreadyJoined(key));
        }
        if self.players.len() >= self.config.max_players {
            return Err(SessionError::SessionFull { max: self.config.max_players });
        }

        debug!(player = %key, members = self.players.len() + 1, "player joined");
        self.players.push(key);
        Ok(())
    }

    /// # Errors
    ///
    /// `AlreadyStarted` or `NotJoined`.
    pub fn leave(&mut self, key: &PlayerKey) -> Result<(), SessionError> {
        self.status().check(Command::Leave)?;
        let index = self
            .players
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| SessionError::NotJoined(key.clone()))?;

        debug!(player = %key, "player left");
        self.players.remove(index);
        Ok(())
    }

    /// Fix turn order and deal.
    ///
    /// # Errors
    ///
    /// `AlreadyStarted` or `TooFewPlayers`.
    pub fn start(&mut self) -> Result<TurnInfo, SessionError> {
        let next = self.status().transition(Command::Start, false)?;
        debug_assert_eq!(next, SessionStatus::AwaitingAsk);

        let have = self.players.len();
        if have < self.config.min_players.max(2) {
            return Err(SessionError::TooFewPlayers { min: self.config.min_players.max(2), have });
        }

        let mut rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        rng.shuffle(&mut self.players);

        self.engine = Some(ConstraintState::with_cards_per_suit(have, self.config.cards_per_suit));
        self.suits = SuitRegistry::new(have);
        self.phase = Phase::AwaitingAsk { asker: PlayerId::new(0) };
        self.turn = 1;
        self.history.clear();

        info!(players = have, seed = rng.seed(), first = %self.players[0], "game started");
        self.turn_info()
    }

    // === Protocol ===

    /// `asker_key` asks `target` for cards of `suit_name`.
    ///
    /// # Errors
    ///
    /// State errors when it is not the asker's turn, reference errors for an
    /// unknown or self target or an unnamed or surplus suit, and
    /// `Contradiction` if the asker is known to hold none of the suit.
    pub fn ask(
        &mut self,
        asker_key: &PlayerKey,
        target: &TargetRef,
        suit_name: &str,
    ) -> Result<Outcome, SessionError> {
        self.status().check(Command::Ask)?;
        let Phase::AwaitingAsk { asker } = self.phase else {
            return Err(SessionError::NotStarted);
        };
        if self.seat_of(asker_key) != Some(asker) {
            return Err(SessionError::NotYourTurn(asker_key.clone()));
        }

        let responder = self.resolve(target)?;
        if responder == asker {
            return Err(SessionError::SelfTarget);
        }

        if SuitRegistry::normalize(suit_name).is_empty() {
            return Err(SessionError::EmptySuitName);
        }
        let suit = match self.suits.lookup(suit_name) {
            SuitLookup::Known(suit) | SuitLookup::New(suit) => suit,
            SuitLookup::Full => return Err(SessionError::SuitRegistryFull(self.suits.capacity())),
        };
        let name = SuitRegistry::normalize(suit_name);

        let mut engine = self.engine.clone().ok_or(SessionError::NotStarted)?;
        if !engine.record_ask(asker, suit) {
            let known = engine.interval(asker, suit);
            warn!(player = %asker_key, suit = %name, %known, "ask contradicts known holdings");
            return Err(Contradiction::Ask { player: asker_key.clone(), suit: name, known }.into());
        }
        self.settle(&mut engine, asker, &name)?;

        let won = Self::victory(&engine, asker, suit);
        let next = self.status().transition(Command::Ask, won.is_some())?;

        // Commit
        self.suits.insert(suit_name);
        self.history.push(ActionRecord::new(asker, Declaration::Ask { suit }, self.turn));
        self.engine = Some(engine);
        self.phase = match won {
            Some((winner, victory)) => Phase::GameOver { winner, victory },
            None => Phase::AwaitingResponse { asker, responder, suit },
        };
        debug_assert_eq!(self.status(), next);
        debug!(turn = self.turn, asker = %asker_key, target = %self.players[responder.index()], suit = %name, "ask accepted");

        self.outcome()
    }

    /// The pending responder hands over `count` cards of the asked suit.
    ///
    /// # Errors
    ///
    /// `NotYourTurn` unless `responder_key` is the player asked, `BadCount`
    /// for counts no suit can supply, and `Contradiction` if the count
    /// conflicts with the responder's known holdings.
    pub fn respond(&mut self, responder_key: &PlayerKey, count: u32) -> Result<Outcome, SessionError> {
        self.status().check(Command::Respond)?;
        let Phase::AwaitingResponse { asker, responder, suit } = self.phase else {
            return Err(SessionError::NotStarted);
        };
        if self.seat_of(responder_key) != Some(responder) {
            return Err(SessionError::NotYourTurn(responder_key.clone()));
        }

        let max = self.config.cards_per_suit;
        let n = match u8::try_from(count) {
            Ok(n) if n <= max => n,
            _ => return Err(SessionError::BadCount { count, max }),
        };

        let mut engine = self.engine.clone().ok_or(SessionError::NotStarted)?;
        if !engine.record_give(responder, suit, n) {
            let known = engine.interval(responder, suit);
            let suit = self.suit_name(suit);
            warn!(player = %responder_key, %suit, count = n, %known, "give contradicts known holdings");
            return Err(Contradiction::Give { player: responder_key.clone(), suit, count: n, known }.into());
        }
        engine.record_receive(asker, suit, n);
        self.settle(&mut engine, responder, &self.suit_name(suit))?;

        let won = Self::victory(&engine, responder, suit);
        let next = self.status().transition(Command::Respond, won.is_some())?;
        let after = next_asker(asker, engine.hand_sizes());

        // Commit
        self.history.push(ActionRecord::new(responder, Declaration::Give { suit, count: n }, self.turn));
        self.history.push(ActionRecord::new(asker, Declaration::Receive { suit, count: n }, self.turn));
        self.engine = Some(engine);
        debug!(turn = self.turn, responder = %responder_key, count = n, suit = %self.suit_name(suit), "response accepted");

        self.phase = match won {
            Some((winner, victory)) => Phase::GameOver { winner, victory },
            None => {
                self.turn += 1;
                // Cards are only ever moved, so some hand is always non-empty
                Phase::AwaitingAsk { asker: after.unwrap_or(asker) }
            }
        };
        debug_assert_eq!(self.status(), next);

        self.outcome()
    }

    /// Respond with zero cards.
    ///
    /// # Errors
    ///
    /// As [`GameSession::respond`].
    pub fn go_fish(&mut self, responder_key: &PlayerKey) -> Result<Outcome, SessionError> {
        self.respond(responder_key, 0)
    }

    // === Reporting ===

    /// Current status, roster and, after the game, the revealed holdings.
    #[must_use]
    pub fn status_report(&self) -> Summary {
        let started = self.engine.is_some();
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let seat = PlayerId::new(i as u8);
                PlayerLine {
                    key: key.clone(),
                    seat: started.then_some(seat),
                    hand_size: self.engine.as_ref().map(|e| e.hand_size(seat)),
                }
            })
            .collect();

        let report = match (self.phase, &self.engine) {
            (Phase::GameOver { winner, victory }, Some(engine)) => Some(FinalReport {
                result: self.game_over(winner, victory),
                suits: SuitId::all(engine.suit_count()).map(|s| self.suit_name(s)).collect(),
                holdings: engine.minimums(),
            }),
            _ => None,
        };

        Summary {
            status: self.status(),
            players,
            turn: self.turn_info().ok(),
            report,
        }
    }

    // === Internals ===

    fn resolve(&self, target: &TargetRef) -> Result<PlayerId, SessionError> {
        let seat = match target {
            TargetRef::Seat(seat) if seat.index() < self.players.len() => Some(*seat),
            TargetRef::Seat(_) => None,
            TargetRef::Key(key) => self.seat_of(key),
        };
        seat.ok_or_else(|| SessionError::UnknownTarget(target.clone()))
    }

    /// Propagate the working engine, mapping an empty interval to a
    /// contradiction by `actor`.
    fn settle(&self, engine: &mut ConstraintState, actor: PlayerId, suit: &str) -> Result<(), SessionError> {
        match engine.propagate() {
            Ok(rounds) => {
                debug!(rounds, "bounds settled");
                Ok(())
            }
            Err(err) => {
                let player = self.players[actor.index()].clone();
                warn!(%player, %err, "declaration leaves no possible deal");
                Err(Contradiction::Impossible { player, suit: suit.to_string() }.into())
            }
        }
    }

    /// A proven suit outranks convergence: the prover wins even when the
    /// same fact also settles every hand.
    fn victory(engine: &ConstraintState, actor: PlayerId, suit: SuitId) -> Option<(PlayerId, Victory)> {
        if let Some(prover) = engine.suit_fully_proven(suit) {
            return Some((prover, Victory::SuitProven(suit)));
        }
        engine.is_converged().then_some((actor, Victory::Converged))
    }

    fn suit_name(&self, suit: SuitId) -> String {
        self.suits
            .name(suit)
            .map_or_else(|| format!("suit {}", suit.0), str::to_string)
    }

    fn seat(&self, seat: PlayerId) -> Seat {
        Seat { seat, key: self.players[seat.index()].clone() }
    }

    fn game_over(&self, winner: PlayerId, victory: Victory) -> GameOver {
        let reason = match victory {
            Victory::Converged => WinReason::Converged,
            Victory::SuitProven(suit) => WinReason::SuitProven { suit: self.suit_name(suit) },
        };
        GameOver { winner: self.seat(winner), reason }
    }

    fn turn_info(&self) -> Result<TurnInfo, SessionError> {
        let (asker, pending) = match self.phase {
            Phase::AwaitingAsk { asker } => (asker, None),
            Phase::AwaitingResponse { asker, responder, suit } => (
                asker,
                Some(PendingAsk { responder: self.seat(responder), suit: self.suit_name(suit) }),
            ),
            Phase::NotStarted => return Err(SessionError::NotStarted),
            Phase::GameOver { .. } => return Err(SessionError::GameOver),
        };

        Ok(TurnInfo {
            turn: self.turn,
            asker: self.seat(asker),
            pending,
            hand_sizes: self
                .engine
                .as_ref()
                .map(|e| e.hand_sizes().as_slice().to_vec())
                .unwrap_or_default(),
        })
    }

    fn outcome(&self) -> Result<Outcome, SessionError> {
        match self.phase {
            Phase::GameOver { winner, victory } => {
                let over = self.game_over(winner, victory);
                info!(winner = %over.winner.key, turn = self.turn, "game over");
                Ok(Outcome::GameOver(over))
            }
            _ => self.turn_info().map(Outcome::Turn),
        }
    }
}

/// Next seat after `current` in turn order holding at least one card.
pub(crate) fn next_asker(current: PlayerId, hand_sizes: &PlayerMap<u16>) -> Option<PlayerId> {
    let count = hand_sizes.player_count();
    let mut seat = current;
    for _ in 0..count {
        seat = seat.next(count);
        if hand_sizes[seat] > 0 {
            return Some(seat);
        }
    }
    None
}
