//! Shared helpers for integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use quantum_fish::{GameSession, PlayerId, PlayerKey, SessionConfig};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test subscriber once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then defaults to `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// A started session with a fixed seed.
pub fn started(names: &[&str], seed: u64) -> GameSession {
    init_logging();
    let mut session = GameSession::with_config(SessionConfig::default().with_seed(seed));
    for name in names {
        session.join(PlayerKey::from(*name)).unwrap();
    }
    session.start().unwrap();
    session
}

/// Key of whoever sits at `seat`.
pub fn at(session: &GameSession, seat: u8) -> PlayerKey {
    session.whois(PlayerId::new(seat)).unwrap().clone()
}
