//! Game session hand-off
//!
//! The session manager owns whatever state a match keeps while the game
//! runs (saved game tracking, statistics, rich presence). The launcher only
//! tells it when the game is gone.

use std::sync::atomic::{AtomicU64, Ordering};

/// Receives the end of a game session
pub trait SessionManager: Send + Sync {
    /// Called once per launch, after the game process exits or fails to start
    fn end_session(&self);
}

/// Session manager for local play that only records and logs session ends
#[derive(Debug, Default)]
pub struct LocalSession {
    ended: AtomicU64,
}

impl LocalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions ended so far
    pub fn ended_count(&self) -> u64 {
        self.ended.load(Ordering::SeqCst)
    }
}

impl SessionManager for LocalSession {
    fn end_session(&self) {
        let count = self.ended.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Game session ended ({} total)", count);
    }
}
