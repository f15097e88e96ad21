//! Per-session isolation for deployments running several games at once.
//!
//! The engine itself is synchronous and single-threaded per session; the
//! registry provides the one-lock-per-session boundary. The map lock is
//! only held to look up or insert an entry, never while a session handles
//! an utterance.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use crate::config::GameConfig;
use crate::domain::state::SessionId;
use crate::services::session_flow::SessionController;

pub type SharedSession = Arc<Mutex<SessionController>>;

/// Owns every live session, each behind its own mutex.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded from OS entropy.
    pub fn create(&self, config: GameConfig) -> (SessionId, SharedSession) {
        self.insert(SessionController::from_entropy(config))
    }

    /// Create a session with a fixed seed (reproducible games).
    pub fn create_seeded(&self, config: GameConfig, seed: u64) -> (SessionId, SharedSession) {
        self.insert(SessionController::new(config, seed))
    }

    fn insert(&self, controller: SessionController) -> (SessionId, SharedSession) {
        let id = controller.id();
        let shared = Arc::new(Mutex::new(controller));
        self.sessions.lock().insert(id, Arc::clone(&shared));
        info!(session_id = %id, "session created");
        (id, shared)
    }

    pub fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.lock().get(&id).cloned()
    }

    pub fn remove(&self, id: SessionId) -> bool {
        let removed = self.sessions.lock().remove(&id).is_some();
        if removed {
            info!(session_id = %id, "session removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
