use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::sync::MutexGuard;

use super::BusyGate;
use super::DocumentRegistry;
use crate::domain::models::Message;
use crate::domain::models::Role;

/// Everything scoped to the active backend session. Lives only in memory.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub session_id: Option<String>,
    pub messages: Vec<Message>,
    pub documents: DocumentRegistry,
}

impl SessionState {
    /// Drops the session id along with its transcript and documents.
    pub fn reset(&mut self) {
        self.session_id = None;
        self.messages.clear();
        self.documents.clear();
    }

    pub fn is_active_session(&self, session_id: &str) -> bool {
        return self.session_id.as_deref() == Some(session_id);
    }

    pub fn short_session_id(&self) -> String {
        if let Some(id) = &self.session_id {
            let short = id.chars().take(8).collect::<String>();
            return format!("{short}...");
        }

        return "Loading...".to_string();
    }

    pub fn questions_asked(&self) -> usize {
        return self
            .messages
            .iter()
            .filter(|m| return m.role == Role::User)
            .count();
    }
}

/// Shared handle to the session state and busy gate, passed to each
/// coordinator. The state lock is never held across a backend call.
#[derive(Clone, Default)]
pub struct SessionHandle {
    state: Arc<Mutex<SessionState>>,
    gate: BusyGate,
}

impl SessionHandle {
    pub async fn lock(&self) -> MutexGuard<'_, SessionState> {
        return self.state.lock().await;
    }

    pub async fn snapshot(&self) -> SessionState {
        return self.state.lock().await.clone();
    }

    pub fn gate(&self) -> &BusyGate {
        return &self.gate;
    }

    pub fn is_busy(&self) -> bool {
        return self.gate.is_busy();
    }
}
