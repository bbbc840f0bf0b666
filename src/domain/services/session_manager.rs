#[cfg(test)]
#[path = "session_manager_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::SessionHandle;
use crate::domain::models::Confirm;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::infrastructure::backends::BackendBox;

pub const GREETING: &str = "Hello! Upload one or more PDF documents to start chatting. I can answer questions across all your uploaded documents.";

pub const NEW_SESSION_PROMPT: &str =
    "Start a new session? This will clear your current conversation and documents.";

/// Owns the session id. Creating a session resets the transcript and the
/// document registry, so nothing from a previous session leaks into it.
#[derive(Clone)]
pub struct SessionManager {
    backend: BackendBox,
    handle: SessionHandle,
}

impl SessionManager {
    pub fn new(backend: BackendBox, handle: SessionHandle) -> SessionManager {
        return SessionManager { backend, handle };
    }

    /// Errors returned here are fatal: nothing else works without a session.
    pub async fn create_session(&self) -> Result<()> {
        let session_id = match self.backend.create_session().await {
            Ok(session_id) => session_id,
            Err(err) => {
                tracing::error!(error = ?err, "Failed to create session");
                bail!("Failed to create session. Please restart docchat.\n\nError: {err}");
            }
        };

        let mut state = self.handle.lock().await;
        state.session_id = Some(session_id);
        state.messages = vec![Message::new(Role::Assistant, GREETING)];
        state.documents.clear();

        tracing::info!(
            session_id = state.session_id.as_deref().unwrap_or_default(),
            "Session created"
        );

        return Ok(());
    }

    /// Returns whether the user agreed to the reset. A declined prompt
    /// leaves everything untouched.
    pub async fn start_new_session<C: Confirm + Sync>(&self, confirm: &C) -> Result<bool> {
        if !confirm.confirm(NEW_SESSION_PROMPT) {
            return Ok(false);
        }

        self.handle.lock().await.reset();
        self.create_session().await?;

        return Ok(true);
    }
}
