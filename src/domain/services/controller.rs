use super::ChatEngine;
use super::SessionHandle;
use super::SessionManager;
use super::UploadCoordinator;
use crate::domain::models::Notice;
use crate::infrastructure::backends::BackendBox;

/// Wires the session manager, upload coordinator and chat engine to one
/// shared session state and busy gate.
#[derive(Clone)]
pub struct Controller {
    backend: BackendBox,
    handle: SessionHandle,
    pub sessions: SessionManager,
    pub uploads: UploadCoordinator,
    pub chat: ChatEngine,
}

impl Controller {
    pub fn new(backend: BackendBox) -> Controller {
        let handle = SessionHandle::default();

        return Controller {
            sessions: SessionManager::new(backend.clone(), handle.clone()),
            uploads: UploadCoordinator::new(backend.clone(), handle.clone()),
            chat: ChatEngine::new(backend.clone(), handle.clone()),
            backend,
            handle,
        };
    }

    pub fn handle(&self) -> &SessionHandle {
        return &self.handle;
    }

    /// An unreachable backend is only a warning at this point. Session
    /// creation reports the real failure.
    pub async fn health_check(&self) -> Option<Notice> {
        if let Err(err) = self.backend.health_check().await {
            tracing::warn!(error = ?err, "Backend health check failed");
            return Some(Notice::Alert(format!(
                "Hey, it looks like the backend isn't reachable. Double check it's running before we start talking.\n\nError: {err}"
            )));
        }

        return None;
    }
}
