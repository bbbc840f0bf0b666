#[cfg(test)]
#[path = "chat_engine_test.rs"]
mod tests;

use std::fmt;

use super::BusyGuard;
use super::SessionHandle;
use crate::domain::models::ChatRequest;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::infrastructure::backends::BackendBox;

#[derive(Debug, PartialEq, Eq)]
pub enum ChatOutcome {
    Answered,
    /// The failure was recorded in the transcript.
    Failed,
    /// The session was replaced while the question was in flight.
    Discarded,
}

#[derive(Clone)]
pub struct ChatEngine {
    backend: BackendBox,
    handle: SessionHandle,
}

/// A question already appended to the transcript, waiting on the backend.
/// Holds the busy gate until `complete` returns or this is dropped.
pub struct PendingExchange {
    backend: BackendBox,
    handle: SessionHandle,
    request: ChatRequest,
    _guard: BusyGuard,
}

impl fmt::Debug for PendingExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("PendingExchange")
            .field("request", &self.request)
            .finish();
    }
}

impl ChatEngine {
    pub fn new(backend: BackendBox, handle: SessionHandle) -> ChatEngine {
        return ChatEngine { backend, handle };
    }

    /// Appends the user's message and snapshots the history to send. Returns
    /// `None` without touching any state for blank input, a missing session
    /// or a held busy gate. The backend call happens in `complete`.
    pub async fn send_message(&self, text: &str) -> Option<PendingExchange> {
        if text.trim().is_empty() {
            return None;
        }

        let mut state = self.handle.lock().await;
        let session_id = state.session_id.clone()?;
        let guard = self.handle.gate().try_acquire()?;

        state.messages.push(Message::new(Role::User, text));

        return Some(PendingExchange {
            backend: self.backend.clone(),
            handle: self.handle.clone(),
            request: ChatRequest {
                session_id,
                question: text.to_string(),
                chat_history: state.messages.clone(),
            },
            _guard: guard,
        });
    }
}

impl PendingExchange {
    pub fn request(&self) -> &ChatRequest {
        return &self.request;
    }

    pub async fn complete(self) -> ChatOutcome {
        let session_id = self.request.session_id.to_string();
        let res = self.backend.chat(&session_id, self.request).await;

        let mut state = self.handle.lock().await;
        if !state.is_active_session(&session_id) {
            tracing::warn!(
                session_id = %session_id,
                "Session changed during chat exchange, dropping answer"
            );
            return ChatOutcome::Discarded;
        }

        match res {
            Ok(answer) => {
                tracing::debug!(sources = answer.sources.len(), "Chat answer received");
                state
                    .messages
                    .push(Message::new_with_sources(&answer.answer, answer.sources));
                return ChatOutcome::Answered;
            }
            Err(err) => {
                tracing::error!(error = ?err, "Chat exchange failed");
                state.messages.push(Message::new_error(&err.to_string()));
                return ChatOutcome::Failed;
            }
        }
    }
}
