#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::Controller;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Notice;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /upload (/u) [PATH] - Uploads a PDF to the current session. Questions are answered across every uploaded document.
- /docs (/d) - Shows or hides the list of uploaded documents.
- /new (/n) - Starts a new session. This clears the conversation and documents after confirming.
- /quit /exit (/q) - Exit docchat.
- /help (/h) - Shows or hides this help menu.

HOTKEYS:
- Enter - Send your question.
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+O - Toggle the documents panel.
- CTRL+C - Exit docchat.
        "#;

    return text.trim().to_string();
}

async fn run_action(controller: Controller, action: Action) -> Option<Notice> {
    match action {
        Action::CreateSession() => {
            if let Err(err) = controller.sessions.create_session().await {
                return Some(Notice::Fatal(err.to_string()));
            }
        }
        Action::NewSession(answer) => {
            if let Err(err) = controller.sessions.start_new_session(&answer).await {
                return Some(Notice::Fatal(err.to_string()));
            }
        }
        Action::SendMessage(pending) => {
            tracing::debug!(
                session_id = %pending.request().session_id,
                history = pending.request().chat_history.len(),
                "Sending question"
            );
            let outcome = pending.complete().await;
            tracing::debug!(outcome = ?outcome, "Chat exchange settled");
        }
        Action::UploadDocument(pending) => {
            tracing::debug!(filename = %pending.filename(), "Uploading document");
            match pending.complete().await {
                Ok(outcome) => {
                    tracing::debug!(outcome = ?outcome, "Upload settled");
                }
                Err(err) => {
                    return Some(Notice::Alert(err.to_string()));
                }
            }
        }
    }

    return None;
}

pub struct ActionsService {}

impl ActionsService {
    /// Runs every action on its own task so the UI never waits on the
    /// backend. The busy gate taken by each pending operation is what keeps
    /// uploads and chat exchanges sequential.
    pub async fn start(
        controller: Controller,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            let worker_controller = controller.clone();

            tokio::spawn(async move {
                if let Some(notice) = run_action(worker_controller, action).await {
                    worker_tx.send(Event::UserNotice(notice))?;
                }
                worker_tx.send(Event::OperationSettled())?;

                return Ok::<(), anyhow::Error>(());
            });
        }

        return Ok(());
    }
}
