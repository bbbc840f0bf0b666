#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::sync::mpsc;

use super::Controller;
use super::Scroll;
use super::SessionState;
use crate::domain::models::Action;
use crate::domain::models::ConfirmAnswer;
use crate::domain::models::Notice;
use crate::domain::models::SlashCommand;

#[derive(Debug, PartialEq, Eq)]
pub enum Submit {
    Quit,
    ClearInput,
    KeepInput,
}

fn expand_home(file_path: &str) -> path::PathBuf {
    if let Some(rest) = file_path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    return path::PathBuf::from(file_path);
}

/// Terminal-only view state. Everything scoped to the backend session lives
/// in `SessionState` instead.
#[derive(Default)]
pub struct AppState {
    pub confirming_new_session: bool,
    pub notice: Option<Notice>,
    pub scroll: Scroll,
    pub show_documents: bool,
    pub show_help: bool,
    message_count: usize,
}

impl AppState {
    /// Fatal notices stick until a session exists again.
    pub fn set_notice(&mut self, notice: Notice) {
        if let Some(current) = &self.notice {
            if current.is_fatal() && !notice.is_fatal() {
                return;
            }
        }

        self.notice = Some(notice);
    }

    fn clear_alert(&mut self) {
        if let Some(Notice::Alert(_)) = self.notice {
            self.notice = None;
        }
    }

    pub fn toggle_documents(&mut self) {
        self.show_documents = !self.show_documents;
    }

    /// Keeps the view pinned to the newest message whenever the transcript
    /// grows or is replaced.
    pub fn sync(&mut self, state: &SessionState, line_count: usize, viewport_height: u16) {
        if state.session_id.is_some() {
            if let Some(Notice::Fatal(_)) = self.notice {
                self.notice = None;
            }
        }

        self.scroll.set_state(
            u16::try_from(line_count).unwrap_or(u16::MAX),
            viewport_height,
        );

        if state.messages.len() != self.message_count {
            self.message_count = state.messages.len();
            self.scroll.last();
        }
    }

    pub fn answer_new_session(
        &mut self,
        answer: ConfirmAnswer,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<()> {
        self.confirming_new_session = false;
        tx.send(Action::NewSession(answer))?;

        return Ok(());
    }

    pub async fn submit(
        &mut self,
        input: &str,
        controller: &Controller,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<Submit> {
        self.clear_alert();

        if let Some(command) = SlashCommand::parse(input) {
            if command.is_quit() {
                return Ok(Submit::Quit);
            }

            if command.is_help() {
                self.show_help = !self.show_help;
                return Ok(Submit::ClearInput);
            }

            if command.is_documents() {
                self.toggle_documents();
                return Ok(Submit::ClearInput);
            }

            if command.is_new_session() {
                self.confirming_new_session = true;
                return Ok(Submit::ClearInput);
            }

            if command.is_upload() {
                let file_path = match command.path_arg() {
                    Some(file_path) => expand_home(&file_path),
                    None => {
                        self.set_notice(Notice::Alert(
                            "You must pass the path to a PDF with `/upload`. Run `/help` for more details.".to_string(),
                        ));
                        return Ok(Submit::KeepInput);
                    }
                };

                match controller.uploads.upload_document(&file_path).await {
                    Ok(Some(pending)) => {
                        tx.send(Action::UploadDocument(pending))?;
                    }
                    Ok(None) => {
                        return Ok(Submit::KeepInput);
                    }
                    Err(err) => {
                        self.set_notice(Notice::Alert(err.to_string()));
                    }
                }

                return Ok(Submit::ClearInput);
            }
        }

        if let Some(pending) = controller.chat.send_message(input).await {
            tx.send(Action::SendMessage(pending))?;
            return Ok(Submit::ClearInput);
        }

        return Ok(Submit::KeepInput);
    }
}
