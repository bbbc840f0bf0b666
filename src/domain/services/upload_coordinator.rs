#[cfg(test)]
#[path = "upload_coordinator_test.rs"]
mod tests;

use std::fmt;
use std::path;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;

use super::BusyGuard;
use super::SessionHandle;
use crate::domain::models::Document;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::UploadFile;
use crate::infrastructure::backends::BackendBox;

#[derive(Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded(Document),
    /// The session was replaced while the upload was in flight.
    Discarded,
}

fn is_pdf(file_path: &path::Path) -> bool {
    return file_path
        .extension()
        .map(|ext| return ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
}

#[derive(Clone)]
pub struct UploadCoordinator {
    backend: BackendBox,
    handle: SessionHandle,
}

/// An upload that holds the busy gate. The file is read and sent by
/// `complete`, off the caller's task. The gate is released once `complete`
/// returns, or when this is dropped.
pub struct PendingUpload {
    backend: BackendBox,
    handle: SessionHandle,
    session_id: String,
    file_path: path::PathBuf,
    filename: String,
    _guard: BusyGuard,
}

impl fmt::Debug for PendingUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f
            .debug_struct("PendingUpload")
            .field("session_id", &self.session_id)
            .field("file_path", &self.file_path)
            .finish();
    }
}

impl UploadCoordinator {
    pub fn new(backend: BackendBox, handle: SessionHandle) -> UploadCoordinator {
        return UploadCoordinator { backend, handle };
    }

    /// Checks the session and extension, then takes the busy gate. Returns
    /// `None` when the gate is already held. Does no I/O.
    pub async fn upload_document(&self, file_path: &path::Path) -> Result<Option<PendingUpload>> {
        let session_id = match self.handle.lock().await.session_id.clone() {
            Some(session_id) => session_id,
            None => bail!("Session not ready. Please wait..."),
        };

        if !is_pdf(file_path) {
            bail!("Only PDF files supported");
        }

        let filename = match file_path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => bail!("Upload failed: {} is not a file", file_path.display()),
        };

        let guard = match self.handle.gate().try_acquire() {
            Some(guard) => guard,
            None => return Ok(None),
        };

        return Ok(Some(PendingUpload {
            backend: self.backend.clone(),
            handle: self.handle.clone(),
            session_id,
            file_path: file_path.to_path_buf(),
            filename,
            _guard: guard,
        }));
    }
}

impl PendingUpload {
    pub fn filename(&self) -> &str {
        return &self.filename;
    }

    /// Errors leave the registry and transcript untouched and are meant to
    /// be shown to the user as an alert.
    pub async fn complete(self) -> Result<UploadOutcome> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(error = ?err, file_path = ?self.file_path, "Failed to read upload");
                bail!("Upload failed: {}: {err}", self.file_path.display());
            }
        };

        tracing::debug!(filename = %self.filename, size = bytes.len(), "Upload starting");

        let file = UploadFile {
            filename: self.filename.to_string(),
            bytes,
        };
        let receipt = match self.backend.upload_document(&self.session_id, file).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::error!(error = ?err, filename = %self.filename, "Upload failed");
                bail!("Upload failed: {err}");
            }
        };

        let mut state = self.handle.lock().await;
        if !state.is_active_session(&self.session_id) {
            tracing::warn!(
                session_id = %self.session_id,
                filename = %self.filename,
                "Session changed during upload, dropping result"
            );
            return Ok(UploadOutcome::Discarded);
        }

        let document = Document::new(&receipt.doc_id, &self.filename, receipt.chunks);
        state.documents.add(document.clone());
        state.messages.push(Message::new(
            Role::Assistant,
            &format!(
                "Document \"{}\" uploaded! ({} chunks processed). You can now ask questions about your documents.",
                self.filename, receipt.chunks
            ),
        ));

        tracing::info!(doc_id = %document.doc_id, chunks = receipt.chunks, "Upload complete");

        return Ok(UploadOutcome::Uploaded(document));
    }
}
