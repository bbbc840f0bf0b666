use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;
use super::Source;

/// A PDF read from disk, ready to be sent as multipart content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub doc_id: String,
    pub chunks: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub question: String,
    pub chat_history: Vec<Message>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// The document question answering service. It owns sessions, parses and
/// indexes uploads, and answers questions against them.
#[async_trait]
pub trait Backend {
    /// Used at startup to warn early when the service can't be reached.
    async fn health_check(&self) -> Result<()>;

    /// Mints a new session id.
    async fn create_session(&self) -> Result<String>;

    /// Attaches a document to the session, returning the id the backend
    /// assigned to it and how many chunks it was split into.
    async fn upload_document(&self, session_id: &str, file: UploadFile) -> Result<UploadReceipt>;

    /// Asks a question. Errors carry the backend's `detail` message when one
    /// was returned.
    async fn chat(&self, session_id: &str, request: ChatRequest) -> Result<ChatAnswer>;
}
