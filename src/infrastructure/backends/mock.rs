use std::collections::VecDeque;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::models::Backend;
use crate::domain::models::ChatAnswer;
use crate::domain::models::ChatRequest;
use crate::domain::models::UploadFile;
use crate::domain::models::UploadReceipt;

/// In-memory backend that replays queued responses and records every call.
/// Responses can be held back on a `Notify` to observe state while
/// an operation is in flight.
#[derive(Default)]
pub struct MockBackend {
    healthy: bool,
    sessions: Mutex<VecDeque<Result<String, String>>>,
    uploads: Mutex<VecDeque<Result<UploadReceipt, String>>>,
    answers: Mutex<VecDeque<Result<ChatAnswer, String>>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
    pub uploaded_files: Mutex<Vec<(String, UploadFile)>>,
    pub network_calls: AtomicUsize,
    hold: Option<Arc<Notify>>,
}

impl MockBackend {
    pub fn new() -> MockBackend {
        return MockBackend {
            healthy: true,
            ..MockBackend::default()
        };
    }

    pub fn unhealthy(mut self) -> MockBackend {
        self.healthy = false;
        return self;
    }

    pub fn with_session(self, session: Result<&str, &str>) -> MockBackend {
        self.sessions.lock().unwrap().push_back(
            session
                .map(|e| return e.to_string())
                .map_err(|e| return e.to_string()),
        );
        return self;
    }

    pub fn with_upload(self, upload: Result<(&str, u64), &str>) -> MockBackend {
        self.uploads.lock().unwrap().push_back(
            upload
                .map(|(doc_id, chunks)| {
                    return UploadReceipt {
                        doc_id: doc_id.to_string(),
                        chunks,
                    };
                })
                .map_err(|e| return e.to_string()),
        );
        return self;
    }

    pub fn with_answer(self, answer: Result<ChatAnswer, &str>) -> MockBackend {
        self.answers
            .lock()
            .unwrap()
            .push_back(answer.map_err(|e| return e.to_string()));
        return self;
    }

    /// Makes every upload and chat call wait for `notify`.
    pub fn held(mut self, notify: Arc<Notify>) -> MockBackend {
        self.hold = Some(notify);
        return self;
    }

    pub fn calls(&self) -> usize {
        return self.network_calls.load(Ordering::SeqCst);
    }

    async fn wait_for_release(&self) {
        if let Some(notify) = &self.hold {
            notify.notified().await;
        }
    }
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, String>>>) -> Result<T> {
    return match queue.lock().unwrap().pop_front() {
        Some(Ok(res)) => Ok(res),
        Some(Err(detail)) => Err(anyhow!(detail)),
        None => Err(anyhow!("No mock response queued")),
    };
}

#[async_trait]
impl Backend for MockBackend {
    async fn health_check(&self) -> Result<()> {
        if !self.healthy {
            return Err(anyhow!("Connection refused"));
        }

        return Ok(());
    }

    async fn create_session(&self) -> Result<String> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        return pop(&self.sessions);
    }

    async fn upload_document(&self, session_id: &str, file: UploadFile) -> Result<UploadReceipt> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded_files
            .lock()
            .unwrap()
            .push((session_id.to_string(), file));
        self.wait_for_release().await;

        return pop(&self.uploads);
    }

    async fn chat(&self, _session_id: &str, request: ChatRequest) -> Result<ChatAnswer> {
        self.network_calls.fetch_add(1, Ordering::SeqCst);
        self.chat_requests.lock().unwrap().push(request);
        self.wait_for_release().await;

        return pop(&self.answers);
    }
}
