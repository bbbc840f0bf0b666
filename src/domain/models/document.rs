use serde_derive::Deserialize;
use serde_derive::Serialize;

/// A PDF that the backend accepted for the active session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub filename: String,
    pub chunk_count: u64,
}

impl Document {
    pub fn new(doc_id: &str, filename: &str, chunk_count: u64) -> Document {
        return Document {
            doc_id: doc_id.to_string(),
            filename: filename.to_string(),
            chunk_count,
        };
    }
}
