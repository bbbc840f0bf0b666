#[cfg(test)]
#[path = "document_registry_test.rs"]
mod tests;

use crate::domain::models::Document;

/// Documents attached to the active session, in upload order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
}

impl DocumentRegistry {
    pub fn add(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn list(&self) -> &[Document] {
        return &self.documents;
    }

    pub fn clear(&mut self) {
        self.documents.clear();
    }

    pub fn len(&self) -> usize {
        return self.documents.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.documents.is_empty();
    }
}
