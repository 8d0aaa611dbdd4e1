use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

pub mod filters;

pub use filters::matches_request;

// --- Application Errors ---
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Repository error: {0}")]
    Repository(String),
}

// --- Infrastructure Interfaces (Traits) ---

/// Storage seam for documents keyed by id.
///
/// Implementations hold a total mapping: every key maps to exactly one
/// document, and that document's `id` equals the key.
pub trait DocumentRepository: Send + Sync {
    /// Inserts or fully replaces the document stored under its id.
    /// Callers pass documents whose `id` is already set.
    fn save(&self, document: &Document) -> Result<(), ApplicationError>;
    /// Retrieves a document by id. Absence is `Ok(None)`.
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError>;
    /// Deletes a document by id. Returns true if it existed.
    fn delete(&self, id: &DocumentId) -> Result<bool, ApplicationError>;
    /// Number of stored documents.
    fn count(&self) -> Result<usize, ApplicationError>;
    /// Every stored document for which `filter` holds, in no particular order.
    fn scan(
        &self,
        filter: &dyn Fn(&Document) -> bool,
    ) -> Result<Vec<Document>, ApplicationError>;
    /// Saves several documents.
    #[instrument(skip(self, documents))]
    fn save_batch(&self, documents: &[Document]) -> Result<(), ApplicationError> {
        debug!(count = documents.len(), "Saving batch via default iteration");
        for doc in documents {
            self.save(doc)?;
        }
        Ok(())
    }
}

// --- Application Services (Use Cases) ---

/// In-process document store: upsert, lookup by id and predicate search.
#[derive(Clone)]
pub struct DocumentStore {
    repo: Arc<dyn DocumentRepository>,
}

impl DocumentStore {
    pub fn new(repo: Arc<dyn DocumentRepository>) -> Self {
        Self { repo }
    }

    /// Upserts `document`. A missing id is replaced by a freshly generated
    /// one; an existing id overwrites whatever was stored under it.
    /// `created` is kept exactly as given.
    #[instrument(skip(self, document), fields(title = %document.title))]
    pub fn save(&self, document: Document) -> Result<Document, ApplicationError> {
        let document = assign_id(document);
        let doc_id = document.id().map(DocumentId::as_str).unwrap_or_default();

        if let Err(e) = self.repo.save(&document) {
            error!(doc_id = %doc_id, "Failed to save document to repository: {}", e);
            return Err(e);
        }
        info!(doc_id = %doc_id, "Document saved");
        Ok(document)
    }

    /// Upserts every document in order, returning them with ids populated.
    #[instrument(skip(self, documents), fields(batch_size = documents.len()))]
    pub fn save_all(&self, documents: Vec<Document>) -> Result<Vec<Document>, ApplicationError> {
        if documents.is_empty() {
            warn!("Received an empty batch");
            return Ok(documents);
        }

        let documents: Vec<Document> = documents.into_iter().map(assign_id).collect();
        self.repo.save_batch(&documents).map_err(|e| {
            error!(count = documents.len(), "Failed to save document batch: {}", e);
            e
        })?;
        info!(count = documents.len(), "Document batch saved");
        Ok(documents)
    }

    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Result<Option<Document>, ApplicationError> {
        let found = self.repo.get(&DocumentId::from(id))?;
        debug!(doc_id = %id, found = found.is_some(), "Looked up document");
        Ok(found)
    }

    /// All stored documents matching `request`; order is unspecified.
    #[instrument(skip(self, request), fields(unconstrained = request.is_unconstrained()))]
    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Document>, ApplicationError> {
        let hits = self
            .repo
            .scan(&|doc: &Document| filters::matches_request(doc, request))?;
        info!(hits = hits.len(), "Search completed");
        Ok(hits)
    }

    /// Removes a document. Returns true if one was stored under `id`.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<bool, ApplicationError> {
        let deleted = self.repo.delete(&DocumentId::from(id))?;
        if deleted {
            info!(doc_id = %id, "Document deleted");
        } else {
            debug!(doc_id = %id, "Document not found for deletion");
        }
        Ok(deleted)
    }

    #[instrument(skip(self))]
    pub fn count(&self) -> Result<usize, ApplicationError> {
        let count = self.repo.count()?;
        debug!(count, "Counted stored documents");
        Ok(count)
    }
}

fn assign_id(document: Document) -> Document {
    match document.id {
        Some(_) => document,
        None => {
            let id = DocumentId::generate();
            debug!(doc_id = %id, "Generated id for new document");
            document.with_id(id)
        }
    }
}
