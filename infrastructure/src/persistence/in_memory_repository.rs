// ./infrastructure/src/persistence/in_memory_repository.rs
use application::{ApplicationError, DocumentRepository};
use dashmap::DashMap;
use domain::{Document, DocumentId};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Document id -> document table held in process memory.
///
/// Clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    store: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&self, document: &Document) -> Result<(), ApplicationError> {
        let Some(id) = document.id() else {
            error!(title = %document.title, "Refusing to store a document without an id");
            return Err(ApplicationError::Repository(
                "document id must be assigned before saving".to_string(),
            ));
        };
        debug!(doc_id = %id, "Saving document to in-memory store");
        self.store.insert(id.clone(), Arc::new(document.clone()));
        Ok(())
    }

    #[instrument(skip(self))]
    fn get(&self, id: &DocumentId) -> Result<Option<Document>, ApplicationError> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        // Get returns a Ref, so we clone the document out of the Arc
        let doc = self.store.get(id).map(|doc_ref| (**doc_ref).clone());
        Ok(doc)
    }

    #[instrument(skip(self))]
    fn delete(&self, id: &DocumentId) -> Result<bool, ApplicationError> {
        debug!(doc_id = %id, "Deleting document from in-memory store");
        Ok(self.store.remove(id).is_some())
    }

    fn count(&self) -> Result<usize, ApplicationError> {
        Ok(self.store.len())
    }

    #[instrument(skip(self, filter))]
    fn scan(
        &self,
        filter: &dyn Fn(&Document) -> bool,
    ) -> Result<Vec<Document>, ApplicationError> {
        debug!(total = self.store.len(), "Scanning in-memory store");
        let matches = self
            .store
            .iter()
            .filter(|entry| filter(entry.value().as_ref()))
            .map(|entry| (**entry.value()).clone())
            .collect();
        Ok(matches)
    }

    /// Batch save for the in-memory store; validates every id before inserting any.
    #[instrument(skip(self, documents))]
    fn save_batch(&self, documents: &[Document]) -> Result<(), ApplicationError> {
        debug!(count = documents.len(), "Saving batch directly to in-memory store");
        let keyed = documents
            .iter()
            .map(|doc| doc.id().map(|id| (id, doc)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                ApplicationError::Repository("every document in a batch needs an id".to_string())
            })?;
        for (id, doc) in keyed {
            self.store.insert(id.clone(), Arc::new(doc.clone()));
        }
        Ok(())
    }
}
