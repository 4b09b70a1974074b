use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::{CodeIndex, IndexError};
use crate::document::{CodeSet, Document, DocumentDraft, DocumentError, DocumentId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Document {0} does not exist")]
    NotFound(DocumentId),
    #[error("Invalid document: {0}")]
    Invalid(#[from] DocumentError),
    #[error("Document ids are exhausted")]
    IdsExhausted,
}

/// In-memory document catalogue.
///
/// Owns documents together with their codes. Codes only change by wholesale
/// replacement and disappear with their document.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    documents: BTreeMap<DocumentId, Document>,
    next_id: u64,
}

/// Recency order: newest date first, later-assigned id first among equal dates.
pub fn by_recency(a: &Document, b: &Document) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id))
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            documents: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Rebuild from persisted parts. `next_id` is raised past every existing id.
    pub(crate) fn from_parts(
        documents: Vec<Document>,
        next_id: u64,
    ) -> Result<Self, CatalogError> {
        let max_id = documents.iter().map(|doc| doc.id.get()).max().unwrap_or(0);
        let floor = max_id.checked_add(1).ok_or(CatalogError::IdsExhausted)?;
        let documents = documents.into_iter().map(|doc| (doc.id, doc)).collect();

        Ok(Catalog {
            documents,
            next_id: next_id.max(floor),
        })
    }

    /// Create a document and its codes in one step.
    pub fn insert(&mut self, draft: DocumentDraft) -> Result<Document, CatalogError> {
        let id = DocumentId::new(self.next_id.max(1));
        let following = id.get().checked_add(1).ok_or(CatalogError::IdsExhausted)?;
        let document = draft.into_document(id)?;

        self.next_id = following;
        self.documents.insert(id, document.clone());

        tracing::info!(id = %id, codes = document.codes.len(), "document created");
        Ok(document)
    }

    /// Replace a document's metadata and its entire code set.
    pub fn update(
        &mut self,
        id: DocumentId,
        draft: DocumentDraft,
    ) -> Result<Document, CatalogError> {
        if !self.documents.contains_key(&id) {
            return Err(CatalogError::NotFound(id));
        }
        let document = draft.into_document(id)?;
        self.documents.insert(id, document.clone());

        tracing::info!(id = %id, codes = document.codes.len(), "document replaced");
        Ok(document)
    }

    /// Delete a document together with its codes.
    pub fn remove(&mut self, id: DocumentId) -> Result<Document, CatalogError> {
        let removed = self.documents.remove(&id).ok_or(CatalogError::NotFound(id))?;

        tracing::info!(id = %id, "document removed");
        Ok(removed)
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.next_id.max(1)
    }

    /// Documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// All documents, most recent first.
    pub fn list(&self) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self.documents.values().collect();
        docs.sort_by(|a, b| by_recency(a, b));
        docs
    }

    /// Documents whose name or path contains `term`, ignoring case.
    /// A blank term returns the full listing.
    pub fn filter(&self, term: &str) -> Vec<&Document> {
        let term = term.trim().to_lowercase();
        self.list()
            .into_iter()
            .filter(|doc| {
                term.is_empty()
                    || doc.name.to_lowercase().contains(&term)
                    || doc.path.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Distinct codes starting with `term` (case-insensitive), sorted, at most `limit`.
    pub fn suggest(&self, term: &str, limit: usize) -> Vec<String> {
        let term = term.trim().to_lowercase();
        if term.is_empty() || limit == 0 {
            return Vec::new();
        }

        let matches: BTreeSet<&str> = self
            .documents
            .values()
            .flat_map(|doc| doc.codes.iter())
            .filter(|code| code.to_lowercase().starts_with(&term))
            .collect();

        matches.into_iter().take(limit).map(str::to_string).collect()
    }

    /// Borrowing form of [`CodeIndex::find_candidates`].
    pub fn candidates(&self, codes: &CodeSet) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self
            .documents
            .values()
            .filter(|doc| doc.codes.intersects(codes))
            .collect();
        docs.sort_by(|a, b| by_recency(a, b));
        docs
    }
}

impl CodeIndex for Catalog {
    fn find_candidates(&self, codes: &CodeSet) -> Result<Vec<Document>, IndexError> {
        Ok(self.candidates(codes).into_iter().cloned().collect())
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, IndexError> {
        Ok(self.documents.get(&id).cloned())
    }
}
