pub mod catalog;
pub mod shared;
pub mod snapshot;

use thiserror::Error;

use crate::document::{CodeSet, Document, DocumentId};

pub use catalog::{Catalog, CatalogError};
pub use shared::SharedCatalog;
pub use snapshot::{CatalogManifest, CatalogStore, ManifestDocumentEntry, SnapshotError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("Code index unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the document store as seen by search.
pub trait CodeIndex {
    /// Documents sharing at least one code with `codes`, each with its full
    /// code set, most recent first, without duplicates.
    fn find_candidates(&self, codes: &CodeSet) -> Result<Vec<Document>, IndexError>;

    fn get(&self, id: DocumentId) -> Result<Option<Document>, IndexError>;

    /// Every document owning `code`, most recent first.
    fn documents_with_code(&self, code: &str) -> Result<Vec<Document>, IndexError> {
        let mut codes = CodeSet::new();
        codes.insert(code);
        self.find_candidates(&codes)
    }
}

impl<I: CodeIndex + ?Sized> CodeIndex for &I {
    fn find_candidates(&self, codes: &CodeSet) -> Result<Vec<Document>, IndexError> {
        (**self).find_candidates(codes)
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, IndexError> {
        (**self).get(id)
    }
}
