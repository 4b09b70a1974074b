use std::sync::Arc;

use parking_lot::RwLock;

use super::{Catalog, CodeIndex, IndexError};
use crate::document::{CodeSet, Document, DocumentId};

/// Catalogue shared between concurrent searches and writers.
///
/// Reads clone what they need under the lock, so every search resolves
/// against its own snapshot.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        SharedCatalog {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Catalog) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl CodeIndex for SharedCatalog {
    fn find_candidates(&self, codes: &CodeSet) -> Result<Vec<Document>, IndexError> {
        self.read(|catalog| catalog.find_candidates(codes))
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, IndexError> {
        self.read(|catalog| CodeIndex::get(catalog, id))
    }
}
