use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::codes::CodeSet;
use crate::types::identifiers::DocumentId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document name must not be empty")]
    EmptyName,
    #[error("Document path must not be empty")]
    EmptyPath,
}

/// A catalogued PDF and the codes it is tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub name: String,
    pub date: NaiveDate,
    /// Reference into the file store.
    pub path: String,
    pub codes: CodeSet,
}

/// Caller-supplied fields for a new or edited document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    pub name: String,
    pub date: NaiveDate,
    pub path: String,
    pub codes: CodeSet,
}

impl DocumentDraft {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        path: impl Into<String>,
        codes: CodeSet,
    ) -> Self {
        DocumentDraft {
            name: name.into(),
            date,
            path: path.into(),
            codes,
        }
    }

    /// Attach an identifier, checking the fields every stored document needs.
    pub(crate) fn into_document(self, id: DocumentId) -> Result<Document, DocumentError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DocumentError::EmptyName);
        }
        let path = self.path.trim();
        if path.is_empty() {
            return Err(DocumentError::EmptyPath);
        }

        Ok(Document {
            id,
            name: name.to_string(),
            date: self.date,
            path: path.to_string(),
            codes: self.codes,
        })
    }
}

impl Document {
    pub fn owns(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}
