//! Relay to the external PDF highlighting service.
//!
//! The service itself is a black box: it receives a PDF and a list of codes
//! and answers with a highlighted PDF or a JSON error. This module resolves
//! the stored file for a document, forwards it, and normalizes the reply.

pub mod client;
pub mod response;

use std::path::Path;

use thiserror::Error;

use crate::document::{CodeSet, DocumentId};
use crate::index::{CodeIndex, IndexError};
use crate::storage::{FileStore, FileStoreError};

pub use client::{HighlightRequest, Highlighter, HttpHighlighter, RelayError};
pub use response::{interpret, HighlightOutcome, HighlightedPdf, RelayFailure, RemoteResponse};

#[derive(Debug, Error)]
pub enum HighlightError {
    #[error("The list of codes to highlight is empty")]
    EmptyCodes,
    #[error("Document {0} does not exist")]
    DocumentNotFound(DocumentId),
    #[error("The PDF file was not found on the server: {0}")]
    FileNotFound(String),
    #[error("Code index lookup failed: {0}")]
    Index(#[from] IndexError),
    #[error("File store error: {0}")]
    Storage(FileStoreError),
}

impl HighlightError {
    pub fn status_code(&self) -> u16 {
        match self {
            HighlightError::EmptyCodes => 400,
            HighlightError::DocumentNotFound(_) | HighlightError::FileNotFound(_) => 404,
            HighlightError::Index(_) | HighlightError::Storage(_) => 500,
        }
    }
}

pub struct HighlightService<I, H> {
    index: I,
    files: FileStore,
    highlighter: H,
}

impl<I, H> HighlightService<I, H>
where
    I: CodeIndex,
    H: Highlighter,
{
    pub fn new(index: I, files: FileStore, highlighter: H) -> Self {
        Self {
            index,
            files,
            highlighter,
        }
    }

    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    /// Send a document's PDF and the requested codes to the highlighting
    /// service.
    ///
    /// Request problems (no codes, unknown document, missing file) are
    /// errors. Anything the service itself reports, including being
    /// unreachable, comes back as [`HighlightOutcome::Failed`].
    pub fn highlight(
        &self,
        id: DocumentId,
        raw_codes: &str,
    ) -> Result<HighlightOutcome, HighlightError> {
        let codes = CodeSet::parse(raw_codes);
        if codes.is_empty() {
            return Err(HighlightError::EmptyCodes);
        }

        let document = self
            .index
            .get(id)?
            .ok_or(HighlightError::DocumentNotFound(id))?;

        let pdf = self.files.read(&document.path).map_err(|e| match e {
            FileStoreError::NotFound(_) | FileStoreError::InvalidPath(_) => {
                HighlightError::FileNotFound(document.path.clone())
            }
            other => HighlightError::Storage(other),
        })?;

        let file_name = Path::new(&document.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&document.path)
            .to_string();

        let request = HighlightRequest {
            file_name: file_name.clone(),
            pdf,
            codes,
        };

        let outcome = match self.highlighter.send(&request) {
            Ok(response) => interpret(response, &file_name),
            Err(e) => HighlightOutcome::Failed(RelayFailure::transport(&e)),
        };

        match &outcome {
            HighlightOutcome::Pdf(pdf) => {
                tracing::info!(id = %id, pages = ?pdf.pages_found, "highlighted PDF received")
            }
            HighlightOutcome::Failed(failure) => {
                tracing::warn!(
                    id = %id,
                    message = %failure.message,
                    details = %failure.details,
                    "highlighting failed"
                )
            }
        }

        Ok(outcome)
    }
}
