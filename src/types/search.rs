use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::document::{CodeSet, Document, DocumentId};
use crate::index::IndexError;

/// A normalized multi-code query.
/// Normalization rules:
/// - Split on `\n`, `\r` and `,`
/// - Trim each token, drop empty ones
/// - Deduplicate, first occurrence wins
#[derive(Debug, Clone)]
pub struct CodeQuery {
    pub raw: String,
    pub codes: CodeSet,
}

impl CodeQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let codes = CodeSet::parse(&raw);

        Self { raw, codes }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// A selected document returned in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDocument {
    pub id: DocumentId,
    pub name: String,
    pub date: NaiveDate,
    pub path: String,
    pub codes: Vec<String>,

    pub why: CoverageWhy,
}

impl SelectedDocument {
    pub(crate) fn from_pick(document: &Document, round: usize, covered: Vec<String>) -> Self {
        SelectedDocument {
            id: document.id,
            name: document.name.clone(),
            date: document.date,
            path: document.path.clone(),
            codes: document.codes.to_vec(),
            why: CoverageWhy { round, covered },
        }
    }
}

/// Explanation for why a document was selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageWhy {
    /// 1-based greedy iteration that picked the document.
    pub round: usize,
    /// Requested codes this document newly covered, in query order.
    pub covered: Vec<String>,
}

/// Metadata describing the outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub requested_codes: Vec<String>,

    pub documents_considered: usize,
    pub documents_selected: usize,

    pub uncovered_codes: Vec<String>,
}

/// The final result of a multi-code search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub documents: Vec<SelectedDocument>,
    pub search: SearchMetadata,
}

impl SearchResult {
    /// Result for a query that matched nothing (or had no codes at all).
    pub fn empty(query: &CodeQuery) -> Self {
        SearchResult {
            documents: Vec::new(),
            search: SearchMetadata {
                requested_codes: query.codes.to_vec(),
                documents_considered: 0,
                documents_selected: 0,
                uncovered_codes: query.codes.to_vec(),
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.search.uncovered_codes.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Code index lookup failed: {0}")]
    Index(#[from] IndexError),
}

/// Why a highlight request was rejected before reaching the relay.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least one code is required")]
    EmptyCodes,

    #[error("Document {0} does not exist")]
    DocumentNotFound(DocumentId),

    #[error("Code {0} does not belong to the document")]
    CodeNotInDocument(String),

    #[error("Code index lookup failed: {0}")]
    Index(#[from] IndexError),
}
