pub mod codes;
pub mod document;

pub use crate::types::identifiers::{ContentDigest, DocumentId};
pub use codes::CodeSet;
pub use document::{Document, DocumentDraft, DocumentError};
