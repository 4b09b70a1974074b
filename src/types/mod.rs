pub mod identifiers;
pub mod search;

pub use identifiers::{ContentDigest, DocumentId};
pub use search::{
    CodeQuery, CoverageWhy, SearchError, SearchMetadata, SearchResult, SelectedDocument,
    ValidationError,
};
