pub mod coverage;

use crate::document::{CodeSet, Document, DocumentId};
use crate::index::CodeIndex;
use crate::types::search::{
	CodeQuery, SearchError, SearchMetadata, SearchResult, SelectedDocument, ValidationError,
};
pub use coverage::{resolve, Coverable, Coverage, CoverPick};

pub struct CodeSearcher<I> {
	index: I,
}

impl<I> CodeSearcher<I>
where
	I: CodeIndex,
{
	pub fn new(index: I) -> Self {
		Self { index }
	}

	pub fn index(&self) -> &I {
		&self.index
	}

	/// Resolve free-text codes to the smallest greedy cover of documents.
	pub fn search(&self, raw: &str) -> Result<SearchResult, SearchError> {
		self.search_query(CodeQuery::new(raw))
	}

	pub fn search_query(&self, query: CodeQuery) -> Result<SearchResult, SearchError> {
		// 0. Nothing to look up
		if query.is_empty() {
			tracing::debug!("empty code query");
			return Ok(SearchResult::empty(&query));
		}

		// 1. Candidate Phase
		let candidates = self.index.find_candidates(&query.codes)?;
		if candidates.is_empty() {
			tracing::debug!(codes = query.codes.len(), "no candidate documents");
			return Ok(SearchResult::empty(&query));
		}

		// 2. Coverage Phase
		// The index hands candidates over most recent first; that order is the tie-break.
		let coverage = resolve(&query.codes, &candidates);

		let documents: Vec<SelectedDocument> = coverage
			.picks
			.iter()
			.map(|pick| {
				SelectedDocument::from_pick(pick.candidate, pick.round, pick.covered.clone())
			})
			.collect();

		// 3. Reporting Phase
		let uncovered_codes = uncovered(&query.codes, coverage.selected());
		debug_assert_eq!(uncovered_codes, coverage.uncovered);

		tracing::debug!(
			codes = query.codes.len(),
			candidates = candidates.len(),
			selected = documents.len(),
			uncovered = uncovered_codes.len(),
			"code search resolved"
		);

		let metadata = SearchMetadata {
			requested_codes: query.codes.to_vec(),
			documents_considered: candidates.len(),
			documents_selected: documents.len(),
			uncovered_codes,
		};

		Ok(SearchResult {
			documents,
			search: metadata,
		})
	}

	/// Every document owning `code`, most recent first, without coverage reduction.
	pub fn search_by_code(&self, code: &str) -> Result<Vec<Document>, SearchError> {
		let code = code.trim();
		if code.is_empty() {
			return Ok(Vec::new());
		}
		Ok(self.index.documents_with_code(code)?)
	}

	/// Check that a highlight request names an existing document and only
	/// codes that document owns.
	pub fn validate_highlight(
		&self,
		id: DocumentId,
		raw_codes: &str,
	) -> Result<Document, ValidationError> {
		let codes = CodeSet::parse(raw_codes);
		if codes.is_empty() {
			return Err(ValidationError::EmptyCodes);
		}

		let document = self
			.index
			.get(id)?
			.ok_or(ValidationError::DocumentNotFound(id))?;

		if let Some(code) = codes.iter().find(|code| !document.owns(code)) {
			return Err(ValidationError::CodeNotInDocument(code.to_string()));
		}

		Ok(document)
	}
}

/// Requested codes not owned by any of `selected`, in request order.
pub fn uncovered<'a>(
	requested: &CodeSet,
	selected: impl IntoIterator<Item = &'a Document>,
) -> Vec<String> {
	let mut union = CodeSet::new();
	for doc in selected {
		for code in doc.codes.iter() {
			union.insert(code);
		}
	}
	requested.difference(&union)
}
