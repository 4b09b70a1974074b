use catalog_core::document::{CodeSet, DocumentDraft, DocumentId};
use catalog_core::index::{Catalog, CodeIndex, IndexError};
use catalog_core::selection::CodeSearcher;
use catalog_core::types::{SearchError, ValidationError};
use catalog_core::document::Document;
use chrono::NaiveDate;
use std::cell::Cell;

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

fn draft(name: &str, day: u32, codes: &str) -> DocumentDraft {
    DocumentDraft::new(name, date(day), format!("{name}.pdf"), CodeSet::parse(codes))
}

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert(draft("manual", 1, "A\nB\nC")).unwrap(); // id 1, oldest
    catalog.insert(draft("sheet", 5, "A")).unwrap(); // id 2, newest
    catalog.insert(draft("notes", 3, "D\nE")).unwrap(); // id 3
    catalog
}

/// Index that counts lookups and can be told to fail.
struct ProbeIndex {
    catalog: Catalog,
    lookups: Cell<usize>,
    fail: bool,
}

impl CodeIndex for ProbeIndex {
    fn find_candidates(&self, codes: &CodeSet) -> Result<Vec<Document>, IndexError> {
        self.lookups.set(self.lookups.get() + 1);
        if self.fail {
            return Err(IndexError::Unavailable("database offline".into()));
        }
        self.catalog.find_candidates(codes)
    }

    fn get(&self, id: DocumentId) -> Result<Option<Document>, IndexError> {
        CodeIndex::get(&self.catalog, id)
    }
}

#[test]
fn search_prefers_covering_document_over_newer_partial_one() {
    let searcher = CodeSearcher::new(sample_catalog());

    let result = searcher.search("A, B\r\nC").unwrap();

    let ids: Vec<u64> = result.documents.iter().map(|d| d.id.get()).collect();
    assert_eq!(ids, vec![1]);
    assert!(result.is_complete());
    assert_eq!(result.search.requested_codes, vec!["A", "B", "C"]);
    assert_eq!(result.search.documents_considered, 2);
    assert_eq!(result.search.documents_selected, 1);
}

#[test]
fn search_reports_uncovered_codes_in_request_order() {
    let searcher = CodeSearcher::new(sample_catalog());

    let result = searcher.search("Z\nD\nY\nA").unwrap();

    let ids: Vec<u64> = result.documents.iter().map(|d| d.id.get()).collect();
    // Both candidates add one code; notes (day 3) is older than sheet (day 5).
    assert_eq!(ids, vec![2, 3]);
    assert_eq!(result.search.uncovered_codes, vec!["Z", "Y"]);
    assert!(!result.is_complete());
}

#[test]
fn empty_query_skips_the_index() {
    let index = ProbeIndex {
        catalog: sample_catalog(),
        lookups: Cell::new(0),
        fail: false,
    };
    let searcher = CodeSearcher::new(index);

    let result = searcher.search(" ,\n\r\n , ").unwrap();

    assert!(result.documents.is_empty());
    assert!(result.search.requested_codes.is_empty());
    assert!(result.search.uncovered_codes.is_empty());
    assert_eq!(searcher.index().lookups.get(), 0);
}

#[test]
fn no_candidates_leaves_everything_uncovered() {
    let searcher = CodeSearcher::new(sample_catalog());

    let result = searcher.search("X\nY").unwrap();

    assert!(result.documents.is_empty());
    assert_eq!(result.search.documents_considered, 0);
    assert_eq!(result.search.uncovered_codes, vec!["X", "Y"]);
}

#[test]
fn index_failure_is_a_hard_error() {
    let index = ProbeIndex {
        catalog: sample_catalog(),
        lookups: Cell::new(0),
        fail: true,
    };
    let searcher = CodeSearcher::new(index);

    let err = searcher.search("A").unwrap_err();

    assert!(matches!(err, SearchError::Index(IndexError::Unavailable(_))));
}

#[test]
fn selected_documents_carry_full_code_sets_and_explanations() {
    let searcher = CodeSearcher::new(sample_catalog());

    let result = searcher.search("B\nE").unwrap();

    assert_eq!(result.documents.len(), 2);
    let first = &result.documents[0];
    assert_eq!(first.id, DocumentId::new(3));
    assert_eq!(first.codes, vec!["D", "E"]);
    assert_eq!(first.why.round, 1);
    assert_eq!(first.why.covered, vec!["E"]);

    let second = &result.documents[1];
    assert_eq!(second.id, DocumentId::new(1));
    assert_eq!(second.codes, vec!["A", "B", "C"]);
    assert_eq!(second.why.covered, vec!["B"]);
}

#[test]
fn search_by_code_returns_every_owner_most_recent_first() {
    let searcher = CodeSearcher::new(sample_catalog());

    let docs = searcher.search_by_code("  A ").unwrap();
    let ids: Vec<u64> = docs.iter().map(|d| d.id.get()).collect();
    assert_eq!(ids, vec![2, 1]);

    assert!(searcher.search_by_code("   ").unwrap().is_empty());
    assert!(searcher.search_by_code("nope").unwrap().is_empty());
}

#[test]
fn validate_highlight_checks_document_and_codes() {
    let searcher = CodeSearcher::new(sample_catalog());

    let doc = searcher.validate_highlight(DocumentId::new(1), "A,C").unwrap();
    assert_eq!(doc.name, "manual");

    assert_eq!(
        searcher.validate_highlight(DocumentId::new(1), " , ").unwrap_err(),
        ValidationError::EmptyCodes
    );
    assert_eq!(
        searcher.validate_highlight(DocumentId::new(42), "A").unwrap_err(),
        ValidationError::DocumentNotFound(DocumentId::new(42))
    );
    assert_eq!(
        searcher.validate_highlight(DocumentId::new(1), "A\nD\nE").unwrap_err(),
        ValidationError::CodeNotInDocument("D".into())
    );
}
