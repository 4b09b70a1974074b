use catalog_core::document::{CodeSet, DocumentDraft, DocumentId};
use catalog_core::index::Catalog;
use catalog_core::selection::CodeSearcher;
use catalog_core::types::{CoverageWhy, SearchMetadata, SearchResult, SelectedDocument};
use chrono::NaiveDate;

fn draft(name: &str, ymd: (i32, u32, u32), codes: &[&str]) -> DocumentDraft {
    DocumentDraft::new(
        name,
        NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap(),
        format!("{name}.pdf"),
        CodeSet::from_codes(codes),
    )
}

#[test]
fn golden_search_result_serialization() {
    let result = SearchResult {
        documents: vec![SelectedDocument {
            id: DocumentId::new(7),
            name: "Valve datasheet".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
            path: "a1b2c3d4e5f6_valve.pdf".to_string(),
            codes: vec!["V-100".to_string(), "V-200".to_string()],
            why: CoverageWhy {
                round: 1,
                covered: vec!["V-200".to_string()],
            },
        }],
        search: SearchMetadata {
            requested_codes: vec!["V-200".to_string(), "P-9".to_string()],
            documents_considered: 3,
            documents_selected: 1,
            uncovered_codes: vec!["P-9".to_string()],
        },
    };

    let json_str = serde_json::to_string_pretty(&result).unwrap();

    let doc_start = json_str.find("\"documents\":").expect("Missing documents key");
    let meta_start = json_str.find("\"search\":").expect("Missing search key");
    assert!(doc_start < meta_start, "documents should appear before search metadata");

    const EXPECTED_JSON: &str = r#"{
      "documents": [
        {
          "id": 7,
          "name": "Valve datasheet",
          "date": "2024-05-17",
          "path": "a1b2c3d4e5f6_valve.pdf",
          "codes": ["V-100", "V-200"],
          "why": {
            "round": 1,
            "covered": ["V-200"]
          }
        }
      ],
      "search": {
        "requested_codes": ["V-200", "P-9"],
        "documents_considered": 3,
        "documents_selected": 1,
        "uncovered_codes": ["P-9"]
      }
    }"#;

    let strip = |s: &str| -> String { s.chars().filter(|c| !c.is_whitespace()).collect() };
    assert_eq!(
        strip(json_str.as_str()),
        strip(EXPECTED_JSON),
        "JSON structure mismatch against golden snapshot"
    );

    let deserialized: SearchResult =
        serde_json::from_str(&json_str).expect("Deserialization failed");
    assert_eq!(deserialized, result);
}

#[test]
fn golden_end_to_end_search() {
    let mut catalog = Catalog::new();
    catalog.insert(draft("pumps", (2023, 11, 2), &["P-1", "P-2", "P-3"])).unwrap();
    catalog.insert(draft("valves", (2024, 2, 14), &["V-1", "P-1"])).unwrap();
    catalog.insert(draft("pipes", (2024, 6, 30), &["X-1"])).unwrap();

    // valves and pumps both add two codes in round one; valves is newer.
    let searcher = CodeSearcher::new(catalog);
    let result = searcher.search("P-1\nV-1\nP-3\nQ-0").unwrap();

    let json = serde_json::to_string_pretty(&result).unwrap();

    let expected = r#"{
  "documents": [
    {
      "id": 2,
      "name": "valves",
      "date": "2024-02-14",
      "path": "valves.pdf",
      "codes": [
        "V-1",
        "P-1"
      ],
      "why": {
        "round": 1,
        "covered": [
          "P-1",
          "V-1"
        ]
      }
    },
    {
      "id": 1,
      "name": "pumps",
      "date": "2023-11-02",
      "path": "pumps.pdf",
      "codes": [
        "P-1",
        "P-2",
        "P-3"
      ],
      "why": {
        "round": 2,
        "covered": [
          "P-3"
        ]
      }
    }
  ],
  "search": {
    "requested_codes": [
      "P-1",
      "V-1",
      "P-3",
      "Q-0"
    ],
    "documents_considered": 2,
    "documents_selected": 2,
    "uncovered_codes": [
      "Q-0"
    ]
  }
}"#;

    assert_eq!(json.trim(), expected.trim(), "Golden snapshot mismatch");
}
