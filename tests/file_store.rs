use catalog_core::document::ContentDigest;
use catalog_core::storage::{FileStore, FileStoreError};
use tempfile::tempdir;

const PDF: &[u8] = b"%PDF-1.4\n1 0 obj\n<<>>\nendobj\n%%EOF\n";

#[test]
fn save_names_file_by_digest_and_sanitized_name() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path().join("uploads"), 1024);

    let stored = store.save("../../reports/Informe final (v2).pdf", PDF).unwrap();

    let digest = ContentDigest::from_content(PDF);
    assert_eq!(stored.digest, digest);
    assert_eq!(stored.size, PDF.len());
    assert_eq!(stored.path, format!("{}_Informe_final__v2_.pdf", &digest.hex()[..12]));
    assert_eq!(store.read(&stored.path).unwrap(), PDF);
}

#[test]
fn blank_or_hidden_names_get_safe_fallbacks() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path(), 1024);

    let blank = store.save("", PDF).unwrap();
    assert!(blank.path.ends_with("_document.pdf"));

    let hidden = store.save(".hidden.pdf", PDF).unwrap();
    assert!(hidden.path.ends_with("_hidden.pdf"));
}

#[test]
fn oversized_upload_is_rejected() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path(), 8);

    match store.save("big.pdf", PDF) {
        Err(FileStoreError::TooLarge { size, limit }) => {
            assert_eq!(size, PDF.len());
            assert_eq!(limit, 8);
        }
        other => panic!("expected TooLarge, got {other:?}"),
    }
}

#[test]
fn non_pdf_upload_is_rejected() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path(), 1024);

    assert!(matches!(
        store.save("notes.pdf", b"just text"),
        Err(FileStoreError::NotPdf)
    ));
}

#[test]
fn resolve_rejects_traversal_and_missing_files() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path(), 1024);

    for bad in ["", "../secret.pdf", "/etc/passwd", "a/../../b.pdf"] {
        assert!(
            matches!(store.resolve(bad), Err(FileStoreError::InvalidPath(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(matches!(store.resolve("absent.pdf"), Err(FileStoreError::NotFound(_))));
}

#[test]
fn remove_deletes_stored_file() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path(), 1024);
    let stored = store.save("x.pdf", PDF).unwrap();

    store.remove(&stored.path).unwrap();

    assert!(matches!(store.read(&stored.path), Err(FileStoreError::NotFound(_))));
}

#[test]
fn identical_uploads_get_separate_files() {
    let dir = tempdir().unwrap();
    let store = FileStore::new(dir.path(), 1024);

    let first = store.save("manual.pdf", PDF).unwrap();
    let second = store.save("manual.pdf", PDF).unwrap();
    let third = store.save("manual.pdf", PDF).unwrap();

    let digest = ContentDigest::from_content(PDF);
    let prefix = &digest.hex()[..12];
    assert_eq!(first.path, format!("{prefix}_manual.pdf"));
    assert_eq!(second.path, format!("{prefix}-2_manual.pdf"));
    assert_eq!(third.path, format!("{prefix}-3_manual.pdf"));
    assert_eq!(first.digest, second.digest);

    store.remove(&first.path).unwrap();

    assert!(matches!(store.read(&first.path), Err(FileStoreError::NotFound(_))));
    assert_eq!(store.read(&second.path).unwrap(), PDF);
    assert_eq!(store.read(&third.path).unwrap(), PDF);
}
