// On-disk catalogue snapshots.
// A snapshot directory is always complete: it is assembled in a temporary
// sibling directory and swapped in with a rename.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::{Catalog, CatalogError};
use crate::document::{ContentDigest, Document, DocumentId};

const MANIFEST_FILE: &str = "manifest.json";
const DOCUMENTS_DIR: &str = "documents";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Duplicate document ID: {0}")]
    DuplicateDocumentId(DocumentId),
    #[error("Document ID mismatch: manifest says {expected}, file contains {found}")]
    IdMismatch { expected: DocumentId, found: DocumentId },
    #[error("Invalid file entry for document {id}: {file}")]
    InvalidEntryPath { id: DocumentId, file: String },
    #[error("Catalogue rejected snapshot: {0}")]
    Catalog(#[from] CatalogError),
    #[error(
        "Document version mismatch for {id}: manifest says {expected}, content hashes to {found}"
    )]
    VersionMismatch {
        id: DocumentId,
        expected: String,
        found: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocumentEntry {
    pub id: DocumentId,
    pub version: ContentDigest,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub catalog_version: String,
    pub created_at: DateTime<Utc>, // informational only
    pub next_id: u64,
    pub document_count: usize,
    pub documents: Vec<ManifestDocumentEntry>,
}

/// Directory-backed persistence for a [`Catalog`].
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self) -> bool {
        self.root.join(MANIFEST_FILE).is_file()
    }

    /// Write the catalogue, replacing any previous snapshot.
    pub fn save(&self, catalog: &Catalog) -> Result<CatalogManifest, SnapshotError> {
        self.recover()?;

        // Catalog iterates in id order, which fixes the manifest order.
        let mut encoded = Vec::with_capacity(catalog.len());
        let mut version_hasher = Sha256::new();

        for doc in catalog.iter() {
            let bytes = serde_json::to_vec(doc)?;
            let version = ContentDigest::from_content(&bytes);

            let line = format!("{}:{}", doc.id, version.as_str());
            version_hasher.update(line.as_bytes());

            let entry = ManifestDocumentEntry {
                id: doc.id,
                version,
                file: document_file(doc.id),
            };
            encoded.push((entry, bytes));
        }

        let catalog_version = format!("sha256:{}", hex::encode(version_hasher.finalize()));

        let manifest = CatalogManifest {
            catalog_version: catalog_version.clone(),
            created_at: Utc::now(),
            next_id: catalog.next_id(),
            document_count: encoded.len(),
            documents: encoded.iter().map(|(entry, _)| entry.clone()).collect(),
        };

        let temp_dir = self
            .root
            .with_extension(format!("tmp.{}", &catalog_version[7..19]));

        // Leftover from a crashed save of this exact content
        if temp_dir.exists() {
            fs::remove_dir_all(&temp_dir)?;
        }
        fs::create_dir_all(temp_dir.join(DOCUMENTS_DIR))?;

        for (entry, bytes) in &encoded {
            fs::write(temp_dir.join(&entry.file), bytes)?;
        }

        let manifest_file = fs::File::create(temp_dir.join(MANIFEST_FILE))?;
        serde_json::to_writer_pretty(&manifest_file, &manifest)?;
        manifest_file.sync_all()?;

        self.swap_in(&temp_dir)?;

        tracing::info!(
            root = %self.root.display(),
            documents = manifest.document_count,
            version = %manifest.catalog_version,
            "catalog snapshot written"
        );
        Ok(manifest)
    }

    fn retired(&self) -> PathBuf {
        self.root.with_extension("old")
    }

    fn swap_in(&self, temp_dir: &Path) -> Result<(), SnapshotError> {
        if !self.root.exists() {
            fs::rename(temp_dir, &self.root)?;
            return Ok(());
        }

        let retired = self.retired();
        if retired.exists() {
            fs::remove_dir_all(&retired)?;
        }
        fs::rename(&self.root, &retired)?;
        fs::rename(temp_dir, &self.root)?;
        fs::remove_dir_all(&retired)?;
        Ok(())
    }

    /// Finish a swap that was interrupted after the live snapshot was retired.
    ///
    /// Returns `true` when the retired snapshot was put back in place. A retired
    /// directory next to a complete live snapshot is left for the next save to
    /// clear.
    pub fn recover(&self) -> Result<bool, SnapshotError> {
        let retired = self.retired();
        if self.exists() || !retired.join(MANIFEST_FILE).is_file() {
            return Ok(false);
        }

        if self.root.exists() {
            fs::remove_dir_all(&self.root)?;
        }
        fs::rename(&retired, &self.root)?;

        tracing::warn!(root = %self.root.display(), "restored retired catalog snapshot");
        Ok(true)
    }

    pub fn read_manifest(&self) -> Result<CatalogManifest, SnapshotError> {
        let f = fs::File::open(self.root.join(MANIFEST_FILE))?;
        Ok(serde_json::from_reader(f)?)
    }

    /// Load and verify every document listed in the manifest.
    pub fn load(&self) -> Result<Catalog, SnapshotError> {
        self.recover()?;

        let manifest = self.read_manifest()?;
        let mut seen = BTreeSet::new();
        let mut documents = Vec::with_capacity(manifest.documents.len());

        for entry in &manifest.documents {
            if !seen.insert(entry.id) {
                return Err(SnapshotError::DuplicateDocumentId(entry.id));
            }

            if entry.file != document_file(entry.id) {
                return Err(SnapshotError::InvalidEntryPath {
                    id: entry.id,
                    file: entry.file.clone(),
                });
            }
            let bytes = fs::read(self.root.join(&entry.file))?;

            let found = ContentDigest::from_content(&bytes);
            if found != entry.version {
                return Err(SnapshotError::VersionMismatch {
                    id: entry.id,
                    expected: entry.version.as_str().to_string(),
                    found: found.as_str().to_string(),
                });
            }

            let doc: Document = serde_json::from_slice(&bytes)?;
            if doc.id != entry.id {
                return Err(SnapshotError::IdMismatch {
                    expected: entry.id,
                    found: doc.id,
                });
            }
            documents.push(doc);
        }

        tracing::debug!(
            root = %self.root.display(),
            documents = documents.len(),
            "catalog snapshot loaded"
        );
        Ok(Catalog::from_parts(documents, manifest.next_id)?)
    }

    /// Load the snapshot, or start an empty catalogue if none was saved yet.
    pub fn load_or_default(&self) -> Result<Catalog, SnapshotError> {
        self.recover()?;
        if self.exists() {
            self.load()
        } else {
            Ok(Catalog::new())
        }
    }
}

fn document_file(id: DocumentId) -> String {
    format!("{DOCUMENTS_DIR}/{id}.json")
}
