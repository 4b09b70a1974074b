use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::document::ContentDigest;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("File is not a PDF")]
    NotPdf,
    #[error("Invalid stored path: {0}")]
    InvalidPath(String),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

/// A file written by [`FileStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the store root; this is what documents reference.
    pub path: String,
    pub digest: ContentDigest,
    pub size: usize,
}

/// Flat directory of uploaded PDFs.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    max_bytes: usize,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            root: root.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store an upload under `<digest prefix>_<sanitized name>`.
    ///
    /// Every upload gets its own file. When that name is taken, a counter is
    /// appended to the prefix (`<digest prefix>-2_<name>`, ...), so removing
    /// one document's file never removes another's.
    pub fn save(&self, original_name: &str, content: &[u8]) -> Result<StoredFile, FileStoreError> {
        if content.len() > self.max_bytes {
            return Err(FileStoreError::TooLarge {
                size: content.len(),
                limit: self.max_bytes,
            });
        }
        if !content.starts_with(PDF_MAGIC) {
            return Err(FileStoreError::NotPdf);
        }

        let digest = ContentDigest::from_content(content);
        let prefix = &digest.hex()[..12];
        let name = sanitize_file_name(original_name);

        fs::create_dir_all(&self.root)?;
        let mut attempt = 1u32;
        let (path, mut f) = loop {
            let path = match attempt {
                1 => format!("{prefix}_{name}"),
                n => format!("{prefix}-{n}_{name}"),
            };
            let opened = fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.root.join(&path));
            match opened {
                Ok(f) => break (path, f),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        };
        f.write_all(content)?;
        f.sync_all()?;

        tracing::info!(path = %path, size = content.len(), "upload stored");
        Ok(StoredFile {
            path,
            digest,
            size: content.len(),
        })
    }

    /// Absolute location of a stored file; it must exist.
    pub fn resolve(&self, stored: &str) -> Result<PathBuf, FileStoreError> {
        let relative = Path::new(stored);
        let is_plain = !stored.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(FileStoreError::InvalidPath(stored.to_string()));
        }

        let full = self.root.join(relative);
        if !full.is_file() {
            return Err(FileStoreError::NotFound(full));
        }
        Ok(full)
    }

    pub fn read(&self, stored: &str) -> Result<Vec<u8>, FileStoreError> {
        let full = self.resolve(stored)?;
        Ok(fs::read(full)?)
    }

    pub fn remove(&self, stored: &str) -> Result<(), FileStoreError> {
        let full = self.resolve(stored)?;
        fs::remove_file(full)?;
        Ok(())
    }
}

/// Keep ASCII alphanumerics, `.`, `-` and `_`; everything else becomes `_`.
fn sanitize_file_name(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "document.pdf".to_string()
    } else {
        cleaned.to_string()
    }
}

