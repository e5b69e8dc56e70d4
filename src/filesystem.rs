//! In-memory destination overlay used to stage the merge before writing.
//!
//! All merge and relocation decisions happen against this overlay rather
//! than directly on disk. The write phase then flushes the overlay to the
//! destination in one pass, which keeps dry-run support trivial (skip the
//! flush) and makes the merge logic testable without touching the host
//! filesystem.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One staged file: content plus the Unix permission bits to write it with.
#[derive(Debug, Clone)]
pub struct File {
    /// File content as bytes
    pub content: Vec<u8>,
    /// File permissions (simplified as u32)
    pub permissions: u32,
}

impl File {
    /// Create a new file with content and default permissions.
    pub fn new(content: Vec<u8>) -> Self {
        Self {
            content,
            permissions: 0o644,
        }
    }

    /// Create a new file from string content.
    pub fn from_string(content: &str) -> Self {
        Self::new(content.as_bytes().to_vec())
    }

    /// Get file size in bytes.
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Apply a literal (non-regex) substring replacement to the content.
    ///
    /// Returns the number of occurrences replaced. The content must be
    /// valid UTF-8; rewrite rules only ever target text files produced by
    /// the generator.
    pub fn replace_literal(&mut self, pattern: &str, replacement: &str) -> Result<usize> {
        let text = std::str::from_utf8(&self.content).map_err(|_| Error::Filesystem {
            message: "cannot apply text replacement to non-UTF-8 content".to_string(),
        })?;
        let count = text.matches(pattern).count();
        if count > 0 {
            self.content = text.replace(pattern, replacement).into_bytes();
        }
        Ok(count)
    }
}

/// Destination overlay: a path -> file mapping staged in memory.
///
/// Keys are destination-relative paths. A `BTreeMap` keeps iteration order
/// deterministic, which makes run logs and test assertions stable.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    files: BTreeMap<PathBuf, File>,
}

impl Overlay {
    /// Create a new empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a file at a destination-relative path, replacing any earlier
    /// entry for the same path (last write wins).
    pub fn insert<P: AsRef<Path>>(&mut self, path: P, file: File) {
        self.files.insert(path.as_ref().to_path_buf(), file);
    }

    /// Stage a file with string content.
    pub fn insert_string<P: AsRef<Path>>(&mut self, path: P, content: &str) {
        self.insert(path, File::from_string(content));
    }

    /// Load a file from disk and stage it at `dest`.
    ///
    /// Permission bits are carried over on Unix so generated scripts keep
    /// their executable bit through the merge.
    pub fn stage_from_disk<P: AsRef<Path>, Q: AsRef<Path>>(&mut self, src: P, dest: Q) -> Result<()> {
        let src = src.as_ref();
        let content = std::fs::read(src).map_err(|e| Error::Filesystem {
            message: format!("Failed to read '{}': {}", src.display(), e),
        })?;
        let mut file = File::new(content);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(meta) = std::fs::metadata(src) {
                file.permissions = meta.permissions().mode() & 0o777;
            }
        }
        self.insert(dest, file);
        Ok(())
    }

    /// Get a staged file by path.
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&File> {
        self.files.get(path.as_ref())
    }

    /// Get a mutable reference to a staged file.
    pub fn get_mut<P: AsRef<Path>>(&mut self, path: P) -> Option<&mut File> {
        self.files.get_mut(path.as_ref())
    }

    /// Check if a path is staged.
    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Get the number of staged files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the overlay is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all staged files as (path, file) pairs.
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &File)> {
        self.files.iter()
    }

    /// Paths staged under a destination-relative directory prefix.
    pub fn paths_under<P: AsRef<Path>>(&self, prefix: P) -> Vec<PathBuf> {
        let prefix = prefix.as_ref();
        self.files
            .keys()
            .filter(|p| p.starts_with(prefix))
            .cloned()
            .collect()
    }
}
