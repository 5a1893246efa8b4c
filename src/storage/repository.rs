//! Flat on-disk file repository.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, SecondsFormat, Utc};
use tempfile::NamedTempFile;

use crate::storage::probe::{self, Capacity};
use crate::storage::resolve;
use crate::{DepotError, Result};

/// One stored file, as returned by upload.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Sanitized base name.
    pub name: String,
    /// Full path inside the storage root.
    pub path: PathBuf,
    /// Byte size.
    pub size: u64,
}

/// One directory entry, as returned by list.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Base name of the file.
    pub name: String,
    /// Byte size at enumeration time.
    pub size: u64,
    /// Last-modified timestamp.
    pub modified: SystemTime,
}

impl FileEntry {
    /// Last-modified time as an RFC3339 string (UTC, second precision).
    pub fn modified_rfc3339(&self) -> String {
        DateTime::<Utc>::from(self.modified).to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Directory listing with a capacity snapshot taken at enumeration time.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Files in directory-enumeration order.
    pub files: Vec<FileEntry>,
    /// Sum of the listed files' sizes.
    pub used_bytes: u64,
    /// Capacity of the volume holding the storage root.
    pub capacity: Capacity,
}

/// Flat file repository rooted at a single directory.
///
/// All stored files are direct children of the root; client-supplied names
/// are reduced to their basename before any filesystem operation, so no
/// operation can escape the root. The repository holds no state beyond the
/// root path itself; every operation re-queries the filesystem.
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
    dir_mode: u32,
}

impl FileRepository {
    /// Create a repository rooted at `root`.
    ///
    /// The directory is not touched here; upload creates it on first use
    /// with the given mode bits.
    pub fn new(root: impl Into<PathBuf>, dir_mode: u32) -> Self {
        Self {
            root: root.into(),
            dir_mode,
        }
    }

    /// The storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a client-supplied name to a path confined to the root.
    ///
    /// The returned path's parent is always exactly the storage root.
    pub fn resolve(&self, supplied: &str) -> Result<(String, PathBuf)> {
        let name = resolve::sanitize(supplied)?;
        let path = self.root.join(&name);
        Ok((name, path))
    }

    /// Create the root directory (and any parents) with the configured mode.
    fn ensure_root(&self) -> Result<()> {
        if self.root.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.dir_mode);
        }
        builder.create(&self.root)?;

        Ok(())
    }

    /// Store a payload under the supplied name, replacing any existing file
    /// with the same basename.
    ///
    /// Free space is checked before any byte is written. The check is
    /// advisory: it reserves nothing, and a write racing other writers can
    /// still fill the disk, which surfaces as an I/O error. The payload
    /// goes to a temporary file in the root and is renamed into place, so
    /// a concurrent reader never sees a half-written file under its final
    /// name.
    ///
    /// Returns the stored file and the free space probed just before the
    /// write.
    pub fn upload(&self, supplied: &str, content: &[u8]) -> Result<(StoredFile, u64)> {
        self.ensure_root()?;

        let available = probe::free_space(&self.root)?;
        let needed = content.len() as u64;
        if needed > available {
            return Err(DepotError::InsufficientStorage { needed, available });
        }

        let (name, path) = self.resolve(supplied)?;

        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(content)?;
        tmp.persist(&path).map_err(|e| DepotError::Io(e.error))?;

        Ok((
            StoredFile {
                name,
                path,
                size: needed,
            },
            available,
        ))
    }

    /// Enumerate direct children of the root.
    ///
    /// Subdirectories and entries whose metadata cannot be read are
    /// skipped. Ordering follows directory enumeration order.
    pub fn list(&self) -> Result<Listing> {
        let mut files = Vec::new();
        let mut used_bytes = 0u64;

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let Ok(meta) = entry.metadata() else {
                continue;
            };
            if meta.is_dir() {
                continue;
            }

            let size = meta.len();
            used_bytes += size;
            files.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                size,
                modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            });
        }

        let capacity = probe::probe(&self.root)?;

        Ok(Listing {
            files,
            used_bytes,
            capacity,
        })
    }

    /// Read a stored file's bytes.
    pub fn load(&self, supplied: &str) -> Result<(String, Vec<u8>)> {
        let (name, path) = self.resolve(supplied)?;

        match fs::read(&path) {
            Ok(bytes) => Ok((name, bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DepotError::NotFound(format!("file {name:?}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a stored file. The file is irrecoverably gone on success.
    pub fn delete(&self, supplied: &str) -> Result<String> {
        let (name, path) = self.resolve(supplied)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(name),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(DepotError::NotFound(format!("file {name:?}")))
            }
            Err(e) => Err(e.into()),
        }
    }
}
