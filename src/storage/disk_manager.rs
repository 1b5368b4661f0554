//! Disk Manager - file I/O for index files.
//!
//! The [`DiskManager`] handles all direct file operations:
//! - Reading a whole index file
//! - Rewriting a whole index file
//! - Deleting an index file

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::common::Result;

/// Manages the index files of one directory.
///
/// Files are addressed by name relative to the directory the manager was
/// created for, so `"tree1"` resolves to `<dir>/tree1`.
///
/// # Thread Safety
/// `DiskManager` is **single-threaded**. The `BufferManager` owns it and is
/// responsible for serializing access.
///
/// # Durability
/// Writes truncate the file, write the new content and `fsync()`. A crash
/// between truncate and write loses the file's content.
#[derive(Debug)]
pub struct DiskManager {
    dir: PathBuf,
}

impl DiskManager {
    /// Create a disk manager for the given directory.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this manager works in.
    #[inline]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a file.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Check whether a file exists.
    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Read a whole file.
    ///
    /// # Errors
    /// Returns an I/O error if the file doesn't exist, cannot be read or is
    /// not valid UTF-8.
    pub fn read(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.path(name))?)
    }

    /// Replace the content of a file, creating it if needed.
    ///
    /// # Durability
    /// This method calls `fsync()` after writing.
    pub fn write(&self, name: &str, content: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.path(name))?;

        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        Ok(())
    }

    /// Delete a file.
    ///
    /// # Errors
    /// Returns an I/O error if the file doesn't exist.
    pub fn delete(&self, name: &str) -> Result<()> {
        fs::remove_file(self.path(name))?;
        Ok(())
    }
}
