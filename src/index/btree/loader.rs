//! Loader - bootstraps a [`BTree`] handle from an index file.

use std::sync::Arc;

use tracing::debug;

use crate::buffer::SharedBufferManager;
use crate::common::config::DEFAULT_TREE_HEIGHT;
use crate::common::{Result, RowId};

use super::BTree;

/// Opens B-trees by pinning their root row.
///
/// # Example
/// ```no_run
/// use flatbtree::{BufferManager, Loader};
///
/// let bm = BufferManager::new("./data", 10).into_shared();
/// let tree = Loader::new().load("tree1", &bm).unwrap();
/// let value = tree.get(11).unwrap();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Loader {
    height: usize,
}

impl Loader {
    /// Loader for trees of [`DEFAULT_TREE_HEIGHT`] levels.
    pub fn new() -> Self {
        Self::with_height(DEFAULT_TREE_HEIGHT)
    }

    /// Loader for trees of `height` levels.
    ///
    /// # Panics
    /// Panics if `height` is 0.
    pub fn with_height(height: usize) -> Self {
        assert!(height > 0, "tree height must be > 0");
        Self { height }
    }

    /// Pin row 0 of `name` and return a tree handle over it.
    ///
    /// # Errors
    /// Any error from pinning the root: missing file, malformed root row or
    /// no free slot. No handle is produced in that case.
    pub fn load(&self, name: &str, manager: &SharedBufferManager) -> Result<BTree> {
        let slot = manager.lock().pin(name, RowId::ROOT)?;
        debug!(tree = name, slot = slot.0, height = self.height, "loaded tree");

        Ok(BTree::new(name, RowId::ROOT, self.height, Arc::clone(manager)))
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
