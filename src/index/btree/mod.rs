//! B-tree index over a paged index file.
//!
//! # Shape
//! ```text
//!                  row 0: [ 1 | 11 |    ]
//!                         /    |      \
//!                   ≤ 1  /  ≤ 11|       \ > 11
//!                       ▼      ▼        ▼
//!             row 2: [1→2]  row 12: [11→12]  row 20: [...]
//! ```
//! A tree has a fixed number of levels. Pages above the last level route by
//! key to a child row; pages on the last level (the leaf level) hold the
//! payloads.
//!
//! There is no split on overflow: a push into a full leaf loses the leaf's
//! highest entry.

mod loader;

pub use loader::Loader;

use tracing::{trace, warn};

use crate::buffer::{BufferManager, SharedBufferManager};
use crate::common::config::SENTINEL;
use crate::common::{Error, Result, RowId, SlotId};

/// Handle on one B-tree stored in one index file.
///
/// The handle keeps the root's on-disk row, not a slot. Every operation
/// resolves the root through the buffer manager, pinning it again if it was
/// unpinned in between, so a handle never reads through a stale slot.
///
/// Cloning a handle shares the buffer manager.
#[derive(Debug, Clone)]
pub struct BTree {
    /// Name of the index file.
    name: String,
    root: RowId,
    /// Number of levels; the leaf level is `height - 1`.
    height: usize,
    manager: SharedBufferManager,
}

impl BTree {
    pub(crate) fn new(name: &str, root: RowId, height: usize, manager: SharedBufferManager) -> Self {
        Self {
            name: name.to_string(),
            root,
            height,
            manager,
        }
    }

    /// Name of the index file.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The buffer manager this tree pages through.
    pub fn manager(&self) -> &SharedBufferManager {
        &self.manager
    }

    /// Slot currently holding the root, pinning it if necessary.
    pub fn root_slot(&self) -> Result<SlotId> {
        self.manager.lock().pin(&self.name, self.root)
    }

    /// Look up the value stored for `key`.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the leaf `key` routes to does not hold it
    /// - `Error::Traversal` if a page on the way has no child for `key`
    /// - any pin error while loading a page
    pub fn get(&self, key: u64) -> Result<u64> {
        let mut bm = self.manager.lock();
        let leaf = self.traverse(&mut bm, key, 0, self.root)?;

        bm.page(leaf)?.lookup(key).ok_or(Error::KeyNotFound(key))
    }

    /// Insert `key → value` into the leaf `key` routes to.
    ///
    /// The page is changed in its buffer slot only; call [`BTree::flush`] to
    /// write it to disk.
    ///
    /// # Errors
    /// - `Error::ReservedKey` for key `0`
    /// - `Error::DuplicateKey` if the key exists; the leaf is left untouched
    /// - `Error::Traversal` / pin errors as for [`BTree::get`]
    pub fn push(&self, key: u64, value: u64) -> Result<()> {
        if key == SENTINEL {
            return Err(Error::ReservedKey);
        }

        let mut bm = self.manager.lock();
        let leaf = self.traverse(&mut bm, key, 0, self.root)?;

        // Rejected keys, and keys that would fall straight off a full leaf,
        // must not mark the slot dirty.
        let dropped = match bm.page(leaf)?.insert_position(key)? {
            Some(_) => bm.page_mut(leaf)?.insert(key, value)?,
            None => Some((key, value)),
        };

        if let Some((dropped_key, dropped_value)) = dropped {
            warn!(
                tree = %self.name,
                slot = leaf.0,
                dropped_key,
                dropped_value,
                "leaf is full, entry dropped"
            );
        }
        Ok(())
    }

    /// Write every modified page of this tree to disk.
    /// Returns how many pages were written.
    pub fn flush(&self) -> Result<usize> {
        self.manager.lock().flush_file(&self.name)
    }

    /// Walk from `row` at `level` down to the leaf covering `key`.
    ///
    /// Each visited page is pinned. Returns the slot of the leaf.
    fn traverse(
        &self,
        bm: &mut BufferManager,
        key: u64,
        level: usize,
        row: RowId,
    ) -> Result<SlotId> {
        let slot = bm.pin(&self.name, row)?;
        trace!(tree = %self.name, depth = level, row = row.0, slot = slot.0, "visiting page");

        if level + 1 >= self.height {
            return Ok(slot);
        }

        let child = bm.page(slot)?.child_for(key).ok_or(Error::Traversal {
            row,
            level,
            reason: "no child pointer for key",
        })?;

        self.traverse(bm, key, level + 1, child)
    }
}
