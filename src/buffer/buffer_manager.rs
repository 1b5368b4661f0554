//! Buffer Manager - the page slot layer between the tree and its files.
//!
//! The [`BufferManager`] provides:
//! - A fixed array of page slots
//! - Pinning rows of an index file into slots (and unpinning them)
//! - Explicit write-back of modified pages
//!
//! It is the only component that touches disk.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::buffer::{BufferStats, Frame};
use crate::common::config::DEFAULT_POOL_SIZE;
use crate::common::{Error, Result, RowId, SlotId};
use crate::storage::page::{codec, Page};
use crate::storage::DiskManager;

/// A buffer manager shared between tree handles.
///
/// The manager has no internal locking, so every user goes through this one
/// coarse mutex for the duration of an operation.
pub type SharedBufferManager = Arc<Mutex<BufferManager>>;

/// A file read into memory between `open` and `close`.
#[derive(Debug)]
struct OpenFile {
    name: String,
    content: String,
}

/// Manages a fixed pool of slots holding pages of index files.
///
/// # Architecture
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │                       BufferManager                         │
/// │  ┌────────────────┐  ┌─────────────────────────────────┐    │
/// │  │   slot_map     │  │       frames: Vec<Frame>        │    │
/// │  │(file,row)→Slot │─▶│  [Slot0] [Slot1] [Slot2] ...    │    │
/// │  └────────────────┘  └─────────────────────────────────┘    │
/// │  ┌────────────────┐  ┌────────────────┐                     │
/// │  │   open_file    │  │  disk_manager  │                     │
/// │  │ transient copy │  │  one directory │                     │
/// │  └────────────────┘  └────────────────┘                     │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// # Capacity
/// There is no eviction. Once every slot holds a page, `pin` fails with
/// `Error::NoFreeSlots` until something is unpinned, so the working set of
/// all trees sharing a manager must fit in the pool.
///
/// # Invariants
/// - A `(file, row)` pair is resident in at most one slot.
/// - `slot_map` has exactly one entry per non-empty slot.
///
/// # Usage
/// ```ignore
/// let mut bm = BufferManager::new("./data", 10);
///
/// let slot = bm.pin("tree1", RowId::new(0))?;
/// bm.page_mut(slot)?.insert(13, 14)?;
/// bm.flush(slot)?;
/// bm.unpin(slot)?;
/// ```
#[derive(Debug)]
pub struct BufferManager {
    /// Fixed pool of slots allocated at startup.
    frames: Vec<Frame>,

    /// Maps resident rows to the slot holding them.
    slot_map: HashMap<(String, RowId), SlotId>,

    /// File currently read into memory, if any.
    open_file: Option<OpenFile>,

    /// Handles all disk I/O.
    disk_manager: DiskManager,

    stats: BufferStats,
}

impl BufferManager {
    /// Create a buffer manager for the index files in `dir`.
    ///
    /// # Panics
    /// Panics if `pool_size` is 0.
    pub fn new<P: AsRef<Path>>(dir: P, pool_size: usize) -> Self {
        assert!(pool_size > 0, "pool_size must be > 0");

        Self {
            frames: (0..pool_size).map(|_| Frame::new()).collect(),
            slot_map: HashMap::new(),
            open_file: None,
            disk_manager: DiskManager::new(dir),
            stats: BufferStats::default(),
        }
    }

    /// Create a buffer manager with [`DEFAULT_POOL_SIZE`] slots.
    pub fn with_default_pool<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir, DEFAULT_POOL_SIZE)
    }

    /// Wrap this manager for sharing between tree handles.
    pub fn into_shared(self) -> SharedBufferManager {
        Arc::new(Mutex::new(self))
    }

    // ========================================================================
    // Public API: Files
    // ========================================================================

    /// Read a whole index file into the transient buffer.
    ///
    /// Replaces whatever file was open before.
    ///
    /// # Errors
    /// - I/O error if the file doesn't exist or cannot be read
    pub fn open(&mut self, name: &str) -> Result<()> {
        let content = self.disk_manager.read(name)?;
        debug!(file = name, bytes = content.len(), "opened index file");

        self.open_file = Some(OpenFile {
            name: name.to_string(),
            content,
        });
        Ok(())
    }

    /// Discard the transient buffer.
    ///
    /// # Errors
    /// - `Error::NoOpenFile` if nothing is open
    pub fn close(&mut self) -> Result<()> {
        match self.open_file.take() {
            Some(open) => {
                debug!(file = %open.name, "closed index file");
                Ok(())
            }
            None => Err(Error::NoOpenFile),
        }
    }

    /// Name of the file currently open, if any.
    pub fn open_file_name(&self) -> Option<&str> {
        self.open_file.as_ref().map(|open| open.name.as_str())
    }

    /// Remove an index file from disk.
    ///
    /// Pages of that file that are still resident stay in their slots.
    ///
    /// # Errors
    /// - I/O error if the file doesn't exist
    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.disk_manager.delete(name)?;

        if self.open_file_name() == Some(name) {
            self.open_file = None;
        }
        debug!(file = name, "deleted index file");
        Ok(())
    }

    // ========================================================================
    // Public API: Pin and unpin
    // ========================================================================

    /// Load one row of an index file into a slot and return the slot.
    ///
    /// A row that is already resident is not read again; its current slot
    /// (with any unflushed changes) is returned.
    ///
    /// # Errors
    /// - I/O error if the file cannot be read
    /// - `Error::NoFreeSlots` if every slot holds a page
    /// - `Error::RowNotFound` if the file has fewer rows
    /// - `Error::FieldCount` / `Error::InvalidField` if the row is malformed
    pub fn pin(&mut self, name: &str, row: RowId) -> Result<SlotId> {
        self.stats.pins += 1;

        if let Some(slot) = self.slot_of(name, row) {
            self.stats.pin_hits += 1;
            return Ok(slot);
        }

        self.open(name)?;
        let result = self.load_row(name, row);
        self.release_open_file();

        let slot = result?;
        debug!(file = name, row = row.0, slot = slot.0, "pinned row");
        Ok(slot)
    }

    /// Release a slot so it can be reused.
    ///
    /// Unflushed changes to the page are discarded.
    ///
    /// # Errors
    /// - `Error::SlotNotPinned` if the slot is empty or outside the pool
    pub fn unpin(&mut self, slot: SlotId) -> Result<()> {
        let frame = self
            .frames
            .get_mut(slot.0)
            .ok_or(Error::SlotNotPinned(slot))?;

        let was_dirty = frame.is_dirty();
        let page = frame.take().ok_or(Error::SlotNotPinned(slot))?;

        if was_dirty {
            warn!(
                file = page.file(),
                row = page.row().0,
                slot = slot.0,
                "unpinned page with unflushed changes"
            );
        }

        self.slot_map.remove(&(page.file().to_string(), page.row()));
        self.stats.unpins += 1;
        debug!(file = page.file(), row = page.row().0, slot = slot.0, "unpinned row");
        Ok(())
    }

    // ========================================================================
    // Public API: Page access
    // ========================================================================

    /// The page held by a slot.
    ///
    /// # Errors
    /// - `Error::SlotNotPinned` if the slot is empty or outside the pool
    pub fn page(&self, slot: SlotId) -> Result<&Page> {
        self.frames
            .get(slot.0)
            .and_then(Frame::page)
            .ok_or(Error::SlotNotPinned(slot))
    }

    /// Mutable access to the page held by a slot. Marks the slot dirty.
    ///
    /// # Errors
    /// - `Error::SlotNotPinned` if the slot is empty or outside the pool
    pub fn page_mut(&mut self, slot: SlotId) -> Result<&mut Page> {
        self.frames
            .get_mut(slot.0)
            .and_then(Frame::page_mut)
            .ok_or(Error::SlotNotPinned(slot))
    }

    /// Slot currently holding a row, if it is resident.
    pub fn slot_of(&self, name: &str, row: RowId) -> Option<SlotId> {
        self.slot_map.get(&(name.to_string(), row)).copied()
    }

    /// Whether a slot holds changes that are not on disk.
    pub fn is_dirty(&self, slot: SlotId) -> bool {
        self.frames.get(slot.0).is_some_and(Frame::is_dirty)
    }

    /// All resident pages in slot order.
    pub fn resident_pages(&self) -> impl Iterator<Item = (SlotId, &Page)> {
        self.frames
            .iter()
            .enumerate()
            .filter_map(|(i, frame)| frame.page().map(|page| (SlotId::new(i), page)))
    }

    // ========================================================================
    // Public API: Flush
    // ========================================================================

    /// Write the page held by a slot back to its row on disk.
    ///
    /// The whole file is read, the page's row is rebuilt and the file is
    /// rewritten. All other rows are kept as they were.
    ///
    /// # Errors
    /// - `Error::SlotNotPinned` if the slot is empty or outside the pool
    /// - `Error::RowNotFound` if the file no longer has the page's row
    /// - I/O errors from reading or writing the file
    pub fn flush(&mut self, slot: SlotId) -> Result<()> {
        let page = self.page(slot)?;
        let name = page.file().to_string();
        let row = page.row();
        let line = codec::encode_row(page);

        self.open(&name)?;
        let rebuilt = match &self.open_file {
            Some(open) => codec::replace_row(&open.name, &open.content, row, &line),
            None => Err(Error::NoOpenFile),
        };
        self.release_open_file();

        self.disk_manager.write(&name, &rebuilt?)?;

        self.frames[slot.0].clear_dirty();
        self.stats.rows_written += 1;
        debug!(file = %name, row = row.0, slot = slot.0, "flushed row");
        Ok(())
    }

    /// Flush every dirty page of one file. Returns how many were written.
    ///
    /// # Errors
    /// - I/O errors from disk writes
    pub fn flush_file(&mut self, name: &str) -> Result<usize> {
        let dirty: Vec<SlotId> = self
            .resident_pages()
            .filter(|(slot, page)| page.file() == name && self.is_dirty(*slot))
            .map(|(slot, _)| slot)
            .collect();

        for &slot in &dirty {
            self.flush(slot)?;
        }
        Ok(dirty.len())
    }

    /// Flush every dirty page. Returns how many were written.
    ///
    /// # Errors
    /// - I/O errors from disk writes
    pub fn flush_all(&mut self) -> Result<usize> {
        let dirty: Vec<SlotId> = self
            .resident_pages()
            .map(|(slot, _)| slot)
            .filter(|&slot| self.is_dirty(slot))
            .collect();

        for &slot in &dirty {
            self.flush(slot)?;
        }
        Ok(dirty.len())
    }

    // ========================================================================
    // Public API: Stats and info
    // ========================================================================

    /// Get a copy of the counters.
    pub fn stats(&self) -> BufferStats {
        self.stats
    }

    /// Get the pool size.
    pub fn pool_size(&self) -> usize {
        self.frames.len()
    }

    /// Get the number of empty slots.
    pub fn free_slot_count(&self) -> usize {
        self.frames.iter().filter(|frame| frame.is_empty()).count()
    }

    /// Get the number of resident pages (entries in the slot map).
    pub fn page_count(&self) -> usize {
        self.slot_map.len()
    }

    /// Directory the index files live in.
    pub fn dir(&self) -> &Path {
        self.disk_manager.dir()
    }

    // ========================================================================
    // Internal
    // ========================================================================

    /// Deserialize a row of the open file into the first empty slot.
    fn load_row(&mut self, name: &str, row: RowId) -> Result<SlotId> {
        let index = self
            .frames
            .iter()
            .position(Frame::is_empty)
            .ok_or(Error::NoFreeSlots)?;

        let open = self.open_file.as_ref().ok_or(Error::NoOpenFile)?;
        let line = codec::read_row(&open.name, &open.content, row)?;
        let page = codec::decode_row(name, row, line)?;

        self.frames[index].load(page);
        let slot = SlotId::new(index);
        self.slot_map.insert((name.to_string(), row), slot);
        self.stats.rows_read += 1;

        Ok(slot)
    }

    /// Drop the transient buffer without requiring one to be open.
    fn release_open_file(&mut self) {
        self.open_file = None;
    }
}
