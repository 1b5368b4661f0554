//! Page - one B-tree node record.
//!
//! A [`Page`] is the decoded form of one row of an index file. It is held
//! in a buffer slot while pinned and mutated in place by the tree.

use crate::common::config::{KEYS_PER_PAGE, SENTINEL, VALUES_PER_PAGE};
use crate::common::{Error, Result, RowId};

/// One B-tree node: six keys and seven values.
///
/// # Layout
/// ```text
/// keys:   [ k0 | k1 | k2 | k3 | k4 | k5 ]
/// values: [ v0 | v1 | v2 | v3 | v4 | v5 | v6 ]
/// ```
/// - Leaf: `v[i]` is the payload of `k[i]`; `v6` is unused.
/// - Interior: `v[i]` is the child row holding keys `<= k[i]`; the value
///   just past the last key is the child for keys greater than all of them.
///
/// # Invariants
/// - Keys are ascending and unique.
/// - `0` is the sentinel for an empty slot. Once a key slot is `0`, every
///   later key slot is `0` too, so the first sentinel ends the entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Name of the index file this page was read from.
    file: String,
    /// Row of that file this page was read from.
    row: RowId,
    keys: [u64; KEYS_PER_PAGE],
    values: [u64; VALUES_PER_PAGE],
}

impl Page {
    /// Create a page with every slot empty.
    pub fn new(file: impl Into<String>, row: RowId) -> Self {
        Self::from_parts(file, row, [SENTINEL; KEYS_PER_PAGE], [SENTINEL; VALUES_PER_PAGE])
    }

    /// Create a page from raw key and value slots.
    pub fn from_parts(
        file: impl Into<String>,
        row: RowId,
        keys: [u64; KEYS_PER_PAGE],
        values: [u64; VALUES_PER_PAGE],
    ) -> Self {
        Self {
            file: file.into(),
            row,
            keys,
            values,
        }
    }

    /// Name of the owning index file.
    #[inline]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Row this page lives at.
    #[inline]
    pub fn row(&self) -> RowId {
        self.row
    }

    #[inline]
    pub fn keys(&self) -> &[u64; KEYS_PER_PAGE] {
        &self.keys
    }

    #[inline]
    pub fn values(&self) -> &[u64; VALUES_PER_PAGE] {
        &self.values
    }

    /// Number of keys before the first sentinel.
    pub fn len(&self) -> usize {
        self.keys
            .iter()
            .position(|&k| k == SENTINEL)
            .unwrap_or(KEYS_PER_PAGE)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every key slot is in use.
    pub fn is_full(&self) -> bool {
        self.len() == KEYS_PER_PAGE
    }

    /// Key/payload pairs of a leaf, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.keys[..self.len()]
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Leaf lookup.
    ///
    /// Scans left to right and gives up as soon as it passes a greater key
    /// or reaches the sentinel.
    pub fn lookup(&self, key: u64) -> Option<u64> {
        for (i, &k) in self.keys.iter().enumerate() {
            if k == SENTINEL || k > key {
                return None;
            }
            if k == key {
                return Some(self.values[i]);
            }
        }
        None
    }

    /// Interior routing: the child row that covers `key`.
    ///
    /// Keys that are in use and smaller than `key` are skipped. The first
    /// key `>= key` selects the child at the same index; running out of keys
    /// selects the child just past the last one. Returns `None` when that
    /// child pointer is empty.
    pub fn child_for(&self, key: u64) -> Option<RowId> {
        let index = self
            .keys
            .iter()
            .position(|&k| k == SENTINEL || k >= key)
            .unwrap_or(KEYS_PER_PAGE);

        match self.values[index] {
            SENTINEL => None,
            child => Some(RowId::new(child)),
        }
    }

    /// Slot a new `key` would take in this leaf, without changing it.
    ///
    /// `None` means the leaf is full and `key` is greater than all of its
    /// keys, so an insert would leave the page as it is.
    ///
    /// # Errors
    /// - `Error::ReservedKey` for key `0`
    /// - `Error::DuplicateKey` if the key is present
    pub fn insert_position(&self, key: u64) -> Result<Option<usize>> {
        if key == SENTINEL {
            return Err(Error::ReservedKey);
        }

        match self.keys.iter().position(|&k| k == SENTINEL || k >= key) {
            Some(i) if self.keys[i] == key => Err(Error::DuplicateKey(key)),
            position => Ok(position),
        }
    }

    /// Insert into a leaf, keeping keys ordered.
    ///
    /// Entries from the insertion point onwards shift one slot to the right.
    /// There is no split: if the leaf was full, the entry pushed out of the
    /// last slot is returned and is no longer part of the page. When the new
    /// key is greater than every key of a full leaf it is the one returned.
    ///
    /// # Errors
    /// - `Error::ReservedKey` for key `0`
    /// - `Error::DuplicateKey` if the key is present; the page is untouched
    pub fn insert(&mut self, key: u64, value: u64) -> Result<Option<(u64, u64)>> {
        let Some(index) = self.insert_position(key)? else {
            return Ok(Some((key, value)));
        };

        let last = KEYS_PER_PAGE - 1;
        let dropped = match self.keys[last] {
            SENTINEL => None,
            k => Some((k, self.values[last])),
        };

        self.keys.copy_within(index..last, index + 1);
        self.values.copy_within(index..last, index + 1);
        self.keys[index] = key;
        self.values[index] = value;

        Ok(dropped)
    }
}
