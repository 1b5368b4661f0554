//! Error types for flatbtree.

use thiserror::Error;

use super::{RowId, SlotId};

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
///
/// Callers that need to react to a class of failure (a missing key during
/// an insert, a full pool) match on the kind instead of on the error value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File missing, unreadable or unwritable.
    Io,
    /// A row that does not decode into a page.
    Format,
    /// No free buffer slot.
    Capacity,
    /// Something looked up is not there.
    NotFound,
    /// Insert of a key that already exists.
    DuplicateKey,
    /// A page scan ended without reaching a decision.
    Traversal,
    /// Argument outside the domain of the operation.
    InvalidInput,
}

/// All possible errors in flatbtree.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from reading, writing or deleting an index file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row did not split into the expected number of fields.
    #[error("{row} has {found} fields, expected {expected}")]
    FieldCount {
        row: RowId,
        found: usize,
        expected: usize,
    },

    /// A non-empty field is not an unsigned decimal integer.
    #[error("{row} field {index} is not an unsigned integer: {field:?}")]
    InvalidField {
        row: RowId,
        index: usize,
        field: String,
    },

    /// The file has fewer rows than the one requested.
    #[error("{row} not found in {file} ({rows} rows)")]
    RowNotFound {
        file: String,
        row: RowId,
        rows: usize,
    },

    /// Every buffer slot holds a page and nothing is evicted.
    #[error("No free slots available in buffer manager")]
    NoFreeSlots,

    /// The slot is empty or outside the pool.
    #[error("{0} is not pinned")]
    SlotNotPinned(SlotId),

    /// `close` was called with no file open.
    #[error("No file to close")]
    NoOpenFile,

    /// The key is absent from the leaf it routes to.
    #[error("Key {0} not found at leaf level")]
    KeyNotFound(u64),

    /// The key is already present in its leaf.
    #[error("Duplicate key {0}")]
    DuplicateKey(u64),

    /// `0` marks empty slots and cannot be stored.
    #[error("Key 0 is reserved as the empty-slot sentinel")]
    ReservedKey,

    /// A page scan could not decide where to go next.
    #[error("Traversal failed at {row} (level {level}): {reason}")]
    Traversal {
        row: RowId,
        level: usize,
        reason: &'static str,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::FieldCount { .. } | Error::InvalidField { .. } => ErrorKind::Format,
            Error::NoFreeSlots => ErrorKind::Capacity,
            Error::RowNotFound { .. }
            | Error::SlotNotPinned(_)
            | Error::NoOpenFile
            | Error::KeyNotFound(_) => ErrorKind::NotFound,
            Error::DuplicateKey(_) => ErrorKind::DuplicateKey,
            Error::Traversal { .. } => ErrorKind::Traversal,
            Error::ReservedKey => ErrorKind::InvalidInput,
        }
    }
}
