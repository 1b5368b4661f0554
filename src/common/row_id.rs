//! On-disk row identifier type.

use std::fmt;

use super::config::ROOT_ROW;

/// Identifies a page on disk by its line number in the index file.
///
/// Row 0 always holds the root. Interior pages refer to their children by
/// row, so a `RowId` is also what a child pointer decodes to.
///
/// # Example
/// ```
/// use flatbtree::RowId;
///
/// assert!(RowId::ROOT.is_root());
/// assert_eq!(RowId::new(12).0, 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub u64);

impl RowId {
    /// The root row of every index file.
    pub const ROOT: RowId = RowId(ROOT_ROW);

    /// Create a new RowId.
    #[inline]
    pub fn new(id: u64) -> Self {
        RowId(id)
    }

    /// Check if this is the root row.
    #[inline]
    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    /// Line index into the file content, `None` if it does not fit `usize`.
    #[inline]
    pub(crate) fn line(&self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row({})", self.0)
    }
}
