//! Configuration constants for flatbtree.
//!
//! # Row Layout
//! Every page is stored as one line of its index file:
//! ```text
//! k0;k1;k2;k3;k4;k5;v0;v1;v2;v3;v4;v5;v6
//! └──── 6 keys ────┘└────── 7 values ──────┘
//! ```
//! An empty field encodes the sentinel `0`.

/// Number of key slots in a page.
pub const KEYS_PER_PAGE: usize = 6;

/// Number of value slots in a page.
///
/// Interior pages use all seven (one child per key plus the rightmost
/// child). Leaf pages only use the first six.
pub const VALUES_PER_PAGE: usize = KEYS_PER_PAGE + 1;

/// Number of `;`-separated fields in one row.
pub const FIELDS_PER_ROW: usize = KEYS_PER_PAGE + VALUES_PER_PAGE;

/// Separates the fields of a row.
pub const FIELD_SEPARATOR: char = ';';

/// Separates the rows of an index file.
pub const ROW_SEPARATOR: char = '\n';

/// Reserved key/value marking an unused slot and the end of a page's entries.
pub const SENTINEL: u64 = 0;

/// Row holding the root page of every index file.
pub const ROOT_ROW: u64 = 0;

/// Number of page slots in a buffer manager unless told otherwise.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Number of levels a tree is assumed to have: one interior root over a
/// single level of leaves.
pub const DEFAULT_TREE_HEIGHT: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_has_thirteen_fields() {
        assert_eq!(FIELDS_PER_ROW, 13);
        assert_eq!(VALUES_PER_PAGE, KEYS_PER_PAGE + 1);
    }

    #[test]
    fn test_default_pool_holds_a_two_level_tree() {
        // Root plus at least one leaf must fit.
        assert!(DEFAULT_POOL_SIZE >= DEFAULT_TREE_HEIGHT);
    }
}
