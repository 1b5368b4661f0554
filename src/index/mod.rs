//! Index structures.
//!
//! - [`btree`] - Fixed-fanout B-tree paged through the buffer manager

pub mod btree;

pub use btree::{BTree, Loader};
