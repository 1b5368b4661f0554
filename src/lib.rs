//! flatbtree - a fixed-fanout B-tree paged through a small buffer pool
//! over flat text files.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           flatbtree                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Index Layer (index/)                      │   │
//! │  │        Loader → BTree (get / push by descent)            │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Buffer Layer (buffer/)                    │   │
//! │  │     BufferManager: fixed slots, pin / unpin / flush      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Storage Layer (storage/)                   │   │
//! │  │     DiskManager (one directory) + Page + row codec       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (RowId, SlotId, Error, config)
//! - [`buffer`] - Buffer slots and write-back
//! - [`storage`] - File I/O and the row format
//! - [`index`] - The B-tree and its loader
//!
//! # Quick Start
//! ```no_run
//! use flatbtree::{BufferManager, Loader};
//!
//! let bm = BufferManager::new("./data", 10).into_shared();
//! let tree = Loader::new().load("tree1", &bm).unwrap();
//!
//! tree.push(13, 14).unwrap();
//! assert_eq!(tree.get(13).unwrap(), 14);
//! tree.flush().unwrap();
//! ```

pub mod buffer;
pub mod common;
pub mod index;
pub mod storage;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_POOL_SIZE, DEFAULT_TREE_HEIGHT};
pub use common::{Error, ErrorKind, Result, RowId, SlotId};

pub use buffer::{BufferManager, BufferStats, SharedBufferManager};
pub use index::{BTree, Loader};
pub use storage::page::Page;
pub use storage::DiskManager;
