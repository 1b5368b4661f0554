//! Buffer management.
//!
//! The buffer manager is the in-memory layer between the B-tree and its
//! index files. It holds a fixed pool of slots, each holding one page.
//!
//! # Components
//! - [`BufferManager`] - Pins rows into slots and writes them back
//! - [`Frame`] - A slot holding a page + dirty flag
//! - [`BufferStats`] - Pin and I/O counters

mod buffer_manager;
mod frame;
mod stats;

pub use buffer_manager::{BufferManager, SharedBufferManager};
pub use frame::Frame;
pub use stats::BufferStats;
