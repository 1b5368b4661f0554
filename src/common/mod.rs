//! Common types and utilities shared across flatbtree.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - Identifiers (RowId, SlotId)

pub mod config;
pub mod error;
mod row_id;
mod slot_id;

pub use error::{Error, ErrorKind, Result};
pub use row_id::RowId;
pub use slot_id::SlotId;
