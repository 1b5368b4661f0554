//! Storage layer - disk I/O and page formats.
//!
//! This module handles persistent storage:
//! - [`DiskManager`] - Whole-file I/O scoped to a directory
//! - [`page`] - Page type and row format

mod disk_manager;
pub mod page;

pub use disk_manager::DiskManager;
