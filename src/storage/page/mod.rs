//! Page types and layout.
//!
//! This module contains:
//! - [`Page`] - One decoded B-tree node
//! - [`codec`] - The `;`-separated row format pages are stored in

pub mod codec;
#[allow(clippy::module_inception)]
mod page;

pub use page::Page;
