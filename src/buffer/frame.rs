//! Frame - a slot in the buffer manager.
//!
//! A [`Frame`] holds at most one [`Page`] plus the metadata needed for
//! write-back:
//! - Which page is loaded (if any)
//! - Dirty flag for changes not yet flushed

use crate::storage::page::Page;

/// A slot in the buffer manager.
///
/// Frames are allocated once when the manager is created. An empty frame
/// holds no page and can be handed out by the next pin.
#[derive(Debug, Default)]
pub struct Frame {
    /// The resident page, or None if the frame is empty.
    page: Option<Page>,

    /// Whether the page has been modified since it was pinned or last flushed.
    is_dirty: bool,
}

impl Frame {
    /// Create a new empty frame.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Page access
    // ========================================================================

    #[inline]
    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    /// Mutable access to the page. Marks the frame dirty.
    #[inline]
    pub fn page_mut(&mut self) -> Option<&mut Page> {
        let page = self.page.as_mut()?;
        self.is_dirty = true;
        Some(page)
    }

    /// Load a page into this frame, replacing whatever it held.
    pub fn load(&mut self, page: Page) {
        self.page = Some(page);
        self.is_dirty = false;
    }

    /// Take the page out, leaving the frame empty.
    pub fn take(&mut self) -> Option<Page> {
        self.is_dirty = false;
        self.page.take()
    }

    // ========================================================================
    // Dirty flag
    // ========================================================================

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.is_dirty = false;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    /// Check if the frame is empty (no page loaded).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
    }
}
