//! Buffer slot identifier type.

use std::fmt;

/// Identifies a slot in the buffer manager.
///
/// Slots are stored in a `Vec`, so the index is a `usize` and can be
/// used directly: `slots[slot_id.0]`.
///
/// A `SlotId` is only meaningful while the page it was returned for stays
/// pinned. Once unpinned the slot may be handed out for another row.
///
/// # Example
/// ```
/// use flatbtree::SlotId;
///
/// let slot = SlotId::new(3);
/// assert_eq!(slot.0, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

impl SlotId {
    /// Create a new SlotId.
    #[inline]
    pub fn new(id: usize) -> Self {
        SlotId(id)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_equality() {
        assert_eq!(SlotId::new(5), SlotId::new(5));
        assert_ne!(SlotId::new(5), SlotId::new(6));
    }

    #[test]
    fn test_slot_id_display() {
        assert_eq!(format!("{}", SlotId::new(4)), "Slot(4)");
    }
}
