//! Buffer manager statistics tracking.

use std::fmt;

/// Counters kept by the buffer manager.
///
/// The manager is only reached through `&mut self` (or the shared mutex), so
/// plain integers suffice. `BufferManager::stats()` hands out a copy that
/// can be printed and compared.
///
/// # Example
/// ```
/// use flatbtree::BufferStats;
///
/// let stats = BufferStats { pins: 4, pin_hits: 3, ..Default::default() };
/// assert_eq!(stats.hit_rate(), 0.75);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    /// Number of pin requests.
    pub pins: u64,

    /// Pin requests answered by a page that was already resident.
    pub pin_hits: u64,

    /// Number of successful unpins.
    pub unpins: u64,

    /// Rows deserialized from disk.
    pub rows_read: u64,

    /// Rows serialized back to disk.
    pub rows_written: u64,
}

impl BufferStats {
    /// Fraction of pins served without reading from disk (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        if self.pins == 0 {
            0.0
        } else {
            self.pin_hits as f64 / self.pins as f64
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for BufferStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ pins: {}, hits: {}, unpins: {}, read: {}, written: {}, hit_rate: {:.2}% }}",
            self.pins,
            self.pin_hits,
            self.unpins,
            self.rows_read,
            self.rows_written,
            self.hit_rate() * 100.0
        )
    }
}
