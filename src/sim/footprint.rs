//! Per-entity draw history
//!
//! The display is double buffered, so the buffer being drawn this tick last
//! held the frame from two ticks ago. Each drawable keeps what it drew in the
//! last two ticks and erases the older one.

use serde::{Deserialize, Serialize};

/// What an entity drew in each of the last two ticks (`None` = nothing drawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footprints<T> {
    last: Option<T>,
    two_ago: Option<T>,
}

impl<T> Default for Footprints<T> {
    fn default() -> Self {
        Self {
            last: None,
            two_ago: None,
        }
    }
}

impl<T: Copy> Footprints<T> {
    /// Record this tick's footprint, aging the previous one
    #[inline]
    pub fn record(&mut self, drawn: Option<T>) {
        self.two_ago = self.last;
        self.last = drawn;
    }

    /// Footprint drawn by the previous tick (now on screen)
    #[inline]
    pub fn last(&self) -> Option<T> {
        self.last
    }

    /// Footprint present in the buffer about to be drawn
    #[inline]
    pub fn two_ago(&self) -> Option<T> {
        self.two_ago
    }

    pub fn clear(&mut self) {
        self.last = None;
        self.two_ago = None;
    }
}
