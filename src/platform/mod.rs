//! Platform abstraction layer
//!
//! The game talks to the hardware through four collaborators:
//! - Display: two RGB565 pixel buffers with a blocking swap
//! - Input: the single accelerate button
//! - Color select: the switch word picking the ball color
//! - Score display: the external numeric readout
//!
//! `memory` provides in-memory implementations for tests and the headless runner.

pub mod memory;

pub use memory::{FixedSwitches, MemoryDisplay, RecordingScoreDisplay, ScriptedInput};

use crate::color::Rgb565;

/// One of the two pixel buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferId {
    Primary,
    Secondary,
}

impl BufferId {
    pub fn other(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

/// Double-buffered raster display
pub trait Display {
    /// Select which buffer subsequent writes go to
    fn set_back_buffer(&mut self, buffer: BufferId);

    /// Present the back buffer. Blocks until the swap has completed, after
    /// which the previous front buffer is the new back buffer.
    fn swap_buffers(&mut self);

    /// Write one pixel to the back buffer. Callers clip to the screen first.
    fn write_pixel(&mut self, x: u16, y: u16, color: Rgb565);
}

/// Accelerate button
pub trait Input {
    /// Whether the button is currently held. Non-blocking.
    fn accelerate(&mut self) -> bool;
}

/// Color switches
pub trait ColorSelect {
    fn switches(&mut self) -> u32;
}

/// External score readout
pub trait ScoreDisplay {
    fn show(&mut self, score: u32);
}
