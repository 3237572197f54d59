//! Off-screen arrow shown while the ball is above the top edge
//!
//! The arrow grows and shifts from white through yellow to red the
//! higher the ball flies.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::footprint::Footprints;
use crate::color::Rgb565;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    /// Arrow tip, fixed above the ball column
    pub tip: IVec2,
    /// Total arrow height in pixels
    pub size: i32,
    pub color: Rgb565,
    /// Sizes drawn in the last two ticks
    pub footprints: Footprints<i32>,
}

impl Default for Indicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator {
    pub fn new() -> Self {
        Self {
            tip: IVec2::new(BALL_X, ARROW_TIP_Y),
            size: MIN_ARROW_HEIGHT,
            color: Rgb565::WHITE,
            footprints: Footprints::default(),
        }
    }

    /// Track a ball whose center is at screen row `center_y`
    pub fn update(&mut self, center_y: i32, radius: i32) {
        let distance = -(center_y + radius);
        self.size = arrow_size(distance);
        self.color = warning_color(distance);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Arrow height for a ball `distance` pixels above the screen
pub fn arrow_size(distance: i32) -> i32 {
    let size = (distance as f32 * ARROW_SCALE + MIN_ARROW_HEIGHT as f32).round() as i32;
    size.clamp(MIN_ARROW_HEIGHT, MAX_ARROW_HEIGHT)
}

/// Blue drains first, then green, leaving pure red far above the screen
pub fn warning_color(distance: i32) -> Rgb565 {
    let mut blue = 31 - distance / 2;
    let mut green = 63;
    if blue < 0 {
        blue = 0;
        green = (63 - (distance - 62) / 2).max(0);
    }
    Rgb565::from_channels(31, green.min(63) as u8, blue.min(31) as u8)
}
