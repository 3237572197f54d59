//! Start screen attract animation
//!
//! A ball bouncing over a fixed, short dune layout. It uses a simpler motion
//! model than play: the ball actually moves across the screen, follows the
//! slope while touching, and respawns at the top when it leaves the screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::terrain::{TerrainSample, TerrainWindow};
use crate::color::Rgb565;
use crate::consts::*;
use crate::in_bounds;

/// The canned start screen terrain: a tall dune then a short one
pub fn canned_window() -> TerrainWindow {
    TerrainWindow::from_fn(|x| {
        let amplitude = if x <= SEGMENT_PERIOD {
            PREVIEW_TALL_AMPLITUDE
        } else {
            PREVIEW_SHORT_AMPLITUDE
        };
        TerrainSample::dune(amplitude, x, PREVIEW_BASELINE)
    })
}

/// Preview state, owned by the game for the life of the start screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    pub window: TerrainWindow,
    pub body: Body,
}

impl Default for Preview {
    fn default() -> Self {
        Self::new()
    }
}

impl Preview {
    pub fn new() -> Self {
        Self {
            window: canned_window(),
            body: Body::spawn(Rgb565::WHITE),
        }
    }

    /// Advance the preview ball by one tick
    pub fn step(&mut self) {
        let accel = MIN_ACCELERATION;
        let body = &mut self.body;

        if body.is_touching(&self.window) {
            body.rest_on(&self.window);
            let angle = self.window.angle(body.column());
            let speed = (body.vel.length() * angle.cos()).min(MAX_SPEED);
            body.vel = Vec2::from_angle(angle) * speed;
            body.pos.y += body.vel.y + 0.5 * accel;
        } else {
            body.pos.y += body.vel.y.trunc() + 0.5 * accel;
            body.vel.y += accel;
        }
        body.pos.x += body.vel.x;

        let center = body.screen_center();
        if !in_bounds(center.x, center.y) {
            let speed = body.vel.length().min(MAX_SPEED);
            body.pos = Vec2::new(BALL_X as f32, 0.0);
            body.vel = Vec2::new(0.0, speed);
        }
    }
}
