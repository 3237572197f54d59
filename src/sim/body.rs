//! The ball
//!
//! During play the ball never moves horizontally on screen: its `dx` scrolls
//! the terrain instead. Only the start screen preview moves it sideways.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::contact::{self, ContactRule, Throttle};
use super::footprint::Footprints;
use super::terrain::TerrainWindow;
use crate::color::Rgb565;
use crate::consts::*;
use crate::in_y_bounds;

/// What happened to the ball in one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Contact rule applied, if the ball touched the terrain
    pub contact: Option<ContactRule>,
    /// Left a crest at top speed
    pub launched: bool,
}

/// The ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: i32,
    pub color: Rgb565,
    /// Centers drawn in the last two ticks
    pub footprints: Footprints<IVec2>,
}

impl Body {
    /// A ball at rest at the spawn point
    pub fn spawn(color: Rgb565) -> Self {
        Self {
            pos: Vec2::new(BALL_X as f32, BALL_Y),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            color,
            footprints: Footprints::default(),
        }
    }

    /// Screen column of the center
    #[inline]
    pub fn column(&self) -> i32 {
        self.pos.x as i32
    }

    /// Pixel the ball is drawn around
    #[inline]
    pub fn screen_center(&self) -> IVec2 {
        IVec2::new(self.column(), self.pos.y.round() as i32)
    }

    /// Whether the ball is drawn this tick (otherwise the arrow is)
    #[inline]
    pub fn visible(&self) -> bool {
        in_y_bounds(self.screen_center().y + self.radius)
    }

    /// Highest terrain surface (smallest row) under the ball's width
    pub fn contact_height(&self, window: &TerrainWindow) -> i32 {
        let x = self.column();
        (x - self.radius..=x + self.radius)
            .map(|column| window.height(column))
            .min()
            .unwrap_or(RESOLUTION_Y)
    }

    pub fn is_touching(&self, window: &TerrainWindow) -> bool {
        self.pos.y + self.radius as f32 > self.contact_height(window) as f32
            || self.pos.y > RESOLUTION_Y as f32
    }

    /// Move the ball up to sit on the terrain
    pub fn rest_on(&mut self, window: &TerrainWindow) {
        self.pos.y = (self.contact_height(window) - self.radius) as f32;
    }

    /// Integrate one tick against the visible terrain
    pub fn step(&mut self, window: &TerrainWindow, throttle: Throttle) -> StepOutcome {
        let accel = throttle.acceleration();
        self.pos.y += self.vel.y + 0.5 * accel;

        if !self.is_touching(window) {
            self.vel.y += 0.5 * accel;
            return StepOutcome {
                contact: None,
                launched: false,
            };
        }

        self.rest_on(window);
        let slope = window.angle(self.column());
        let (rule, outcome) = contact::resolve(self.vel, slope, throttle);
        log::trace!(
            "contact {:?}: slope {:.3}, vel {:?} -> {:?}",
            rule,
            slope,
            self.vel,
            outcome.vel
        );
        self.vel = outcome.vel;

        StepOutcome {
            contact: Some(rule),
            launched: outcome.launched,
        }
    }

    /// Back to the spawn point, keeping the color
    pub fn respawn(&mut self) {
        *self = Self::spawn(self.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::terrain::TerrainSample;

    fn flat(height: i32) -> TerrainWindow {
        TerrainWindow::from_fn(|_| TerrainSample { height, angle: 0.0 })
    }

    #[test]
    fn test_spawn_position() {
        let body = Body::spawn(Rgb565::GREEN);
        assert_eq!(body.screen_center(), IVec2::new(BALL_X, BALL_Y as i32));
        assert_eq!(body.vel, Vec2::ZERO);
        assert!(body.visible());
    }

    #[test]
    fn test_falls_freely_in_air() {
        let mut body = Body::spawn(Rgb565::RED);
        let out = body.step(&flat(200), Throttle::Coast);
        assert_eq!(out.contact, None);
        assert_eq!(body.pos.y, BALL_Y + 0.5);
        assert_eq!(body.vel.y, 0.5);
        body.step(&flat(200), Throttle::Boost);
        assert_eq!(body.pos.y, BALL_Y + 0.5 + 0.5 + 1.5);
        assert_eq!(body.vel.y, 2.0);
    }

    #[test]
    fn test_contact_uses_highest_sample_under_width() {
        let window = TerrainWindow::from_fn(|x| TerrainSample {
            height: if x as i32 == BALL_X + BALL_RADIUS { 100 } else { 150 },
            angle: 0.0,
        });
        let mut body = Body::spawn(Rgb565::RED);
        body.pos.y = 99.0;
        assert_eq!(body.contact_height(&window), 100);
        assert!(body.is_touching(&window));
        body.step(&window, Throttle::Coast);
        assert_eq!(body.pos.y, (100 - BALL_RADIUS) as f32);
    }

    #[test]
    fn test_below_screen_counts_as_touching() {
        let mut body = Body::spawn(Rgb565::RED);
        body.pos.y = RESOLUTION_Y as f32 + 1.0;
        assert!(body.is_touching(&TerrainWindow::empty()));
    }

    #[test]
    fn test_rest_on_flat_keeps_moving_forward() {
        let mut body = Body::spawn(Rgb565::RED);
        body.pos.y = (150 - BALL_RADIUS) as f32;
        let out = body.step(&flat(150), Throttle::Coast);
        assert_eq!(out.contact, Some(ContactRule::FlatBounce));
        assert!(!out.launched);
        // Rebuilt from speed and travel angle, so allow rounding
        assert!((body.vel.y - MIN_ACCELERATION).abs() < 1e-4);
        assert!(body.vel.x >= MIN_ACCELERATION - 1e-4);
    }

    #[test]
    fn test_above_screen_hides_ball() {
        let mut body = Body::spawn(Rgb565::RED);
        body.pos.y = -10.0;
        assert!(!body.visible());
        body.pos.y = -(BALL_RADIUS as f32);
        assert!(body.visible());
    }

    #[test]
    fn test_respawn_keeps_color() {
        let mut body = Body::spawn(Rgb565::CYAN);
        body.pos = Vec2::new(40.0, -80.0);
        body.vel = Vec2::new(3.0, 4.0);
        body.footprints.record(Some(IVec2::ONE));
        body.respawn();
        assert_eq!(body, Body::spawn(Rgb565::CYAN));
    }
}
