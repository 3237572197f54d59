//! Dune Roll - a ball rolling over endless dunes
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, ball physics, scoring)
//! - `renderer`: Incremental software rasterizer for the double-buffered display
//! - `platform`: Display/input/switch/score collaborators and in-memory doubles
//! - `game`: Start / Playing / GameOver state machine driving the frame loop

pub mod color;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use color::Rgb565;
pub use game::{Game, Peripherals};

/// Game configuration constants
pub mod consts {
    /// Fixed design resolution of the display
    pub const RESOLUTION_X: i32 = 320;
    pub const RESOLUTION_Y: i32 = 240;

    /// Ball defaults. The ball's screen column never changes; the dunes scroll under it.
    pub const BALL_X: i32 = 20;
    pub const BALL_Y: f32 = 10.0;
    pub const BALL_RADIUS: i32 = 3;
    /// Hard cap on ball speed after every terrain contact
    pub const MAX_SPEED: f32 = 25.0;
    /// Acceleration while the accelerate input is held
    pub const MAX_ACCELERATION: f32 = 3.0;
    /// Acceleration while coasting
    pub const MIN_ACCELERATION: f32 = 1.0;
    /// Horizontal velocity given to a ball stalled on a rising slope
    pub const STALL_NUDGE_DX: f32 = -1.0;

    /// Terrain generation
    pub const NUM_SEGMENTS: usize = 15;
    /// One full sine period per segment; half the screen width
    pub const SEGMENT_PERIOD: usize = 160;
    pub const PERIOD_LENGTH: usize = NUM_SEGMENTS * SEGMENT_PERIOD;
    pub const TERRAIN_BASELINE: f32 = 180.0;
    pub const MIN_AMPLITUDE: f32 = 10.0;
    pub const MAX_AMPLITUDE: f32 = 50.0;
    /// Two full segment periods on screen at all times
    pub const TERRAIN_FREQUENCY: f32 = std::f32::consts::PI / 80.0;

    /// Start screen preview terrain
    pub const PREVIEW_BASELINE: f32 = 200.0;
    pub const PREVIEW_TALL_AMPLITUDE: f32 = 20.0;
    pub const PREVIEW_SHORT_AMPLITUDE: f32 = 10.0;

    /// Off-screen arrow: size grows by ARROW_SCALE per pixel above the screen
    pub const ARROW_SCALE: f32 = 0.3;
    pub const MIN_ARROW_HEIGHT: i32 = 20;
    pub const MAX_ARROW_HEIGHT: i32 = 60;
    pub const ARROW_TIP_Y: i32 = 5;

    /// Crossing this row upward awards the bonus
    pub const SCORE_LINE_Y: i32 = 60;
    pub const MAX_SCORE: u32 = 999_999;
    pub const BONUS_POINTS: u32 = 2500;
    /// Bonus overlay lifetime in ticks (must be greater than 2)
    pub const BONUS_FRAMES: u32 = 12;
    /// Ticks the overlay is actually rasterized (once into each buffer)
    pub const BONUS_DRAW_FRAMES: u32 = 2;
    /// Ticks the overlay region is erased after it expires (once in each buffer)
    pub const BONUS_CLEAR_FRAMES: u32 = 2;
    pub const BONUS_X: i32 = BALL_X + MAX_ARROW_HEIGHT / 2;
    pub const BONUS_Y: i32 = SCORE_LINE_Y - 15;

    /// Frames the game over screen must be shown before a press restarts
    pub const RESTART_GATE_FRAMES: u32 = 3;
}

/// Whether a column lies on screen
#[inline]
pub fn in_x_bounds(x: i32) -> bool {
    (0..consts::RESOLUTION_X).contains(&x)
}

/// Whether a row lies on screen
#[inline]
pub fn in_y_bounds(y: i32) -> bool {
    (0..consts::RESOLUTION_Y).contains(&y)
}

/// Whether a pixel coordinate lies on screen
#[inline]
pub fn in_bounds(x: i32, y: i32) -> bool {
    in_x_bounds(x) && in_y_bounds(y)
}
