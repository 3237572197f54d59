//! Game state and scoring
//!
//! Everything a running game owns lives in [`World`]; the state machine in
//! `game` adds the phase and frame counters on top.

use serde::{Deserialize, Serialize};

use super::body::Body;
use super::indicator::Indicator;
use super::terrain::TerrainField;
use crate::color::DEFAULT_BALL_COLOR;
use crate::consts::*;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen with the bouncing preview ball
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, physics frozen
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Flew off a crest at top speed
    Crashed,
    /// Score reached the maximum
    ScoreCapped,
}

/// "+2500" overlay lifetime
///
/// The overlay is rasterized on the first two ticks (once into each buffer),
/// left alone for the rest of the countdown, and erased on two ticks after
/// it expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTimer {
    draw_ticks: u32,
    clear_ticks: u32,
}

impl BonusTimer {
    pub fn trigger(&mut self) {
        self.draw_ticks = BONUS_FRAMES;
    }

    /// Advance the countdown. Returns whether the overlay is drawn this tick.
    pub fn overlay_step(&mut self) -> bool {
        if self.draw_ticks == 0 {
            return false;
        }
        let draw = self.draw_ticks > BONUS_FRAMES - BONUS_DRAW_FRAMES;
        self.draw_ticks -= 1;
        if self.draw_ticks == 0 {
            self.clear_ticks = BONUS_CLEAR_FRAMES;
        }
        draw
    }

    /// Consume one pending clear. Returns whether the overlay region is erased this tick.
    pub fn take_clear(&mut self) -> bool {
        if self.clear_ticks == 0 {
            return false;
        }
        self.clear_ticks -= 1;
        true
    }

    /// Drop any running countdown and erase the region from both buffers
    pub fn schedule_clear(&mut self) {
        self.draw_ticks = 0;
        self.clear_ticks = BONUS_CLEAR_FRAMES;
    }

    /// Countdown running
    pub fn active(&self) -> bool {
        self.draw_ticks > 0
    }

    /// Whether the frame drawn last holds the overlay
    pub fn overlay_visible(&self) -> bool {
        self.draw_ticks > 0 || self.clear_ticks == BONUS_CLEAR_FRAMES
    }
}

/// Score and bonus bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub points: u32,
    pub bonus: BonusTimer,
}

impl ScoreState {
    /// Add the distance travelled this tick, truncating and saturating
    pub fn accrue(&mut self, dx: f32) {
        let next = (self.points as f64 + dx as f64).trunc();
        self.points = next.clamp(0.0, MAX_SCORE as f64) as u32;
    }

    /// Start the overlay countdown and award the bonus
    pub fn award_bonus(&mut self) {
        self.bonus.trigger();
        self.points = (self.points + BONUS_POINTS).min(MAX_SCORE);
    }

    pub fn is_saturated(&self) -> bool {
        self.points >= MAX_SCORE
    }

    pub fn reset(&mut self) {
        self.points = 0;
        self.bonus.schedule_clear();
    }
}

/// Everything simulated during a run
#[derive(Debug, Clone)]
pub struct World {
    pub terrain: TerrainField,
    pub body: Body,
    pub indicator: Indicator,
    pub score: ScoreState,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            terrain: TerrainField::new(seed),
            body: Body::spawn(DEFAULT_BALL_COLOR),
            indicator: Indicator::new(),
            score: ScoreState::default(),
        }
    }

    /// Fresh run: new terrain, ball back at spawn, score zeroed
    pub fn reset(&mut self) {
        self.terrain.reset();
        self.body.respawn();
        self.indicator.reset();
        self.score.reset();
    }
}
