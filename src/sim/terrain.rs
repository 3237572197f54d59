//! Procedural dune terrain
//!
//! A handful of random sine segments are precomputed into one periodic
//! heightmap (the period buffer). The visible window is a screen-wide slice of
//! it selected by a wrapping scroll offset. The two previous windows are kept
//! so the renderer can diff against what the back buffer last held.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Number of visible terrain columns
pub const WINDOW_WIDTH: usize = RESOLUTION_X as usize;

/// Height used for "no terrain drawn yet": a surface flush with the bottom edge
pub const EMPTY_HEIGHT: i32 = RESOLUTION_Y;

/// Terrain surface at one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainSample {
    /// Screen row of the surface (rows grow downward)
    pub height: i32,
    /// Arctangent of the height derivative. Positive means the surface drops to the right.
    pub angle: f32,
}

impl TerrainSample {
    pub const EMPTY: Self = Self {
        height: EMPTY_HEIGHT,
        angle: 0.0,
    };

    /// Sample a sine dune of the given amplitude at `phase` columns into its period
    pub fn dune(amplitude: f32, phase: usize, baseline: f32) -> Self {
        let theta = TERRAIN_FREQUENCY * phase as f32;
        Self {
            height: (amplitude * theta.sin() + baseline) as i32,
            angle: (amplitude * TERRAIN_FREQUENCY * theta.cos()).atan(),
        }
    }
}

/// The full repeating heightmap
#[derive(Debug, Clone)]
pub struct PeriodBuffer {
    amplitudes: Vec<f32>,
    samples: Vec<TerrainSample>,
}

impl PeriodBuffer {
    /// Draw `NUM_SEGMENTS` random amplitudes and precompute every column
    pub fn generate(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let amplitudes: Vec<f32> = (0..NUM_SEGMENTS)
            .map(|_| rng.random_range(MIN_AMPLITUDE..MAX_AMPLITUDE))
            .collect();
        Self::from_amplitudes(&amplitudes)
    }

    /// Build from explicit segment amplitudes (one segment per entry)
    pub fn from_amplitudes(amplitudes: &[f32]) -> Self {
        let samples = (0..amplitudes.len() * SEGMENT_PERIOD)
            .map(|i| {
                TerrainSample::dune(
                    amplitudes[i / SEGMENT_PERIOD],
                    i % SEGMENT_PERIOD,
                    TERRAIN_BASELINE,
                )
            })
            .collect();
        Self {
            amplitudes: amplitudes.to_vec(),
            samples,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn amplitudes(&self) -> &[f32] {
        &self.amplitudes
    }

    /// Sample at any index, wrapping around the period
    #[inline]
    pub fn sample(&self, index: usize) -> TerrainSample {
        self.samples[index % self.samples.len()]
    }
}

/// A screen-wide slice of terrain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainWindow {
    samples: Vec<TerrainSample>,
}

impl TerrainWindow {
    /// A window with no terrain on screen
    pub fn empty() -> Self {
        Self {
            samples: vec![TerrainSample::EMPTY; WINDOW_WIDTH],
        }
    }

    /// Build a window column by column
    pub fn from_fn(f: impl FnMut(usize) -> TerrainSample) -> Self {
        Self {
            samples: (0..WINDOW_WIDTH).map(f).collect(),
        }
    }

    /// The window starting at `origin` in the period buffer
    pub fn slice(period: &PeriodBuffer, origin: usize) -> Self {
        Self::from_fn(|x| period.sample(origin + x))
    }

    /// Sample at a screen column. Off-screen columns clamp to the nearest edge.
    #[inline]
    pub fn sample(&self, column: i32) -> TerrainSample {
        let column = column.clamp(0, WINDOW_WIDTH as i32 - 1) as usize;
        self.samples[column]
    }

    #[inline]
    pub fn height(&self, column: i32) -> i32 {
        self.sample(column).height
    }

    #[inline]
    pub fn angle(&self, column: i32) -> f32 {
        self.sample(column).angle
    }

    pub fn samples(&self) -> &[TerrainSample] {
        &self.samples
    }
}

/// Scrolling terrain with a two-window history
#[derive(Debug, Clone)]
pub struct TerrainField {
    rng: Pcg32,
    seed: u64,
    period: PeriodBuffer,
    /// Scroll position in columns, always in `[0, period length)`
    offset: f32,
    current: TerrainWindow,
    one_ago: TerrainWindow,
    two_ago: TerrainWindow,
}

impl TerrainField {
    /// Generate terrain for a run seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain_seed = rng.random();
        Self::from_parts(rng, terrain_seed, PeriodBuffer::generate(terrain_seed))
    }

    /// Use a prebuilt period buffer (tests, canned layouts)
    pub fn with_period(period: PeriodBuffer) -> Self {
        Self::from_parts(Pcg32::seed_from_u64(0), 0, period)
    }

    fn from_parts(rng: Pcg32, seed: u64, period: PeriodBuffer) -> Self {
        Self {
            rng,
            seed,
            period,
            offset: 0.0,
            current: TerrainWindow::empty(),
            one_ago: TerrainWindow::empty(),
            two_ago: TerrainWindow::empty(),
        }
    }

    /// Regenerate the period buffer and forget all drawn windows
    pub fn reset(&mut self) {
        self.seed = self.rng.random();
        self.period = PeriodBuffer::generate(self.seed);
        log::debug!(
            "Terrain regenerated (seed {}, amplitudes {:?})",
            self.seed,
            self.period.amplitudes()
        );
        self.clear_history();
    }

    fn clear_history(&mut self) {
        self.offset = 0.0;
        self.current = TerrainWindow::empty();
        self.one_ago = TerrainWindow::empty();
        self.two_ago = TerrainWindow::empty();
    }

    /// Scroll by `delta` columns (either sign) and resample the visible window
    pub fn advance(&mut self, delta: f32) -> &TerrainWindow {
        let len = self.period.len() as f32;
        let mut offset = (self.offset + delta).rem_euclid(len);
        // rem_euclid can round up to exactly `len` for tiny negative inputs
        if !(0.0..len).contains(&offset) {
            offset = 0.0;
        }
        self.offset = offset;

        let next = TerrainWindow::slice(&self.period, self.origin());
        let previous = std::mem::replace(&mut self.current, next);
        self.two_ago = std::mem::replace(&mut self.one_ago, previous);
        &self.current
    }

    /// Scroll offset in columns
    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Period index of screen column 0
    #[inline]
    pub fn origin(&self) -> usize {
        self.offset as usize
    }

    /// Seed the current period buffer was generated from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn period(&self) -> &PeriodBuffer {
        &self.period
    }

    pub fn current(&self) -> &TerrainWindow {
        &self.current
    }

    pub fn one_tick_ago(&self) -> &TerrainWindow {
        &self.one_ago
    }

    pub fn two_ticks_ago(&self) -> &TerrainWindow {
        &self.two_ago
    }
}
