//! Dune and ball simulation
//!
//! Terrain, ball physics and scoring, stepped once per displayed frame. Nothing
//! here draws or touches a peripheral, and the only randomness is the seeded
//! terrain generator, so a seed plus an input sequence replays exactly.

pub mod body;
pub mod contact;
pub mod footprint;
pub mod indicator;
pub mod preview;
pub mod state;
pub mod terrain;
pub mod tick;

pub use body::{Body, StepOutcome};
pub use contact::{ContactKey, ContactOutcome, ContactRule, Slope, Throttle, Travel, travel_angle};
pub use footprint::Footprints;
pub use indicator::{Indicator, arrow_size, warning_color};
pub use preview::{Preview, canned_window};
pub use state::{BonusTimer, GameOverReason, Phase, ScoreState, World};
pub use terrain::{PeriodBuffer, TerrainField, TerrainSample, TerrainWindow};
pub use tick::{TickInput, TickReport, tick};
