//! Software rendering module
//!
//! Nothing is ever cleared wholesale during play. Each tick erases what the
//! back buffer held two ticks ago and draws the new frame over it.

pub mod canvas;
pub mod font;
pub mod scene;

pub use canvas::{Canvas, Ink};
