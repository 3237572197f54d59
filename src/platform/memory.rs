//! In-memory collaborators
//!
//! Used by the headless runner and by tests that compare rendered frames.

use super::{BufferId, ColorSelect, Display, Input, ScoreDisplay};
use crate::color::Rgb565;
use crate::consts::{RESOLUTION_X, RESOLUTION_Y};

const WIDTH: usize = RESOLUTION_X as usize;
const HEIGHT: usize = RESOLUTION_Y as usize;

/// Two RGB565 frame buffers in memory
#[derive(Debug, Clone)]
pub struct MemoryDisplay {
    buffers: [Vec<Rgb565>; 2],
    front: BufferId,
    back: BufferId,
    swaps: u64,
    writes: u64,
}

impl Default for MemoryDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDisplay {
    /// Both buffers black, writes going to the primary buffer
    pub fn new() -> Self {
        Self {
            buffers: [
                vec![Rgb565::BLACK; WIDTH * HEIGHT],
                vec![Rgb565::BLACK; WIDTH * HEIGHT],
            ],
            front: BufferId::Secondary,
            back: BufferId::Primary,
            swaps: 0,
            writes: 0,
        }
    }

    fn slot(buffer: BufferId) -> usize {
        match buffer {
            BufferId::Primary => 0,
            BufferId::Secondary => 1,
        }
    }

    pub fn buffer(&self, buffer: BufferId) -> &[Rgb565] {
        &self.buffers[Self::slot(buffer)]
    }

    /// The frame currently presented
    pub fn front(&self) -> &[Rgb565] {
        self.buffer(self.front)
    }

    /// The frame being drawn
    pub fn back(&self) -> &[Rgb565] {
        self.buffer(self.back)
    }

    pub fn front_id(&self) -> BufferId {
        self.front
    }

    pub fn back_id(&self) -> BufferId {
        self.back
    }

    /// Pixel of the presented frame (black when off-screen)
    pub fn pixel(&self, x: i32, y: i32) -> Rgb565 {
        if !crate::in_bounds(x, y) {
            return Rgb565::BLACK;
        }
        self.front()[y as usize * WIDTH + x as usize]
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    /// Pixel writes since construction or the last `reset_writes`
    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn reset_writes(&mut self) {
        self.writes = 0;
    }
}

impl Display for MemoryDisplay {
    fn set_back_buffer(&mut self, buffer: BufferId) {
        self.back = buffer;
        self.front = buffer.other();
    }

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
        self.swaps += 1;
    }

    fn write_pixel(&mut self, x: u16, y: u16, color: Rgb565) {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return;
        }
        let slot = Self::slot(self.back);
        self.buffers[slot][y * WIDTH + x] = color;
        self.writes += 1;
    }
}

/// Replays a fixed sequence of button states, one per poll
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    script: Vec<bool>,
    cursor: usize,
    repeat: bool,
}

impl ScriptedInput {
    /// Play the script once, then report released forever
    pub fn once(script: Vec<bool>) -> Self {
        Self {
            script,
            cursor: 0,
            repeat: false,
        }
    }

    /// Loop the script
    pub fn repeating(script: Vec<bool>) -> Self {
        Self {
            script,
            cursor: 0,
            repeat: true,
        }
    }
}

impl Input for ScriptedInput {
    fn accelerate(&mut self) -> bool {
        if self.repeat && self.cursor >= self.script.len() {
            self.cursor = 0;
        }
        let held = self.script.get(self.cursor).copied().unwrap_or(false);
        self.cursor += 1;
        held
    }
}

/// Switch word that never changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedSwitches(pub u32);

impl ColorSelect for FixedSwitches {
    fn switches(&mut self) -> u32 {
        self.0
    }
}

/// Keeps every score it was asked to show
#[derive(Debug, Clone, Default)]
pub struct RecordingScoreDisplay {
    pub shown: Vec<u32>,
}

impl RecordingScoreDisplay {
    pub fn last(&self) -> Option<u32> {
        self.shown.last().copied()
    }
}

impl ScoreDisplay for RecordingScoreDisplay {
    fn show(&mut self, score: u32) {
        self.shown.push(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_go_to_back_buffer() {
        let mut display = MemoryDisplay::new();
        display.write_pixel(3, 4, Rgb565::RED);
        assert_eq!(display.pixel(3, 4), Rgb565::BLACK);
        display.swap_buffers();
        assert_eq!(display.pixel(3, 4), Rgb565::RED);
        assert_eq!(display.back_id(), BufferId::Secondary);
        assert_eq!(display.swaps(), 1);
    }

    #[test]
    fn test_out_of_range_writes_ignored() {
        let mut display = MemoryDisplay::new();
        display.write_pixel(RESOLUTION_X as u16, 0, Rgb565::RED);
        display.write_pixel(0, u16::MAX, Rgb565::RED);
        assert_eq!(display.writes(), 0);
    }

    #[test]
    fn test_set_back_buffer() {
        let mut display = MemoryDisplay::new();
        display.set_back_buffer(BufferId::Secondary);
        display.write_pixel(0, 0, Rgb565::GREEN);
        assert_eq!(display.buffer(BufferId::Secondary)[0], Rgb565::GREEN);
        assert_eq!(display.buffer(BufferId::Primary)[0], Rgb565::BLACK);
        assert_eq!(display.front_id(), BufferId::Primary);
    }

    #[test]
    fn test_scripted_input() {
        let mut once = ScriptedInput::once(vec![true, false, true]);
        let polled: Vec<bool> = (0..5).map(|_| once.accelerate()).collect();
        assert_eq!(polled, [true, false, true, false, false]);

        let mut looped = ScriptedInput::repeating(vec![true, false]);
        let polled: Vec<bool> = (0..5).map(|_| looped.accelerate()).collect();
        assert_eq!(polled, [true, false, true, false, true]);

        assert!(!ScriptedInput::default().accelerate());
    }
}
