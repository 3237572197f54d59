//! Game entities drawn from primitives
//!
//! Draw and erase pairs share coverage: erasing is the same routine with
//! [`Ink::Background`], so anything drawn two ticks ago can be removed exactly.

use glam::IVec2;

use super::canvas::{Canvas, Ink};
use super::font::{self, ADVANCE};
use crate::color::{CHROME_COLOR, TERRAIN_COLOR};
use crate::consts::*;
use crate::sim::{TerrainWindow, World};

const SAND: Ink = Ink::Solid(TERRAIN_COLOR);
const CHROME: Ink = Ink::Solid(CHROME_COLOR);

/// Top-left of the start prompt on the title screen
pub const START_PROMPT: IVec2 = IVec2::new(83, 120);
/// Top-left of the start prompt on the game over screen
pub const RESTART_PROMPT: IVec2 = IVec2::new(83, 80);
pub const GAME_OVER_BANNER: IVec2 = IVec2::new(130, 40);
pub const PROMPT_TEXT: &str = "PRESS 'SPACE' TO START";

/// Ball as a filled circle
pub fn ball(canvas: &mut Canvas, center: IVec2, radius: i32, ink: Ink) {
    canvas.circle(center, radius, ink);
}

/// Upward arrow: a triangle head over a narrow shaft, `size` pixels tall in total
pub fn arrow(canvas: &mut Canvas, tip: IVec2, size: i32, ink: Ink) {
    let half = size / 2;
    canvas.triangle(tip, half, half, ink);
    if half > 0 {
        let shaft = half / 5;
        canvas.fill_rect(tip.x - shaft, tip.y + half, tip.x + shaft, tip.y + 2 * half - 1, ink);
    }
}

/// Bring one buffer's terrain from `old` to `current` with per-column spans.
///
/// Where the surface dropped the exposed band is erased; where it rose the
/// newly covered band is painted. A column never gets both.
pub fn terrain_delta(canvas: &mut Canvas, current: &TerrainWindow, old: &TerrainWindow) {
    for (x, (now, before)) in current.samples().iter().zip(old.samples()).enumerate() {
        let x = x as i32;
        let (new_h, old_h) = (now.height, before.height);
        if new_h > old_h {
            canvas.vline(x, old_h, new_h - 1, Ink::Background);
        } else if new_h < old_h {
            canvas.vline(x, new_h, old_h - 1, SAND);
        }
    }
}

/// Sand from the surface to the bottom edge for columns `x0..=x1`
pub fn terrain_strip(canvas: &mut Canvas, window: &TerrainWindow, x0: i32, x1: i32) {
    for x in x0..=x1 {
        let top = window.height(x);
        if top < RESOLUTION_Y {
            canvas.vline(x, top, RESOLUTION_Y - 1, SAND);
        }
    }
}

/// The strip under the ball, damaged by ball erases every tick
pub fn terrain_under_ball(canvas: &mut Canvas, window: &TerrainWindow) {
    terrain_strip(canvas, window, BALL_X - BALL_RADIUS, BALL_X + BALL_RADIUS);
}

pub fn terrain_full(canvas: &mut Canvas, window: &TerrainWindow) {
    terrain_strip(canvas, window, 0, RESOLUTION_X - 1);
}

pub fn score_line(canvas: &mut Canvas) {
    canvas.hline(0, RESOLUTION_X - 1, SCORE_LINE_Y, CHROME);
}

pub fn score_text(points: u32) -> String {
    format!("SCORE:{points}")
}

/// "SCORE:<n>" right-aligned to the top-right corner
pub fn score_readout(canvas: &mut Canvas, points: u32) {
    let text = score_text(points);
    let last = RESOLUTION_X - 11;
    let x = last - (text.chars().count() as i32 - 1) * ADVANCE;
    font::draw_text(canvas, &text, IVec2::new(x, 5), CHROME);
}

/// Erase the whole score readout region
pub fn erase_score(canvas: &mut Canvas) {
    canvas.fill_rect(RESOLUTION_X - 92, 5, RESOLUTION_X - 4, 15, Ink::Background);
}

pub fn bonus(canvas: &mut Canvas) {
    let text = format!("+{BONUS_POINTS}");
    font::draw_text(canvas, &text, IVec2::new(BONUS_X, BONUS_Y), CHROME);
}

pub fn erase_bonus(canvas: &mut Canvas) {
    canvas.fill_rect(BONUS_X, BONUS_Y, BONUS_X + 40, BONUS_Y + 10, Ink::Background);
}

pub fn prompt(canvas: &mut Canvas, origin: IVec2) {
    font::draw_text(canvas, PROMPT_TEXT, origin, CHROME);
}

pub fn game_over_banner(canvas: &mut Canvas) {
    font::draw_text(canvas, "GAME OVER", GAME_OVER_BANNER, CHROME);
}

pub fn title(canvas: &mut Canvas) {
    font::draw_title(canvas, CHROME);
}

/// Paint a complete play frame from scratch
pub fn redraw(canvas: &mut Canvas, world: &World) {
    canvas.fill_background();
    terrain_full(canvas, world.terrain.current());
    score_line(canvas);
    score_readout(canvas, world.score.points);
    let body = &world.body;
    if body.visible() {
        ball(canvas, body.screen_center(), body.radius, body.color.into());
    } else {
        let arrow_state = &world.indicator;
        arrow(canvas, arrow_state.tip, arrow_state.size, arrow_state.color.into());
    }
    if world.score.bonus.overlay_visible() {
        bonus(canvas);
    }
}
