//! Pixel primitives over a `Display` back buffer
//!
//! Every primitive takes an [`Ink`]: drawing uses a solid color, erasing
//! paints the background gradient back with the exact same pixel coverage.
//! Coordinates outside the screen are clipped silently.

use glam::IVec2;

use crate::color::{self, Rgb565};
use crate::consts::{RESOLUTION_X, RESOLUTION_Y};
use crate::in_bounds;
use crate::platform::Display;

/// What to paint covered pixels with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    Solid(Rgb565),
    /// The sky gradient (erase)
    Background,
}

impl Ink {
    #[inline]
    pub fn color_at(self, row: i32) -> Rgb565 {
        match self {
            Self::Solid(color) => color,
            Self::Background => color::background(row),
        }
    }
}

impl From<Rgb565> for Ink {
    fn from(color: Rgb565) -> Self {
        Self::Solid(color)
    }
}

/// Rasterizer writing into the display's back buffer
pub struct Canvas<'a> {
    display: &'a mut dyn Display,
}

impl<'a> Canvas<'a> {
    pub fn new(display: &'a mut dyn Display) -> Self {
        Self { display }
    }

    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, ink: Ink) {
        if in_bounds(x, y) {
            self.display.write_pixel(x as u16, y as u16, ink.color_at(y));
        }
    }

    /// Horizontal span, endpoints inclusive and in either order
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, ink: Ink) {
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        for x in lo..=hi {
            self.plot(x, y, ink);
        }
    }

    /// Vertical span, endpoints inclusive and in either order
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, ink: Ink) {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        for y in lo..=hi {
            self.plot(x, y, ink);
        }
    }

    /// Integer Bresenham line, endpoints inclusive
    pub fn line(&mut self, from: IVec2, to: IVec2, ink: Ink) {
        if from.x == to.x {
            return self.vline(from.x, from.y, to.y, ink);
        }
        if from.y == to.y {
            return self.hline(from.x, to.x, from.y, ink);
        }

        let steep = (to.y - from.y).abs() > (to.x - from.x).abs();
        let (mut a, mut b) = if steep {
            (IVec2::new(from.y, from.x), IVec2::new(to.y, to.x))
        } else {
            (from, to)
        };
        if a.x > b.x {
            std::mem::swap(&mut a, &mut b);
        }

        let dx = b.x - a.x;
        let dy = (b.y - a.y).abs();
        let step = if a.y < b.y { 1 } else { -1 };
        let mut error = -(dx / 2);
        let mut y = a.y;
        for x in a.x..=b.x {
            if steep {
                self.plot(y, x, ink);
            } else {
                self.plot(x, y, ink);
            }
            error += dy;
            if error >= 0 {
                y += step;
                error -= dx;
            }
        }
    }

    /// Filled rectangle, corners inclusive
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, ink: Ink) {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        for y in lo..=hi {
            self.hline(x0, x1, y, ink);
        }
    }

    /// Filled midpoint circle
    pub fn circle(&mut self, center: IVec2, radius: i32, ink: Ink) {
        let IVec2 { x: xc, y: yc } = center;
        let mut x = radius;
        let mut y = 0;
        self.hline(xc - x, xc + x, yc, ink);

        let mut p = 1 - radius;
        while x > y {
            y += 1;
            if p <= 0 {
                p += 2 * y + 1;
            } else {
                x -= 1;
                p += 2 * y - 2 * x + 1;
            }
            if x < y {
                break;
            }
            self.hline(xc - x, xc + x, yc + y, ink);
            self.hline(xc - x, xc + x, yc - y, ink);
            if x != y {
                self.hline(xc - y, xc + y, yc + x, ink);
                self.hline(xc - y, xc + y, yc - x, ink);
            }
        }
    }

    /// Filled isosceles triangle pointing up, `w + 1` rows tall below `tip`
    pub fn triangle(&mut self, tip: IVec2, h: i32, w: i32, ink: Ink) {
        if w <= 0 {
            return;
        }
        // Integer ratio; the widening rate is quantized
        let slope = (2 * h / w) as f32;
        for i in 0..=w {
            let dx = if slope > 0.0 {
                (i as f32 / slope).round() as i32
            } else {
                i
            };
            self.hline(tip.x - dx, tip.x + dx, tip.y + i, ink);
        }
    }

    /// Paint the whole back buffer with the sky gradient
    pub fn fill_background(&mut self) {
        self.fill_rect(0, 0, RESOLUTION_X - 1, RESOLUTION_Y - 1, Ink::Background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryDisplay;
    use proptest::prelude::*;
    use std::collections::HashSet;

    /// Pixels written by `draw`, as (x, y) pairs
    fn coverage(draw: impl FnOnce(&mut Canvas)) -> HashSet<(i32, i32)> {
        let mut display = MemoryDisplay::new();
        draw(&mut Canvas::new(&mut display));
        display.swap_buffers();
        let mut hit = HashSet::new();
        for y in 0..RESOLUTION_Y {
            for x in 0..RESOLUTION_X {
                if display.pixel(x, y) == Rgb565::WHITE {
                    hit.insert((x, y));
                }
            }
        }
        hit
    }

    const INK: Ink = Ink::Solid(Rgb565::WHITE);

    #[test]
    fn test_line_endpoints_and_length() {
        let px = coverage(|c| c.line(IVec2::new(10, 10), IVec2::new(20, 14), INK));
        assert!(px.contains(&(10, 10)));
        assert!(px.contains(&(20, 14)));
        assert_eq!(px.len(), 11);

        let steep = coverage(|c| c.line(IVec2::new(5, 30), IVec2::new(2, 10), INK));
        assert!(steep.contains(&(5, 30)) && steep.contains(&(2, 10)));
        assert_eq!(steep.len(), 21);
    }

    #[test]
    fn test_axis_lines_inclusive() {
        assert_eq!(coverage(|c| c.line(IVec2::new(7, 3), IVec2::new(7, 9), INK)).len(), 7);
        assert_eq!(coverage(|c| c.line(IVec2::new(9, 3), IVec2::new(2, 3), INK)).len(), 8);
    }

    #[test]
    fn test_circle_shape() {
        let px = coverage(|c| c.circle(IVec2::new(50, 50), 3, INK));
        // Diameter spans and symmetric coverage
        for d in -3..=3 {
            assert!(px.contains(&(50 + d, 50)));
            assert!(px.contains(&(50, 50 + d)));
        }
        assert!(!px.contains(&(53, 53)));
        for &(x, y) in &px {
            assert!(px.contains(&(100 - x, y)));
            assert!(px.contains(&(x, 100 - y)));
        }
    }

    #[test]
    fn test_triangle_widens_downward() {
        let px = coverage(|c| c.triangle(IVec2::new(40, 5), 10, 10, INK));
        assert!(px.contains(&(40, 5)));
        assert!(!px.contains(&(39, 5)));
        // Slope 2: half-width round(i / 2) on row i
        assert!(px.contains(&(35, 15)) && px.contains(&(45, 15)));
        assert!(!px.contains(&(34, 15)));
        assert!(!px.iter().any(|&(_, y)| y > 15));
    }

    #[test]
    fn test_clipping() {
        let px = coverage(|c| c.circle(IVec2::new(0, 0), 5, INK));
        assert!(px.iter().all(|&(x, y)| in_bounds(x, y)));
        assert!(px.contains(&(0, 0)));
        // Nothing at all for fully off-screen shapes
        assert!(coverage(|c| c.circle(IVec2::new(-50, -50), 5, INK)).is_empty());
    }

    #[test]
    fn test_background_ink_follows_gradient() {
        let mut display = MemoryDisplay::new();
        Canvas::new(&mut display).fill_background();
        display.swap_buffers();
        assert_eq!(display.pixel(0, 0), color::background(0));
        assert_eq!(display.pixel(100, 239), color::background(239));
    }

    proptest! {
        #[test]
        fn prop_erase_restores_background(x in -20i32..340, y in -20i32..260, r in 1i32..12) {
            let mut display = MemoryDisplay::new();
            let mut canvas = Canvas::new(&mut display);
            canvas.fill_background();
            let reference = {
                let mut fresh = MemoryDisplay::new();
                Canvas::new(&mut fresh).fill_background();
                fresh.back().to_vec()
            };
            canvas.circle(IVec2::new(x, y), r, INK);
            canvas.triangle(IVec2::new(x, y), r, r, INK);
            canvas.circle(IVec2::new(x, y), r, Ink::Background);
            canvas.triangle(IVec2::new(x, y), r, r, Ink::Background);
            prop_assert!(display.back() == reference.as_slice());
        }
    }
}
