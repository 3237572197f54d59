//! Stroke font and title lettering
//!
//! Glyphs are 6x11 cells built from a few line strokes, advanced 7 pixels
//! per character. Only the characters the game prints are defined; anything
//! else (including space) just advances the pen.

use glam::IVec2;

use super::canvas::{Canvas, Ink};

/// Horizontal pen advance per character
pub const ADVANCE: i32 = 7;
/// Glyph cell height
pub const GLYPH_HEIGHT: i32 = 11;

type Stroke = [i32; 4];

const P: &[Stroke] = &[[0, 0, 0, 10], [0, 0, 5, 0], [0, 5, 5, 5], [5, 0, 5, 5]];
const R: &[Stroke] = &[
    [0, 0, 0, 10],
    [0, 0, 5, 0],
    [0, 5, 5, 5],
    [5, 0, 5, 5],
    [0, 5, 5, 10],
];
const E: &[Stroke] = &[[0, 0, 0, 10], [0, 0, 5, 0], [0, 5, 5, 5], [0, 10, 5, 10]];
const S: &[Stroke] = &[
    [0, 0, 0, 5],
    [0, 0, 5, 0],
    [0, 5, 5, 5],
    [0, 10, 5, 10],
    [5, 5, 5, 10],
];
const A: &[Stroke] = &[[0, 0, 0, 10], [5, 0, 5, 10], [0, 0, 5, 0], [0, 5, 5, 5]];
const C: &[Stroke] = &[[0, 0, 0, 10], [0, 0, 5, 0], [0, 10, 5, 10]];
const T: &[Stroke] = &[[0, 0, 5, 0], [2, 0, 2, 10]];
const O: &[Stroke] = &[[0, 0, 0, 10], [0, 0, 5, 0], [0, 10, 5, 10], [5, 0, 5, 10]];
const QUOTE: &[Stroke] = &[[1, 0, 1, 2], [3, 0, 3, 2]];
const N: &[Stroke] = &[[0, 0, 0, 10], [5, 0, 5, 10], [0, 0, 5, 10]];
const G: &[Stroke] = &[
    [0, 0, 0, 10],
    [0, 0, 5, 0],
    [3, 5, 5, 5],
    [0, 10, 5, 10],
    [5, 5, 5, 10],
];
const M: &[Stroke] = &[[0, 0, 0, 10], [5, 0, 5, 10], [0, 0, 2, 5], [3, 5, 5, 0]];
const V: &[Stroke] = &[[0, 0, 2, 10], [3, 10, 5, 0]];
const I: &[Stroke] = &[[2, 0, 2, 10], [0, 0, 5, 0], [0, 10, 5, 10]];
const COLON: &[Stroke] = &[[1, 2, 1, 4], [2, 2, 2, 4], [1, 6, 1, 8], [2, 6, 2, 8]];
const PLUS: &[Stroke] = &[[0, 3, 5, 3], [3, 1, 3, 6]];
const ONE: &[Stroke] = &[[2, 0, 2, 10], [0, 2, 2, 0], [0, 10, 5, 10]];
const TWO: &[Stroke] = &[
    [5, 0, 5, 5],
    [0, 0, 5, 0],
    [0, 5, 5, 5],
    [0, 10, 5, 10],
    [0, 5, 0, 10],
];
const THREE: &[Stroke] = &[[5, 0, 5, 10], [0, 0, 5, 0], [0, 5, 5, 5], [0, 10, 5, 10]];
const FOUR: &[Stroke] = &[[5, 0, 5, 10], [0, 0, 0, 5], [0, 5, 5, 5]];
const SIX: &[Stroke] = &[
    [0, 0, 0, 10],
    [0, 0, 5, 0],
    [0, 5, 5, 5],
    [0, 10, 5, 10],
    [5, 5, 5, 10],
];
const SEVEN: &[Stroke] = &[[5, 0, 5, 10], [0, 0, 0, 5], [0, 0, 5, 0]];
const EIGHT: &[Stroke] = &[
    [0, 0, 0, 10],
    [5, 0, 5, 10],
    [0, 0, 5, 0],
    [0, 5, 5, 5],
    [0, 10, 5, 10],
];
const NINE: &[Stroke] = &[
    [0, 0, 0, 5],
    [5, 0, 5, 10],
    [0, 0, 5, 0],
    [0, 5, 5, 5],
    [0, 10, 5, 10],
];

/// Strokes for a character, relative to its top-left corner
pub fn glyph(c: char) -> &'static [Stroke] {
    match c {
        'P' => P,
        'R' => R,
        'E' => E,
        'S' | '5' => S,
        'A' => A,
        'C' => C,
        'T' => T,
        'O' | '0' => O,
        '\'' => QUOTE,
        'N' => N,
        'G' => G,
        'M' => M,
        'V' => V,
        'I' => I,
        ':' => COLON,
        '+' => PLUS,
        '1' => ONE,
        '2' => TWO,
        '3' => THREE,
        '4' => FOUR,
        '6' => SIX,
        '7' => SEVEN,
        '8' => EIGHT,
        '9' => NINE,
        _ => &[],
    }
}

/// Width of `text` in pixels, counting the trailing advance
pub fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * ADVANCE
}

/// Draw `text` with its first cell's top-left corner at `origin`
pub fn draw_text(canvas: &mut Canvas, text: &str, origin: IVec2, ink: Ink) {
    let mut pen = origin;
    for c in text.chars() {
        for &[x0, y0, x1, y1] in glyph(c) {
            canvas.line(pen + IVec2::new(x0, y0), pen + IVec2::new(x1, y1), ink);
        }
        pen.x += ADVANCE;
    }
}

/// The big "DUNE" logo on the start screen
pub fn draw_title(canvas: &mut Canvas, ink: Ink) {
    const TOP: i32 = 24;
    const BOTTOM: i32 = 106;
    const MIDDLE: i32 = 65;

    // D: half disc with a smaller half disc cut out
    for y in 0..=42 {
        let x = ((1764 - y * y) as f32).sqrt() as i32;
        canvas.hline(60, 60 + x, MIDDLE + y, ink);
        canvas.hline(60, 60 + x, MIDDLE - y, ink);
    }
    for y in 0..=28 {
        let x = ((784 - y * y) as f32).sqrt() as i32;
        canvas.hline(67, 67 + x, MIDDLE + y, Ink::Background);
        canvas.hline(67, 67 + x, MIDDLE - y, Ink::Background);
    }

    // U
    for x in (113..=120).chain(148..=155) {
        canvas.vline(x, TOP, BOTTOM, ink);
    }
    for x in 121..148 {
        canvas.vline(x, 99, BOTTOM, ink);
    }

    // N
    for x in (165..=172).chain(200..=207) {
        canvas.vline(x, TOP, BOTTOM, ink);
    }
    for i in 0..=7 {
        canvas.line(IVec2::new(173, TOP + i), IVec2::new(200, 99 + i), ink);
    }

    // E
    for x in 217..=224 {
        canvas.vline(x, TOP, BOTTOM, ink);
    }
    for y in TOP..=TOP + 7 {
        for offset in [0, 38, 75] {
            canvas.hline(225, 259, y + offset, ink);
        }
    }
}
