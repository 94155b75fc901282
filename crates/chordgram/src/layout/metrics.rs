//! Fixed dimensions of a diagram, derived from its scale.

use chordgram_core::{
    chord::{Hand, STRING_COUNT},
    geometry::{Point, Size},
    style::BASE_FONT_SIZE,
};

/// Fret lines drawn before any extension (the nut line included).
pub const BASE_FRET_COUNT: u32 = 6;

/// Fret numbers that get a position label on uncut fretboards.
pub const MARKED_FRETS: [u32; 4] = [5, 7, 9, 12];

/// Every coordinate and length the planner uses.
///
/// Spacings, radii and label offsets follow the scale directly. The
/// chord-name position, the nut's left edge and the wide-label shift use
/// `max(scale, 1)` so small diagrams keep a readable margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub string_spacing: f32,
    pub fret_spacing: f32,
    pub name: Point,
    pub nut_x1: f32,
    pub nut_x2: f32,
    /// Baseline of the open and muted glyphs.
    pub marker_y: f32,
    pub nut_y: f32,
    /// Baseline start of the fret-number column, level with the nut.
    pub label: Point,
    pub marker_shift: f32,
    pub wide_label_shift: f32,
    pub dot_radius: f32,
    pub barre_radii: Size,
    pub font_size: f32,
    pub wide_font_shrink: f32,
    pub base_canvas: Size,
}

impl Metrics {
    pub fn new(scale: f32) -> Self {
        let min_scale = scale.max(1.0);
        let string_spacing = 10.0 * scale;
        let fret_spacing = 10.0 * scale;

        let name = Point::new(10.0 * min_scale, 10.0 * min_scale);
        let marker_y = name.y() + 7.0 * scale;
        let nut_y = marker_y + 2.0 * scale;
        let nut_x1 = 5.0 * min_scale;
        let nut_x2 = nut_x1 + (STRING_COUNT - 1) as f32 * string_spacing;

        Self {
            string_spacing,
            fret_spacing,
            name,
            nut_x1,
            nut_x2,
            marker_y,
            nut_y,
            label: Point::new(nut_x2 + 2.5 * scale, nut_y + scale),
            marker_shift: 1.25 * scale,
            wide_label_shift: 4.0 * min_scale,
            dot_radius: 2.0 * scale,
            barre_radii: Size::new(7.5 * scale, 2.5 * scale),
            font_size: BASE_FONT_SIZE * scale,
            wide_font_shrink: scale,
            base_canvas: Size::new(80.0 * scale, 75.0 * scale),
        }
    }

    /// Horizontal position of a string, mirrored for left-handed diagrams.
    pub fn string_x(&self, string: usize, hand: Hand) -> f32 {
        let offset = string as f32 * self.string_spacing;
        match hand {
            Hand::Right => self.nut_x1 + offset,
            Hand::Left => self.nut_x2 - offset,
        }
    }

    /// Horizontal position of a string in drawing order, ignoring handedness.
    pub fn column_x(&self, string: usize) -> f32 {
        self.string_x(string, Hand::Right)
    }

    /// Vertical position of fret line `index`; line 0 is the nut.
    pub fn fret_y(&self, index: u32) -> f32 {
        self.nut_y + index as f32 * self.fret_spacing
    }

    /// Bottom edge of a fretboard with `frets` fret lines.
    pub fn bottom_y(&self, frets: u32) -> f32 {
        self.fret_y(frets.saturating_sub(1))
    }

    /// Centre of a finger dot in display row `row`.
    pub fn dot_y(&self, row: i32) -> f32 {
        self.nut_y - self.fret_spacing / 2.0 + row as f32 * self.fret_spacing
    }

    /// Reference height of display row `row`, shared by the fretboard
    /// extension check and the barre arc.
    pub fn row_y(&self, row: i32) -> f32 {
        self.nut_y - self.fret_spacing / 4.0 + row as f32 * self.fret_spacing
    }

    /// Baseline of a fret-number label `rows` frets below the nut.
    pub fn label_y(&self, rows: i32) -> f32 {
        self.label.y() + rows as f32 * self.fret_spacing
    }

    /// Smallest canvas that holds the initial fretboard and the label column.
    pub fn initial_canvas(&self) -> Size {
        let needed = Size::new(
            self.label.x() + self.font_size,
            self.bottom_y(BASE_FRET_COUNT) + self.fret_spacing / 2.0,
        );
        self.base_canvas.max(needed)
    }
}
