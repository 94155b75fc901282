//! Geometry planning for one chord diagram.
//!
//! [`plan`] turns a validated [`ChordShape`] into a [`Diagram`]: the canvas
//! size, the ordered primitives and the style sheet. Planning runs in a fixed
//! order because the fretboard may grow while string positions are checked,
//! and later steps (fret markers, fret and string lines) read the final
//! fret count.
//!
//! Primitives are emitted in stacking order:
//!
//! 1. chord name
//! 2. capo label
//! 3. fret-number markers
//! 4. open and muted glyphs
//! 5. finger dots
//! 6. barre arc
//! 7. nut line
//! 8. cut polylines and cut label
//! 9. fret lines
//! 10. string lines

mod metrics;
mod state;

pub use metrics::{BASE_FRET_COUNT, MARKED_FRETS, Metrics};
pub use state::Barre;

use log::{debug, trace};

use chordgram_core::{
    chord::{ChordError, ChordShape, STRING_COUNT},
    draw::{Arc, Circle, Label, Line, Polyline, Primitive},
    geometry::Point,
    style::{Palette, StyleClass, StyleSheet},
};

use crate::diagram::Diagram;

use state::LayoutState;

/// Row offset of the first fret below a cut when no capo is set.
const CUT_ROW_OFFSET: i64 = 2;

/// Row a fretted position is drawn in, counted in frets below the nut.
///
/// - With a cut, frets at or above the cut are renumbered relative to it:
///   `fret - cut + capo`, or `fret - cut + 2` without a capo. Frets below
///   the cut keep their raw row.
/// - Otherwise a capo shifts every fret up: `fret - capo`.
/// - Otherwise the fret itself is the row.
///
/// The same row feeds the fretboard extension, finger dots, barre arc and
/// cut label, so they always agree. Rows outside the `i32` range saturate;
/// validated chords stay far below it.
pub fn display_row(fret: u32, capo: u32, cut: u32) -> i32 {
    let (fret, capo, cut) = (i64::from(fret), i64::from(capo), i64::from(cut));
    let row = if cut != 0 {
        if fret >= cut {
            let offset = if capo != 0 { capo } else { CUT_ROW_OFFSET };
            fret - cut + offset
        } else {
            fret
        }
    } else if capo != 0 {
        fret - capo
    } else {
        fret
    };
    i32::try_from(row).unwrap_or(if row < 0 { i32::MIN } else { i32::MAX })
}

/// Plans the diagram of one chord.
///
/// # Errors
///
/// Returns the chord's validation error when it cannot be drawn: a string
/// fretted at 0, a fret, capo or cut past the last fret, a fret below the
/// capo or a non-positive scale. Nothing is allocated for rejected chords.
pub fn plan(chord: &ChordShape, palette: &Palette) -> Result<Diagram, ChordError> {
    chord.validate()?;

    let scale = chord.scale();
    let style = StyleSheet::new(scale, palette);
    let mut state = LayoutState::new(Metrics::new(scale));
    debug!(chord:% = chord, scale = scale; "Planning chord diagram");

    extend_fretboard(chord, &mut state);

    if let Some(fret) = chord.lowest_fret().filter(|_| chord.is_barre()) {
        let row = display_row(fret, chord.capo(), chord.cut());
        state.set_barre(Barre { fret, row });
        trace!(fret = fret, row = row; "Barre chord");
    }

    let mut primitives = Vec::new();
    primitives.push(chord_name(chord, &state));
    primitives.extend(capo_label(chord, &state));
    primitives.extend(fret_markers(chord, &state));
    primitives.extend(unplayed_markers(chord, &state));
    primitives.extend(finger_dots(chord, &state));
    primitives.extend(barre_arc(&state));
    primitives.push(nut_line(&state));
    if chord.cut() != 0 {
        primitives.extend(cut_marks(chord, &state));
    }
    primitives.extend(fret_lines(chord, &state));
    primitives.extend(string_lines(chord, &state));

    debug!(
        primitives = primitives.len(),
        frets = state.frets(),
        width = state.canvas().width(),
        height = state.canvas().height();
        "Chord diagram planned"
    );

    Ok(Diagram::new(
        state.canvas(),
        primitives,
        style,
        state.frets(),
        state.barre(),
    ))
}

/// Grows the fretboard until every fretted position lies on it.
fn extend_fretboard(chord: &ChordShape, state: &mut LayoutState) {
    for fret in chord.frets().iter().filter_map(|s| s.fret()) {
        let row = display_row(fret, chord.capo(), chord.cut());
        let y = state.metrics().row_y(row);
        state.extend_to(y);
    }
}

fn chord_name(chord: &ChordShape, state: &LayoutState) -> Primitive {
    let m = state.metrics();
    Label::new(StyleClass::ChordName, m.name, chord.name(), m.font_size).into()
}

fn capo_label(chord: &ChordShape, state: &LayoutState) -> Option<Primitive> {
    if chord.capo() == 0 || chord.cut() != 0 {
        return None;
    }
    let m = state.metrics();
    Some(Label::new(StyleClass::CapoMark, m.label, chord.capo().to_string(), m.font_size).into())
}

/// Position labels for frets 5, 7, 9 and 12 on uncut fretboards long enough
/// to show them. Labels pushed to or above the nut by a capo are skipped.
fn fret_markers(chord: &ChordShape, state: &LayoutState) -> Vec<Primitive> {
    if chord.cut() != 0 {
        return Vec::new();
    }
    let m = state.metrics();
    MARKED_FRETS
        .iter()
        .filter(|&&fret| state.frets() > fret && fret > chord.capo())
        .map(|&fret| {
            let rows = fret as i32 - chord.capo() as i32;
            let position = Point::new(m.label.x(), m.label_y(rows));
            Label::new(StyleClass::FretNumber, position, format!("{fret}fr"), m.font_size).into()
        })
        .collect()
}

fn unplayed_markers(chord: &ChordShape, state: &LayoutState) -> Vec<Primitive> {
    let m = state.metrics();
    chord
        .frets()
        .iter()
        .enumerate()
        .filter_map(|(string, s)| s.marker().map(|glyph| (string, glyph)))
        .map(|(string, glyph)| {
            let x = m.string_x(string, chord.hand()) - m.marker_shift;
            Label::new(StyleClass::Unplayed, Point::new(x, m.marker_y), glyph, m.font_size).into()
        })
        .collect()
}

fn finger_dots(chord: &ChordShape, state: &LayoutState) -> Vec<Primitive> {
    let m = state.metrics();
    chord
        .frets()
        .iter()
        .enumerate()
        .filter_map(|(string, s)| s.fret().map(|fret| (string, fret)))
        .map(|(string, fret)| {
            let row = display_row(fret, chord.capo(), chord.cut());
            let center = Point::new(m.string_x(string, chord.hand()), m.dot_y(row));
            Circle::new(StyleClass::Finger, center, m.dot_radius).into()
        })
        .collect()
}

fn barre_arc(state: &LayoutState) -> Option<Primitive> {
    let barre = state.barre()?;
    let m = state.metrics();
    let start = Point::new(m.nut_x1, m.row_y(barre.row));
    let span = m.nut_x2 - m.nut_x1;
    Some(Arc::new(StyleClass::Barre, start, m.barre_radii, span).into())
}

fn nut_line(state: &LayoutState) -> Primitive {
    let m = state.metrics();
    Line::new(
        StyleClass::Nut,
        Point::new(m.nut_x1, m.nut_y),
        Point::new(m.nut_x2, m.nut_y),
    )
    .into()
}

/// Upper end of string `string`'s top segment on a cut fretboard.
fn cut_upper_y(m: &Metrics, string: usize) -> f32 {
    if string % 2 == 0 {
        m.fret_y(1)
    } else {
        m.fret_y(1) - m.fret_spacing / 2.0
    }
}

/// Upper end of string `string`'s bottom segment on a cut fretboard.
fn cut_lower_y(m: &Metrics, string: usize) -> f32 {
    if string % 2 == 0 {
        m.fret_y(1) + m.fret_spacing / 2.0
    } else {
        m.fret_y(1)
    }
}

/// The two zig-zag polylines of a cut fretboard plus its fret label.
///
/// A barre chord is labeled with its raw barre fret next to the barre row;
/// other chords are labeled with the cut fret two rows below the nut.
fn cut_marks(chord: &ChordShape, state: &LayoutState) -> Vec<Primitive> {
    let m = state.metrics();
    let zigzag = |y: fn(&Metrics, usize) -> f32| -> Primitive {
        let points = (0..STRING_COUNT)
            .map(|string| Point::new(m.column_x(string), y(m, string)))
            .collect();
        Polyline::new(StyleClass::Cut, points).into()
    };

    let (value, rows) = match state.barre() {
        Some(barre) => (barre.fret, barre.row),
        None => (chord.cut(), CUT_ROW_OFFSET as i32),
    };

    let wide = value > 9;
    let x = if wide {
        m.label.x() - m.wide_label_shift
    } else {
        m.label.x()
    };
    let mut label = Label::new(
        StyleClass::FretNumber,
        Point::new(x, m.label_y(rows)),
        value.to_string(),
        m.font_size,
    );
    if wide {
        label = label.with_font_size(m.font_size - m.wide_font_shrink);
    }

    vec![zigzag(cut_upper_y), zigzag(cut_lower_y), label.into()]
}

/// One line per fret; a cut fretboard drops the line the cut replaces.
fn fret_lines(chord: &ChordShape, state: &LayoutState) -> Vec<Primitive> {
    let m = state.metrics();
    (0..state.frets())
        .filter(|&index| chord.cut() == 0 || index != 1)
        .map(|index| {
            let y = m.fret_y(index);
            Line::new(
                StyleClass::Fret,
                Point::new(m.nut_x1, y),
                Point::new(m.nut_x2, y),
            )
            .into()
        })
        .collect()
}

fn string_lines(chord: &ChordShape, state: &LayoutState) -> Vec<Primitive> {
    let m = state.metrics();
    let bottom = state.bottom_y();
    let string_line = |string: usize, top: f32, end: f32| -> Primitive {
        let x = m.column_x(string);
        Line::new(StyleClass::String, Point::new(x, top), Point::new(x, end)).into()
    };

    if chord.cut() == 0 {
        return (0..STRING_COUNT)
            .map(|string| string_line(string, m.nut_y, bottom))
            .collect();
    }

    let upper = (0..STRING_COUNT).map(|string| string_line(string, m.nut_y, cut_upper_y(m, string)));
    let lower = (0..STRING_COUNT).map(|string| string_line(string, cut_lower_y(m, string), bottom));
    upper.chain(lower).collect()
}
