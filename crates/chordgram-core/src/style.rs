//! The style sheet embedded in every diagram.
//!
//! Every primitive carries a [`StyleClass`]; the [`StyleSheet`] maps each
//! class to stroke, fill and font settings derived from the diagram scale.
//! Deriving the sheet is a pure function of the scale and the [`Palette`].
//!
//! # Example
//!
//! ```
//! use chordgram_core::style::{Palette, StyleClass, StyleSheet};
//!
//! let sheet = StyleSheet::new(2.0, &Palette::default());
//! let string = sheet.get(StyleClass::String);
//! assert_eq!(string.stroke().map(|s| s.width()), Some(0.6));
//!
//! let css = sheet.to_css();
//! assert!(css.contains(".chordname"));
//! ```

use std::fmt;

use log::trace;

use crate::{
    color::Color,
    draw::{FontStyle, StrokeDefinition, TextDefinition},
};

/// Font size of every text class at scale 1.
pub const BASE_FONT_SIZE: f32 = 12.0;

/// Visual class of a primitive, emitted as the SVG `class` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleClass {
    /// Finger position dots.
    Finger,
    /// Vertical string lines.
    String,
    /// Horizontal fret lines.
    Fret,
    /// Jagged separator of a cut fretboard.
    Cut,
    /// Arc drawn across all strings of a barre chord.
    Barre,
    /// Nut or capo bar at the top of the fretboard.
    Nut,
    /// Chord name above the diagram.
    ChordName,
    /// Capo fret number next to the nut.
    CapoMark,
    /// Fret-number labels to the right of the fretboard.
    FretNumber,
    /// Open and muted string glyphs above the nut.
    Unplayed,
}

impl StyleClass {
    /// Every class, in style-sheet order.
    pub const ALL: [StyleClass; 10] = [
        Self::Finger,
        Self::String,
        Self::Fret,
        Self::Cut,
        Self::Barre,
        Self::Nut,
        Self::ChordName,
        Self::CapoMark,
        Self::FretNumber,
        Self::Unplayed,
    ];

    /// The CSS class name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Finger => "finger",
            Self::String => "string",
            Self::Fret => "fret",
            Self::Cut => "cut",
            Self::Barre => "barre",
            Self::Nut => "nut",
            Self::ChordName => "chordname",
            Self::CapoMark => "fretmark",
            Self::FretNumber => "dot",
            Self::Unplayed => "unplayed",
        }
    }
}

impl fmt::Display for StyleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a class fills its shapes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Fill {
    /// No fill declaration; the SVG default applies.
    #[default]
    Inherit,
    /// `fill: none`.
    None,
    /// A solid fill color.
    Color(Color),
}

/// Colors used by a diagram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    ink: Color,
    name: Color,
}

impl Palette {
    /// Creates a palette from the ink color (lines, dots, labels) and the
    /// chord-name color.
    pub fn new(ink: Color, name: Color) -> Self {
        Self { ink, name }
    }

    pub fn ink(&self) -> Color {
        self.ink
    }

    pub fn name(&self) -> Color {
        self.name
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            ink: Color::default(),
            name: Color::new("red").expect("'red' is a valid CSS color"),
        }
    }
}

/// Stroke, fill and font settings of one style class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassStyle {
    stroke: Option<StrokeDefinition>,
    fill: Fill,
    text: Option<TextDefinition>,
}

impl ClassStyle {
    fn stroked(stroke: StrokeDefinition) -> Self {
        Self {
            stroke: Some(stroke),
            ..Self::default()
        }
    }

    fn lettered(fill: Color, text: TextDefinition) -> Self {
        Self {
            stroke: None,
            fill: Fill::Color(fill),
            text: Some(text),
        }
    }

    fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn fill(&self) -> Fill {
        self.fill
    }

    pub fn text(&self) -> Option<&TextDefinition> {
        self.text.as_ref()
    }

    /// Renders the declarations of this class (without selector and braces).
    pub fn to_css(&self) -> String {
        let mut declarations = Vec::new();
        if let Some(stroke) = &self.stroke {
            declarations.push(stroke.to_css());
        }
        match self.fill {
            Fill::Inherit => {}
            Fill::None => declarations.push("fill: none;".to_string()),
            Fill::Color(color) => declarations.push(format!("fill: {color};")),
        }
        if let Some(text) = &self.text {
            declarations.push(text.to_css());
        }
        declarations.join(" ")
    }
}

/// Per-class styling for one diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    classes: [ClassStyle; StyleClass::ALL.len()],
}

impl StyleSheet {
    /// Derives the style sheet for a diagram drawn at `scale`.
    ///
    /// Thin strokes never shrink below their scale-1 width, so small diagrams
    /// stay legible; fonts follow the scale directly.
    pub fn new(scale: f32, palette: &Palette) -> Self {
        let stroke_scale = scale.max(1.0);
        let font_size = BASE_FONT_SIZE * scale;
        let ink = palette.ink();

        let classes = StyleClass::ALL.map(|class| match class {
            StyleClass::Finger => {
                ClassStyle::stroked(StrokeDefinition::new(ink, 1.0))
                    .with_fill(Fill::Color(ink))
            }
            StyleClass::String | StyleClass::Fret => {
                ClassStyle::stroked(StrokeDefinition::new(ink, 0.3 * stroke_scale))
            }
            StyleClass::Cut => ClassStyle::stroked(StrokeDefinition::new(ink, 0.6))
                .with_fill(Fill::None),
            StyleClass::Barre => {
                ClassStyle::stroked(StrokeDefinition::new(ink, stroke_scale))
                    .with_fill(Fill::None)
            }
            StyleClass::Nut => ClassStyle::stroked(StrokeDefinition::new(ink, 2.0)),
            StyleClass::ChordName => {
                ClassStyle::lettered(palette.name(), TextDefinition::new(font_size))
            }
            StyleClass::CapoMark | StyleClass::FretNumber => ClassStyle::lettered(
                ink,
                TextDefinition::new(font_size).with_font_style(FontStyle::Italic),
            ),
            StyleClass::Unplayed => {
                ClassStyle::lettered(ink, TextDefinition::new(font_size))
            }
        });

        trace!(scale; "Style sheet derived");
        Self { classes }
    }

    /// Returns the style of a class.
    pub fn get(&self, class: StyleClass) -> &ClassStyle {
        // `ALL` lists the variants in declaration order.
        &self.classes[class as usize]
    }

    /// Font size of a text class, or `None` for line classes.
    pub fn font_size(&self, class: StyleClass) -> Option<f32> {
        self.get(class).text().map(TextDefinition::font_size)
    }

    /// Renders the full style sheet as CSS rules, one per class.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (class, style) in StyleClass::ALL.iter().zip(&self.classes) {
            css.push_str(&format!(".{} {{ {} }}\n", class.name(), style.to_css()));
        }
        css
    }
}
