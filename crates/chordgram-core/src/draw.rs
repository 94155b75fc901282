//! Drawing definitions for chord diagrams.
//!
//! - [`StrokeDefinition`] and [`TextDefinition`] describe how a style class
//!   strokes lines and sets text.
//! - [`Primitive`] is the closed set of shapes a diagram is made of. Each
//!   kind is an explicit record that formats itself to one SVG element.

mod primitive;
mod stroke;
mod text;

pub use primitive::{Arc, Circle, Drawable, Label, Line, Polyline, Primitive, SvgNode};
pub use stroke::StrokeDefinition;
pub use text::{FontStyle, TextDefinition};
