//! Typed drawing primitives.
//!
//! A diagram is an ordered list of [`Primitive`]s. Every kind carries absolute
//! coordinates and a [`StyleClass`]; styling itself lives in the style sheet,
//! so rendering one primitive only emits geometry and the class attribute.

use std::fmt;

use svg::node::element as svg_element;

use crate::{
    geometry::{Bounds, Point, Size},
    style::StyleClass,
};

/// A rendered SVG element.
pub type SvgNode = Box<dyn svg::Node>;

/// Average glyph advance relative to the font size, used for text bounds.
const GLYPH_ADVANCE: f32 = 0.6;

/// Common behavior of every primitive kind.
pub trait Drawable: fmt::Debug {
    /// Style class emitted as the `class` attribute.
    fn class(&self) -> StyleClass;

    /// Formats the primitive as one SVG element.
    fn render_to_svg(&self) -> SvgNode;

    /// Axis-aligned box covering everything the primitive paints.
    fn bounds(&self) -> Bounds;
}

/// A straight segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    class: StyleClass,
    start: Point,
    end: Point,
}

impl Line {
    pub fn new(class: StyleClass, start: Point, end: Point) -> Self {
        Self { class, start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }
}

impl Drawable for Line {
    fn class(&self) -> StyleClass {
        self.class
    }

    fn render_to_svg(&self) -> SvgNode {
        let line = svg_element::Line::new()
            .set("class", self.class.name())
            .set("x1", self.start.x())
            .set("y1", self.start.y())
            .set("x2", self.end.x())
            .set("y2", self.end.y());
        Box::new(line)
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_points(self.start, self.end)
    }
}

/// A filled dot, used for finger positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    class: StyleClass,
    center: Point,
    radius: f32,
}

impl Circle {
    pub fn new(class: StyleClass, center: Point, radius: f32) -> Self {
        Self {
            class,
            center,
            radius,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Drawable for Circle {
    fn class(&self) -> StyleClass {
        self.class
    }

    fn render_to_svg(&self) -> SvgNode {
        let circle = svg_element::Circle::new()
            .set("class", self.class.name())
            .set("cx", self.center.x())
            .set("cy", self.center.y())
            .set("r", self.radius);
        Box::new(circle)
    }

    fn bounds(&self) -> Bounds {
        let diameter = self.radius * 2.0;
        self.center.to_bounds(Size::new(diameter, diameter))
    }
}

/// A text label anchored at its baseline start.
///
/// `font_size` is the size the label is drawn at. Labels created with
/// [`Label::with_font_size`] emit it inline so it wins over the class rule;
/// otherwise the style sheet provides it.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    class: StyleClass,
    position: Point,
    content: String,
    font_size: f32,
    inline_size: bool,
}

impl Label {
    /// Creates a label drawn with its class font size.
    pub fn new(
        class: StyleClass,
        position: Point,
        content: impl Into<String>,
        class_font_size: f32,
    ) -> Self {
        Self {
            class,
            position,
            content: content.into(),
            font_size: class_font_size,
            inline_size: false,
        }
    }

    /// Overrides the font size of this label only.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self.inline_size = true;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the overridden font size, if any.
    pub fn font_size_override(&self) -> Option<f32> {
        self.inline_size.then_some(self.font_size)
    }
}

impl Drawable for Label {
    fn class(&self) -> StyleClass {
        self.class
    }

    fn render_to_svg(&self) -> SvgNode {
        let mut text = svg_element::Text::new(self.content.as_str())
            .set("class", self.class.name())
            .set("x", self.position.x())
            .set("y", self.position.y());
        if let Some(size) = self.font_size_override() {
            text = text.set("style", format!("font-size: {size}px;"));
        }
        Box::new(text)
    }

    fn bounds(&self) -> Bounds {
        let width = self.content.chars().count() as f32 * self.font_size * GLYPH_ADVANCE;
        Bounds::from_points(
            self.position.offset_y(-self.font_size),
            self.position.offset_x(width),
        )
    }
}

/// An elliptical arc bulging upwards between two points on the same row.
///
/// Drawn as the large clockwise arc from `start` to `start + span`. Radii
/// too small to bridge the span are scaled up uniformly, as SVG renderers do.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    class: StyleClass,
    start: Point,
    radii: Size,
    span: f32,
}

impl Arc {
    pub fn new(class: StyleClass, start: Point, radii: Size, span: f32) -> Self {
        Self {
            class,
            start,
            radii,
            span,
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn radii(&self) -> Size {
        self.radii
    }

    pub fn span(&self) -> f32 {
        self.span
    }

    /// Radii after the renderer's scale-up.
    fn effective_radii(&self) -> Size {
        let half_span = self.span.abs() / 2.0;
        let lambda = (half_span / self.radii.width()).max(1.0);
        Size::new(self.radii.width() * lambda, self.radii.height() * lambda)
    }

    fn path_data(&self) -> String {
        format!(
            "M {} {} a {} {} 0 1,1 {} 0",
            self.start.x(),
            self.start.y(),
            self.radii.width(),
            self.radii.height(),
            self.span
        )
    }
}

impl Drawable for Arc {
    fn class(&self) -> StyleClass {
        self.class
    }

    fn render_to_svg(&self) -> SvgNode {
        let path = svg_element::Path::new()
            .set("class", self.class.name())
            .set("d", self.path_data());
        Box::new(path)
    }

    fn bounds(&self) -> Bounds {
        let radii = self.effective_radii();
        let half_span = self.span.abs() / 2.0;
        let center_x = self.start.x() + self.span / 2.0;

        // The large arc keeps its center below the chord.
        let ratio = (half_span / radii.width()).min(1.0);
        let center_y = self.start.y() + radii.height() * (1.0 - ratio * ratio).sqrt();

        Bounds::from_points(
            Point::new(center_x - radii.width(), center_y - radii.height()),
            Point::new(center_x + radii.width(), center_y),
        )
    }
}

/// An open chain of segments.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    class: StyleClass,
    points: Vec<Point>,
}

impl Polyline {
    pub fn new(class: StyleClass, points: Vec<Point>) -> Self {
        Self { class, points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    fn points_attribute(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x(), p.y()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Drawable for Polyline {
    fn class(&self) -> StyleClass {
        self.class
    }

    fn render_to_svg(&self) -> SvgNode {
        let polyline = svg_element::Polyline::new()
            .set("class", self.class.name())
            .set("points", self.points_attribute());
        Box::new(polyline)
    }

    fn bounds(&self) -> Bounds {
        let mut points = self.points.iter().copied();
        let Some(first) = points.next() else {
            return Bounds::default();
        };
        points.fold(Bounds::from_points(first, first), |acc, p| {
            acc.merge(&Bounds::from_points(p, p))
        })
    }
}

/// One drawing primitive of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line(Line),
    Circle(Circle),
    Label(Label),
    Arc(Arc),
    Polyline(Polyline),
}

impl Primitive {
    fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Self::Line(line) => line,
            Self::Circle(circle) => circle,
            Self::Label(label) => label,
            Self::Arc(arc) => arc,
            Self::Polyline(polyline) => polyline,
        }
    }
}

impl Drawable for Primitive {
    fn class(&self) -> StyleClass {
        self.as_drawable().class()
    }

    fn render_to_svg(&self) -> SvgNode {
        self.as_drawable().render_to_svg()
    }

    fn bounds(&self) -> Bounds {
        self.as_drawable().bounds()
    }
}

impl From<Line> for Primitive {
    fn from(value: Line) -> Self {
        Self::Line(value)
    }
}

impl From<Circle> for Primitive {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Label> for Primitive {
    fn from(value: Label) -> Self {
        Self::Label(value)
    }
}

impl From<Arc> for Primitive {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Polyline> for Primitive {
    fn from(value: Polyline) -> Self {
        Self::Polyline(value)
    }
}
