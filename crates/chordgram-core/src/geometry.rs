//! Basic geometric types used by the layout engine and the primitives.
//!
//! All coordinates are in SVG user units with the origin at the top-left
//! corner of the canvas and `y` growing downwards.

/// Represents a point in 2D space with x and y coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Returns a copy of this point moved horizontally by `dx`
    pub fn offset_x(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }

    /// Returns a copy of this point moved vertically by `dy`
    pub fn offset_y(self, dy: f32) -> Self {
        Self {
            x: self.x,
            y: self.y + dy,
        }
    }

    /// Converts a point and size into a bounds rectangle
    ///
    /// The point is treated as the center of the bounds, and the size
    /// is distributed equally in all directions around that center.
    pub fn to_bounds(self, size: Size) -> Bounds {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;

        Bounds {
            min_x: self.x - half_width,
            min_y: self.y - half_height,
            max_x: self.x + half_width,
            max_y: self.y + half_height,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new Size with the maximum width and height between this size and another
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Returns a new Size grown vertically by `dy`
    pub fn grow_height(self, dy: f32) -> Self {
        Self {
            width: self.width,
            height: self.height + dy,
        }
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates the smallest bounds containing both points
    pub fn from_points(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Creates bounds from the top-left corner and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Merges two bounds to create a larger bounds that contains both
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true when `other` lies entirely inside these bounds
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}
