#![forbid(unsafe_code)]

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;
pub type Rect = euclid::Rect<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

/// Axis-aligned bounding box of a circle.
pub fn circle_bounds(center: Point, radius: f64) -> Rect {
    Rect::new(
        point(center.x - radius, center.y - radius),
        euclid::size2(radius * 2.0, radius * 2.0),
    )
}

/// A straight line between two interfaces, as drawn for an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}
