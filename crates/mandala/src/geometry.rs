//! Core geometry types for mandala.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! `#[derive(...)]` generates the boilerplate we would otherwise write by hand:
//! - `Debug` = printable with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (Copy only for small stack values)
//! - `PartialEq` = compare with `==`
//! - `Serialize` = turn into JSON for `mandala generate --json`

use serde::Serialize;

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An ordered sequence of points, implicitly closed when drawn.
///
/// Generators that close the boundary themselves (stars, complex shapes)
/// keep the repeated first point at the end of `points`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shape {
    pub points: Vec<Point>,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `distance` from `self` in direction `angle` (radians).
    #[inline]
    pub fn polar_offset(&self, angle: f64, distance: f64) -> Point {
        Point::new(self.x + angle.cos() * distance, self.y + angle.sin() * distance)
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between `self` and `other`.
    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Angle of `self` as seen from `origin`, in radians.
    #[inline]
    pub fn angle_from(&self, origin: Point) -> f64 {
        (self.y - origin.y).atan2(self.x - origin.x)
    }
}

impl Shape {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the last point repeats the first.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }

    /// Points of the boundary without the repeated closing point.
    pub fn open_points(&self) -> &[Point] {
        if self.is_closed() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Points with the first point re-appended, ready for drawing.
    pub fn closed_points(&self) -> Vec<Point> {
        let mut points = self.points.clone();
        if !self.is_closed() {
            if let Some(&first) = self.points.first() {
                points.push(first);
            }
        }
        points
    }

    /// Number of pairwise distinct points on the open boundary.
    pub fn distinct_len(&self) -> usize {
        let open = self.open_points();
        let mut distinct: Vec<Point> = Vec::with_capacity(open.len());
        for p in open {
            if !distinct.iter().any(|d| d.distance(*p) < 1e-9) {
                distinct.push(*p);
            }
        }
        distinct.len()
    }

    /// A drawable shape needs at least three distinct points.
    pub fn is_valid(&self) -> bool {
        self.distinct_len() >= 3
    }

    /// Get the bounding box as (min_x, min_y, max_x, max_y).
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        if self.points.is_empty() {
            return None;
        }

        let min_x = self.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_x = self.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Some((min_x, min_y, max_x, max_y))
    }

    /// Mean of the open boundary's vertices.
    ///
    /// For the radially symmetric shapes this crate generates, this is the
    /// center they were built around.
    pub fn vertex_centroid(&self) -> Option<Point> {
        let open = self.open_points();
        if open.is_empty() {
            return None;
        }
        let n = open.len() as f64;
        let sum_x: f64 = open.iter().map(|p| p.x).sum();
        let sum_y: f64 = open.iter().map(|p| p.y).sum();
        Some(Point::new(sum_x / n, sum_y / n))
    }

    /// Signed area of the boundary (shoelace formula).
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(self.open_points())
    }
}

/// Merge a set of bounding boxes into one.
pub fn union_bounds<I>(boxes: I) -> Option<(f64, f64, f64, f64)>
where
    I: IntoIterator<Item = (f64, f64, f64, f64)>,
{
    boxes.into_iter().fold(None, |acc, (x1, y1, x2, y2)| match acc {
        None => Some((x1, y1, x2, y2)),
        Some((a1, b1, a2, b2)) => Some((a1.min(x1), b1.min(y1), a2.max(x2), b2.max(y2))),
    })
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Returns:
/// - Positive value for counter-clockwise winding
/// - Negative value for clockwise winding
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Shape {
        Shape::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn polar_offset_lands_at_distance() {
        let origin = Point::new(2.0, -1.0);
        let p = origin.polar_offset(1.234, 7.5);
        assert!((p.distance(origin) - 7.5).abs() < 1e-12);
        assert!((p.angle_from(origin) - 1.234).abs() < 1e-12);
    }

    #[test]
    fn midpoint_is_halfway() {
        let m = Point::new(0.0, 0.0).midpoint(Point::new(4.0, -2.0));
        assert_eq!(m, Point::new(2.0, -1.0));
    }

    #[test]
    fn closing_round_trip() {
        let open = square();
        assert!(!open.is_closed());

        let closed = Shape::new(open.closed_points());
        assert!(closed.is_closed());
        assert_eq!(closed.len(), 5);
        assert_eq!(closed.open_points(), open.points.as_slice());
        // Already closed shapes are not closed twice
        assert_eq!(closed.closed_points().len(), 5);
    }

    #[test]
    fn validity_counts_distinct_points() {
        assert!(square().is_valid());

        let degenerate = Shape::new(vec![
            Point::new(1.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(1.0, 1.0),
        ]);
        assert_eq!(degenerate.distinct_len(), 2);
        assert!(!degenerate.is_valid());
    }

    #[test]
    fn shape_bbox_and_centroid() {
        let shape = square();
        assert_eq!(shape.bounding_box(), Some((0.0, 0.0, 10.0, 10.0)));
        assert_eq!(shape.vertex_centroid(), Some(Point::new(5.0, 5.0)));
        assert_eq!(Shape::new(vec![]).bounding_box(), None);
    }

    #[test]
    fn union_of_bounds() {
        let merged = union_bounds([(0.0, 0.0, 1.0, 1.0), (-2.0, 0.5, 0.5, 3.0)]);
        assert_eq!(merged, Some((-2.0, 0.0, 1.0, 3.0)));
        assert_eq!(union_bounds(std::iter::empty()), None);
    }

    #[test]
    fn signed_area_ccw_positive() {
        let area = square().signed_area();
        assert!((area - 100.0).abs() < 1e-10, "10x10 square should have area 100, got {}", area);
    }
}
