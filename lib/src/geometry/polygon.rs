//! Polygon type for closed contours.
//!
//! A polygon is implicitly closed: the last point connects back to the first one and is
//! not repeated.

use super::{Point, Polyline};
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A closed polygon defined by a sequence of points.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a new empty polygon.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polygon from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create an axis-aligned rectangle, counter-clockwise.
    pub fn rectangle(min: Point, max: Point) -> Self {
        Self::from_points(vec![
            min,
            Point::new(max.x, min.y),
            max,
            Point::new(min.x, max.y),
        ])
    }

    /// Get the points of this polygon.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get a mutable reference to the points.
    #[inline]
    pub fn points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.points
    }

    /// Consume the polygon and return its points.
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// A polygon needs at least three points to enclose an area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Signed area (shoelace formula) in scaled units squared.
    ///
    /// Positive for counter-clockwise polygons, negative for clockwise ones.
    pub fn area(&self) -> CoordF {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i128 = (0..n)
            .map(|i| {
                let p = self.points[i];
                let q = self.points[(i + 1) % n];
                p.x as i128 * q.y as i128 - q.x as i128 * p.y as i128
            })
            .sum();
        twice as CoordF * 0.5
    }

    #[inline]
    pub fn is_counter_clockwise(&self) -> bool {
        self.area() > 0.0
    }

    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.area() < 0.0
    }

    /// Reverse the winding of the polygon.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Perimeter length, including the closing edge.
    pub fn length(&self) -> CoordF {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| self.points[i].distance(&self.points[(i + 1) % n]))
            .sum()
    }

    /// Open the polygon into a closed polyline starting and ending at the first point.
    pub fn split_at_first_point(&self) -> Polyline {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points);
        if let Some(&first) = self.points.first() {
            points.push(first);
        }
        Polyline::from_points(points)
    }

    /// Check whether a point lies inside the polygon (even-odd rule; boundary counts as inside).
    pub fn contains_point(&self, p: &Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if p.project_onto_segment(a, b) == *p {
                return true;
            }
            if (a.y > p.y) != (b.y > p.y) {
                let dy = (b.y - a.y) as CoordF;
                let x_cross = a.x as CoordF + (p.y - a.y) as CoordF * (b.x - a.x) as CoordF / dy;
                if (p.x as CoordF) < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Translate all points.
    pub fn translate(&mut self, dx: Coord, dy: Coord) {
        for p in &mut self.points {
            p.x += dx;
            p.y += dy;
        }
    }
}

impl fmt::Debug for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({} points)", self.points.len())
    }
}

impl Deref for Polygon {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

/// Type alias for a collection of polygons.
pub type Polygons = Vec<Polygon>;

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::rectangle(Point::new(0, 0), Point::new(100, 100))
    }

    #[test]
    fn test_area_sign() {
        let mut sq = square();
        assert!((sq.area() - 10_000.0).abs() < 1e-9);
        assert!(sq.is_counter_clockwise());
        sq.reverse();
        assert!(sq.is_clockwise());
        assert!((sq.area() + 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_area_is_zero() {
        let line = Polygon::from_points(vec![Point::new(0, 0), Point::new(10, 0)]);
        assert_eq!(line.area(), 0.0);
        assert!(!line.is_valid());
        assert!(!line.is_clockwise() && !line.is_counter_clockwise());
    }

    #[test]
    fn test_split_at_first_point() {
        let pl = square().split_at_first_point();
        assert_eq!(pl.len(), 5);
        assert!(pl.is_closed());
        assert!((pl.length() - square().length()).abs() < 1e-9);
    }

    #[test]
    fn test_contains_point() {
        let sq = square();
        assert!(sq.contains_point(&Point::new(50, 50)));
        assert!(sq.contains_point(&Point::new(0, 50)));
        assert!(!sq.contains_point(&Point::new(150, 50)));
    }
}
