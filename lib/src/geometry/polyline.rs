//! Polyline type for open paths.
//!
//! This module provides the Polyline type representing an open path (sequence of connected
//! line segments). A polyline whose first and last points coincide describes a closed ring
//! without being a [`Polygon`].

use super::simplify::douglas_peucker;
use super::{lerp, Line, Lines, Point, Polygon};
use crate::CoordF;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// An open polyline defined by a sequence of points.
///
/// Unlike a Polygon, a Polyline is not implicitly closed - it's a path from
/// the first point to the last point.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Create a new empty polyline.
    #[inline]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polyline from a vector of points.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create a polyline with the given capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Get the points of this polyline.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Get a mutable reference to the points.
    #[inline]
    pub fn points_mut(&mut self) -> &mut Vec<Point> {
        &mut self.points
    }

    /// Consume the polyline and return its points.
    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Add a point to the polyline.
    #[inline]
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Remove and return the last point.
    #[inline]
    pub fn pop(&mut self) -> Option<Point> {
        self.points.pop()
    }

    /// Clear all points from the polyline.
    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Get the first point, if any.
    #[inline]
    pub fn first_point(&self) -> Option<Point> {
        self.points.first().copied()
    }

    /// Get the last point, if any.
    #[inline]
    pub fn last_point(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Get the line segment at the given index (from point[i] to point[i+1]).
    #[inline]
    pub fn edge(&self, index: usize) -> Line {
        Line::new(self.points[index], self.points[index + 1])
    }

    /// Get all edges of the polyline.
    pub fn edges(&self) -> Lines {
        self.points
            .windows(2)
            .map(|w| Line::new(w[0], w[1]))
            .collect()
    }

    /// Calculate the total length of the polyline (scaled units).
    pub fn length(&self) -> CoordF {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Check if this polyline is closed (first point equals last point).
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.points.len() >= 2 && self.points.first() == self.points.last()
    }

    /// Check if the polyline is valid (has at least 2 points).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    /// Reverse the order of points in the polyline.
    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Index of the first vertex equal to `point`.
    pub fn find_point(&self, point: &Point) -> Option<usize> {
        self.points.iter().position(|p| p == point)
    }

    /// Find the closest point on the polyline to the given point.
    pub fn closest_point(&self, p: &Point) -> Option<Point> {
        match self.points.len() {
            0 => None,
            1 => Some(self.points[0]),
            _ => self
                .points
                .windows(2)
                .map(|w| p.project_onto_segment(w[0], w[1]))
                .min_by_key(|proj| p.distance_squared(proj)),
        }
    }

    /// Simplify the polyline with Douglas-Peucker. `tolerance` is in mm.
    ///
    /// Both endpoints are kept exactly.
    pub fn simplify(&mut self, tolerance: CoordF) {
        if self.points.len() > 2 {
            self.points = douglas_peucker(&self.points, tolerance);
        }
    }

    /// Split the polyline at the point of the polyline closest to `point`.
    ///
    /// The first half ends with `point` and the second half starts with it, so callers
    /// can rely on `point` belonging to both results. An empty polyline yields two empty
    /// halves.
    pub fn split_at_point(&self, point: &Point) -> (Polyline, Polyline) {
        let mut first = Polyline::new();
        let mut second = Polyline::new();
        let Some(start) = self.first_point() else {
            return (first, second);
        };

        let lines = self.edges();
        let mut line_idx = 0;
        let mut closest = start;
        let mut min = closest.distance(point);
        for (i, line) in lines.iter().enumerate() {
            let proj = line.project_point(point);
            let dist = proj.distance(point);
            if dist < min {
                closest = proj;
                min = dist;
                line_idx = i;
            }
        }

        if lines.is_empty() {
            first.push(*point);
            second.push(*point);
            return (first, second);
        }

        for line in &lines[..=line_idx] {
            if line.a != closest {
                first.push(line.a);
            }
        }
        first.push(*point);

        second.push(*point);
        for line in &lines[line_idx..] {
            if second.last_point() != Some(line.b) {
                second.push(line.b);
            }
        }
        (first, second)
    }

    /// Append another polyline to this one.
    pub fn append(&mut self, other: &Polyline) {
        self.points.extend_from_slice(&other.points);
    }

    /// Remove `distance` (scaled units) of arc length from the end of the polyline.
    ///
    /// The new last point is interpolated on the segment where the cut falls. Removing
    /// the whole length leaves the polyline empty.
    pub fn clip_end(&mut self, mut distance: CoordF) {
        while distance > 0.0 {
            let Some(last) = self.points.pop() else {
                break;
            };
            let Some(&prev) = self.points.last() else {
                break;
            };
            let len = last.distance(&prev);
            if len > distance {
                self.points.push(lerp(last, prev, distance / len));
                return;
            }
            distance -= len;
        }
    }

    /// Convert to a polygon (closing the path).
    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_points(self.points.clone())
    }
}

impl fmt::Debug for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polyline({} points)", self.points.len())
    }
}

impl fmt::Display for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polyline[")?;
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", p)?;
        }
        write!(f, "]")
    }
}

impl Deref for Polyline {
    type Target = [Point];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl DerefMut for Polyline {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.points
    }
}

impl Index<usize> for Polyline {
    type Output = Point;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IndexMut<usize> for Polyline {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.points[index]
    }
}

impl FromIterator<Point> for Polyline {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Polyline {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a Polyline {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::from_points(points)
    }
}

impl From<Polyline> for Vec<Point> {
    fn from(polyline: Polyline) -> Self {
        polyline.into_points()
    }
}

/// Type alias for a collection of polylines.
pub type Polylines = Vec<Polyline>;

#[cfg(test)]
mod tests {
    use super::*;

    fn make_polyline() -> Polyline {
        Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 100),
        ])
    }

    #[test]
    fn test_polyline_new() {
        let pl = Polyline::new();
        assert!(pl.is_empty());
        assert_eq!(pl.len(), 0);
        assert_eq!(pl.first_point(), None);
    }

    #[test]
    fn test_polyline_edges() {
        let pl = make_polyline();
        let edges = pl.edges();
        assert_eq!(edges.len(), 3); // 4 points = 3 edges (open path)
        assert_eq!(edges[0], Line::from_coords(0, 0, 100, 0));
    }

    #[test]
    fn test_polyline_length() {
        let pl = make_polyline();
        assert!((pl.length() - 300.0).abs() < 1e-9);
        assert_eq!(Polyline::new().length(), 0.0);
    }

    #[test]
    fn test_polyline_is_closed() {
        let pl = make_polyline();
        assert!(!pl.is_closed());

        let closed = Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 100),
            Point::new(0, 0),
        ]);
        assert!(closed.is_closed());
    }

    #[test]
    fn test_polyline_is_valid() {
        assert!(make_polyline().is_valid());
        assert!(!Polyline::from_points(vec![Point::new(0, 0)]).is_valid());
    }

    #[test]
    fn test_polyline_closest_point() {
        let pl = make_polyline();
        assert_eq!(pl.closest_point(&Point::new(50, -20)), Some(Point::new(50, 0)));
        assert_eq!(Polyline::new().closest_point(&Point::new(1, 1)), None);
    }

    #[test]
    fn test_clip_end_partial() {
        let mut pl = make_polyline();
        pl.clip_end(150.0);
        assert_eq!(pl.points(), &[Point::new(0, 0), Point::new(100, 0), Point::new(100, 50)]);
        assert!((pl.length() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_clip_end_exact_vertex() {
        let mut pl = make_polyline();
        pl.clip_end(100.0);
        assert_eq!(pl.last_point(), Some(Point::new(100, 100)));
        assert_eq!(pl.len(), 3);
    }

    #[test]
    fn test_clip_end_whole_length_empties() {
        let mut pl = make_polyline();
        pl.clip_end(1000.0);
        assert!(pl.is_empty());
    }

    #[test]
    fn test_clip_end_non_positive_is_noop() {
        let mut pl = make_polyline();
        pl.clip_end(0.0);
        pl.clip_end(-5.0);
        assert_eq!(pl, make_polyline());
    }

    #[test]
    fn test_split_at_point_interior() {
        let pl = make_polyline();
        let (first, second) = pl.split_at_point(&Point::new(100, 40));
        assert_eq!(
            first.points(),
            &[Point::new(0, 0), Point::new(100, 0), Point::new(100, 40)]
        );
        assert_eq!(
            second.points(),
            &[Point::new(100, 40), Point::new(100, 100), Point::new(0, 100)]
        );
    }

    #[test]
    fn test_split_at_point_vertex() {
        let pl = make_polyline();
        let (first, second) = pl.split_at_point(&Point::new(100, 0));
        assert_eq!(first.points(), &[Point::new(0, 0), Point::new(100, 0)]);
        assert_eq!(
            second.points(),
            &[Point::new(100, 0), Point::new(100, 100), Point::new(0, 100)]
        );
    }

    #[test]
    fn test_simplify_keeps_endpoints() {
        let mut pl = Polyline::from_points(vec![
            Point::new(0, 0),
            Point::new(1_000_000, 10),
            Point::new(2_000_000, 0),
            Point::new(3_000_000, 5),
        ]);
        pl.simplify(0.01);
        assert_eq!(pl.points(), &[Point::new(0, 0), Point::new(3_000_000, 5)]);
    }

    #[test]
    fn test_find_point() {
        let pl = make_polyline();
        assert_eq!(pl.find_point(&Point::new(100, 100)), Some(2));
        assert_eq!(pl.find_point(&Point::new(1, 1)), None);
    }
}
