//! Line segment type.
//!
//! Segments are the unit the polyline algorithms (projection, splitting,
//! simplification) work on.

use super::Point;
use crate::{Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A line segment defined by two endpoints.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    pub a: Point,
    pub b: Point,
}

impl Line {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// Create a line from scaled coordinates.
    #[inline]
    pub const fn from_coords(ax: Coord, ay: Coord, bx: Coord, by: Coord) -> Self {
        Self {
            a: Point::new(ax, ay),
            b: Point::new(bx, by),
        }
    }

    #[inline]
    pub fn length(&self) -> CoordF {
        self.a.distance(&self.b)
    }

    /// Distance from `p` to the closest point of the segment.
    pub fn distance_to_point(&self, p: &Point) -> CoordF {
        p.distance(&self.project_point(p))
    }

    /// Closest point of the segment to `p`.
    #[inline]
    pub fn project_point(&self, p: &Point) -> Point {
        p.project_onto_segment(self.a, self.b)
    }

    /// Squared distance from `p` to the segment `a`-`b`.
    pub fn distance_to_squared(p: Point, a: Point, b: Point) -> f64 {
        let proj = p.project_onto_segment(a, b);
        p.distance_squared(&proj) as f64
    }
}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line({:?} -> {:?})", self.a, self.b)
    }
}

impl From<(Point, Point)> for Line {
    #[inline]
    fn from((a, b): (Point, Point)) -> Self {
        Self { a, b }
    }
}

pub type Lines = Vec<Line>;
