//! Point types.
//!
//! [`Point`] stores scaled integer coordinates (see [`crate::SCALING_FACTOR`]);
//! [`PointF`] stores unscaled floating-point coordinates in mm.

use crate::{scale, unscale, Coord, CoordF};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D point with scaled integer coordinates.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    /// Create a new point from scaled coordinates.
    #[inline]
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Create a new point from coordinates in mm.
    #[inline]
    pub fn new_scale(x: CoordF, y: CoordF) -> Self {
        Self::new(scale(x), scale(y))
    }

    /// The origin.
    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(&self, other: &Point) -> i128 {
        let dx = (other.x - self.x) as i128;
        let dy = (other.y - self.y) as i128;
        dx * dx + dy * dy
    }

    /// Distance to another point (scaled units).
    #[inline]
    pub fn distance(&self, other: &Point) -> CoordF {
        (self.distance_squared(other) as CoordF).sqrt()
    }

    /// Squared length of this point taken as a vector.
    #[inline]
    pub fn length_squared(&self) -> i128 {
        self.x as i128 * self.x as i128 + self.y as i128 * self.y as i128
    }

    /// Length of this point taken as a vector.
    #[inline]
    pub fn length(&self) -> CoordF {
        (self.length_squared() as CoordF).sqrt()
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> i128 {
        self.x as i128 * other.x as i128 + self.y as i128 * other.y as i128
    }

    #[inline]
    pub fn cross(&self, other: &Point) -> i128 {
        self.x as i128 * other.y as i128 - self.y as i128 * other.x as i128
    }

    /// Project this point onto the segment `a`-`b`, clamping to the segment ends.
    pub fn project_onto_segment(&self, a: Point, b: Point) -> Point {
        let ab = b - a;
        let len_sq = ab.length_squared();
        if len_sq == 0 {
            return a;
        }
        let t = (*self - a).dot(&ab) as CoordF / len_sq as CoordF;
        if t <= 0.0 {
            a
        } else if t >= 1.0 {
            b
        } else {
            Point::new(
                (a.x as CoordF + t * ab.x as CoordF).round() as Coord,
                (a.y as CoordF + t * ab.y as CoordF).round() as Coord,
            )
        }
    }

    /// Convert to an unscaled point in mm.
    #[inline]
    pub fn to_f64(&self) -> PointF {
        PointF::new(unscale(self.x), unscale(self.y))
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl Mul<CoordF> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: CoordF) -> Point {
        Point::new(
            (self.x as CoordF * rhs).round() as Coord,
            (self.y as CoordF * rhs).round() as Coord,
        )
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(Coord, Coord)> for Point {
    fn from((x, y): (Coord, Coord)) -> Self {
        Self::new(x, y)
    }
}

/// A 2D point with unscaled floating-point coordinates (mm).
#[derive(Clone, Copy, Default, PartialEq, Debug, Serialize, Deserialize)]
pub struct PointF {
    pub x: CoordF,
    pub y: CoordF,
}

impl PointF {
    #[inline]
    pub const fn new(x: CoordF, y: CoordF) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(&self) -> CoordF {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Convert back to a scaled point.
    #[inline]
    pub fn to_scaled(&self) -> Point {
        Point::new_scale(self.x, self.y)
    }
}

impl Sub for PointF {
    type Output = PointF;

    #[inline]
    fn sub(self, rhs: PointF) -> PointF {
        PointF::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A collection of points.
pub type Points = Vec<Point>;
