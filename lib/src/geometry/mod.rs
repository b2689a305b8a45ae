//! Geometry primitives for the extrusion model.
//!
//! This module provides the fundamental geometric types the extrusion entities are built on:
//! - [`Point`] and [`PointF`] - 2D points with integer (scaled) and floating-point coordinates
//! - [`Line`] - Line segment between two points
//! - [`Polygon`] - Closed polygon (boundary)
//! - [`Polyline`] - Open polyline (path)
//! - [`ExPolygon`] - Polygon with holes (exterior + interior contours)
//!
//! ## Coordinate System
//!
//! Coordinates are stored as integers scaled by `SCALING_FACTOR` (1,000,000), so 1 unit = 1
//! nanometer.
//!
//! - Use `scale()` to convert from mm to internal units
//! - Use `unscale()` to convert from internal units to mm

mod expolygon;
mod line;
mod point;
mod polygon;
mod polyline;
pub mod simplify;

pub use expolygon::{ExPolygon, ExPolygons};
pub use line::{Line, Lines};
pub use point::{Point, PointF, Points};
pub use polygon::{Polygon, Polygons};
pub use polyline::{Polyline, Polylines};
pub use simplify::{douglas_peucker, douglas_peucker_mask};

use crate::{Coord, CoordF};

/// Linear interpolation between two points.
#[inline]
pub fn lerp(a: Point, b: Point, t: CoordF) -> Point {
    Point::new(
        (a.x as CoordF + (b.x - a.x) as CoordF * t).round() as Coord,
        (a.y as CoordF + (b.y - a.y) as CoordF * t).round() as Coord,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        let a = Point::new(0, 0);
        let b = Point::new(100, 100);
        let mid = lerp(a, b, 0.5);
        assert_eq!(mid.x, 50);
        assert_eq!(mid.y, 50);
    }
}
