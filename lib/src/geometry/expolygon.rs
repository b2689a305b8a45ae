//! Polygon with holes.

use super::{Point, Polygon};
use crate::CoordF;
use serde::{Deserialize, Serialize};

/// A region bounded by an outer contour (counter-clockwise) and zero or more holes
/// (clockwise).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExPolygon {
    pub contour: Polygon,
    pub holes: Vec<Polygon>,
}

impl ExPolygon {
    pub fn new(contour: Polygon) -> Self {
        Self {
            contour,
            holes: Vec::new(),
        }
    }

    pub fn with_holes(contour: Polygon, holes: Vec<Polygon>) -> Self {
        Self { contour, holes }
    }

    /// Net area: contour area minus hole areas (scaled units squared).
    pub fn area(&self) -> CoordF {
        self.contour.area().abs() - self.holes.iter().map(|h| h.area().abs()).sum::<CoordF>()
    }

    /// Check whether the point is inside the contour and outside every hole.
    pub fn contains_point(&self, p: &Point) -> bool {
        self.contour.contains_point(p) && !self.holes.iter().any(|h| h.contains_point(p))
    }
}

impl From<Polygon> for ExPolygon {
    fn from(contour: Polygon) -> Self {
        Self::new(contour)
    }
}

/// Type alias for a collection of ExPolygons.
pub type ExPolygons = Vec<ExPolygon>;
