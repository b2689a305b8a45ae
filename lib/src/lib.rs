//! # Slicer extrusion entities
//!
//! The entity model for printable toolpaths of a slicing pipeline.
//!
//! Upstream generators (perimeters, infill, support) describe what to extrude as a tree of
//! extrusion entities; the G-code writer walks that tree to emit instructions. This crate
//! provides:
//! - Extrusion roles ([`ExtrusionRole`], [`ExtrusionLoopRole`])
//! - Leaf paths ([`ExtrusionPath`]) and non-planar paths ([`ExtrusionPath3D`])
//! - Continuous multi-segment paths ([`ExtrusionMultiPath`], [`ExtrusionMultiPath3D`])
//! - Closed loops with seam and winding handling ([`ExtrusionLoop`])
//! - Nested collections ([`ExtrusionEntityCollection`]) and the owning handle [`Entity`]
//! - The [`ExtrusionVisitor`] double-dispatch protocol and a diagnostic
//!   [`ExtrusionPrinter`]
//! - Helpers classifying raw polylines/polygons into paths and loops
//!
//! ## Example
//!
//! ```rust
//! use slicer_extrusion::{
//!     extrusion_entities_append_paths, ExtrusionEntity, ExtrusionPrinter, ExtrusionRole,
//!     Point, Polyline,
//! };
//!
//! let square = Polyline::from_points(vec![
//!     Point::new_scale(0.0, 0.0),
//!     Point::new_scale(10.0, 0.0),
//!     Point::new_scale(10.0, 10.0),
//!     Point::new_scale(0.0, 0.0),
//! ]);
//! let mut entities = Vec::new();
//! let skipped = extrusion_entities_append_paths(
//!     &mut entities,
//!     vec![square],
//!     ExtrusionRole::Perimeter,
//!     0.05,
//!     0.45,
//!     0.2,
//! );
//! assert_eq!(skipped, 0);
//! assert!(entities[0].is_loop());
//!
//! let mut printer = ExtrusionPrinter::new();
//! entities[0].visit(&mut printer).unwrap();
//! assert!(printer.as_str().starts_with("ExtrusionLoop:perimeter{"));
//! ```

pub mod clipper;
pub mod extrusion;
pub mod geometry;

pub use extrusion::{
    dispatch, dispatch_mut, extrusion_entities_append_loops, extrusion_entities_append_paths,
    extrusion_paths_append, Entity, EntityKind, ExtrusionEntities, ExtrusionEntity,
    ExtrusionEntityCollection, ExtrusionLoop, ExtrusionLoopRole, ExtrusionMultiEntity,
    ExtrusionMultiPath, ExtrusionMultiPath3D, ExtrusionPath, ExtrusionPath3D, ExtrusionPaths,
    ExtrusionPaths3D, ExtrusionPrinter, ExtrusionRole, ExtrusionVisitor, BRIDGE_EXTRA_SPACING,
};
pub use geometry::{ExPolygon, ExPolygons, Line, Point, PointF, Polygon, Polygons, Polyline, Polylines};

/// Coordinate type used throughout the slicer.
/// Using i64 for integer coordinates (scaled by SCALING_FACTOR) to avoid floating-point issues.
pub type Coord = i64;

/// Floating-point coordinate type for unscaled values.
pub type CoordF = f64;

/// Scaling factor: coordinates are stored as integers scaled by this factor.
/// 1 unit = 1 nanometer, so 1mm = 1_000_000 units.
pub const SCALING_FACTOR: f64 = 1_000_000.0;

/// Geometric epsilon in mm.
pub const EPSILON: CoordF = 1e-4;

/// [`EPSILON`] in scaled units (100 nm).
///
/// Footprint polygons are inflated by this amount so that the union of footprints computed
/// independently for adjacent paths has no sub-epsilon gaps along shared edges.
pub const SCALED_EPSILON: CoordF = EPSILON * SCALING_FACTOR;

/// Scale a floating-point coordinate to integer.
#[inline]
pub fn scale(v: CoordF) -> Coord {
    (v * SCALING_FACTOR).round() as Coord
}

/// Unscale an integer coordinate to floating-point.
#[inline]
pub fn unscale(v: Coord) -> CoordF {
    v as CoordF / SCALING_FACTOR
}

/// Unscale a floating-point value expressed in scaled units (lengths, distances).
#[inline]
pub fn unscale_f(v: CoordF) -> CoordF {
    v / SCALING_FACTOR
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for extrusion entity operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    Geometry(String),

    #[error("{0} cannot be reversed")]
    ReverseForbidden(EntityKind),

    #[error("visitor does not handle {0}")]
    UnhandledEntity(EntityKind),
}
