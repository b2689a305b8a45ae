//! Single extrusion path.
//!
//! An [`ExtrusionPath`] is one polyline extruded with constant flow and a single role.

use std::f64::consts::PI;

use log::debug;

use super::{
    EntityKind, ExtrusionEntity, ExtrusionEntityCollection, ExtrusionRole, ExtrusionVisitor,
};
use crate::clipper::{diff_pl, intersection_pl, offset_polyline};
use crate::geometry::{ExPolygon, Point, Polygons, Polyline, Polylines};
use crate::{unscale_f, CoordF, Result, SCALING_FACTOR};

/// Extra spacing between bridge extrusions (mm), as bridging threads sag into round shapes.
pub const BRIDGE_EXTRA_SPACING: CoordF = 0.05;

/// A single extrusion path.
///
/// All metadata belongs to the path, not to a direction: reversing permutes the points
/// only.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionPath {
    /// The path points (in scaled coordinates).
    pub polyline: Polyline,

    /// Volumetric rate: mm³ of plastic per mm of linear head motion. Negative when unset.
    pub mm3_per_mm: CoordF,

    /// Extrusion width (mm), used for visualization and footprints. Negative when unset.
    pub width: CoordF,

    /// Layer height (mm), used for visualization and footprints. Negative when unset.
    pub height: CoordF,

    /// Feedrate (mm/s). Zero means "use the default for the role".
    pub feedrate: CoordF,

    /// Id of the extruder.
    pub extruder_id: u32,

    /// Id of the color, used for visualization in the color printing case.
    pub cp_color_id: u32,

    role: ExtrusionRole,
}

/// Type alias for a collection of paths.
pub type ExtrusionPaths = Vec<ExtrusionPath>;

impl ExtrusionPath {
    /// Create an empty path with unset flow parameters.
    pub fn new(role: ExtrusionRole) -> Self {
        Self::with_params(role, -1.0, -1.0, -1.0)
    }

    /// Create an empty path with the given flow parameters.
    pub fn with_params(role: ExtrusionRole, mm3_per_mm: CoordF, width: CoordF, height: CoordF) -> Self {
        Self {
            polyline: Polyline::new(),
            mm3_per_mm,
            width,
            height,
            feedrate: 0.0,
            extruder_id: 0,
            cp_color_id: 0,
            role,
        }
    }

    /// Set the points of the path.
    pub fn with_polyline(mut self, polyline: Polyline) -> Self {
        self.polyline = polyline;
        self
    }

    /// Set the feedrate.
    pub fn with_feedrate(mut self, feedrate: CoordF) -> Self {
        self.feedrate = feedrate;
        self
    }

    /// Set the extruder id.
    pub fn with_extruder(mut self, extruder_id: u32) -> Self {
        self.extruder_id = extruder_id;
        self
    }

    /// Set the color id.
    pub fn with_color(mut self, cp_color_id: u32) -> Self {
        self.cp_color_id = cp_color_id;
        self
    }

    /// Copy of this path's metadata with a different polyline.
    pub fn with_same_params(&self, polyline: Polyline) -> Self {
        Self { polyline, ..*self }
    }

    pub fn set_role(&mut self, role: ExtrusionRole) {
        self.role = role;
    }

    /// Number of points.
    pub fn size(&self) -> usize {
        self.polyline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polyline.is_empty()
    }

    /// Check whether the path starts and ends at the same point.
    pub fn is_closed(&self) -> bool {
        !self.is_empty() && self.polyline.first_point() == self.polyline.last_point()
    }

    /// Check if this is a bridge extrusion.
    pub fn is_bridge(&self) -> bool {
        self.role.is_bridge()
    }

    /// Distance between centrelines of neighbouring extrusions (mm).
    ///
    /// Bridges are modelled as round threads spaced [`BRIDGE_EXTRA_SPACING`] apart, other
    /// extrusions as rectangles with semicircular ends:
    /// `spacing = width - height × (1 - π/4)`.
    pub fn spacing(&self) -> CoordF {
        if self.is_bridge() {
            self.width + BRIDGE_EXTRA_SPACING
        } else {
            self.width - self.height * (1.0 - 0.25 * PI)
        }
    }

    /// Remove `distance` (scaled units) from the end of the path.
    ///
    /// Clipping more than the path length leaves an empty path.
    pub fn clip_end(&mut self, distance: CoordF) {
        let was_empty = self.polyline.is_empty();
        self.polyline.clip_end(distance);
        if !was_empty && self.polyline.is_empty() {
            debug!("clip_end consumed the whole {} path", self.role);
        }
    }

    /// Reduce the number of points (Douglas-Peucker, `tolerance` in mm). Both endpoints are
    /// kept.
    pub fn simplify(&mut self, tolerance: CoordF) {
        self.polyline.simplify(tolerance);
    }

    /// Append to `out` one path per piece of this path lying inside `clip`.
    pub fn intersect_expolygons(&self, clip: &[ExPolygon], out: &mut ExtrusionEntityCollection) {
        let pieces = intersection_pl(std::slice::from_ref(&self.polyline), clip);
        self.inflate_collection(pieces, out);
    }

    /// Append to `out` one path per piece of this path lying outside `clip`.
    pub fn subtract_expolygons(&self, clip: &[ExPolygon], out: &mut ExtrusionEntityCollection) {
        let pieces = diff_pl(std::slice::from_ref(&self.polyline), clip);
        self.inflate_collection(pieces, out);
    }

    fn inflate_collection(&self, polylines: Polylines, out: &mut ExtrusionEntityCollection) {
        for polyline in polylines {
            out.append(self.with_same_params(polyline));
        }
    }

    /// Offset the centreline by half of `extent_mm` plus `scaled_epsilon`.
    pub(crate) fn collect_footprint(&self, extent_mm: CoordF, scaled_epsilon: CoordF, out: &mut Polygons) {
        let delta = 0.5 * extent_mm * SCALING_FACTOR + scaled_epsilon;
        out.extend(offset_polyline(&self.polyline, delta));
    }
}

impl ExtrusionEntity for ExtrusionPath {
    fn kind(&self) -> EntityKind {
        EntityKind::Path
    }

    fn role(&self) -> ExtrusionRole {
        self.role
    }

    fn reverse(&mut self) -> Result<()> {
        self.polyline.reverse();
        Ok(())
    }

    fn first_point(&self) -> Option<Point> {
        self.polyline.first_point()
    }

    fn last_point(&self) -> Option<Point> {
        self.polyline.last_point()
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.collect_footprint(self.width, scaled_epsilon, out);
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.collect_footprint(self.spacing(), scaled_epsilon, out);
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.mm3_per_mm
    }

    fn as_polyline(&self) -> Polyline {
        self.polyline.clone()
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        if !self.polyline.is_empty() {
            dst.push(self.polyline.clone());
        }
    }

    fn length(&self) -> CoordF {
        self.polyline.length()
    }

    fn total_volume(&self) -> CoordF {
        self.mm3_per_mm * unscale_f(self.length())
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_path(self)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_path_mut(self)
    }
}
