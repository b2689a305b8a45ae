//! Non-planar extrusion path.

use log::debug;

use super::{EntityKind, ExtrusionEntity, ExtrusionPath, ExtrusionRole, ExtrusionVisitor};
use crate::geometry::{douglas_peucker_mask, lerp, Point, Polygons, Polyline, Polylines};
use crate::{Coord, CoordF, Error, Result};

/// An extrusion path whose vertices each carry an elevation offset.
///
/// The elevation channel (`z_offsets`, scaled units) runs parallel to the point sequence:
/// both always have the same length, so the point list is only reachable read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionPath3D {
    path: ExtrusionPath,
    z_offsets: Vec<Coord>,
}

pub type ExtrusionPaths3D = Vec<ExtrusionPath3D>;

impl ExtrusionPath3D {
    pub fn new(role: ExtrusionRole) -> Self {
        Self {
            path: ExtrusionPath::new(role),
            z_offsets: Vec::new(),
        }
    }

    pub fn with_params(role: ExtrusionRole, mm3_per_mm: CoordF, width: CoordF, height: CoordF) -> Self {
        Self {
            path: ExtrusionPath::with_params(role, mm3_per_mm, width, height),
            z_offsets: Vec::new(),
        }
    }

    /// Attach an elevation channel to a planar path.
    ///
    /// Fails when `z_offsets` does not have one entry per point.
    pub fn from_path(path: ExtrusionPath, z_offsets: Vec<Coord>) -> Result<Self> {
        if path.size() != z_offsets.len() {
            return Err(Error::Geometry(format!(
                "{} points but {} elevation offsets",
                path.size(),
                z_offsets.len()
            )));
        }
        Ok(Self { path, z_offsets })
    }

    /// Append a vertex together with its elevation offset.
    pub fn push(&mut self, point: Point, z_offset: Coord) {
        self.path.polyline.push(point);
        self.z_offsets.push(z_offset);
    }

    pub fn with_feedrate(mut self, feedrate: CoordF) -> Self {
        self.path.feedrate = feedrate;
        self
    }

    pub fn with_extruder(mut self, extruder_id: u32) -> Self {
        self.path.extruder_id = extruder_id;
        self
    }

    pub fn with_color(mut self, cp_color_id: u32) -> Self {
        self.path.cp_color_id = cp_color_id;
        self
    }

    /// The planar projection with all flow metadata.
    pub fn path(&self) -> &ExtrusionPath {
        &self.path
    }

    pub fn points(&self) -> &[Point] {
        self.path.polyline.points()
    }

    pub fn z_offsets(&self) -> &[Coord] {
        &self.z_offsets
    }

    /// Iterate over `(point, z_offset)` pairs.
    pub fn vertices(&self) -> impl Iterator<Item = (Point, Coord)> + '_ {
        self.points().iter().copied().zip(self.z_offsets.iter().copied())
    }

    pub fn into_parts(self) -> (ExtrusionPath, Vec<Coord>) {
        (self.path, self.z_offsets)
    }

    pub fn size(&self) -> usize {
        self.z_offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z_offsets.is_empty()
    }

    pub fn set_role(&mut self, role: ExtrusionRole) {
        self.path.set_role(role);
    }

    /// Remove `distance` (scaled units, measured in the plane) from the end of the path.
    ///
    /// A new tail vertex gets an elevation interpolated between its neighbours.
    pub fn clip_end(&mut self, mut distance: CoordF) {
        let was_empty = self.is_empty();
        let points = self.path.polyline.points_mut();
        while distance > 0.0 {
            let (Some(last), Some(last_z)) = (points.pop(), self.z_offsets.pop()) else {
                break;
            };
            let (Some(&prev), Some(&prev_z)) = (points.last(), self.z_offsets.last()) else {
                break;
            };
            let len = last.distance(&prev);
            if len > distance {
                let t = distance / len;
                points.push(lerp(last, prev, t));
                self.z_offsets
                    .push(last_z + ((prev_z - last_z) as CoordF * t).round() as Coord);
                return;
            }
            distance -= len;
        }
        if !was_empty && self.is_empty() {
            debug!("clip_end consumed the whole {} 3D path", self.path.role());
        }
    }

    /// Douglas-Peucker reduction (`tolerance` in mm) restricted to runs of vertices at the
    /// same elevation. Vertices where the elevation changes are always kept, as are both
    /// endpoints.
    pub fn simplify(&mut self, tolerance: CoordF) {
        let points = self.path.polyline.points();
        let n = points.len();
        if n <= 2 {
            return;
        }

        let mut keep = vec![true; n];
        let mut start = 0;
        while start < n {
            let mut end = start;
            while end + 1 < n && self.z_offsets[end + 1] == self.z_offsets[start] {
                end += 1;
            }
            if end - start >= 2 {
                let mask = douglas_peucker_mask(&points[start..=end], tolerance);
                keep[start..=end].copy_from_slice(&mask);
            }
            start = end + 1;
        }

        let (points, z_offsets): (Vec<Point>, Vec<Coord>) = self
            .vertices()
            .zip(keep)
            .filter_map(|(vertex, k)| k.then_some(vertex))
            .unzip();
        self.path.polyline = Polyline::from_points(points);
        self.z_offsets = z_offsets;
    }
}

impl ExtrusionEntity for ExtrusionPath3D {
    fn kind(&self) -> EntityKind {
        EntityKind::Path3D
    }

    fn role(&self) -> ExtrusionRole {
        self.path.role()
    }

    fn reverse(&mut self) -> Result<()> {
        self.path.polyline.reverse();
        self.z_offsets.reverse();
        Ok(())
    }

    fn first_point(&self) -> Option<Point> {
        self.path.first_point()
    }

    fn last_point(&self) -> Option<Point> {
        self.path.last_point()
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.path.collect_polygons_covered_by_width(out, scaled_epsilon);
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.path.collect_polygons_covered_by_spacing(out, scaled_epsilon);
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.path.mm3_per_mm
    }

    fn as_polyline(&self) -> Polyline {
        self.path.as_polyline()
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        self.path.collect_polylines(dst);
    }

    fn length(&self) -> CoordF {
        self.path.length()
    }

    fn total_volume(&self) -> CoordF {
        self.path.total_volume()
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_path_3d(self)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_path_3d_mut(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scale, unscale_f};

    fn make_ramp() -> ExtrusionPath3D {
        let mut path = ExtrusionPath3D::with_params(ExtrusionRole::TopSolidInfill, 0.04, 0.4, 0.2);
        path.push(Point::new_scale(0.0, 0.0), 0);
        path.push(Point::new_scale(10.0, 0.0), scale(1.0));
        path.push(Point::new_scale(10.0, 10.0), scale(2.0));
        path
    }

    #[test]
    fn test_push_keeps_channels_in_sync() {
        let path = make_ramp();
        assert_eq!(path.size(), 3);
        assert_eq!(path.points().len(), path.z_offsets().len());
        assert_eq!(path.role(), ExtrusionRole::TopSolidInfill);
        assert!((unscale_f(path.length()) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_path_rejects_mismatched_channels() {
        let path = ExtrusionPath::new(ExtrusionRole::Perimeter).with_polyline(Polyline::from_points(
            vec![Point::new(0, 0), Point::new(100, 0)],
        ));
        assert!(matches!(
            ExtrusionPath3D::from_path(path.clone(), vec![0]),
            Err(Error::Geometry(_))
        ));
        let path3d = ExtrusionPath3D::from_path(path.clone(), vec![0, 5]).unwrap();
        assert_eq!(path3d.z_offsets(), &[0, 5]);

        let (planar, z_offsets) = path3d.into_parts();
        assert_eq!(planar, path);
        assert_eq!(z_offsets, vec![0, 5]);
    }

    #[test]
    fn test_reverse_reverses_both_channels() {
        let mut path = make_ramp();
        path.reverse().unwrap();
        assert_eq!(path.first_point(), Some(Point::new_scale(10.0, 10.0)));
        assert_eq!(path.z_offsets(), &[scale(2.0), scale(1.0), 0]);
        path.reverse().unwrap();
        assert_eq!(path, make_ramp());
    }

    #[test]
    fn test_clip_end_interpolates_elevation() {
        let mut path = make_ramp();
        path.clip_end(scale(5.0) as CoordF);
        assert_eq!(path.size(), 3);
        assert_eq!(path.last_point(), Some(Point::new_scale(10.0, 5.0)));
        assert_eq!(path.z_offsets()[2], scale(1.5));

        path.clip_end(scale(100.0) as CoordF);
        assert!(path.is_empty());
        assert!(path.points().is_empty());
    }

    #[test]
    fn test_simplify_only_within_constant_elevation() {
        let mut path = ExtrusionPath3D::new(ExtrusionRole::InternalInfill);
        // Collinear run at z=0, then collinear run climbing.
        path.push(Point::new_scale(0.0, 0.0), 0);
        path.push(Point::new_scale(1.0, 0.0), 0);
        path.push(Point::new_scale(2.0, 0.0), 0);
        path.push(Point::new_scale(3.0, 0.0), 10);
        path.push(Point::new_scale(4.0, 0.0), 20);

        path.simplify(0.01);

        assert_eq!(path.points().len(), path.z_offsets().len());
        assert_eq!(
            path.points(),
            &[
                Point::new_scale(0.0, 0.0),
                Point::new_scale(2.0, 0.0),
                Point::new_scale(3.0, 0.0),
                Point::new_scale(4.0, 0.0),
            ]
        );
        assert_eq!(path.z_offsets(), &[0, 0, 10, 20]);
    }

    #[test]
    fn test_metadata_builders() {
        let path = make_ramp().with_feedrate(25.0).with_extruder(2).with_color(7);
        assert_eq!(path.path().feedrate, 25.0);
        assert_eq!(path.path().extruder_id, 2);
        assert_eq!(path.path().cp_color_id, 7);
        assert!((path.total_volume() - 0.8).abs() < 1e-9);
    }
}
