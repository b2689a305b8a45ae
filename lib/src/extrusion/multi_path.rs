//! Continuous multi-segment extrusions.
//!
//! An [`ExtrusionMultiEntity`] is a chain of sub-paths extruded in one unbroken motion,
//! typically because the role or flow changes along the way. Consecutive sub-paths are
//! expected to share an endpoint; this is not enforced, only checked in debug builds
//! where it matters.

use log::warn;

use super::{
    EntityKind, ExtrusionEntity, ExtrusionPath, ExtrusionPath3D, ExtrusionRole, ExtrusionVisitor,
};
use crate::geometry::{Point, Polygons, Polyline, Polylines};
use crate::{CoordF, Error, Result};

/// Ordered chain of sub-paths of the same kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtrusionMultiEntity<T> {
    pub paths: Vec<T>,
}

/// Chain of planar paths.
pub type ExtrusionMultiPath = ExtrusionMultiEntity<ExtrusionPath>;

/// Chain of non-planar paths. Never reversed.
pub type ExtrusionMultiPath3D = ExtrusionMultiEntity<ExtrusionPath3D>;

impl<T> Default for ExtrusionMultiEntity<T> {
    fn default() -> Self {
        Self { paths: Vec::new() }
    }
}

impl<T> From<Vec<T>> for ExtrusionMultiEntity<T> {
    fn from(paths: Vec<T>) -> Self {
        Self { paths }
    }
}

impl<T: ExtrusionEntity> ExtrusionMultiEntity<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(paths: Vec<T>) -> Self {
        Self { paths }
    }

    pub fn push(&mut self, path: T) {
        self.paths.push(path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn first_role(&self) -> ExtrusionRole {
        self.paths.first().map_or(ExtrusionRole::None, |p| p.role())
    }

    fn front_point(&self) -> Option<Point> {
        self.paths.first().and_then(|p| p.first_point())
    }

    fn back_point(&self) -> Option<Point> {
        self.paths.last().and_then(|p| p.last_point())
    }

    /// Reverse the chain: sub-path order and each sub-path.
    fn reverse_chain(&mut self) -> Result<()> {
        for path in &mut self.paths {
            path.reverse()?;
        }
        self.paths.reverse();
        Ok(())
    }

    fn collect_width_footprints(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        for path in &self.paths {
            path.collect_polygons_covered_by_width(out, scaled_epsilon);
        }
    }

    fn collect_spacing_footprints(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        for path in &self.paths {
            path.collect_polygons_covered_by_spacing(out, scaled_epsilon);
        }
    }

    /// Lowest volumetric rate of the chain, `f64::MAX` for an empty chain.
    fn min_rate(&self) -> CoordF {
        self.paths
            .iter()
            .map(|p| p.min_mm3_per_mm())
            .fold(CoordF::MAX, CoordF::min)
    }

    /// Concatenate the sub-paths, dropping the endpoint each one shares with its
    /// predecessor.
    fn concat(&self) -> Polyline {
        let mut out = Polyline::new();
        for path in &self.paths {
            let polyline = path.as_polyline();
            debug_assert!(!polyline.is_empty(), "empty sub-path in a multi-path");
            if out.is_empty() {
                out.append(&polyline);
            } else {
                debug_assert_eq!(
                    out.last_point(),
                    polyline.first_point(),
                    "sub-paths of a multi-path are not adjacent"
                );
                out.points_mut().extend(polyline.points().iter().skip(1));
            }
        }
        out
    }

    fn collect_concat(&self, dst: &mut Polylines) {
        let polyline = self.concat();
        if !polyline.is_empty() {
            dst.push(polyline);
        }
    }

    fn total_length(&self) -> CoordF {
        self.paths.iter().map(|p| p.length()).sum()
    }

    fn sum_volume(&self) -> CoordF {
        self.paths.iter().map(|p| p.total_volume()).sum()
    }
}

impl ExtrusionEntity for ExtrusionMultiPath {
    fn kind(&self) -> EntityKind {
        EntityKind::MultiPath
    }

    fn role(&self) -> ExtrusionRole {
        self.first_role()
    }

    fn reverse(&mut self) -> Result<()> {
        self.reverse_chain()
    }

    fn first_point(&self) -> Option<Point> {
        self.front_point()
    }

    fn last_point(&self) -> Option<Point> {
        self.back_point()
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.collect_width_footprints(out, scaled_epsilon);
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.collect_spacing_footprints(out, scaled_epsilon);
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.min_rate()
    }

    fn as_polyline(&self) -> Polyline {
        self.concat()
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        self.collect_concat(dst);
    }

    fn length(&self) -> CoordF {
        self.total_length()
    }

    fn total_volume(&self) -> CoordF {
        self.sum_volume()
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_multi_path(self)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_multi_path_mut(self)
    }
}

impl ExtrusionEntity for ExtrusionMultiPath3D {
    fn kind(&self) -> EntityKind {
        EntityKind::MultiPath3D
    }

    fn role(&self) -> ExtrusionRole {
        self.first_role()
    }

    fn can_reverse(&self) -> bool {
        false
    }

    /// Non-planar chains are never reversed; the chain is left untouched.
    fn reverse(&mut self) -> Result<()> {
        warn!("refusing to reverse a non-planar multi-path");
        Err(Error::ReverseForbidden(EntityKind::MultiPath3D))
    }

    fn first_point(&self) -> Option<Point> {
        self.front_point()
    }

    fn last_point(&self) -> Option<Point> {
        self.back_point()
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.collect_width_footprints(out, scaled_epsilon);
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        self.collect_spacing_footprints(out, scaled_epsilon);
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.min_rate()
    }

    fn as_polyline(&self) -> Polyline {
        self.concat()
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        self.collect_concat(dst);
    }

    fn length(&self) -> CoordF {
        self.total_length()
    }

    fn total_volume(&self) -> CoordF {
        self.sum_volume()
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_multi_path_3d(self)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_multi_path_3d_mut(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scale, unscale_f};

    fn segment(a: (f64, f64), b: (f64, f64), role: ExtrusionRole, mm3_per_mm: f64) -> ExtrusionPath {
        ExtrusionPath::with_params(role, mm3_per_mm, 0.4, 0.2).with_polyline(Polyline::from_points(
            vec![Point::new_scale(a.0, a.1), Point::new_scale(b.0, b.1)],
        ))
    }

    fn make_chain() -> ExtrusionMultiPath {
        ExtrusionMultiPath::from_paths(vec![
            segment((0.0, 0.0), (10.0, 0.0), ExtrusionRole::ExternalPerimeter, 0.05),
            segment((10.0, 0.0), (10.0, 5.0), ExtrusionRole::OverhangPerimeter, 0.03),
            segment((10.0, 5.0), (0.0, 5.0), ExtrusionRole::ExternalPerimeter, 0.05),
        ])
    }

    #[test]
    fn test_aggregates() {
        let chain = make_chain();
        assert_eq!(chain.role(), ExtrusionRole::ExternalPerimeter);
        assert!((unscale_f(chain.length()) - 25.0).abs() < 1e-9);
        assert!((chain.min_mm3_per_mm() - 0.03).abs() < 1e-12);
        let volume: f64 = chain.paths.iter().map(|p| p.total_volume()).sum();
        assert!((chain.total_volume() - volume).abs() < 1e-12);
        assert!((chain.total_volume() - (0.5 + 0.15 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_empty_chain() {
        let chain = ExtrusionMultiPath::new();
        assert_eq!(chain.role(), ExtrusionRole::None);
        assert_eq!(chain.min_mm3_per_mm(), f64::MAX);
        assert_eq!(chain.length(), 0.0);
        assert_eq!(chain.first_point(), None);
        assert!(chain.as_polylines().is_empty());
    }

    #[test]
    fn test_as_polyline_elides_shared_endpoints() {
        let polyline = make_chain().as_polyline();
        assert_eq!(
            polyline.points(),
            &[
                Point::new_scale(0.0, 0.0),
                Point::new_scale(10.0, 0.0),
                Point::new_scale(10.0, 5.0),
                Point::new_scale(0.0, 5.0),
            ]
        );
    }

    #[test]
    fn test_reverse_preserves_adjacency() {
        let mut chain = make_chain();
        chain.reverse().unwrap();
        assert_eq!(chain.first_point(), Some(Point::new_scale(0.0, 5.0)));
        assert_eq!(chain.last_point(), Some(Point::new_scale(0.0, 0.0)));
        for pair in chain.paths.windows(2) {
            assert_eq!(pair[0].last_point(), pair[1].first_point());
        }
        assert_eq!(chain.paths[1].role(), ExtrusionRole::OverhangPerimeter);
        chain.reverse().unwrap();
        assert_eq!(chain, make_chain());
    }

    #[test]
    fn test_first_point_is_front_of_first_sub_path() {
        let chain = make_chain();
        assert_eq!(chain.first_point(), chain.paths[0].first_point());
        assert_ne!(chain.first_point(), chain.paths[0].last_point());
    }

    #[test]
    fn test_non_planar_chain_refuses_reverse() {
        let mut a = ExtrusionPath3D::new(ExtrusionRole::TopSolidInfill);
        a.push(Point::new(0, 0), 0);
        a.push(Point::new(scale(1.0), 0), 100);
        let mut chain = ExtrusionMultiPath3D::from_paths(vec![a]);
        let before = chain.clone();

        assert!(!chain.can_reverse());
        assert!(matches!(
            chain.reverse(),
            Err(Error::ReverseForbidden(EntityKind::MultiPath3D))
        ));
        assert_eq!(chain, before);
    }
}
