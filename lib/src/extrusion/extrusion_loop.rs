//! Closed extrusion loops.
//!
//! A loop is a sequence of paths tracing one closed ring (perimeters, skirt, brim). Unlike
//! the generic multi-path it knows its winding and can be re-rooted at any point of its
//! boundary, which is how seams are placed.

use log::trace;

use super::{
    EntityKind, ExtrusionEntity, ExtrusionLoopRole, ExtrusionPath, ExtrusionPaths, ExtrusionRole,
    ExtrusionVisitor,
};
use crate::geometry::{Point, Polygon, Polygons, Polyline, Polylines};
use crate::{CoordF, Result};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExtrusionLoop {
    /// Paths in extrusion order. The last point of the last path equals the first point of
    /// the first one.
    pub paths: ExtrusionPaths,
    loop_role: ExtrusionLoopRole,
}

impl ExtrusionLoop {
    pub fn new(loop_role: ExtrusionLoopRole) -> Self {
        Self {
            paths: Vec::new(),
            loop_role,
        }
    }

    pub fn from_paths(paths: ExtrusionPaths, loop_role: ExtrusionLoopRole) -> Self {
        Self { paths, loop_role }
    }

    /// Loop made of a single closed path.
    pub fn from_path(path: ExtrusionPath, loop_role: ExtrusionLoopRole) -> Self {
        Self {
            paths: vec![path],
            loop_role,
        }
    }

    pub fn loop_role(&self) -> ExtrusionLoopRole {
        self.loop_role
    }

    /// The ring as a polygon: every path without its last point.
    pub fn polygon(&self) -> Polygon {
        let mut points = Vec::new();
        for path in &self.paths {
            let pts = path.polyline.points();
            if let Some((_, head)) = pts.split_last() {
                points.extend_from_slice(head);
            }
        }
        Polygon::from_points(points)
    }

    /// Make the loop run clockwise. Returns whether it had to be reversed.
    pub fn make_clockwise(&mut self) -> bool {
        let was_ccw = self.polygon().is_counter_clockwise();
        if was_ccw {
            self.reverse_ring();
        }
        was_ccw
    }

    /// Make the loop run counter-clockwise. Returns whether it had to be reversed.
    pub fn make_counter_clockwise(&mut self) -> bool {
        let was_cw = self.polygon().is_clockwise();
        if was_cw {
            self.reverse_ring();
        }
        was_cw
    }

    fn reverse_ring(&mut self) {
        for path in &mut self.paths {
            path.polyline.reverse();
        }
        self.paths.reverse();
    }

    /// Re-root the loop at `point` if it is a vertex of one of the paths.
    ///
    /// Returns `false`, leaving the loop untouched, when no vertex matches.
    pub fn split_at_vertex(&mut self, point: &Point) -> bool {
        let Some((path_idx, idx)) = self
            .paths
            .iter()
            .enumerate()
            .find_map(|(i, path)| path.polyline.find_point(point).map(|idx| (i, idx)))
        else {
            return false;
        };

        if self.paths.len() == 1 {
            let path = &mut self.paths[0];
            let pts = path.polyline.points();
            let mut rotated = Vec::with_capacity(pts.len());
            rotated.extend_from_slice(&pts[idx..]);
            rotated.extend_from_slice(&pts[1..=idx]);
            path.polyline = Polyline::from_points(rotated);
            return true;
        }

        let mut before = std::mem::take(&mut self.paths);
        let path = before.remove(path_idx);
        let after = before.split_off(path_idx);

        let pts = path.polyline.points();
        let head = Polyline::from_points(pts[..=idx].to_vec());
        let tail = Polyline::from_points(pts[idx..].to_vec());

        let mut paths = Vec::with_capacity(before.len() + after.len() + 2);
        if tail.is_valid() {
            paths.push(path.with_same_params(tail));
        }
        paths.extend(after);
        paths.extend(before);
        if head.is_valid() {
            paths.push(path.with_same_params(head));
        }
        self.paths = paths;
        true
    }

    /// Re-root the loop at the boundary point closest to `point`, cutting a path in two
    /// if needed.
    ///
    /// With `prefer_non_overhang`, the seam goes to the closest non-bridge path when
    /// there is one.
    pub fn split_at(&mut self, point: &Point, prefer_non_overhang: bool) {
        if self.paths.is_empty() {
            return;
        }

        let mut best: Option<(usize, Point, CoordF)> = None;
        let mut best_non_overhang: Option<(usize, Point, CoordF)> = None;
        for (i, path) in self.paths.iter().enumerate() {
            let Some(projected) = path.polyline.closest_point(point) else {
                continue;
            };
            let dist = projected.distance(point);
            if best.map_or(true, |(_, _, min)| dist < min) {
                best = Some((i, projected, dist));
            }
            if prefer_non_overhang
                && !path.is_bridge()
                && best_non_overhang.map_or(true, |(_, _, min)| dist < min)
            {
                best_non_overhang = Some((i, projected, dist));
            }
        }
        if prefer_non_overhang && best_non_overhang.is_none() {
            trace!("no non-overhang path in loop, seam may land on an overhang");
        }
        let Some((path_idx, p, _)) = best_non_overhang.or(best) else {
            return;
        };

        let path = &self.paths[path_idx];
        let (p1, p2) = path.polyline.split_at_point(&p);
        let mut paths = self.paths.clone();
        if paths.len() == 1 {
            let merged = if !p1.is_valid() {
                p2
            } else if !p2.is_valid() {
                p1
            } else {
                let mut merged = p2;
                merged.points_mut().extend(p1.points().iter().skip(1));
                merged
            };
            paths[0].polyline = merged;
        } else {
            let template = paths.remove(path_idx);
            let mut at = path_idx;
            for piece in [p1, p2] {
                if piece.is_valid() {
                    paths.insert(at, template.with_same_params(piece));
                    at += 1;
                }
            }
        }

        let mut split = Self::from_paths(paths, self.loop_role);
        if split.split_at_vertex(&p) {
            *self = split;
        } else {
            trace!("split point {} not found after cutting, loop left untouched", p);
        }
    }

    /// Append to `out` a copy of the loop's paths with `distance` (scaled units) removed
    /// from the end. The loop itself is not modified.
    pub fn clip_end(&self, mut distance: CoordF, out: &mut ExtrusionPaths) {
        let mut paths = self.paths.clone();
        while distance > 0.0 {
            let Some(last) = paths.last_mut() else {
                break;
            };
            let len = last.length();
            if len <= distance {
                paths.pop();
                distance -= len;
            } else {
                last.clip_end(distance);
                break;
            }
        }
        out.extend(paths);
    }

    /// Whether `point` is an interior vertex of a bridging path of this loop.
    pub fn has_overhang_point(&self, point: &Point) -> bool {
        for path in &self.paths {
            if let Some(pos) = path.polyline.find_point(point) {
                return path.is_bridge() && pos > 0 && pos + 1 != path.size();
            }
        }
        false
    }
}

impl ExtrusionEntity for ExtrusionLoop {
    fn kind(&self) -> EntityKind {
        EntityKind::Loop
    }

    fn role(&self) -> ExtrusionRole {
        self.paths.first().map_or(ExtrusionRole::None, |p| p.role())
    }

    fn is_loop(&self) -> bool {
        true
    }

    /// Loops keep their winding when paths are ordered.
    fn can_reverse(&self) -> bool {
        false
    }

    fn reverse(&mut self) -> Result<()> {
        self.reverse_ring();
        Ok(())
    }

    fn first_point(&self) -> Option<Point> {
        self.paths.first().and_then(|p| p.first_point())
    }

    /// A loop ends where it starts.
    fn last_point(&self) -> Option<Point> {
        self.first_point()
    }

    fn collect_polygons_covered_by_width(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        for path in &self.paths {
            path.collect_polygons_covered_by_width(out, scaled_epsilon);
        }
    }

    fn collect_polygons_covered_by_spacing(&self, out: &mut Polygons, scaled_epsilon: CoordF) {
        for path in &self.paths {
            path.collect_polygons_covered_by_spacing(out, scaled_epsilon);
        }
    }

    fn min_mm3_per_mm(&self) -> CoordF {
        self.paths
            .iter()
            .map(|p| p.mm3_per_mm)
            .fold(CoordF::MAX, CoordF::min)
    }

    fn as_polyline(&self) -> Polyline {
        self.polygon().split_at_first_point()
    }

    fn collect_polylines(&self, dst: &mut Polylines) {
        let polyline = self.as_polyline();
        if !polyline.is_empty() {
            dst.push(polyline);
        }
    }

    fn length(&self) -> CoordF {
        self.paths.iter().map(|p| p.length()).sum()
    }

    fn total_volume(&self) -> CoordF {
        self.paths.iter().map(|p| p.total_volume()).sum()
    }

    fn visit(&self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_loop(self)
    }

    fn visit_mut(&mut self, visitor: &mut dyn ExtrusionVisitor) -> Result<()> {
        visitor.visit_loop_mut(self)
    }
}
