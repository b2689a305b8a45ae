//! Turning raw geometry into extrusion entities.
//!
//! Each helper takes a batch of polylines or polygons sharing one set of flow parameters,
//! appends one entity per input in input order, and returns how many inputs were skipped
//! as degenerate.

use log::trace;

use super::{
    Entity, ExtrusionEntities, ExtrusionLoop, ExtrusionLoopRole, ExtrusionPath, ExtrusionPaths,
    ExtrusionRole,
};
use crate::geometry::{Polygon, Polyline};
use crate::CoordF;

/// Append one path per valid polyline. Returns the number of polylines skipped.
pub fn extrusion_paths_append<I>(
    dst: &mut ExtrusionPaths,
    polylines: I,
    role: ExtrusionRole,
    mm3_per_mm: CoordF,
    width: CoordF,
    height: CoordF,
) -> usize
where
    I: IntoIterator<Item = Polyline>,
{
    let mut skipped = 0;
    for polyline in polylines {
        if !polyline.is_valid() {
            trace!("skipping {}-point polyline for {}", polyline.len(), role);
            skipped += 1;
            continue;
        }
        dst.push(ExtrusionPath::with_params(role, mm3_per_mm, width, height).with_polyline(polyline));
    }
    skipped
}

/// Append one entity per valid polyline: a loop for a closed polyline, a path otherwise.
/// Returns the number of polylines skipped.
pub fn extrusion_entities_append_paths<I>(
    dst: &mut ExtrusionEntities,
    polylines: I,
    role: ExtrusionRole,
    mm3_per_mm: CoordF,
    width: CoordF,
    height: CoordF,
) -> usize
where
    I: IntoIterator<Item = Polyline>,
{
    let mut skipped = 0;
    for polyline in polylines {
        if !polyline.is_valid() {
            trace!("skipping {}-point polyline for {}", polyline.len(), role);
            skipped += 1;
            continue;
        }
        let closed = polyline.is_closed();
        let path = ExtrusionPath::with_params(role, mm3_per_mm, width, height).with_polyline(polyline);
        dst.push(if closed {
            Entity::Loop(ExtrusionLoop::from_path(path, ExtrusionLoopRole::Default))
        } else {
            Entity::Path(path)
        });
    }
    skipped
}

/// Append one loop per valid polygon, its single path closed by repeating the first point.
/// Returns the number of polygons skipped.
pub fn extrusion_entities_append_loops<I>(
    dst: &mut ExtrusionEntities,
    polygons: I,
    role: ExtrusionRole,
    mm3_per_mm: CoordF,
    width: CoordF,
    height: CoordF,
) -> usize
where
    I: IntoIterator<Item = Polygon>,
{
    let mut skipped = 0;
    for polygon in polygons {
        if !polygon.is_valid() {
            trace!("skipping {}-point polygon for {}", polygon.len(), role);
            skipped += 1;
            continue;
        }
        let path = ExtrusionPath::with_params(role, mm3_per_mm, width, height)
            .with_polyline(polygon.split_at_first_point());
        dst.push(Entity::Loop(ExtrusionLoop::from_path(path, ExtrusionLoopRole::Default)));
    }
    skipped
}
