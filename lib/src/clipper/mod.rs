//! Clipper polygon boolean operations module.
//!
//! Polygon union, polyline offsetting and polyline clipping using the geo-clipper library.
//!
//! These operations back:
//! - Extrusion footprints (`polygons_covered_by_width` / `polygons_covered_by_spacing`)
//! - Clipping extrusion centrelines against region boundaries
//!
//! All coordinates and distances handed to this module are in scaled units. Clipper works
//! on integers internally, so geometry is passed through with a unit factor instead of
//! being unscaled to mm first; this keeps sub-micron tolerances such as
//! [`crate::SCALED_EPSILON`] meaningful.

use crate::geometry::{ExPolygon, ExPolygons, Point, Polygon, Polygons, Polyline, Polylines};
use crate::{Coord, CoordF};
use geo::{Coord as GeoCoord, LineString, MultiLineString, MultiPolygon, Polygon as GeoPolygon};
use geo_clipper::{Clipper, ClipperOpen};

/// Conversion factor between our scaled integer coordinates and clipper's integer space.
const CLIPPER_FACTOR: f64 = 1.0;

fn point_to_geo(p: &Point) -> GeoCoord<f64> {
    GeoCoord {
        x: p.x as f64,
        y: p.y as f64,
    }
}

fn geo_to_point(c: &GeoCoord<f64>) -> Point {
    Point::new(c.x.round() as Coord, c.y.round() as Coord)
}

/// Convert a ring of points to a closed geo LineString.
fn ring_to_geo(points: &[Point]) -> LineString<f64> {
    let mut ring: Vec<GeoCoord<f64>> = points.iter().map(point_to_geo).collect();
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(*first);
        }
    }
    LineString::new(ring)
}

/// Convert a geo ring back to points, removing the closing point.
fn geo_to_ring(ring: &LineString<f64>) -> Vec<Point> {
    let mut points: Vec<Point> = ring.coords().map(geo_to_point).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn polygon_to_geo(poly: &Polygon) -> GeoPolygon<f64> {
    GeoPolygon::new(ring_to_geo(poly.points()), vec![])
}

fn expolygon_to_geo(expoly: &ExPolygon) -> GeoPolygon<f64> {
    GeoPolygon::new(
        ring_to_geo(expoly.contour.points()),
        expoly.holes.iter().map(|h| ring_to_geo(h.points())).collect(),
    )
}

fn geo_to_expolygon(geo_poly: &GeoPolygon<f64>) -> ExPolygon {
    ExPolygon::with_holes(
        Polygon::from_points(geo_to_ring(geo_poly.exterior())),
        geo_poly
            .interiors()
            .iter()
            .map(|interior| Polygon::from_points(geo_to_ring(interior)))
            .collect(),
    )
}

fn polyline_to_geo(polyline: &Polyline) -> LineString<f64> {
    LineString::new(polyline.points().iter().map(point_to_geo).collect())
}

/// Flatten unioned regions into rings, contours counter-clockwise and holes clockwise.
///
/// The winding carries the hole information, so the rings can be fed back into
/// [`union_ex`] without filling holes in.
fn geo_multi_to_oriented_rings(multi: &MultiPolygon<f64>) -> Polygons {
    let mut out = Vec::with_capacity(multi.0.len());
    for poly in &multi.0 {
        let mut contour = Polygon::from_points(geo_to_ring(poly.exterior()));
        if contour.is_clockwise() {
            contour.reverse();
        }
        out.push(contour);
        for interior in poly.interiors() {
            let mut hole = Polygon::from_points(geo_to_ring(interior));
            if hole.is_counter_clockwise() {
                hole.reverse();
            }
            out.push(hole);
        }
    }
    out
}

// ============================================================================
// Offset Operations
// ============================================================================

/// Counter-clockwise rectangle covering the segment `a`-`b` out to `delta` on every
/// side, its ends squared off past both end points.
fn segment_stroke(a: Point, b: Point, delta: CoordF) -> Option<GeoPolygon<f64>> {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - ax, b.y as f64 - ay);
    let len = dx.hypot(dy);
    if len == 0.0 {
        return None;
    }
    // Along the segment and to its left, both `delta` long.
    let (ux, uy) = (dx / len * delta, dy / len * delta);
    let (nx, ny) = (-uy, ux);
    let (bx, by) = (b.x as f64, b.y as f64);
    let corners = [
        (ax - ux - nx, ay - uy - ny),
        (bx + ux - nx, by + uy - ny),
        (bx + ux + nx, by + uy + ny),
        (ax - ux + nx, ay - uy + ny),
    ];
    let ring: Vec<Point> = corners
        .iter()
        .map(|&(x, y)| Point::new(x.round() as Coord, y.round() as Coord))
        .collect();
    Some(GeoPolygon::new(ring_to_geo(&ring), vec![]))
}

/// Strokes of every segment of `polyline`. A polyline whose points all coincide is
/// covered by a square around that point.
fn polyline_strokes(polyline: &Polyline, delta: CoordF) -> Vec<GeoPolygon<f64>> {
    let points = polyline.points();
    let strokes: Vec<GeoPolygon<f64>> = points
        .windows(2)
        .filter_map(|w| segment_stroke(w[0], w[1], delta))
        .collect();
    if !strokes.is_empty() {
        return strokes;
    }
    let d = delta.round() as Coord;
    let p = points[0];
    let square = Polygon::rectangle(Point::new(p.x - d, p.y - d), Point::new(p.x + d, p.y + d));
    vec![polygon_to_geo(&square)]
}

/// Offset open polylines by `delta` (scaled units) on both sides.
///
/// Ends are squared off, i.e. extended by `delta` past the end points, so footprints of
/// two polylines sharing an end point overlap instead of merely touching. Every vertex is
/// covered out to at least `delta` in all directions.
///
/// Each polyline is stroked segment by segment and the strokes are unioned, so a closed
/// polyline yields a contour and a hole. Contours come out counter-clockwise and holes
/// clockwise. Polylines with fewer than two points and non-positive deltas produce nothing.
pub fn offset_polylines(polylines: &[Polyline], delta: CoordF) -> Polygons {
    if delta <= 0.0 {
        return Vec::new();
    }
    let mut out = Polygons::new();
    for polyline in polylines.iter().filter(|pl| pl.is_valid()) {
        let strokes = MultiPolygon::new(polyline_strokes(polyline, delta));
        let merged = Clipper::union(&strokes, &MultiPolygon::<f64>::new(vec![]), CLIPPER_FACTOR);
        out.extend(geo_multi_to_oriented_rings(&merged));
    }
    out
}

/// Offset a single open polyline. See [`offset_polylines`].
pub fn offset_polyline(polyline: &Polyline, delta: CoordF) -> Polygons {
    offset_polylines(std::slice::from_ref(polyline), delta)
}

// ============================================================================
// Boolean Operations
// ============================================================================

/// Union of a set of potentially overlapping polygons.
///
/// Rings are combined under the non-zero winding rule: a clockwise ring inside a
/// counter-clockwise one cuts a hole, as produced by [`offset_polylines`] for closed
/// polylines.
pub fn union_ex(polygons: &[Polygon]) -> ExPolygons {
    if polygons.is_empty() {
        return Vec::new();
    }
    let subject = MultiPolygon::new(polygons.iter().map(polygon_to_geo).collect());

    let result = Clipper::union(&subject, &MultiPolygon::<f64>::new(vec![]), CLIPPER_FACTOR);
    result.0.iter().map(geo_to_expolygon).collect()
}

/// Parts of the polylines lying inside the clip regions.
pub fn intersection_pl(polylines: &[Polyline], clip: &[ExPolygon]) -> Polylines {
    if polylines.is_empty() || clip.is_empty() {
        return Vec::new();
    }
    let subject = MultiLineString::new(polylines.iter().map(polyline_to_geo).collect());
    let clip_geo = MultiPolygon::new(clip.iter().map(expolygon_to_geo).collect());

    let result = ClipperOpen::intersection(&subject, &clip_geo, CLIPPER_FACTOR);
    geo_multi_line_to_polylines(&result)
}

/// Parts of the polylines lying outside the clip regions.
pub fn diff_pl(polylines: &[Polyline], clip: &[ExPolygon]) -> Polylines {
    if polylines.is_empty() {
        return Vec::new();
    }
    if clip.is_empty() {
        return polylines.to_vec();
    }
    let subject = MultiLineString::new(polylines.iter().map(polyline_to_geo).collect());
    let clip_geo = MultiPolygon::new(clip.iter().map(expolygon_to_geo).collect());

    let result = ClipperOpen::difference(&subject, &clip_geo, CLIPPER_FACTOR);
    geo_multi_line_to_polylines(&result)
}

fn geo_multi_line_to_polylines(multi: &MultiLineString<f64>) -> Polylines {
    multi
        .0
        .iter()
        .map(|ls| Polyline::from_points(ls.coords().map(geo_to_point).collect()))
        .filter(|pl| pl.is_valid())
        .collect()
}

/// Total net area of a set of ExPolygons (scaled units squared).
pub fn total_area(expolygons: &[ExPolygon]) -> CoordF {
    expolygons.iter().map(|e| e.area()).sum()
}
