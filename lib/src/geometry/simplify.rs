//! Path simplification.
//!
//! Douglas-Peucker reduction. The mask form lets callers that carry per-vertex data alongside the points (such as
//! elevation offsets) keep that data in step with the reduced point list.

use super::{Line, Point};
use crate::{scale, CoordF};

/// Douglas-Peucker keep-mask.
///
/// Returns one flag per input point; `true` marks the points that survive a
/// simplification with the given `tolerance` (in mm). The first and last points are
/// always kept.
pub fn douglas_peucker_mask(points: &[Point], tolerance: CoordF) -> Vec<bool> {
    let mut keep = vec![true; points.len()];
    if points.len() <= 2 {
        return keep;
    }
    keep.iter_mut().for_each(|k| *k = false);
    keep[0] = true;
    keep[points.len() - 1] = true;

    let tolerance_sq = scale(tolerance) as f64 * scale(tolerance) as f64;

    // Stack-based implementation (avoids stack overflow for large inputs)
    let mut stack = vec![(0, points.len() - 1)];
    while let Some((anchor_idx, floater_idx)) = stack.pop() {
        if anchor_idx + 1 >= floater_idx {
            continue;
        }

        let anchor = points[anchor_idx];
        let floater = points[floater_idx];

        // Find point furthest from the anchor-floater line
        let mut max_dist_sq = 0.0;
        let mut furthest_idx = anchor_idx;
        for (i, p) in points
            .iter()
            .enumerate()
            .take(floater_idx)
            .skip(anchor_idx + 1)
        {
            let dist_sq = Line::distance_to_squared(*p, anchor, floater);
            if dist_sq > max_dist_sq {
                max_dist_sq = dist_sq;
                furthest_idx = i;
            }
        }

        if max_dist_sq > tolerance_sq {
            keep[furthest_idx] = true;
            stack.push((anchor_idx, furthest_idx));
            stack.push((furthest_idx, floater_idx));
        }
    }

    keep
}

/// Douglas-Peucker line simplification algorithm.
///
/// Recursively simplifies a path by removing points that are within `tolerance` (mm)
/// of the line segment connecting their neighbors. The first and last points are
/// always preserved.
pub fn douglas_peucker(points: &[Point], tolerance: CoordF) -> Vec<Point> {
    let keep = douglas_peucker_mask(points, tolerance);
    points
        .iter()
        .zip(keep)
        .filter_map(|(p, k)| k.then_some(*p))
        .collect()
}
