use crate::{DistanceTable, LonLat};

/// Finds the position `dist` meters along a path. Distances before the start or past the end
/// clamp to the first or last point. None if the path is empty or the table doesn't match it.
pub fn position_along(pts: &[LonLat], table: &DistanceTable, dist: f64) -> Option<LonLat> {
    let cumulative = table.cumulative();
    if pts.is_empty() || cumulative.len() != pts.len() {
        return None;
    }

    if dist <= 0.0 || dist.is_nan() {
        return Some(pts[0]);
    }
    if dist >= table.total() {
        return pts.last().copied();
    }

    // The smallest index whose cumulative distance reaches dist. Since 0 < dist < total, this is
    // never the first or past the last point.
    let idx = cumulative
        .partition_point(|d| *d < dist)
        .clamp(1, pts.len() - 1);
    let start = cumulative[idx - 1];
    let length = cumulative[idx] - start;
    let pct = if length > 0.0 {
        (dist - start) / length
    } else {
        0.0
    };
    Some(pts[idx - 1].lerp(pts[idx], pct))
}
