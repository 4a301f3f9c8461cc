use super::{cross, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns `true` if the ring is wound counter-clockwise.
#[must_use]
pub fn is_ccw(points: &[Point2]) -> bool {
    signed_area(points) > 0.0
}

/// Index of the first coincident consecutive point pair, if any.
#[must_use]
pub fn find_coincident_points(points: &[Point2], epsilon: f64) -> Option<usize> {
    let n = points.len();
    (0..n).find(|&i| {
        let j = (i + 1) % n;
        (points[j] - points[i]).norm() < epsilon
    })
}

/// Index of the first collinear consecutive point triple, if any.
///
/// A triple counts as collinear when the turn determinant at its middle point
/// vanishes within `epsilon`.
#[must_use]
pub fn find_collinear_triple(points: &[Point2], epsilon: f64) -> Option<usize> {
    let n = points.len();
    (0..n).find(|&i| {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];
        cross(&(curr - prev), &(next - curr)).abs() < epsilon
    })
}

/// Returns `true` if the bounded segments `a0 → a1` and `b0 → b1` intersect.
///
/// Covers proper crossings and epsilon-collinear overlaps and touches.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2, epsilon: f64) -> bool {
    let da = a1 - a0;
    let db = b1 - b0;
    let d1 = cross(&da, &(b0 - a0));
    let d2 = cross(&da, &(b1 - a0));
    let d3 = cross(&db, &(a0 - b0));
    let d4 = cross(&db, &(a1 - b0));

    if d1 * d2 < -epsilon && d3 * d4 < -epsilon {
        return true;
    }

    let on_segment = |p: &Point2, q0: &Point2, q1: &Point2| {
        p.x >= q0.x.min(q1.x) - epsilon
            && p.x <= q0.x.max(q1.x) + epsilon
            && p.y >= q0.y.min(q1.y) - epsilon
            && p.y <= q0.y.max(q1.y) + epsilon
    };

    (d1.abs() < epsilon && on_segment(b0, a0, a1))
        || (d2.abs() < epsilon && on_segment(b1, a0, a1))
        || (d3.abs() < epsilon && on_segment(a0, b0, b1))
        || (d4.abs() < epsilon && on_segment(a1, b0, b1))
}

/// Pair of non-adjacent segment indices at which the ring crosses itself.
#[must_use]
pub fn find_self_intersection(points: &[Point2], epsilon: f64) -> Option<(usize, usize)> {
    let n = points.len();
    for i in 0..n {
        for j in i + 1..n {
            // Skip segments sharing a vertex, including the closing pair.
            if j == i + 1 || (i == 0 && j == n - 1) {
                continue;
            }
            let a0 = &points[i];
            let a1 = &points[(i + 1) % n];
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_intersect(a0, a1, b0, b1, epsilon) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Even-odd containment test of a point in a closed ring.
#[must_use]
pub fn contains_point(points: &[Point2], point: &Point2) -> bool {
    let n = points.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &points[i];
        let pj = &points[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
