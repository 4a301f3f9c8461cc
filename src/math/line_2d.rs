use super::{cross, Point2, Vector2};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
    epsilon: f64,
) -> Option<(f64, f64)> {
    let det = cross(d1, d2);
    if det.abs() < epsilon {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / det;
    let u = (dx * d1.y - dy * d1.x) / det;
    Some((t, u))
}

/// A line defined by two points lying on it.
#[derive(Debug, Clone, Copy)]
pub struct Line2 {
    /// First point on the line.
    pub p1: Point2,
    /// Second point on the line.
    pub p2: Point2,
}

impl Line2 {
    /// Creates a line through two points.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }

    /// Signed determinant of `(p1, p2, point)`.
    ///
    /// Positive when `point` lies to the left of the directed line `p1 → p2`,
    /// negative to the right, zero on the line.
    #[must_use]
    pub fn matrix_det(&self, point: &Point2) -> f64 {
        (self.p2.x - self.p1.x) * (point.y - self.p1.y)
            - (self.p2.y - self.p1.y) * (point.x - self.p1.x)
    }

    /// Returns `true` if `point` lies on or left of the directed line.
    #[must_use]
    pub fn is_on_left(&self, point: &Point2, epsilon: f64) -> bool {
        self.matrix_det(point) > -epsilon
    }

    /// Returns `true` if `point` lies on or right of the directed line.
    #[must_use]
    pub fn is_on_right(&self, point: &Point2, epsilon: f64) -> bool {
        self.matrix_det(point) < epsilon
    }

    /// Intersection with the (infinite) line carrying the segment `a → b`.
    #[must_use]
    pub fn cross_segment_line(&self, a: &Point2, b: &Point2, epsilon: f64) -> Option<Point2> {
        let d1 = self.p2 - self.p1;
        let d2 = b - a;
        let (t, _) = line_line_intersect(&self.p1, &d1, a, &d2, epsilon)?;
        Some(self.p1 + d1 * t)
    }
}

/// A ray with an origin and a direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray2 {
    /// Start point of the ray.
    pub origin: Point2,
    /// Direction of the ray, not necessarily normalized.
    pub dir: Vector2,
}

impl Ray2 {
    /// Creates a new ray.
    #[must_use]
    pub fn new(origin: Point2, dir: Vector2) -> Self {
        Self { origin, dir }
    }

    /// Linear interpolation: `origin + dir * t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.dir * t
    }

    /// Intersection point of two rays.
    ///
    /// Returns `None` for parallel rays or when the crossing lies behind
    /// either origin (parameters below `-epsilon`).
    #[must_use]
    pub fn intersect(&self, other: &Ray2, epsilon: f64) -> Option<Point2> {
        let (t, u) =
            line_line_intersect(&self.origin, &self.dir, &other.origin, &other.dir, epsilon)?;
        if t < -epsilon || u < -epsilon {
            return None;
        }
        Some(self.point_at(t))
    }

    /// Intersection point with an infinite line through `p` with direction `d`.
    #[must_use]
    pub fn intersect_line(&self, p: &Point2, d: &Vector2, epsilon: f64) -> Option<Point2> {
        let (t, _) = line_line_intersect(&self.origin, &self.dir, p, d, epsilon)?;
        if t < -epsilon {
            return None;
        }
        Some(self.point_at(t))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::DEFAULT_EPSILON;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn v(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y)
    }

    #[test]
    fn line_line_perpendicular() {
        let (t, u) =
            line_line_intersect(&p(0.0, 0.0), &v(1.0, 0.0), &p(0.5, -1.0), &v(0.0, 1.0), 1e-10)
                .unwrap();
        assert!((t - 0.5).abs() < DEFAULT_EPSILON);
        assert!((u - 1.0).abs() < DEFAULT_EPSILON);
    }

    #[test]
    fn line_line_parallel_returns_none() {
        assert!(line_line_intersect(
            &p(0.0, 0.0),
            &v(1.0, 0.0),
            &p(0.0, 1.0),
            &v(1.0, 0.0),
            1e-10
        )
        .is_none());
    }

    #[test]
    fn side_tests_diagonal() {
        let l = Line2::new(p(0.0, 0.0), p(-1.0, -1.0));
        assert!(l.is_on_left(&p(0.0, -1.0), 0.1));
        assert!(l.is_on_right(&p(-1.0, 0.0), 0.1));
    }

    #[test]
    fn side_tests_point_on_line() {
        let l = Line2::new(p(-3.0, 1.0), p(-2.0, 0.0));
        assert!(l.is_on_left(&p(-2.0, 0.0), 1e-10));
        assert!(l.is_on_right(&p(-2.0, 0.0), 1e-10));
    }

    #[test]
    fn cross_segment_line_basic() {
        let l = Line2::new(p(1.0, -1.0), p(1.0, 1.0));
        let hit = l
            .cross_segment_line(&p(0.0, 0.0), &p(2.0, 0.0), 1e-10)
            .unwrap();
        assert!((hit.x - 1.0).abs() < DEFAULT_EPSILON);
        assert!(hit.y.abs() < DEFAULT_EPSILON);
    }

    #[test]
    fn ray_intersect_ahead() {
        let a = Ray2::new(p(0.0, 0.0), v(1.0, 1.0));
        let b = Ray2::new(p(1.0, 0.0), v(-1.0, 1.0));
        let hit = a.intersect(&b, 1e-10).unwrap();
        assert!((hit.x - 0.5).abs() < DEFAULT_EPSILON);
        assert!((hit.y - 0.5).abs() < DEFAULT_EPSILON);
    }

    #[test]
    fn ray_intersect_behind_returns_none() {
        let a = Ray2::new(p(0.0, 0.0), v(1.0, 1.0));
        let b = Ray2::new(p(-1.0, 0.0), v(-1.0, 1.0));
        assert!(a.intersect(&b, 1e-10).is_none());
    }
}
