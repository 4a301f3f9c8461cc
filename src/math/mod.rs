pub mod bbox_2d;
pub mod line_2d;
pub mod polygon_2d;
pub mod split_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Default tolerance for zero-classification in geometric predicates.
///
/// Every predicate takes its epsilon explicitly; this is only the value used
/// when the caller does not configure one.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// 2D cross product (z component of the 3D cross product).
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
