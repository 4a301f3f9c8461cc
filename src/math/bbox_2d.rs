use super::Point2;

/// Axis-aligned 2D bounding box grown point by point.
#[derive(Debug, Clone, Copy)]
pub struct Bbox2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Bbox2 {
    /// Creates an empty box that contains nothing until points are added.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Builds the bounding box of a point set.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let mut bbox = Self::new();
        for point in points {
            bbox.add_point(point);
        }
        bbox
    }

    /// Grows the box to contain `point`.
    pub fn add_point(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// Returns `true` if `point` lies inside the box, within `epsilon`.
    #[must_use]
    pub fn contains(&self, point: &Point2, epsilon: f64) -> bool {
        point.x >= self.min.x - epsilon
            && point.x <= self.max.x + epsilon
            && point.y >= self.min.y - epsilon
            && point.y <= self.max.y + epsilon
    }
}

impl Default for Bbox2 {
    fn default() -> Self {
        Self::new()
    }
}
