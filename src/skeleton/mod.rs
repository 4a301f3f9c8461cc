//! Straight skeleton computation by wavefront shrinking.
//!
//! The polygon boundary shrinks inward at uniform speed; the traces of its
//! vertices form the skeleton arcs, and the region swept by each original
//! edge forms one facet of the output.

pub mod chains;
pub mod engine;
pub mod events;
pub mod output;
pub mod wavefront;

use crate::error::{InputError, Result};
use crate::math::polygon_2d::{
    contains_point, find_coincident_points, find_collinear_triple, find_self_intersection, is_ccw,
};
use crate::math::{Point2, DEFAULT_EPSILON};

pub use output::{Facet, SkeletonEdge, SkeletonOutput};

/// Tuning knobs of the sweep.
#[derive(Debug, Clone, Copy)]
pub struct SkeletonConfig {
    /// Zero-classification tolerance for all geometric predicates.
    ///
    /// The default suits coordinates of roughly unit scale; inputs living at
    /// very large coordinates need a proportionally larger value.
    pub epsilon: f64,
    /// Upper bound on the number of chain resolutions before the sweep gives
    /// up on the input as numerically degenerate.
    pub max_chain_resolutions: usize,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_chain_resolutions: 10_000,
        }
    }
}

/// Computes the straight skeleton of a simple polygon.
///
/// The ring may be wound either way and must not repeat its first point.
///
/// # Errors
///
/// Returns an [`InputError`] for structurally invalid rings and a
/// [`crate::error::SweepError`] when the sweep cannot resolve the input.
pub fn compute(outer: &[Point2]) -> Result<SkeletonOutput> {
    compute_with_config(outer, &[], &SkeletonConfig::default())
}

/// Computes the straight skeleton of a polygon with holes.
///
/// Each hole must be wound opposite to the outer ring and lie inside it.
///
/// # Errors
///
/// See [`compute`].
pub fn compute_with_holes(outer: &[Point2], holes: &[Vec<Point2>]) -> Result<SkeletonOutput> {
    compute_with_config(outer, holes, &SkeletonConfig::default())
}

/// Computes the straight skeleton with explicit tuning.
///
/// Facet and arc face indices refer to the rings after orientation
/// normalization: the outer ring counter-clockwise, holes clockwise, numbered
/// outer ring first, then the holes in input order.
///
/// # Errors
///
/// See [`compute`].
pub fn compute_with_config(
    outer: &[Point2],
    holes: &[Vec<Point2>],
    config: &SkeletonConfig,
) -> Result<SkeletonOutput> {
    let epsilon = config.epsilon;
    validate_ring(outer, epsilon)?;
    for hole in holes {
        validate_ring(hole, epsilon)?;
    }

    let outer_ccw = is_ccw(outer);
    let mut outer_ring = outer.to_vec();
    if !outer_ccw {
        outer_ring.reverse();
    }

    let mut hole_rings = Vec::with_capacity(holes.len());
    for (index, hole) in holes.iter().enumerate() {
        if is_ccw(hole) == outer_ccw {
            return Err(InputError::HoleOrientation { hole: index }.into());
        }
        if !hole.iter().all(|p| contains_point(&outer_ring, p)) {
            return Err(InputError::HoleOutsideOuter { hole: index }.into());
        }
        let mut ring = hole.clone();
        if is_ccw(&ring) {
            ring.reverse();
        }
        hole_rings.push(ring);
    }

    let mut wf = wavefront::Wavefront::new(epsilon);
    wf.seed_ring(&outer_ring);
    for ring in &hole_rings {
        wf.seed_ring(ring);
    }

    let arcs = engine::run(&mut wf, config)?;
    output::assemble(&wf, arcs, epsilon)
}

fn validate_ring(ring: &[Point2], epsilon: f64) -> Result<()> {
    if ring.len() < 3 {
        return Err(InputError::TooFewPoints { count: ring.len() }.into());
    }
    if let Some(index) = find_coincident_points(ring, epsilon) {
        return Err(InputError::CoincidentPoints { index }.into());
    }
    if let Some(index) = find_collinear_triple(ring, epsilon) {
        return Err(InputError::CollinearTriple { index }.into());
    }
    if let Some((first, second)) = find_self_intersection(ring, epsilon) {
        return Err(InputError::SelfIntersecting { first, second }.into());
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SkelisError;
    use crate::math::polygon_2d::signed_area;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square(size: f64) -> Vec<Point2> {
        vec![
            p(0.0, 0.0),
            p(size, 0.0),
            p(size, size),
            p(0.0, size),
        ]
    }

    fn has_arc(output: &SkeletonOutput, a: Point2, b: Point2) -> bool {
        output.edges.iter().any(|arc| {
            ((arc.begin - a).norm() < 1e-9 && (arc.end - b).norm() < 1e-9)
                || ((arc.begin - b).norm() < 1e-9 && (arc.end - a).norm() < 1e-9)
        })
    }

    #[test]
    fn unit_square_apex() {
        let output = compute(&square(1.0)).unwrap();
        assert_eq!(output.facets.len(), 4);
        assert_eq!(output.edges.len(), 4);
        for arc in &output.edges {
            approx::assert_relative_eq!(arc.end, p(0.5, 0.5), epsilon = 1e-9);
        }
    }

    #[test]
    fn clockwise_input_is_normalized() {
        let mut ring = square(1.0);
        ring.reverse();
        let output = compute(&ring).unwrap();
        assert_eq!(output.facets.len(), 4);
        for facet in &output.facets {
            assert!(signed_area(&facet.points) > 0.0);
        }
    }

    #[test]
    fn rectangle_ridge() {
        let output = compute(&[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)]).unwrap();
        assert!(has_arc(&output, p(0.5, 0.5), p(1.5, 0.5)));
        assert_eq!(output.facets.len(), 4);
    }

    #[test]
    fn square_with_square_hole() {
        let outer = square(4.0);
        // Clockwise, opposite to the counter-clockwise outer ring.
        let hole = vec![p(1.0, 1.0), p(1.0, 3.0), p(3.0, 3.0), p(3.0, 1.0)];
        let output = compute_with_holes(&outer, &[hole]).unwrap();
        assert_eq!(output.facets.len(), 8);
        assert_eq!(output.edges.len(), 12);
        // Ridge ring at distance 0.5 between the two boundaries.
        assert!(has_arc(&output, p(0.5, 0.5), p(3.5, 0.5)));
        assert!(has_arc(&output, p(3.5, 0.5), p(3.5, 3.5)));
        assert!(has_arc(&output, p(3.5, 3.5), p(0.5, 3.5)));
        assert!(has_arc(&output, p(0.5, 3.5), p(0.5, 0.5)));
        // Hole corners run diagonally outwards.
        assert!(has_arc(&output, p(1.0, 1.0), p(0.5, 0.5)));
        let total: f64 = output.facets.iter().map(|f| signed_area(&f.points)).sum();
        assert!((total - 12.0).abs() < 1e-9);
    }

    #[test]
    fn skeleton_stays_inside_input_bbox() {
        let ring = vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ];
        let bbox = crate::math::bbox_2d::Bbox2::from_points(&ring);
        let output = compute(&ring).unwrap();
        for arc in &output.edges {
            assert!(bbox.contains(&arc.begin, 1e-9));
            assert!(bbox.contains(&arc.end, 1e-9));
        }
        for facet in &output.facets {
            for point in &facet.points {
                assert!(bbox.contains(point, 1e-9));
            }
        }
    }

    #[test]
    fn too_few_points_rejected() {
        let err = compute(&[p(0.0, 0.0), p(1.0, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            SkelisError::Input(InputError::TooFewPoints { count: 2 })
        ));
    }

    #[test]
    fn coincident_points_rejected() {
        let ring = vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
        let err = compute(&ring).unwrap_err();
        assert!(matches!(
            err,
            SkelisError::Input(InputError::CoincidentPoints { index: 1 })
        ));
    }

    #[test]
    fn collinear_triple_rejected() {
        let ring = vec![p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
        let err = compute(&ring).unwrap_err();
        assert!(matches!(
            err,
            SkelisError::Input(InputError::CollinearTriple { .. })
        ));
    }

    #[test]
    fn self_intersection_rejected() {
        let ring = vec![p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 1.0)];
        let err = compute(&ring).unwrap_err();
        assert!(matches!(
            err,
            SkelisError::Input(InputError::SelfIntersecting { .. })
        ));
    }

    #[test]
    fn same_winding_hole_rejected() {
        let outer = square(4.0);
        let hole = vec![p(1.0, 1.0), p(1.0, 3.0), p(3.0, 3.0), p(3.0, 1.0)];
        // Outer is counter-clockwise; this hole is clockwise, which is the
        // accepted winding, so flip the outer instead to provoke the error.
        let mut outer_cw = outer;
        outer_cw.reverse();
        let err = compute_with_holes(&outer_cw, &[hole]).unwrap_err();
        assert!(matches!(
            err,
            SkelisError::Input(InputError::HoleOrientation { hole: 0 })
        ));
    }

    #[test]
    fn hole_outside_outer_rejected() {
        let outer = square(4.0);
        // Clockwise so the winding check passes and containment is what fires.
        let hole = vec![p(5.0, 5.0), p(5.0, 6.0), p(6.0, 6.0), p(6.0, 5.0)];
        let err = compute_with_holes(&outer, &[hole]).unwrap_err();
        assert!(matches!(
            err,
            SkelisError::Input(InputError::HoleOutsideOuter { hole: 0 })
        ));
    }

    #[test]
    fn custom_epsilon_scales_to_large_coordinates() {
        let ring: Vec<Point2> = square(1.0)
            .into_iter()
            .map(|q| p(q.x * 1.0e6, q.y * 1.0e6))
            .collect();
        let config = SkeletonConfig {
            epsilon: 1e-4,
            ..SkeletonConfig::default()
        };
        let output = compute_with_config(&ring, &[], &config).unwrap();
        assert_eq!(output.facets.len(), 4);
        for arc in &output.edges {
            assert!((arc.end - p(5.0e5, 5.0e5)).norm() < 1e-3);
        }
    }
}
