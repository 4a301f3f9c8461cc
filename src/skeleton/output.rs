use crate::error::{Result, SweepError};
use crate::math::Point2;

use super::wavefront::Wavefront;

/// One interior arc of the skeleton.
#[derive(Debug, Clone)]
pub struct SkeletonEdge {
    /// Arc start, the earlier wavefront vertex.
    pub begin: Point2,
    /// Arc end, where the vertex died.
    pub end: Point2,
    /// Indices of the two original edges whose fronts traced this arc.
    pub faces: (usize, usize),
}

/// The face swept by one original edge, as a closed counter-clockwise ring.
#[derive(Debug, Clone)]
pub struct Facet {
    /// Index of the original edge this face belongs to.
    pub edge: usize,
    /// Ring of the face, starting with the original edge's two endpoints.
    pub points: Vec<Point2>,
}

/// A computed straight skeleton.
#[derive(Debug, Clone)]
pub struct SkeletonOutput {
    /// One facet per original edge, in input order.
    pub facets: Vec<Facet>,
    /// All interior arcs.
    pub edges: Vec<SkeletonEdge>,
}

/// Assembles one facet per original edge by chaining its arcs end to end.
///
/// Each facet starts with the original edge `begin → end` and walks arcs
/// sharing that face until it returns to `begin`. Arc endpoints born from the
/// same collision carry identical coordinates, so matching within epsilon is
/// exact in practice.
pub fn assemble(wf: &Wavefront, arcs: Vec<SkeletonEdge>, epsilon: f64) -> Result<SkeletonOutput> {
    let mut facets = Vec::with_capacity(wf.edges().len());

    for (index, edge) in wf.edges().iter().enumerate() {
        let segments: Vec<&SkeletonEdge> = arcs
            .iter()
            .filter(|arc| arc.faces.0 == index || arc.faces.1 == index)
            .collect();
        let mut used = vec![false; segments.len()];

        let mut points = vec![edge.begin, edge.end];
        let mut current = edge.end;
        loop {
            let next = segments.iter().enumerate().find_map(|(i, arc)| {
                if used[i] {
                    return None;
                }
                if (arc.begin - current).norm() <= epsilon {
                    used[i] = true;
                    Some(arc.end)
                } else if (arc.end - current).norm() <= epsilon {
                    used[i] = true;
                    Some(arc.begin)
                } else {
                    None
                }
            });
            let Some(next) = next else {
                return Err(SweepError::OpenFacet { edge: index }.into());
            };
            if (next - edge.begin).norm() <= epsilon {
                break;
            }
            points.push(next);
            current = next;
        }

        facets.push(Facet {
            edge: index,
            points,
        });
    }

    Ok(SkeletonOutput {
        facets,
        edges: arcs,
    })
}
