use log::{debug, trace};

use crate::error::{Result, SweepError};
use crate::math::{cross, Point2, Vector2};

use super::chains::{classify, cluster_events, gather_batch, Chain};
use super::events::{
    edge_event_for_pair, events_for_vertex, is_valid, split_events_for_vertex, Event, EventQueue,
};
use super::output::SkeletonEdge;
use super::wavefront::{VertexId, Wavefront, WavefrontVertex};
use super::SkeletonConfig;

/// Runs the wavefront sweep to completion and returns the skeleton arcs.
///
/// Events come out of the queue in time order and are resolved in batches:
/// all simultaneous events are grouped by collision point, each point group
/// is classified into chains, and every chain updates the wavefront
/// atomically. Loops that degenerate to two vertices close into ridge arcs at
/// the end of each batch.
pub fn run(wf: &mut Wavefront, config: &SkeletonConfig) -> Result<Vec<SkeletonEdge>> {
    let epsilon = config.epsilon;
    let mut queue = EventQueue::new();

    for id in wf.vertex_ids() {
        let next = wf.vertex(id).next;
        if let Some(event) = edge_event_for_pair(wf, id, next, epsilon) {
            queue.push(event);
        }
        for event in split_events_for_vertex(wf, id, epsilon) {
            queue.push(event);
        }
    }

    let mut arcs: Vec<SkeletonEdge> = Vec::new();
    let mut resolutions = 0_usize;

    while let Some(first) = pop_valid(wf, &mut queue) {
        let batch = gather_batch(wf, &mut queue, first, epsilon);
        trace!("resolving {} events at t={}", batch.len(), first.time.0);

        let mut touched: Vec<VertexId> = Vec::new();
        for cluster in cluster_events(batch, epsilon) {
            for chain in classify(wf, &cluster) {
                resolutions += 1;
                if resolutions > config.max_chain_resolutions {
                    return Err(SweepError::SafetyBoundExceeded {
                        limit: config.max_chain_resolutions,
                    }
                    .into());
                }
                apply_chain(
                    wf,
                    &mut queue,
                    &mut arcs,
                    &mut touched,
                    chain,
                    cluster.point,
                    cluster.time,
                    epsilon,
                );
            }
        }
        close_collapsed_loops(wf, &mut arcs, &touched, epsilon);
    }

    if wf.live_count() > 0 {
        return Err(SweepError::StalledWavefront {
            remaining: wf.live_count(),
        }
        .into());
    }
    debug!(
        "sweep finished: {} arcs after {} chain resolutions",
        arcs.len(),
        resolutions
    );
    Ok(arcs)
}

fn pop_valid(wf: &Wavefront, queue: &mut EventQueue) -> Option<Event> {
    while let Some(event) = queue.pop() {
        if is_valid(wf, &event) {
            return Some(event);
        }
        trace!("discarding stale event at t={}", event.time.0);
    }
    None
}

#[allow(clippy::too_many_arguments)]
fn apply_chain(
    wf: &mut Wavefront,
    queue: &mut EventQueue,
    arcs: &mut Vec<SkeletonEdge>,
    touched: &mut Vec<VertexId>,
    chain: Chain,
    point: Point2,
    time: f64,
    epsilon: f64,
) {
    match chain {
        Chain::Edge { run } | Chain::MultiEdge { run } => {
            // Chains applied earlier in this batch may have reshaped the
            // loop; the run must still be a live adjacent path.
            for pair in run.windows(2) {
                if wf.edge_between(pair[0], pair[1]).is_none() {
                    debug!("dropping stale collapse run at t={time}");
                    return;
                }
            }
            if wf.vertex(run[0]).prev == run[run.len() - 1] {
                retire_cycle(wf, arcs, &run, point, epsilon);
                return;
            }
            let (merged, retired) = wf.merge_chain(&run, point, time);
            for vertex in &retired {
                record_arc(arcs, vertex, point, epsilon);
            }
            for event in events_for_vertex(wf, merged, epsilon) {
                queue.push(event);
            }
            touched.push(merged);
        }
        Chain::Pick { cycle } => {
            retire_cycle(wf, arcs, &cycle, point, epsilon);
        }
        Chain::Split { vertex, opposite } => {
            if wf.get(vertex).is_none() {
                return;
            }
            let Some(holder) = find_holder(wf, vertex, opposite, &point, epsilon) else {
                debug!("split at t={time} lost its wavefront segment, discarding");
                return;
            };
            let (v1, v2, retired) = wf.split_loop(vertex, holder, point, time);
            record_arc(arcs, &retired, point, epsilon);
            for id in [v1, v2] {
                for event in events_for_vertex(wf, id, epsilon) {
                    queue.push(event);
                }
                touched.push(id);
            }
        }
    }
}

fn retire_cycle(
    wf: &mut Wavefront,
    arcs: &mut Vec<SkeletonEdge>,
    cycle: &[VertexId],
    point: Point2,
    epsilon: f64,
) {
    for &id in cycle {
        if wf.get(id).is_some() {
            let vertex = wf.retire(id);
            record_arc(arcs, &vertex, point, epsilon);
        }
    }
}

/// Finds the live vertex pair currently holding the wavefront segment of
/// `opposite` that contains `point`: the returned id carries `opposite` as
/// its left edge, its predecessor as the segment's other end. The point must
/// lie between the pair's bisectors.
fn find_holder(
    wf: &Wavefront,
    vertex: VertexId,
    opposite: usize,
    point: &Point2,
    epsilon: f64,
) -> Option<VertexId> {
    let dir_to = |from: &Point2| -> Option<Vector2> {
        let d = point - from;
        let norm = d.norm();
        (norm > epsilon).then(|| d / norm)
    };

    for id in wf.vertex_ids() {
        let end = wf.vertex(id);
        if end.edge_left != opposite || id == vertex {
            continue;
        }
        let begin_id = end.prev;
        if begin_id == vertex {
            continue;
        }
        let begin = wf.vertex(begin_id);
        let (Some(from_begin), Some(from_end)) = (dir_to(&begin.point), dir_to(&end.point)) else {
            continue;
        };
        let begin_side = cross(&begin.bisector.dir.normalize(), &from_begin);
        let end_side = cross(&end.bisector.dir.normalize(), &from_end);
        if begin_side <= epsilon && end_side >= -epsilon {
            return Some(id);
        }
    }
    None
}

fn record_arc(arcs: &mut Vec<SkeletonEdge>, vertex: &WavefrontVertex, point: Point2, epsilon: f64) {
    if (point - vertex.point).norm() > epsilon {
        arcs.push(SkeletonEdge {
            begin: vertex.point,
            end: point,
            faces: (vertex.edge_left, vertex.edge_right),
        });
    }
}

/// Closes every loop that degenerated to two vertices during this batch.
///
/// A two-vertex loop is a front pinched to a segment. Converging bisectors
/// meet at a last interior node; parallel bisectors (opposing fronts of equal
/// slope) leave a ridge connecting the two vertices directly.
fn close_collapsed_loops(
    wf: &mut Wavefront,
    arcs: &mut Vec<SkeletonEdge>,
    touched: &[VertexId],
    epsilon: f64,
) {
    for &id in touched {
        let Some(vertex) = wf.get(id) else {
            continue;
        };
        let partner_id = vertex.next;
        if partner_id == id {
            wf.retire(id);
            continue;
        }
        if wf.vertex(partner_id).next != id {
            continue;
        }
        let a = wf.retire(id);
        let b = wf.retire(partner_id);
        match a.bisector.intersect(&b.bisector, epsilon) {
            Some(meet) => {
                record_arc(arcs, &a, meet, epsilon);
                record_arc(arcs, &b, meet, epsilon);
            }
            None => {
                if (b.point - a.point).norm() > epsilon {
                    arcs.push(SkeletonEdge {
                        begin: a.point,
                        end: b.point,
                        faces: (a.edge_left, a.edge_right),
                    });
                }
            }
        }
        debug!("closed two-vertex loop");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn sweep(ring: &[Point2]) -> Vec<SkeletonEdge> {
        let config = SkeletonConfig::default();
        let mut wf = Wavefront::new(config.epsilon);
        wf.seed_ring(ring);
        run(&mut wf, &config).unwrap()
    }

    fn arc_between(arcs: &[SkeletonEdge], a: Point2, b: Point2) -> bool {
        arcs.iter().any(|arc| {
            ((arc.begin - a).norm() < 1e-9 && (arc.end - b).norm() < 1e-9)
                || ((arc.begin - b).norm() < 1e-9 && (arc.end - a).norm() < 1e-9)
        })
    }

    #[test]
    fn square_collapses_to_center() {
        let arcs = sweep(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]);
        assert_eq!(arcs.len(), 4);
        for arc in &arcs {
            assert!((arc.end - p(0.5, 0.5)).norm() < 1e-9);
        }
    }

    #[test]
    fn rectangle_forms_a_ridge() {
        let arcs = sweep(&[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)]);
        assert_eq!(arcs.len(), 5);
        assert!(arc_between(&arcs, p(0.5, 0.5), p(1.5, 0.5)));
        assert!(arc_between(&arcs, p(0.0, 0.0), p(0.5, 0.5)));
        assert!(arc_between(&arcs, p(2.0, 1.0), p(1.5, 0.5)));
    }

    #[test]
    fn triangle_collapses_to_incenter() {
        let arcs = sweep(&[p(0.0, 0.0), p(4.0, 0.0), p(0.0, 3.0)]);
        assert_eq!(arcs.len(), 3);
        // Incenter of the 3-4-5 right triangle.
        for arc in &arcs {
            approx::assert_relative_eq!(arc.end, p(1.0, 1.0), epsilon = 1e-9);
        }
    }

    #[test]
    fn l_shape_resolves_reflex_corner() {
        let arcs = sweep(&[
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ]);
        // The reflex corner runs to (0.5, 0.5); each arm keeps its ridge.
        assert!(arc_between(&arcs, p(1.0, 1.0), p(0.5, 0.5)));
        assert!(arc_between(&arcs, p(0.5, 0.5), p(2.5, 0.5)));
        assert!(arc_between(&arcs, p(0.5, 0.5), p(0.5, 2.5)));
        assert!(arc_between(&arcs, p(0.0, 0.0), p(0.5, 0.5)));
    }

    #[test]
    fn every_arc_carries_two_distinct_faces() {
        let arcs = sweep(&[
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ]);
        for arc in &arcs {
            assert_ne!(arc.faces.0, arc.faces.1);
            assert!(arc.faces.0 < 6);
            assert!(arc.faces.1 < 6);
        }
    }

    #[test]
    fn safety_bound_aborts_runaway_sweep() {
        let config = SkeletonConfig {
            max_chain_resolutions: 1,
            ..SkeletonConfig::default()
        };
        let mut wf = Wavefront::new(config.epsilon);
        // Two chain resolutions: one per ridge node.
        wf.seed_ring(&[p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)]);
        let err = run(&mut wf, &config).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SkelisError::Sweep(SweepError::SafetyBoundExceeded { limit: 1 })
        ));
    }
}
