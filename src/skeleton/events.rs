use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::math::line_2d::{line_line_intersect, Ray2};
use crate::math::{cross, Point2};

use super::wavefront::{VertexId, Wavefront};

/// What a queued event proposes to do to the wavefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The wavefront segment of `edge` between the adjacent vertices `va` and
    /// `vb` collapses to a point.
    Edge {
        edge: usize,
        va: VertexId,
        vb: VertexId,
    },
    /// The reflex `vertex` strikes the interior of the wavefront segment
    /// carried by the original edge `opposite`.
    Split { vertex: VertexId, opposite: usize },
}

/// A candidate event, ordered by time with the collision point as tiebreak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Shrink distance at which the collision happens.
    pub time: OrderedFloat<f64>,
    /// Where the collision happens.
    pub point: Point2,
    /// Proposed wavefront change.
    pub kind: EventKind,
}

impl Eq for Event {}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.point.x.total_cmp(&other.point.x))
            .then_with(|| self.point.y.total_cmp(&other.point.y))
    }
}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-heap of candidate events.
///
/// Events are never removed when they become obsolete; they are checked
/// against the live wavefront as they are popped.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Event>>,
}

impl EventQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.heap.push(Reverse(event));
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.heap.pop().map(|Reverse(event)| event)
    }

    /// Time of the earliest queued event.
    #[must_use]
    pub fn peek_time(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(event)| event.time.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

/// Returns `true` if the event still matches the live wavefront.
#[must_use]
pub fn is_valid(wf: &Wavefront, event: &Event) -> bool {
    match event.kind {
        EventKind::Edge { edge, va, vb } => wf.edge_between(va, vb) == Some(edge),
        EventKind::Split { vertex, .. } => wf.get(vertex).is_some(),
    }
}

/// Edge-collapse candidate for the adjacent pair `va → vb`.
///
/// The shared edge's wavefront segment collapses where the two vertex
/// bisectors cross; the event time is the signed distance of that point from
/// the edge's carrying line.
#[must_use]
pub fn edge_event_for_pair(
    wf: &Wavefront,
    va: VertexId,
    vb: VertexId,
    epsilon: f64,
) -> Option<Event> {
    let a = wf.get(va)?;
    let b = wf.get(vb)?;
    let point = a.bisector.intersect(&b.bisector, epsilon)?;
    let time = wf.edge(a.edge_right).distance(&point);
    if time < -epsilon {
        return None;
    }
    Some(Event {
        time: OrderedFloat(time.max(0.0)),
        point,
        kind: EventKind::Edge {
            edge: a.edge_right,
            va,
            vb,
        },
    })
}

/// All split candidates of a reflex vertex against the original edges.
///
/// Every candidate is returned rather than only the nearest one; stale
/// candidates are discarded at pop time. For each non-adjacent original edge
/// the candidate point lies on the bisector of the vertex's own edge line and
/// the opposite edge line, and must fall inside the wedge the opposite edge
/// sweeps: on its interior side and between its frozen endpoint bisectors.
#[must_use]
pub fn split_events_for_vertex(wf: &Wavefront, id: VertexId, epsilon: f64) -> Vec<Event> {
    let Some(v) = wf.get(id) else {
        return Vec::new();
    };
    let mut events = Vec::new();
    if !v.reflex {
        return events;
    }

    for (index, edge) in wf.edges().iter().enumerate() {
        if index == v.edge_left || index == v.edge_right {
            continue;
        }

        // Pick whichever own edge is less parallel to the tested edge, so
        // the carrying lines cross at a well-conditioned angle.
        let d_left = wf.edge(v.edge_left).dir;
        let d_right = wf.edge(v.edge_right).dir;
        let own = if d_left.dot(&edge.dir).abs() < d_right.dot(&edge.dir).abs() {
            wf.edge(v.edge_left)
        } else {
            wf.edge(v.edge_right)
        };

        let Some((t, _)) =
            line_line_intersect(&own.begin, &own.dir, &edge.begin, &edge.dir, epsilon)
        else {
            continue;
        };
        let meet = own.begin + own.dir * t;
        if (v.point - meet).norm() < epsilon {
            continue;
        }

        // Bisector of the angle between the vertex's own edge line and the
        // opposite edge line, opening towards the vertex.
        let line_vec = (v.point - meet).normalize();
        let mut edge_vec = edge.dir;
        if line_vec.dot(&edge_vec) < 0.0 {
            edge_vec = -edge_vec;
        }
        let bisector_dir = edge_vec + line_vec;
        if bisector_dir.norm() < epsilon {
            continue;
        }

        let Some(point) = Ray2::new(meet, bisector_dir).intersect(&v.bisector, epsilon) else {
            continue;
        };

        if !inside_swept_wedge(edge, &point, epsilon) {
            continue;
        }

        let time = edge.distance(&point);
        if time < -epsilon {
            continue;
        }
        events.push(Event {
            time: OrderedFloat(time.max(0.0)),
            point,
            kind: EventKind::Split {
                vertex: id,
                opposite: index,
            },
        });
    }
    events
}

/// All candidates involving a vertex: the edge events of its two adjacent
/// pairs, plus split events when the vertex is reflex.
#[must_use]
pub fn events_for_vertex(wf: &Wavefront, id: VertexId, epsilon: f64) -> Vec<Event> {
    let Some(v) = wf.get(id) else {
        return Vec::new();
    };
    let (prev, next) = (v.prev, v.next);
    let mut events = Vec::new();
    if let Some(event) = edge_event_for_pair(wf, prev, id, epsilon) {
        events.push(event);
    }
    if let Some(event) = edge_event_for_pair(wf, id, next, epsilon) {
        events.push(event);
    }
    events.extend(split_events_for_vertex(wf, id, epsilon));
    events
}

/// Checks that `point` lies strictly within the region swept by `edge`: on
/// the edge's interior side and between the bisectors frozen at its original
/// endpoints. Normalized directions keep the epsilon comparisons scale-free.
fn inside_swept_wedge(edge: &super::wavefront::Edge, point: &Point2, epsilon: f64) -> bool {
    let to_point = point - edge.begin;
    if to_point.norm() < epsilon || (point - edge.end).norm() < epsilon {
        return false;
    }
    if cross(&edge.dir, &to_point.normalize()) < -epsilon {
        return false;
    }

    let from_begin = (point - edge.bisector_begin.origin).normalize();
    let from_end = (point - edge.bisector_end.origin).normalize();
    cross(&edge.bisector_begin.dir.normalize(), &from_begin) <= epsilon
        && cross(&edge.bisector_end.dir.normalize(), &from_end) >= -epsilon
}
