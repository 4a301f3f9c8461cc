use std::collections::{BTreeMap, BTreeSet};

use crate::math::Point2;

use super::events::{is_valid, Event, EventKind, EventQueue};
use super::wavefront::{VertexId, Wavefront};

/// A group of simultaneous events meeting at one point.
#[derive(Debug)]
pub struct Cluster {
    /// Representative collision point, taken from the first event.
    pub point: Point2,
    /// Earliest event time in the group.
    pub time: f64,
    pub events: Vec<Event>,
}

/// The resolved shape of a cluster's effect on one loop.
#[derive(Debug)]
pub enum Chain {
    /// One wavefront segment collapses: two adjacent vertices merge.
    Edge { run: Vec<VertexId> },
    /// Several consecutive segments collapse at once: the whole run of
    /// vertices merges into one.
    MultiEdge { run: Vec<VertexId> },
    /// An entire loop collapses to the point and vanishes.
    Pick { cycle: Vec<VertexId> },
    /// A reflex vertex strikes a non-adjacent wavefront segment.
    Split { vertex: VertexId, opposite: usize },
}

/// Drains every still-valid event within `epsilon` of the first event's time.
///
/// Events pushed while the batch is being applied land in a later batch even
/// when they carry the same time.
pub fn gather_batch(
    wf: &Wavefront,
    queue: &mut EventQueue,
    first: Event,
    epsilon: f64,
) -> Vec<Event> {
    let threshold = first.time.0 + epsilon;
    let mut batch = vec![first];
    while queue.peek_time().is_some_and(|t| t <= threshold) {
        if let Some(event) = queue.pop() {
            if is_valid(wf, &event) {
                batch.push(event);
            }
        }
    }
    batch
}

/// Groups a batch by collision point, within `epsilon`.
///
/// Clusters come back sorted by their representative point, so simultaneous
/// clusters resolve in a reproducible order.
#[must_use]
pub fn cluster_events(batch: Vec<Event>, epsilon: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();
    for event in batch {
        match clusters
            .iter_mut()
            .find(|c| (c.point - event.point).norm() <= epsilon)
        {
            Some(cluster) => {
                cluster.time = cluster.time.min(event.time.0);
                cluster.events.push(event);
            }
            None => clusters.push(Cluster {
                point: event.point,
                time: event.time.0,
                events: vec![event],
            }),
        }
    }
    clusters.sort_by(|a, b| {
        a.point
            .x
            .total_cmp(&b.point.x)
            .then_with(|| a.point.y.total_cmp(&b.point.y))
    });
    clusters
}

/// Resolves one cluster into chains.
///
/// Edge events are stitched into maximal runs of adjacent collapsing
/// segments; a run that closes on itself is a whole loop vanishing. Split
/// events come last so loop surgery happens only after the collapses at the
/// same point are settled.
#[must_use]
pub fn classify(wf: &Wavefront, cluster: &Cluster) -> Vec<Chain> {
    let mut successor: BTreeMap<VertexId, VertexId> = BTreeMap::new();
    let mut splits = Vec::new();

    for event in &cluster.events {
        if !is_valid(wf, event) {
            continue;
        }
        match event.kind {
            EventKind::Edge { va, vb, .. } => {
                successor.insert(va, vb);
            }
            EventKind::Split { vertex, opposite } => {
                splits.push(Chain::Split { vertex, opposite });
            }
        }
    }

    let targets: BTreeSet<VertexId> = successor.values().copied().collect();
    let heads: Vec<VertexId> = successor
        .keys()
        .filter(|id| !targets.contains(id))
        .copied()
        .collect();

    let mut chains = Vec::new();
    for head in heads {
        let mut run = vec![head];
        let mut current = head;
        while let Some(&next) = successor.get(&current) {
            successor.remove(&current);
            run.push(next);
            current = next;
        }
        // A run spanning its whole loop is the loop collapsing outright.
        if wf.vertex(run[0]).prev == run[run.len() - 1] {
            chains.push(Chain::Pick { cycle: run });
        } else if run.len() == 2 {
            chains.push(Chain::Edge { run });
        } else {
            chains.push(Chain::MultiEdge { run });
        }
    }

    // Leftover links form cycles: loops whose every segment collapses here.
    while let Some((&start, _)) = successor.iter().next() {
        let mut cycle = vec![start];
        let mut current = start;
        while let Some(&next) = successor.get(&current) {
            successor.remove(&current);
            if next == start {
                break;
            }
            cycle.push(next);
            current = next;
        }
        chains.push(Chain::Pick { cycle });
    }

    chains.extend(splits);
    chains
}
