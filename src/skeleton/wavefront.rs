use slotmap::SlotMap;

use crate::math::line_2d::Ray2;
use crate::math::{cross, Point2, Vector2};

slotmap::new_key_type! {
    /// Unique identifier for a live wavefront vertex.
    ///
    /// Keys are generational: once a vertex is retired its key never resolves
    /// again, which is what makes lazy event invalidation safe.
    pub struct VertexId;
}

/// An original polygon edge. Immutable over the whole sweep.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Start point, in ring order.
    pub begin: Point2,
    /// End point, in ring order.
    pub end: Point2,
    /// Unit direction from `begin` to `end`.
    pub dir: Vector2,
    /// Bisector of the ring vertex at `begin`, frozen at sweep start.
    pub bisector_begin: Ray2,
    /// Bisector of the ring vertex at `end`, frozen at sweep start.
    pub bisector_end: Ray2,
}

impl Edge {
    /// Signed distance of `point` from the carrying line.
    ///
    /// Positive on the interior side; this is the event-time metric.
    #[must_use]
    pub fn distance(&self, point: &Point2) -> f64 {
        let normal = Vector2::new(-self.dir.y, self.dir.x);
        normal.dot(&(point - self.begin))
    }
}

/// A live vertex of the shrinking wavefront.
#[derive(Debug, Clone)]
pub struct WavefrontVertex {
    /// Position at birth.
    pub point: Point2,
    /// Shrink distance at which the vertex was created.
    pub time: f64,
    /// Ray along which the vertex moves.
    pub bisector: Ray2,
    /// Interior angle above 180 degrees.
    pub reflex: bool,
    /// Original edge arriving at this vertex.
    pub edge_left: usize,
    /// Original edge leaving this vertex.
    pub edge_right: usize,
    /// Previous vertex in the loop.
    pub prev: VertexId,
    /// Next vertex in the loop.
    pub next: VertexId,
}

/// The active vertex structure: one or more circular doubly-linked loops of
/// live vertices over a slotmap arena, plus the immutable original edges.
///
/// The wavefront is the sole owner of its vertices; every topology operation
/// here preserves the prev/next adjacency invariant and touches only the
/// vertices involved. Operating on a retired vertex is a contract violation
/// and panics.
#[derive(Debug)]
pub struct Wavefront {
    vertices: SlotMap<VertexId, WavefrontVertex>,
    edges: Vec<Edge>,
    epsilon: f64,
}

/// Bisector ray of a corner between incoming direction `d_in` and outgoing
/// direction `d_out`, with its reflex classification.
///
/// Rings are oriented with the interior on the left, so a corner is reflex
/// when it turns right. A straight continuation falls back to the shared
/// inward normal; antiparallel directions sum to the ridge direction.
#[must_use]
pub fn bisector_ray(point: Point2, d_in: &Vector2, d_out: &Vector2, epsilon: f64) -> (Ray2, bool) {
    let sum = d_out - d_in;
    let reflex = cross(d_in, d_out) < -epsilon;
    let dir = if sum.norm() < epsilon {
        Vector2::new(-d_in.y, d_in.x)
    } else if reflex {
        -sum
    } else {
        sum
    };
    (Ray2::new(point, dir), reflex)
}

impl Wavefront {
    /// Creates an empty wavefront.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        Self {
            vertices: SlotMap::with_key(),
            edges: Vec::new(),
            epsilon,
        }
    }

    /// Seeds one ring (outer or hole) as a new loop.
    ///
    /// The ring must be wound with the polygon interior on its left: outer
    /// rings counter-clockwise, hole rings clockwise.
    pub fn seed_ring(&mut self, ring: &[Point2]) -> Vec<VertexId> {
        let n = ring.len();
        let base = self.edges.len();

        let dirs: Vec<Vector2> = (0..n)
            .map(|i| (ring[(i + 1) % n] - ring[i]).normalize())
            .collect();

        let bisectors: Vec<(Ray2, bool)> = (0..n)
            .map(|i| bisector_ray(ring[i], &dirs[(i + n - 1) % n], &dirs[i], self.epsilon))
            .collect();

        for i in 0..n {
            self.edges.push(Edge {
                begin: ring[i],
                end: ring[(i + 1) % n],
                dir: dirs[i],
                bisector_begin: bisectors[i].0,
                bisector_end: bisectors[(i + 1) % n].0,
            });
        }

        let ids: Vec<VertexId> = (0..n)
            .map(|i| {
                let (bisector, reflex) = bisectors[i];
                self.vertices.insert(WavefrontVertex {
                    point: ring[i],
                    time: 0.0,
                    bisector,
                    reflex,
                    edge_left: base + (i + n - 1) % n,
                    edge_right: base + i,
                    prev: VertexId::default(),
                    next: VertexId::default(),
                })
            })
            .collect();

        for i in 0..n {
            let id = ids[i];
            self.vertices[id].prev = ids[(i + n - 1) % n];
            self.vertices[id].next = ids[(i + 1) % n];
        }

        ids
    }

    /// Returns the vertex data, or `None` if it has been retired.
    #[must_use]
    pub fn get(&self, id: VertexId) -> Option<&WavefrontVertex> {
        self.vertices.get(id)
    }

    /// Returns the vertex data. Panics if the vertex has been retired.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &WavefrontVertex {
        &self.vertices[id]
    }

    /// Returns the original edge with the given index.
    #[must_use]
    pub fn edge(&self, index: usize) -> &Edge {
        &self.edges[index]
    }

    /// All original edges, in ring order, outer ring first.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of live vertices.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.vertices.len()
    }

    /// Snapshot of all live vertex ids.
    #[must_use]
    pub fn vertex_ids(&self) -> Vec<VertexId> {
        self.vertices.keys().collect()
    }

    /// The original edge between two vertices, if they are live and adjacent.
    #[must_use]
    pub fn edge_between(&self, va: VertexId, vb: VertexId) -> Option<usize> {
        let a = self.vertices.get(va)?;
        self.vertices.get(vb)?;
        (a.next == vb).then_some(a.edge_right)
    }

    /// Vertices of the loop containing `start`, in order.
    #[must_use]
    pub fn loop_vertices(&self, start: VertexId) -> Vec<VertexId> {
        let mut out = vec![start];
        let mut current = self.vertices[start].next;
        while current != start && out.len() <= self.vertices.len() {
            out.push(current);
            current = self.vertices[current].next;
        }
        out
    }

    /// Removes a retiring vertex and returns its data.
    ///
    /// Panics if the vertex was already retired; correct event invalidation
    /// never retires twice.
    pub fn retire(&mut self, id: VertexId) -> WavefrontVertex {
        match self.vertices.remove(id) {
            Some(vertex) => vertex,
            None => panic!("vertex {id:?} retired twice"),
        }
    }

    /// Creates a vertex at `point` between the given original edges and wires
    /// it between `prev` and `next`.
    pub fn insert_vertex(
        &mut self,
        point: Point2,
        time: f64,
        edge_left: usize,
        edge_right: usize,
        prev: VertexId,
        next: VertexId,
    ) -> VertexId {
        let d_in = self.edges[edge_left].dir;
        let d_out = self.edges[edge_right].dir;
        let (bisector, reflex) = bisector_ray(point, &d_in, &d_out, self.epsilon);
        let id = self.vertices.insert(WavefrontVertex {
            point,
            time,
            bisector,
            reflex,
            edge_left,
            edge_right,
            prev,
            next,
        });
        self.vertices[prev].next = id;
        self.vertices[next].prev = id;
        id
    }

    /// Collapses a run of adjacent vertices into one new vertex at `point`.
    ///
    /// The run must hold at least two vertices and must not cover its whole
    /// loop. Returns the new vertex and the retired data, in run order.
    pub fn merge_chain(
        &mut self,
        run: &[VertexId],
        point: Point2,
        time: f64,
    ) -> (VertexId, Vec<WavefrontVertex>) {
        let first = run[0];
        let last = run[run.len() - 1];
        let prev = self.vertices[first].prev;
        let next = self.vertices[last].next;
        let edge_left = self.vertices[first].edge_left;
        let edge_right = self.vertices[last].edge_right;
        assert!(
            !run.contains(&prev),
            "merge_chain run covers its whole loop"
        );

        let retired: Vec<WavefrontVertex> = run.iter().map(|&id| self.retire(id)).collect();
        let id = self.insert_vertex(point, time, edge_left, edge_right, prev, next);
        (id, retired)
    }

    /// Applies a split event: the reflex `vertex` strikes the wavefront
    /// segment of original edge `holder.edge_left`, held between `holder` and
    /// its predecessor.
    ///
    /// The struck vertex is replaced by two new vertices at `point`. When the
    /// reflex vertex and the holder share a loop, that loop divides in two;
    /// when they live on different loops (a hole striking the outer front),
    /// the loops merge into one.
    pub fn split_loop(
        &mut self,
        vertex: VertexId,
        holder: VertexId,
        point: Point2,
        time: f64,
    ) -> (VertexId, VertexId, WavefrontVertex) {
        let opposite = self.vertices[holder].edge_left;
        let begin_holder = self.vertices[holder].prev;
        let retired = self.retire(vertex);

        let v1 = self.insert_vertex(
            point,
            time,
            retired.edge_left,
            opposite,
            retired.prev,
            holder,
        );
        let v2 = self.insert_vertex(
            point,
            time,
            opposite,
            retired.edge_right,
            begin_holder,
            retired.next,
        );
        (v1, v2, retired)
    }
}
