//! Built-in straight-skeleton solver.
//!
//! Implements the shrinking-wavefront formulation: every boundary vertex
//! moves along its angle bisector while the boundary offsets inward at
//! unit speed. Adjacent bisectors meeting collapse an edge (edge event);
//! a reflex vertex running into an opposite edge splits the wavefront
//! (split event). Skeleton arcs connect the nodes created by these
//! events, and each original boundary edge sweeps exactly one face.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, trace};

use crate::error::SkeletonError;
use crate::math::intersect_2d::line_line_intersect_2d;
use crate::math::vector_2d::{cross_2d, left_perp, normalize_or_zero};
use crate::math::{Point2, Vector2, DUPLICATE_TOLERANCE, NORMALIZE_FLOOR, TOLERANCE};

use super::{Skeleton, SkeletonFace, SkeletonSolver, SkeletonVertex};

/// Hard cap on processed wavefront events; exceeding it means the
/// wavefront is cycling on inadmissible geometry.
const MAX_EVENTS: usize = 16_384;

/// Slack for the normalized sector cross tests around split events.
const SECTOR_EPS: f64 = 1e-6;

/// Slack on ray parameters when intersecting bisector rays.
const PARAM_EPS: f64 = 1e-9;

/// Event nodes closer than this (in position and collapse time) are
/// merged into a single skeleton vertex.
const NODE_MERGE_EPS: f64 = 1e-6;

/// Straight-skeleton solver based on wavefront propagation.
///
/// Expects the outer ring counter-clockwise and holes clockwise
/// (mathematical y-up convention, interior on the left of every directed
/// boundary edge), each ring in explicit-closure form.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavefrontSolver;

impl WavefrontSolver {
    /// Creates a new solver instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SkeletonSolver for WavefrontSolver {
    fn solve(&self, rings: &[Vec<Point2>]) -> Result<Skeleton, SkeletonError> {
        let mut state = WavefrontState::from_rings(rings)?;
        state.propagate()?;
        let faces = state.build_faces()?;
        debug!(
            vertices = state.nodes.len(),
            arcs = state.arcs.len(),
            faces = faces.len(),
            "wavefront collapsed"
        );
        Ok(Skeleton {
            vertices: state.nodes,
            faces,
        })
    }
}

/// A ray: origin plus a (normalized) direction.
#[derive(Debug, Clone, Copy)]
struct Ray {
    origin: Point2,
    dir: Vector2,
}

/// One original boundary edge, with the initial bisector rays at its
/// endpoints (used for split-event sector tests) and the boundary node
/// indices of its endpoints (used for face reconstruction).
#[derive(Debug, Clone, Copy)]
struct BoundaryEdge {
    a: Point2,
    dir: Vector2,
    bisector_a: Ray,
    bisector_b: Ray,
    node_a: usize,
    node_b: usize,
}

/// A wavefront vertex: a moving intersection of two offsetting edges,
/// linked circularly into its active vertex list.
#[derive(Debug, Clone, Copy)]
struct WavefrontVertex {
    pos: Point2,
    bisector: Vector2,
    reflex: bool,
    edge_left: usize,
    edge_right: usize,
    prev: usize,
    next: usize,
    /// Skeleton node this vertex emanates from.
    node: usize,
    active: bool,
}

/// An arc of the skeleton graph, tagged with the two faces it separates.
#[derive(Debug, Clone, Copy)]
struct SkeletonArc {
    from: usize,
    to: usize,
    faces: [usize; 2],
}

#[derive(Debug, Clone, Copy)]
enum EventKind {
    /// Adjacent bisectors meet: the wavefront edge between them collapses.
    Edge { va: usize, vb: usize },
    /// A reflex vertex hits an opposite boundary edge's wavefront.
    Split { v: usize, edge: usize },
}

#[derive(Debug, Clone, Copy)]
struct Event {
    time: f64,
    point: Point2,
    kind: EventKind,
    seq: usize,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    /// Reversed so the `BinaryHeap` max-heap pops the earliest event;
    /// ties break by insertion order for determinism.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Debug)]
struct WavefrontState {
    edges: Vec<BoundaryEdge>,
    verts: Vec<WavefrontVertex>,
    nodes: Vec<SkeletonVertex>,
    arcs: Vec<SkeletonArc>,
    queue: BinaryHeap<Event>,
    seq: usize,
}

impl WavefrontState {
    fn from_rings(rings: &[Vec<Point2>]) -> Result<Self, SkeletonError> {
        if rings.is_empty() {
            return Err(SkeletonError::ComputationFailed(
                "no boundary rings supplied".to_owned(),
            ));
        }

        let mut state = Self {
            edges: Vec::new(),
            verts: Vec::new(),
            nodes: Vec::new(),
            arcs: Vec::new(),
            queue: BinaryHeap::new(),
            seq: 0,
        };

        for ring in rings {
            state.add_ring(ring)?;
        }

        for vi in 0..state.verts.len() {
            state.queue_next_event(vi);
        }
        Ok(state)
    }

    /// Adds one ring's vertices, edges, and boundary nodes.
    fn add_ring(&mut self, ring: &[Point2]) -> Result<(), SkeletonError> {
        let mut pts = ring.to_vec();
        // Strip the explicit closure vertex.
        if pts.len() > 1 {
            let first = pts[0];
            if let Some(last) = pts.last() {
                if (last - first).norm() <= DUPLICATE_TOLERANCE {
                    pts.pop();
                }
            }
        }
        let n = pts.len();
        if n < 3 {
            return Err(SkeletonError::ComputationFailed(
                "ring has fewer than 3 distinct vertices".to_owned(),
            ));
        }

        let base_vert = self.verts.len();
        let base_edge = self.edges.len();

        for i in 0..n {
            let a = pts[i];
            let b = pts[(i + 1) % n];
            let dir = normalize_or_zero(b - a);
            if dir.norm() < NORMALIZE_FLOOR {
                return Err(SkeletonError::ComputationFailed(
                    "zero-length boundary edge".to_owned(),
                ));
            }
            self.edges.push(BoundaryEdge {
                a,
                dir,
                // Filled in below once vertex bisectors exist.
                bisector_a: Ray {
                    origin: a,
                    dir: Vector2::zeros(),
                },
                bisector_b: Ray {
                    origin: b,
                    dir: Vector2::zeros(),
                },
                node_a: base_vert + i,
                node_b: base_vert + (i + 1) % n,
            });
        }

        for i in 0..n {
            let edge_left = base_edge + (i + n - 1) % n;
            let edge_right = base_edge + i;
            let (bisector, reflex) =
                vertex_bisector(self.edges[edge_left].dir, self.edges[edge_right].dir);
            let node = self.nodes.len();
            self.nodes.push(SkeletonVertex::new(pts[i].x, pts[i].y, 0.0));
            self.verts.push(WavefrontVertex {
                pos: pts[i],
                bisector,
                reflex,
                edge_left,
                edge_right,
                prev: base_vert + (i + n - 1) % n,
                next: base_vert + (i + 1) % n,
                node,
                active: true,
            });
        }

        for i in 0..n {
            let start = base_vert + i;
            let end = base_vert + (i + 1) % n;
            self.edges[base_edge + i].bisector_a = Ray {
                origin: self.verts[start].pos,
                dir: self.verts[start].bisector,
            };
            self.edges[base_edge + i].bisector_b = Ray {
                origin: self.verts[end].pos,
                dir: self.verts[end].bisector,
            };
        }
        Ok(())
    }

    /// Collapse time of `point` relative to boundary edge `edge`:
    /// its signed distance from the edge's supporting line (positive on
    /// the interior side).
    fn time_of(&self, point: Point2, edge: usize) -> f64 {
        let e = &self.edges[edge];
        cross_2d(e.dir, point - e.a)
    }

    /// Returns an existing event node within merge tolerance, or creates
    /// a new one.
    fn node_at(&mut self, point: Point2, time: f64) -> usize {
        for (i, node) in self.nodes.iter().enumerate() {
            if node.time > 0.0
                && (node.position() - point).norm() < NODE_MERGE_EPS
                && (node.time - time).abs() < NODE_MERGE_EPS
            {
                return i;
            }
        }
        self.nodes.push(SkeletonVertex::new(point.x, point.y, time));
        self.nodes.len() - 1
    }

    /// Records the arc traced by wavefront vertex `vi` reaching `node`.
    ///
    /// The arc separates the two faces adjacent to the vertex. Zero-length
    /// arcs (vertex already born at the node) are dropped.
    fn emit_arc(&mut self, vi: usize, node: usize) {
        let v = &self.verts[vi];
        if v.node != node {
            self.arcs.push(SkeletonArc {
                from: v.node,
                to: node,
                faces: [v.edge_left, v.edge_right],
            });
        }
    }

    fn push_event(&mut self, time: f64, point: Point2, kind: EventKind) {
        let seq = self.seq;
        self.seq += 1;
        self.queue.push(Event {
            time,
            point,
            kind,
            seq,
        });
    }

    /// Computes the next event for vertex `vi` (nearest candidate to the
    /// vertex position, as in the classic formulation) and queues it.
    fn queue_next_event(&mut self, vi: usize) {
        let v = self.verts[vi];
        let mut best: Option<(f64, f64, Point2, EventKind)> = None;

        let mut consider = |dist: f64, time: f64, point: Point2, kind: EventKind| {
            let replace = best.is_none_or(|(d, ..)| dist < d);
            if replace {
                best = Some((dist, time, point, kind));
            }
        };

        if v.reflex {
            for (ei, candidate) in self.split_candidates(vi) {
                let dist = (candidate.0 - v.pos).norm();
                consider(dist, candidate.1, candidate.0, EventKind::Split { v: vi, edge: ei });
            }
        }

        if let Some((point, time)) = self.edge_event_candidate(v.prev, vi) {
            let dist = (point - v.pos).norm();
            consider(dist, time, point, EventKind::Edge { va: v.prev, vb: vi });
        }
        if let Some((point, time)) = self.edge_event_candidate(vi, v.next) {
            let dist = (point - v.pos).norm();
            consider(dist, time, point, EventKind::Edge { va: vi, vb: v.next });
        }

        if let Some((_, time, point, kind)) = best {
            self.push_event(time, point, kind);
        }
    }

    /// Candidate edge event for the adjacent pair `va → vb`: where their
    /// bisector rays meet, timed by the shared edge's offset distance.
    fn edge_event_candidate(&self, va: usize, vb: usize) -> Option<(Point2, f64)> {
        let a = &self.verts[va];
        let b = &self.verts[vb];
        let (t, u) = line_line_intersect_2d(a.pos, a.bisector, b.pos, b.bisector)?;
        if t < -PARAM_EPS || u < -PARAM_EPS {
            return None;
        }
        let point = a.pos + a.bisector * t;
        let time = self.time_of(point, a.edge_right);
        if time < -PARAM_EPS {
            return None;
        }
        Some((point, time))
    }

    /// Candidate split events for reflex vertex `vi` against every
    /// non-adjacent original boundary edge.
    ///
    /// For each opposite edge, the candidate point lies on the vertex's
    /// bisector, equidistant from the vertex's own edge line and the
    /// opposite edge line, and inside the sector the opposite edge sweeps
    /// (bounded by the edge and its endpoints' initial bisectors).
    fn split_candidates(&self, vi: usize) -> Vec<(usize, (Point2, f64))> {
        let v = &self.verts[vi];
        let mut out = Vec::new();

        for (ei, e) in self.edges.iter().enumerate() {
            if ei == v.edge_left || ei == v.edge_right {
                continue;
            }

            // Pick whichever of the vertex's own edges is less parallel
            // to the opposite edge, so the supporting lines intersect.
            let left = &self.edges[v.edge_left];
            let right = &self.edges[v.edge_right];
            let self_edge = if left.dir.dot(&e.dir).abs() < right.dir.dot(&e.dir).abs() {
                left
            } else {
                right
            };

            let Some((t, _)) = line_line_intersect_2d(self_edge.a, self_edge.dir, e.a, e.dir)
            else {
                continue;
            };
            let meet = self_edge.a + self_edge.dir * t;
            let linvec = normalize_or_zero(v.pos - meet);
            if linvec.norm() < NORMALIZE_FLOOR {
                continue;
            }
            let mut edvec = e.dir;
            if linvec.dot(&edvec) < 0.0 {
                edvec = -edvec;
            }
            let axis = edvec + linvec;
            if axis.norm() < TOLERANCE {
                continue;
            }

            // Candidate: the angle axis from the line meeting point,
            // intersected with the vertex's own bisector ray.
            let Some((s, u)) = line_line_intersect_2d(meet, axis, v.pos, v.bisector) else {
                continue;
            };
            if u < -PARAM_EPS {
                continue;
            }
            let b = meet + axis * s;

            // Sector test: right of the start bisector, left of the end
            // bisector, on the interior side of the edge itself.
            let xleft =
                cross_2d(e.bisector_a.dir, normalize_or_zero(b - e.bisector_a.origin))
                    < SECTOR_EPS;
            let xright =
                cross_2d(e.bisector_b.dir, normalize_or_zero(b - e.bisector_b.origin))
                    > -SECTOR_EPS;
            let xedge = cross_2d(e.dir, normalize_or_zero(b - e.a)) > -SECTOR_EPS;
            if !(xleft && xright && xedge) {
                continue;
            }

            let time = self.time_of(b, ei);
            if time < -PARAM_EPS {
                continue;
            }
            out.push((ei, (b, time)));
        }
        out
    }

    /// Runs the event loop until the wavefront has fully collapsed.
    fn propagate(&mut self) -> Result<(), SkeletonError> {
        let mut processed = 0usize;
        while let Some(event) = self.queue.pop() {
            processed += 1;
            if processed > MAX_EVENTS {
                return Err(SkeletonError::ComputationFailed(
                    "event budget exceeded; geometry is not admissible".to_owned(),
                ));
            }
            match event.kind {
                EventKind::Edge { va, vb } => self.handle_edge_event(&event, va, vb),
                EventKind::Split { v, edge } => self.handle_split_event(&event, v, edge),
            }
        }

        if self.verts.iter().any(|v| v.active) {
            return Err(SkeletonError::ComputationFailed(
                "wavefront failed to collapse; geometry is not admissible".to_owned(),
            ));
        }
        Ok(())
    }

    fn handle_edge_event(&mut self, event: &Event, va: usize, vb: usize) {
        if !self.verts[va].active || !self.verts[vb].active || self.verts[va].next != vb {
            return;
        }
        trace!(time = event.time, va, vb, "edge event");

        let node = self.node_at(event.point, event.time);

        if self.verts[va].prev == self.verts[vb].next {
            // Peak event: the remaining 3-vertex loop collapses to a point.
            let vc = self.verts[va].prev;
            for w in [va, vb, vc] {
                self.emit_arc(w, node);
                self.verts[w].active = false;
            }
            return;
        }

        self.emit_arc(va, node);
        self.emit_arc(vb, node);
        self.verts[va].active = false;
        self.verts[vb].active = false;

        let edge_left = self.verts[va].edge_left;
        let edge_right = self.verts[vb].edge_right;
        let (bisector, reflex) =
            vertex_bisector(self.edges[edge_left].dir, self.edges[edge_right].dir);
        let prev = self.verts[va].prev;
        let next = self.verts[vb].next;
        let merged = self.verts.len();
        self.verts.push(WavefrontVertex {
            pos: event.point,
            bisector,
            reflex,
            edge_left,
            edge_right,
            prev,
            next,
            node,
            active: true,
        });
        self.verts[prev].next = merged;
        self.verts[next].prev = merged;

        if prev == next {
            // The loop degenerated to two antiparallel wavefront edges.
            self.emit_arc(prev, node);
            self.verts[prev].active = false;
            self.verts[merged].active = false;
            return;
        }
        self.queue_next_event(merged);
    }

    fn handle_split_event(&mut self, event: &Event, vi: usize, opposite: usize) {
        if !self.verts[vi].active {
            return;
        }

        // Locate the wavefront segment currently sweeping the opposite
        // edge that contains the split point; the event is obsolete when
        // no such segment exists anymore.
        let mut found: Option<(usize, usize)> = None;
        for (wi, w) in self.verts.iter().enumerate() {
            if !w.active || w.edge_right != opposite || wi == vi {
                continue;
            }
            let x = w.next;
            if x == vi || !self.verts[x].active {
                continue;
            }
            let at_start =
                cross_2d(w.bisector, normalize_or_zero(event.point - w.pos)) < SECTOR_EPS;
            let at_end = cross_2d(
                self.verts[x].bisector,
                normalize_or_zero(event.point - self.verts[x].pos),
            ) > -SECTOR_EPS;
            if at_start && at_end {
                found = Some((wi, x));
                break;
            }
        }
        let Some((y, x)) = found else {
            return;
        };
        trace!(time = event.time, v = vi, opposite, "split event");

        let node = self.node_at(event.point, event.time);
        self.emit_arc(vi, node);
        self.verts[vi].active = false;

        let v = self.verts[vi];

        // Two replacement vertices, one per side of the split.
        let v1 = self.spawn_split_vertex(event.point, node, v.edge_left, opposite, v.prev, x);
        let v2 = self.spawn_split_vertex(event.point, node, opposite, v.edge_right, y, v.next);

        for vnew in [v1, v2] {
            let prev = self.verts[vnew].prev;
            let next = self.verts[vnew].next;
            if prev == next {
                // This side degenerated into a single wavefront edge.
                self.emit_arc(prev, node);
                self.verts[prev].active = false;
                self.verts[vnew].active = false;
            } else {
                self.queue_next_event(vnew);
            }
        }
    }

    /// Creates one of the two vertices replacing a split reflex vertex
    /// and links it into its loop.
    fn spawn_split_vertex(
        &mut self,
        pos: Point2,
        node: usize,
        edge_left: usize,
        edge_right: usize,
        prev: usize,
        next: usize,
    ) -> usize {
        let (bisector, reflex) =
            vertex_bisector(self.edges[edge_left].dir, self.edges[edge_right].dir);
        let idx = self.verts.len();
        self.verts.push(WavefrontVertex {
            pos,
            bisector,
            reflex,
            edge_left,
            edge_right,
            prev,
            next,
            node,
            active: true,
        });
        self.verts[prev].next = idx;
        self.verts[next].prev = idx;
        idx
    }

    /// Reconstructs one face per original boundary edge by tracing the
    /// cycle formed by the edge and the arcs tagged with it.
    fn build_faces(&self) -> Result<Vec<SkeletonFace>, SkeletonError> {
        let mut faces = Vec::with_capacity(self.edges.len());

        for (fi, e) in self.edges.iter().enumerate() {
            let mut pairs: Vec<(usize, usize)> = vec![(e.node_a, e.node_b)];
            for arc in &self.arcs {
                if arc.faces[0] == fi || arc.faces[1] == fi {
                    pairs.push((arc.from, arc.to));
                }
            }

            let mut seen: HashSet<(usize, usize)> = HashSet::new();
            let mut adjacency: HashMap<usize, Vec<usize>> = HashMap::new();
            for &(a, b) in &pairs {
                if a == b || !seen.insert((a.min(b), a.max(b))) {
                    continue;
                }
                adjacency.entry(a).or_default().push(b);
                adjacency.entry(b).or_default().push(a);
            }

            let start = e.node_a;
            let mut cycle = vec![start];
            let mut prev = start;
            let mut cur = e.node_b;
            let limit = pairs.len() + 1;
            while cur != start {
                cycle.push(cur);
                if cycle.len() > limit {
                    return Err(SkeletonError::ComputationFailed(format!(
                        "unresolvable face cycle for boundary edge {fi}"
                    )));
                }
                let next = adjacency
                    .get(&cur)
                    .and_then(|nbrs| nbrs.iter().copied().find(|&n| n != prev))
                    .ok_or_else(|| {
                        SkeletonError::ComputationFailed(format!(
                            "open face cycle for boundary edge {fi}"
                        ))
                    })?;
                prev = cur;
                cur = next;
            }
            faces.push(SkeletonFace::new(cycle));
        }
        Ok(faces)
    }
}

/// Bisector direction and reflex flag for a vertex between an incoming
/// edge direction `din` and an outgoing direction `dout`.
///
/// Convex vertices get the inward angle bisector; reflex vertices (right
/// turns in the CCW convention) get the negated sum so the vertex still
/// travels into the interior. Collinear straight-through vertices fall
/// back to the inward edge normal.
fn vertex_bisector(din: Vector2, dout: Vector2) -> (Vector2, bool) {
    let a = normalize_or_zero(-din);
    let b = normalize_or_zero(dout);
    let reflex = cross_2d(din, dout) < -TOLERANCE;
    let mut dir = a + b;
    if dir.norm() < TOLERANCE {
        dir = left_perp(b);
    } else if reflex {
        dir = -dir;
    }
    (normalize_or_zero(dir), reflex)
}
