//! Doubly-connected edge list (half-edge structure) for a polygon ring.
//!
//! Half-edges live in one arena and refer to each other by index, so the
//! `twin`/`next`/`prev` cycles carry no ownership and the whole structure can be
//! cloned or serialized as plain data.

use std::f64::consts::TAU;

use crate::error::{CollisionError, Result};
use crate::math::vec2::Vec2;

pub type VertexId = usize;
pub type EdgeId = usize;
pub type FaceId = usize;

/// One directed side of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfEdge {
    /// Vertex this half-edge starts from.
    pub tail: VertexId,
    /// Opposite half-edge sharing both endpoints.
    pub twin: EdgeId,
    pub next: EdgeId,
    pub prev: EdgeId,
    /// Face whose boundary this half-edge belongs to.
    pub face: FaceId,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HalfEdgePolygon {
    positions: Vec<Vec2>,
    /// Outgoing half-edges of each vertex, counter-clockwise from straight up.
    incident: Vec<Vec<EdgeId>>,
    edges: Vec<HalfEdge>,
    /// Boundary-starting half-edge of each face.
    faces: Vec<EdgeId>,
}

/// Counter-clockwise angle in `[0, TAU)` from the upward ray to `direction`.
fn angle_from_up(direction: Vec2) -> f64 {
    let angle = (-direction.x).atan2(direction.y);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

impl HalfEdgePolygon {
    /// Builds the half-edge structure of an ordered vertex ring.
    ///
    /// Each consecutive pair (with wraparound) gets two twin half-edges; the
    /// outgoing half-edges around every vertex are sorted by angle and linked
    /// to their neighbours; finally the `next` cycles are collected into faces.
    pub fn new(ring: &[Vec2]) -> Result<Self> {
        let n = ring.len();
        if n < 3 {
            return Err(CollisionError::InvalidInput { reason: "half-edge polygon needs at least 3 vertices" });
        }
        if (0..n).any(|i| ring[i] == ring[(i + 1) % n]) {
            return Err(CollisionError::DegenerateGeometry { reason: "ring contains a zero-length edge" });
        }

        // 1. twin pairs: 2i runs i -> i+1, 2i+1 runs back
        let mut tails = Vec::with_capacity(2 * n);
        let mut incident = vec![Vec::with_capacity(2); n];
        for i in 0..n {
            let j = (i + 1) % n;
            incident[i].push(tails.len());
            tails.push(i);
            incident[j].push(tails.len());
            tails.push(j);
        }
        let twin = |e: EdgeId| e ^ 1;
        let head = |e: EdgeId| tails[twin(e)];

        // 2. angular order around each vertex, then link neighbours
        let mut next = vec![None; tails.len()];
        let mut prev = vec![None; tails.len()];
        for (vertex, outgoing) in incident.iter_mut().enumerate() {
            let origin = ring[vertex];
            outgoing.sort_by(|&a, &b| {
                let angle_a = angle_from_up(ring[head(a)] - origin);
                let angle_b = angle_from_up(ring[head(b)] - origin);
                angle_a.total_cmp(&angle_b)
            });
            let m = outgoing.len();
            for k in 0..m {
                let (from, to) = (outgoing[k], outgoing[(k + 1) % m]);
                next[twin(from)] = Some(to);
                prev[to] = Some(twin(from));
            }
        }

        let mut edges = Vec::with_capacity(tails.len());
        for e in 0..tails.len() {
            let (Some(next_edge), Some(prev_edge)) = (next[e], prev[e]) else {
                return Err(CollisionError::DegenerateGeometry { reason: "half-edge left unlinked" });
            };
            edges.push(HalfEdge {
                tail: tails[e],
                twin: twin(e),
                next: next_edge,
                prev: prev_edge,
                face: usize::MAX,
            });
        }

        // 3. faces: walk `next` from each unassigned half-edge until the cycle closes
        let mut faces = Vec::new();
        for seed in 0..edges.len() {
            if edges[seed].face != usize::MAX {
                continue;
            }
            let face = faces.len();
            let mut current = seed;
            let mut steps = 0;
            loop {
                if edges[current].face != usize::MAX || steps > edges.len() {
                    return Err(CollisionError::DegenerateGeometry { reason: "face boundary does not close" });
                }
                edges[current].face = face;
                steps += 1;
                current = edges[current].next;
                if current == seed {
                    break;
                }
            }
            faces.push(seed);
        }

        log::trace!("half-edge polygon: {} vertices, {} half-edges, {} faces", n, edges.len(), faces.len());
        Ok(HalfEdgePolygon { positions: ring.to_vec(), incident, edges, faces })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn vertex(&self, vertex: VertexId) -> Vec2 {
        self.positions[vertex]
    }

    pub fn edge(&self, edge: EdgeId) -> &HalfEdge {
        &self.edges[edge]
    }

    pub fn edges(&self) -> &[HalfEdge] {
        &self.edges
    }

    pub fn twin(&self, edge: EdgeId) -> EdgeId {
        self.edges[edge].twin
    }

    pub fn next(&self, edge: EdgeId) -> EdgeId {
        self.edges[edge].next
    }

    pub fn prev(&self, edge: EdgeId) -> EdgeId {
        self.edges[edge].prev
    }

    pub fn tail(&self, edge: EdgeId) -> Vec2 {
        self.positions[self.edges[edge].tail]
    }

    pub fn head(&self, edge: EdgeId) -> Vec2 {
        self.tail(self.twin(edge))
    }

    /// Outgoing half-edges of `vertex` in counter-clockwise order from straight up.
    pub fn incident_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incident[vertex]
    }

    /// Starting half-edge of each face.
    pub fn faces(&self) -> &[EdgeId] {
        &self.faces
    }

    /// Boundary half-edges of `face`, in `next` order.
    pub fn face_edges(&self, face: FaceId) -> FaceEdges<'_> {
        let start = self.faces[face];
        FaceEdges { polygon: self, start, current: Some(start) }
    }

    pub fn face_vertices(&self, face: FaceId) -> Vec<Vec2> {
        self.face_edges(face).map(|e| self.tail(e)).collect()
    }

    /// Positive for a counter-clockwise boundary.
    pub fn face_signed_area(&self, face: FaceId) -> f64 {
        self.face_edges(face).map(|e| self.tail(e).cross(self.head(e))).sum::<f64>() / 2.0
    }

    /// The bounded face, i.e. the one whose boundary winds counter-clockwise.
    pub fn interior_face(&self) -> Option<FaceId> {
        (0..self.faces.len()).find(|&f| self.face_signed_area(f) > 0.0)
    }
}

/// Iterator over one face boundary.
#[derive(Debug, Clone)]
pub struct FaceEdges<'a> {
    polygon: &'a HalfEdgePolygon,
    start: EdgeId,
    current: Option<EdgeId>,
}

impl Iterator for FaceEdges<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let edge = self.current?;
        let following = self.polygon.next(edge);
        self.current = (following != self.start).then_some(following);
        Some(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    const EPSILON: f64 = 1e-9;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    fn assert_well_formed(polygon: &HalfEdgePolygon) {
        for (e, edge) in polygon.edges().iter().enumerate() {
            assert_eq!(polygon.twin(edge.twin), e);
            assert_eq!(polygon.prev(edge.next), e);
            assert_eq!(polygon.next(edge.prev), e);
            assert_eq!(polygon.edge(edge.next).tail, polygon.edge(edge.twin).tail);
        }
        let mut seen = vec![0; polygon.edge_count()];
        for face in 0..polygon.faces().len() {
            let boundary: Vec<EdgeId> = polygon.face_edges(face).collect();
            for &e in &boundary {
                seen[e] += 1;
                assert_eq!(polygon.edge(e).face, face);
            }
            // walking `next` |face| times returns to every starting edge
            for &start in &boundary {
                let mut e = start;
                for _ in 0..boundary.len() {
                    e = polygon.next(e);
                }
                assert_eq!(e, start);
            }
        }
        assert!(seen.iter().all(|&count| count == 1));
    }

    #[test]
    fn test_square_has_inner_and_outer_face() {
        let polygon = HalfEdgePolygon::new(&unit_square()).unwrap();
        assert_eq!(polygon.vertex_count(), 4);
        assert_eq!(polygon.edge_count(), 8);
        assert_eq!(polygon.faces().len(), 2);
        assert_well_formed(&polygon);

        let inner = polygon.interior_face().unwrap();
        assert_eq!(polygon.face_vertices(inner), unit_square());
        assert!((polygon.face_signed_area(inner) - 1.0).abs() < EPSILON);

        let outer = 1 - inner;
        assert_eq!(polygon.face_edges(outer).count(), 4);
        assert!((polygon.face_signed_area(outer) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_incident_edges_sorted_counter_clockwise_from_up() {
        let polygon = HalfEdgePolygon::new(&unit_square()).unwrap();
        let around_origin = polygon.incident_edges(0);
        // straight up to (0,1) comes first, then the edge heading right to (1,0)
        assert_eq!(polygon.head(around_origin[0]), Vec2::new(0.0, 1.0));
        assert_eq!(polygon.head(around_origin[1]), Vec2::new(1.0, 0.0));
        for &e in around_origin {
            assert_eq!(polygon.edge(e).tail, 0);
        }
    }

    #[test]
    fn test_clockwise_ring_interior_is_reverse_walk() {
        let mut ring = unit_square();
        ring.reverse();
        let polygon = HalfEdgePolygon::new(&ring).unwrap();
        assert_well_formed(&polygon);
        let inner = polygon.interior_face().unwrap();
        assert!((polygon.face_signed_area(inner) - 1.0).abs() < EPSILON);
        // inner face runs against the input order
        let start = polygon.faces()[inner];
        assert_eq!(polygon.edge(start).twin, start ^ 1);
        assert_eq!(start % 2, 1);
    }

    #[test]
    fn test_pentagon_well_formed() {
        let ring: Vec<Vec2> = (0..5)
            .map(|i| {
                let a = TAU * i as f64 / 5.0;
                Vec2::new(3.0 * a.cos(), 3.0 * a.sin())
            })
            .collect();
        let polygon = HalfEdgePolygon::new(&ring).unwrap();
        assert_well_formed(&polygon);
        for face in 0..polygon.faces().len() {
            assert_eq!(polygon.face_edges(face).count(), 5);
        }
    }

    #[test]
    fn test_concave_l_shape_well_formed() {
        // reflex corner at (1, 1)
        let ring = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let polygon = HalfEdgePolygon::new(&ring).unwrap();
        assert_eq!(polygon.edge_count(), 12);
        assert_eq!(polygon.faces().len(), 2);
        assert_well_formed(&polygon);

        let inner = polygon.interior_face().unwrap();
        assert_eq!(inner, 0);
        assert_eq!(polygon.face_vertices(inner), ring);
        assert!((polygon.face_signed_area(inner) - 3.0).abs() < EPSILON);
        assert!((polygon.face_signed_area(1) + 3.0).abs() < EPSILON);

        // both edges at the reflex vertex chain through it in ring order
        let into_reflex = 4;
        assert_eq!(polygon.edge(polygon.next(into_reflex)).tail, 3);
        assert_eq!(polygon.head(polygon.next(into_reflex)), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_rejects_short_or_degenerate_rings() {
        let two = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)];
        assert!(matches!(HalfEdgePolygon::new(&two), Err(CollisionError::InvalidInput { .. })));

        let repeated = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
        assert!(matches!(
            HalfEdgePolygon::new(&repeated),
            Err(CollisionError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_angle_from_up() {
        assert!(angle_from_up(Vec2::UP).abs() < EPSILON);
        assert!((angle_from_up(Vec2::new(-1.0, 0.0)) - TAU / 4.0).abs() < EPSILON);
        assert!((angle_from_up(Vec2::new(0.0, -1.0)) - TAU / 2.0).abs() < EPSILON);
        assert!((angle_from_up(Vec2::X) - 3.0 * TAU / 4.0).abs() < EPSILON);
    }
}
