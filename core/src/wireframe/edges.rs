//! Edge extraction and interior-edge detection

use glam::{Mat3, Vec3};
use hashbrown::HashSet;
use tracing::trace;

/// Relative tolerance for the coplanarity and colinearity tests
const TOLERANCE: f32 = 10.0 * f32::EPSILON;

/// Undirected edge, stored as `(min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(u32, u32);

impl Edge {
    /// Canonicalize an edge so that `(a, b)` and `(b, a)` compare equal
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    pub fn first(self) -> u32 {
        self.0
    }

    pub fn second(self) -> u32 {
        self.1
    }

    fn is_loop(self) -> bool {
        self.0 == self.1
    }
}

/// Ordered set of unique edges (first-seen order)
#[derive(Debug, Default)]
pub(crate) struct EdgeSet {
    seen: HashSet<Edge>,
    order: Vec<Edge>,
}

impl EdgeSet {
    /// Insert an edge; self-loops and repeats are ignored
    pub fn insert(&mut self, edge: Edge) {
        if !edge.is_loop() && self.seen.insert(edge) {
            self.order.push(edge);
        }
    }

    /// Edges of every triangle in an index list
    pub fn from_triangles(indices: &[u32]) -> Self {
        let mut set = Self::default();
        for tri in indices.chunks_exact(3) {
            set.insert(Edge::new(tri[0], tri[1]));
            set.insert(Edge::new(tri[1], tri[2]));
            set.insert(Edge::new(tri[2], tri[0]));
        }
        set
    }

    /// Edges of every segment in a line list
    pub fn from_lines(indices: &[u32]) -> Self {
        let mut set = Self::default();
        for line in indices.chunks_exact(2) {
            set.insert(Edge::new(line[0], line[1]));
        }
        set
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Flatten into a line index buffer, skipping `cancelled` edges
    pub fn into_line_indices(self, cancelled: &HashSet<Edge>) -> Vec<u32> {
        self.order
            .into_iter()
            .filter(|edge| !cancelled.contains(edge))
            .flat_map(|edge| [edge.0, edge.1])
            .collect()
    }
}

/// Find edges shared by two coplanar triangles
///
/// Every pair of triangles is tested (quadratic in the triangle count). A pair
/// qualifies when both of the second triangle's edge vectors lie in the first
/// triangle's plane and exactly one edge of each coincides with an edge of the
/// other. That shared edge is a diagonal inside a flat polygon, not an outline.
pub(crate) fn interior_edges(positions: &[f32], indices: &[u32]) -> HashSet<Edge> {
    let position = |i: u32| {
        let i = i as usize * 3;
        Vec3::new(positions[i], positions[i + 1], positions[i + 2])
    };

    let triangles: Vec<[u32; 3]> = indices
        .chunks_exact(3)
        .map(|tri| [tri[0], tri[1], tri[2]])
        .collect();
    let corners: Vec<[Vec3; 3]> = triangles
        .iter()
        .map(|tri| [position(tri[0]), position(tri[1]), position(tri[2])])
        .collect();

    let mut cancelled = HashSet::new();

    for a in 0..triangles.len() {
        for b in (a + 1)..triangles.len() {
            if !coplanar(&corners[a], &corners[b]) {
                continue;
            }

            let mut shared = None;
            let mut matches = 0;
            for ea in 0..3 {
                let (pa, qa) = (corners[a][ea], corners[a][(ea + 1) % 3]);
                for eb in 0..3 {
                    let (pb, qb) = (corners[b][eb], corners[b][(eb + 1) % 3]);
                    if segments_coincide(pa, qa, pb, qb) {
                        matches += 1;
                        shared = Some((
                            Edge::new(triangles[a][ea], triangles[a][(ea + 1) % 3]),
                            Edge::new(triangles[b][eb], triangles[b][(eb + 1) % 3]),
                        ));
                    }
                }
            }

            if matches == 1 {
                if let Some((edge_a, edge_b)) = shared {
                    trace!(a, b, ?edge_a, "cancelling shared coplanar edge");
                    cancelled.insert(edge_a);
                    cancelled.insert(edge_b);
                }
            }
        }
    }

    cancelled
}

/// Both edge vectors of `b` lie in the plane spanned by the edge vectors of `a`
fn coplanar(a: &[Vec3; 3], b: &[Vec3; 3]) -> bool {
    let a1 = a[1] - a[0];
    let a2 = a[2] - a[0];
    let b1 = b[1] - b[0];
    let b2 = b[2] - b[0];
    near_zero_det(a1, a2, b1) && near_zero_det(a1, a2, b2)
}

fn near_zero_det(x: Vec3, y: Vec3, z: Vec3) -> bool {
    let det = Mat3::from_cols(x, y, z).determinant();
    det.abs() <= TOLERANCE * x.length() * y.length() * z.length()
}

/// The segments `p-q` and `r-s` are colinear and each contains the other
fn segments_coincide(p: Vec3, q: Vec3, r: Vec3, s: Vec3) -> bool {
    contains(p, q, r) && contains(p, q, s) && contains(r, s, p) && contains(r, s, q)
}

/// `x` lies on segment `p-q`
fn contains(p: Vec3, q: Vec3, x: Vec3) -> bool {
    let d = q - p;
    let len_sq = d.length_squared();
    if len_sq == 0.0 {
        return false;
    }

    let offset = x - p;
    if d.cross(offset).length() > TOLERANCE * d.length() * offset.length() {
        return false;
    }

    let t = offset.dot(d) / len_sq;
    (-TOLERANCE..=1.0 + TOLERANCE).contains(&t)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit square split along the 0-2 diagonal
    const SQUARE: [f32; 12] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new(5, 2), Edge::new(2, 5));
        assert_eq!(Edge::new(5, 2).first(), 2);
        assert_eq!(Edge::new(5, 2).second(), 5);
    }

    #[test]
    fn test_shared_edges_collapse() {
        let set = EdgeSet::from_triangles(&[0, 1, 2, 0, 2, 3]);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn test_self_loops_dropped() {
        let set = EdgeSet::from_lines(&[0, 0, 0, 1, 1, 0]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_square_diagonal_is_interior() {
        let cancelled = interior_edges(&SQUARE, &[0, 1, 2, 0, 2, 3]);
        assert_eq!(cancelled.len(), 1);
        assert!(cancelled.contains(&Edge::new(0, 2)));
    }

    #[test]
    fn test_folded_triangles_keep_shared_edge() {
        // Second triangle rotated out of the XY plane around the diagonal
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0,
        ];
        let cancelled = interior_edges(&positions, &[0, 1, 2, 0, 2, 3]);
        assert!(cancelled.is_empty());
    }

    #[test]
    fn test_parallel_disjoint_triangles_share_nothing() {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, // z = 0
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, // z = 1
        ];
        let cancelled = interior_edges(&positions, &[0, 1, 2, 3, 4, 5]);
        assert!(cancelled.is_empty());
    }

    #[test]
    fn test_partial_overlap_is_not_coincident() {
        let p = Vec3::ZERO;
        let q = Vec3::new(2.0, 0.0, 0.0);
        assert!(!segments_coincide(p, q, p, Vec3::X));
        assert!(segments_coincide(p, q, q, p));
    }
}
