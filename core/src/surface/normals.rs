//! Area-weighted vertex normals

use glam::Vec3;
use tracing::{debug, warn};

use super::{element_count, vec3_at};
use crate::error::GeometryError;
use crate::procedural::{Attribute, Topology, check_indices};

/// Compute per-vertex normals for an indexed triangle list
///
/// Each triangle contributes its unnormalized face normal `(p1 - p0) x (p2 - p0)`
/// to all three of its vertices. The cross product's length is twice the
/// triangle's area, so larger triangles weigh more. Accumulated normals are
/// normalized at the end.
///
/// A vertex that no triangle references, or whose contributions cancel out,
/// keeps the zero vector.
///
/// # Returns
/// Flat normal buffer (stride 3), index-aligned with `positions`
pub fn generate_normals(positions: &[f32], indices: &[u32]) -> Result<Vec<f32>, GeometryError> {
    let vertex_count = element_count(Attribute::Positions, positions)?;
    check_indices(indices, Topology::Triangles, vertex_count)?;

    let mut accumulated = vec![Vec3::ZERO; vertex_count];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let p0 = vec3_at(positions, i0);
        let edge1 = vec3_at(positions, i1) - p0;
        let edge2 = vec3_at(positions, i2) - p0;
        let face_normal = edge1.cross(edge2);

        accumulated[i0] += face_normal;
        accumulated[i1] += face_normal;
        accumulated[i2] += face_normal;
    }

    let mut degenerate = 0usize;
    let mut normals = Vec::with_capacity(vertex_count * 3);
    for n in accumulated {
        let n = if n.length_squared() > 0.0 {
            n.normalize()
        } else {
            degenerate += 1;
            Vec3::ZERO
        };
        normals.extend_from_slice(&n.to_array());
    }

    if degenerate > 0 {
        warn!("generate_normals: {degenerate} of {vertex_count} vertices have no defined normal");
    }
    debug!(
        vertices = vertex_count,
        triangles = indices.len() / 3,
        "normals generated"
    );

    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_at(normals: &[f32], i: usize) -> Vec3 {
        vec3_at(normals, i)
    }

    #[test]
    fn test_single_triangle_ccw_faces_positive_z() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        let normals = generate_normals(&positions, &[0, 1, 2]).unwrap();
        for i in 0..3 {
            assert!((normal_at(&normals, i) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_area_weighting() {
        // Vertex 0 is shared by a large triangle facing +Z and a small one facing +X
        let positions = [
            0.0, 0.0, 0.0, // shared
            4.0, 0.0, 0.0, //
            0.0, 4.0, 0.0, // large, +Z
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, // small, +X
        ];
        let indices = [0, 1, 2, 0, 3, 4];
        let normals = generate_normals(&positions, &indices).unwrap();

        let shared = normal_at(&normals, 0);
        assert!((shared.length() - 1.0).abs() < 1e-5);
        // 16 : 1 weighting toward +Z
        let expected = Vec3::new(1.0, 0.0, 16.0).normalize();
        assert!((shared - expected).length() < 1e-5);
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 5.0];
        let normals = generate_normals(&positions, &[0, 1, 2]).unwrap();
        assert_eq!(normal_at(&normals, 3), Vec3::ZERO);
        assert!(normals.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_rejects_ragged_positions() {
        let result = generate_normals(&[0.0, 1.0], &[]);
        assert!(matches!(
            result,
            Err(GeometryError::BufferLength {
                attribute: Attribute::Positions,
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let positions = [0.0; 9];
        assert!(matches!(
            generate_normals(&positions, &[0, 1, 7]),
            Err(GeometryError::IndexOutOfRange { index: 7, .. })
        ));
    }
}
