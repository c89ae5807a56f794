//! Per-vertex tangents for normal mapping

use glam::Vec3;
use tracing::debug;

use super::{element_count, expect_aligned, vec2_at, vec3_at};
use crate::error::GeometryError;
use crate::procedural::{Attribute, Topology, check_indices};

/// Compute per-vertex tangents for an indexed triangle list
///
/// # Arguments
/// * `positions` - stride 3
/// * `normals` - stride 3, index-aligned with positions
/// * `texture_coords` - stride 2, index-aligned with positions
/// * `indices` - triangle list
///
/// # Returns
/// Flat tangent buffer (stride 4): `(x, y, z, handedness)`, where handedness
/// is exactly `-1.0` or `1.0` and the bitangent is
/// `handedness * cross(normal, tangent)`.
///
/// # Tangent Calculation
/// For each triangle, the derivatives of position with respect to U and V are
/// solved from the two edge vectors and their UV deltas, and summed into each
/// vertex. Per vertex, the U derivative is Gram-Schmidt orthogonalized against
/// the normal; handedness is the sign of `dot(dV, cross(n, dU))`, taken before
/// orthogonalization, with zero counting as positive.
///
/// Triangles whose UV mapping is degenerate (zero determinant) are ignored.
/// A vertex left without a usable U direction gets an arbitrary unit vector
/// perpendicular to its normal.
pub fn generate_tangents(
    positions: &[f32],
    normals: &[f32],
    texture_coords: &[f32],
    indices: &[u32],
) -> Result<Vec<f32>, GeometryError> {
    let vertex_count = element_count(Attribute::Positions, positions)?;
    expect_aligned(Attribute::Normals, normals, vertex_count)?;
    expect_aligned(Attribute::TextureCoords, texture_coords, vertex_count)?;
    check_indices(indices, Topology::Triangles, vertex_count)?;

    let mut du_sum = vec![Vec3::ZERO; vertex_count];
    let mut dv_sum = vec![Vec3::ZERO; vertex_count];
    let mut skipped = 0usize;

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

        let p0 = vec3_at(positions, i0);
        let edge1 = vec3_at(positions, i1) - p0;
        let edge2 = vec3_at(positions, i2) - p0;

        let uv0 = vec2_at(texture_coords, i0);
        let delta_uv1 = vec2_at(texture_coords, i1) - uv0;
        let delta_uv2 = vec2_at(texture_coords, i2) - uv0;

        let det = delta_uv1.x * delta_uv2.y - delta_uv2.x * delta_uv1.y;
        if det == 0.0 || !det.is_finite() {
            skipped += 1;
            continue;
        }
        let r = 1.0 / det;

        let du = (edge1 * delta_uv2.y - edge2 * delta_uv1.y) * r;
        let dv = (edge2 * delta_uv1.x - edge1 * delta_uv2.x) * r;

        for i in [i0, i1, i2] {
            du_sum[i] += du;
            dv_sum[i] += dv;
        }
    }

    let mut tangents = Vec::with_capacity(vertex_count * 4);
    for (i, (du, dv)) in du_sum.into_iter().zip(dv_sum).enumerate() {
        let n = vec3_at(normals, i);

        let orthogonal = du - n * n.dot(du);
        let tangent = if orthogonal.length_squared() > 0.0 {
            orthogonal.normalize()
        } else {
            n.any_orthonormal_vector()
        };

        let handedness = if dv.dot(n.cross(du)) < 0.0 { -1.0 } else { 1.0 };

        tangents.extend_from_slice(&[tangent.x, tangent.y, tangent.z, handedness]);
    }

    debug!(
        vertices = vertex_count,
        degenerate_triangles = skipped,
        "tangents generated"
    );

    Ok(tangents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    // Unit square in the XY plane, UVs matching XY
    const POSITIONS: [f32; 12] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];
    const NORMALS: [f32; 12] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
    const UVS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    const INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

    fn tangent_at(tangents: &[f32], i: usize) -> Vec4 {
        Vec4::from_slice(&tangents[i * 4..i * 4 + 4])
    }

    #[test]
    fn test_square_tangent_follows_u() {
        let tangents = generate_tangents(&POSITIONS, &NORMALS, &UVS, &INDICES).unwrap();
        assert_eq!(tangents.len(), 16);
        for i in 0..4 {
            let t = tangent_at(&tangents, i);
            assert!((t.truncate() - Vec3::X).length() < 1e-6);
            assert_eq!(t.w, 1.0);
        }
    }

    #[test]
    fn test_mirrored_v_flips_handedness() {
        let flipped_uvs = [0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        let tangents = generate_tangents(&POSITIONS, &NORMALS, &flipped_uvs, &INDICES).unwrap();
        for i in 0..4 {
            assert_eq!(tangent_at(&tangents, i).w, -1.0);
        }
    }

    #[test]
    fn test_tangent_orthogonalized_against_tilted_normal() {
        let tilted = Vec3::new(0.3, 0.0, 1.0).normalize();
        let normals: Vec<f32> = (0..4).flat_map(|_| tilted.to_array()).collect();
        let tangents = generate_tangents(&POSITIONS, &normals, &UVS, &INDICES).unwrap();
        for i in 0..4 {
            let t = tangent_at(&tangents, i).truncate();
            assert!(t.dot(tilted).abs() < 1e-5);
            assert!((t.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_degenerate_uvs_fall_back_to_perpendicular() {
        let uvs = [0.5; 8];
        let tangents = generate_tangents(&POSITIONS, &NORMALS, &uvs, &INDICES).unwrap();
        for i in 0..4 {
            let t = tangent_at(&tangents, i);
            assert!(t.truncate().dot(Vec3::Z).abs() < 1e-6);
            assert!((t.truncate().length() - 1.0).abs() < 1e-5);
            assert_eq!(t.w, 1.0);
        }
    }

    #[test]
    fn test_rejects_missing_texture_coords() {
        let result = generate_tangents(&POSITIONS, &NORMALS, &[], &INDICES);
        assert!(matches!(
            result,
            Err(GeometryError::BufferLength {
                attribute: Attribute::TextureCoords,
                len: 0,
                expected: 8,
                ..
            })
        ));
    }
}
