//! Procedural mesh primitives with tangent data for normal mapping
//!
//! These build the UV-mapped primitive and then derive tangents from its
//! normals and texture coordinates, so they always return [`MeshData`].

use crate::error::GeometryError;

use super::primitives::{generate_cuboid, generate_plane};
use super::types::MeshData;

/// Generate a plane with tangent data
///
/// # Tangent Calculation
/// Tangent points along +X (direction of increasing U), handedness +1
pub fn generate_plane_tangent(width: f32, height: f32) -> Result<MeshData, GeometryError> {
    let mut mesh: MeshData = generate_plane(width, height)?;
    mesh.generate_tangents()?;
    Ok(mesh)
}

/// Generate a cuboid with tangent data
///
/// # Returns
/// Mesh with 24 vertices (4 per face); each face's tangent runs along the
/// face's U direction
pub fn generate_cuboid_tangent(
    size_x: f32,
    size_y: f32,
    size_z: f32,
) -> Result<MeshData, GeometryError> {
    let mut mesh: MeshData = generate_cuboid(size_x, size_y, size_z)?;
    mesh.generate_tangents()?;
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_plane_tangent_along_x() {
        let mesh = generate_plane_tangent(2.0, 1.0).unwrap();
        for i in 0..mesh.vertex_count() {
            let t = mesh.tangent(i);
            assert!((t.truncate() - Vec3::X).length() < 1e-6);
            assert_eq!(t.w, 1.0);
        }
    }

    #[test]
    fn test_cuboid_tangents_per_face() {
        let mesh = generate_cuboid_tangent(1.0, 1.0, 1.0).unwrap();
        assert_eq!(mesh.tangents.len(), 24 * 4);

        for i in 0..mesh.vertex_count() {
            let n = mesh.normal(i);
            let t = mesh.tangent(i);
            // Axis aligned, perpendicular to the face normal
            assert!(t.truncate().dot(n).abs() < 1e-6);
            assert!((t.truncate().abs().max_element() - 1.0).abs() < 1e-6);
            assert_eq!(t.w, 1.0);

            // Bitangent reconstructs the face's V direction
            let bitangent = n.cross(t.truncate()) * t.w;
            assert!((bitangent.length() - 1.0).abs() < 1e-5);
        }
    }
}
