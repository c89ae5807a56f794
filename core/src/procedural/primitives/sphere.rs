//! Octahedron-subdivision sphere

use glam::Vec3;
use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::error::{GeometryError, require_positive};
use crate::procedural::types::MeshBuilder;

/// Subdivision depth used by [`generate_sphere`] (512 triangles)
pub const SPHERE_SUBDIVISIONS: u32 = 3;

/// Deepest supported subdivision (32768 triangles)
pub const MAX_SPHERE_SUBDIVISIONS: u32 = 6;

/// Intermediate triangle of the subdivision, by corner position
#[derive(Clone, Copy, Debug)]
struct Triangle([Vec3; 3]);

impl Triangle {
    /// Split into 4 at the edge midpoints, keeping the winding
    fn split(self) -> [Triangle; 4] {
        let [a, b, c] = self.0;
        let ab = (a + b) * 0.5;
        let bc = (b + c) * 0.5;
        let ca = (c + a) * 0.5;
        [
            Triangle([a, ab, ca]),
            Triangle([ab, b, bc]),
            Triangle([ca, bc, c]),
            Triangle([ab, bc, ca]),
        ]
    }
}

/// Faces of the unit octahedron, counter-clockwise from outside
fn octahedron() -> [Triangle; 8] {
    let (x, y, z) = (Vec3::X, Vec3::Y, Vec3::Z);
    [
        Triangle([z, x, y]),
        Triangle([x, -z, y]),
        Triangle([-z, -x, y]),
        Triangle([-x, z, y]),
        Triangle([x, z, -y]),
        Triangle([-z, x, -y]),
        Triangle([-x, -z, -y]),
        Triangle([z, -x, -y]),
    ]
}

/// Bit pattern of a coordinate, with `-0.0` folded into `0.0`
fn exact_key(c: f32) -> u32 {
    if c == 0.0 { 0 } else { c.to_bits() }
}

fn subdivide(triangle: Triangle, depth: u32, out: &mut Vec<Triangle>) {
    if depth == 0 {
        out.push(triangle);
        return;
    }
    for child in triangle.split() {
        subdivide(child, depth - 1, out);
    }
}

/// Generate a sphere by subdividing an octahedron three times
///
/// # Arguments
/// * `radius` - Sphere radius (> 0.0)
///
/// # Returns
/// Mesh with 258 vertices and 512 triangles; normals point away from the center
pub fn generate_sphere<M: MeshBuilder>(radius: f32) -> Result<M, GeometryError> {
    generate_sphere_subdivided(radius, SPHERE_SUBDIVISIONS)
}

/// Generate an octahedron-subdivision sphere with a chosen depth
///
/// # Arguments
/// * `radius` - Sphere radius (> 0.0)
/// * `levels` - Subdivision depth (max 6); each level quadruples the triangles
///
/// # Returns
/// Mesh with `8 * 4^levels` triangles and `4^(levels + 1) + 2` vertices
///
/// Subdivision runs on the flat octahedron, where every midpoint is exactly
/// representable, so shared corners are merged by exact position lookup before
/// being projected onto the sphere.
pub fn generate_sphere_subdivided<M: MeshBuilder>(
    radius: f32,
    levels: u32,
) -> Result<M, GeometryError> {
    let radius = require_positive("generate_sphere", "radius", radius)?;
    let levels = if levels > MAX_SPHERE_SUBDIVISIONS {
        warn!("generate_sphere: levels must be <= {MAX_SPHERE_SUBDIVISIONS}, clamping");
        MAX_SPHERE_SUBDIVISIONS
    } else {
        levels
    };

    let mut triangles = Vec::with_capacity(8 * 4usize.pow(levels));
    for face in octahedron() {
        subdivide(face, levels, &mut triangles);
    }

    let mut mesh = M::default();
    let mut lookup: HashMap<[u32; 3], u32> = HashMap::new();

    for &Triangle(corners) in &triangles {
        let [i0, i1, i2] = corners.map(|corner| {
            let key = corner.to_array().map(exact_key);
            *lookup.entry(key).or_insert_with(|| {
                let normal = corner.normalize();
                mesh.add_vertex(normal * radius, normal)
            })
        });
        mesh.add_triangle(i0, i1, i2);
    }

    debug!(
        vertices = lookup.len(),
        triangles = triangles.len(),
        "generate_sphere"
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procedural::MeshData;

    #[test]
    fn test_sphere_counts() {
        let mesh: MeshData = generate_sphere(1.0).unwrap();
        assert_eq!(mesh.triangle_count(), 512);
        assert_eq!(mesh.vertex_count(), 258);
    }

    #[test]
    fn test_subdivision_levels() {
        for levels in 0..=4 {
            let mesh: MeshData = generate_sphere_subdivided(1.0, levels).unwrap();
            assert_eq!(mesh.triangle_count(), 8 * 4usize.pow(levels));
            assert_eq!(mesh.vertex_count(), 4usize.pow(levels + 1) + 2);
        }
    }

    #[test]
    fn test_levels_clamped() {
        let mesh: MeshData = generate_sphere_subdivided(1.0, 40).unwrap();
        assert_eq!(
            mesh.triangle_count(),
            8 * 4usize.pow(MAX_SPHERE_SUBDIVISIONS)
        );
    }

    #[test]
    fn test_octahedron_faces_point_outward() {
        for Triangle([a, b, c]) in octahedron() {
            let centroid = (a + b + c) / 3.0;
            assert!((b - a).cross(c - a).dot(centroid) > 0.0);
        }
    }

    #[test]
    fn test_sphere_winding_outward() {
        let mesh: MeshData = generate_sphere(2.0).unwrap();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.position(i as usize));
            assert!((b - a).cross(c - a).dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_sphere_rejects_zero_radius() {
        let result: Result<MeshData, _> = generate_sphere(0.0);
        assert!(result.is_err());
    }
}
