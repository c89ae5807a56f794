//! Simple primitive shapes: plane, cuboid, wire cuboid, crosshairs

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::error::{GeometryError, require_positive};
use crate::procedural::types::{LineBuilder, MeshBuilderUV};

/// Corner texture coordinates of a quad, counter-clockwise from bottom-left
const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

/// Add a quad spanned by `u` and `v` around `center` (`u x v` is the front side)
fn add_quad<M: MeshBuilderUV>(mesh: &mut M, center: Vec3, u: Vec3, v: Vec3, normal: Vec3) {
    let corners = [center - u - v, center + u - v, center + u + v, center - u + v];
    let [i0, i1, i2, i3] = [0, 1, 2, 3].map(|k| mesh.add_vertex_uv(corners[k], QUAD_UVS[k], normal));

    mesh.add_triangle(i0, i1, i2);
    mesh.add_triangle(i0, i2, i3);
}

/// Generate a plane in the XY plane facing +Z
///
/// # Arguments
/// * `width` - Extent along X (> 0.0)
/// * `height` - Extent along Y (> 0.0)
///
/// # Returns
/// Mesh with 4 vertices and 2 triangles, UVs on the unit square
pub fn generate_plane<M: MeshBuilderUV>(width: f32, height: f32) -> Result<M, GeometryError> {
    let width = require_positive("generate_plane", "width", width)?;
    let height = require_positive("generate_plane", "height", height)?;

    let mut mesh = M::default();
    add_quad(
        &mut mesh,
        Vec3::ZERO,
        Vec3::new(width * 0.5, 0.0, 0.0),
        Vec3::new(0.0, height * 0.5, 0.0),
        Vec3::Z,
    );

    Ok(mesh)
}

/// Generate a solid cuboid
///
/// # Arguments
/// * `size_x` - Full extent along X axis
/// * `size_y` - Full extent along Y axis
/// * `size_z` - Full extent along Z axis
///
/// # Returns
/// Mesh with 24 vertices (4 per face, unshared so each face keeps its own
/// normal) and 12 triangles. Each face maps the full unit square in UV space,
/// with U along the face's right direction when viewed from outside.
pub fn generate_cuboid<M: MeshBuilderUV>(
    size_x: f32,
    size_y: f32,
    size_z: f32,
) -> Result<M, GeometryError> {
    let half = Vec3::new(
        require_positive("generate_cuboid", "size_x", size_x)?,
        require_positive("generate_cuboid", "size_y", size_y)?,
        require_positive("generate_cuboid", "size_z", size_z)?,
    ) * 0.5;

    // (normal, u, v) per face, with u x v == normal
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];

    let mut mesh = M::default();
    for (normal, u, v) in faces {
        add_quad(&mut mesh, normal * half, u * half, v * half, normal);
    }

    debug!("generate_cuboid: 24 vertices, 12 triangles");
    Ok(mesh)
}

/// Generate the 12 edges of a cuboid as a line mesh
///
/// Vertex `i` sits at the corner whose X, Y, Z signs are bits 0, 1, 2 of `i`
/// (bit set = positive), so the 8 corners are shared by all edges.
pub fn generate_wire_cuboid<M: LineBuilder>(
    size_x: f32,
    size_y: f32,
    size_z: f32,
) -> Result<M, GeometryError> {
    let half = Vec3::new(
        require_positive("generate_wire_cuboid", "size_x", size_x)?,
        require_positive("generate_wire_cuboid", "size_y", size_y)?,
        require_positive("generate_wire_cuboid", "size_z", size_z)?,
    ) * 0.5;

    let mut mesh = M::default();
    for i in 0..8u32 {
        let sign = |bit: u32| if i & bit != 0 { 1.0 } else { -1.0 };
        mesh.add_point(Vec3::new(sign(1), sign(2), sign(4)) * half);
    }

    for i in 0..8u32 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                mesh.add_line(i, i | bit);
            }
        }
    }

    Ok(mesh)
}

/// Generate three axis-aligned line segments crossing at the origin
///
/// # Arguments
/// * `length` - Full length of each segment
///
/// # Returns
/// 6 vertices at `±length/2` on X, Y and Z, lines (0,1), (2,3), (4,5)
pub fn generate_crosshairs<M: LineBuilder>(length: f32) -> Result<M, GeometryError> {
    let half = require_positive("generate_crosshairs", "length", length)? * 0.5;

    let mut mesh = M::default();
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        let a = mesh.add_point(-axis * half);
        let b = mesh.add_point(axis * half);
        mesh.add_line(a, b);
    }

    Ok(mesh)
}
