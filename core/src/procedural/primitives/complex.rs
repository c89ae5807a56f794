//! Complex primitive shapes: cylinder, cone, capsule

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};
use tracing::debug;

use crate::error::{GeometryError, require_non_negative, require_positive};
use crate::procedural::types::MeshBuilder;

/// Radial divisions of cylinders and cones (one every 15 degrees)
pub const RIM_SEGMENTS: u32 = 24;

/// Latitude steps per capsule hemisphere, equator to pole (9 degrees each)
pub const CAPSULE_RINGS: u32 = 10;

/// Longitude steps of a capsule (12 degrees each)
pub const CAPSULE_SEGMENTS: u32 = 30;

/// Unit direction in the XZ plane for rim sample `i` of `segments`
fn rim_direction(i: u32, segments: u32) -> Vec3 {
    let theta = (i as f32 / segments as f32) * 2.0 * PI;
    Vec3::new(theta.cos(), 0.0, theta.sin())
}

/// Add a flat disc as a triangle fan around its center
fn add_cap<M: MeshBuilder>(mesh: &mut M, radius: f32, y: f32, normal: Vec3) {
    let center = mesh.add_vertex(Vec3::new(0.0, y, 0.0), normal);
    let ring: Vec<u32> = (0..RIM_SEGMENTS)
        .map(|i| mesh.add_vertex(rim_direction(i, RIM_SEGMENTS) * radius + Vec3::Y * y, normal))
        .collect();

    for i in 0..RIM_SEGMENTS as usize {
        let next = (i + 1) % ring.len();
        // CCW when viewed from the side the normal points to
        if normal.y > 0.0 {
            mesh.add_triangle(center, ring[next], ring[i]);
        } else {
            mesh.add_triangle(center, ring[i], ring[next]);
        }
    }
}

/// Stitch two rings of equal length with quads, `lower` below `upper`
fn add_band<M: MeshBuilder>(mesh: &mut M, lower: &[u32], upper: &[u32]) {
    for i in 0..lower.len() {
        let next = (i + 1) % lower.len();
        // Vertex layout: lower[i]=BR, upper[i]=TR, upper[next]=TL, lower[next]=BL
        mesh.add_triangle(lower[i], upper[i], upper[next]);
        mesh.add_triangle(lower[i], upper[next], lower[next]);
    }
}

/// Generate a capped cylinder along the Y axis
///
/// # Arguments
/// * `radius` - Cylinder radius (> 0.0)
/// * `height` - Cylinder height (> 0.0), centered on the origin
///
/// # Returns
/// Mesh with 98 vertices and 96 triangles. The caps and the side each have
/// their own rim vertices so the caps stay flat while the side is smooth.
/// Cap centers sit at `(0, ±height/2, 0)`.
pub fn generate_cylinder<M: MeshBuilder>(radius: f32, height: f32) -> Result<M, GeometryError> {
    let radius = require_positive("generate_cylinder", "radius", radius)?;
    let height = require_positive("generate_cylinder", "height", height)?;
    let half_height = height * 0.5;

    let mut mesh = M::default();

    add_cap(&mut mesh, radius, half_height, Vec3::Y);
    add_cap(&mut mesh, radius, -half_height, Vec3::NEG_Y);

    let mut bottom = Vec::with_capacity(RIM_SEGMENTS as usize);
    let mut top = Vec::with_capacity(RIM_SEGMENTS as usize);
    for i in 0..RIM_SEGMENTS {
        let normal = rim_direction(i, RIM_SEGMENTS);
        let rim = normal * radius;
        bottom.push(mesh.add_vertex(rim - Vec3::Y * half_height, normal));
        top.push(mesh.add_vertex(rim + Vec3::Y * half_height, normal));
    }
    add_band(&mut mesh, &bottom, &top);

    debug!("generate_cylinder: radius {radius}, height {height}");
    Ok(mesh)
}

/// Generate a cone along the Y axis, apex up
///
/// # Arguments
/// * `radius` - Base radius (> 0.0)
/// * `height` - Apex height above the base (> 0.0), centered on the origin
///
/// # Returns
/// Mesh with 50 vertices and 48 triangles. The side is smooth-shaded: each
/// rim vertex carries the average of its two neighbouring face normals, and
/// the single apex vertex carries the average of all of them. The base cap is
/// flat.
pub fn generate_cone<M: MeshBuilder>(radius: f32, height: f32) -> Result<M, GeometryError> {
    let radius = require_positive("generate_cone", "radius", radius)?;
    let height = require_positive("generate_cone", "height", height)?;
    let half_height = height * 0.5;

    let apex = Vec3::new(0.0, half_height, 0.0);
    let rim: Vec<Vec3> = (0..RIM_SEGMENTS)
        .map(|i| rim_direction(i, RIM_SEGMENTS) * radius - Vec3::Y * half_height)
        .collect();

    // Face i spans rim[i] -> apex -> rim[i + 1]
    let face_normals: Vec<Vec3> = (0..rim.len())
        .map(|i| {
            let next = rim[(i + 1) % rim.len()];
            (apex - rim[i]).cross(next - rim[i]).normalize()
        })
        .collect();

    let mut mesh = M::default();

    let apex_normal = face_normals.iter().copied().sum::<Vec3>().normalize();
    let apex_index = mesh.add_vertex(apex, apex_normal);

    let side: Vec<u32> = (0..rim.len())
        .map(|i| {
            let previous = face_normals[(i + rim.len() - 1) % rim.len()];
            let normal = (previous + face_normals[i]).normalize();
            mesh.add_vertex(rim[i], normal)
        })
        .collect();

    for i in 0..side.len() {
        mesh.add_triangle(side[i], apex_index, side[(i + 1) % side.len()]);
    }

    add_cap(&mut mesh, radius, -half_height, Vec3::NEG_Y);

    debug!("generate_cone: radius {radius}, height {height}");
    Ok(mesh)
}

/// Add one hemisphere as a latitude/longitude grid
///
/// Row 0 is the equator at `center_y`; row `CAPSULE_RINGS` is the pole, a
/// single vertex repeated across the row. `up` selects the upper (+1) or
/// lower (-1) hemisphere.
///
/// # Returns
/// Vertex indices of the equator row
fn add_hemisphere<M: MeshBuilder>(mesh: &mut M, radius: f32, center_y: f32, up: f32) -> Vec<u32> {
    let center = Vec3::new(0.0, center_y, 0.0);
    let columns = CAPSULE_SEGMENTS as usize;

    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(CAPSULE_RINGS as usize + 1);
    for ring in 0..CAPSULE_RINGS {
        let phi = (ring as f32 / CAPSULE_RINGS as f32) * FRAC_PI_2;
        let row = (0..CAPSULE_SEGMENTS)
            .map(|seg| {
                let around = rim_direction(seg, CAPSULE_SEGMENTS);
                let normal = around * phi.cos() + Vec3::Y * (up * phi.sin());
                mesh.add_vertex(center + normal * radius, normal)
            })
            .collect();
        grid.push(row);
    }

    let pole_normal = Vec3::Y * up;
    let pole = mesh.add_vertex(center + pole_normal * radius, pole_normal);
    grid.push(vec![pole; columns]);

    for ring in 0..CAPSULE_RINGS as usize {
        for seg in 0..columns {
            let next = (seg + 1) % columns;
            let a = grid[ring][seg];
            let b = grid[ring][next];
            let c = grid[ring + 1][next];
            let d = grid[ring + 1][seg];
            add_grid_cell(mesh, [a, b, c, d], up < 0.0);
        }
    }

    grid.swap_remove(0)
}

/// Emit one grid cell `a, b` (current row) to `d, c` (next row)
///
/// A cell whose two corners on one row share an index has collapsed into a
/// triangle at a pole; only the non-degenerate half is emitted.
fn add_grid_cell<M: MeshBuilder>(mesh: &mut M, [a, b, c, d]: [u32; 4], flip: bool) {
    let mut emit = |i0, i1, i2| {
        if flip {
            mesh.add_triangle(i0, i2, i1);
        } else {
            mesh.add_triangle(i0, i1, i2);
        }
    };

    if c != d {
        emit(a, d, c);
    }
    if a != b {
        emit(a, c, b);
    }
}

/// Generate a capsule whose hemispheres are stitched together directly
///
/// # Arguments
/// * `radius` - Hemisphere radius (> 0.0)
/// * `height` - Distance between the hemisphere centers (>= 0.0)
///
/// # Returns
/// Mesh with 602 vertices. Each hemisphere samples latitude every 9 degrees
/// and longitude every 12 degrees; the two equator rows are joined by quads
/// that reuse the equator vertices. With `height == 0.0` the equators coincide
/// and no joining quads are emitted (1140 triangles instead of 1200).
/// Total height = height + 2 * radius
pub fn generate_capsule<M: MeshBuilder>(radius: f32, height: f32) -> Result<M, GeometryError> {
    let radius = require_positive("generate_capsule", "radius", radius)?;
    let height = require_non_negative("generate_capsule", "height", height)?;
    let half_height = height * 0.5;

    let mut mesh = M::default();
    let upper = add_hemisphere(&mut mesh, radius, half_height, 1.0);
    let lower = add_hemisphere(&mut mesh, radius, -half_height, -1.0);

    if height > 0.0 {
        add_band(&mut mesh, &lower, &upper);
    }

    debug!("generate_capsule: radius {radius}, height {height}");
    Ok(mesh)
}

/// Generate a capsule with a separate cylindrical band between the hemispheres
///
/// # Arguments
/// * `radius` - Hemisphere and band radius (> 0.0)
/// * `height` - Band height (>= 0.0)
///
/// # Returns
/// Mesh with 662 vertices and 1200 triangles: two closed-rim hemispheres plus
/// a band with its own 60 vertices. Unlike [`generate_capsule`], the band
/// shares no vertices with the hemispheres.
/// Total height = height + 2 * radius
pub fn generate_capsule_banded<M: MeshBuilder>(
    radius: f32,
    height: f32,
) -> Result<M, GeometryError> {
    let radius = require_positive("generate_capsule_banded", "radius", radius)?;
    let height = require_non_negative("generate_capsule_banded", "height", height)?;
    let half_height = height * 0.5;

    let mut mesh = M::default();
    add_hemisphere(&mut mesh, radius, half_height, 1.0);
    add_hemisphere(&mut mesh, radius, -half_height, -1.0);

    let mut bottom = Vec::with_capacity(CAPSULE_SEGMENTS as usize);
    let mut top = Vec::with_capacity(CAPSULE_SEGMENTS as usize);
    for seg in 0..CAPSULE_SEGMENTS {
        let normal = rim_direction(seg, CAPSULE_SEGMENTS);
        let rim = normal * radius;
        bottom.push(mesh.add_vertex(rim - Vec3::Y * half_height, normal));
        top.push(mesh.add_vertex(rim + Vec3::Y * half_height, normal));
    }
    add_band(&mut mesh, &bottom, &top);

    debug!("generate_capsule_banded: radius {radius}, height {height}");
    Ok(mesh)
}
