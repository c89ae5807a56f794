//! Per-vertex surface attributes derived from triangle geometry
//!
//! - [`generate_normals`]: area-weighted vertex normals
//! - [`generate_tangents`]: UV-derivative tangents with handedness
//!
//! Both follow the same pattern: accumulate a per-triangle quantity into each
//! of the triangle's three vertices, then finalize every vertex once.

mod normals;
mod tangents;

pub use normals::generate_normals;
pub use tangents::generate_tangents;

use glam::{Vec2, Vec3};

use crate::error::GeometryError;
use crate::procedural::Attribute;

/// Number of whole elements in a flat buffer, or an error if it is ragged
fn element_count(attribute: Attribute, data: &[f32]) -> Result<usize, GeometryError> {
    let stride = attribute.stride();
    if data.len() % stride == 0 {
        Ok(data.len() / stride)
    } else {
        Err(GeometryError::BufferLength {
            attribute,
            len: data.len(),
            expected: data.len() - data.len() % stride,
            stride,
        })
    }
}

/// Check that an attribute buffer holds exactly `vertex_count` elements
fn expect_aligned(
    attribute: Attribute,
    data: &[f32],
    vertex_count: usize,
) -> Result<(), GeometryError> {
    let expected = vertex_count * attribute.stride();
    if data.len() == expected {
        Ok(())
    } else {
        Err(GeometryError::BufferLength {
            attribute,
            len: data.len(),
            expected,
            stride: attribute.stride(),
        })
    }
}

#[inline]
fn vec3_at(data: &[f32], i: usize) -> Vec3 {
    Vec3::from_slice(&data[i * 3..i * 3 + 3])
}

#[inline]
fn vec2_at(data: &[f32], i: usize) -> Vec2 {
    Vec2::from_slice(&data[i * 2..i * 2 + 2])
}
