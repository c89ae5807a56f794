//! Procedural mesh types
//!
//! Shared types for procedural mesh generation: the builder traits that
//! generators write through, and [`MeshData`], the flat-buffer mesh aggregate
//! handed to the GPU upload layer.

use std::fmt;

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GeometryError;
use crate::surface;
use crate::wireframe;

/// Trait for mesh construction - enables generic geometry generation
///
/// Generators only ever append; indices returned by `add_vertex` are the
/// insertion order of the vertex.
pub trait MeshBuilder: Default {
    /// Add a vertex with position and normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);
}

/// Trait extension for UV-mapped meshes
pub trait MeshBuilderUV: MeshBuilder {
    /// Add a vertex with position, UV coordinates, and normal, returning its index
    fn add_vertex_uv(&mut self, position: Vec3, uv: Vec2, normal: Vec3) -> u32;
}

/// Trait for wireframe construction (positions and line segments only)
pub trait LineBuilder: Default {
    /// Add a bare position, returning its index
    fn add_point(&mut self, position: Vec3) -> u32;

    /// Add a line segment between two vertex indices
    fn add_line(&mut self, i0: u32, i1: u32);
}

/// How the index buffer is grouped into primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topology {
    /// Consecutive index triples
    #[default]
    Triangles,
    /// Consecutive index pairs
    Lines,
}

impl Topology {
    /// Number of indices per primitive
    pub fn arity(self) -> usize {
        match self {
            Self::Triangles => 3,
            Self::Lines => 2,
        }
    }
}

/// Named per-vertex attribute buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Positions,
    Normals,
    TextureCoords,
    Tangents,
}

impl Attribute {
    /// All attributes in upload order
    pub const ALL: [Attribute; 4] = [
        Attribute::Positions,
        Attribute::Normals,
        Attribute::TextureCoords,
        Attribute::Tangents,
    ];

    /// Name expected by the GPU upload layer
    pub fn name(self) -> &'static str {
        match self {
            Self::Positions => "positions",
            Self::Normals => "normals",
            Self::TextureCoords => "textureCoords",
            Self::Tangents => "tangents",
        }
    }

    /// Floats per vertex
    pub fn stride(self) -> usize {
        match self {
            Self::Positions | Self::Normals => 3,
            Self::TextureCoords => 2,
            Self::Tangents => 4,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver for finished mesh buffers (typically a GPU vertex-array wrapper)
pub trait VertexSink {
    /// Receive one attribute buffer; only non-empty attributes are sent
    fn attribute(&mut self, attribute: Attribute, data: &[f32]);

    /// Receive the shared index buffer
    fn indices(&mut self, topology: Topology, data: &[u32]);
}

/// Mesh aggregate with flat, attribute-major buffers
///
/// - `positions`: stride 3, defines the vertex count
/// - `normals`: stride 3 (empty if absent)
/// - `texture_coords`: stride 2 (empty if absent)
/// - `tangents`: stride 4, `(x, y, z, handedness)` (empty if absent)
/// - `indices`: one index space shared by every attribute
///
/// Bitangents are reconstructed as `handedness * cross(normal, tangent)`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshData {
    pub positions: Vec<f32>,
    #[serde(default)]
    pub normals: Vec<f32>,
    #[serde(default)]
    pub texture_coords: Vec<f32>,
    #[serde(default)]
    pub tangents: Vec<f32>,
    pub indices: Vec<u32>,
    #[serde(default)]
    pub topology: Topology,
}

impl MeshData {
    /// Create empty triangle mesh data
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble mesh data from existing buffers, checking every buffer invariant
    ///
    /// Pass an empty `Vec` for any attribute the mesh does not carry.
    pub fn from_buffers(
        positions: Vec<f32>,
        normals: Vec<f32>,
        texture_coords: Vec<f32>,
        tangents: Vec<f32>,
        indices: Vec<u32>,
        topology: Topology,
    ) -> Result<Self, GeometryError> {
        let mesh = Self {
            positions,
            normals,
            texture_coords,
            tangents,
            indices,
            topology,
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Get triangle count (0 for line meshes)
    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => 0,
        }
    }

    /// Get line count (0 for triangle meshes)
    pub fn line_count(&self) -> usize {
        match self.topology {
            Topology::Lines => self.indices.len() / 2,
            Topology::Triangles => 0,
        }
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn has_texture_coords(&self) -> bool {
        !self.texture_coords.is_empty()
    }

    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty()
    }

    /// Flat buffer for an attribute
    pub fn attribute(&self, attribute: Attribute) -> &[f32] {
        match attribute {
            Attribute::Positions => &self.positions,
            Attribute::Normals => &self.normals,
            Attribute::TextureCoords => &self.texture_coords,
            Attribute::Tangents => &self.tangents,
        }
    }

    /// Raw little-endian bytes of an attribute buffer, for direct GPU upload
    pub fn attribute_bytes(&self, attribute: Attribute) -> &[u8] {
        bytemuck::cast_slice(self.attribute(attribute))
    }

    /// Raw bytes of the index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Position of vertex `i`
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Normal of vertex `i` (panics if normals are absent)
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[i * 3..i * 3 + 3])
    }

    /// Texture coordinate of vertex `i` (panics if texcoords are absent)
    pub fn texture_coord(&self, i: usize) -> Vec2 {
        Vec2::from_slice(&self.texture_coords[i * 2..i * 2 + 2])
    }

    /// Tangent and handedness of vertex `i` (panics if tangents are absent)
    pub fn tangent(&self, i: usize) -> Vec4 {
        Vec4::from_slice(&self.tangents[i * 4..i * 4 + 4])
    }

    /// Check the aggregate invariants: whole elements in every buffer, every
    /// present attribute index-aligned with positions, indices in range.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.positions.len() % 3 != 0 {
            return Err(GeometryError::BufferLength {
                attribute: Attribute::Positions,
                len: self.positions.len(),
                expected: self.positions.len() - self.positions.len() % 3,
                stride: 3,
            });
        }

        let vertex_count = self.vertex_count();
        for attribute in Attribute::ALL {
            let data = self.attribute(attribute);
            let expected = vertex_count * attribute.stride();
            if !data.is_empty() && data.len() != expected {
                return Err(GeometryError::BufferLength {
                    attribute,
                    len: data.len(),
                    expected,
                    stride: attribute.stride(),
                });
            }
        }

        check_indices(&self.indices, self.topology, vertex_count)
    }

    /// Replace normals with area-weighted vertex normals
    pub fn generate_normals(&mut self) -> Result<(), GeometryError> {
        self.require_topology(Topology::Triangles)?;
        self.normals = surface::generate_normals(&self.positions, &self.indices)?;
        Ok(())
    }

    /// Synthesize tangents from normals and texture coordinates
    ///
    /// Returns `Ok(false)` without touching the mesh when normals or texture
    /// coordinates are absent.
    pub fn generate_tangents(&mut self) -> Result<bool, GeometryError> {
        self.require_topology(Topology::Triangles)?;
        for attribute in [Attribute::Normals, Attribute::TextureCoords] {
            if self.attribute(attribute).is_empty() {
                warn!("generate_tangents: {attribute} absent, skipping tangent generation");
                return Ok(false);
            }
        }

        self.tangents = surface::generate_tangents(
            &self.positions,
            &self.normals,
            &self.texture_coords,
            &self.indices,
        )?;
        Ok(true)
    }

    /// Reduce to a line mesh in place
    ///
    /// Triangle meshes go through vertex welding, edge extraction and optional
    /// de-triangulation. Line meshes are only re-welded and re-deduplicated,
    /// so reducing an already reduced mesh changes nothing. Per-vertex
    /// attributes other than positions are dropped.
    pub fn to_wireframe(&mut self, de_triangulate: bool) -> Result<(), GeometryError> {
        self.validate()?;
        wireframe::to_wireframe(
            &mut self.positions,
            &mut self.indices,
            self.topology,
            de_triangulate,
        )?;
        self.normals.clear();
        self.texture_coords.clear();
        self.tangents.clear();
        self.topology = Topology::Lines;
        debug!(
            vertices = self.vertex_count(),
            lines = self.line_count(),
            "wireframe reduced"
        );
        Ok(())
    }

    /// Hand every present buffer to a sink, attributes first
    pub fn upload(&self, sink: &mut impl VertexSink) {
        for attribute in Attribute::ALL {
            let data = self.attribute(attribute);
            if !data.is_empty() {
                sink.attribute(attribute, data);
            }
        }
        sink.indices(self.topology, &self.indices);
    }

    fn require_topology(&self, expected: Topology) -> Result<(), GeometryError> {
        if self.topology == expected {
            Ok(())
        } else {
            Err(GeometryError::TopologyMismatch {
                expected,
                found: self.topology,
            })
        }
    }
}

/// Check index count against the primitive arity and every index against the
/// vertex count
pub(crate) fn check_indices(
    indices: &[u32],
    topology: Topology,
    vertex_count: usize,
) -> Result<(), GeometryError> {
    if indices.len() % topology.arity() != 0 {
        return Err(GeometryError::IndexCount {
            len: indices.len(),
            primitive: topology,
        });
    }
    match indices.iter().find(|&&i| i as usize >= vertex_count) {
        Some(&index) => Err(GeometryError::IndexOutOfRange {
            index,
            vertex_count,
        }),
        None => Ok(()),
    }
}

impl MeshBuilder for MeshData {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position.to_array());
        self.normals.extend_from_slice(&normal.to_array());
        index
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.topology = Topology::Triangles;
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }
}

impl MeshBuilderUV for MeshData {
    fn add_vertex_uv(&mut self, position: Vec3, uv: Vec2, normal: Vec3) -> u32 {
        let index = self.add_vertex(position, normal);
        self.texture_coords.extend_from_slice(&uv.to_array());
        index
    }
}

impl LineBuilder for MeshData {
    fn add_point(&mut self, position: Vec3) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend_from_slice(&position.to_array());
        index
    }

    fn add_line(&mut self, i0: u32, i1: u32) {
        self.topology = Topology::Lines;
        self.indices.extend_from_slice(&[i0, i1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> MeshData {
        MeshData::from_buffers(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            Vec::new(),
            vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            Vec::new(),
            vec![0, 1, 2, 0, 2, 3],
            Topology::Triangles,
        )
        .unwrap()
    }

    #[derive(Default)]
    struct RecordingSink {
        attributes: Vec<(&'static str, usize)>,
        indices: Option<(Topology, usize)>,
    }

    impl VertexSink for RecordingSink {
        fn attribute(&mut self, attribute: Attribute, data: &[f32]) {
            self.attributes.push((attribute.name(), data.len()));
        }

        fn indices(&mut self, topology: Topology, data: &[u32]) {
            self.indices = Some((topology, data.len()));
        }
    }

    #[test]
    fn test_builder_indices_follow_insertion_order() {
        let mut mesh = MeshData::new();
        let a = mesh.add_vertex(Vec3::ZERO, Vec3::Z);
        let b = mesh.add_vertex_uv(Vec3::X, Vec2::ONE, Vec3::Z);
        assert_eq!((a, b), (0, 1));
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.normal(1), Vec3::Z);
    }

    #[test]
    fn test_line_builder_switches_topology() {
        let mut mesh = MeshData::new();
        let a = mesh.add_point(Vec3::ZERO);
        let b = mesh.add_point(Vec3::Y);
        mesh.add_line(a, b);
        assert_eq!(mesh.topology, Topology::Lines);
        assert_eq!(mesh.line_count(), 1);
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_misaligned_normals() {
        let mut mesh = unit_square();
        mesh.normals = vec![0.0, 0.0, 1.0];
        assert!(matches!(
            mesh.validate(),
            Err(GeometryError::BufferLength {
                attribute: Attribute::Normals,
                len: 3,
                expected: 12,
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let result = MeshData::from_buffers(
            vec![0.0; 9],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![0, 1, 3],
            Topology::Triangles,
        );
        assert_eq!(
            result,
            Err(GeometryError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let result = MeshData::from_buffers(
            vec![0.0; 9],
            Vec::new(),
            Vec::new(),
            Vec::new(),
            vec![0, 1],
            Topology::Triangles,
        );
        assert!(matches!(result, Err(GeometryError::IndexCount { len: 2, .. })));
    }

    #[test]
    fn test_generate_tangents_skips_without_normals() {
        let mut mesh = unit_square();
        assert_eq!(mesh.generate_tangents(), Ok(false));
        assert!(!mesh.has_tangents());

        mesh.generate_normals().unwrap();
        assert_eq!(mesh.generate_tangents(), Ok(true));
        assert_eq!(mesh.tangents.len(), 16);
    }

    #[test]
    fn test_upload_sends_present_attributes_only() {
        let mesh = unit_square();
        let mut sink = RecordingSink::default();
        mesh.upload(&mut sink);
        assert_eq!(sink.attributes, vec![("positions", 12), ("textureCoords", 8)]);
        assert_eq!(sink.indices, Some((Topology::Triangles, 6)));
    }

    #[test]
    fn test_attribute_bytes_length() {
        let mesh = unit_square();
        assert_eq!(mesh.attribute_bytes(Attribute::Positions).len(), 12 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
        assert!(mesh.attribute_bytes(Attribute::Tangents).is_empty());
    }

    #[test]
    fn test_json_uses_attribute_names() {
        let mesh = unit_square();
        let json = serde_json::to_value(&mesh).unwrap();
        assert!(json.get("textureCoords").is_some());
        assert_eq!(json["topology"], "triangles");

        let back: MeshData = serde_json::from_value(json).unwrap();
        assert_eq!(back, mesh);
    }

    #[test]
    fn test_normals_rejected_on_line_mesh() {
        let mut mesh = MeshData::new();
        mesh.add_point(Vec3::ZERO);
        mesh.add_point(Vec3::X);
        mesh.add_line(0, 1);
        assert!(matches!(
            mesh.generate_normals(),
            Err(GeometryError::TopologyMismatch { .. })
        ));
    }

    #[test]
    fn test_from_buffers_keeps_tangents() {
        let mesh = MeshData::from_buffers(
            vec![0.0; 9],
            vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            Vec::new(),
            vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, -1.0],
            vec![0, 1, 2],
            Topology::Triangles,
        )
        .unwrap();
        assert!(mesh.has_tangents());
        assert_eq!(mesh.tangent(2), Vec4::new(1.0, 0.0, 0.0, -1.0));

        let ragged = MeshData::from_buffers(
            vec![0.0; 9],
            Vec::new(),
            Vec::new(),
            vec![1.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2],
            Topology::Triangles,
        );
        assert!(matches!(
            ragged,
            Err(GeometryError::BufferLength {
                attribute: Attribute::Tangents,
                len: 4,
                expected: 12,
                ..
            })
        ));
    }
}
