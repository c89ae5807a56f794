//! Procedural mesh generation
//!
//! Generators for common 3D primitives with proper normals, written against
//! the [`MeshBuilder`] / [`MeshBuilderUV`] / [`LineBuilder`] traits so they can
//! fill any vertex container. [`MeshData`] is the flat, attribute-major
//! container used by the rest of the crate:
//! - positions and normals: 3 floats per vertex
//! - texture coordinates: 2 floats per vertex
//! - tangents: 4 floats per vertex (xyz + handedness)

mod export;
mod primitives;
mod primitives_tangent;
mod types;


pub use types::{
    Attribute, LineBuilder, MeshBuilder, MeshBuilderUV, MeshData, Topology, VertexSink,
};
pub(crate) use types::check_indices;

// Re-export OBJ export
pub use export::{obj_string, write_obj};

// Re-export primitives
pub use primitives::{
    CAPSULE_RINGS, CAPSULE_SEGMENTS, MAX_SPHERE_SUBDIVISIONS, RIM_SEGMENTS, SPHERE_SUBDIVISIONS,
    generate_capsule, generate_capsule_banded, generate_cone, generate_crosshairs, generate_cuboid,
    generate_cylinder, generate_plane, generate_sphere, generate_sphere_subdivided,
    generate_wire_cuboid,
};

// Re-export tangent primitives (for normal mapping)
pub use primitives_tangent::{generate_cuboid_tangent, generate_plane_tangent};
