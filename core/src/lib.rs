//! Meshkit Core - procedural meshes for GPU vertex buffers
//!
//! This crate generates and post-processes meshes as flat, attribute-major
//! buffers ready for upload by a graphics layer. It has no GPU, windowing or
//! file-format dependencies beyond OBJ export.
//!
//! # Architecture
//!
//! - [`procedural`] - [`MeshData`], builder traits and primitive generators
//! - [`surface`] - Vertex normal and tangent synthesis
//! - [`wireframe`] - Triangle-to-line reduction for debug rendering
//!
//! Every function is a pure transformation over caller-owned buffers; there is
//! no global state, so calls on disjoint meshes may run on any thread.
//!
//! # Example
//! ```no_run
//! use meshkit_core::*;
//!
//! let mut mesh: MeshData = generate_cuboid(1.0, 2.0, 1.0)?;
//! mesh.generate_tangents()?;
//!
//! let mut outline = mesh.clone();
//! outline.to_wireframe(true)?;
//! assert_eq!(outline.line_count(), 12);
//! # Ok::<(), GeometryError>(())
//! ```

pub mod error;
pub mod procedural;
pub mod surface;
pub mod wireframe;

pub use error::GeometryError;

// Re-export mesh types and generators
pub use procedural::{
    Attribute, LineBuilder, MeshBuilder, MeshBuilderUV, MeshData, Topology, VertexSink,
    generate_capsule, generate_capsule_banded, generate_cone, generate_crosshairs,
    generate_cuboid, generate_cuboid_tangent, generate_cylinder, generate_plane,
    generate_plane_tangent, generate_sphere, generate_sphere_subdivided, generate_wire_cuboid,
    obj_string, write_obj,
};

// Re-export attribute synthesis
pub use surface::{generate_normals, generate_tangents};

// Re-export wireframe reduction
pub use wireframe::{Edge, reduce_lines, to_wireframe, weld_vertices};
