//! Procedural mesh primitives
//!
//! Every generator is centered on the local origin and validates its shape
//! parameters before emitting anything.

mod complex;
mod simple;
mod sphere;

pub use complex::{
    CAPSULE_RINGS, CAPSULE_SEGMENTS, RIM_SEGMENTS, generate_capsule, generate_capsule_banded,
    generate_cone, generate_cylinder,
};
pub use simple::{generate_crosshairs, generate_cuboid, generate_plane, generate_wire_cuboid};
pub use sphere::{
    MAX_SPHERE_SUBDIVISIONS, SPHERE_SUBDIVISIONS, generate_sphere, generate_sphere_subdivided,
};
