//! Error type shared by generators, attribute synthesis and wireframe reduction

use crate::procedural::{Attribute, Topology};

/// Errors reported by the geometry core
///
/// Malformed geometry that is structurally valid (NaN positions, zero-area
/// triangles) is not detected; only shape parameters and buffer shapes are
/// checked.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A shape parameter is non-finite or outside its allowed range
    #[error("{generator}: invalid {parameter} {value} ({reason})")]
    InvalidArgument {
        generator: &'static str,
        parameter: &'static str,
        value: f32,
        reason: &'static str,
    },

    /// An operation needs an attribute buffer that is empty
    #[error("missing {0} buffer")]
    MissingAttribute(Attribute),

    /// A flat buffer does not hold a whole number of elements, or its element
    /// count differs from the position buffer's
    #[error("{attribute} buffer has {len} floats, expected {expected} (stride {stride})")]
    BufferLength {
        attribute: Attribute,
        len: usize,
        expected: usize,
        stride: usize,
    },

    /// An index refers past the end of the vertex buffers
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    /// Index buffer length is not a multiple of the primitive arity
    #[error("{len} indices do not form whole {primitive:?} primitives")]
    IndexCount { len: usize, primitive: Topology },

    /// Operation is only defined for the other topology
    #[error("expected {expected:?} topology, found {found:?}")]
    TopologyMismatch { expected: Topology, found: Topology },
}

/// Reject non-finite or non-positive shape parameters
pub(crate) fn require_positive(
    generator: &'static str,
    parameter: &'static str,
    value: f32,
) -> Result<f32, GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        tracing::warn!("{generator}: {parameter} must be finite and > 0.0, got {value}");
        Err(GeometryError::InvalidArgument {
            generator,
            parameter,
            value,
            reason: "must be finite and > 0.0",
        })
    }
}

/// Reject non-finite or negative shape parameters
pub(crate) fn require_non_negative(
    generator: &'static str,
    parameter: &'static str,
    value: f32,
) -> Result<f32, GeometryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        tracing::warn!("{generator}: {parameter} must be finite and >= 0.0, got {value}");
        Err(GeometryError::InvalidArgument {
            generator,
            parameter,
            value,
            reason: "must be finite and >= 0.0",
        })
    }
}
