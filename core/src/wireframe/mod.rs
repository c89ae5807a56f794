//! Wireframe reduction
//!
//! Turns an indexed triangle list into an indexed line list for debug
//! rendering:
//! 1. weld vertices with identical positions ([`weld_vertices`])
//! 2. collect each undirected edge once
//! 3. optionally drop diagonals shared by coplanar neighbour triangles, so
//!    quads and other flat polygons are drawn by their outline only
//!
//! Both the welding and the de-triangulation scan are meant for
//! debug-visualization sizes, not production assets.

mod edges;
mod weld;

pub use edges::Edge;
pub use weld::weld_vertices;

use tracing::debug;

use crate::error::GeometryError;
use crate::procedural::{Topology, check_indices};
use edges::{EdgeSet, interior_edges};
use weld::weld;
use hashbrown::HashSet;

/// Reduce a mesh to a line mesh in place
///
/// `topology` describes `indices` on entry. Triangle lists are welded, edge
/// deduplicated and optionally de-triangulated; line lists (such as the output
/// of an earlier call) go through [`reduce_lines`], so reducing twice yields the
/// same buffers. On return `positions` holds the welded vertices and `indices`
/// holds line pairs.
pub fn to_wireframe(
    positions: &mut Vec<f32>,
    indices: &mut Vec<u32>,
    topology: Topology,
    de_triangulate: bool,
) -> Result<(), GeometryError> {
    if topology == Topology::Lines {
        return reduce_lines(positions, indices);
    }
    check_input(positions, indices, Topology::Triangles)?;

    let welded = weld(positions, indices);
    let edges = EdgeSet::from_triangles(indices);
    let edge_count = edges.len();

    let cancelled = if de_triangulate {
        interior_edges(positions, indices)
    } else {
        HashSet::new()
    };

    *indices = edges.into_line_indices(&cancelled);

    debug!(
        welded,
        edges = edge_count,
        cancelled = edge_count - indices.len() / 2,
        "triangle mesh reduced to lines"
    );
    Ok(())
}

/// Weld and deduplicate an existing line mesh in place
pub fn reduce_lines(positions: &mut Vec<f32>, indices: &mut Vec<u32>) -> Result<(), GeometryError> {
    check_input(positions, indices, Topology::Lines)?;

    let welded = weld(positions, indices);
    let edges = EdgeSet::from_lines(indices);
    *indices = edges.into_line_indices(&HashSet::new());

    debug!(welded, edges = indices.len() / 2, "line mesh reduced");
    Ok(())
}

fn check_input(positions: &[f32], indices: &[u32], topology: Topology) -> Result<(), GeometryError> {
    if positions.len() % 3 != 0 {
        return Err(GeometryError::BufferLength {
            attribute: crate::procedural::Attribute::Positions,
            len: positions.len(),
            expected: positions.len() - positions.len() % 3,
            stride: 3,
        });
    }
    check_indices(indices, topology, positions.len() / 3)
}
