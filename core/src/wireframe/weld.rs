//! Vertex welding by exact position match

use hashbrown::HashMap;

use crate::error::GeometryError;
use crate::procedural::Attribute;

/// Merge vertices whose positions are bit-for-bit identical
///
/// The first occurrence of each position survives; later duplicates are
/// removed, references to them are redirected to the survivor, and every
/// other index is shifted down past the removed slots. Relative vertex order
/// is preserved.
///
/// Positions are compared by their bit patterns, so `0.0` and `-0.0` stay
/// distinct.
///
/// `indices` may hold primitives of any arity. The buffers are left untouched
/// when `positions` is ragged or an index is out of range.
///
/// # Returns
/// Number of vertices removed
pub fn weld_vertices(
    positions: &mut Vec<f32>,
    indices: &mut [u32],
) -> Result<usize, GeometryError> {
    if positions.len() % 3 != 0 {
        return Err(GeometryError::BufferLength {
            attribute: Attribute::Positions,
            len: positions.len(),
            expected: positions.len() - positions.len() % 3,
            stride: 3,
        });
    }
    let vertex_count = positions.len() / 3;
    if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(GeometryError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(weld(positions, indices))
}

/// Weld already validated buffers
pub(super) fn weld(positions: &mut Vec<f32>, indices: &mut [u32]) -> usize {
    let vertex_count = positions.len() / 3;
    let mut first_seen: HashMap<[u32; 3], u32> = HashMap::with_capacity(vertex_count);
    let mut remap = Vec::with_capacity(vertex_count);
    let mut kept = 0usize;

    for i in 0..vertex_count {
        let p = &positions[i * 3..i * 3 + 3];
        let key = [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()];
        match first_seen.get(&key) {
            Some(&survivor) => remap.push(survivor),
            None => {
                let new_index = kept as u32;
                first_seen.insert(key, new_index);
                remap.push(new_index);
                // Compact in place; kept <= i so the source is never overwritten first
                positions.copy_within(i * 3..i * 3 + 3, kept * 3);
                kept += 1;
            }
        }
    }

    positions.truncate(kept * 3);
    for index in indices.iter_mut() {
        *index = remap[*index as usize];
    }

    vertex_count - kept
}
