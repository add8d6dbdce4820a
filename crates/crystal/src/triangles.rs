//! Triangulation of the crystal vertex layout.

use serde::{Deserialize, Serialize};

use crate::error::{CrystalError, CrystalResult};
use crate::params::MIN_POINTS;
use crate::vertices::{apex_index, base_ring_index, upper_ring_index, BASE_CENTER_INDEX};

/// Front-face convention of an index buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Winding {
    /// Counter-clockwise seen from outside, right-handed (wgpu / glTF default).
    #[default]
    CounterClockwise,
    /// Clockwise seen from outside, for left-handed hosts.
    Clockwise,
}

/// Triangles emitted for a ring of `n` points: `n` base + `2n` side + `n` apex.
pub fn triangle_count(n: u32) -> usize {
    4 * n as usize
}

/// Build the `12n` indices for a ring of `n` points, counter-clockwise when
/// viewed from outside.
///
/// Faces are grouped: the base fan occupies indices `0..3n`, the sides
/// `3n..9n` and the apex fan `9n..12n`. Each ring wraps modulo `n` on its own,
/// never modulo `2n`.
pub fn build_triangles(n: u32) -> CrystalResult<Vec<u32>> {
    if n < MIN_POINTS {
        return Err(CrystalError::TooFewPoints { count: n });
    }

    let mut indices = Vec::with_capacity(triangle_count(n) * 3);
    let apex = apex_index(n);

    // Base fan
    for i in 0..n {
        let next = (i + 1) % n;
        indices.extend_from_slice(&[base_ring_index(i), BASE_CENTER_INDEX, base_ring_index(next)]);
    }

    // Side quads, split along base[i] -> ring[next]
    for i in 0..n {
        let next = (i + 1) % n;
        indices.extend_from_slice(&[upper_ring_index(n, next), upper_ring_index(n, i), base_ring_index(i)]);
        indices.extend_from_slice(&[base_ring_index(i), base_ring_index(next), upper_ring_index(n, next)]);
    }

    // Apex fan
    for i in 0..n {
        let next = (i + 1) % n;
        indices.extend_from_slice(&[upper_ring_index(n, next), apex, upper_ring_index(n, i)]);
    }

    debug_assert_eq!(indices.len(), triangle_count(n) * 3);
    debug_assert!(indices.iter().all(|&i| i <= apex));
    Ok(indices)
}

/// Reverse the winding of every triangle in place.
pub fn flip_winding(indices: &mut [u32]) {
    for tri in indices.chunks_exact_mut(3) {
        tri.swap(1, 2);
    }
}
