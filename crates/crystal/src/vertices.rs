//! Vertex ring generation.
//!
//! Buffer layout (load-bearing, the triangulation indexes into it directly):
//!
//! | index        | vertex      |
//! |--------------|-------------|
//! | `0`          | base center |
//! | `1..=N`      | base ring   |
//! | `N+1..=2N`   | upper ring  |
//! | `2N+1`       | apex        |

use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::anchors::AnchorPoints;
use crate::derived::DerivedState;
use crate::error::{CrystalError, CrystalResult};
use crate::params::RingNoise;
use crate::random::RandomSource;

pub const BASE_CENTER_INDEX: u32 = 0;

/// Index of base ring vertex `i`.
#[inline]
pub fn base_ring_index(i: u32) -> u32 {
    1 + i
}

/// Index of upper ring vertex `i` for a ring of `n` points.
#[inline]
pub fn upper_ring_index(n: u32, i: u32) -> u32 {
    n + 1 + i
}

/// Index of the apex for a ring of `n` points.
#[inline]
pub fn apex_index(n: u32) -> u32 {
    2 * n + 1
}

/// Unit direction every ring vertex is rotated from.
///
/// The horizontal rotation-offset direction crossed into the ring axis, so it
/// is perpendicular to the ring axis and rotates with the offset.
pub fn zero_offset_direction(state: &DerivedState) -> CrystalResult<Vec3> {
    let (sin, cos) = state.rotation_offset.sin_cos();
    let offset_dir = Vec3::new(cos, 0.0, sin);
    state
        .ring_axis
        .cross(offset_dir)
        .try_normalize()
        .ok_or(CrystalError::DegenerateAxis { axis: "zero offset" })
}

/// Axis the upper ring is rotated around: the normalized sum of the ring and
/// main axes.
pub fn combined_ring_axis(state: &DerivedState) -> CrystalResult<Vec3> {
    (state.ring_axis + state.main_axis)
        .try_normalize()
        .ok_or(CrystalError::DegenerateAxis { axis: "combined ring" })
}

/// Build the full `2N + 2` vertex buffer.
///
/// Random draws are consumed only for enabled noise: two per base vertex with
/// noisy base points, three per ring vertex with [`RingNoise::Isotropic`].
pub fn build_vertices<R>(
    state: &DerivedState,
    anchors: &AnchorPoints,
    rng: &mut R,
) -> CrystalResult<Vec<Vec3>>
where
    R: RandomSource + ?Sized,
{
    let n = state.point_count;
    let zero_offset = zero_offset_direction(state)?;
    let ring_axis = combined_ring_axis(state)?;
    let reach = state.ring_offset_length();

    let mut vertices = Vec::with_capacity(state.vertex_count());
    vertices.push(anchors.base);

    // Base ring
    for i in 0..n {
        let rotation = Quat::from_axis_angle(state.main_axis, ring_angle(i, n));
        let mut position = anchors.base + rotation * zero_offset * reach;

        if let Some(noise) = state.noise.base_point {
            let x = rng.uniform_float(-0.5, 0.5) * noise;
            let z = rng.uniform_float(-0.5, 0.5) * noise;
            position += Vec3::new(x, 0.0, z);
        }

        vertices.push(position);
    }

    // Upper ring
    let ring_noise = state.noise.ring_point;
    for i in 0..n {
        let rotation = Quat::from_axis_angle(ring_axis, ring_angle(i, n));
        let mut position = anchors.ring_center + rotation * zero_offset * reach;

        match state.noise.ring {
            RingNoise::None => {}
            RingNoise::Isotropic => {
                let x = rng.uniform_float(-0.5, 0.5) * ring_noise;
                let y = rng.uniform_float(-0.5, 0.5) * ring_noise;
                let z = rng.uniform_float(-0.5, 0.5) * ring_noise;
                position += Vec3::new(x, y, z);
            }
            RingNoise::AlternatingAxial => {
                if i % 2 == 0 {
                    position += ring_axis * ring_noise;
                } else {
                    position -= ring_axis * ring_noise;
                }
            }
        }

        vertices.push(position);
    }

    vertices.push(anchors.apex);

    debug_assert_eq!(vertices.len(), state.vertex_count());
    log::trace!("built {} crystal vertices for {} ring points", vertices.len(), n);
    Ok(vertices)
}

#[inline]
fn ring_angle(i: u32, n: u32) -> f32 {
    i as f32 / n as f32 * TAU
}
