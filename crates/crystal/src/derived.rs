//! Derived-state resolution: one concrete shape sampled from the parameter set.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::error::{CrystalError, CrystalResult};
use crate::params::{CrystalParams, VertexNoise};
use crate::random::RandomSource;

/// Fully determined description of a single crystal.
///
/// Produced once per generation and discarded with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedState {
    /// Vertices per ring (N).
    pub point_count: u32,
    /// Total height (H).
    pub height: f32,
    /// Unit main axis, tilted from +Y.
    pub main_axis: Vec3,
    /// Unit ring axis, tilted from +Y.
    pub ring_axis: Vec3,
    pub base_radius: f32,
    pub ring_radius: f32,
    /// Fraction of the height at which the upper ring sits.
    pub ring_fraction: f32,
    /// Azimuthal start of both rings, in radians.
    pub rotation_offset: f32,
    pub noise: VertexNoise,
}

impl DerivedState {
    /// Distance of every ring vertex from its anchor before noise.
    pub fn ring_offset_length(&self) -> f32 {
        self.ring_radius * 2.0
    }

    /// Total vertex count of the generated buffer (`2N + 2`).
    pub fn vertex_count(&self) -> usize {
        2 * self.point_count as usize + 2
    }
}

/// Sample a [`DerivedState`] from `params`.
///
/// Parameters are validated before the first draw. Draw order: point count,
/// height, main axis tilt (x, z), ring axis tilt (x, z), base radius, ring
/// radius noise (only without `same_ring_radius`), ring fraction (only
/// without `flat_top`), rotation offset.
pub fn resolve_derived_state<R>(params: &CrystalParams, rng: &mut R) -> CrystalResult<DerivedState>
where
    R: RandomSource + ?Sized,
{
    params.validate()?;

    let point_count = rng.uniform_int(params.points.min, params.points.max);
    let height = rng.uniform_float(params.height.min, params.height.max);
    let main_axis = tilted_axis(rng, params.max_upright_angle, "main")?;
    let ring_axis = tilted_axis(rng, params.max_ring_angle, "ring")?;

    let base_radius = rng.uniform_float(params.base_radius.min, params.base_radius.max);
    let ring_radius = if params.same_ring_radius {
        base_radius
    } else {
        let noise = params.ring_radius_noise;
        base_radius * (1.0 + rng.uniform_float(-noise, noise))
    };

    let ring_fraction = if params.flat_top {
        1.0
    } else {
        rng.uniform_float(params.ring_fraction.min, params.ring_fraction.max)
    };

    let rotation_offset = rng.uniform_float(0.0, TAU);

    let state = DerivedState {
        point_count,
        height,
        main_axis,
        ring_axis,
        base_radius,
        ring_radius,
        ring_fraction,
        rotation_offset,
        noise: params.vertex_noise(),
    };
    log::debug!(
        "crystal state: n={} h={:.3} base_r={:.3} ring_r={:.3} frac={:.3} offset={:.3}",
        state.point_count,
        state.height,
        state.base_radius,
        state.ring_radius,
        state.ring_fraction,
        state.rotation_offset
    );
    Ok(state)
}

/// Unit vector `(x, 1, z)` with both tilt components drawn from `±max / 2`.
fn tilted_axis<R>(rng: &mut R, max_angle: f32, axis: &'static str) -> CrystalResult<Vec3>
where
    R: RandomSource + ?Sized,
{
    let half = max_angle * 0.5;
    let x = rng.uniform_float(-half, half);
    let z = rng.uniform_float(-half, half);
    Vec3::new(x, 1.0, z)
        .try_normalize()
        .ok_or(CrystalError::DegenerateAxis { axis })
}
