//! Parameter set: the ranges and feature flags a crystal is sampled from.

use serde::{Deserialize, Serialize};

use crate::error::{CrystalError, CrystalResult};

/// Inclusive float range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatRange {
    pub min: f32,
    pub max: f32,
}

impl FloatRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Degenerate range that always resolves to `value`.
    pub const fn fixed(value: f32) -> Self {
        Self { min: value, max: value }
    }

    fn validate(&self, name: &'static str) -> CrystalResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(CrystalError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Point-count range `[min, max)`. `min == max` pins the count to `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRange {
    pub min: u32,
    pub max: u32,
}

impl PointRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Range that always yields exactly `count` points.
    pub const fn fixed(count: u32) -> Self {
        Self { min: count, max: count }
    }
}

/// How the upper ring vertices are perturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RingNoise {
    /// Ring vertices sit exactly on the rotated offset.
    #[default]
    None,
    /// Independent X/Y/Z jitter in `[-0.5, 0.5] * ring_point_noise`.
    Isotropic,
    /// Even vertices pushed up the ring axis, odd ones pushed down, by
    /// `ring_point_noise`. Odd point counts leave two adjacent vertices
    /// displaced the same way where the ring wraps.
    AlternatingAxial,
}

/// Per-vertex noise policy carried into vertex generation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexNoise {
    /// Horizontal base jitter magnitude, `None` when base points are clean.
    pub base_point: Option<f32>,
    pub ring: RingNoise,
    pub ring_point: f32,
}

/// Minimum number of points in a ring.
pub const MIN_POINTS: u32 = 3;

/// Configuration for procedural crystal generation.
///
/// Immutable for the duration of one generation; only the random draws differ
/// between regenerations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalParams {
    /// Total height of the crystal along its main axis.
    pub height: FloatRange,
    /// Number of vertices in each ring (upper bound exclusive).
    pub points: PointRange,
    /// Fraction of the height at which the upper ring sits.
    pub ring_fraction: FloatRange,
    /// Base radius. Ring vertices are placed at twice the ring radius.
    pub base_radius: FloatRange,
    /// Reuse the base radius for the upper ring instead of jittering it.
    pub same_ring_radius: bool,
    /// Fractional ring radius jitter: `ring = base * (1 + U(-n, n))`.
    pub ring_radius_noise: f32,
    /// Put the ring at the apex, giving a flat top.
    pub flat_top: bool,
    /// Jitter base ring vertices in the horizontal plane.
    pub noisy_base_points: bool,
    /// Magnitude of the horizontal base jitter.
    pub base_point_noise: f32,
    /// Upper ring perturbation policy.
    pub ring_noise: RingNoise,
    /// Magnitude shared by both ring noise policies.
    pub ring_point_noise: f32,
    /// Maximum tilt of the main axis. The X and Z tilt components are drawn
    /// from `±max / 2` against a unit Y before normalization.
    pub max_upright_angle: f32,
    /// Maximum tilt of the ring axis, drawn the same way.
    pub max_ring_angle: f32,
}

impl Default for CrystalParams {
    fn default() -> Self {
        Self {
            height: FloatRange::new(4.0, 8.0),
            points: PointRange::new(5, 9),
            ring_fraction: FloatRange::new(0.6, 0.85),
            base_radius: FloatRange::new(0.5, 1.0),
            same_ring_radius: false,
            ring_radius_noise: 0.15,
            flat_top: false,
            noisy_base_points: false,
            base_point_noise: 0.2,
            ring_noise: RingNoise::None,
            ring_point_noise: 0.2,
            max_upright_angle: 0.4,
            max_ring_angle: 0.3,
        }
    }
}

impl CrystalParams {
    /// Collapse the two independent ring flags into a [`RingNoise`] policy.
    /// Isotropic noise wins when both are set.
    pub fn ring_noise_from_flags(noisy_ring_points: bool, up_down_ring_points: bool) -> RingNoise {
        match (noisy_ring_points, up_down_ring_points) {
            (true, up_down) => {
                if up_down {
                    log::warn!("both noisy and up/down ring points requested, using noisy ring points");
                }
                RingNoise::Isotropic
            }
            (false, true) => RingNoise::AlternatingAxial,
            (false, false) => RingNoise::None,
        }
    }

    /// Noise settings consumed by the vertex ring builder.
    pub fn vertex_noise(&self) -> VertexNoise {
        VertexNoise {
            base_point: self.noisy_base_points.then_some(self.base_point_noise),
            ring: self.ring_noise,
            ring_point: self.ring_point_noise,
        }
    }

    /// Check every range and magnitude. Called before any random draw so a
    /// rejected parameter set never consumes randomness.
    pub fn validate(&self) -> CrystalResult<()> {
        self.height.validate("height")?;
        positive("min height", self.height.min)?;

        if self.points.min < MIN_POINTS {
            return Err(CrystalError::TooFewPoints { count: self.points.min });
        }
        if self.points.min > self.points.max {
            return Err(CrystalError::InvalidRange {
                name: "points",
                min: self.points.min as f32,
                max: self.points.max as f32,
            });
        }

        if !self.flat_top {
            self.ring_fraction.validate("ring fraction")?;
            if self.ring_fraction.min < 0.0 || self.ring_fraction.max > 1.0 {
                return Err(CrystalError::FractionOutOfRange {
                    min: self.ring_fraction.min,
                    max: self.ring_fraction.max,
                });
            }
        }

        self.base_radius.validate("base radius")?;
        positive("min base radius", self.base_radius.min)?;

        non_negative("ring radius noise", self.ring_radius_noise)?;
        non_negative("base point noise", self.base_point_noise)?;
        non_negative("ring point noise", self.ring_point_noise)?;
        non_negative("max upright angle", self.max_upright_angle)?;
        non_negative("max ring angle", self.max_ring_angle)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> CrystalResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CrystalError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> CrystalResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(CrystalError::Negative { name, value })
    }
}
