//! Error taxonomy for crystal generation.

use thiserror::Error;

/// Everything that can stop a single generation call.
///
/// Failures never touch the parameter set or the random source, so the caller
/// can fix the input and simply generate again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrystalError {
    #[error("invalid {name} range: min {min} > max {max} (or non-finite bound)")]
    InvalidRange {
        name: &'static str,
        min: f32,
        max: f32,
    },
    #[error("point count must be at least 3, got {count}")]
    TooFewPoints { count: u32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("ring fraction range [{min}, {max}] must lie within [0, 1]")]
    FractionOutOfRange { min: f32, max: f32 },
    #[error("{axis} axis is zero-length or non-finite")]
    DegenerateAxis { axis: &'static str },
    #[error("triangle index {index} is out of bounds for {vertex_count} vertices")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
    #[error("index buffer length {len} is not a multiple of 3")]
    RaggedIndices { len: usize },
}

pub type CrystalResult<T> = Result<T, CrystalError>;
