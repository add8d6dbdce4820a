//! Anchor points the vertex rings are offset from.

use glam::Vec3;

use crate::derived::DerivedState;
use crate::error::{CrystalError, CrystalResult};

/// Base center, ring center and apex of a crystal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoints {
    pub base: Vec3,
    pub ring_center: Vec3,
    pub apex: Vec3,
}

impl AnchorPoints {
    pub fn to_array(self) -> [Vec3; 3] {
        [self.base, self.ring_center, self.apex]
    }
}

/// Place the three anchors along the main axis.
///
/// The base sits at the origin, the apex at `main_axis * height` and the ring
/// center at `ring_fraction` of the way up. A non-finite or non-unit main axis
/// is a resolver bug and is reported instead of propagated as NaN.
pub fn build_anchor_points(state: &DerivedState) -> CrystalResult<AnchorPoints> {
    if !state.main_axis.is_normalized() {
        return Err(CrystalError::DegenerateAxis { axis: "main" });
    }

    let apex = state.main_axis * state.height;
    Ok(AnchorPoints {
        base: Vec3::ZERO,
        ring_center: apex * state.ring_fraction,
        apex,
    })
}
