//! Procedural crystal mesh generation.
//!
//! A crystal is a closed polyhedron built from three anchors (base center,
//! ring center, apex) and two rings of `N` perimeter vertices. Generation is a
//! pure pipeline driven by an injected [`RandomSource`]:
//!
//! params -> derived state -> anchors -> vertices -> triangles -> mesh

pub mod anchors;
pub mod derived;
pub mod error;
pub mod generator;
pub mod mesh;
pub mod params;
pub mod random;
pub mod triangles;
pub mod vertices;

pub use anchors::*;
pub use derived::*;
pub use error::*;
pub use generator::*;
pub use mesh::*;
pub use params::*;
pub use random::*;
pub use triangles::*;
pub use vertices::*;

// Re-export commonly used types
pub use glam::{Quat, Vec3};
