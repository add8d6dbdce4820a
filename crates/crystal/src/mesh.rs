//! Mesh assembly: vertices + indices with derived bounds and normals.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::error::{CrystalError, CrystalResult};
use crate::triangles::{flip_winding, Winding};

/// Interleaved vertex ready for upload (`bytemuck::cast_slice`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CrystalVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl CrystalVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    /// Tight box around `points`; a zero box at the origin when empty.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(&first) = points.first() else {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            };
        };
        points.iter().fold(Self { min: first, max: first }, |b, &p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// A generated crystal.
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalMesh {
    pub vertices: Vec<Vec3>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
    /// Outward unit normal per vertex, area-weighted over adjacent faces.
    pub normals: Vec<Vec3>,
    pub bounds: Bounds,
    pub winding: Winding,
}

impl CrystalMesh {
    /// Assemble a counter-clockwise mesh, recomputing bounds and normals.
    pub fn assemble(vertices: Vec<Vec3>, indices: Vec<u32>) -> CrystalResult<Self> {
        if indices.len() % 3 != 0 {
            return Err(CrystalError::RaggedIndices { len: indices.len() });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertices.len()) {
            return Err(CrystalError::IndexOutOfBounds {
                index,
                vertex_count: vertices.len(),
            });
        }

        let winding = Winding::CounterClockwise;
        let bounds = Bounds::from_points(&vertices);
        let normals = vertex_normals(&vertices, &indices, winding);
        Ok(Self {
            vertices,
            indices,
            normals,
            bounds,
            winding,
        })
    }

    /// Re-wind the index buffer for a host with a different front-face
    /// convention. Normals stay outward.
    pub fn with_winding(mut self, winding: Winding) -> Self {
        if winding != self.winding {
            flip_winding(&mut self.indices);
            self.winding = winding;
            self.normals = vertex_normals(&self.vertices, &self.indices, winding);
        }
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Outward, area-scaled normal of a triangle (length = twice its area).
    pub fn face_normal(&self, tri: [u32; 3]) -> Vec3 {
        let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
        oriented_cross(a, b, c, self.winding)
    }

    /// Enclosed volume; positive when every face points outward.
    pub fn signed_volume(&self) -> f32 {
        let volume: f32 = self
            .triangles()
            .map(|tri| {
                let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
                a.dot(b.cross(c))
            })
            .sum::<f32>()
            / 6.0;
        match self.winding {
            Winding::CounterClockwise => volume,
            Winding::Clockwise => -volume,
        }
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        self.vertices.iter().copied().sum::<Vec3>() / self.vertices.len() as f32
    }

    /// Interleaved position + normal data for GPU upload.
    pub fn to_vertex_data(&self) -> Vec<CrystalVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .map(|(&p, &n)| CrystalVertex::new(p, n))
            .collect()
    }
}

fn oriented_cross(a: Vec3, b: Vec3, c: Vec3, winding: Winding) -> Vec3 {
    let n = (b - a).cross(c - a);
    match winding {
        Winding::CounterClockwise => n,
        Winding::Clockwise => -n,
    }
}

/// Area-weighted vertex normals. Vertices with no (or only degenerate) faces
/// fall back to +Y.
fn vertex_normals(vertices: &[Vec3], indices: &[u32], winding: Winding) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let n = oriented_cross(vertices[i0], vertices[i1], vertices[i2], winding);
        normals[i0] += n;
        normals[i1] += n;
        normals[i2] += n;
    }

    for n in &mut normals {
        *n = n.try_normalize().unwrap_or(Vec3::Y);
    }
    normals
}
