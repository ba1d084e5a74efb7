mod generate;
mod synthesize_attributes;
mod tessellate_surface;

pub use generate::generate_mesh;
pub use synthesize_attributes::{SynthesizeAttributes, VertexAttributes};
pub use tessellate_surface::TessellateSurface;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};

/// Regular parameter grid sampled by [`TessellateSurface`].
///
/// `u` always spans `[0, 2*pi]` with both ends sampled; `v` spans
/// `[v_min, v_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    /// Number of segments along `u`.
    pub u_steps: usize,
    /// Number of segments along `v`.
    pub v_steps: usize,
    /// Start of the `v` range.
    pub v_min: f64,
    /// End of the `v` range.
    pub v_max: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            u_steps: 128,
            v_steps: 16,
            v_min: -1.0,
            v_max: 1.0,
        }
    }
}

impl GridSpec {
    /// Creates a new grid specification.
    #[must_use]
    pub fn new(u_steps: usize, v_steps: usize, v_min: f64, v_max: f64) -> Self {
        Self {
            u_steps,
            v_steps,
            v_min,
            v_max,
        }
    }

    /// Number of grid nodes, `(u_steps + 1) * (v_steps + 1)`.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        (self.u_steps + 1) * (self.v_steps + 1)
    }

    /// Number of triangles, two per grid cell.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.u_steps * self.v_steps * 2
    }

    /// Index of the grid node at row `i` (along `u`) and column `j` (along `v`).
    #[must_use]
    pub fn node_index(&self, i: usize, j: usize) -> usize {
        i * (self.v_steps + 1) + j
    }

    /// Checks that the grid describes a non-empty mesh addressable with `u32`
    /// indices.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameter`] if a step count is zero,
    /// a `v` bound is not finite, `v_max <= v_min`, or the vertex count
    /// exceeds the `u32` index range.
    pub fn validate(&self) -> Result<()> {
        if self.u_steps < 1 {
            return Err(invalid("u_steps", "must be at least 1".into()));
        }
        if self.v_steps < 1 {
            return Err(invalid("v_steps", "must be at least 1".into()));
        }
        if !self.v_min.is_finite() {
            return Err(invalid("v_min", format!("{} is not finite", self.v_min)));
        }
        if !self.v_max.is_finite() {
            return Err(invalid("v_max", format!("{} is not finite", self.v_max)));
        }
        if self.v_max <= self.v_min {
            return Err(invalid(
                "v_max",
                format!("{} must be greater than v_min {}", self.v_max, self.v_min),
            ));
        }
        self.check_index_range()
    }

    /// Checks that every grid node is addressable with a `u32` index.
    ///
    /// # Errors
    ///
    /// Returns [`TessellationError::InvalidParameter`] if the vertex count
    /// exceeds the `u32` index range.
    pub fn check_index_range(&self) -> Result<()> {
        let vertices = self
            .u_steps
            .checked_add(1)
            .zip(self.v_steps.checked_add(1))
            .and_then(|(rows, cols)| rows.checked_mul(cols));
        match vertices {
            Some(count) if u32::try_from(count).is_ok() => Ok(()),
            _ => Err(invalid(
                "u_steps",
                format!(
                    "grid of {} x {} segments exceeds the u32 index range",
                    self.u_steps, self.v_steps
                ),
            )),
        }
    }
}

fn invalid(parameter: &'static str, reason: String) -> crate::error::SpiralMeshError {
    TessellationError::InvalidParameter { parameter, reason }.into()
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals (empty until attributes are synthesized).
    pub normals: Vec<Vector3>,
    /// Vertex tangents (empty until attributes are synthesized).
    pub tangents: Vec<Vector3>,
    /// Arc-length UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Stores synthesized attributes on the mesh, replacing any previous ones.
    pub fn set_attributes(&mut self, attributes: VertexAttributes) {
        self.normals = attributes.normals;
        self.tangents = attributes.tangents;
    }
}

/// Flat 32-bit vertex and index arrays ready for upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// `x, y, z` per vertex.
    pub positions: Vec<f32>,
    /// `x, y, z` per vertex.
    pub normals: Vec<f32>,
    /// `x, y, z` per vertex.
    pub tangents: Vec<f32>,
    /// `u, v` per vertex.
    pub uvs: Vec<f32>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

impl From<&TriangleMesh> for MeshData {
    #[allow(clippy::cast_possible_truncation)]
    fn from(mesh: &TriangleMesh) -> Self {
        let flatten3 = |items: &[Vector3]| -> Vec<f32> {
            items
                .iter()
                .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect()
        };
        Self {
            positions: mesh
                .vertices
                .iter()
                .flat_map(|p| [p.x as f32, p.y as f32, p.z as f32])
                .collect(),
            normals: flatten3(&mesh.normals),
            tangents: flatten3(&mesh.tangents),
            uvs: mesh
                .uvs
                .iter()
                .flat_map(|uv| [uv.x as f32, uv.y as f32])
                .collect(),
            indices: mesh.indices.iter().flatten().copied().collect(),
        }
    }
}
