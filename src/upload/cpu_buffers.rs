use crate::tessellation::MeshData;

use super::MeshSink;

/// A per-vertex attribute stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexAttribute {
    Position,
    Normal,
    Tangent,
    Uv,
}

impl VertexAttribute {
    /// All attributes in binding order.
    pub const ALL: [Self; 4] = [Self::Position, Self::Normal, Self::Tangent, Self::Uv];

    /// Number of `f32` components per vertex.
    #[must_use]
    pub fn components(self) -> usize {
        match self {
            Self::Position | Self::Normal | Self::Tangent => 3,
            Self::Uv => 2,
        }
    }

    /// Byte stride between consecutive vertices in a tightly packed buffer.
    #[must_use]
    pub fn stride(self) -> usize {
        self.components() * std::mem::size_of::<f32>()
    }
}

/// CPU-side mirror of the buffers a renderer would upload.
///
/// Holds one tightly packed `f32` stream per [`VertexAttribute`] plus the
/// `u32` index stream, and exposes them as raw bytes for the graphics API.
#[derive(Debug, Clone, Default)]
pub struct CpuMeshBuffers {
    mesh: MeshData,
    generation: u64,
}

impl CpuMeshBuffers {
    /// Creates empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes of one attribute stream.
    #[must_use]
    pub fn attribute_bytes(&self, attribute: VertexAttribute) -> &[u8] {
        bytemuck::cast_slice(self.attribute(attribute))
    }

    /// One attribute stream as `f32` components.
    #[must_use]
    pub fn attribute(&self, attribute: VertexAttribute) -> &[f32] {
        match attribute {
            VertexAttribute::Position => &self.mesh.positions,
            VertexAttribute::Normal => &self.mesh.normals,
            VertexAttribute::Tangent => &self.mesh.tangents,
            VertexAttribute::Uv => &self.mesh.uvs,
        }
    }

    /// Raw bytes of the index stream.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.mesh.indices)
    }

    /// Number of indices to draw.
    #[must_use]
    pub fn count(&self) -> usize {
        self.mesh.indices.len()
    }

    /// Number of vertices currently held.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// Number of uploads received so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl MeshSink for CpuMeshBuffers {
    fn upload(&mut self, mesh: &MeshData) {
        self.mesh.clone_from(mesh);
        self.generation += 1;
    }
}
