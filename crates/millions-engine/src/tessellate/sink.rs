use super::GpuVertex;

/// Destination for generated geometry.
///
/// Generators are stateless; the sink owns the cursor. `push_vertex` returns
/// the index the vertex will have in the sink's index space, which the
/// generator then feeds back through `push_indices`.
pub trait VertexSink {
    fn push_vertex(&mut self, vertex: GpuVertex) -> u16;
    fn push_indices(&mut self, indices: &[u16]);
}

/// Vertex and index totals for a piece of geometry.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Cost {
    pub vertices: u32,
    pub indices: u32,
}

/// Sink that only counts. Returned indices are meaningless.
#[derive(Debug, Default)]
pub(crate) struct CostCounter {
    pub(crate) cost: Cost,
}

impl VertexSink for CostCounter {
    #[inline]
    fn push_vertex(&mut self, _vertex: GpuVertex) -> u16 {
        let index = self.cost.vertices as u16;
        self.cost.vertices += 1;
        index
    }

    #[inline]
    fn push_indices(&mut self, indices: &[u16]) {
        self.cost.indices += indices.len() as u32;
    }
}

/// CPU staging storage for one buffer's worth of geometry.
///
/// Cleared and refilled on every regeneration; capacity is kept across frames.
#[derive(Debug, Default, Clone)]
pub struct GeometryBuffer {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u16>,
}

impl GeometryBuffer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn cost(&self) -> Cost {
        Cost {
            vertices: self.vertices.len() as u32,
            indices: self.indices.len() as u32,
        }
    }

    #[inline]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    #[inline]
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

impl VertexSink for GeometryBuffer {
    #[inline]
    fn push_vertex(&mut self, vertex: GpuVertex) -> u16 {
        // Callers check capacity (<= 65536 vertices) before generating.
        debug_assert!(self.vertices.len() <= u16::MAX as usize);
        let index = self.vertices.len() as u16;
        self.vertices.push(vertex);
        index
    }

    #[inline]
    fn push_indices(&mut self, indices: &[u16]) {
        self.indices.extend_from_slice(indices);
    }
}
