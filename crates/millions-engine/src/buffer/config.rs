/// Largest vertex count addressable by 16-bit indices.
pub const MAX_VERTICES_PER_BUFFER: u32 = 1 << 16;

/// Buffer pool sizing.
///
/// The defaults allow 256 buffers of 65536 vertices (2 MiB of vertex data
/// each) with room for three indices per vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on live buffers. Zero disables drawing entirely.
    pub max_buffers: usize,

    /// Vertex capacity of each buffer. Clamped to [`MAX_VERTICES_PER_BUFFER`].
    pub max_vertices: u32,

    /// Index capacity of each buffer.
    pub max_indices: u32,
}

impl PoolConfig {
    /// Vertex capacity after clamping to the 16-bit index range.
    #[inline]
    pub fn vertex_capacity(&self) -> u32 {
        self.max_vertices.min(MAX_VERTICES_PER_BUFFER)
    }

    #[inline]
    pub fn index_capacity(&self) -> u32 {
        self.max_indices
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_buffers: 256,
            max_vertices: MAX_VERTICES_PER_BUFFER,
            max_indices: MAX_VERTICES_PER_BUFFER * 3,
        }
    }
}
