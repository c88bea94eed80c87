use crate::paint::Color;
use crate::render::FrameUniforms;

/// Capability the pool consumes from the graphics backend.
///
/// The core treats the backend as write-only plus a draw trigger: buffer
/// contents are never read back.
pub trait BufferBackend {
    /// Handle to one vertex + index storage pair.
    type Buffer;

    /// Creates storage of the given byte sizes.
    ///
    /// Errors are absorbed by the pool and treated as "no slot available".
    fn allocate_buffer(
        &mut self,
        vertex_bytes: u64,
        index_bytes: u64,
    ) -> anyhow::Result<Self::Buffer>;

    /// Replaces the leading bytes of both storages.
    fn write_buffer(&mut self, buffer: &Self::Buffer, vertices: &[u8], indices: &[u8]);

    /// Draws `index_count` 16-bit indices as a triangle list.
    fn bind_and_draw(&mut self, buffer: &Self::Buffer, index_count: u32);

    fn free_buffer(&mut self, buffer: Self::Buffer);

    /// Receives per-frame uniform state before any region is drawn.
    fn begin_frame(&mut self, uniforms: &FrameUniforms, clear: Color) {
        let _ = (uniforms, clear);
    }
}
