//! Frame rendering.
//!
//! [`FrameRenderer`] turns successive scenes into draw calls against any
//! [`BufferBackend`](crate::buffer::BufferBackend); [`WgpuBackend`] is the
//! wgpu implementation.
//!
//! Convention:
//! - camera parameters are packed into [`FrameUniforms`] uninterpreted
//! - pipelines and shaders belong to the caller

mod camera;
mod ctx;
mod frame;
mod uniforms;
mod wgpu_backend;

pub use camera::Camera;
pub use ctx::RenderTarget;
pub use frame::{FrameRenderer, FrameStats, RendererConfig};
pub use uniforms::{FrameUniforms, SurfaceSize};
pub use wgpu_backend::{RecordedDraw, WgpuBackend, WgpuSlotBuffers};
