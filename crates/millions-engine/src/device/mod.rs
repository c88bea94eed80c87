//! Headless GPU device management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue. Surfaces and windows are
//! the caller's business.

mod gpu;
mod init;

pub use gpu::HeadlessGpu;
pub use init::GpuInit;
