//! Region-partitioned, pooled GPU buffers.
//!
//! Z-index space is cut into [`BufferRegion`]s, each backed by one slot of a
//! bounded [`BufferPool`]. Only regions touched by a scene edit are
//! regenerated; everything else is drawn from the geometry already on the GPU.
//!
//! Convention:
//! - the pool never talks to a graphics API directly, only to a [`BufferBackend`]
//! - region identity is a [`RegionId`]; slots never hold references to regions

mod backend;
mod config;
mod error;
mod pool;
mod region;

pub use backend::BufferBackend;
pub use config::{PoolConfig, MAX_VERTICES_PER_BUFFER};
pub use error::PoolError;
pub use pool::{Acquired, BufferPool, Slot};
pub use region::{BufferRegion, RegionId, RegionList, RegionStart};
