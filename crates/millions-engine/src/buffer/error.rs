use thiserror::Error;

use crate::scene::ZIndex;

/// Errors raised while producing buffers for regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// No slot could be found, allocated or stolen.
    #[error("no buffer slot available")]
    BufferExhausted,
    /// A region would be split at or before its own start, leaving it empty.
    ///
    /// Happens when a single entity is larger than one buffer.
    #[error("cannot split region at {z}: region would be left empty")]
    InvalidSplit { z: ZIndex },
}
