use thiserror::Error;

use super::ZIndex;

/// Errors raised by scene mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// Another entity already occupies this z-index.
    #[error("an entity already exists at {0}")]
    DuplicateZIndex(ZIndex),
    /// No entity exists at this z-index.
    #[error("no entity exists at {0}")]
    MissingZIndex(ZIndex),
}
