//! Scene (entity collection) types.
//!
//! Responsibilities:
//! - store immutable entity values in strict z-index order
//! - provide persistent add/remove operations returning new scenes
//! - diff two scenes into an ordered edit script used for invalidation

mod chunks;
mod diff;
mod entity;
mod error;
mod list;
mod z_index;

pub mod shapes;

pub use diff::{DiffOp, SceneDiff};
pub use entity::Entity;
pub use error::SceneError;
pub use list::Scene;
pub use shapes::{Line, LineCap, LinePoint, Triangle, TrianglePoint};
pub use z_index::ZIndex;
