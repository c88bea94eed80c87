//! Coordinate and geometry types shared by the scene and the tessellator.
//!
//! Scene space:
//! - arbitrary float units, interpreted by the camera uniforms
//! - +X right, +Y up as far as this crate is concerned (the shader decides)

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
