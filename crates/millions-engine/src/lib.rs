//! Millions engine.
//!
//! Draws large, mostly static 2D scenes of antialiased lines and triangles by
//! batching entities into z-ordered buffer regions and regenerating only the
//! regions a scene edit touches.
//!
//! Layers, bottom-up:
//! - [`scene`]: persistent z-ordered entity collections and their diffs
//! - [`tessellate`]: per-entity vertex generation
//! - [`buffer`]: region partitioning and the bounded buffer pool
//! - [`render`]: the frame loop and the wgpu backend

pub mod buffer;
pub mod coords;
pub mod device;
pub mod geom;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod tessellate;
