//! Paint model shared between entities and the tessellator.
//!
//! Entities carry one color per endpoint/vertex; gradients along a line fall
//! out of per-vertex color interpolation on the GPU.

pub mod color;

pub use color::Color;
