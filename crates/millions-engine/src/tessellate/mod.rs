//! Procedural vertex/index generation for scene entities.
//!
//! Convention:
//! - one call to [`generate`] per entity, writing into a caller-supplied [`VertexSink`]
//! - indices are local to the sink (16-bit), so one sink holds at most 65536 vertices
//! - [`cost_of`] runs the same code path against a counting sink

mod caps;
mod generate;
mod sink;
mod vertex;

pub use generate::{cost_of, generate};
pub use sink::{Cost, GeometryBuffer, VertexSink};
pub use vertex::{quantize_snorm8, GpuVertex};

/// How far stroke geometry extends past the visible half-thickness, so the
/// fragment stage has room to fade the edge.
pub const AA_FACTOR: f32 = 3.0;
