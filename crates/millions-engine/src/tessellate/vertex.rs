use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::paint::Color;

/// Per-vertex wire layout (32 bytes) shared with the shader.
///
///  offset  0  pos         [f32; 2]   loc 0
///  offset  8  bary_unit   f32        loc 1  (distance to opposite edge midpoint)
///  offset 12  ref_pos     [f32; 2]   loc 2  (closest point on the stroke spine)
///  offset 20  radius      f32        loc 3  (half-thickness at ref_pos)
///  offset 24  color       [u8; 4]    loc 4  Unorm8x4
///  offset 28  normal      [i8; 2]    loc 5  Snorm8x2
///  offset 30  bary_index  u8         loc 6  Uint8x2 (.y is padding)
///
/// Stroke vertices (line body, rounded and half-arrow caps) fill `ref_pos` and
/// `radius` and leave the edge attributes zero. Edge vertices (triangles, arrow
/// wedges) do the opposite.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub pos: [f32; 2],
    pub bary_unit: f32,
    pub ref_pos: [f32; 2],
    pub radius: f32,
    pub color: [u8; 4],
    pub normal: [i8; 2],
    pub bary_index: u8,
    pub _pad: u8,
}

impl GpuVertex {
    pub const SIZE: u64 = std::mem::size_of::<GpuVertex>() as u64;

    const ATTRS: [wgpu::VertexAttribute; 7] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32,   // bary_unit
        2 => Float32x2, // ref_pos
        3 => Float32,   // radius
        4 => Unorm8x4,  // color
        5 => Snorm8x2,  // normal
        6 => Uint8x2    // bary_index, _pad
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: Self::SIZE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Vertex of a stroked spine: antialiased by distance to `ref_pos`.
    #[inline]
    pub fn stroke(pos: Vec2, ref_pos: Vec2, radius: f32, color: Color) -> Self {
        Self {
            pos: pos.to_array(),
            bary_unit: 0.0,
            ref_pos: ref_pos.to_array(),
            radius,
            color: color.to_array(),
            normal: [0, 0],
            bary_index: 0,
            _pad: 0,
        }
    }

    /// Vertex of a filled polygon: antialiased by barycentric edge distance.
    #[inline]
    pub fn edge(pos: Vec2, normal: Vec2, bary_index: u8, bary_unit: f32, color: Color) -> Self {
        Self {
            pos: pos.to_array(),
            bary_unit,
            ref_pos: [0.0, 0.0],
            radius: 0.0,
            color: color.to_array(),
            normal: [quantize_snorm8(normal.x), quantize_snorm8(normal.y)],
            bary_index,
            _pad: 0,
        }
    }
}

/// Maps `[-1, 1]` onto `[-127, 127]`, rounding to nearest.
#[inline]
pub fn quantize_snorm8(v: f32) -> i8 {
    (v.clamp(-1.0, 1.0) * 127.0).round() as i8
}
