use std::collections::HashMap;

use anyhow::{bail, Result};
use wgpu::util::align_to;
use wgpu::{BufferUsages, COPY_BUFFER_ALIGNMENT};

use crate::buffer::BufferBackend;
use crate::paint::Color;

use super::{FrameUniforms, RenderTarget};

/// Handle to one pool slot's storage inside a [`WgpuBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WgpuSlotBuffers {
    id: u64,
}

impl WgpuSlotBuffers {
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// GPU buffers currently backing a slot. `storage` is unique per allocation.
#[derive(Debug)]
struct SlotStorage {
    storage: u64,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
}

/// A draw waiting to be replayed into a render pass.
///
/// Holds the buffers the slot had when the draw was recorded, so later
/// writes to the slot never change what this draw shows.
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    slot: u64,
    storage: u64,
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl RecordedDraw {
    #[inline]
    pub fn slot(&self) -> u64 {
        self.slot
    }

    /// Identity of the buffer allocation this draw reads.
    #[inline]
    pub fn storage(&self) -> u64 {
        self.storage
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    #[inline]
    pub fn vertices(&self) -> &wgpu::Buffer {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &wgpu::Buffer {
        &self.indices
    }
}

/// [`BufferBackend`] on top of a wgpu device.
///
/// Buffer writes go through `Queue::write_buffer`; draws are recorded and
/// replayed into a render pass by [`encode`](Self::encode) or
/// [`render_to`](Self::render_to). Queue writes land before the pass
/// executes, so rewriting a slot that already has a recorded draw this frame
/// moves the slot onto fresh buffers; the recorded draw keeps the old ones.
///
/// The pipeline is supplied by the caller and must use
/// [`GpuVertex::layout`](crate::tessellate::GpuVertex::layout) for vertex
/// buffer 0 and [`bind_group_layout`](Self::bind_group_layout) for group 0.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,

    uniform_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,

    clear: Color,
    slots: HashMap<u64, SlotStorage>,
    draws: Vec<RecordedDraw>,
    next_slot: u64,
    next_storage: u64,
}

impl WgpuBackend {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("millions frame uniforms"),
            size: FrameUniforms::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("millions frame bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(FrameUniforms::SIZE),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("millions frame bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            device: device.clone(),
            queue: queue.clone(),
            uniform_buffer,
            bind_group_layout,
            bind_group,
            clear: Color::WHITE,
            slots: HashMap::new(),
            draws: Vec::new(),
            next_slot: 0,
            next_storage: 0,
        }
    }

    #[inline]
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    #[inline]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Background color of the current frame.
    #[inline]
    pub fn clear_color(&self) -> Color {
        self.clear
    }

    /// Draws recorded since the last `begin_frame`, in draw order.
    #[inline]
    pub fn pending_draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    /// Identity of the allocation currently backing `slot`.
    pub fn current_storage(&self, slot: &WgpuSlotBuffers) -> Option<u64> {
        self.slots.get(&slot.id).map(|s| s.storage)
    }

    /// Replays and drains the recorded draws into `rpass`.
    ///
    /// Pipeline and bind group must already be set.
    pub fn encode(&mut self, rpass: &mut wgpu::RenderPass<'_>) {
        for draw in self.draws.drain(..) {
            rpass.set_vertex_buffer(0, draw.vertices.slice(..));
            rpass.set_index_buffer(draw.indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }

    /// Clears `target` to the frame's background and draws every recorded call.
    pub fn render_to(&mut self, target: &mut RenderTarget<'_>, pipeline: &wgpu::RenderPipeline) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("millions scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.encode(&mut rpass);
    }

    fn create_storage(&mut self, vertex_size: u64, index_size: u64) -> SlotStorage {
        let storage = self.next_storage;
        self.next_storage += 1;

        SlotStorage {
            storage,
            vertices: self.create_buffer("millions slot vbo", vertex_size, BufferUsages::VERTEX),
            indices: self.create_buffer("millions slot ibo", index_size, BufferUsages::INDEX),
        }
    }

    fn create_buffer(&self, label: &str, size: u64, usage: BufferUsages) -> wgpu::Buffer {
        self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: usage | BufferUsages::COPY_DST | BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        })
    }

    fn write_padded(&self, buffer: &wgpu::Buffer, data: &[u8]) {
        if data.is_empty() {
            return;
        }

        let padded_len = align_to(data.len() as u64, COPY_BUFFER_ALIGNMENT) as usize;
        if padded_len == data.len() {
            self.queue.write_buffer(buffer, 0, data);
        } else {
            let mut padded = Vec::with_capacity(padded_len);
            padded.extend_from_slice(data);
            padded.resize(padded_len, 0);
            self.queue.write_buffer(buffer, 0, &padded);
        }
    }
}

impl BufferBackend for WgpuBackend {
    type Buffer = WgpuSlotBuffers;

    fn allocate_buffer(&mut self, vertex_bytes: u64, index_bytes: u64) -> Result<WgpuSlotBuffers> {
        let vertex_size = align_to(vertex_bytes.max(1), COPY_BUFFER_ALIGNMENT);
        let index_size = align_to(index_bytes.max(1), COPY_BUFFER_ALIGNMENT);

        let max = self.device.limits().max_buffer_size;
        if vertex_size > max || index_size > max {
            bail!(
                "buffer of {} bytes exceeds device limit of {max} bytes",
                vertex_size.max(index_size)
            );
        }

        let id = self.next_slot;
        self.next_slot += 1;

        let storage = self.create_storage(vertex_size, index_size);
        self.slots.insert(id, storage);
        Ok(WgpuSlotBuffers { id })
    }

    fn write_buffer(&mut self, buffer: &WgpuSlotBuffers, vertices: &[u8], indices: &[u8]) {
        let Some(current) = self.slots.get(&buffer.id) else {
            log::warn!("write to unknown slot {}", buffer.id);
            return;
        };

        if self.draws.iter().any(|d| d.storage == current.storage) {
            // The recorded draw keeps the old buffers; the slot moves on.
            let (vertex_size, index_size) = (current.vertices.size(), current.indices.size());
            let fresh = self.create_storage(vertex_size, index_size);
            log::debug!(
                "slot {} rewritten after its draw; now storage {}",
                buffer.id,
                fresh.storage
            );
            self.slots.insert(buffer.id, fresh);
        }

        let Some(current) = self.slots.get(&buffer.id) else { return };
        self.write_padded(&current.vertices, vertices);
        self.write_padded(&current.indices, indices);
    }

    fn bind_and_draw(&mut self, buffer: &WgpuSlotBuffers, index_count: u32) {
        let Some(current) = self.slots.get(&buffer.id) else {
            log::warn!("draw of unknown slot {}", buffer.id);
            return;
        };

        self.draws.push(RecordedDraw {
            slot: buffer.id,
            storage: current.storage,
            vertices: current.vertices.clone(),
            indices: current.indices.clone(),
            index_count,
        });
    }

    fn free_buffer(&mut self, buffer: WgpuSlotBuffers) {
        self.draws.retain(|d| d.slot != buffer.id);
        if let Some(storage) = self.slots.remove(&buffer.id) {
            storage.vertices.destroy();
            storage.indices.destroy();
        }
    }

    fn begin_frame(&mut self, uniforms: &FrameUniforms, clear: Color) {
        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        self.clear = clear;
        self.draws.clear();
    }
}
