use std::collections::HashSet;

use crate::scene::{Scene, ZIndex};
use crate::tessellate::{cost_of, generate, GeometryBuffer, GpuVertex};

use super::region::{BufferRegion, RegionId, RegionStart};
use super::{BufferBackend, PoolConfig, PoolError};

/// One fixed-capacity vertex + index storage pair and its CPU staging copy.
#[derive(Debug)]
pub struct Slot<H> {
    buffer: H,
    /// Region whose geometry this slot currently holds. Identity only.
    region: Option<RegionId>,
    geometry: GeometryBuffer,
}

impl<H> Slot<H> {
    fn new(buffer: H) -> Self {
        Self {
            buffer,
            region: None,
            geometry: GeometryBuffer::new(),
        }
    }

    #[inline]
    pub fn buffer(&self) -> &H {
        &self.buffer
    }

    #[inline]
    pub fn region(&self) -> Option<RegionId> {
        self.region
    }

    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.geometry.vertices.len() as u32
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.geometry.indices.len() as u32
    }

    #[inline]
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }
}

/// Result of [`BufferPool::acquire`].
#[derive(Debug)]
pub struct Acquired<'a, H> {
    pub slot: &'a Slot<H>,
    /// Start of the entities that did not fit; the caller must cover them
    /// with a new dirty region beginning here.
    pub overflow_at: Option<ZIndex>,
    /// Whether the slot's contents were rewritten.
    pub regenerated: bool,
}

/// Bounded set of fixed-capacity GPU buffers, handed out to regions.
///
/// Slots are kept in least-recently-used order (front = least recent).
/// Single-threaded: callers serialize access to `acquire`.
#[derive(Debug)]
pub struct BufferPool<H> {
    config: PoolConfig,
    slots: Vec<Slot<H>>,
}

impl<H> BufferPool<H> {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Slots in LRU order, least recently used first.
    #[inline]
    pub fn slots(&self) -> &[Slot<H>] {
        &self.slots
    }

    /// The slot currently holding geometry for `region`, if any.
    pub fn slot_for(&self, region: RegionId) -> Option<&Slot<H>> {
        self.slots.iter().find(|s| s.region == Some(region))
    }

    /// Returns a slot holding up-to-date geometry for `region`.
    ///
    /// `end` is the region's exclusive upper z bound (`None` = +∞) and
    /// `upcoming` lists the regions still to be acquired this frame; their
    /// slots are only stolen as a last resort.
    ///
    /// A clean region that still owns a slot is a cache hit and nothing is
    /// written. Otherwise the slot is regenerated from `scene`, stopping at the
    /// first entity that would exceed capacity (reported as `overflow_at`).
    pub fn acquire<B>(
        &mut self,
        backend: &mut B,
        region: &mut BufferRegion,
        end: Option<ZIndex>,
        scene: &Scene,
        upcoming: &[BufferRegion],
    ) -> Result<Acquired<'_, H>, PoolError>
    where
        B: BufferBackend<Buffer = H>,
    {
        let index = match self.slots.iter().position(|s| s.region == Some(region.id())) {
            Some(i) => {
                let i = self.touch(i);
                if !region.is_dirty() {
                    log::trace!("region {:?}: cache hit", region.id());
                    return Ok(Acquired {
                        slot: &self.slots[i],
                        overflow_at: None,
                        regenerated: false,
                    });
                }
                i
            }
            None => self.obtain_slot(backend, upcoming)?,
        };

        let config = self.config;
        let slot = &mut self.slots[index];
        slot.region = Some(region.id());

        let overflow_at = match fill(&mut slot.geometry, &config, region.start(), end, scene) {
            Ok(overflow_at) => overflow_at,
            Err(err) => {
                slot.region = None;
                slot.geometry.clear();
                return Err(err);
            }
        };

        backend.write_buffer(
            &slot.buffer,
            slot.geometry.vertex_bytes(),
            slot.geometry.index_bytes(),
        );
        region.mark_clean();

        log::trace!(
            "region {:?}: regenerated {} vertices / {} indices{}",
            region.id(),
            slot.vertex_count(),
            slot.index_count(),
            if overflow_at.is_some() { " (overflow)" } else { "" },
        );

        Ok(Acquired {
            slot: &self.slots[index],
            overflow_at,
            regenerated: true,
        })
    }

    /// Unbinds the slot holding `region`, turning it into a free slot.
    pub fn release(&mut self, region: RegionId) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.region == Some(region)) {
            slot.region = None;
            slot.geometry.clear();
        }
    }

    /// Frees slots until at most `max` remain, unbound slots first, then
    /// least recently used.
    pub fn shrink_to<B>(&mut self, max: usize, backend: &mut B)
    where
        B: BufferBackend<Buffer = H>,
    {
        while self.slots.len() > max {
            let victim = self.slots.iter().position(|s| s.region.is_none()).unwrap_or(0);
            let slot = self.slots.remove(victim);
            backend.free_buffer(slot.buffer);
        }
    }

    /// Frees every slot.
    pub fn clear<B>(&mut self, backend: &mut B)
    where
        B: BufferBackend<Buffer = H>,
    {
        self.shrink_to(0, backend);
    }

    /// Moves slot `i` to the most-recently-used end and returns its new index.
    fn touch(&mut self, i: usize) -> usize {
        let slot = self.slots.remove(i);
        self.slots.push(slot);
        self.slots.len() - 1
    }

    /// Free slot, then a fresh allocation, then theft.
    fn obtain_slot<B>(
        &mut self,
        backend: &mut B,
        upcoming: &[BufferRegion],
    ) -> Result<usize, PoolError>
    where
        B: BufferBackend<Buffer = H>,
    {
        if let Some(i) = self.slots.iter().position(|s| s.region.is_none()) {
            return Ok(self.touch(i));
        }

        if self.slots.len() < self.config.max_buffers {
            let vertex_bytes = self.config.vertex_capacity() as u64 * GpuVertex::SIZE;
            let index_bytes =
                self.config.index_capacity() as u64 * std::mem::size_of::<u16>() as u64;

            match backend.allocate_buffer(vertex_bytes, index_bytes) {
                Ok(buffer) => {
                    self.slots.push(Slot::new(buffer));
                    log::debug!(
                        "allocated buffer slot {} of {}",
                        self.slots.len(),
                        self.config.max_buffers
                    );
                    return Ok(self.slots.len() - 1);
                }
                Err(err) => log::warn!("buffer allocation failed: {err:#}"),
            }
        }

        let victim = self.steal_candidate(upcoming).ok_or(PoolError::BufferExhausted)?;
        log::trace!("stealing slot from region {:?}", self.slots[victim].region);
        Ok(self.touch(victim))
    }

    /// Least recently used slot whose region is not needed again this frame.
    /// If every slot is spoken for, the one needed last.
    fn steal_candidate(&self, upcoming: &[BufferRegion]) -> Option<usize> {
        let upcoming_ids: HashSet<RegionId> = upcoming.iter().map(BufferRegion::id).collect();

        let idle = self
            .slots
            .iter()
            .position(|s| !s.region.is_some_and(|id| upcoming_ids.contains(&id)));
        if idle.is_some() {
            return idle;
        }

        let least_imminent = upcoming
            .iter()
            .rev()
            .find_map(|r| self.slots.iter().position(|s| s.region == Some(r.id())));
        if least_imminent.is_some() {
            return least_imminent;
        }

        (!self.slots.is_empty()).then_some(0)
    }
}

/// Regenerates `geometry` with the entities in `[start, end)`.
///
/// Returns the z-index of the first entity that did not fit, or
/// `InvalidSplit` if not even the first entity fits an empty buffer.
fn fill(
    geometry: &mut GeometryBuffer,
    config: &PoolConfig,
    start: RegionStart,
    end: Option<ZIndex>,
    scene: &Scene,
) -> Result<Option<ZIndex>, PoolError> {
    geometry.clear();

    let (max_vertices, max_indices) = (config.vertex_capacity(), config.index_capacity());
    let mut emitted = 0usize;

    for entity in scene.entities_from(start.z()) {
        let z = entity.z_index();
        if end.is_some_and(|end| z >= end) {
            break;
        }

        let cost = cost_of(entity);
        let used = geometry.cost();
        let over_vertices = used.vertices + cost.vertices > max_vertices;
        let over_indices = used.indices + cost.indices > max_indices;
        if over_vertices || over_indices {
            if emitted == 0 {
                log::error!("entity at {z} needs {cost:?}, more than one buffer holds");
                return Err(PoolError::InvalidSplit { z });
            }
            return Ok(Some(z));
        }

        generate(entity, geometry);
        emitted += 1;
    }

    Ok(None)
}
