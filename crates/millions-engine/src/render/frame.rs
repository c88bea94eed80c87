use crate::buffer::{BufferBackend, BufferPool, PoolConfig, PoolError, RegionList};
use crate::scene::Scene;

use super::{Camera, FrameUniforms, SurfaceSize};

/// Renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub pool: PoolConfig,
    /// Physical pixels per logical pixel, forwarded to the shader.
    pub pixel_density: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            pool: PoolConfig::default(),
            pixel_density: 1.0,
        }
    }
}

/// Counters for one call to [`FrameRenderer::render`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    /// Regions after the frame, including any created by overflow splits.
    pub regions: usize,
    pub regenerated: usize,
    pub reused: usize,
    /// Regions left undrawn because no buffer could be found.
    pub skipped: usize,
    pub draw_calls: usize,
    pub vertices: u64,
    pub indices: u64,
}

/// Draws successive scenes, regenerating only the regions that changed.
///
/// Holds the region partition, the buffer pool and the previously rendered
/// scene (the baseline the next scene is diffed against).
#[derive(Debug)]
pub struct FrameRenderer<H> {
    config: RendererConfig,
    pool: BufferPool<H>,
    regions: RegionList,
    baseline: Scene,
}

impl<H> FrameRenderer<H> {
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            pool: BufferPool::new(config.pool),
            regions: RegionList::new(),
            baseline: Scene::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    #[inline]
    pub fn regions(&self) -> &RegionList {
        &self.regions
    }

    #[inline]
    pub fn pool(&self) -> &BufferPool<H> {
        &self.pool
    }

    /// Frees every buffer and forgets the previous scene; the next frame
    /// regenerates everything.
    pub fn reset<B>(&mut self, backend: &mut B)
    where
        B: BufferBackend<Buffer = H>,
    {
        self.pool.clear(backend);
        self.regions = RegionList::new();
        self.baseline = Scene::new();
    }

    /// Renders `scene`, drawing every region back-to-front.
    ///
    /// Regions the pool cannot serve are skipped (and retried next frame).
    /// An entity too large for a single buffer aborts the frame with
    /// [`PoolError::InvalidSplit`].
    pub fn render<B>(
        &mut self,
        backend: &mut B,
        scene: &Scene,
        camera: &Camera,
        surface: SurfaceSize,
    ) -> Result<FrameStats, PoolError>
    where
        B: BufferBackend<Buffer = H>,
    {
        let uniforms = FrameUniforms::new(camera, surface, self.config.pixel_density);
        backend.begin_frame(&uniforms, scene.background());

        for op in &self.baseline.compare_to(scene) {
            self.regions.mark_containing(op.z_index());
        }
        for id in self.regions.merge_dirty() {
            self.pool.release(id);
        }

        let mut stats = FrameStats::default();
        let mut i = 0;

        // Splits insert right after `i`, so the new region is visited next.
        while i < self.regions.len() {
            let (region, end, upcoming) = self.regions.cursor(i);

            match self.pool.acquire(backend, region, end, scene, upcoming) {
                Ok(acquired) => {
                    let slot = acquired.slot;
                    if acquired.regenerated {
                        stats.regenerated += 1;
                    } else {
                        stats.reused += 1;
                    }

                    if slot.index_count() > 0 {
                        backend.bind_and_draw(slot.buffer(), slot.index_count());
                        stats.draw_calls += 1;
                        stats.vertices += u64::from(slot.vertex_count());
                        stats.indices += u64::from(slot.index_count());
                    }

                    if let Some(z) = acquired.overflow_at {
                        let id = self.regions.split_after(i, z)?;
                        log::debug!("region full, split at {z} into {id:?}");
                    }
                }
                Err(PoolError::BufferExhausted) => {
                    log::warn!("buffer pool exhausted, skipping region {i}");
                    stats.skipped += 1;
                }
                Err(err) => {
                    log::error!("frame aborted: {err}");
                    return Err(err);
                }
            }

            i += 1;
        }

        stats.regions = self.regions.len();
        self.baseline = scene.clone();

        log::debug!("frame rendered: {stats:?}");
        Ok(stats)
    }
}
