//! End-to-end frame rendering against an in-memory backend.
//!
//! The backend records every buffer operation so tests can check which
//! regions were regenerated, reused, drawn or skipped.

use millions_engine::buffer::{BufferBackend, PoolConfig, PoolError};
use millions_engine::coords::Vec2;
use millions_engine::logging::{init_logging, LoggingConfig};
use millions_engine::paint::Color;
use millions_engine::render::{
    Camera, FrameRenderer, FrameStats, FrameUniforms, RendererConfig, SurfaceSize,
};
use millions_engine::scene::{Line, LinePoint, Scene, ZIndex};

#[derive(Default)]
struct RecordingBackend {
    next: u32,
    writes: Vec<u32>,
    /// (buffer, index count)
    draws: Vec<(u32, u32)>,
    freed: Vec<u32>,
    frames: Vec<(FrameUniforms, Color)>,
}

impl BufferBackend for RecordingBackend {
    type Buffer = u32;

    fn allocate_buffer(&mut self, _vertex_bytes: u64, _index_bytes: u64) -> anyhow::Result<u32> {
        self.next += 1;
        Ok(self.next)
    }

    fn write_buffer(&mut self, buffer: &u32, _vertices: &[u8], _indices: &[u8]) {
        self.writes.push(*buffer);
    }

    fn bind_and_draw(&mut self, buffer: &u32, index_count: u32) {
        self.draws.push((*buffer, index_count));
    }

    fn free_buffer(&mut self, buffer: u32) {
        self.freed.push(buffer);
    }

    fn begin_frame(&mut self, uniforms: &FrameUniforms, clear: Color) {
        self.frames.push((*uniforms, clear));
        self.draws.clear();
    }
}

fn line(z: i32, color: Color) -> Line {
    Line::new(
        LinePoint::new(Vec2::new(0.0, z as f32), color, 1.0),
        LinePoint::new(Vec2::new(10.0, z as f32), color, 1.0),
        z,
    )
}

fn scene_with(zs: &[i32]) -> Scene {
    zs.iter()
        .fold(Scene::new(), |s, &z| s.with_entity_added(line(z, Color::BLACK)).unwrap())
}

/// Two uncapped lines per buffer.
fn tiny_buffers() -> RendererConfig {
    RendererConfig {
        pool: PoolConfig {
            max_buffers: 256,
            max_vertices: 8,
            max_indices: 24,
        },
        ..Default::default()
    }
}

const SURFACE: SurfaceSize = SurfaceSize::new(640, 480);

fn render(
    renderer: &mut FrameRenderer<u32>,
    backend: &mut RecordingBackend,
    scene: &Scene,
) -> FrameStats {
    init_logging(LoggingConfig::for_tests());
    renderer.render(backend, scene, &Camera::new(), SURFACE).unwrap()
}

fn region_starts(renderer: &FrameRenderer<u32>) -> Vec<Option<i32>> {
    renderer
        .regions()
        .iter()
        .map(|r| r.start().z().map(ZIndex::get))
        .collect()
}

#[test]
fn first_frame_generates_and_draws_everything() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig::default());
    let scene = scene_with(&[1, 2, 3]);

    let stats = render(&mut renderer, &mut backend, &scene);

    assert_eq!(stats.regions, 1);
    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.draw_calls, 1);
    assert_eq!((stats.vertices, stats.indices), (12, 18));
    assert_eq!(backend.draws, vec![(1, 18)]);
}

#[test]
fn unchanged_scene_reuses_every_buffer() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(tiny_buffers());
    let scene = scene_with(&[0, 10, 20, 30, 40, 50]);

    render(&mut renderer, &mut backend, &scene);
    let writes = backend.writes.len();
    let stats = render(&mut renderer, &mut backend, &scene.clone());

    assert_eq!(stats.regenerated, 0);
    assert_eq!(stats.reused, 3);
    assert_eq!(stats.draw_calls, 3);
    assert_eq!(backend.writes.len(), writes);
}

#[test]
fn full_regions_split_at_the_first_entity_that_does_not_fit() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(tiny_buffers());

    let stats = render(&mut renderer, &mut backend, &scene_with(&[0, 10, 20, 30, 40, 50]));

    assert_eq!(region_starts(&renderer), vec![None, Some(20), Some(40)]);
    assert_eq!(stats.regenerated, 3);
    assert!(renderer.regions().is_valid_partition());
    assert!(renderer.pool().slots().iter().all(|s| s.vertex_count() <= 8));
}

#[test]
fn local_edit_regenerates_only_its_region() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(tiny_buffers());
    let scene = scene_with(&[0, 10, 20, 30, 40, 50]);
    render(&mut renderer, &mut backend, &scene);

    let edited = scene.with_entity_replaced(line(30, Color::WHITE)).unwrap();
    let stats = render(&mut renderer, &mut backend, &edited);

    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.reused, 2);
    let middle = renderer.regions().as_slice()[1].id();
    let slot = renderer.pool().slot_for(middle).unwrap();
    assert_eq!(backend.writes.last(), Some(slot.buffer()));
}

#[test]
fn insert_into_full_region_splits_it_again() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(tiny_buffers());
    let scene = scene_with(&[0, 10, 20, 30, 40, 50]);
    render(&mut renderer, &mut backend, &scene);

    let edited = scene.with_entity_added(line(5, Color::BLACK)).unwrap();
    let stats = render(&mut renderer, &mut backend, &edited);

    assert_eq!(region_starts(&renderer), vec![None, Some(10), Some(20), Some(40)]);
    assert_eq!(stats.regenerated, 2);
    assert_eq!(stats.reused, 2);
    assert_eq!(stats.draw_calls, 4);
}

#[test]
fn adjacent_dirty_regions_merge_and_release_their_slot() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(tiny_buffers());
    let scene = scene_with(&[0, 10, 20, 30, 40, 50]);
    render(&mut renderer, &mut backend, &scene);

    let trimmed = scene
        .with_entity_removed(ZIndex(20)).unwrap()
        .with_entity_removed(ZIndex(40)).unwrap();
    let stats = render(&mut renderer, &mut backend, &trimmed);

    assert_eq!(region_starts(&renderer), vec![None, Some(20)]);
    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.reused, 1);
    assert_eq!(renderer.pool().slots().iter().filter(|s| s.region().is_none()).count(), 1);
}

#[test]
fn emptied_scene_draws_nothing() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig::default());
    render(&mut renderer, &mut backend, &scene_with(&[1, 2]));

    let stats = render(&mut renderer, &mut backend, &Scene::new());

    assert_eq!(stats.regenerated, 1);
    assert_eq!(stats.draw_calls, 0);
    assert!(backend.draws.is_empty());
}

#[test]
fn exhausted_pool_skips_regions_without_failing() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig {
        pool: PoolConfig {
            max_buffers: 0,
            ..Default::default()
        },
        ..Default::default()
    });

    let stats = render(&mut renderer, &mut backend, &scene_with(&[1, 2]));

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.draw_calls, 0);
    assert!(renderer.regions().as_slice()[0].is_dirty());
}

#[test]
fn oversized_entity_aborts_the_frame() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig {
        pool: PoolConfig {
            max_buffers: 4,
            max_vertices: 3,
            max_indices: 9,
        },
        ..Default::default()
    });

    let result = renderer.render(&mut backend, &scene_with(&[7]), &Camera::new(), SURFACE);
    assert_eq!(result.unwrap_err(), PoolError::InvalidSplit { z: ZIndex(7) });
}

#[test]
fn single_buffer_pool_regenerates_every_frame() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig {
        pool: PoolConfig {
            max_buffers: 1,
            ..tiny_buffers().pool
        },
        ..Default::default()
    });
    let scene = scene_with(&[0, 10, 20, 30]);

    let first = render(&mut renderer, &mut backend, &scene);
    let second = render(&mut renderer, &mut backend, &scene);

    assert_eq!(first.draw_calls, 2);
    assert_eq!(second.regenerated, 2);
    assert_eq!(renderer.pool().slot_count(), 1);
}

#[test]
fn reset_frees_buffers_and_starts_over() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(tiny_buffers());
    let scene = scene_with(&[0, 10, 20, 30]);
    render(&mut renderer, &mut backend, &scene);

    renderer.reset(&mut backend);
    assert_eq!(backend.freed.len(), 2);
    assert_eq!(renderer.pool().slot_count(), 0);
    assert_eq!(renderer.regions().len(), 1);

    let stats = render(&mut renderer, &mut backend, &scene);
    assert_eq!(stats.regenerated, 2);
}

#[test]
fn camera_and_background_reach_the_backend() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig {
        pixel_density: 2.0,
        ..Default::default()
    });
    let scene = scene_with(&[1]).with_background_color(Color::from_rgb(10, 20, 30));
    let camera = Camera::new().with_focal_point(4.0, 5.0).with_zoom(0.25);

    renderer.render(&mut backend, &scene, &camera, SurfaceSize::new(300, 150)).unwrap();

    let (uniforms, clear) = backend.frames[0];
    assert_eq!(clear, Color::from_rgb(10, 20, 30));
    assert_eq!(uniforms.focal_point, [4.0, 5.0]);
    assert_eq!(uniforms.zoom, 0.25);
    assert_eq!(uniforms.aspect, 2.0);
    assert_eq!(uniforms.pixel_density, 2.0);
}

#[test]
fn large_scene_edit_touches_one_region() {
    let mut backend = RecordingBackend::default();
    let mut renderer = FrameRenderer::new(RendererConfig::default());
    let scene = Scene::from_entities((0..20_000).map(|z| line(z, Color::BLACK))).unwrap();

    let first = render(&mut renderer, &mut backend, &scene);
    // 16384 uncapped lines fill one 65536-vertex buffer.
    assert_eq!(first.regions, 2);

    let edited = scene.with_entity_replaced(line(19_999, Color::WHITE)).unwrap();
    let second = render(&mut renderer, &mut backend, &edited);
    assert_eq!(second.regenerated, 1);
    assert_eq!(second.reused, 1);
}
