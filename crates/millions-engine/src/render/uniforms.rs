use bytemuck::{Pod, Zeroable};

use super::Camera;

/// Drawable size in physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width / height, or `1.0` for a degenerate surface.
    pub fn aspect(self) -> f32 {
        if self.width == 0 || self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }
}

/// Per-frame uniform block (std140-compatible, 32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub frame_size: [f32; 2],
    pub focal_point: [f32; 2],
    pub zoom: f32,
    pub aspect: f32,
    pub pixel_density: f32,
    pub _pad: f32,
}

impl FrameUniforms {
    pub const SIZE: u64 = std::mem::size_of::<FrameUniforms>() as u64;

    pub fn new(camera: &Camera, surface: SurfaceSize, pixel_density: f32) -> Self {
        Self {
            frame_size: [surface.width as f32, surface.height as f32],
            focal_point: [camera.focal_x, camera.focal_y],
            zoom: camera.zoom,
            aspect: camera.aspect.unwrap_or_else(|| surface.aspect()),
            pixel_density,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_block_is_32_bytes() {
        assert_eq!(FrameUniforms::SIZE, 32);
    }

    #[test]
    fn aspect_defaults_to_surface() {
        let u = FrameUniforms::new(&Camera::new(), SurfaceSize::new(800, 400), 2.0);
        assert_eq!(u.aspect, 2.0);
        assert_eq!(u.frame_size, [800.0, 400.0]);
        assert_eq!(u.pixel_density, 2.0);
    }

    #[test]
    fn explicit_aspect_wins() {
        let cam = Camera::new().with_aspect_ratio(1.5);
        let u = FrameUniforms::new(&cam, SurfaceSize::new(800, 400), 1.0);
        assert_eq!(u.aspect, 1.5);
    }

    #[test]
    fn zero_surface_has_unit_aspect() {
        assert_eq!(SurfaceSize::new(0, 100).aspect(), 1.0);
    }
}
