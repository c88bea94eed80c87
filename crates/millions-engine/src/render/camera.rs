use crate::coords::Rect;
use crate::scene::Scene;

/// Camera parameters passed through to the vertex stage.
///
/// The renderer does not interpret these; it only packs them into
/// [`FrameUniforms`](super::FrameUniforms). Builders return modified copies.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub focal_x: f32,
    pub focal_y: f32,
    pub zoom: f32,
    /// Width / height. `None` derives it from the surface at render time.
    pub aspect: Option<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            focal_x: 0.0,
            focal_y: 0.0,
            zoom: 1.0,
            aspect: None,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_focal_point(self, x: f32, y: f32) -> Self {
        Self {
            focal_x: x,
            focal_y: y,
            ..self
        }
    }

    pub fn with_zoom(self, zoom: f32) -> Self {
        Self { zoom, ..self }
    }

    pub fn with_aspect_ratio(self, aspect: f32) -> Self {
        Self {
            aspect: Some(aspect),
            ..self
        }
    }

    /// Centers on `rect` and zooms so its longer side spans one unit.
    pub fn with_rect_in_frame(self, rect: Rect) -> Self {
        let center = rect.min().midpoint(rect.max());
        let extent = rect.size.x.max(rect.size.y);
        let zoom = if extent > 0.0 && extent.is_finite() {
            1.0 / extent
        } else {
            self.zoom
        };

        Self {
            focal_x: center.x,
            focal_y: center.y,
            zoom,
            ..self
        }
    }

    /// [`with_rect_in_frame`](Self::with_rect_in_frame) on the scene's
    /// bounding box grown by `padding` on every side.
    pub fn with_scene_in_frame(self, scene: &Scene, padding: f32) -> Self {
        self.with_rect_in_frame(scene.bounding_box().padded(padding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_return_modified_copies() {
        let base = Camera::new();
        let moved = base.with_focal_point(3.0, -2.0).with_zoom(0.5);
        assert_eq!(base, Camera::default());
        assert_eq!((moved.focal_x, moved.focal_y, moved.zoom), (3.0, -2.0, 0.5));
        assert_eq!(moved.aspect, None);
        assert_eq!(moved.with_aspect_ratio(2.0).aspect, Some(2.0));
    }

    #[test]
    fn empty_scene_frames_unit_square() {
        let cam = Camera::new().with_scene_in_frame(&Scene::new(), 0.0);
        assert_eq!((cam.focal_x, cam.focal_y), (0.0, 0.0));
        assert_eq!(cam.zoom, 0.5);
    }
}
