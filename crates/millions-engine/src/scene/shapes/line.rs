use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::ZIndex;

use super::LineCap;

/// One endpoint of a line: position plus per-endpoint styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub pos: Vec2,
    pub color: Color,
    /// Full stroke width at this endpoint. Interpolated along the line.
    pub thickness: f32,
    pub cap: LineCap,
}

impl LinePoint {
    #[inline]
    pub fn new(pos: Vec2, color: Color, thickness: f32) -> Self {
        Self { pos, color, thickness, cap: LineCap::None }
    }

    #[inline]
    pub fn with_cap(self, cap: LineCap) -> Self {
        Self { cap, ..self }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.thickness / 2.0
    }
}

/// Line segment entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: LinePoint,
    pub p2: LinePoint,
    pub z: ZIndex,
}

impl Line {
    #[inline]
    pub fn new(p1: LinePoint, p2: LinePoint, z: impl Into<ZIndex>) -> Self {
        Self { p1, p2, z: z.into() }
    }

    /// Box spanned by the two endpoint positions (stroke width excluded).
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_min_max(
            Vec2::new(self.p1.pos.x.min(self.p2.pos.x), self.p1.pos.y.min(self.p2.pos.y)),
            Vec2::new(self.p1.pos.x.max(self.p2.pos.x), self.p1.pos.y.max(self.p2.pos.y)),
        )
    }
}
