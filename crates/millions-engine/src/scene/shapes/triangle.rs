use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::scene::ZIndex;

/// One corner of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePoint {
    pub pos: Vec2,
    pub color: Color,
}

impl TrianglePoint {
    #[inline]
    pub fn new(pos: Vec2, color: Color) -> Self {
        Self { pos, color }
    }
}

/// Filled triangle entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: TrianglePoint,
    pub p2: TrianglePoint,
    pub p3: TrianglePoint,
    pub z: ZIndex,
}

impl Triangle {
    #[inline]
    pub fn new(
        p1: TrianglePoint,
        p2: TrianglePoint,
        p3: TrianglePoint,
        z: impl Into<ZIndex>,
    ) -> Self {
        Self { p1, p2, p3, z: z.into() }
    }

    pub fn bounding_box(&self) -> Rect {
        // Three points always yield a rect.
        Rect::from_points([self.p1.pos, self.p2.pos, self.p3.pos]).unwrap_or_default()
    }
}
