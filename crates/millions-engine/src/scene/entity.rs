use crate::coords::Rect;
use crate::scene::shapes::{Line, Triangle};

use super::ZIndex;

/// A drawable primitive with a position in draw order.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here
/// - add the matching generator to `tessellate::generate` (the match there is
///   exhaustive, so a missing arm is a compile error)
///
/// Equality is structural: same kind, coordinates, colors, thickness, caps and
/// z-index.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Line(Line),
    Triangle(Triangle),
}

impl Entity {
    #[inline]
    pub fn z_index(&self) -> ZIndex {
        match self {
            Entity::Line(l) => l.z,
            Entity::Triangle(t) => t.z,
        }
    }

    #[inline]
    pub fn bounding_box(&self) -> Rect {
        match self {
            Entity::Line(l) => l.bounding_box(),
            Entity::Triangle(t) => t.bounding_box(),
        }
    }
}

impl From<Line> for Entity {
    #[inline]
    fn from(line: Line) -> Self {
        Entity::Line(line)
    }
}

impl From<Triangle> for Entity {
    #[inline]
    fn from(triangle: Triangle) -> Self {
        Entity::Triangle(triangle)
    }
}
