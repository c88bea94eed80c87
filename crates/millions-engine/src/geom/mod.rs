//! Stateless 2D helpers used by the tessellator.
//!
//! All functions are pure and tolerate degenerate input (coincident points,
//! zero-length segments) without producing NaN.

use crate::coords::Vec2;

/// Lengths below this are treated as this value when building unit vectors.
pub const MIN_SEGMENT_LENGTH: f32 = 0.001;

/// Unit vector pointing from vertex `p` away from the opposite side `ab`.
///
/// Computed as the negated, normalized sum of the two edge vectors leaving
/// `p`. Returns the zero vector when that sum vanishes.
pub fn outward_normal(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let v = -((a - p) + (b - p));
    let dist = v.length();
    if dist == 0.0 || !dist.is_finite() {
        return Vec2::zero();
    }
    v / dist
}

/// Distance from `p` to the midpoint of the opposite edge `ab`.
#[inline]
pub fn barycentric_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (a.midpoint(b) - p).length()
}

/// Normalizes `d`, flooring its length at [`MIN_SEGMENT_LENGTH`].
///
/// A zero vector stays zero; a very short vector comes out shorter than one.
#[inline]
pub fn unit_or_floor(d: Vec2) -> Vec2 {
    d / d.length().max(MIN_SEGMENT_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn outward_normal_points_away_from_opposite_edge() {
        // Apex at the top of an isoceles triangle: normal is straight up.
        let n = outward_normal(Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(close(n, Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn outward_normal_is_unit_length() {
        let n = outward_normal(Vec2::new(0.0, 0.0), Vec2::new(3.0, 0.0), Vec2::new(0.0, 5.0));
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.x < 0.0 && n.y < 0.0);
    }

    #[test]
    fn outward_normal_degenerate_is_zero() {
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(outward_normal(p, Vec2::new(2.0, 1.0), Vec2::new(0.0, 1.0)), Vec2::zero());
    }

    #[test]
    fn barycentric_distance_to_edge_midpoint() {
        let (a, b, c) = (Vec2::new(0.0, 3.0), Vec2::new(-2.0, -1.0), Vec2::new(2.0, -1.0));
        let d = barycentric_distance(a, b, c);
        assert_eq!(d, 4.0);
    }

    #[test]
    fn unit_or_floor_normalizes() {
        assert!(close(unit_or_floor(Vec2::new(0.0, 10.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn unit_or_floor_zero_length_is_finite() {
        let u = unit_or_floor(Vec2::zero());
        assert!(u.is_finite());
        assert_eq!(u, Vec2::zero());
    }
}
