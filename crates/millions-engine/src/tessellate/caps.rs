//! End-cap generators.
//!
//! Each generator receives the endpoint, `u` (the outward direction along the
//! line, scaled to the endpoint's half-thickness), and the two body vertices
//! at that end, `a` then `b`, ordered so that `(v, a, b)` winds like the body.

use crate::coords::Vec2;
use crate::geom::{barycentric_distance, outward_normal};
use crate::scene::{LineCap, LinePoint};

use super::{GpuVertex, VertexSink, AA_FACTOR};

pub(super) fn generate<S: VertexSink>(point: &LinePoint, u: Vec2, a: u16, b: u16, sink: &mut S) {
    match point.cap {
        LineCap::None => {}
        LineCap::Rounded => rounded(point, u, a, b, sink),
        LineCap::Arrow { length_scale } => arrow(point, u, length_scale, sink),
        LineCap::HalfArrow { length_scale, width_scale } => {
            half_arrow(point, u, length_scale, width_scale, a, b, sink)
        }
    }
}

//  v3  b
//
//  v4  a
fn rounded<S: VertexSink>(point: &LinePoint, u: Vec2, a: u16, b: u16, sink: &mut S) {
    let u = u * AA_FACTOR;
    let r = u.perp();
    let radius = point.radius();

    let v3 = sink.push_vertex(GpuVertex::stroke(point.pos + u + r, point.pos, radius, point.color));
    let v4 = sink.push_vertex(GpuVertex::stroke(point.pos + u - r, point.pos, radius, point.color));

    sink.push_indices(&[v4, a, b, v4, b, v3]);
}

//     2
//  3
//     1
fn arrow<S: VertexSink>(point: &LinePoint, u: Vec2, length_scale: f32, sink: &mut S) {
    let r = u.perp();
    let p1 = point.pos - r;
    let p2 = point.pos + r;
    let p3 = point.pos + u * length_scale;

    let v1 = sink.push_vertex(GpuVertex::edge(
        p1,
        outward_normal(p1, p2, p3),
        2,
        barycentric_distance(p1, p2, p3),
        point.color,
    ));
    let v2 = sink.push_vertex(GpuVertex::edge(
        p2,
        outward_normal(p2, p3, p1),
        3,
        barycentric_distance(p2, p3, p1),
        point.color,
    ));
    let v3 = sink.push_vertex(GpuVertex::edge(
        p3,
        outward_normal(p3, p1, p2),
        5,
        barycentric_distance(p3, p1, p2),
        point.color,
    ));

    sink.push_indices(&[v1, v2, v3]);
}

// Reuses both body vertices and adds a barb tip pulled forward and to one side.
fn half_arrow<S: VertexSink>(
    point: &LinePoint,
    u: Vec2,
    length_scale: f32,
    width_scale: f32,
    a: u16,
    b: u16,
    sink: &mut S,
) {
    let u = u * (length_scale * AA_FACTOR);
    let r = u.perp() * width_scale;
    let tip = point.pos + u + r;
    let reference = point.pos + (u + r) / AA_FACTOR;

    let v = sink.push_vertex(GpuVertex::stroke(tip, reference, point.radius(), point.color));

    sink.push_indices(&[a, b, v]);
}
