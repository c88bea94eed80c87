use crate::geom::{barycentric_distance, outward_normal, unit_or_floor};
use crate::scene::{Entity, Line, Triangle};

use super::sink::CostCounter;
use super::{caps, Cost, GpuVertex, VertexSink, AA_FACTOR};

/// Emits the vertices and indices for `entity` into `sink`.
///
/// Stateless: two calls with the same entity produce the same sequence
/// relative to the sink's cursor.
pub fn generate<S: VertexSink>(entity: &Entity, sink: &mut S) {
    match entity {
        Entity::Line(line) => generate_line(line, sink),
        Entity::Triangle(triangle) => generate_triangle(triangle, sink),
    }
}

/// Vertex/index count `generate` would emit for `entity`, without writing anything.
pub fn cost_of(entity: &Entity) -> Cost {
    let mut counter = CostCounter::default();
    generate(entity, &mut counter);
    counter.cost
}

// Body quad, widened by the AA factor so the shader has room to fade the edge:
//
//  v4 ------------------------ v3
//  |  p1 -------------------> p2 |
//  v1 ------------------------ v2
//
// (v1/v2 sit on the +perp side; which side is "up" depends on direction.)
fn generate_line<S: VertexSink>(line: &Line, sink: &mut S) {
    let (p1, p2) = (&line.p1, &line.p2);
    let dir = unit_or_floor(p2.pos - p1.pos);

    let (radius1, radius2) = (p1.radius(), p2.radius());
    let u1 = dir * (radius1 * AA_FACTOR);
    let u2 = dir * (radius2 * AA_FACTOR);
    let (n1, n2) = (u1.perp(), u2.perp());

    let v1 = sink.push_vertex(GpuVertex::stroke(p1.pos + n1, p1.pos, radius1, p1.color));
    let v2 = sink.push_vertex(GpuVertex::stroke(p2.pos + n2, p2.pos, radius2, p2.color));
    let v3 = sink.push_vertex(GpuVertex::stroke(p2.pos - n2, p2.pos, radius2, p2.color));
    let v4 = sink.push_vertex(GpuVertex::stroke(p1.pos - n1, p1.pos, radius1, p1.color));

    sink.push_indices(&[v1, v2, v3, v1, v3, v4]);

    caps::generate(p1, -dir * radius1, v1, v4, sink);
    caps::generate(p2, dir * radius2, v3, v2, sink);
}

fn generate_triangle<S: VertexSink>(triangle: &Triangle, sink: &mut S) {
    let (a, b, c) = (&triangle.p1, &triangle.p2, &triangle.p3);

    let v1 = sink.push_vertex(GpuVertex::edge(
        a.pos,
        outward_normal(a.pos, b.pos, c.pos),
        2,
        barycentric_distance(a.pos, b.pos, c.pos),
        a.color,
    ));
    let v2 = sink.push_vertex(GpuVertex::edge(
        b.pos,
        outward_normal(b.pos, c.pos, a.pos),
        3,
        barycentric_distance(b.pos, c.pos, a.pos),
        b.color,
    ));
    let v3 = sink.push_vertex(GpuVertex::edge(
        c.pos,
        outward_normal(c.pos, a.pos, b.pos),
        5,
        barycentric_distance(c.pos, a.pos, b.pos),
        c.color,
    ));

    sink.push_indices(&[v1, v2, v3]);
}
