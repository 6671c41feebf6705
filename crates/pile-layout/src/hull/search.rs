//! Support-plane search: a QuickHull walk toward the face above one point.

use nalgebra::{Vector2, Vector3};

use crate::cfg::ABOVE_EPS;
use crate::geom2::{prev_index, project};
use crate::geom3::Plane3;

/// Index `e` of the polygon edge such that `from`, `corners[e]` and
/// `corners[e + 1]` form a triangle containing `center`.
///
/// Assumes `from` and `center` lie inside the counter-clockwise polygon.
/// Edges starting at a corner that coincides with `from` are skipped.
pub(crate) fn edge_index_surrounding(
    corners: &[Vector2<f64>],
    center: Vector2<f64>,
    from: Vector2<f64>,
) -> usize {
    let to_center = center - from;
    if to_center.norm_squared() == 0.0 || corners.is_empty() {
        return 0;
    }
    let right = Vector2::new(-to_center.y, to_center.x);
    let last = corners[corners.len() - 1] - from;
    let mut prev_dot = last.dot(&right);
    let mut prev_on_from = last.norm_squared() == 0.0;
    for (index, &corner) in corners.iter().enumerate() {
        let offset = corner - from;
        let on_from = offset.norm_squared() == 0.0;
        let dot = offset.dot(&right);
        if prev_dot <= 0.0 && !prev_on_from && dot > 0.0 {
            return prev_index(index, corners.len());
        }
        prev_dot = dot;
        prev_on_from = on_from;
    }
    0
}

/// Vertex furthest above `plane` and all vertices above it.
///
/// Vertices within `ABOVE_EPS` of the plane (including the ones that span
/// it) are dropped. `None` if nothing lies above.
pub(crate) fn top_vertex_and_remaining(
    vertices: &[Vector3<f64>],
    plane: &Plane3,
) -> Option<(Vector3<f64>, Vec<Vector3<f64>>)> {
    let mut top: Option<(f64, Vector3<f64>)> = None;
    let mut remaining = Vec::new();
    for &v in vertices {
        let h = plane.distance(v);
        if h < ABOVE_EPS {
            continue;
        }
        if top.map_or(true, |(best, _)| best < h) {
            top = Some((h, v));
        }
        remaining.push(v);
    }
    top.map(|(_, v)| (v, remaining))
}

/// Plane of the upper hull face of `vertices` above `center`.
///
/// `start` holds three hull vertices whose projections surround `center`,
/// counter-clockwise in `(x, z)`. Each step replaces the triangle corner
/// opposite the edge that keeps `center` surrounded with the vertex furthest
/// above the current plane, until no vertex lies above it. Usually converges
/// within a few passes.
///
/// Degenerate triangles, or exhausting `max_iterations`, fall back to the level
/// plane through the highest starting vertex, which lies above every vertex.
pub(crate) fn plane_containing(
    vertices: &[Vector3<f64>],
    center: Vector2<f64>,
    start: [Vector3<f64>; 3],
    max_iterations: usize,
) -> Plane3 {
    let fallback = Plane3::horizontal(start[0].y);
    let mut triangle = start;
    let mut plane = match upward_plane(&triangle) {
        Some(plane) => plane,
        None => return fallback,
    };
    let mut steps = 0usize;
    loop {
        let mut remaining = vertices.to_vec();
        let mut raised = false;
        while let Some((apex, rest)) = top_vertex_and_remaining(&remaining, &plane) {
            raised = true;
            steps += 1;
            if steps > max_iterations {
                tracing::warn!(steps, "support plane search did not converge");
                return fallback;
            }
            let corners = triangle.map(project);
            let edge = edge_index_surrounding(&corners, center, project(apex));
            triangle[prev_index(edge, 3)] = apex;
            plane = match upward_plane(&triangle) {
                Some(plane) => plane,
                None => return fallback,
            };
            remaining = rest;
        }
        // A pass that raised the plane may have skipped vertices now above it.
        if !raised {
            return plane;
        }
    }
}

fn upward_plane(triangle: &[Vector3<f64>; 3]) -> Option<Plane3> {
    Plane3::through(triangle[0], triangle[2], triangle[1]).filter(|p| p.normal.y > 0.0)
}
