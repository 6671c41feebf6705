//! Bounded convex hull of support faces.
//!
//! Purpose
//! - For the object being placed, collect the top faces of everything below
//!   that overlaps its footprint, and find the plane it rests on.
//!
//! Model
//! - A bounded convex hull is a minimum-volume, single-height-per-point
//!   polygonal roof over the footprint that encloses all accepted faces. Its
//!   vertices are the footprint corners at table height plus every accepted
//!   face clipped to the footprint and lifted onto its plane.
//! - The support plane at a query point is the roof face above that point,
//!   found by a QuickHull walk restricted to that single face (`search`).
//!
//! Code cross-refs: `geom2::ConvexBoundary2`, `geom3::{Plane3, SupportFace}`.

mod search;

use nalgebra::{Vector2, Vector3};

use crate::cfg::CORNER_EPS_SQ;
use crate::geom2::{lift, project, ConvexBoundary2};
use crate::geom3::{Plane3, SupportFace};

use search::{edge_index_surrounding, plane_containing};

/// Convex hull of support candidates over one footprint.
///
/// Invariants:
/// - `boundary` is non-empty (≥ 3 corners).
/// - The first `boundary.len()` vertices are the footprint corners at
///   `table_height`; the rest come from accepted faces, in insertion order.
#[derive(Clone, Debug)]
pub struct BoundedConvexHull {
    boundary: ConvexBoundary2,
    vertices: Vec<Vector3<f64>>,
    table_height: f64,
    accepted: usize,
}

impl BoundedConvexHull {
    pub fn new(boundary: ConvexBoundary2, table_height: f64) -> Self {
        debug_assert!(boundary.len() >= 3, "hull needs a non-empty footprint");
        let vertices = boundary
            .corners
            .iter()
            .map(|&c| lift(c, table_height))
            .collect();
        Self {
            boundary,
            vertices,
            table_height,
            accepted: 0,
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vector3<f64>] {
        &self.vertices
    }

    /// Number of faces that overlapped the footprint so far.
    #[inline]
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Merge a planar polygon; returns whether any of it lies over the footprint.
    pub fn add_planar_polygon(&mut self, polygon: &ConvexBoundary2, plane: &Plane3) -> bool {
        let clipped = polygon.intersection(&self.boundary);
        if clipped.is_empty() {
            return false;
        }
        self.vertices
            .extend(clipped.corners.iter().map(|&c| plane.point_at(c)));
        self.accepted += 1;
        true
    }

    #[inline]
    pub fn add_face(&mut self, face: &SupportFace) -> bool {
        self.add_planar_polygon(&face.polygon, &face.plane)
    }

    /// Plane of the hull face above `center`, or `None` if no face was accepted.
    ///
    /// `center` must lie inside the footprint. `max_iterations` bounds the
    /// refinement walk.
    pub fn find_support_plane(&self, center: Vector2<f64>, max_iterations: usize) -> Option<Plane3> {
        if self.accepted == 0 {
            return None;
        }
        Some(self.support_plane(center, max_iterations))
    }

    fn support_plane(&self, center: Vector2<f64>, max_iterations: usize) -> Plane3 {
        // The highest vertex is always on the hull; later vertices win ties.
        let mut top = lift(center, f64::NEG_INFINITY);
        for &v in &self.vertices {
            if v.y >= top.y {
                top = v;
            }
        }
        if top.y <= self.table_height {
            return Plane3::horizontal(self.table_height);
        }

        // Footprint edge that forms, with the top vertex, a triangle around `center`.
        let corners = &self.boundary.corners;
        let edge = edge_index_surrounding(corners, center, project(top));
        let around = [corners[edge], corners[self.boundary.next_index(edge)]];

        // Highest vertex above each of the two edge corners.
        let mut start = [
            top,
            lift(around[0], f64::NEG_INFINITY),
            lift(around[1], f64::NEG_INFINITY),
        ];
        for &v in &self.vertices {
            for (k, corner) in around.iter().enumerate() {
                if (project(v) - corner).norm_squared() < CORNER_EPS_SQ && start[k + 1].y < v.y {
                    start[k + 1] = v;
                }
            }
        }
        plane_containing(&self.vertices, center, start, max_iterations)
    }
}

#[cfg(test)]
mod tests;
