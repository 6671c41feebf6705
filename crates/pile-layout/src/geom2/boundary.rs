//! Convex polygons with explicit edge lines (`ConvexBoundary2`).
//!
//! Purpose
//! - Footprints and top faces of boxes, and their pairwise intersections.
//!
//! Why explicit edges
//! - Clipping reuses the edge lines of both inputs instead of recomputing them
//!   from (possibly nearly coincident) clipped corners.

use nalgebra::Vector2;

use super::types::{Hs2, OrientedBox};
use super::util::{lerp, next_index};

/// Convex polygon on the table.
///
/// Invariants:
/// - Corners are counter-clockwise in `(x, z)`.
/// - `edges.len() == corners.len()`; `edges[i]` runs from `corners[i]` to
///   `corners[i + 1]` (wrapping) and has a unit outward normal.
/// - Non-empty polygons have at least three corners.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConvexBoundary2 {
    pub corners: Vec<Vector2<f64>>,
    pub edges: Vec<Hs2>,
}

impl ConvexBoundary2 {
    /// Build from counter-clockwise corners. Returns the empty polygon for
    /// fewer than three corners or a zero-length edge.
    pub fn from_corners(corners: Vec<Vector2<f64>>) -> Self {
        if corners.len() < 3 {
            return Self::empty();
        }
        let count = corners.len();
        let mut edges = Vec::with_capacity(count);
        for i in 0..count {
            match Hs2::through(corners[i], corners[next_index(i, count)]) {
                Some(edge) => edges.push(edge),
                None => return Self::empty(),
            }
        }
        Self { corners, edges }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        next_index(index, self.corners.len())
    }

    /// Membership with slack `eps` (positive enlarges).
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        !self.is_empty() && self.edges.iter().all(|e| e.distance(p) <= eps)
    }

    /// Shoelace area (positive for counter-clockwise corners).
    pub fn area(&self) -> f64 {
        let count = self.corners.len();
        let twice: f64 = (0..count)
            .map(|i| {
                let a = self.corners[i];
                let b = self.corners[next_index(i, count)];
                a.x * b.y - a.y * b.x
            })
            .sum();
        0.5 * twice
    }

    /// Convex intersection. Touching polygons (no shared interior) yield empty.
    pub fn intersection(&self, other: &ConvexBoundary2) -> ConvexBoundary2 {
        if self.is_empty() || other.is_empty() {
            return Self::empty();
        }
        // [other edge][own corner]
        let own_vs_other: Vec<Vec<f64>> = other
            .edges
            .iter()
            .map(|e| self.corners.iter().map(|&c| e.distance(c)).collect())
            .collect();
        if own_vs_other.iter().any(|row| row.iter().all(|&d| d >= 0.0)) {
            return Self::empty();
        }
        // [own edge][other corner]
        let other_vs_own: Vec<Vec<f64>> = self
            .edges
            .iter()
            .map(|e| other.corners.iter().map(|&c| e.distance(c)).collect())
            .collect();
        if other_vs_own.iter().any(|row| row.iter().all(|&d| d >= 0.0)) {
            return Self::empty();
        }
        if own_vs_other.iter().all(|row| row.iter().all(|&d| d <= 0.0)) {
            return self.clone();
        }
        if other_vs_own.iter().all(|row| row.iter().all(|&d| d <= 0.0)) {
            return other.clone();
        }

        let mut corners = self.corners.clone();
        let mut edges = self.edges.clone();
        for &line in &other.edges {
            clip(&mut corners, &mut edges, line);
            if corners.len() < 3 {
                return Self::empty();
            }
        }
        Self { corners, edges }
    }
}

/// Footprint of an oriented box as seen from above.
pub fn footprint(boxed: &OrientedBox) -> ConvexBoundary2 {
    ConvexBoundary2::from_corners(boxed.corners().to_vec())
}

/// Keep the part of the polygon with `line.distance < 0`; corners exactly on
/// the line count as outside and are replaced by (identical) crossings.
fn clip(corners: &mut Vec<Vector2<f64>>, edges: &mut Vec<Hs2>, line: Hs2) {
    let dist: Vec<f64> = corners.iter().map(|&c| line.distance(c)).collect();
    if dist.iter().all(|&d| d <= 0.0) {
        return;
    }
    let count = corners.len();
    let mut out_corners = Vec::with_capacity(count + 1);
    let mut out_edges = Vec::with_capacity(count + 1);
    for i in 0..count {
        let j = next_index(i, count);
        let (di, dj) = (dist[i], dist[j]);
        if di < 0.0 {
            out_corners.push(corners[i]);
            out_edges.push(edges[i]);
            if dj >= 0.0 {
                out_corners.push(crossing(corners[i], corners[j], di, dj));
                out_edges.push(line);
            }
        } else if dj < 0.0 {
            let enter = crossing(corners[i], corners[j], di, dj);
            if out_corners.last() == Some(&enter) {
                // Exit and entry coincide: the clip line contributes no edge.
                if let Some(last) = out_edges.last_mut() {
                    *last = edges[i];
                }
            } else {
                out_corners.push(enter);
                out_edges.push(edges[i]);
            }
        }
    }
    *corners = out_corners;
    *edges = out_edges;
}

fn crossing(c1: Vector2<f64>, c2: Vector2<f64>, d1: f64, d2: f64) -> Vector2<f64> {
    if d1 == d2 {
        return c1;
    }
    let t = if d2 == 0.0 { 1.0 } else { -d1 / (d2 - d1) };
    lerp(c1, c2, t)
}
