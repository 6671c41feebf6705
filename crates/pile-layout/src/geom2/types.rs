//! Basic table-plane types: edge lines, planar poses, bounding boxes, oriented boxes.
//!
//! - `Hs2`: closed half-plane `n·p <= c`, used as a polygon edge line.
//! - `Pose2`: position on the table plus rotation about +Y.
//! - `Rect3`: object-space bounding box (not necessarily centered).
//! - `OrientedBox`: one object's placement, the unit the solver works on.

use nalgebra::{Vector2, Vector3};

/// Closed half-plane `n · p <= c` on the table.
///
/// Invariants:
/// - Edge lines built by `through` have unit `n`, so `distance` is metric.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    /// Line through `p1 → p2` with the outward normal of a counter-clockwise
    /// polygon. `None` if the points coincide.
    pub fn through(p1: Vector2<f64>, p2: Vector2<f64>) -> Option<Self> {
        let dir = p2 - p1;
        let n = Vector2::new(dir.y, -dir.x);
        let norm = n.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return None;
        }
        let n = n / norm;
        Some(Self { n, c: n.dot(&p1) })
    }

    /// Signed distance, positive outside.
    #[inline]
    pub fn distance(&self, p: Vector2<f64>) -> f64 {
        self.n.dot(&p) - self.c
    }
}

/// Planar pose: table position and rotation (radians) about +Y.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose2 {
    pub position: Vector2<f64>,
    pub rotation: f64,
}

impl Pose2 {
    #[inline]
    pub fn new(x: f64, z: f64, rotation: f64) -> Self {
        Self {
            position: Vector2::new(x, z),
            rotation,
        }
    }

    /// World images of the local X and Z axes.
    ///
    /// Matches a right-handed rotation about +Y: local X ↦ `(cos, -sin)`,
    /// local Z ↦ `(sin, cos)`.
    #[inline]
    pub fn axes(&self) -> (Vector2<f64>, Vector2<f64>) {
        let (sin, cos) = self.rotation.sin_cos();
        (Vector2::new(cos, -sin), Vector2::new(sin, cos))
    }

    /// Local → world.
    #[inline]
    pub fn apply(&self, local: Vector2<f64>) -> Vector2<f64> {
        let (ax, az) = self.axes();
        self.position + ax * local.x + az * local.y
    }

    /// World → local.
    #[inline]
    pub fn unapply(&self, world: Vector2<f64>) -> Vector2<f64> {
        let (ax, az) = self.axes();
        let d = world - self.position;
        Vector2::new(d.dot(&ax), d.dot(&az))
    }
}

/// Axis-aligned bounding box in object space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect3 {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl Rect3 {
    #[inline]
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    /// Box centered on the X/Z origin, resting on `y = 0` in object space.
    pub fn card(width: f64, thickness: f64, depth: f64) -> Self {
        Self {
            min: Vector3::new(-0.5 * width, 0.0, -0.5 * depth),
            max: Vector3::new(0.5 * width, thickness, 0.5 * depth),
        }
    }

    #[inline]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn thickness(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Footprint bounds `(min, max)` in local `(x, z)`, shrunk by `inset`
    /// times the footprint size on every side.
    pub fn footprint_bounds(&self, inset: f64) -> (Vector2<f64>, Vector2<f64>) {
        let lo = Vector2::new(self.min.x, self.min.z);
        let hi = Vector2::new(self.max.x, self.max.z);
        let margin = (hi - lo) * inset;
        (lo + margin, hi - margin)
    }
}

/// One object's placement: planar pose plus bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    pub pose: Pose2,
    pub bbox: Rect3,
}

impl OrientedBox {
    #[inline]
    pub fn new(pose: Pose2, bbox: Rect3) -> Self {
        Self { pose, bbox }
    }

    /// Geometric center of the footprint, in world `(x, z)`.
    pub fn center(&self) -> Vector2<f64> {
        let c = self.bbox.center();
        self.pose.apply(Vector2::new(c.x, c.z))
    }

    /// Footprint corners in world `(x, z)`, counter-clockwise.
    pub fn corners(&self) -> [Vector2<f64>; 4] {
        let (lo, hi) = self.bbox.footprint_bounds(0.0);
        [
            self.pose.apply(Vector2::new(hi.x, hi.y)),
            self.pose.apply(Vector2::new(lo.x, hi.y)),
            self.pose.apply(Vector2::new(lo.x, lo.y)),
            self.pose.apply(Vector2::new(hi.x, lo.y)),
        ]
    }

    /// Footprints overlap with nonzero area (touching does not count).
    ///
    /// Separating-axis test over the four edge directions of both rectangles.
    pub fn overlaps(&self, other: &OrientedBox) -> bool {
        let a = self.corners();
        let b = other.corners();
        let (ax, az) = self.pose.axes();
        let (bx, bz) = other.pose.axes();
        for axis in [ax, az, bx, bz] {
            let (a_lo, a_hi) = extent_along(&a, axis);
            let (b_lo, b_hi) = extent_along(&b, axis);
            if a_hi <= b_lo || b_hi <= a_lo {
                return false;
            }
        }
        true
    }

    /// Whether the world point lies inside the footprint (boundary included).
    pub fn contains_point(&self, world: Vector2<f64>) -> bool {
        let local = self.pose.unapply(world);
        let (lo, hi) = self.bbox.footprint_bounds(0.0);
        local.x >= lo.x && local.x <= hi.x && local.y >= lo.y && local.y <= hi.y
    }

    /// Nearest point to `world` inside the footprint shrunk by `inset`.
    pub fn clamp_point(&self, world: Vector2<f64>, inset: f64) -> Vector2<f64> {
        let local = self.pose.unapply(world);
        let (lo, hi) = self.bbox.footprint_bounds(inset);
        let clamped = Vector2::new(local.x.max(lo.x).min(hi.x), local.y.max(lo.y).min(hi.y));
        self.pose.apply(clamped)
    }
}

fn extent_along(corners: &[Vector2<f64>; 4], axis: Vector2<f64>) -> (f64, f64) {
    corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        let s = c.dot(&axis);
        (lo.min(s), hi.max(s))
    })
}
