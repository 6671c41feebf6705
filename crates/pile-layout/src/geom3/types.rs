use nalgebra::{UnitQuaternion, Vector2, Vector3};

use crate::geom2::lift;

/// Oriented plane `normal · p = dot`; points with `distance <= 0` are below.
///
/// Invariants:
/// - `normal` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane3 {
    pub normal: Vector3<f64>,
    pub dot: f64,
}

impl Plane3 {
    #[inline]
    pub fn new(normal: Vector3<f64>, dot: f64) -> Self {
        Self { normal, dot }
    }

    /// Level plane at height `h`, facing up.
    #[inline]
    pub fn horizontal(h: f64) -> Self {
        Self {
            normal: Vector3::y(),
            dot: h,
        }
    }

    /// Plane through three points, normal `(p1 - p0) × (p2 - p0)`.
    /// `None` if the points are collinear.
    pub fn through(p0: Vector3<f64>, p1: Vector3<f64>, p2: Vector3<f64>) -> Option<Self> {
        let n = (p1 - p0).cross(&(p2 - p0));
        let norm = n.norm();
        if !norm.is_finite() || norm <= 0.0 {
            return None;
        }
        let normal = n / norm;
        Some(Self {
            normal,
            dot: normal.dot(&p0),
        })
    }

    #[inline]
    pub fn distance(&self, p: Vector3<f64>) -> f64 {
        self.normal.dot(&p) - self.dot
    }

    /// Height of the plane above the table point `p`.
    ///
    /// A vertical plane has no height; points below it report `+∞`, the rest `-∞`.
    pub fn height_at(&self, p: Vector2<f64>) -> f64 {
        let n = self.normal;
        if n.y == 0.0 {
            return if self.distance(lift(p, 0.0)) <= 0.0 {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }
        (self.dot - p.x * n.x - p.y * n.z) / n.y
    }

    /// Point of the plane vertically above/below `p`.
    #[inline]
    pub fn point_at(&self, p: Vector2<f64>) -> Vector3<f64> {
        lift(p, self.height_at(p))
    }
}

/// Rigid 3D pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose3 {
    pub position: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl Pose3 {
    #[inline]
    pub fn new(position: Vector3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Object space → world.
    #[inline]
    pub fn transform_point(&self, local: Vector3<f64>) -> Vector3<f64> {
        self.rotation * local + self.position
    }

    /// World image of the object's +Y axis.
    #[inline]
    pub fn up(&self) -> Vector3<f64> {
        self.rotation * Vector3::y()
    }

    /// Angle (radians) between the object's up axis and world +Y.
    pub fn tilt(&self) -> f64 {
        self.up().y.clamp(-1.0, 1.0).acos()
    }
}
