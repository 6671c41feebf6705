use nalgebra::{Vector2, Vector3};

/// Table point at height `h`: `(x, z) ↦ (x, h, z)`.
#[inline]
pub fn lift(p: Vector2<f64>, h: f64) -> Vector3<f64> {
    Vector3::new(p.x, h, p.y)
}

/// Drop the height: `(x, y, z) ↦ (x, z)`.
#[inline]
pub fn project(v: Vector3<f64>) -> Vector2<f64> {
    Vector2::new(v.x, v.z)
}

#[inline]
pub(crate) fn next_index(index: usize, count: usize) -> usize {
    if index + 1 < count {
        index + 1
    } else {
        0
    }
}

#[inline]
pub(crate) fn prev_index(index: usize, count: usize) -> usize {
    if index > 0 {
        index - 1
    } else {
        count - 1
    }
}

#[inline]
pub(crate) fn lerp(a: Vector2<f64>, b: Vector2<f64>, t: f64) -> Vector2<f64> {
    a * (1.0 - t) + b * t
}
