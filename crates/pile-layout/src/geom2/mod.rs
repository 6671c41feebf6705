//! Table-plane geometry (X/Z, Y ignored).
//!
//! Purpose
//! - Model one object's placement as an oriented box (planar pose + 3D
//!   bounding box) and derive convex footprints from it.
//! - Provide convex polygon intersection with explicit edge lines so clipped
//!   polygons keep exact edges of both inputs.
//!
//! Conventions
//! - A 2D point is `Vector2 { x: world X, y: world Z }`.
//! - Polygon corners are counter-clockwise in `(x, z)`; edge lines use
//!   outward unit normals (`distance > 0` is outside).
//!
//! Code cross-refs: `geom3::{Plane3, SupportFace}`, `hull::BoundedConvexHull`.

mod boundary;
mod types;
mod util;

pub use boundary::{footprint, ConvexBoundary2};
pub use types::{Hs2, OrientedBox, Pose2, Rect3};
pub use util::{lift, project};
pub(crate) use util::prev_index;
