//! Resting poses for messy piles of thin rigid objects (cards, tiles, coins).
//!
//! Given the insertion order of a pile and each object's planar pose and
//! bounding box, compute a plausible 3D pose per object without simulating
//! dynamics: effective centers of mass account for the load resting above,
//! and a bounded convex hull over the top faces below yields the support plane.
//!
//! Layout
//! - `geom2`: table-plane types (poses, boxes, convex boundaries).
//! - `geom3`: planes, 3D poses and support faces.
//! - `com`: center-of-mass weighting across the pile.
//! - `hull`: bounded convex hull and support-plane search.
//! - `layout`: pose-on-plane, snapshot boundary and the orchestrator.
//! - `rand`: reproducible random piles for experiments and benches.
//!
//! Conventions
//! - World space is Y-up; the table is the X/Z plane. 2D points are
//!   `Vector2 { x: world X, y: world Z }`.

pub mod api;
pub(crate) mod cfg;
pub mod com;
pub mod geom2;
pub mod geom3;
pub mod hull;
pub mod layout;
pub mod rand;

pub use cfg::LayoutCfg;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

