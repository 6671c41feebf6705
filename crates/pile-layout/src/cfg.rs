//! Tolerances and layout configuration.
//!
//! Policy
//! - Tolerances are fixed constants (crate-private); the physical knobs of the
//!   approximation live in `LayoutCfg` and are exposed to callers.

/// Squared distance under which a hull vertex sits on a boundary corner.
pub(crate) const CORNER_EPS_SQ: f64 = 1e-8;
/// A hull vertex must be at least this far above a plane to raise it.
pub(crate) const ABOVE_EPS: f64 = 1e-6;
/// Horizontal normal length under which a support plane counts as level.
pub(crate) const TILT_EPS: f64 = 1e-8;
/// Upper bound for the inset fraction (keeps the clamp rectangle non-empty).
pub(crate) const MAX_INSET_FRACTION: f64 = 0.49;

/// Layout configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutCfg {
    /// Height of the table surface.
    pub table_height: f64,
    /// Effective centers of mass are clamped into the footprint shrunk by this
    /// fraction of its size on every side. Clamped to `[0, 0.49]`.
    pub min_inset_fraction: f64,
    /// Raw share of an object's load carried by a supporter whose footprint
    /// does not contain the object's center of mass.
    pub partial_support_weight: f64,
    /// Bound on support-plane refinement steps per object.
    pub max_hull_iterations: usize,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            table_height: 0.0,
            min_inset_fraction: 0.1,
            partial_support_weight: 0.3,
            max_hull_iterations: 10_000,
        }
    }
}
