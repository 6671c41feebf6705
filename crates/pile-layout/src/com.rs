//! Effective centers of mass across a pile.
//!
//! Each object's query point is shifted toward the load resting on it. Only
//! direct footprint overlaps carry load: indirect chains contribute little and
//! are increasingly likely to be spurious.
//!
//! Weighting
//! - Supporters of `j` are the earlier objects whose footprints overlap `j`'s.
//! - Raw share of `j` on supporter `i` is `1` if `j`'s center of mass lies over
//!   `i`'s footprint, otherwise `partial_support_weight`. Shares are
//!   `raw / max(1, Σ raw)`; the remainder rests on the table. Every object's
//!   load therefore flows down exactly once.
//! - The contact point is `j`'s center of mass clamped into `i`'s footprint.
//! - `load[i] = 1 + Σ share·load[j]` and `com[i]` is the load-weighted mean of
//!   `i`'s own center and its contact points, clamped into the inset footprint.

use nalgebra::Vector2;

use crate::cfg::MAX_INSET_FRACTION;
use crate::geom2::OrientedBox;
use crate::LayoutCfg;

/// Center-of-mass solver for a pile in insertion order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CenterOfMassSolver {
    inset_fraction: f64,
    partial_weight: f64,
}

impl Default for CenterOfMassSolver {
    fn default() -> Self {
        Self::new(0.1, 0.3)
    }
}

impl CenterOfMassSolver {
    /// `min_inset_fraction` is clamped to `[0, 0.49]`, `partial_support_weight`
    /// to be non-negative.
    pub fn new(min_inset_fraction: f64, partial_support_weight: f64) -> Self {
        Self {
            inset_fraction: min_inset_fraction.clamp(0.0, MAX_INSET_FRACTION),
            partial_weight: partial_support_weight.max(0.0),
        }
    }

    pub fn from_cfg(cfg: &LayoutCfg) -> Self {
        Self::new(cfg.min_inset_fraction, cfg.partial_support_weight)
    }

    /// Geometric footprint center of one box.
    #[inline]
    pub fn center_of_mass(boxed: &OrientedBox) -> Vector2<f64> {
        boxed.center()
    }

    /// Contact point and raw weight of a load centered at `load_center` on `base`.
    pub fn contact_on(&self, load_center: Vector2<f64>, base: &OrientedBox) -> (Vector2<f64>, f64) {
        if base.contains_point(load_center) {
            return (load_center, 1.0);
        }
        // Outside the base: assume a fixed fraction of the weight acts at the
        // nearest point of the base and the rest falls on other supports.
        (base.clamp_point(load_center, 0.0), self.partial_weight)
    }

    /// One effective center of mass per box, same order as `boxes`.
    pub fn centers_of_mass(&self, boxes: &[OrientedBox]) -> Vec<Vector2<f64>> {
        let count = boxes.len();
        let mut centers: Vec<Vector2<f64>> = boxes.iter().map(Self::center_of_mass).collect();
        if count < 2 {
            return centers;
        }
        let supporters: Vec<Vec<usize>> = (0..count)
            .map(|j| (0..j).filter(|&i| boxes[i].overlaps(&boxes[j])).collect())
            .collect();

        let mut loads = vec![1.0; count];
        // Per object: (contact point, carried load) deposited by objects above.
        let mut carried: Vec<Vec<(Vector2<f64>, f64)>> = vec![Vec::new(); count];
        for j in (0..count).rev() {
            // Everything above `j` has been processed, so its load is final.
            if !carried[j].is_empty() {
                let mut weighted = centers[j];
                let mut load = 1.0;
                for &(point, weight) in &carried[j] {
                    weighted += point * weight;
                    load += weight;
                }
                centers[j] = boxes[j].clamp_point(weighted / load, self.inset_fraction);
                loads[j] = load;
            }

            let contacts: Vec<(Vector2<f64>, f64)> = supporters[j]
                .iter()
                .map(|&i| self.contact_on(centers[j], &boxes[i]))
                .collect();
            let norm = contacts.iter().map(|&(_, raw)| raw).sum::<f64>().max(1.0);
            for (&i, &(point, raw)) in supporters[j].iter().zip(&contacts) {
                carried[i].push((point, raw / norm * loads[j]));
            }
        }
        centers
    }
}
