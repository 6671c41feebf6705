//! Reproducible random messy piles.
//!
//! Model
//! - `count` identical boxes; planar positions uniform in a disk of radius
//!   `spread` around the origin, rotations uniform in `[0, 2π)`.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so a pile can be regenerated from its token alone.

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geom2::{OrientedBox, Pose2, Rect3};
use crate::layout::{ObjectId, Pile};

/// Random pile configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PileGenCfg {
    pub count: usize,
    /// Radius of the disk holding the object positions. Negative is treated as 0.
    pub spread: f64,
    /// Bounding box shared by every object.
    pub card: Rect3,
}

impl Default for PileGenCfg {
    fn default() -> Self {
        Self {
            count: 16,
            spread: 1.0,
            card: Rect3::card(2.0, 0.02, 3.0),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a pile; object ids are `0..count` in pile order.
pub fn draw_pile(cfg: PileGenCfg, tok: ReplayToken) -> Pile {
    let mut rng = tok.to_std_rng();
    let spread = cfg.spread.max(0.0);
    let mut pile = Pile::new();
    for k in 0..cfg.count {
        // sqrt keeps the density uniform over the disk.
        let r = spread * rng.gen::<f64>().sqrt();
        let phi = rng.gen::<f64>() * TAU;
        let rotation = rng.gen::<f64>() * TAU;
        let pose = Pose2::new(r * phi.cos(), r * phi.sin(), rotation);
        pile.push(ObjectId(k as u64), OrientedBox::new(pose, cfg.card));
    }
    pile
}
