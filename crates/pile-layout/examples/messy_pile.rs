//! Lay out a random messy pile and print height and tilt per card.
//!
//! Usage:
//!   cargo run -p pile-layout --example messy_pile -- [count] [seed]

use pile_layout::layout::layout_pile;
use pile_layout::rand::{draw_pile, PileGenCfg, ReplayToken};
use pile_layout::LayoutCfg;

fn main() {
    let mut args = std::env::args().skip(1);
    let count = args.next().and_then(|s| s.parse().ok()).unwrap_or(12);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2025);
    let cfg = PileGenCfg {
        count,
        ..PileGenCfg::default()
    };
    let pile = draw_pile(cfg, ReplayToken { seed, index: 0 });
    for pose in layout_pile(&pile, &LayoutCfg::default()) {
        let p = pose.pose.position;
        println!(
            "id={:>3}  x={:+.3}  z={:+.3}  height={:.4}  tilt={:.2}°",
            pose.id.0,
            p.x,
            p.z,
            p.y,
            pose.pose.tilt().to_degrees()
        );
    }
}
