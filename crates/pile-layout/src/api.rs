//! Curated surface for callers (CLI, examples, benches).
//!
//! Prefer these re-exports over reaching into submodules; the module layout
//! behind them may change.

// Table-plane geometry
pub use crate::geom2::{footprint, lift, project, ConvexBoundary2, Hs2, OrientedBox, Pose2, Rect3};
// Planes, poses and support faces
pub use crate::geom3::{bottom_plane, top_face, top_plane, Plane3, Pose3, SupportFace};
// Solver stages
pub use crate::com::CenterOfMassSolver;
pub use crate::hull::BoundedConvexHull;
pub use crate::layout::{flat_pose, pose_on_plane, tilt_onto};
// Snapshot boundary and orchestrator
pub use crate::layout::{
    collect_pile, layout_pile, layout_snapshot, ObjectId, Pile, PileEntry, PileError, PileId,
    PileSnapshot, ResultPose, TableSnapshot,
};
// Random piles
pub use crate::rand::{draw_pile, PileGenCfg, ReplayToken as PileReplay};
pub use crate::LayoutCfg;
