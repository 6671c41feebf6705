//! Layout orchestrator: resting poses for a whole pile.
//!
//! Flow per call
//! 1. Effective centers of mass for the whole pile (`com`).
//! 2. The first object rests flat on the table.
//! 3. Every later object gets a fresh `BoundedConvexHull` over its footprint,
//!    fed with the top faces of all earlier objects at their computed poses.
//!    If any face overlaps, the object rests on the support plane above its
//!    center of mass; otherwise it rests flat.
//!
//! Nothing persists between calls; the result is a pure function of the pile
//! and the configuration.
//!
//! Code cross-refs: `com::CenterOfMassSolver`, `hull::BoundedConvexHull`,
//! `geom3::top_face`.

mod pose;
mod snapshot;
mod types;

pub use pose::{flat_pose, pose_on_plane, tilt_onto};
pub use snapshot::{collect_pile, PileSnapshot, TableSnapshot};
pub use types::{ObjectId, Pile, PileEntry, PileError, PileId, ResultPose};

use crate::com::CenterOfMassSolver;
use crate::geom2::footprint;
use crate::geom3::{top_face, Pose3, SupportFace};
use crate::hull::BoundedConvexHull;
use crate::LayoutCfg;

/// Resting pose for every object of `pile`, in pile order.
pub fn layout_pile(pile: &Pile, cfg: &LayoutCfg) -> Vec<ResultPose> {
    let span = tracing::debug_span!("layout_pile", objects = pile.len());
    let _guard = span.enter();

    let boxes = pile.boxes();
    let centers = CenterOfMassSolver::from_cfg(cfg).centers_of_mass(&boxes);

    let mut poses: Vec<Pose3> = Vec::with_capacity(boxes.len());
    // Top faces of the objects placed so far, in pile order.
    let mut faces: Vec<SupportFace> = Vec::with_capacity(boxes.len());
    for (index, (entry, center)) in pile.iter().zip(&centers).enumerate() {
        let boxed = &entry.boxed;
        let flat = || flat_pose(&boxed.pose, &boxed.bbox, cfg.table_height);
        let pose = if index == 0 {
            flat()
        } else {
            let outline = footprint(boxed);
            if outline.is_empty() {
                tracing::debug!(id = entry.id.0, "degenerate footprint, resting flat");
                flat()
            } else {
                let mut hull = BoundedConvexHull::new(outline, cfg.table_height);
                for face in &faces {
                    hull.add_face(face);
                }
                match hull.find_support_plane(*center, cfg.max_hull_iterations) {
                    Some(plane) => {
                        tracing::trace!(
                            id = entry.id.0,
                            accepted = hull.accepted(),
                            height = plane.height_at(*center),
                            "resting on support plane"
                        );
                        pose_on_plane(&boxed.pose, &boxed.bbox, &plane)
                    }
                    None => {
                        tracing::trace!(id = entry.id.0, "no overlap below, resting flat");
                        flat()
                    }
                }
            }
        };
        faces.push(top_face(&boxed.bbox, &pose));
        poses.push(pose);
    }

    pile.iter()
        .zip(poses)
        .map(|(entry, pose)| ResultPose { id: entry.id, pose })
        .collect()
}

/// `collect_pile` followed by `layout_pile`.
pub fn layout_snapshot<S: PileSnapshot + ?Sized>(
    snapshot: &S,
    pile: PileId,
    cfg: &LayoutCfg,
) -> Result<Vec<ResultPose>, PileError> {
    let pile = collect_pile(snapshot, pile)?;
    Ok(layout_pile(&pile, cfg))
}

#[cfg(test)]
mod tests;
