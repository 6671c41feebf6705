//! Read-only view of table state and its validation into a `Pile`.

use std::collections::{BTreeMap, BTreeSet};

use super::types::{validate_box, ObjectId, Pile, PileError, PileId};
use crate::geom2::{OrientedBox, Pose2, Rect3};

/// Table state as seen by the solver during one call.
pub trait PileSnapshot {
    /// Member identifiers of `pile` in insertion order, or `None` if unknown.
    fn members(&self, pile: PileId) -> Option<Vec<ObjectId>>;
    fn pose(&self, id: ObjectId) -> Option<Pose2>;
    fn bounding_box(&self, id: ObjectId) -> Option<Rect3>;
}

/// In-memory snapshot.
#[derive(Clone, Debug, Default)]
pub struct TableSnapshot {
    objects: BTreeMap<ObjectId, (Pose2, Rect3)>,
    piles: BTreeMap<PileId, Vec<ObjectId>>,
}

impl TableSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object's pose and bounding box.
    pub fn insert_object(&mut self, id: ObjectId, pose: Pose2, bbox: Rect3) -> &mut Self {
        self.objects.insert(id, (pose, bbox));
        self
    }

    /// Append `id` on top of `pile`, creating the pile if needed.
    pub fn push_member(&mut self, pile: PileId, id: ObjectId) -> &mut Self {
        self.piles.entry(pile).or_default().push(id);
        self
    }
}

impl PileSnapshot for TableSnapshot {
    fn members(&self, pile: PileId) -> Option<Vec<ObjectId>> {
        self.piles.get(&pile).cloned()
    }

    fn pose(&self, id: ObjectId) -> Option<Pose2> {
        self.objects.get(&id).map(|(pose, _)| *pose)
    }

    fn bounding_box(&self, id: ObjectId) -> Option<Rect3> {
        self.objects.get(&id).map(|(_, bbox)| *bbox)
    }
}

/// Read and validate the members of `pile`.
///
/// Fails on an unknown pile, a member without pose or bounding box, repeated
/// members, non-finite values and bounding boxes with an extent `<= 0`.
pub fn collect_pile<S: PileSnapshot + ?Sized>(snapshot: &S, pile: PileId) -> Result<Pile, PileError> {
    let members = snapshot.members(pile).ok_or(PileError::UnknownPile(pile))?;
    let mut seen = BTreeSet::new();
    let mut out = Pile::new();
    for id in members {
        if !seen.insert(id) {
            return Err(PileError::DuplicateObject(id));
        }
        let pose = snapshot.pose(id).ok_or(PileError::MissingObject(id))?;
        let bbox = snapshot.bounding_box(id).ok_or(PileError::MissingObject(id))?;
        let boxed = OrientedBox::new(pose, bbox);
        validate_box(id, &boxed)?;
        out.push(id, boxed);
    }
    Ok(out)
}
