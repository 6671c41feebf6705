use std::fmt;

use crate::geom2::OrientedBox;
use crate::geom3::Pose3;

/// Identifier of one object on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// Identifier of a pile (a container of stacked objects).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PileId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object {}", self.0)
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pile {}", self.0)
    }
}

/// One member of a pile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PileEntry {
    pub id: ObjectId,
    pub boxed: OrientedBox,
}

/// Ordered pile, bottom-most (earliest placed) first.
///
/// Built by `collect_pile`, which validates every entry; `Pile::push` is the
/// unchecked builder used by generators and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pile {
    entries: Vec<PileEntry>,
}

impl Pile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ObjectId, boxed: OrientedBox) {
        self.entries.push(PileEntry { id, boxed });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[PileEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PileEntry> {
        self.entries.iter()
    }

    /// Oriented boxes in pile order.
    pub fn boxes(&self) -> Vec<OrientedBox> {
        self.entries.iter().map(|e| e.boxed).collect()
    }

    /// Check identifiers are unique and every box is finite with positive extents.
    pub fn validate(&self) -> Result<(), PileError> {
        let mut seen = std::collections::BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.id) {
                return Err(PileError::DuplicateObject(entry.id));
            }
            validate_box(entry.id, &entry.boxed)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_box(id: ObjectId, boxed: &OrientedBox) -> Result<(), PileError> {
    let pose = &boxed.pose;
    if !(pose.position.x.is_finite() && pose.position.y.is_finite()) {
        return Err(PileError::non_finite(id, "position"));
    }
    if !pose.rotation.is_finite() {
        return Err(PileError::non_finite(id, "rotation"));
    }
    let bbox = &boxed.bbox;
    if !(bbox.min.iter().all(|v| v.is_finite()) && bbox.max.iter().all(|v| v.is_finite())) {
        return Err(PileError::non_finite(id, "bounding box"));
    }
    let size = bbox.size();
    for (axis, extent) in ['x', 'y', 'z'].into_iter().zip(size.iter()) {
        if *extent <= 0.0 {
            return Err(PileError::DegenerateExtent { id, axis });
        }
    }
    Ok(())
}

/// Computed resting pose of one object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResultPose {
    pub id: ObjectId,
    pub pose: Pose3,
}

/// Malformed input at the snapshot boundary.
#[derive(Clone, Debug, PartialEq)]
pub enum PileError {
    UnknownPile(PileId),
    MissingObject(ObjectId),
    DuplicateObject(ObjectId),
    NonFinite { id: ObjectId, what: &'static str },
    DegenerateExtent { id: ObjectId, axis: char },
}

impl PileError {
    fn non_finite(id: ObjectId, what: &'static str) -> Self {
        Self::NonFinite { id, what }
    }
}

impl fmt::Display for PileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownPile(pile) => write!(f, "unknown {pile}"),
            Self::MissingObject(id) => write!(f, "{id} is listed in the pile but absent"),
            Self::DuplicateObject(id) => write!(f, "{id} appears more than once"),
            Self::NonFinite { id, what } => write!(f, "{id}: non-finite {what}"),
            Self::DegenerateExtent { id, axis } => {
                write!(f, "{id}: bounding box extent along {axis} must be > 0")
            }
        }
    }
}

impl std::error::Error for PileError {}
