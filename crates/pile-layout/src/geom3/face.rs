use nalgebra::Vector3;

use super::types::{Plane3, Pose3};
use crate::geom2::{project, ConvexBoundary2, Rect3};

/// A planar polygon tagged with the plane it lies on.
#[derive(Clone, Debug, PartialEq)]
pub struct SupportFace {
    pub polygon: ConvexBoundary2,
    pub plane: Plane3,
}

/// Plane of the box's top face under `pose`.
pub fn top_plane(bbox: &Rect3, pose: &Pose3) -> Plane3 {
    face_plane(bbox.max.y, pose)
}

/// Plane of the box's bottom face under `pose` (normal still points up).
pub fn bottom_plane(bbox: &Rect3, pose: &Pose3) -> Plane3 {
    face_plane(bbox.min.y, pose)
}

fn face_plane(y: f64, pose: &Pose3) -> Plane3 {
    let normal = pose.up();
    let anchor = pose.transform_point(Vector3::new(0.0, y, 0.0));
    Plane3::new(normal, normal.dot(&anchor))
}

/// Top face of a placed box: its outline seen from above plus its plane.
pub fn top_face(bbox: &Rect3, pose: &Pose3) -> SupportFace {
    let (lo, hi, y) = (bbox.min, bbox.max, bbox.max.y);
    let corners = [
        Vector3::new(hi.x, y, hi.z),
        Vector3::new(lo.x, y, hi.z),
        Vector3::new(lo.x, y, lo.z),
        Vector3::new(hi.x, y, lo.z),
    ]
    .iter()
    .map(|&c| project(pose.transform_point(c)))
    .collect();
    SupportFace {
        polygon: ConvexBoundary2::from_corners(corners),
        plane: top_plane(bbox, pose),
    }
}
