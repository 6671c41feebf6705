use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::cfg::TILT_EPS;
use crate::geom2::{Pose2, Rect3};
use crate::geom3::{Plane3, Pose3};

#[inline]
fn yaw(pose: &Pose2) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pose.rotation)
}

/// Resting flat on the table: bottom face at `table_height`, rotation about +Y only.
pub fn flat_pose(pose: &Pose2, bbox: &Rect3, table_height: f64) -> Pose3 {
    let position = Vector3::new(pose.position.x, table_height - bbox.min.y, pose.position.y);
    Pose3::new(position, yaw(pose))
}

/// Rotation taking +Y onto the plane normal about a horizontal axis.
pub fn tilt_onto(normal: &Vector3<f64>) -> UnitQuaternion<f64> {
    let axis = Vector3::new(normal.z, 0.0, -normal.x);
    let len = axis.norm();
    if len < TILT_EPS {
        return UnitQuaternion::identity();
    }
    let angle = if len >= 1.0 {
        std::f64::consts::FRAC_PI_2
    } else {
        len.asin()
    };
    UnitQuaternion::from_axis_angle(&Unit::new_unchecked(axis / len), angle)
}

/// Resting on `plane`: the bottom face lies in the plane with the object's
/// planar position directly above/below `pose.position`.
pub fn pose_on_plane(pose: &Pose2, bbox: &Rect3, plane: &Plane3) -> Pose3 {
    let anchor = plane.point_at(pose.position);
    let position = anchor - plane.normal * bbox.min.y;
    Pose3::new(position, tilt_onto(&plane.normal) * yaw(pose))
}
