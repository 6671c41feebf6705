//! 3D planes, poses and support faces.
//!
//! - `Plane3`: oriented plane `n·p = dot` with height queries over the table.
//! - `Pose3`: rigid placement (translation + unit quaternion).
//! - `SupportFace`: top face of a placed box, the only kind of support surface.

mod face;
mod types;

pub use face::{bottom_plane, top_face, top_plane, SupportFace};
pub use types::{Plane3, Pose3};
