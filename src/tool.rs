//! Provides tool and base frames for the robot.
//! Both the base and the tool are fixed rigid offsets stored in the robot parameters,
//! so the chain computes `base * T1 * ... * T6 * tool` directly and inverse kinematics
//! strips them before solving:
//! ```
//! use rs_dh_kinematics::kinematic_traits::{Joints, Kinematics, Pose};
//! use rs_dh_kinematics::kinematics_impl::DhKinematics;
//! use rs_dh_kinematics::parameters::dh_kinematics::Parameters;
//! use rs_dh_kinematics::tool::{brush_tool, make_frame};
//!
//! // Half meter high pedestal, and the third brush of the paint head as the tool
//! let parameters = Parameters::fanuc_lr_mate_200id()
//!     .with_base(make_frame([0.0, 0.0, 0.5], [0.0, 0.0, 0.0]))
//!     .with_tool(brush_tool(3).unwrap());
//! let robot = DhKinematics::new(parameters).unwrap();
//!
//! let joints: Joints = [0.0, -0.1, 0.2, 0.3, 0.4, 0.5]; // Joints are alias of [f64; 6]
//! let tcp_pose: Pose = robot.forward(&joints).unwrap();
//! println!("The brush tip is at: {:?}", tcp_pose);
//! ```

use std::f64::consts::PI;

use nalgebra::{Translation3, UnitQuaternion, Vector3};

use crate::kinematic_traits::Pose;

/// Distance of each brush tip from the flange, along the approach axis (m).
pub const BRUSH_LENGTH: f64 = 0.300;

/// Offset of the brush holders from the approach axis (m).
pub const BRUSH_RADIUS: f64 = 0.050;

/// Number of brushes on the paint head.
pub const BRUSH_COUNT: usize = 4;

/// Yaw of the brush holders around the approach axis, in brush order.
const BRUSH_YAW: [f64; BRUSH_COUNT] = [5.0 * PI / 4.0, 7.0 * PI / 4.0, PI / 4.0, 3.0 * PI / 4.0];

/// Brushes are tilted outwards by this pitch.
const BRUSH_PITCH: f64 = -PI / 4.0;

/// Builds a frame from the translation and the roll, pitch and yaw angles. Rotations are
/// applied in ZYX order (yaw around Z first, then pitch around Y, then roll around X),
/// so the rotation matrix is `Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn make_frame(translation: [f64; 3], rpy: [f64; 3]) -> Pose {
    let [x, y, z] = translation;
    let [roll, pitch, yaw] = rpy;
    Pose::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

/// Transform from the flange to the tip of the brush of the paint head. Brushes are
/// numbered 1 to 4, and 0 means no brush (the flange itself). Each brush holder is
/// yawed to its position around the approach axis, offset by [`BRUSH_RADIUS`] and
/// pitched outwards, the tip being [`BRUSH_LENGTH`] further along the tilted axis.
/// Returns None for indices past the last brush.
pub fn brush_tool(index: usize) -> Option<Pose> {
    if index == 0 {
        return Some(Pose::identity());
    }
    let yaw = *BRUSH_YAW.get(index - 1)?;

    let holder = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), yaw);
    let tilt = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), BRUSH_PITCH);
    Some(
        Pose::from_parts(Translation3::identity(), holder)
            * Pose::from_parts(Translation3::new(-BRUSH_RADIUS, 0.0, 0.0), UnitQuaternion::identity())
            * Pose::from_parts(Translation3::identity(), tilt)
            * Pose::from_parts(Translation3::new(0.0, 0.0, BRUSH_LENGTH), UnitQuaternion::identity()),
    )
}

/// All brushes of the paint head, index 0 of the result being brush 1.
pub fn brush_tools() -> [Pose; BRUSH_COUNT] {
    std::array::from_fn(|i| brush_tool(i + 1).unwrap_or_else(Pose::identity))
}
