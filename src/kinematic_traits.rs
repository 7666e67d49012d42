extern crate nalgebra as na;

use std::fmt;

use na::Isometry3;

use crate::kinematic_error::KinematicError;

/// Pose is used a pose of the robot tcp. It contains both Cartesian position and rotation quaternion.
/// As the rotation is stored as a unit quaternion, it always stays orthonormal.
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Rotations of the six joints in radians, index-aligned to the physical joints 1 to 6.
pub type Joints = [f64; 6];

/// All joints at zero, the reference configuration when there are no previous joint positions.
pub const JOINTS_AT_ZERO: Joints = [0.0; 6];

/// This library may return up to 8 solutions, each defining the rotations of the 6 joints.
pub type Solutions = Vec<Joints>;

/// Kind of numerically degenerate configuration. In these positions some joint angles
/// are not uniquely defined by the pose, so the solver keeps them close to the previous
/// configuration instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singularity {
    /// Axes of J4 and J6 are aligned (J5 is 0 or ±180 degrees). Only J4 + J6 (or J4 - J6)
    /// is defined by the pose.
    Wrist,

    /// The arm is fully stretched or folded, both elbow branches coincide.
    Elbow,

    /// The wrist center is on the axis of J1, so J1 is not defined by the pose.
    Shoulder,
}

impl fmt::Display for Singularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Singularity::Wrist => write!(f, "wrist singularity (J4 and J6 axes aligned)"),
            Singularity::Elbow => write!(f, "elbow singularity (arm fully stretched or folded)"),
            Singularity::Shoulder => write!(f, "shoulder singularity (wrist center on J1 axis)"),
        }
    }
}

/// Result of inverse kinematics: the chosen joint configuration, and the warning
/// if this configuration is numerically degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IkSolution {
    pub joints: Joints,

    /// Set if the solution is near a singular configuration. The joints are still a
    /// valid best-effort solution for the requested pose.
    pub degenerate: Option<Singularity>,
}

impl IkSolution {
    /// Turns the degenerate warning into an error, for callers that must not operate near
    /// singular configurations.
    pub fn strict(self) -> Result<Joints, KinematicError> {
        match self.degenerate {
            Some(singularity) => Err(KinematicError::NumericDegenerate(singularity)),
            None => Ok(self.joints),
        }
    }
}

pub trait Kinematics: Send + Sync {
    /// Find the pose of the tool center point for the given joint positions.
    /// Fails with JointLimitViolation if any of the joints is outside its limits.
    fn forward(&self, qs: &Joints) -> Result<Pose, KinematicError>;

    /// Poses of all six joints, each accumulated from the base (the tool is not included).
    /// These are intended for visualization and are not stored anywhere.
    fn forward_with_joint_poses(&self, qs: &Joints) -> Result<[Pose; 6], KinematicError>;

    /// Find all solutions that put the tool center point into the given pose and are
    /// within joint limits. Where a joint allows more than one turn, the value closest
    /// to zero is used.
    fn inverse(&self, pose: &Pose) -> Solutions;

    /// Find all solutions for the given pose, sorted by the total joint displacement from
    /// the previous joint positions (the closest first).
    fn inverse_continuing(&self, pose: &Pose, previous: &Joints) -> Solutions;

    /// Find the single solution closest to the previous joint positions. Returns
    /// Unreachable if no solution satisfies both geometry and joint limits.
    fn solve(&self, pose: &Pose, previous: &Joints) -> Result<IkSolution, KinematicError>;

    /// Detect the singularity. Returns either the type of singularity or None if there
    /// is no singularity.
    fn kinematic_singularity(&self, qs: &Joints) -> Option<Singularity>;
}
