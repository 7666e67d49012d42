//! Errors reported by forward and inverse kinematics

use crate::kinematic_traits::Singularity;

/// Outcomes of kinematic computations that are not a usable result. Unreachable poses and
/// limit violations are expected during normal operation, and the caller decides whether
/// to halt, hold the last valid pose or skip the waypoint.
#[derive(Debug, Clone, PartialEq)]
pub enum KinematicError {
    /// Wrong number of joint values, non-finite input or a matrix that is not a rigid transform.
    InvalidInputShape(String),

    /// Joint angle outside the configured range. `joint` is 0-based.
    JointLimitViolation { joint: usize, value: f64 },

    /// No solution satisfies both the geometry and the joint limits.
    Unreachable,

    /// Only produced by [`crate::kinematic_traits::IkSolution::strict`].
    NumericDegenerate(Singularity),
}

impl std::fmt::Display for KinematicError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            KinematicError::InvalidInputShape(ref msg) =>
                write!(f, "Invalid input shape: {}", msg),
            KinematicError::JointLimitViolation { joint, value } =>
                write!(f, "Joint limit violation: J{} = {:.4} deg", joint + 1, value.to_degrees()),
            KinematicError::Unreachable =>
                write!(f, "Pose is unreachable"),
            KinematicError::NumericDegenerate(ref singularity) =>
                write!(f, "Numerically degenerate configuration: {}", singularity),
        }
    }
}

impl std::error::Error for KinematicError {}
